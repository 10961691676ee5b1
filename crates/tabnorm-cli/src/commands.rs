use anyhow::Result;
use tracing::{info, info_span};

use tabnorm_cli::pipeline::{OutputTarget, PipelineOptions, normalize_file};
use tabnorm_normalization::{ColumnPolicy, PolicyFile, default_policy};
use tabnorm_output::default_output_path;

use crate::cli::{ColumnsArgs, PolicyArgs, RunArgs};
use crate::summary::print_policy;
use crate::types::RunResult;

pub fn run_normalize(args: &RunArgs) -> Result<RunResult> {
    let span = info_span!("run", input = %args.input.display());
    let _guard = span.enter();

    let policy = load_policy(&args.policy)?;
    let options = PipelineOptions::default().with_overflow(args.overflow.into());
    let target = if args.dry_run {
        OutputTarget::Discard
    } else {
        OutputTarget::File(
            args.output
                .clone()
                .unwrap_or_else(|| default_output_path(&args.input)),
        )
    };

    info!(
        rules = policy.len(),
        overflow = ?options.overflow,
        dry_run = args.dry_run,
        "Starting normalization"
    );
    let output = normalize_file(&args.input, &target, &policy, &options)?;

    Ok(RunResult {
        input: args.input.clone(),
        output: output.output_path,
        stats: output.stats,
    })
}

pub fn run_columns(args: &ColumnsArgs) -> Result<()> {
    let policy = load_policy(&args.policy)?;
    print_policy(&policy);
    Ok(())
}

/// Builds the effective policy: built-in rules (unless disabled) overlaid
/// with the policy file.
fn load_policy(args: &PolicyArgs) -> Result<ColumnPolicy> {
    let mut policy = if args.no_default_policy {
        ColumnPolicy::new()
    } else {
        default_policy().clone()
    };
    if let Some(path) = &args.policy {
        PolicyFile::load(path)?.apply_to(&mut policy);
    }
    Ok(policy)
}
