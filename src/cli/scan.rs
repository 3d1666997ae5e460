use crate::{scan_config, MigrationOptions};
use anyhow::{Context, Result};
use std::fs::File;

use super::{check_errors, print_summary, ScanArgs};

pub(crate) fn run_scan(args: ScanArgs) -> Result<()> {
    let file = File::open(&args.r#in)
        .with_context(|| format!("Failed to open input file: {}", args.r#in.display()))?;

    let options = MigrationOptions {
        fail_if_existing: args.fail_if_existing,
        verbose: args.verbose,
    };

    let summary = scan_config(file, &options)?;

    if !summary.validation.valid {
        println!("Pre-flight issues:");
        for issue in &summary.validation.issues {
            println!("  {}", issue);
        }
        println!();
    }

    print_summary(&summary);
    check_errors(&summary, args.fail_on_errors)
}
