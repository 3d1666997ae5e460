use anyhow::Result;
use clap::{Parser, Subcommand};
use std::ffi::OsString;

use crate::MigrationSummary;

mod convert;
mod scan;
mod verify;

pub(crate) struct ScanArgs {
    pub(crate) r#in: std::path::PathBuf,
    pub(crate) fail_if_existing: bool,
    pub(crate) fail_on_errors: bool,
    pub(crate) verbose: bool,
}

pub(crate) struct ConvertArgs {
    pub(crate) r#in: std::path::PathBuf,
    pub(crate) out: std::path::PathBuf,
    pub(crate) fail_if_existing: bool,
    pub(crate) fail_on_errors: bool,
    pub(crate) verbose: bool,
    pub(crate) force: bool,
}

pub(crate) struct VerifyArgs {
    pub(crate) r#in: std::path::PathBuf,
    pub(crate) fail_if_existing: bool,
    pub(crate) verbose: bool,
    pub(crate) quiet: bool,
}

#[derive(Parser)]
#[command(
    name = "pf2kea",
    about = "Migrate ISC DHCP static mappings to Kea reservations",
    long_about = "Designed for OPNsense config.xml but may work with similar XML schemas.",
    after_help = "Examples:\n  pf2kea scan --in ./config.xml\n  pf2kea convert --in ./config.xml --out ./config.xml.new\n  pf2kea verify --in ./config.xml\n\nRun 'pf2kea scan --help' or 'pf2kea convert --help' to see all flags."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan configuration and show the migration report (read-only)
    Scan {
        /// Input config.xml file path
        #[arg(short, long, default_value = "/conf/config.xml")]
        r#in: std::path::PathBuf,

        /// Abort if any existing reservations are found
        #[arg(long)]
        fail_if_existing: bool,

        /// Exit non-zero when error-severity diagnostics are produced
        #[arg(long)]
        fail_on_errors: bool,

        /// Show detailed progress for each mapping
        #[arg(short, long)]
        verbose: bool,
    },

    /// Convert static mappings to Kea reservations and write to output file
    Convert {
        /// Input config.xml file path
        #[arg(short, long, default_value = "/conf/config.xml")]
        r#in: std::path::PathBuf,

        /// Output file path for converted XML
        #[arg(short, long)]
        out: std::path::PathBuf,

        /// Abort if any existing reservations are found
        #[arg(long)]
        fail_if_existing: bool,

        /// Exit non-zero when error-severity diagnostics are produced
        #[arg(long)]
        fail_on_errors: bool,

        /// Show detailed progress for each mapping
        #[arg(short, long)]
        verbose: bool,

        /// Overwrite output file if it exists
        #[arg(long)]
        force: bool,
    },

    /// Verify the migration by showing a diff (no files written)
    Verify {
        /// Input config.xml file path
        #[arg(short, long, default_value = "/conf/config.xml")]
        r#in: std::path::PathBuf,

        /// Abort if any existing reservations are found
        #[arg(long)]
        fail_if_existing: bool,

        /// Show detailed progress for each mapping
        #[arg(short, long)]
        verbose: bool,

        /// Suppress diff output (exit code still indicates changes)
        #[arg(long)]
        quiet: bool,
    },
}

pub fn run_with_args<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    match cli.command {
        Commands::Scan {
            r#in,
            fail_if_existing,
            fail_on_errors,
            verbose,
        } => scan::run_scan(ScanArgs {
            r#in,
            fail_if_existing,
            fail_on_errors,
            verbose,
        }),
        Commands::Convert {
            r#in,
            out,
            fail_if_existing,
            fail_on_errors,
            verbose,
            force,
        } => convert::run_convert(ConvertArgs {
            r#in,
            out,
            fail_if_existing,
            fail_on_errors,
            verbose,
            force,
        }),
        Commands::Verify {
            r#in,
            fail_if_existing,
            verbose,
            quiet,
        } => verify::run_verify(VerifyArgs {
            r#in,
            fail_if_existing,
            verbose,
            quiet,
        }),
    }
}

pub(crate) fn print_summary(summary: &MigrationSummary) {
    print!("{}", summary.report);
    if summary.skipped_existing > 0 {
        println!(
            "Reservations skipped (already exist): {}",
            summary.skipped_existing
        );
    }
}

pub(crate) fn check_errors(summary: &MigrationSummary, fail_on_errors: bool) -> Result<()> {
    if fail_on_errors && summary.stats.errors > 0 {
        anyhow::bail!(
            "{} error(s) during migration and --fail-on-errors is set",
            summary.stats.errors
        );
    }
    Ok(())
}
