use anyhow::Result;
use purity_report::cli::{parse_args, Cli};
use purity_report::commands::{handle_report, ReportOptions};
use purity_report::observability::init_logging;

// Main orchestrator function
fn main() -> Result<()> {
    let cli = parse_args();
    init_logging(cli.verbosity);

    handle_report(build_report_options(cli))
}

// Pure function to build report options from parsed arguments
fn build_report_options(cli: Cli) -> ReportOptions {
    let emoji = cli.emoji_mode();
    ReportOptions {
        dir: cli.dir,
        config: cli.config,
        emoji,
    }
}
