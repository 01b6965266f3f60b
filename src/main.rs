use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use finreport::cli::{
    handle_config_command, handle_export_command, handle_summary_command, ConfigArgs, ExportArgs,
    SourceArgs,
};
use finreport::config::{ReportPaths, Settings};
use finreport::logging::init_logging;

#[derive(Parser)]
#[command(
    name = "finreport",
    author = "Kaylee Beyene",
    version,
    about = "Financial report compiler",
    long_about = "finreport aggregates debts, budgets, savings goals, net worth history \
                  and activity from local record stores, derives summary metrics, and \
                  exports them as a JSON or YAML snapshot, a flattened CSV table, or a \
                  paginated PDF report."
)]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn", env = "FINREPORT_LOG")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Export records and metrics in one format
    Export(ExportArgs),

    /// Print summary metrics and dataset coverage
    Summary(SourceArgs),

    /// Show configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let paths = ReportPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    debug!(base_dir = %paths.base_dir().display(), "settings loaded");

    match cli.command {
        Some(Commands::Export(args)) => handle_export_command(&paths, &settings, args)?,
        Some(Commands::Summary(sources)) => handle_summary_command(&paths, &settings, sources)?,
        Some(Commands::Config(args)) => handle_config_command(&paths, &settings, args)?,
        None => {
            println!("finreport - Financial report compiler");
            println!();
            println!("Run 'finreport --help' for usage information.");
            println!("Run 'finreport export --format document' to build a PDF report.");
        }
    }

    Ok(())
}
