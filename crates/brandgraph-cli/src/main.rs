//! Brandgraph CLI - Command-line interface for the brand relationship graph.

use brandgraph_cli::commands;
use brandgraph_cli::{Cli, Command, Config, Formatter, Workspace};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> brandgraph_cli::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        // Dismissing does not need the workspace
        Command::Dismiss { id } => commands::execute_dismiss(id, &config, &formatter),
        command => {
            let mut workspace = Workspace::load(&cli.workspace)?;
            dispatch(command, &mut workspace, &config, &formatter).await
        }
    }
}

async fn dispatch(
    command: Command,
    workspace: &mut Workspace,
    config: &Config,
    formatter: &Formatter,
) -> brandgraph_cli::Result<()> {
    match command {
        Command::Impact(args) => commands::execute_impact(args, workspace, formatter),
        Command::Check(args) => commands::execute_check(args, workspace, config, formatter).await,
        Command::Stats => commands::execute_stats(workspace, formatter),
        Command::Relations(args) => commands::execute_relations(args, workspace, formatter),
        Command::Link(args) => commands::execute_link(args, workspace, formatter),
        Command::Unlink { id } => commands::execute_unlink(id, workspace, formatter),
        Command::Suggest { all } => commands::execute_suggest(all, workspace, config, formatter),
        Command::Status(args) => commands::execute_status(args, workspace, config, formatter),
        Command::Gate(args) => commands::execute_gate(args, workspace, config, formatter),
        Command::Dismiss { id } => commands::execute_dismiss(id, config, formatter),
    }
}

/// Log to stderr so stdout stays machine-readable. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
