//! CLI entry point - the composition root.
//!
//! Command dispatch routes to handlers, which get their dependencies from
//! the `CliContext` built by bootstrap.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use storytime_cli::{Cli, CliConfig, Commands, bootstrap, handlers};

/// Logs go to stderr so they never interleave with the player prompt.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before clap reads its `env` fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = CliConfig::with_defaults()?
        .with_model(cli.model)
        .with_base_url(cli.base_url);
    let ctx = bootstrap(config).await?;

    match command {
        Commands::Profiles { command } => {
            handlers::profiles::execute(&ctx, command).await?;
        }
        Commands::Stories { language } => {
            handlers::stories::execute(&ctx, language);
        }
        Commands::Voices => {
            handlers::stories::voices();
        }
        Commands::Listen { profile } => {
            handlers::listen::execute(&ctx, profile.as_deref()).await?;
        }
        Commands::Paths => {
            handlers::paths::execute(&ctx)?;
        }
    }

    Ok(())
}
