//! Curso command-line entry point.

use clap::Parser;
use curso::cli::{self, Cli, Commands};
use curso::{CursoConfig, LogTarget, init_logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    let _ = dotenvy::dotenv();

    let args = Cli::parse();
    let command = args.selected_command();

    let target = match (&command, &args.log_file) {
        (Commands::Tui { .. }, explicit) => LogTarget::file(explicit.as_deref()),
        (_, Some(path)) => LogTarget::File(path.clone()),
        (_, None) if args.json_logs => LogTarget::StderrJson,
        (_, None) => LogTarget::Stderr,
    };
    init_logging(&target)?;

    let config = CursoConfig::load(args.config.as_deref())?;
    let config = if args.no_grounding {
        config.with_grounding(false)
    } else {
        config
    };

    let mut stdout = std::io::stdout();
    match command {
        Commands::Tui { size } => cli::launch_tui(&config, size).await,
        Commands::Pillars { topic } => {
            cli::handle_pillars(&config.requestor()?, &topic, &mut stdout).await
        }
        Commands::Variations { topic, pillar } => {
            cli::handle_variations(&config.requestor()?, &topic, &pillar, &mut stdout).await
        }
        Commands::Course {
            topic,
            pillar,
            variation,
            json,
        } => {
            cli::handle_course(
                &config.requestor()?,
                &topic,
                &pillar,
                &variation,
                json,
                &mut stdout,
            )
            .await
        }
        Commands::Image {
            title,
            keyword,
            size,
            out,
        } => cli::handle_image(&config.requestor()?, &title, &keyword, size, &out).await,
    }
}
