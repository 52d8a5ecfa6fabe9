use clap::{Parser, Subcommand};
use courtside_cli::CliContext;
use courtside_cli::commands;
use courtside_cli::readline;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let ctx = CliContext::new();

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                eprintln!("{err}");
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "cli")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconstruct a season file into per-game parquet + reports
    Reconstruct {
        #[arg(short, long)]
        path: String,
    },
    /// Run the validator over a season file and print results
    Validate {
        #[arg(short, long)]
        path: String,
    },
    /// Fetch rotation intervals for a season file (resumable)
    FetchRotations {
        #[arg(short, long)]
        path: String,
    },
    Config,
    SetDataDir {
        #[arg(short, long)]
        path: String,
    },
    Exit,
}

async fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "courtside".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::Reconstruct { path }) => commands::reconstruct(path, ctx).await?,
        Some(Commands::Validate { path }) => commands::validate(path, ctx).await?,
        Some(Commands::FetchRotations { path }) => commands::fetch_rotations(path, ctx).await?,
        Some(Commands::Config) => commands::show_settings(ctx).await,
        Some(Commands::SetDataDir { path }) => commands::set_data_dir(path, ctx).await?,
        Some(Commands::Exit) => {
            commands::exit();
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
