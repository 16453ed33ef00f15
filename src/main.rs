use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use openapi_docs::{load_openapi, Config, ContentRoot, Driver, MarkdownGenerator};
use tracing::{debug, error, Level};
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "openapi-docs")]
#[command(version, about = "Generate documentation pages from per-project OpenAPI specs")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[arg(long, short, help = "Config file (default: openapi-docs.toml)")]
    config: Option<PathBuf>,

    #[arg(long, help = "Content root, relative to the working directory")]
    content_dir: Option<PathBuf>,

    #[arg(long, short)]
    verbose: bool,

    #[arg(long, short)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Generate docs for every project with specs (default)
    Generate {
        #[arg(long, help = "Leave operation descriptions out of the front matter")]
        no_description: bool,
    },
    /// Print every spec file a runtime docs site would load
    List,
}

fn init_tracing(verbose: bool, quiet: bool) {
    let filter = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "info"
    };
    // warnings and errors to stderr, progress to stdout
    let writer = std::io::stderr
        .with_max_level(Level::WARN)
        .or_else(std::io::stdout);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Failed to build OpenAPI spec docs: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(content_dir) = cli.content_dir {
        config.content_dir = content_dir;
    }
    let root = ContentRoot::with_layout(config.content_root()?, &config);
    debug!("content root: {}", root.path().display());

    match cli.command.unwrap_or(Command::Generate {
        no_description: false,
    }) {
        Command::Generate { no_description } => {
            let report = Driver::new(root, MarkdownGenerator)
                .include_description(config.include_description && !no_description)
                .run()
                .await;
            debug!(
                "generated: {}, failed: {}, skipped: {}",
                report.generated.len(),
                report.failed.len(),
                report.skipped.len()
            );
        }
        Command::List => {
            let source = load_openapi(&root);
            for spec in source.input() {
                println!("{}", spec.display());
            }
        }
    }
    Ok(())
}
