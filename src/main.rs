use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wanderpress::{config, output, pipeline};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "wanderpress")]
#[command(about = "Static site generator for a travel blog")]
#[command(long_about = "\
Static site generator for a travel blog

Reads the authoring tool's JSON content store and writes a complete static
site with clean URLs, ready for any plain file host.

Data directory:

  data/
  ├── posts.json          # Posts (drafts are never published)
  ├── categories.json     # Categories referenced by posts
  ├── config.toml         # Site config (optional)
  └── about.md            # About page body (optional, Markdown)

Output tree:

  docs/
  ├── index.html          # Home: featured post + recent stories
  ├── 404.html
  ├── about/index.html
  └── blog/
      ├── index.html      # Listing with category filter and search
      └── <slug>/index.html

Run 'wanderpress gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Data directory holding posts.json and categories.json
    #[arg(long, default_value = "data", global = true)]
    data: PathBuf,

    /// Output directory
    #[arg(long, default_value = "docs", global = true)]
    output: PathBuf,

    /// Log debug detail to stderr (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the full site into the output directory
    Build {
        /// Remove post directories that no longer have a published post
        #[arg(long)]
        prune: bool,
    },
    /// Validate config and data and list the routes without writing
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Build { prune } => {
            let site_config = config::load_config(&cli.data)?;
            init_thread_pool(&site_config.processing);
            println!(
                "==> Building {} → {}",
                cli.data.display(),
                cli.output.display()
            );
            let report = pipeline::build(&pipeline::BuildOptions {
                data_dir: cli.data,
                output_dir: cli.output,
                prune,
            })?;
            output::print_build_output(&report);
        }
        Command::Check => {
            println!("==> Checking {}", cli.data.display());
            let report = pipeline::check(&cli.data)?;
            output::print_check_output(&report);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "wanderpress=debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
