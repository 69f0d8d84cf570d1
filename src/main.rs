use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use versavio_site::reveal::{self, Direction, FoldClass, RevealSpec, TimelineOptions};
use versavio_site::{config, content, generate, output, routes};

/// Flags for previewing a single block's reveal timeline.
#[derive(clap::Args, Clone)]
struct RevealArgs {
    /// Fold class: above or below
    #[arg(long, default_value = "below")]
    fold: FoldClass,

    /// Travel direction: up, down, left, right, none
    #[arg(long, default_value = "up")]
    direction: Direction,

    /// Stagger delay in seconds
    #[arg(long, default_value_t = 0.0)]
    delay: f64,

    /// Seconds until the block enters the viewport (omit: never)
    #[arg(long)]
    enter_at: Option<f64>,

    /// Simulate a platform without viewport observation
    #[arg(long)]
    no_observer: bool,

    /// Sampling step in seconds
    #[arg(long, default_value_t = 0.1)]
    step: f64,

    /// Sample until this many seconds (at most 10000 samples)
    #[arg(long, default_value_t = 2.0)]
    until: f64,
}

#[derive(Parser)]
#[command(name = "versavio-site")]
#[command(about = "Static site generator for the Versavio Tech website")]
#[command(long_about = "\
Static site generator for the Versavio Tech website

Content structure:

  content/
  ├── config.toml                  # Site config (optional, overrides stock defaults)
  ├── assets/                      # Static assets → copied to dist/assets/
  ├── pages/
  │   ├── home.md                  # +++ TOML front matter +++, then markdown
  │   ├── about.md                 # body sections split on '## ' headings
  │   ├── services.md
  │   └── contact.md               # [[faq]] entries become a FAQ list + FAQPage
  ├── blog/
  │   └── 010-ai-native-erp.md     # NNN- prefix orders listings; rest is the slug
  └── projects/
      └── 010-jira-testing.toml    # one case study per file

Run 'versavio-site gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the full site
    Build,
    /// Validate content and metadata without writing anything
    Check,
    /// Show how a URL path resolves
    Resolve {
        /// Site-relative path, e.g. /blog/ai-native-erp-sap-2026
        path: String,
    },
    /// Preview a block's reveal timeline
    Reveal(RevealArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let site = config::load_config(&cli.source)?;
            init_thread_pool(&site.processing);
            println!("==> Building {} → {}", cli.source.display(), cli.output.display());
            let report = generate::generate(&cli.source, &cli.output, &site)?;
            output::print_build_output(&report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site = config::load_config(&cli.source)?;
            let inventory = generate::check(&cli.source, &site)?;
            output::print_check_output(&inventory, &cli.source);
            println!("==> Content is valid");
        }
        Command::Resolve { path } => {
            let catalogue = content::Catalogue::load(&cli.source)?;
            let resolution = routes::resolve(&path, &catalogue);
            output::print_resolution(&path, &resolution);
        }
        Command::Reveal(args) => {
            let site = config::load_config(&cli.source)?;
            let spec = RevealSpec {
                fold: args.fold,
                direction: args.direction,
                delay: Duration::ZERO,
            }
            .with_delay_secs(args.delay);
            let enter_at = args.enter_at.map(seconds);
            let samples = reveal::timeline(
                spec,
                &site.reveal,
                TimelineOptions {
                    enter_at,
                    observer_supported: !args.no_observer,
                    step: seconds(args.step),
                    until: seconds(args.until),
                },
            );
            output::print_timeline(&spec, enter_at, &samples);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores: the user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

/// Seconds from the command line; negative and NaN clamp to zero.
fn seconds(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs.max(0.0)).unwrap_or(Duration::MAX)
}
