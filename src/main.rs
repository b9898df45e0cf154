use clap::{Parser, Subcommand};
use photo_manifest::{config, logging, output, publish, scan, server};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "photo-manifest")]
#[command(about = "Month-grouped photo manifest for a personal website")]
#[command(long_about = "\
Month-grouped photo manifest for a personal website

Scans a photos directory of month folders and produces the JSON listing the
site frontend renders, either per request or once at build time.

Photos structure:

  public/photos/
  ├── 2024-02/              # Month folder (YYYY-MM) → one group
  │   ├── beach.jpg         # jpg, jpeg, png, gif, webp (any case)
  │   └── notes.txt         # Ignored
  ├── 2024-01/
  │   └── snow.png
  └── drafts/               # Not YYYY-MM → ignored

Groups are ordered newest month first; months without images are dropped.
A missing photos directory yields {\"success\": false, ...}, never an error
page.

Run 'photo-manifest gen-config' to generate a documented config file.")]
#[command(version)]
struct Cli {
    /// Config file (optional; defaults apply when missing)
    #[arg(long, default_value = config::DEFAULT_CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Photos root directory (overrides config)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// URL prefix for image URLs (overrides config)
    #[arg(long, global = true)]
    base_route: Option<String>,

    /// Emit JSON logs instead of human-readable ones
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan once and write the manifest file for static serving
    Build {
        /// Output file (overrides config)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Serve the manifest over HTTP, rebuilt on every request
    Serve {
        /// Listen address (overrides config)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Print the manifest JSON to stdout
    Scan,
    /// Print a readable inventory; exits non-zero if the scan fails
    Check,
    /// Print a stock config file with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    logging::init(if cli.log_json {
        logging::Profile::Production
    } else {
        logging::Profile::Development
    });

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let mut site_config = config::load_config(&cli.config)?;
    if let Some(root) = cli.root {
        site_config.photos_root = root;
    }
    if let Some(base_route) = cli.base_route {
        site_config.base_route = base_route;
    }
    match &cli.command {
        Command::Build {
            output: Some(output),
        } => site_config.output = output.clone(),
        Command::Serve { bind: Some(bind) } => site_config.server.bind = bind.clone(),
        _ => {}
    }
    site_config.validate()?;

    init_thread_pool(&site_config.processing);
    let options = site_config.scan_options();

    match cli.command {
        Command::Build { .. } => {
            let manifest =
                publish::build_and_publish(&site_config.photos_root, &options, &site_config.output)?;
            output::print_build_output(&manifest, &site_config.output);
        }
        Command::Serve { .. } => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(&site_config))?;
        }
        Command::Scan => {
            let manifest = scan::build(&site_config.photos_root, &options);
            println!("{}", serde_json::to_string_pretty(&manifest)?);
        }
        Command::Check => {
            println!("==> Checking {}", site_config.photos_root.display());
            let manifest = scan::build(&site_config.photos_root, &options);
            output::print_manifest_output(&manifest);
            if !manifest.is_success() {
                std::process::exit(1);
            }
        }
        // Printed before config loading
        Command::GenConfig => {}
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Capped at the number of available CPU cores.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
