mod cli;

use placepug::catalogue::{Catalogue, DirectoryListing};
use placepug::config::{self, Config, ImageMode};
use placepug::{selector, server};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, ImageArgs};

async fn start_server(config: Config) -> Result<()> {
    tracing::info!("Starting placepug");

    // Nothing to serve means no server.
    let source = selector::load_source(&config.images).context("Failed to load images")?;

    server::start_server(config, source).await
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "placepug=trace,tower_http=debug".to_string()
        } else {
            "placepug=debug,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    let result = run(cli);
    if let Err(ref e) = result {
        tracing::error!("{:#}", e);
    }
    result
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Start { host, port, images } => {
            let mut config = config::load_config_or_default(cli.config.as_deref())?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            images.apply(&mut config);

            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(config))
        }
        Commands::Check { images } => check_images(cli.config.as_deref(), images),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("placepug {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn check_images(config_path: Option<&std::path::Path>, images: ImageArgs) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;
    images.apply(&mut config);

    let images = &config.images;
    println!("Images directory: {}", images.dir.display());

    match images.mode {
        ImageMode::Catalogue => {
            let catalogue = Catalogue::load(&images.dir, &images.catalogue_file)?;
            println!("Catalogue: {} entries", catalogue.entries().len());
            for (orientation, count) in selector::orientation_summary(&catalogue) {
                println!("  {}: {}", orientation, count);
            }
            for entry in catalogue.entries() {
                println!("  {} {}x{} {}", entry.file, entry.width, entry.height, entry.orientation);
            }
        }
        ImageMode::Directory => {
            let listing = DirectoryListing::load(&images.dir)?;
            println!("Directory: {} images", listing.files().len());
            for file in listing.files() {
                println!("  {}", file);
            }
        }
    }

    Ok(())
}

fn validate_config(path: Option<&std::path::Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            Config::default()
        }
    };

    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Render timeout: {}s", config.server.render_timeout_secs);
    println!("  Images: {:?} ({:?} mode)", config.images.dir, config.images.mode);
    println!("  Max dimension: {}", config.images.max_dimension);
    println!("  JPEG quality: {}", config.images.jpeg_quality);

    Ok(())
}
