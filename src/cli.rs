use clap::{Args, Parser, Subcommand};
use placepug::config::{Config, ImageMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "placepug")]
#[command(author, version, about = "Placeholder image service")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the image server
    Start {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
        port: Option<u16>,

        #[command(flatten)]
        images: ImageArgs,
    },

    /// Load the images and report what would be served
    Check {
        #[command(flatten)]
        images: ImageArgs,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

/// Overrides for the `[images]` config section
#[derive(Args)]
pub struct ImageArgs {
    /// Directory holding the images (and catalogue.json)
    #[arg(long)]
    pub images_dir: Option<PathBuf>,

    /// How images are selected
    #[arg(long, value_enum)]
    pub mode: Option<ImageMode>,
}

impl ImageArgs {
    pub fn apply(self, config: &mut Config) {
        if let Some(dir) = self.images_dir {
            config.images.dir = dir;
        }
        if let Some(mode) = self.mode {
            config.images.mode = mode;
        }
    }
}
