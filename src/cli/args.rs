//! Command-line argument parsing

use clap::Parser;

#[derive(Parser)]
#[command(name = "image-overrides")]
#[command(about = "Rewrite container image references through layered override configurations")]
#[command(version, author)]
pub struct Args {
    /// Path to the override configuration file
    #[arg(
        long = "config",
        short = 'c',
        help = "Path to the YAML configuration file declaring image overrides"
    )]
    pub config: String,

    /// Component the images belong to
    #[arg(
        long = "component",
        short = 'n',
        help = "Component name used to select component-scoped overrides"
    )]
    pub component: String,

    /// Explicit configuration overrides
    #[arg(
        long = "set",
        short = 's',
        value_name = "KEY=VALUE",
        help = "Explicit config override taking precedence over environment and file values"
    )]
    pub set: Vec<String>,

    /// Image references to rewrite
    #[arg(
        required = true,
        value_name = "IMAGE",
        help = "Image references to rewrite, one altered reference printed per line"
    )]
    pub images: Vec<String>,

    /// Verbose output
    #[arg(long = "verbose", short = 'v', help = "Show resolution details")]
    pub verbose: bool,

    /// Quiet output
    #[arg(
        long = "quiet",
        short = 'q',
        conflicts_with = "verbose",
        help = "Suppress everything except the altered references"
    )]
    pub quiet: bool,
}
