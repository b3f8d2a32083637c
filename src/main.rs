use clap::Parser;

use image_overrides::cli::{self, Args};
use image_overrides::logging::Logger;

fn main() {
    let args = Args::parse();

    if let Err(e) = cli::run(args) {
        Logger::new_quiet().error(&e.to_string());
        std::process::exit(1);
    }
}
