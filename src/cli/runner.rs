//! Command execution

use std::path::Path;

use crate::cli::args::Args;
use crate::config::{FileReader, Reader};
use crate::error::{OverrideError, Result};
use crate::logging::Logger;
use crate::overrides::OverrideClient;

/// Load the configuration, apply overrides to every requested image, and
/// print one altered reference per line on stdout.
pub fn run(args: Args) -> Result<()> {
    let logger = if args.quiet {
        Logger::new_quiet()
    } else {
        Logger::new(args.verbose)
    };

    logger.section("Resolving image overrides");

    let mut reader = FileReader::from_path(Path::new(&args.config))?;
    logger.info(&format!("configuration: {}", args.config));

    for entry in &args.set {
        let (key, value) = entry.split_once('=').ok_or_else(|| {
            OverrideError::Config(format!(
                "invalid --set override '{}', expected KEY=VALUE",
                entry
            ))
        })?;
        reader.set(key, value);
        logger.detail(&format!("explicit override: {} = {}", key, value));
    }

    let client = OverrideClient::new(reader);
    let mut altered_count = 0;

    for image in &args.images {
        let altered = client.alter_image(&args.component, image)?;
        if altered == *image {
            logger.step(&format!("{}: unchanged", image));
        } else {
            logger.step(&format!("{} -> {}", image, altered));
            altered_count += 1;
        }
        println!("{}", altered);
    }

    logger.success(&format!(
        "{} of {} images altered",
        altered_count,
        args.images.len()
    ));
    Ok(())
}
