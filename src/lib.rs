//! Image Overrides Library
//!
//! This file serves as the library root for the image-overrides crate,
//! organizing and exposing the modules that resolve and apply container
//! image overrides.

pub mod cli;
pub mod config;
pub mod error;
pub mod image;
pub mod logging;
pub mod overrides;

pub use config::{FileReader, MemoryReader, Reader};
pub use error::{OverrideError, Result};
pub use image::ImageReference;
pub use overrides::{ImageOverride, OverrideClient, OverrideResolver};
