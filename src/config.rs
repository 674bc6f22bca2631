//! Configuration loader and schema types.
//!
//! This module exposes the settings schema used to drive the catalog, the
//! playback policies, the audio thread, listings and the console, plus
//! helpers to load it from disk and the environment.

mod load;
mod schema;

pub use load::resolve_config_path;
pub use schema::*;

#[cfg(test)]
mod tests;
