//! Configuration for the analyzer
//!
//! Compile-time limits are generated by `build.rs` from
//! `config/<JLEX_BUILD_PROFILE>.toml`; runtime preferences live in [`runtime`].

include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

pub use runtime::{
    FileProcessorPreferences, LexicalPreferences, LoggingPreferences, RuntimeConfig,
    TablePreferences,
};

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("JLEX_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("JLEX_CONFIG_DIR").unwrap_or("config")
    }

    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}
