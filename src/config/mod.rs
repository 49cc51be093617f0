//! Configuration module for orgmail
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every section has defaults matching the production crawl of the
//! gov.mn organization directory, so an empty file is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use orgmail::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Output file: {}", config.output.csv_path);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, HttpConfig, OutputConfig, SiteConfig};

// Re-export parser functions
pub use parser::load_config;
