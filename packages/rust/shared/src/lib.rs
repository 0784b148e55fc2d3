//! Shared types, error model, and configuration for faqbridge.
//!
//! This crate is the foundation depended on by all other faqbridge crates.
//! It provides:
//! - [`FaqBridgeError`] — the unified error type
//! - Domain types ([`SourceRecord`], [`ExtractedFields`], [`OutputRow`], [`KnowledgeSheet`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DATABASE_ID_ENV, PAGE_SIZE_CAP, ServerConfig, SourceConfig, config_dir,
    config_file_path, init_config, load_config, load_config_from,
};
pub use error::{FaqBridgeError, Result};
pub use types::{
    CATEGORY_SLOTS, ExtractedFields, KnowledgeSheet, OutputRow, PropertyValue, ROW_WIDTH,
    SCHEMA_TYPE, SourceRecord, TextRun,
};
