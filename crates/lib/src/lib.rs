//! # Asset Information Extraction
//!
//! This crate turns a partial identification of a physical asset (model
//! number, classification, optional manufacturer) into a structured
//! [`AssetRecord`]. It searches the web for matching snippets and asks a
//! configurable completion provider to synthesize them, retrying a bounded
//! number of times before returning a deterministic fallback record.
//!
//! ```no_run
//! # async fn run(ai: Box<dyn assetlens::providers::ai::AiProvider>, search: Box<dyn assetlens::providers::search::SearchProvider>) -> Result<(), assetlens::ExtractError> {
//! use assetlens::{AssetExtractorBuilder, AssetQuery};
//!
//! let extractor = AssetExtractorBuilder::new()
//!     .ai_provider(ai)
//!     .search_provider(search)
//!     .build()?;
//! let asset = AssetQuery::new("MRN85HD", "Generator (Marine)", Some("Cummins"))?;
//! let record = extractor.extract(&asset).await;
//! println!("{}", record.summary);
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod constants;
pub mod errors;
pub mod extractor;
pub mod parser;
pub mod prompts;
pub mod providers;
pub mod query;
pub mod types;

pub use errors::{ExtractError, ParseError, ResponseError, SearchError, ValidationError};
pub use extractor::{AssetExtractor, AssetExtractorBuilder};
pub use types::{
    AssetQuery, AssetRecord, ExtractionOptions, ExtractionOutcome, ExtractionReport,
    FallbackReason, SearchResult,
};
