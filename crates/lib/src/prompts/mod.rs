//! # Prompt Template Modules
//!
//! This module organizes the prompt templates used by the extraction pipeline.

pub mod extraction;

pub use extraction::{
    format_extraction_prompt, ASSET_EXTRACTION_SYSTEM_PROMPT, ASSET_EXTRACTION_USER_PROMPT,
};
