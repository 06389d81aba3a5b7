//! # Provider Capabilities
//!
//! The pipeline depends on two external collaborators: a completion provider
//! (`ai`) and a web search provider (`search`). Both are expressed as traits
//! so that concrete clients, and test doubles, can be swapped freely.

pub mod ai;
pub mod factory;
pub mod search;
