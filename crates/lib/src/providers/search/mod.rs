use crate::{errors::SearchError, types::SearchResult};
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A black-box web search capability.
///
/// Returns up to `limit` results in the provider's ranking order. An empty
/// vector is a valid answer.
#[async_trait]
pub trait SearchProvider: Send + Sync + Debug + DynClone {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError>;
}

dyn_clone::clone_trait_object!(SearchProvider);
