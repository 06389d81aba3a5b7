pub mod gemini;
pub mod local;
pub mod response;

use crate::errors::ExtractError;
use async_trait::async_trait;
use dyn_clone::DynClone;
pub use response::CompletionOutput;
use std::fmt::Debug;

/// A trait for interacting with a text-completion provider.
///
/// Implementations must be safe to call concurrently from independent
/// requests; connection pooling is their own concern.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a completion from a given system and user prompt.
    ///
    /// Rate-limit and quota failures must be reported as
    /// [`ExtractError::RateLimited`] so callers can tell them apart.
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<CompletionOutput, ExtractError>;
}

dyn_clone::clone_trait_object!(AiProvider);
