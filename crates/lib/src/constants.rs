//! # Shared Constants
//!
//! Defaults for the extraction pipeline. The server's configuration layer
//! builds on these, so every consumer starts from the same values.

/// Number of extraction attempts before falling back.
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Fixed delay between extraction attempts, in seconds.
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 2;

/// Number of search results requested from the search provider.
pub const DEFAULT_RESULT_LIMIT: usize = 5;

/// Hard cap on the aggregated search content, in characters.
pub const MAX_CONTENT_CHARS: usize = 2500;

/// Appended to aggregated content that was cut at the cap.
pub const TRUNCATION_MARKER: &str = "...";

/// Separator line emitted after each search result.
pub const RESULT_SEPARATOR: &str = "---";

/// Literal suffix of every search query.
pub const QUERY_SUFFIX: &str = "specifications";

/// Classification assigned to fallback records.
pub const DEFAULT_FALLBACK_CLASSIFICATION: &str = "Generator Emissions/UREA/DPF Systems";

/// The default Gemini model used when none is configured.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash-exp";

/// Sampling temperature sent to completion providers.
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Output token cap sent to completion providers.
pub const DEFAULT_MAX_OUTPUT_TOKENS: i32 = 2000;

/// Per-request timeout for completion providers, in seconds.
pub const AI_REQUEST_TIMEOUT_SECS: u64 = 30;
