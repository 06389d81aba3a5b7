//! # AI Provider Factory
//!
//! Centralizes the construction of completion providers from configuration so
//! that every consumer (the server, tests, tools) builds them the same way.

use crate::{
    constants::DEFAULT_GEMINI_MODEL,
    errors::ExtractError,
    providers::ai::{gemini::GeminiProvider, local::LocalAiProvider, AiProvider},
};
use tracing::info;

/// Settings for one completion provider instance.
#[derive(Debug, Clone, Default)]
pub struct AiProviderSettings {
    /// The type of provider, `gemini` or `local`.
    pub provider: String,
    /// The API URL. Derived from the model name for Gemini when absent.
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub model_name: Option<String>,
}

/// Creates a completion provider from its settings.
///
/// - `gemini` requires an API key; the URL defaults to the model's
///   `generateContent` endpoint.
/// - `local` requires an API URL; the key and model are optional.
pub fn create_ai_provider(settings: &AiProviderSettings) -> Result<Box<dyn AiProvider>, ExtractError> {
    match settings.provider.as_str() {
        "gemini" => {
            let api_key = settings
                .api_key
                .clone()
                .filter(|key| !key.trim().is_empty())
                .ok_or(ExtractError::MissingApiKey)?;
            let model_name = settings
                .model_name
                .as_deref()
                .filter(|name| !name.is_empty())
                .unwrap_or(DEFAULT_GEMINI_MODEL);
            let api_url = settings
                .api_url
                .clone()
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| GeminiProvider::endpoint_for_model(model_name));
            info!("Configuring Gemini provider with URL: {}", api_url);
            Ok(Box::new(GeminiProvider::new(api_url, api_key)?))
        }
        "local" => {
            let api_url = settings
                .api_url
                .clone()
                .filter(|url| !url.is_empty())
                .ok_or_else(|| {
                    ExtractError::InvalidInput(
                        "api_url is required for the local provider".to_string(),
                    )
                })?;
            info!("Configuring local AI provider with URL: {}", api_url);
            Ok(Box::new(LocalAiProvider::new(
                api_url,
                settings.api_key.clone(),
                settings.model_name.clone(),
            )?))
        }
        other => Err(ExtractError::InvalidInput(format!(
            "Unsupported AI provider type '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gemini_requires_api_key() {
        let settings = AiProviderSettings {
            provider: "gemini".into(),
            ..Default::default()
        };
        assert!(matches!(
            create_ai_provider(&settings),
            Err(ExtractError::MissingApiKey)
        ));
    }

    #[test]
    fn local_requires_api_url() {
        let settings = AiProviderSettings {
            provider: "local".into(),
            ..Default::default()
        };
        assert!(matches!(
            create_ai_provider(&settings),
            Err(ExtractError::InvalidInput(_))
        ));
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let settings = AiProviderSettings {
            provider: "carrier-pigeon".into(),
            ..Default::default()
        };
        let err = create_ai_provider(&settings).err().unwrap();
        assert!(err.to_string().contains("carrier-pigeon"));
    }

    #[test]
    fn gemini_builds_with_key() {
        let settings = AiProviderSettings {
            provider: "gemini".into(),
            api_key: Some("test-key".into()),
            ..Default::default()
        };
        assert!(create_ai_provider(&settings).is_ok());
    }
}
