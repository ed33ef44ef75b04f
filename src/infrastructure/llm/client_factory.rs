use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{GenerationClient, GenerationError};
use crate::presentation::config::{LlmProvider, LlmSettings};

use super::{GeminiClient, ScriptedGenerationClient};

/// Builds the configured generation client.
///
/// Returns `Ok(None)` when the Gemini provider is selected without an API
/// key; the relay then rejects chat requests as unconfigured.
pub fn create_generation_client(
    settings: &LlmSettings,
) -> Result<Option<Arc<dyn GenerationClient>>, GenerationError> {
    match settings.provider {
        LlmProvider::Gemini => {
            if settings.api_key.trim().is_empty() {
                tracing::warn!("No Gemini API key configured, chat relay disabled");
                return Ok(None);
            }
            Ok(Some(Arc::new(GeminiClient::new(settings)?)))
        }
        LlmProvider::Scaffold => {
            tracing::info!("Scaffold provider selected, replies echo the prompt");
            Ok(Some(Arc::new(
                ScriptedGenerationClient::echo()
                    .with_fragment_delay(Duration::from_millis(settings.scaffold_delay_ms)),
            )))
        }
    }
}
