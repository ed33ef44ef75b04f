use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{FragmentStream, GenerationClient, GenerationError};

#[derive(Debug, Clone)]
enum Script {
    Fixed(Vec<String>),
    /// Replays the prompt back one word at a time.
    Echo,
}

/// In-process generation client with a predetermined reply.
///
/// Backs scaffold mode (no upstream credential) and the relay tests. It can
/// be told to fail after a number of fragments to exercise the error path.
#[derive(Debug, Clone)]
pub struct ScriptedGenerationClient {
    script: Script,
    fail_after: Option<usize>,
    fragment_delay: Duration,
}

impl ScriptedGenerationClient {
    pub fn new<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: Script::Fixed(fragments.into_iter().map(Into::into).collect()),
            fail_after: None,
            fragment_delay: Duration::ZERO,
        }
    }

    pub fn echo() -> Self {
        Self {
            script: Script::Echo,
            fail_after: None,
            fragment_delay: Duration::ZERO,
        }
    }

    /// Ends the stream with an upstream error once `count` fragments were sent.
    pub fn failing_after(mut self, count: usize) -> Self {
        self.fail_after = Some(count);
        self
    }

    pub fn with_fragment_delay(mut self, delay: Duration) -> Self {
        self.fragment_delay = delay;
        self
    }

    fn fragments_for(&self, prompt: &str) -> Vec<String> {
        match &self.script {
            Script::Fixed(fragments) => fragments.clone(),
            Script::Echo => prompt
                .split_inclusive(' ')
                .map(str::to_string)
                .collect(),
        }
    }
}

#[async_trait]
impl GenerationClient for ScriptedGenerationClient {
    async fn generate(&self, prompt: &str) -> Result<FragmentStream, GenerationError> {
        let fragments = self.fragments_for(prompt);
        let fail_after = self.fail_after;
        let delay = self.fragment_delay;

        let stream = async_stream::stream! {
            for (index, fragment) in fragments.into_iter().enumerate() {
                if fail_after == Some(index) {
                    yield Err(GenerationError::ApiRequestFailed(
                        "scripted upstream failure".to_string(),
                    ));
                    return;
                }
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                yield Ok(fragment);
            }
        };

        Ok(Box::pin(stream))
    }
}
