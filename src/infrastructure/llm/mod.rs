mod client_factory;
mod gemini_client;
mod scripted_generation_client;
mod sse_decoder;

pub use client_factory::create_generation_client;
pub use gemini_client::GeminiClient;
pub use scripted_generation_client::ScriptedGenerationClient;
pub use sse_decoder::SseDecoder;
