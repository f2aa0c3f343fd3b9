//! Shakespearean poem generation

use crate::error::Result;
use crate::llm::TextGenerator;

/// Poem prompt. The topic is substituted exactly once.
pub const POEM_TEMPLATE: &str = "\nAct as a Shakespearean. and write a poem on {topic}.\n";

/// Default poem topic
pub const DEFAULT_POEM_TOPIC: &str = "machine learning";

/// Substitute the topic into the poem prompt
pub fn poem_prompt(topic: &str) -> String {
    POEM_TEMPLATE.replacen("{topic}", topic, 1)
}

/// Generate a poem on the topic with the given generator
pub async fn generate_poem(generator: &dyn TextGenerator, topic: &str) -> Result<String> {
    generator.generate(&poem_prompt(topic)).await
}
