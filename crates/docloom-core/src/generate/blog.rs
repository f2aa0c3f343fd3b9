//! Blog post generation

use crate::llm::TextGenerator;

/// Blog prompt. The topic is substituted exactly once. The instruction
/// wrapper is part of the template, so the Llama blog preset sends it as-is.
pub const BLOG_TEMPLATE: &str =
    "<s>[INST]Human: Write a 200 word blog post about {topic}.\nAssistant:[/INST]</s>";

/// Substitute the topic into the blog prompt
pub fn blog_prompt(topic: &str) -> String {
    BLOG_TEMPLATE.replacen("{topic}", topic, 1)
}

/// Generate a blog post on the topic.
///
/// A remote-call failure is logged and converted into an empty string; this
/// function never returns an error.
pub async fn generate_blog(generator: &dyn TextGenerator, topic: &str) -> String {
    match generator.generate(&blog_prompt(topic)).await {
        Ok(text) => text,
        Err(e) => {
            tracing::error!("Blog generation failed: {}", e);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DocloomError, Result};
    use async_trait::async_trait;

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Err(DocloomError::ExternalError("service unavailable".into()))
        }

        fn model_name(&self) -> &str {
            "failing"
        }

        fn request_body(&self, prompt: &str) -> serde_json::Value {
            serde_json::json!({ "prompt": prompt })
        }
    }

    struct EchoGenerator;

    #[async_trait]
    impl TextGenerator for EchoGenerator {
        async fn generate(&self, prompt: &str) -> Result<String> {
            Ok(prompt.to_string())
        }

        fn model_name(&self) -> &str {
            "echo"
        }

        fn request_body(&self, prompt: &str) -> serde_json::Value {
            serde_json::json!({ "prompt": prompt })
        }
    }

    #[test]
    fn test_blog_prompt_substitutes_once() {
        let prompt = blog_prompt("serverless computing");
        assert_eq!(prompt.matches("serverless computing").count(), 1);
        assert!(!prompt.contains("{topic}"));
        assert!(prompt.starts_with("<s>[INST]"));
        assert!(prompt.ends_with("[/INST]</s>"));
    }

    #[tokio::test]
    async fn test_generate_blog_passes_prompt_through() {
        let blog = generate_blog(&EchoGenerator, "a topic").await;
        assert_eq!(blog.matches("a topic").count(), 1);
    }

    #[tokio::test]
    async fn test_generate_blog_returns_empty_on_failure() {
        let blog = generate_blog(&FailingGenerator, "a topic").await;
        assert_eq!(blog, "");
    }
}
