//! Prompt construction for the generative classifier

use verity_domain::Language;

/// Builds the instruction sent to a generative model
pub struct PromptBuilder {
    text: String,
    language: Language,
    source_url: Option<String>,
}

impl PromptBuilder {
    /// Create a new prompt builder
    pub fn new(text: impl Into<String>, language: Language) -> Self {
        Self {
            text: text.into(),
            language,
            source_url: None,
        }
    }

    /// Mention where the text came from
    pub fn with_source(mut self, url: Option<String>) -> Self {
        self.source_url = url;
        self
    }

    /// Build the complete prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(ANALYSIS_INSTRUCTIONS);
        prompt.push_str("\n\n");

        prompt.push_str(&format!(
            "The news text is written in {} ({}). Write the explanation in {}.\n",
            self.language.display_name(),
            self.language.code(),
            self.language.display_name()
        ));
        if let Some(url) = &self.source_url {
            prompt.push_str(&format!("Claimed source: {}\n", url));
        }
        prompt.push('\n');

        prompt.push_str("News text:\n");
        prompt.push_str("---\n");
        prompt.push_str(&self.text);
        prompt.push_str("\n---\n\n");

        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }
}

const ANALYSIS_INSTRUCTIONS: &str = r#"You are a news verification assistant. Assess whether the news text below is authentic or misleading.

Choose exactly one classification:
- Authentic: accurate, credible and verifiable
- Genuine: reliable, no sign of misleading intent
- Neutral: cannot be confirmed either way
- Misleading: inaccurate, deceptive or fake
- False: fabricated or intentionally false

Choose exactly one sentiment: positive, negative, neutral, misleading, real.

Give a confidence between 0.0 and 1.0 and a short explanation (two or three sentences)."#;

const OUTPUT_FORMAT_REMINDER: &str = r#"Output format (a single JSON object, no additional text):
{
  "classification": "Authentic" | "Genuine" | "Neutral" | "Misleading" | "False",
  "sentiment": "positive" | "negative" | "neutral" | "misleading" | "real",
  "confidence": 0.0-1.0,
  "explanation": "..."
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_text() {
        let prompt = PromptBuilder::new("Petrol price falls to N200", Language::En).build();
        assert!(prompt.contains("Petrol price falls to N200"));
    }

    #[test]
    fn test_prompt_names_language() {
        let prompt = PromptBuilder::new("Ìròyìn", Language::Yo).build();
        assert!(prompt.contains("Yoruba (yo)"));
    }

    #[test]
    fn test_prompt_includes_source_when_given() {
        let prompt = PromptBuilder::new("text", Language::En)
            .with_source(Some("https://example.com/a".to_string()))
            .build();
        assert!(prompt.contains("Claimed source: https://example.com/a"));

        let prompt = PromptBuilder::new("text", Language::En).build();
        assert!(!prompt.contains("Claimed source"));
    }

    #[test]
    fn test_prompt_requests_json_shape() {
        let prompt = PromptBuilder::new("text", Language::Pcm).build();
        for field in ["classification", "sentiment", "confidence", "explanation"] {
            assert!(prompt.contains(field));
        }
    }
}
