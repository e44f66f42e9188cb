//! Target language of an analysis
//!
//! The language only shapes the outbound prompt; it is never used to
//! validate the input text.

use std::fmt;

/// Supported input languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    /// English
    #[default]
    En,
    /// Igbo
    Ig,
    /// Hausa
    Ha,
    /// Yoruba
    Yo,
    /// Nigerian Pidgin
    Pcm,
}

impl Language {
    /// All supported languages
    pub const ALL: [Language; 5] = [
        Language::En,
        Language::Ig,
        Language::Ha,
        Language::Yo,
        Language::Pcm,
    ];

    /// ISO 639 code
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ig => "ig",
            Language::Ha => "ha",
            Language::Yo => "yo",
            Language::Pcm => "pcm",
        }
    }

    /// Human-readable name, used in prompts
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Ig => "Igbo",
            Language::Ha => "Hausa",
            Language::Yo => "Yoruba",
            Language::Pcm => "Nigerian Pidgin",
        }
    }

    /// Parse a language from its code or its name
    pub fn parse(s: &str) -> Option<Self> {
        let lowered = s.trim().to_lowercase();
        Language::ALL
            .into_iter()
            .find(|l| l.code() == lowered || l.display_name().to_lowercase() == lowered)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
