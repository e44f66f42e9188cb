//! Verdict vocabularies
//!
//! Both enums are closed sets. Values coming from an external classifier are
//! parsed through `parse`, which never produces anything outside the set.

use std::fmt;

/// Primary verdict on the authenticity of a piece of news
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Accurate, credible and verified
    Authentic,

    /// Reliable, without misleading intent
    Genuine,

    /// Neither clearly reliable nor clearly misleading
    Neutral,

    /// Contains inaccuracies or deceptive framing
    Misleading,

    /// Fabricated or intentionally false
    False,
}

/// Display grouping of classifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    /// Authentic or Genuine
    Positive,
    /// Neutral
    Caution,
    /// Misleading or False
    Negative,
}

impl Classification {
    /// All classifications, most trustworthy first
    pub const ALL: [Classification; 5] = [
        Classification::Authentic,
        Classification::Genuine,
        Classification::Neutral,
        Classification::Misleading,
        Classification::False,
    ];

    /// Get the classification name as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Authentic => "Authentic",
            Classification::Genuine => "Genuine",
            Classification::Neutral => "Neutral",
            Classification::Misleading => "Misleading",
            Classification::False => "False",
        }
    }

    /// Parse a classification, ignoring case and surrounding whitespace
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "authentic" => Some(Classification::Authentic),
            "genuine" => Some(Classification::Genuine),
            "neutral" => Some(Classification::Neutral),
            "misleading" => Some(Classification::Misleading),
            "false" => Some(Classification::False),
            _ => None,
        }
    }

    /// One-line verdict shown above the explanation
    pub fn headline(&self) -> &'static str {
        match self {
            Classification::Authentic => "Authentic and Verified News!",
            Classification::Genuine => "Genuine News Content!",
            Classification::Neutral => "Neutral or Uncertain News Content!",
            Classification::Misleading => "Misleading or Fake News Detected!",
            Classification::False => "Highly Misleading or False News!",
        }
    }

    /// Display grouping
    pub fn tone(&self) -> Tone {
        match self {
            Classification::Authentic | Classification::Genuine => Tone::Positive,
            Classification::Neutral => Tone::Caution,
            Classification::Misleading | Classification::False => Tone::Negative,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Secondary emotional/factual tag
///
/// Not guaranteed to agree with the [`Classification`] of the same result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    /// Positive framing
    Positive,
    /// Negative framing
    Negative,
    /// No clear framing
    Neutral,
    /// Framing intended to mislead
    Misleading,
    /// Factual reporting
    Real,
}

impl Sentiment {
    /// Get the sentiment name as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
            Sentiment::Misleading => "misleading",
            Sentiment::Real => "real",
        }
    }

    /// Parse a sentiment, ignoring case and surrounding whitespace
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Some(Sentiment::Positive),
            "negative" => Some(Sentiment::Negative),
            "neutral" => Some(Sentiment::Neutral),
            "misleading" => Some(Sentiment::Misleading),
            "real" => Some(Sentiment::Real),
            _ => None,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_round_trip() {
        for c in Classification::ALL {
            assert_eq!(Classification::parse(c.as_str()), Some(c));
        }
    }

    #[test]
    fn test_classification_parse_is_lenient_on_case() {
        assert_eq!(Classification::parse("  genuine "), Some(Classification::Genuine));
        assert_eq!(Classification::parse("FALSE"), Some(Classification::False));
        assert_eq!(Classification::parse("Fake"), None);
        assert_eq!(Classification::parse(""), None);
    }

    #[test]
    fn test_tone_grouping() {
        assert_eq!(Classification::Authentic.tone(), Tone::Positive);
        assert_eq!(Classification::Genuine.tone(), Tone::Positive);
        assert_eq!(Classification::Neutral.tone(), Tone::Caution);
        assert_eq!(Classification::Misleading.tone(), Tone::Negative);
        assert_eq!(Classification::False.tone(), Tone::Negative);
    }

    #[test]
    fn test_headline() {
        assert_eq!(Classification::False.headline(), "Highly Misleading or False News!");
    }

    #[test]
    fn test_sentiment_parse() {
        assert_eq!(Sentiment::parse("Positive"), Some(Sentiment::Positive));
        assert_eq!(Sentiment::parse("real"), Some(Sentiment::Real));
        assert_eq!(Sentiment::parse("angry"), None);
    }
}
