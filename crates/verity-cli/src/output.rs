//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use verity_analyzer::{Notice, SessionState, Severity};
use verity_domain::{AnalysisResult, HistoryEntry, Tone};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a single analysis result.
    pub fn format_result(&self, result: &AnalysisResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&result_json(result))?),
            OutputFormat::Table => Ok(self.format_result_table(result)),
            OutputFormat::Quiet => Ok(result.classification.to_string()),
        }
    }

    fn format_result_table(&self, result: &AnalysisResult) -> String {
        let headline = self.colorize(
            &result.headline,
            tone_color(result.classification.tone()),
        );

        let mut builder = Builder::default();
        builder.push_record(["Classification", "Sentiment", "Confidence"]);
        builder.push_record([
            result.classification.to_string(),
            result.sentiment.to_string(),
            format!("{}%", result.confidence_percent()),
        ]);

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        format!("{}\n{}\n{}", headline, table, result.explanation)
    }

    /// Format history entries, newest first.
    pub fn format_history(&self, entries: &[HistoryEntry]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = entries
                    .iter()
                    .map(|e| {
                        serde_json::json!({
                            "id": e.id.to_string(),
                            "text": e.full_text,
                            "preview": e.truncated_text,
                            "url": e.url,
                            "language": e.language.code(),
                            "result": result_json(&e.result),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => Ok(self.format_history_table(entries)),
            OutputFormat::Quiet => Ok(entries
                .iter()
                .map(|e| e.result.classification.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_history_table(&self, entries: &[HistoryEntry]) -> String {
        if entries.is_empty() {
            return self.colorize("No history yet.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Text", "Classification", "Confidence", "Lang"]);

        for (i, entry) in entries.iter().enumerate() {
            let classification = self.colorize(
                entry.result.classification.as_str(),
                tone_color(entry.result.classification.tone()),
            );
            builder.push_record([
                (i + 1).to_string(),
                entry.truncated_text.clone(),
                classification,
                format!("{}%", entry.result.confidence_percent()),
                entry.language.code().to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format the visible part of a session state.
    pub fn format_state(&self, state: &SessionState) -> Result<String> {
        match state {
            SessionState::Idle => Ok(self.info("Ready")),
            SessionState::Pending => Ok(self.info("Analyzing...")),
            SessionState::Success(result) => self.format_result(result),
            SessionState::Failed(message) => Ok(self.error(message)),
        }
    }

    /// Format an inline notice by its severity.
    pub fn notice(&self, notice: &Notice) -> String {
        match notice.severity {
            Severity::Info => self.info(&notice.message),
            Severity::Warning => self.warning(&notice.message),
            Severity::Error => self.error(&notice.message),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn tone_color(tone: Tone) -> &'static str {
    match tone {
        Tone::Positive => "green",
        Tone::Caution => "yellow",
        Tone::Negative => "red",
    }
}

fn result_json(result: &AnalysisResult) -> serde_json::Value {
    serde_json::json!({
        "classification": result.classification.as_str(),
        "headline": result.headline,
        "sentiment": result.sentiment.as_str(),
        "confidence": result.confidence,
        "explanation": result.explanation,
        "timestamp": result.timestamp_ms,
    })
}
