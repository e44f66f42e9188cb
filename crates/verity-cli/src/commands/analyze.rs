//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::commands::{open_session, open_store};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::fs;
use std::io;
use verity_analyzer::{SessionState, Severity};
use verity_domain::{AnalysisRequest, Language};

/// Execute the analyze command.
pub async fn execute_analyze(args: AnalyzeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let text = read_text(&args)?;
    let language = resolve_language(args.lang.as_deref(), config)?;

    let store = open_store(config)?;
    let mut session = open_session(config, store)?;

    let request = AnalysisRequest::new(text, language, args.url);
    let state = session.submit(request).await?.clone();

    match state {
        SessionState::Success(result) => {
            println!("{}", formatter.format_result(&result)?);
            Ok(())
        }
        SessionState::Failed(message) => {
            if let Some(notice) = session.notice() {
                if notice.severity == Severity::Info {
                    eprintln!(
                        "{}",
                        formatter.info("Store a credential with `verity key set <KEY>`")
                    );
                }
            }
            Err(CliError::Failed(message))
        }
        other => Err(CliError::Failed(format!(
            "Analysis ended in unexpected state '{}'",
            other.name()
        ))),
    }
}

/// Resolve a language argument, falling back to the configured default.
pub fn resolve_language(arg: Option<&str>, config: &Config) -> Result<Language> {
    match arg {
        Some(value) => Language::parse(value)
            .ok_or_else(|| CliError::InvalidInput(format!("Unknown language: {}", value))),
        None => Ok(config.language()),
    }
}

fn read_text(args: &AnalyzeArgs) -> Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    if let Some(path) = &args.file {
        return Ok(fs::read_to_string(path)?);
    }
    if args.stdin {
        return Ok(io::read_to_string(io::stdin())?);
    }
    Err(CliError::InvalidInput(
        "Provide text, --file <PATH> or --stdin".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_config;
    use crate::config::OutputFormat;
    use verity_analyzer::AnalysisError;

    fn args(text: Option<&str>) -> AnalyzeArgs {
        AnalyzeArgs {
            text: text.map(str::to_string),
            file: None,
            stdin: false,
            url: None,
            lang: None,
        }
    }

    #[test]
    fn test_resolve_language() {
        let config = Config::default();
        assert_eq!(resolve_language(None, &config).unwrap(), Language::En);
        assert_eq!(resolve_language(Some("pcm"), &config).unwrap(), Language::Pcm);
        assert!(resolve_language(Some("klingon"), &config).is_err());
    }

    #[test]
    fn test_read_text_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("article.txt");
        fs::write(&path, "Markets rallied on Friday.").unwrap();

        let mut file_args = args(None);
        file_args.file = Some(path);
        assert_eq!(read_text(&file_args).unwrap(), "Markets rallied on Friday.");
    }

    #[test]
    fn test_no_input_source() {
        assert!(matches!(read_text(&args(None)), Err(CliError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_blank_text_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let result = execute_analyze(args(Some("   ")), &config, &formatter).await;
        assert!(matches!(
            result,
            Err(CliError::Analysis(AnalysisError::Validation(_)))
        ));
    }

    #[tokio::test]
    async fn test_missing_credential_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let result = execute_analyze(args(Some("Some news")), &config, &formatter).await;
        match result {
            Err(CliError::Failed(message)) => assert!(message.contains("Configuration")),
            other => panic!("Expected failure, got {:?}", other),
        }
    }
}
