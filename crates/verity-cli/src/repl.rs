//! Interactive REPL (Read-Eval-Print Loop) mode.

use crate::commands::{analyze::resolve_language, open_session, open_store, Session};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use verity_analyzer::Severity;
use verity_domain::{AnalysisRequest, Language};

/// Run the interactive REPL.
pub async fn run_repl(config: &Config, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.info("Verity REPL - Type 'help' for commands, 'exit' to quit"));
    println!();

    let mut editor = DefaultEditor::new()?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    let mut session = open_session(config, open_store(config)?)?;
    let mut input = ReplInput {
        url: None,
        language: config.language(),
    };

    if !session.has_credential() {
        println!(
            "{}",
            formatter.warning("No credential stored. Use 'key <KEY>' before analyzing.")
        );
    }

    loop {
        let prompt = format!("verity [{}]> ", input.language.code());

        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(cmd) => {
                        if let Err(e) =
                            execute_repl_command(cmd, &mut session, &mut input, config, formatter).await
                        {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();

    Ok(())
}

/// Request fields that persist between REPL lines.
struct ReplInput {
    url: Option<String>,
    language: Language,
}

/// REPL command type.
#[derive(Debug, PartialEq)]
enum ReplCommand {
    Exit,
    Help,
    Analyze(String),
    Url(Option<String>),
    Lang(String),
    Clear,
    History,
    HistoryClear,
    Key(String),
    Status,
    Dismiss,
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    match head {
        "" => Err(CliError::InvalidInput("Empty command".to_string())),
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "analyze" | "a" => Ok(ReplCommand::Analyze(rest.to_string())),
        "url" => Ok(ReplCommand::Url(
            Some(rest.to_string()).filter(|u| !u.is_empty()),
        )),
        "lang" => {
            if rest.is_empty() {
                return Err(CliError::InvalidInput("Usage: lang <code>".to_string()));
            }
            Ok(ReplCommand::Lang(rest.to_string()))
        }
        "clear" => Ok(ReplCommand::Clear),
        "history" => match rest {
            "" | "list" => Ok(ReplCommand::History),
            "clear" => Ok(ReplCommand::HistoryClear),
            other => Err(CliError::InvalidInput(format!(
                "Unknown history action: {}",
                other
            ))),
        },
        "key" => {
            if rest.is_empty() {
                return Err(CliError::InvalidInput("Usage: key <KEY>".to_string()));
            }
            Ok(ReplCommand::Key(rest.to_string()))
        }
        "status" => Ok(ReplCommand::Status),
        "dismiss" => Ok(ReplCommand::Dismiss),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            head
        ))),
    }
}

/// Execute a REPL command.
async fn execute_repl_command(
    cmd: ReplCommand,
    session: &mut Session,
    input: &mut ReplInput,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    match cmd {
        ReplCommand::Analyze(text) => {
            let request = AnalysisRequest::new(text, input.language, input.url.clone());
            analyze(session, request, formatter).await?;
        }
        ReplCommand::Url(url) => {
            match &url {
                Some(u) => println!("{}", formatter.info(&format!("Source URL set to {}", u))),
                None => println!("{}", formatter.info("Source URL cleared")),
            }
            input.url = url;
        }
        ReplCommand::Lang(value) => {
            input.language = resolve_language(Some(&value), config)?;
            println!(
                "{}",
                formatter.info(&format!("Language set to {}", input.language.display_name()))
            );
        }
        ReplCommand::Clear => {
            session.clear();
            input.url = None;
            println!("{}", formatter.info("Cleared"));
        }
        ReplCommand::History => {
            println!("{}", formatter.format_history(session.history())?);
        }
        ReplCommand::HistoryClear => {
            session.clear_history();
            println!("{}", formatter.success("History cleared"));
        }
        ReplCommand::Key(key) => {
            session.set_credential(&key)?;
            println!("{}", formatter.success("Credential saved"));
        }
        ReplCommand::Status => {
            println!("  Profile: {}", config.active_profile);
            println!("  Language: {}", input.language.display_name());
            println!("  Source URL: {}", input.url.as_deref().unwrap_or("-"));
            println!(
                "  Credential: {}",
                if session.has_credential() { "stored" } else { "missing" }
            );
            println!("  State: {}", session.state().name());
            println!("  History: {} entries", session.history().len());
            if let Some(notice) = session.notice() {
                println!("  {}", formatter.notice(notice));
            }
        }
        ReplCommand::Dismiss => {
            if session.notice().is_some() {
                session.dismiss_notice();
                println!("{}", formatter.info("Notice dismissed"));
            } else {
                println!("{}", formatter.info("No notice to dismiss"));
            }
        }
        ReplCommand::Exit | ReplCommand::Help => {}
    }

    Ok(())
}

/// Run one analysis, cancelling it on Ctrl-C.
async fn analyze(session: &mut Session, request: AnalysisRequest, formatter: &Formatter) -> Result<()> {
    let outcome = tokio::select! {
        outcome = session.submit(request) => Some(outcome.map(|_| ())),
        _ = tokio::signal::ctrl_c() => None,
    };

    match outcome {
        None => session.cancel(),
        Some(Err(e)) => {
            match session.notice() {
                Some(notice) => println!("{}", formatter.notice(notice)),
                None => println!("{}", formatter.warning(&e.to_string())),
            }
            return Ok(());
        }
        Some(Ok(())) => {}
    }

    println!("{}", formatter.format_state(session.state())?);
    if let Some(notice) = session.notice() {
        if notice.severity == Severity::Info {
            println!("{}", formatter.info("Store a credential with 'key <KEY>'"));
        }
    }

    Ok(())
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("repl_history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  analyze <text>          - Check a piece of news text");
    println!("  url [url]               - Set or clear the source URL");
    println!("  lang <code>             - Set the language (en, ig, ha, yo, pcm)");
    println!("  clear                   - Reset the current input and result");
    println!("  history [clear]         - Show or clear recent analyses");
    println!("  key <KEY>               - Store the classifier credential");
    println!("  status                  - Show session status and any notice");
    println!("  dismiss                 - Dismiss the current notice");
    println!("  help, ?                 - Show this help");
    println!("  exit, quit, q           - Exit REPL");
    println!();
    println!("  Press Ctrl-C while an analysis is running to cancel it.");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze_keeps_inner_spacing() {
        assert_eq!(
            parse_repl_command("analyze  Fuel  price rises").unwrap(),
            ReplCommand::Analyze("Fuel  price rises".to_string())
        );
    }

    #[test]
    fn test_parse_analyze_without_text() {
        assert_eq!(
            parse_repl_command("analyze").unwrap(),
            ReplCommand::Analyze(String::new())
        );
    }

    #[test]
    fn test_parse_url() {
        assert_eq!(
            parse_repl_command("url https://example.com/a").unwrap(),
            ReplCommand::Url(Some("https://example.com/a".to_string()))
        );
        assert_eq!(parse_repl_command("url").unwrap(), ReplCommand::Url(None));
    }

    #[test]
    fn test_parse_history() {
        assert_eq!(parse_repl_command("history").unwrap(), ReplCommand::History);
        assert_eq!(
            parse_repl_command("history clear").unwrap(),
            ReplCommand::HistoryClear
        );
        assert!(parse_repl_command("history purge").is_err());
    }

    #[test]
    fn test_parse_requires_arguments() {
        assert!(parse_repl_command("lang").is_err());
        assert!(parse_repl_command("key").is_err());
    }

    #[test]
    fn test_parse_dismiss() {
        assert_eq!(parse_repl_command("dismiss").unwrap(), ReplCommand::Dismiss);
    }

    #[test]
    fn test_parse_unknown() {
        assert!(parse_repl_command("verify this").is_err());
        assert_eq!(parse_repl_command("quit").unwrap(), ReplCommand::Exit);
    }
}
