//! Key command implementation.

use crate::cli::{KeyAction, KeyArgs};
use crate::commands::open_store;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use verity_store::{mask, CredentialStore};

/// Execute the key command.
pub async fn execute_key(args: KeyArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let credentials = CredentialStore::new(open_store(config)?);

    match args.action {
        KeyAction::Set { key } => {
            credentials.set(&key)?;
            println!("{}", formatter.success("Credential saved"));
        }
        KeyAction::Show => match credentials.get() {
            Some(key) => println!("{}", mask(&key)),
            None => println!("{}", formatter.warning("No credential stored")),
        },
        KeyAction::Clear => {
            credentials.clear()?;
            println!("{}", formatter.success("Credential removed"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_config;
    use crate::config::OutputFormat;
    use crate::error::CliError;

    #[tokio::test]
    async fn test_set_then_clear() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let formatter = Formatter::new(OutputFormat::Table, false);

        execute_key(
            KeyArgs {
                action: KeyAction::Set {
                    key: " abc123 ".to_string(),
                },
            },
            &config,
            &formatter,
        )
        .await
        .unwrap();

        let credentials = CredentialStore::new(open_store(&config).unwrap());
        assert_eq!(credentials.get().as_deref(), Some("abc123"));

        execute_key(KeyArgs { action: KeyAction::Clear }, &config, &formatter)
            .await
            .unwrap();
        assert!(credentials.get().is_none());
    }

    #[tokio::test]
    async fn test_blank_key_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let formatter = Formatter::new(OutputFormat::Table, false);

        let result = execute_key(
            KeyArgs {
                action: KeyAction::Set {
                    key: "   ".to_string(),
                },
            },
            &config,
            &formatter,
        )
        .await;
        assert!(matches!(result, Err(CliError::Store(_))));
    }
}
