//! History command implementation.

use crate::cli::{HistoryAction, HistoryArgs};
use crate::commands::open_store;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use verity_store::HistoryStore;

/// Execute the history command.
pub async fn execute_history(args: HistoryArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let mut history = HistoryStore::load(open_store(config)?);

    match args.action.unwrap_or(HistoryAction::List) {
        HistoryAction::List => {
            println!("{}", formatter.format_history(history.all())?);
        }
        HistoryAction::Clear => {
            let count = history.len();
            history.clear();
            println!(
                "{}",
                formatter.success(&format!("Cleared {} history entr{}", count, plural(count)))
            );
        }
    }

    Ok(())
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        "y"
    } else {
        "ies"
    }
}
