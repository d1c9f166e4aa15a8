//! config command - Get, set, or list configuration values

use anyhow::{Context, Result};

use crate::cli::args::ConfigAction;
use crate::core::config::{Config, KEYS};
use crate::ui::output::{self, Verbosity};

pub fn config(action: ConfigAction, verbosity: Verbosity) -> Result<()> {
    let mut config = Config::load().context("Failed to load config")?;
    match action {
        ConfigAction::Get { key } => {
            // A key with no value prints nothing.
            if let Some(value) = config.get(&key)? {
                output::emit(value);
            }
        }
        ConfigAction::Set { key, value } => {
            let path = config.set(&key, &value).context("Failed to write config")?;
            tracing::debug!(path = %path.display(), key = %key, "config updated");
            output::success(format!("Set {} = {}", key, value), verbosity);
        }
        ConfigAction::List => {
            let lines = KEYS
                .iter()
                .map(|key| {
                    config
                        .get(key)
                        .map(|value| format!("{} = {}", key, value.unwrap_or_default()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            output::emit(lines.join("\n"));
        }
    }
    Ok(())
}
