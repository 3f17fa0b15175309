//! Stats command implementation
//!
//! Prints per-category entry counts for the persisted mapping store.

use crate::config::{load_config, secret_string};
use crate::core::engine::PseudonymizationEngine;
use crate::core::store::LoadOutcome;
use clap::Args;

/// Arguments for the stats command
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Password for key derivation
    #[arg(short, long, env = "VEIL_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Emit statistics as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl StatsArgs {
    /// Execute the stats command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let password = secret_string(self.password.clone());
        let engine = PseudonymizationEngine::new(&config, &password)?;

        if engine.load_outcome() == LoadOutcome::IntegrityFailure {
            println!("❌ Mapping store could not be decrypted (wrong password or corrupted file)");
            return Ok(5);
        }

        let stats = engine.store_statistics();
        if self.json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
            return Ok(0);
        }

        println!("📊 Mapping store: {}", config.store.path);
        println!();
        if stats.is_empty() {
            println!("  (no entries)");
        } else {
            let total: usize = stats.values().sum();
            for (category, count) in &stats {
                println!("  {category}: {count}");
            }
            println!();
            println!("  Total: {total} entries in {} categories", stats.len());
        }

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_args_creation() {
        let args = StatsArgs {
            password: "pw".to_string(),
            json: false,
        };
        let _ = format!("{args:?}");
    }
}
