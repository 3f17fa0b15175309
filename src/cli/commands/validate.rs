//! Validate-config command implementation
//!
//! Loads, validates and summarizes the configuration file, including the
//! per-rule pattern check the engine itself only warns about.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Mapping Store: {}", config.store.path);
        println!("  FPE Tweak Label: {}", config.fpe.tweak);
        println!("  Default Locale: {}", config.pseudonym.locale);
        println!(
            "  Default Date Variance: ±{} days",
            config.pseudonym.date_variance_days
        );
        println!("  Rules: {}", config.rules.len());

        let mut dead_rules = 0;
        for rule in &config.rules {
            let marker = if rule.pattern_is_well_formed() {
                "  "
            } else {
                dead_rules += 1;
                "⚠️ "
            };
            println!("    {marker}{} -> {}", rule.pattern, rule.kind);
        }
        if dead_rules > 0 {
            println!();
            println!("⚠️  {dead_rules} rule pattern(s) are malformed and will never match");
        }
        println!();
        Ok(0)
    }
}
