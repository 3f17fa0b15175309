//! Export-mapping command implementation
//!
//! Writes the mapping table as plaintext JSON for authorized verification.
//! The export contains original sensitive values; the command says so.

use crate::config::{load_config, secret_string};
use crate::core::engine::PseudonymizationEngine;
use crate::core::store::LoadOutcome;
use clap::Args;
use std::path::Path;

/// Arguments for the export-mapping command
#[derive(Args, Debug)]
pub struct ExportMappingArgs {
    /// Password for key derivation
    #[arg(short, long, env = "VEIL_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Output path for the plaintext JSON export
    #[arg(short, long, default_value = "mapping_export.json")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl ExportMappingArgs {
    /// Execute the export-mapping command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Output file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let password = secret_string(self.password.clone());
        let engine = PseudonymizationEngine::new(&config, &password)?;

        if engine.load_outcome() == LoadOutcome::IntegrityFailure {
            println!("❌ Mapping store could not be decrypted (wrong password or corrupted file)");
            return Ok(5);
        }

        engine.export_mapping(Path::new(&self.output))?;

        println!("✅ Mapping table exported to: {}", self.output);
        println!("⚠️  The export contains original values in plaintext. Handle accordingly.");
        Ok(0)
    }
}
