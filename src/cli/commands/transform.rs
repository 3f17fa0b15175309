//! Transform command implementation
//!
//! Reads a flat JSON object of `field_identifier -> value` pairs from a file
//! or stdin, runs each pair through the engine and writes the transformed
//! object to a file or stdout. Field order is preserved via sorted keys on
//! output (the engine itself is order-insensitive).

use crate::config::{load_config, secret_string};
use crate::core::engine::PseudonymizationEngine;
use crate::domain::Direction;
use clap::Args;
use std::collections::BTreeMap;
use std::fs;
use std::io::Read;

/// Arguments for the transform command
#[derive(Args, Debug)]
pub struct TransformArgs {
    /// Password for key derivation
    #[arg(short, long, env = "VEIL_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Input JSON file (field identifier -> value); reads stdin when omitted
    #[arg(short, long)]
    pub input: Option<String>,

    /// Output file; writes stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Reverse previously pseudonymized values instead of pseudonymizing
    #[arg(long)]
    pub decrypt: bool,
}

impl TransformArgs {
    /// Execute the transform command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(decrypt = self.decrypt, "Starting transform command");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let password = secret_string(self.password.clone());
        let mut engine = PseudonymizationEngine::new(&config, &password)?;

        let raw = match &self.input {
            Some(path) => fs::read_to_string(path)?,
            None => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };
        let fields: BTreeMap<String, String> = serde_json::from_str(&raw)?;

        let direction = if self.decrypt {
            Direction::Decrypt
        } else {
            Direction::Encrypt
        };

        let mut missing = 0usize;
        let mut transformed = BTreeMap::new();
        for (field, value) in &fields {
            let result = engine.transform(field, value, direction);
            if result.mapping_missing {
                missing += 1;
            }
            transformed.insert(field.clone(), result.value);
        }

        // Decryption never creates mappings; only persist after encrypting.
        if !self.decrypt {
            engine.save()?;
        }

        let json = serde_json::to_string_pretty(&transformed)?;
        match &self.output {
            Some(path) => fs::write(path, json)?,
            None => println!("{json}"),
        }

        let stats = engine.statistics();
        eprintln!(
            "✅ Processed {} fields ({} transformed)",
            stats.total_fields, stats.transformed_fields
        );
        if missing > 0 {
            eprintln!("⚠️  {missing} value(s) had no mapping and were left unchanged");
        }

        Ok(0)
    }
}
