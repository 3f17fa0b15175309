//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "veil.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Veil configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::sample_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your field rules", self.output);
                println!("  2. Set VEIL_PASSWORD in your environment (or a .env file)");
                println!("  3. Validate configuration: veil validate-config");
                println!("  4. Transform a document: veil transform --input fields.json");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    /// Generate the sample configuration
    fn sample_config() -> String {
        r#"# Veil Configuration File
# Deterministic, reversible field pseudonymization

[application]
log_level = "info"

[store]
# Encrypted bidirectional mapping table. Keep it next to your documents;
# decryption of generated pseudonyms requires it.
path = "mapping_table.enc"

[fpe]
# Tweak label for the format-preserving cipher. Not secret, but changing it
# changes every format-preserved output.
tweak = "veil"

[pseudonym]
# Default locale for generated names, addresses, phones...
locale = "fr_FR"
# Default jitter window for dates, in days either side
date_variance_days = 30

# Rules are evaluated in order; the first matching pattern wins.
# Patterns are trailing field codes: exact ("30.001") or an inclusive
# range sharing the first segment ("30.001-30.010").

[[rules]]
# NIR / registration number: reversible format-preserving cipher
pattern = "30.001"
kind = "format_preserving_numeric"

[[rules]]
# Person name fields
pattern = "30.002-30.004"
kind = "person_name"

[[rules]]
# Birth date, jittered within ±30 days
pattern = "30.006"
kind = "date_with_variance"
date_variance_days = 30

[[rules]]
# Street address
pattern = "30.008"
kind = "street"

[[rules]]
pattern = "30.009"
kind = "postal_code"

[[rules]]
pattern = "30.010"
kind = "city"
"#
        .to_string()
    }
}
