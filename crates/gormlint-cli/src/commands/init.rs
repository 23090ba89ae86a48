//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# gormlint configuration

[validator]
# Struct tag namespace holding the GORM metadata
namespace = "gorm"

# Maximum diagnostics reported per file
max_diagnostics = 100

# Glob patterns to exclude when walking directories
exclude = [
    "**/vendor/**",
    "**/testdata/**",
]

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

[rules.caution-key]
enabled = true
# severity = "error"  # Override default severity

[rules.dual-timestamps]
enabled = true

# [rules.shared-index-name]
# enabled = false
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("gormlint.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created gormlint.toml");
    println!("\nNext steps:");
    println!("  1. Edit gormlint.toml to configure rules");
    println!("  2. Run: gormlint check");

    Ok(())
}
