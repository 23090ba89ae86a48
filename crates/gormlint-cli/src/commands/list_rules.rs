//! List rules command implementation.

use gormlint_rules::{rule_catalog, Preset};

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<8} {:<32} {:<9} Description", "Code", "Name", "Severity");
    println!("{}", "-".repeat(96));

    for rule in rule_catalog() {
        println!(
            "{:<8} {:<32} {:<9} {}",
            rule.code,
            rule.name,
            rule.severity.to_string(),
            rule.description
        );
    }

    println!("\nPresets:");
    println!(
        "  recommended  - all {} rules (default)",
        Preset::Recommended.registry().len()
    );
    println!(
        "  strict       - {} error-severity rules",
        Preset::Strict.registry().len()
    );
    println!("  minimal      - GL001, GL002, GL010, GL030 (for gradual adoption)");

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  gormlint check --rules duplicate-key,unknown-key");
    println!("  gormlint check --rules GL001,GL010,GL030");
}
