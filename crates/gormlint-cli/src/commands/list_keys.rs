//! List keys command implementation.

use gormlint_core::catalog::{self, KeyClass};

/// Runs the list-keys command.
pub fn run() {
    println!("Known tag keys:\n");
    println!("{:<26} {:<12} Note", "Key", "Class");
    println!("{}", "-".repeat(80));

    for spec in catalog::entries() {
        println!("{:<26} {:<12} {}", spec.name, class_label(spec.class), note(spec));
    }

    println!("\nKeys are matched case-insensitively. Unlisted keys are reported by unknown-key (GL002).");
}

fn class_label(class: KeyClass) -> &'static str {
    match class {
        KeyClass::Recommended => "recommended",
        KeyClass::CautionAdvised => "caution",
        KeyClass::Deprecated { .. } => "deprecated",
        KeyClass::Unknown => "unknown",
    }
}

fn note(spec: &catalog::KeySpec) -> String {
    match spec.class {
        KeyClass::Deprecated { replacement } => format!("use {replacement}"),
        _ => spec.note.to_string(),
    }
}
