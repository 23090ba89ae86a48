//! End-to-end validation through the facade with the built-in rules.

use gormlint::{locate, Config, Diagnostic, Linter, Range, Severity};

const MODEL: &str = r#"package models

import "time"

// User is a GORM model.
type User struct {
	ID        uint      `gorm:"primaryKey"`
	Email     string    `gorm:"size:255;uniqueIndex:idx_email"`
	Name      string    `gorm:"column:name;size:64"`
	Nickname  string    `gorm:"column:name"`
	CreatedAt time.Time `gorm:"autoCreateTime;autoUpdateTime"`
	Secret    string    `gorm:"-;column:secret"`
	Legacy    int       `gorm:"primary_key"`
	Profile   Profile   `gorm:"foreignKey:UserID"`
}

type Profile struct {
	UserID uint
	Bio    string
}
"#;

fn slice(text: &str, range: Range) -> String {
    let line = text.lines().nth(range.start.line).unwrap_or("");
    line.chars()
        .skip(range.start.character)
        .take(range.end.character.saturating_sub(range.start.character))
        .collect()
}

fn codes(diagnostics: &[Diagnostic]) -> Vec<(&str, &str)> {
    diagnostics
        .iter()
        .map(|d| (d.field_name.as_str(), d.code.as_str()))
        .collect()
}

fn linter_with(toml: &str) -> Linter {
    Linter::with_config(Config::parse(toml).unwrap())
}

#[test]
fn model_findings_in_deterministic_order() {
    let report = Linter::new().validate(MODEL);
    assert_eq!(
        codes(&report.diagnostics),
        vec![
            ("CreatedAt", "GL026"),
            ("Secret", "GL021"),
            ("Legacy", "GL003"),
            ("Profile", "GL004"),
            ("Profile", "GL023"),
            ("Nickname", "GL030"),
        ]
    );
    assert_eq!(report.structs_checked, 1);
    assert_eq!(report.count_by_severity(), (2, 4));
}

#[test]
fn validation_is_idempotent() {
    let linter = Linter::new();
    let first = serde_json::to_string(&linter.validate(MODEL).diagnostics).unwrap();
    let second = serde_json::to_string(&linter.validate(MODEL).diagnostics).unwrap();
    assert_eq!(first, second);
}

#[test]
fn primary_key_with_unique_reports_both_directions() {
    let linter = linter_with("[validator]\nnamespace = \"tag\"\n");
    let report = linter.validate("type User struct { ID uint `tag:\"primaryKey;unique\"` }");
    assert_eq!(report.diagnostics.len(), 2);
    assert!(report
        .diagnostics
        .iter()
        .all(|d| d.field_name == "ID" && d.severity == Severity::Error));
}

#[test]
fn invalid_size_is_one_error() {
    let linter = linter_with("[validator]\nnamespace = \"tag\"\n");
    let report = linter.validate("type User struct { A string `tag:\"size:abc\"` }");
    assert_eq!(report.diagnostics.len(), 1);
    assert!(report.diagnostics[0]
        .message
        .starts_with("invalid size value 'abc'"));
}

#[test]
fn interpreted_string_tag_is_valid() {
    let report = Linter::new().validate("type T struct { A string \"gorm:\\\"size:10\\\"\" }");
    assert!(report.diagnostics.is_empty());
    assert_eq!(report.structs_checked, 1);
}

#[test]
fn namespace_inside_another_pair_is_not_decoded() {
    let source = "type T struct {\n\tA string `json:\"a gorm:x\" gorm:\"size:abc\"`\n}\n";
    let report = Linter::new().validate(source);
    assert_eq!(codes(&report.diagnostics), vec![("A", "GL010")]);
    assert!(report.diagnostics[0]
        .message
        .starts_with("invalid size value 'abc'"));
}

#[test]
fn untagged_struct_yields_nothing() {
    let report = Linter::new().validate(
        "package p\n\ntype Point struct {\n\tX, Y int\n\tLabel string // no tag\n}\n",
    );
    assert!(report.diagnostics.is_empty());
    assert_eq!(report.structs_checked, 0);
}

#[test]
fn duplicate_key_is_reported_for_field() {
    let report = Linter::new().validate("type T struct {\n\tA string `gorm:\"size:10;Size:20\"`\n}\n");
    let dup: Vec<_> = report
        .diagnostics
        .iter()
        .filter(|d| d.code == "GL001")
        .collect();
    assert_eq!(dup.len(), 1);
    assert_eq!(dup[0].field_name, "A");
    assert_eq!(dup[0].key.as_deref(), Some("Size"));
}

#[test]
fn shared_column_reported_once_on_later_field() {
    let source = "type T struct {\n\tA string `gorm:\"column:x\"`\n\tB string\n\tC string `gorm:\"column:x\"`\n}\n";
    let report = Linter::new().validate(source);
    let found: Vec<_> = report
        .diagnostics
        .iter()
        .filter(|d| d.code == "GL030")
        .collect();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].field_name, "C");
    assert!(found[0].message.contains("field A"));
}

#[test]
fn every_primary_key_field_reported() {
    let source = r#"
type Membership struct {
	UserID  uint `gorm:"primaryKey"`
	GroupID uint `gorm:"primaryKey"`
	OrgID   uint `gorm:"primaryKey;index"`
	Role    string
}
"#;
    let report = Linter::new().validate(source);
    let fields: Vec<&str> = report
        .diagnostics
        .iter()
        .filter(|d| d.code == "GL031")
        .map(|d| d.field_name.as_str())
        .collect();
    assert_eq!(fields, vec!["UserID", "GroupID", "OrgID"]);
}

#[test]
fn comment_quote_balance() {
    let linter = Linter::new();

    let report = linter.validate("type T struct {\n\tA string `gorm:\"comment:it's\"`\n}\n");
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].code, "GL013");
    assert!(report.diagnostics[0].message.contains("1 single quote"));

    let report = linter.validate("type T struct {\n\tA string `gorm:\"comment:it\\'s\"`\n}\n");
    assert!(report.diagnostics.is_empty());

    let report = linter.validate("type T struct {\n\tA string `gorm:comment:'a'\"b\"`\n}\n");
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].code, "GL014");
    assert_eq!(report.diagnostics[0].severity, Severity::Warning);
}

#[test]
fn cap_and_rule_config_apply() {
    let linter = linter_with("[validator]\nmax_diagnostics = 2\n");
    assert_eq!(linter.validate(MODEL).diagnostics.len(), 2);

    let linter = linter_with(
        "[rules.dual-timestamps]\nenabled = false\n\n[rules.caution-key]\nseverity = \"error\"\n",
    );
    let report = linter.validate(MODEL);
    assert!(!report.diagnostics.iter().any(|d| d.code == "GL026"));
    let caution = report.diagnostics.iter().find(|d| d.code == "GL004").unwrap();
    assert_eq!(caution.severity, Severity::Error);
}

#[test]
fn ranges_point_at_keys_and_names() {
    let located = Linter::new().publish(MODEL);
    assert_eq!(located.len(), 6);

    let ignore = located
        .iter()
        .find(|l| l.diagnostic.code == "GL021")
        .unwrap();
    assert_eq!(slice(MODEL, ignore.range), "-");

    let column = located
        .iter()
        .find(|l| l.diagnostic.code == "GL030")
        .unwrap();
    assert_eq!(slice(MODEL, column.range), "column");
    assert!(MODEL.lines().nth(column.range.start.line).unwrap().contains("Nickname"));

    let range = locate(MODEL, "User", "Missing", Some("size"), "gorm");
    assert_eq!(slice(MODEL, range), "User");
}
