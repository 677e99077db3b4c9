use std::fs;

use recon_cli::config::ReconConfig;
use recon_match::TokenRule;

const FULL_CONFIG: &str = r#"
timestamps = ["%d-%m-%y %H:%M:%S", "%Y-%m-%d"]

[left]
id = "Meter"
code = "Code"

[right]
id = "Node"
code = "NodeCode"
category = "Kind"

[matcher]
sentinel_category = "Place 1"
excluded_leading_tokens = ["place_exceptions"]
proximity = 5

[[matcher.aliases]]
from = "Name1"
to = "correction1"

[[matcher.aliases]]
from = "Name2"
to = "correction2"

[matcher.token_rule]
prefix = "name3"
from = "CHMB"
to = "CHIM"

[fuzzy]
threshold = 90.0

[sheet]
route_prefix = '\\server_name\'

[homologation]
left_key = "Meter"
left_field = "Feeder"
right_key = "Node"
target_column = "Feeder"
"#;

#[test]
fn loads_every_section() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recon.toml");
    fs::write(&path, FULL_CONFIG).unwrap();

    let config = ReconConfig::load(Some(&path)).unwrap();

    assert_eq!(config.timestamps.formats().len(), 2);
    assert_eq!(config.left.id, "Meter");
    assert_eq!(config.right.category.as_deref(), Some("Kind"));
    assert_eq!(config.matcher.sentinel_category.as_deref(), Some("Place 1"));
    assert!(config.matcher.is_excluded("place_exceptions"));
    assert_eq!(config.matcher.proximity, 5);
    assert_eq!(config.matcher.short_code_len, 2);
    assert_eq!(
        config.matcher.token_rule,
        Some(TokenRule::new("name3", "CHMB", "CHIM"))
    );
    assert_eq!(config.matcher.aliases.rules().len(), 2);
    assert_eq!(config.matcher.aliases.apply("x Name2 y"), "x correction2 y");
    assert_eq!(config.fuzzy.threshold, 90.0);
    assert_eq!(config.fuzzy.skip_chars, 2);
    assert_eq!(config.sheet.route_prefix.as_deref(), Some("\\\\server_name\\"));
    assert_eq!(
        config.homologation.map(|h| h.left_field),
        Some("Feeder".to_string())
    );
}

#[test]
fn missing_explicit_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let err = ReconConfig::load(Some(&path)).unwrap_err();

    assert!(format!("{err:#}").contains("absent.toml"));
}

#[test]
fn invalid_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[matcher]\nproximity = \"three\"\n").unwrap();

    let err = ReconConfig::load(Some(&path)).unwrap_err();

    let message = format!("{err:#}");
    assert!(message.contains("parse config"));
    assert!(message.contains("broken.toml"));
}

#[test]
fn duplicate_alias_keys_are_kept_in_order() {
    let config = ReconConfig::from_toml_str(
        r#"
        [[matcher.aliases]]
        from = "AB"
        to = "first"

        [[matcher.aliases]]
        from = "AB"
        to = "second"
        "#,
    )
    .unwrap();
    assert_eq!(config.matcher.aliases.apply("AB"), "first");
}
