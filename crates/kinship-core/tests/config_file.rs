use kinship_core::{ConfigError, ConfigInput};

#[test]
fn partial_toml_keeps_defaults() {
    let input: ConfigInput = toml::from_str(
        r#"
initial_families = 2
seed = 42
"#,
    )
    .expect("parse config");

    let config = input.validate().expect("valid config");
    assert_eq!(config.initial_families(), 2);
    assert_eq!(config.seed(), 42);
    assert_eq!(config.max_children(), 7);
    assert_eq!(config.pristine_generations(), 4);
}

#[test]
fn unknown_keys_are_rejected() {
    let result: Result<ConfigInput, _> = toml::from_str("initial_fams = 3\n");
    assert!(result.is_err());
}

#[test]
fn negative_values_parse_but_fail_validation() {
    let input: ConfigInput = toml::from_str("mixed_families = -1\n").expect("parse config");
    assert_eq!(
        input.validate(),
        Err(ConfigError::BelowMinimum {
            field: "mixed_families",
            min: 0,
            value: -1
        })
    );
}

#[test]
fn validated_config_serializes_to_json() {
    let config = ConfigInput::default().validate().expect("valid config");
    let json = serde_json::to_value(config).expect("serialize config");
    assert_eq!(json["pristine_generations"], 4);
    assert_eq!(json["max_pair_attempts"], 1000);
}

#[test]
fn example_config_matches_defaults() {
    let path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../config/kinship.example.toml");
    let contents = std::fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("missing config at {}", path.display()));
    let input: ConfigInput = toml::from_str(&contents).expect("parse example config");
    assert_eq!(input, ConfigInput::default());
}
