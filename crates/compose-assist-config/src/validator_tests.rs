use super::*;

#[test]
fn test_validate_default_config() {
    let config = Config::default();
    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_validate_base_url_scheme() {
    let mut config = Config::default();
    config.generator.base_url = "localhost:8080/api/email".to_string();

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "generator.base_url"));
}

#[test]
fn test_validate_empty_base_url() {
    let mut config = Config::default();
    config.generator.base_url = "  ".to_string();

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.errors.iter().any(|e| e.message.contains("empty")));
}

#[test]
fn test_validate_zero_timeout() {
    let mut config = Config::default();
    config.generator.timeout_secs = 0;

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.errors.iter().any(|e| e.path == "generator.timeout_secs"));
}

#[test]
fn test_validate_connect_timeout_above_timeout_warns() {
    let mut config = Config::default();
    config.generator.timeout_secs = 5;
    config.generator.connect_timeout_secs = 10;

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.is_valid());
    assert!(result
        .warnings
        .iter()
        .any(|w| w.path == "generator.connect_timeout_secs"));
}

#[test]
fn test_validate_watcher_timings_warn() {
    let mut config = Config::default();
    config.watcher.debounce_ms = 0;
    config.watcher.cooldown_ms = 0;

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.is_valid());
    assert_eq!(result.warnings.len(), 2);
}

#[test]
fn test_validate_empty_probe_lists() {
    let mut config = Config::default();
    config.locator.toolbar.clear();
    config.locator.email_content.clear();

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.errors.iter().any(|e| e.path == "locator.toolbar"));
    assert!(result
        .warnings
        .iter()
        .any(|w| w.path == "locator.email_content"));
}

#[test]
fn test_validate_blank_probe() {
    let mut config = Config::default();
    config.locator.compose_signature.push(String::new());

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result
        .errors
        .iter()
        .any(|e| e.path == "locator.compose_signature"));
}

#[test]
fn test_validate_log_level() {
    let mut config = Config::default();
    config.logging.level = "verbose".to_string();
    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.is_valid());
    assert_eq!(result.warnings.len(), 1);

    config.logging.level = "compose_assist_core=debug".to_string();
    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.warnings.is_empty());
}

#[test]
fn test_into_result_reports_first_error() {
    let mut config = Config::default();
    config.generator.timeout_secs = 0;

    let err = ConfigValidator::validate(&config)
        .unwrap()
        .into_result()
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidValue { ref field, .. } if field == "generator.timeout_secs"
    ));
}
