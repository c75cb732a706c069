use super::*;

#[test]
fn test_default_config_fails_validation() {
    // No base URL configured yet.
    let config = Config::default();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::MissingField(_))
    ));
}

#[test]
fn test_valid_config_passes_validation() {
    let config = Config {
        canvas: CanvasConfig {
            base_url: "https://canvas.university.edu".to_string(),
            ..CanvasConfig::default()
        },
        ..Config::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_relative_base_url_rejected() {
    let config = Config {
        canvas: CanvasConfig {
            base_url: "canvas.university.edu".to_string(),
            ..CanvasConfig::default()
        },
        ..Config::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { .. })
    ));
}

#[test]
fn test_zero_refresh_interval_rejected() {
    let config = Config {
        canvas: CanvasConfig {
            base_url: "https://canvas.university.edu".to_string(),
            ..CanvasConfig::default()
        },
        sync: SyncConfig {
            refresh_interval_minutes: 0,
            ..SyncConfig::default()
        },
        ..Config::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_notification_defaults() {
    let config = NotificationsConfig::default();
    assert!(!config.enabled);
    assert_eq!(config.frequency, NotificationFrequency::Balanced);
    assert_eq!(config.quiet_hours_start, "22:00");
    assert_eq!(config.quiet_hours_end, "08:00");
}

#[test]
fn test_frequency_serialization() {
    assert_eq!(
        serde_json::to_string(&NotificationFrequency::Minimal).unwrap(),
        "\"minimal\""
    );
}
