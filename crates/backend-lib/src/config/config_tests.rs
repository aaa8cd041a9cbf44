use super::*;
use figment::Jail;

#[test]
fn test_settings_validation() {
    let settings = Settings::default();
    assert!(settings.validate().is_ok());

    let mut invalid_settings = settings.clone();
    invalid_settings.log_level = "invalid".to_string();
    assert!(invalid_settings.validate().is_err());

    let mut invalid_settings = settings.clone();
    invalid_settings.min_password_length = 0;
    assert!(invalid_settings.validate().is_err());

    let mut upper = settings;
    upper.log_level = "DEBUG".to_string();
    assert!(upper.validate().is_ok());
}

#[test]
fn test_defaults_match_reference_behavior() {
    let settings = Settings::default();
    assert_eq!(settings.min_password_length, 6);
    assert_eq!(settings.signup_delay(), Duration::from_millis(1000));
    assert_eq!(settings.login_delay(), Duration::from_millis(600));
    assert_eq!(settings.bind_addr.to_string(), "127.0.0.1:3000");
}

#[test]
fn test_load_settings_layering() {
    Jail::expect_with(|jail| {
        jail.create_file(
            DEFAULT_CONFIG_FILE,
            r#"
            bind_addr = "0.0.0.0:8080"
            data_dir = "test_data"
            log_level = "debug"
            "#,
        )?;
        jail.create_file("override.toml", "login_delay_ms = 5")?;

        // Environment variable takes precedence over both files
        jail.set_env("RIDESAFE_LOG_LEVEL", "warn");

        let settings = Settings::load(Some(Path::new("override.toml")))
            .map_err(|e| figment::Error::from(e.to_string()))?;
        assert_eq!(settings.bind_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(settings.data_dir, PathBuf::from("test_data"));
        assert_eq!(settings.log_level, "warn");
        assert_eq!(settings.login_delay_ms, 5);
        assert_eq!(settings.signup_delay_ms, 1000);
        Ok(())
    });
}

#[test]
fn test_load_rejects_invalid_values() {
    Jail::expect_with(|jail| {
        jail.set_env("RIDESAFE_MIN_PASSWORD_LENGTH", "0");
        assert!(Settings::load(None).is_err());
        Ok(())
    });
}

#[test]
fn test_load_rejects_missing_explicit_file() {
    Jail::expect_with(|_jail| {
        let err = Settings::load(Some(Path::new("nowhere.toml"))).unwrap_err();
        assert!(err.to_string().contains("nowhere.toml"));

        // the implicit default file may be absent
        assert!(Settings::load(None).is_ok());
        Ok(())
    });
}
