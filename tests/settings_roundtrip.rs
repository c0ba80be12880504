use tempfile::tempdir;
use whiteboard::board::PenColor;
use whiteboard::settings::Settings;

#[test]
fn settings_survive_save_and_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let path = path.to_str().unwrap();

    let mut settings = Settings::default();
    settings.pen_color = PenColor::Green;
    settings.pen_width = 6.0;
    settings.user_prompt = "make it tidy".into();
    settings.save(path).unwrap();

    let loaded = Settings::load(path).unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let loaded = Settings::load(path.to_str().unwrap()).unwrap();
    assert_eq!(loaded, Settings::default());
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(Settings::load(path.to_str().unwrap()).is_err());
}

#[test]
#[serial_test::serial]
fn api_config_reads_process_environment() {
    use whiteboard::settings::{ApiConfig, AuthScheme};

    std::env::set_var("API_KEY", "k-123");
    std::env::set_var("END_POINT", "http://127.0.0.1:9/v1/messages");
    std::env::set_var("MODEL", "sketch-model");
    std::env::set_var("AUTH_SCHEME", "bearer");
    let api = ApiConfig::from_env();
    for key in ["API_KEY", "END_POINT", "MODEL", "AUTH_SCHEME"] {
        std::env::remove_var(key);
    }

    assert_eq!(api.api_key.as_deref(), Some("k-123"));
    assert_eq!(api.model.as_deref(), Some("sketch-model"));
    assert_eq!(api.auth, AuthScheme::Bearer);
}
