use std::fs;
use std::time::Duration;

use myfridge::config::Config;
use temp_dir::TempDir;

#[test]
fn missing_config_file_falls_back_to_defaults() {
    let config = Config::load(Some("does/not/exist.toml".to_string())).unwrap();
    assert_eq!(config.store.path, "data/recipes.json");
    assert_eq!(config.observability.log_level, "info");
    assert!(config.validate().is_ok());
}

#[test]
fn config_file_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("myfridge.toml");
    fs::write(
        &path,
        r#"
[store]
path = "/srv/myfridge/recipes.json"

[observability]
log_level = "debug"

[popularity]
request_delay_ms = 250
max_retries = 5

[dedup.source_priorities]
TheMealDB = 100
"Test Kitchen" = 90
"#,
    )
    .unwrap();

    let config = Config::load(Some(path.to_string_lossy().into_owned())).unwrap();
    assert_eq!(config.store.path, "/srv/myfridge/recipes.json");
    assert_eq!(config.observability.log_level, "debug");
    assert_eq!(config.dedup.source_priorities.priority("Test Kitchen"), 90);

    let options = config.popularity.batch_options(None);
    assert_eq!(options.request_delay, Duration::from_millis(250));
    assert_eq!(options.max_retries, 5);
    assert!(config.validate().is_ok());
}

#[test]
fn partial_weights_must_still_sum_to_one() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("myfridge.toml");
    fs::write(
        &path,
        r#"
[popularity.weights]
trend = 0.7
engagement = 0.3
quality = 0.2
recency = 0.1
"#,
    )
    .unwrap();

    let config = Config::load(Some(path.to_string_lossy().into_owned())).unwrap();
    assert!(config.validate().is_err());
}
