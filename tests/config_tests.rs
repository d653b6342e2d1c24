use quillcheck::config::{Config, RenderFormat};
use tempfile::TempDir;

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.format, RenderFormat::Yaml);
    assert_eq!(config.indent_size, 4);
    assert_eq!(config.max_items, 50);
    assert!(config.show_counts);
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = Config {
        format: RenderFormat::Json,
        indent_size: 2,
        max_items: 0,
        show_counts: false,
    };
    config.save_to(&path).unwrap();

    assert!(path.exists());
    assert_eq!(Config::load_from(&path).unwrap(), config);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "indent_size = 8\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.indent_size, 8);
    assert_eq!(config.format, RenderFormat::Yaml);
    assert_eq!(config.max_items, 50);
}

#[test]
fn test_invalid_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "format = \"xml\"\n").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn test_render_format_from_str() {
    assert_eq!("yaml".parse::<RenderFormat>(), Ok(RenderFormat::Yaml));
    assert_eq!("YML".parse::<RenderFormat>(), Ok(RenderFormat::Yaml));
    assert_eq!("json".parse::<RenderFormat>(), Ok(RenderFormat::Json));
    assert!("xml".parse::<RenderFormat>().is_err());
}
