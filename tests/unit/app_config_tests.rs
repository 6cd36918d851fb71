/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use sub2srt::app_config::{Config, LogLevel};
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() -> Result<()> {
    let config = Config::default();

    assert_eq!(config.output_dir, None);
    assert_eq!(config.fallback_encoding, "gbk");
    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.fallback_encoding()?, encoding_rs::GBK);
    assert!(config.validate().is_ok());
    Ok(())
}

/// Unknown encodings are rejected
#[test]
fn test_config_validation_withUnknownEncoding_shouldFail() {
    let config = Config {
        fallback_encoding: "klingon-8".to_string(),
        ..Config::default()
    };
    assert!(config.validate().is_err());
}

/// Other WHATWG labels are accepted
#[test]
fn test_config_validation_withOtherEncoding_shouldResolve() -> Result<()> {
    let config = Config {
        fallback_encoding: "shift_jis".to_string(),
        ..Config::default()
    };
    assert_eq!(config.fallback_encoding()?, encoding_rs::SHIFT_JIS);
    Ok(())
}

/// Partial JSON files fall back to defaults
#[test]
fn test_config_from_file_withPartialJson_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{ "output_dir": "/tmp/srt", "log_level": "debug" }"#,
    )?;

    let config = Config::from_file(&path)?;

    assert_eq!(config.output_dir.as_deref(), Some(std::path::Path::new("/tmp/srt")));
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.fallback_encoding, "gbk");
    Ok(())
}

/// Broken JSON is an error
#[test]
fn test_config_from_file_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    assert!(Config::from_file(&path).is_err());
    Ok(())
}

/// Log levels parse case-insensitively and map onto log filters
#[test]
fn test_log_level_from_str_withVariousInputs_shouldParse() -> Result<()> {
    assert_eq!("WARN".parse::<LogLevel>()?, LogLevel::Warn);
    assert_eq!("warning".parse::<LogLevel>()?, LogLevel::Warn);
    assert_eq!(" trace ".parse::<LogLevel>()?, LogLevel::Trace);
    assert!("loud".parse::<LogLevel>().is_err());
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    Ok(())
}

/// Valid overrides replace the level
#[test]
fn test_apply_log_level_override_withValidLevel_shouldReplace() {
    let mut config = Config::default();
    config.apply_log_level_override("debug");
    assert_eq!(config.log_level, LogLevel::Debug);
}

/// Unknown overrides keep the configured level instead of failing
#[test]
fn test_apply_log_level_override_withUnknownLevel_shouldKeepCurrent() {
    let mut config = Config {
        log_level: LogLevel::Warn,
        ..Config::default()
    };
    config.apply_log_level_override("shouty");
    assert_eq!(config.log_level, LogLevel::Warn);
}
