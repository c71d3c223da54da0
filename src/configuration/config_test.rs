use anyhow::Result;

use super::Config;
use super::ConfigKey;
use crate::application::cli;

#[test]
fn it_uses_defaults() {
    let config = Config::default();
    assert_eq!(config.get(ConfigKey::ApiBase), "http://localhost:8000/api");
    assert!(config.get(ConfigKey::ConfigFile).ends_with("config.toml"));
}

#[test]
fn it_sets_values() {
    let config = Config::default();
    config.set(ConfigKey::ApiBase, "https://example.com/api");
    assert_eq!(config.get(ConfigKey::ApiBase), "https://example.com/api");
}

#[test]
fn it_serializes_to_valid_toml() {
    let res = Config::serialize_default(cli::build());
    let toml_res = res.parse::<toml_edit::Document>();
    assert!(toml_res.is_ok());

    insta::assert_snapshot!(res, @r###"
    # Base address of the diagnosis service API.
    api-base = "http://localhost:8000/api"
    "###);
}

#[tokio::test]
async fn it_loads_config_from_file() -> Result<()> {
    let matches =
        cli::build().try_get_matches_from(vec!["symptocheck", "-c", "./config.example.toml", "history", "list"])?;
    let config = Config::load(vec![&matches]).await?;

    assert_eq!(config.get(ConfigKey::ApiBase), "http://localhost:8000/api");
    assert_eq!(config.get(ConfigKey::ConfigFile), "./config.example.toml");
    return Ok(());
}

#[tokio::test]
async fn it_prefers_flags_over_the_config_file() -> Result<()> {
    let matches = cli::build().try_get_matches_from(vec![
        "symptocheck",
        "-c",
        "./config.example.toml",
        "--api-base",
        "https://symptocheck.example/api",
        "history",
        "list",
    ])?;
    let config = Config::load(vec![&matches]).await?;

    assert_eq!(config.get(ConfigKey::ApiBase), "https://symptocheck.example/api");
    return Ok(());
}

#[tokio::test]
async fn it_ignores_missing_config_files() -> Result<()> {
    let matches = cli::build().try_get_matches_from(vec![
        "symptocheck",
        "-c",
        "./test/does-not-exist.toml",
        "history",
        "list",
    ])?;
    let config = Config::load(vec![&matches]).await?;

    assert_eq!(config.get(ConfigKey::ApiBase), "http://localhost:8000/api");
    return Ok(());
}

#[tokio::test]
async fn it_fails_to_loads_config_from_file() -> Result<()> {
    let matches =
        cli::build().try_get_matches_from(vec!["symptocheck", "-c", "./test/bad-config.toml", "history", "list"])?;
    let res = Config::load(vec![&matches]).await;
    assert!(res.is_err());
    return Ok(());
}

#[tokio::test]
async fn it_fails_on_invalid_api_base() -> Result<()> {
    let matches = cli::build().try_get_matches_from(vec![
        "symptocheck",
        "-c",
        "./test/bad-url-config.toml",
        "history",
        "list",
    ])?;
    let res = Config::load(vec![&matches]).await;
    assert!(res.is_err());
    return Ok(());
}
