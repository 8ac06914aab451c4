use anyhow::Result;

use super::Config;
use super::ConfigKey;
use crate::application::cli;

#[test]
fn it_serializes_to_valid_toml() {
    let res = Config::serialize_default(cli::build());
    let toml_res = res.parse::<toml_edit::Document>();
    assert!(toml_res.is_ok());

    insta::assert_snapshot!(res, @r###"
    # Base URL of the chat API. Questions are sent to <api-base>/chat.
    api-base = "http://localhost:8081"
    "###);
}

#[test]
fn it_uses_kebab_case_keys() {
    assert_eq!(ConfigKey::ApiBase.to_string(), "api-base");
    assert_eq!(ConfigKey::ConfigFile.to_string(), "config-file");
}

#[test]
fn it_defaults_to_local_api() {
    assert_eq!(Config::default(ConfigKey::ApiBase), "http://localhost:8081");
    assert!(Config::default(ConfigKey::ConfigFile).ends_with("config.toml"));
}

// Config is process global, so every load assertion lives in one test.
#[tokio::test]
async fn it_loads_config_files() -> Result<()> {
    let matches =
        cli::build().try_get_matches_from(vec!["cloudchat", "-c", "./config.example.toml"])?;
    Config::load(vec![&matches]).await?;
    assert_eq!(
        Config::get(ConfigKey::ApiBase),
        "https://chat-api.example.com"
    );

    let matches = cli::build().try_get_matches_from(vec![
        "cloudchat",
        "chat",
        "-c",
        "./config.example.toml",
        "--api-base",
        "http://127.0.0.1:9000",
    ])?;
    let (_, chat_matches) = matches.subcommand().unwrap();
    Config::load(vec![&matches, chat_matches]).await?;
    assert_eq!(Config::get(ConfigKey::ApiBase), "http://127.0.0.1:9000");

    let matches =
        cli::build().try_get_matches_from(vec!["cloudchat", "-c", "./test/bad-config.toml"])?;
    let res = Config::load(vec![&matches]).await;
    assert!(res.is_err());

    let matches =
        cli::build().try_get_matches_from(vec!["cloudchat", "-c", "./test/missing.toml"])?;
    Config::load(vec![&matches]).await?;
    assert_eq!(Config::get(ConfigKey::ApiBase), "http://localhost:8081");

    return Ok(());
}
