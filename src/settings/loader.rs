use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use kal_ui::app_dirs;

use super::raw::RawConfig;
use super::resolved::ResolvedConfig;
use crate::cli::CliArgs;

/// Variables named `KAL_UI__HOST__GENERAL__MAX_RESULTS` and so on.
const ENV_PREFIX: &str = "KAL_UI";

/// Combine config files, environment variables and CLI arguments.
pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
    let sources = config_files(cli).into_iter().fold(
        Config::builder(),
        |builder, (path, required)| builder.add_source(File::from(path).required(required)),
    );
    let mut raw: RawConfig = sources
        .add_source(environment())
        .build()
        .context("failed to read configuration sources")?
        .try_deserialize()
        .context("failed to deserialize configuration")?;
    raw.apply_cli_overrides(cli);
    raw.resolve()
}

/// Files to merge, lowest precedence first, each paired with whether it
/// must exist. Only files named on the command line are required.
fn config_files(cli: &CliArgs) -> Vec<(PathBuf, bool)> {
    let mut files = Vec::new();
    if !cli.no_config {
        if let Ok(dir) = app_dirs::get_config_dir() {
            files.push((dir.join("ui.toml"), false));
        }
        if let Ok(cwd) = env::current_dir() {
            files.push((cwd.join(".kal-ui.toml"), false));
            files.push((cwd.join("kal-ui.toml"), false));
        }
    }
    files.extend(cli.config.iter().map(|path| (path.clone(), true)));
    files
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("host_args")
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;
    use kal_ipc::{AccentColor, OsFamily};
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn file_values_reach_the_bootstrap() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ui.toml");
        fs::write(
            &path,
            r#"
os = "windows"
log_level = "debug"

[host]
custom_css = "main { border: 0 }"
accent_color = "teal"

[host.general]
tab_through_action_buttons = false

[host.appearance]
item_height = 40
"#,
        )
        .unwrap();

        let cli = CliArgs::parse_from([
            "kal-ui",
            "--no-config",
            "--config",
            path.to_str().unwrap(),
        ]);
        let resolved = load(&cli).unwrap();

        assert_eq!(resolved.os, OsFamily::Windows);
        assert_eq!(resolved.log_level.as_deref(), Some("debug"));
        let bootstrap = &resolved.bootstrap;
        assert!(!bootstrap.config.general.tab_through_action_buttons);
        assert_eq!(bootstrap.config.appearance.item_height, 40);
        assert_eq!(bootstrap.config.appearance.window_width, 650);
        assert_eq!(bootstrap.custom_css.as_deref(), Some("main { border: 0 }"));
        assert_eq!(bootstrap.accent_color, Some(AccentColor::Single("teal".into())));
    }

    #[test]
    fn flags_override_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ui.toml");
        fs::write(&path, "os = \"windows\"\nlog_level = \"debug\"\n").unwrap();

        let cli = CliArgs::parse_from([
            "kal-ui",
            "--no-config",
            "--config",
            path.to_str().unwrap(),
            "--os",
            "unix",
            "--log-level",
            "trace",
        ]);
        let resolved = load(&cli).unwrap();

        assert_eq!(resolved.os, OsFamily::Unix);
        assert_eq!(resolved.log_level.as_deref(), Some("trace"));
    }

    #[test]
    fn explicit_files_come_last_and_are_required() {
        let cli = CliArgs::parse_from(["kal-ui", "--config", "extra.toml"]);
        let files = config_files(&cli);

        let (last, required) = files.last().unwrap();
        assert_eq!(last, &PathBuf::from("extra.toml"));
        assert!(*required);
        assert!(files.iter().any(|(path, _)| path.ends_with(".kal-ui.toml")));
        assert!(
            files[..files.len() - 1]
                .iter()
                .all(|(_, required)| !required)
        );
    }

    #[test]
    fn no_config_skips_default_files() {
        let cli = CliArgs::parse_from(["kal-ui", "--no-config"]);
        assert!(config_files(&cli).is_empty());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempdir().unwrap();
        let cli = CliArgs::parse_from([
            "kal-ui",
            "--no-config",
            "--config",
            dir.path().join("absent.toml").to_str().unwrap(),
        ]);
        assert!(load(&cli).is_err());
    }
}
