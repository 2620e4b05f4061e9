use std::fs;

use anyhow::{Context, Result, ensure};
use kal_ipc::OsFamily;
use kal_ui::Bootstrap;
use serde::Deserialize;

use super::resolved::ResolvedConfig;
use crate::cli::{CliArgs, CliCommand};

/// Settings as read from files and the environment, before CLI overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
    os: Option<OsFamily>,
    log_level: Option<String>,
    host_program: Option<String>,
    host_args: Option<Vec<String>>,
    host: Bootstrap,
}

impl RawConfig {
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(os) = cli.os {
            self.os = Some(os.into());
        }
        if let Some(level) = cli.log_level.clone() {
            self.log_level = Some(level);
        }
        if let Some(CliCommand::Replay(replay)) = &cli.command
            && let Some(program) = replay.host.clone()
        {
            self.host_program = Some(program);
            self.host_args = Some(replay.host_args.clone());
        }
    }

    pub(super) fn resolve(self) -> Result<ResolvedConfig> {
        let mut bootstrap = self.host;
        let appearance = &bootstrap.config.appearance;
        ensure!(
            appearance.max_items > 0,
            "host.appearance.max_items must be at least 1"
        );
        ensure!(
            appearance.window_width > 0,
            "host.appearance.window_width must be positive"
        );

        if bootstrap.custom_css.is_none()
            && let Some(path) = appearance.custom_css_file.clone()
        {
            let css = fs::read_to_string(&path)
                .with_context(|| format!("failed to read custom CSS from {}", path.display()))?;
            bootstrap.custom_css = Some(css);
        }

        let host_program = self.host_program.filter(|program| !program.trim().is_empty());

        Ok(ResolvedConfig {
            os: self.os.unwrap_or_default(),
            log_level: self.log_level,
            host_program,
            host_args: self.host_args.unwrap_or_default(),
            bootstrap,
        })
    }
}
