//! Scripted sessions.
//!
//! A script is a JSON-lines file; each line is one step:
//!
//! ```text
//! {"input": "fire"}
//! {"event": "Results", "payload": [...]}
//! {"key": "Shift+Enter"}
//! {"wait_ms": 50}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Inbound events are
//! applied after every step, so a step sees the state its predecessors
//! left behind.

use std::fs;
use std::io;
use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use kal_ui::bridge::{JournalBridge, StdioBridge};
use kal_ui::{HostBridge, KeyInput, RawEvent, Session};
use serde::Deserialize;
use serde_json::Value;

use crate::cli::ReplayArgs;
use crate::settings::ResolvedConfig;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum ScriptStep {
    /// Replace the input text.
    Input { input: String },
    /// Press a key, e.g. `Ctrl+O`.
    Key { key: String },
    /// Deliver a host event as if the host had pushed it.
    Event {
        event: String,
        #[serde(default)]
        payload: Value,
    },
    /// Give a live host time to answer.
    Wait { wait_ms: u64 },
}

pub(crate) fn parse_script(text: &str) -> Result<Vec<ScriptStep>> {
    let mut steps = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let step = serde_json::from_str(line)
            .with_context(|| format!("line {}: not a script step: {line}", index + 1))?;
        steps.push(step);
    }
    Ok(steps)
}

fn read_script(path: &Path) -> Result<Vec<ScriptStep>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    parse_script(&text).with_context(|| format!("invalid script {}", path.display()))
}

/// Run the script against the configured host, or journal commands to
/// stdout when there is none.
pub(crate) fn run(args: &ReplayArgs, settings: ResolvedConfig) -> Result<()> {
    let steps = read_script(&args.script)?;
    let ResolvedConfig {
        os,
        host_program,
        host_args,
        bootstrap,
        ..
    } = settings;

    let page = match host_program {
        Some(program) => {
            let bridge = StdioBridge::spawn(&program, &host_args)
                .with_context(|| format!("failed to start host {program}"))?;
            let mut session = Session::new(bridge, bootstrap, os);
            drive(&mut session, steps)?;
            session.render()
        }
        None => {
            let mut session = Session::new(JournalBridge::new(io::stdout()), bootstrap, os);
            drive(&mut session, steps)?;
            session.render()
        }
    };

    if args.render_final {
        println!("{page}");
    }
    Ok(())
}

pub(crate) fn drive<B: HostBridge>(session: &mut Session<B>, steps: Vec<ScriptStep>) -> Result<()> {
    let total = steps.len();
    for (index, step) in steps.into_iter().enumerate() {
        tracing::debug!(step = index + 1, total, ?step, "replaying step");
        apply_step(session, step).with_context(|| format!("step {} failed", index + 1))?;
        session.pump();
        for effect in session.take_effects() {
            tracing::info!(?effect, "view effect");
        }
    }
    Ok(())
}

fn apply_step<B: HostBridge>(session: &mut Session<B>, step: ScriptStep) -> Result<()> {
    match step {
        ScriptStep::Input { input } => session.input(input)?,
        ScriptStep::Key { key } => {
            let input: KeyInput = key.parse()?;
            if !session.key(input)? {
                tracing::debug!(%input, "key not handled by the launcher");
            }
        }
        ScriptStep::Event { event, payload } => session.enqueue(RawEvent::new(event, payload)),
        ScriptStep::Wait { wait_ms } => thread::sleep(Duration::from_millis(wait_ms)),
    }
    Ok(())
}
