//! Command scripts: one JSON command per line.
//!
//! Blank lines and lines starting with `#` are skipped.

use anyhow::{Context, Result};
use semantic_screen_engine::editing::{Cmd, Effect, Engine};
use semantic_screen_engine::io::Persistence;

pub fn parse_script(script: &str) -> Result<Vec<Cmd>> {
    script
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(number, line)| {
            serde_json::from_str::<Cmd>(line)
                .with_context(|| format!("Invalid command on line {}", number + 1))
        })
        .collect()
}

/// What a replay did
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub applied: usize,
    pub ignored: usize,
    pub saved: usize,
}

/// Dispatch each command in order and run the save effects it produces
pub fn run(engine: &mut Engine, store: &impl Persistence, commands: &[Cmd]) -> Result<RunSummary> {
    let mut summary = RunSummary::default();
    for cmd in commands {
        let patch = engine.dispatch(cmd);
        if patch.is_noop() {
            log::debug!("No change from {cmd:?}");
            summary.ignored += 1;
            continue;
        }
        summary.applied += 1;

        for effect in patch.effects {
            match effect {
                Effect::Save { message, points } => {
                    store
                        .save(&message, &points)
                        .with_context(|| format!("Failed to save message {}", message.id))?;
                    summary.saved += 1;
                }
            }
        }
    }
    Ok(summary)
}
