//! Headless replay of recorded interaction.
//!
//! A script is a TOML file with a list of `[[step]]` tables, each tagged by
//! its `action`. Pointer positions are widget coordinates, as a window would
//! deliver them:
//!
//! ```toml
//! [[step]]
//! action = "mode"
//! mode = "line"
//!
//! [[step]]
//! action = "press"
//! x = 120.0
//! y = 80.0
//! ```

use crate::geometry::Point;
use crate::input::{ContextAction, Mode, MouseButton, PointerEvent};
use crate::session::Session;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

fn default_button() -> MouseButton {
    MouseButton::Left
}

/// One replayed user action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Select an interaction mode by its action name ("line", "move point", ...)
    Mode { mode: String },
    /// Select a palette color by label
    Color { color: String },
    Press {
        x: f64,
        y: f64,
        #[serde(default = "default_button")]
        button: MouseButton,
    },
    Move { x: f64, y: f64 },
    Release {
        x: f64,
        y: f64,
        #[serde(default = "default_button")]
        button: MouseButton,
    },
    /// Context menu "change index"
    Rename { index: usize, to: i64 },
    /// Context menu "show/hide point info"
    Pivot { index: usize },
    /// Context menu "erase point"
    Erase { index: usize },
    Resize { width: u32, height: u32 },
    Zoom { percent: u32 },
    Clear,
}

/// Parsed script.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Script {
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

/// Outcome of a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub applied: usize,
    pub skipped: usize,
}

impl Script {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).context("Failed to parse script")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        let script = Self::from_toml_str(&source)
            .with_context(|| format!("Invalid script {}", path.display()))?;
        log::info!("Loaded {} script steps from {}", script.steps.len(), path.display());
        Ok(script)
    }

    /// Replays every step in order. Steps that would only produce a warning
    /// in the interactive tool are logged and skipped.
    pub fn run(&self, session: &mut Session) -> ReplayReport {
        let mut report = ReplayReport::default();
        for (number, step) in self.steps.iter().enumerate() {
            if step.apply(session) {
                report.applied += 1;
            } else {
                log::warn!("Script step {} skipped: {:?}", number + 1, step);
                report.skipped += 1;
            }
        }
        report
    }
}

impl Step {
    /// Applies the step; returns false when it was rejected.
    pub fn apply(&self, session: &mut Session) -> bool {
        match self {
            Step::Mode { mode } => match mode.parse::<Mode>() {
                Ok(mode) => {
                    session.set_mode(mode);
                    true
                }
                Err(err) => {
                    log::warn!("{err}");
                    false
                }
            },
            Step::Color { color } => session.select_color(color),
            Step::Press { x, y, button } => {
                session.on_pointer_event(PointerEvent::Press {
                    button: *button,
                    position: Point::new(*x, *y),
                });
                true
            }
            Step::Move { x, y } => {
                let effects = session.on_pointer_event(PointerEvent::Move {
                    position: Point::new(*x, *y),
                });
                if let Some(status) = effects.status {
                    log::debug!("{status}");
                }
                true
            }
            Step::Release { x, y, button } => {
                session.on_pointer_event(PointerEvent::Release {
                    button: *button,
                    position: Point::new(*x, *y),
                });
                true
            }
            Step::Rename { index, to } => {
                session.apply_context_action(*index, ContextAction::Rename(*to))
            }
            Step::Pivot { index } => {
                session.apply_context_action(*index, ContextAction::TogglePivot)
            }
            Step::Erase { index } => session.apply_context_action(*index, ContextAction::Erase),
            Step::Resize { width, height } => {
                session.resize((*width, *height));
                true
            }
            Step::Zoom { percent } => {
                session.set_zoom(*percent);
                true
            }
            Step::Clear => {
                session.clear_annotations();
                true
            }
        }
    }
}
