// channel-notify - New-message bar and permalink highlight for chat channel views
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Deterministic replay of session inputs on the logical clock.
//!
//! A script is JSON lines, one [`SessionInput`] per line with an optional
//! `"at"` (milliseconds). Blank lines and `#` comments are skipped:
//!
//! ```text
//! # permalink, then let the highlight run out
//! {"at": 0, "op": "navigate", "channel_id": "town-square", "message_id": 7}
//! {"at": 6000, "op": "wait"}
//! ```
//!
//! Timers due at or before a step's `at` fire before the step is applied.

use crate::error::AppError;
use crate::session::{ChannelViewSession, SessionInput, Snapshot};
use crate::timer::Millis;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct ScriptStep {
    /// 1-based line in the script.
    pub line: usize,
    /// `None` applies the step at the current clock.
    pub at: Option<Millis>,
    pub input: SessionInput,
}

pub fn parse_script(text: &str) -> Result<Vec<ScriptStep>, AppError> {
    let mut steps = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        steps.push(parse_step(line, trimmed)?);
    }
    Ok(steps)
}

fn parse_step(line: usize, text: &str) -> Result<ScriptStep, AppError> {
    let invalid = |reason: String| AppError::InvalidScript { line, reason };

    let mut value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| invalid(e.to_string()))?;
    let Some(fields) = value.as_object_mut() else {
        return Err(invalid("expected a JSON object".to_owned()));
    };
    let at = match fields.remove("at") {
        None | Some(serde_json::Value::Null) => None,
        Some(at) => Some(
            at.as_u64()
                .ok_or_else(|| invalid("`at` must be a non-negative integer".to_owned()))?,
        ),
    };
    let input: SessionInput = serde_json::from_value(value).map_err(|e| invalid(e.to_string()))?;
    Ok(ScriptStep { line, at, input })
}

/// Run `steps` against `session`, returning the opening snapshot followed by
/// one snapshot per observable change.
pub fn run_script(
    session: &mut ChannelViewSession,
    steps: Vec<ScriptStep>,
) -> Result<Vec<Snapshot>, AppError> {
    let mut snapshots = vec![session.snapshot()];
    for step in steps {
        if let Some(at) = step.at {
            if at < session.now() {
                return Err(AppError::ScriptTimeWentBackwards {
                    line: step.line,
                    at,
                    now: session.now(),
                });
            }
            session.advance_to(at);
            push_if_changed(&mut snapshots, session.snapshot());
        }
        tracing::trace!(line = step.line, at = session.now(), input = ?step.input, "replay step");
        session.apply(step.input);
        push_if_changed(&mut snapshots, session.snapshot());
    }
    Ok(snapshots)
}

pub fn run_script_file(
    session: &mut ChannelViewSession,
    path: &Path,
) -> Result<Vec<Snapshot>, AppError> {
    let text = std::fs::read_to_string(path).map_err(|e| AppError::ScriptUnreadable {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let steps = parse_script(&text)?;
    tracing::info!(path = %path.display(), steps = steps.len(), "replaying script");
    run_script(session, steps)
}

fn push_if_changed(snapshots: &mut Vec<Snapshot>, next: Snapshot) {
    if snapshots.last().is_some_and(|last| last.same_state(&next)) {
        return;
    }
    snapshots.push(next);
}
