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

use crate::timer::Millis;

/// Failures of the outer surfaces (script replay, CLI). The state machines
/// themselves have no error path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("Replay script {path} could not be read: {reason}")]
    ScriptUnreadable { path: String, reason: String },
    #[error("Invalid replay script step on line {line}: {reason}")]
    InvalidScript { line: usize, reason: String },
    #[error("Replay script step on line {line} is at {at}ms, before the clock ({now}ms)")]
    ScriptTimeWentBackwards { line: usize, at: Millis, now: Millis },
}

impl AppError {
    pub const SCRIPT_UNREADABLE_EXIT_CODE: i32 = 20;
    pub const INVALID_SCRIPT_EXIT_CODE: i32 = 21;
    pub const SCRIPT_TIME_EXIT_CODE: i32 = 22;

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ScriptUnreadable { .. } => Self::SCRIPT_UNREADABLE_EXIT_CODE,
            Self::InvalidScript { .. } => Self::INVALID_SCRIPT_EXIT_CODE,
            Self::ScriptTimeWentBackwards { .. } => Self::SCRIPT_TIME_EXIT_CODE,
        }
    }

    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::ScriptUnreadable { path, .. } => {
                format!("Could not read replay script `{path}`. Check the path and permissions.")
            }
            Self::InvalidScript { line, reason } => {
                format!("Replay script line {line} is not a valid step: {reason}")
            }
            Self::ScriptTimeWentBackwards { line, .. } => {
                format!("Replay script line {line} goes back in time. Steps must be ordered by `at`.")
            }
        }
    }
}
