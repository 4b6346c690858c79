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
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;

/// How long a permalink target stays highlighted after navigation.
pub const DEFAULT_HIGHLIGHT_DURATION: Duration = Duration::from_millis(6000);
/// Slack, in pixels, when testing whether the last rendered row intersects the viewport.
pub const DEFAULT_BOTTOM_TOLERANCE_PX: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    pub highlight_duration: Duration,
    #[serde(deserialize_with = "deserialize_tolerance")]
    pub bottom_tolerance: f32,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            highlight_duration: DEFAULT_HIGHLIGHT_DURATION,
            bottom_tolerance: DEFAULT_BOTTOM_TOLERANCE_PX,
        }
    }
}

impl NotifyConfig {
    #[must_use]
    pub fn with_highlight_duration(mut self, duration: Duration) -> Self {
        self.highlight_duration = duration;
        self
    }

    /// Negative or NaN tolerances collapse to zero.
    #[must_use]
    pub fn with_bottom_tolerance(mut self, tolerance: f32) -> Self {
        self.bottom_tolerance = clamp_tolerance(tolerance);
        self
    }

    /// Highlight duration on the logical millisecond clock, saturating.
    #[must_use]
    pub fn highlight_duration_ms(&self) -> Millis {
        Millis::try_from(self.highlight_duration.as_millis()).unwrap_or(Millis::MAX)
    }
}

/// Negative or NaN tolerances collapse to zero.
#[must_use]
pub fn clamp_tolerance(tolerance: f32) -> f32 {
    if tolerance.is_nan() { 0.0 } else { tolerance.max(0.0) }
}

fn deserialize_tolerance<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    f32::deserialize(deserializer).map(clamp_tolerance)
}

#[must_use]
pub fn default_notify_config() -> &'static NotifyConfig {
    static CONFIG: NotifyConfig = NotifyConfig {
        highlight_duration: DEFAULT_HIGHLIGHT_DURATION,
        bottom_tolerance: DEFAULT_BOTTOM_TOLERANCE_PX,
    };
    &CONFIG
}
