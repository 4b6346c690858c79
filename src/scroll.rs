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

use crate::config::clamp_tolerance;
use crate::model::RenderedRow;

/// Emitted only when the at-bottom flag flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTransition {
    ReachedBottom,
    LeftBottom,
}

/// Tracks whether the bottom-most rendered message is inside the viewport.
pub struct ScrollTracker {
    tolerance: f32,
    at_bottom: bool,
}

impl ScrollTracker {
    /// A freshly opened view sits at the tail of the channel. A negative or
    /// NaN `tolerance` is treated as zero.
    pub fn new(tolerance: f32) -> Self {
        Self { tolerance: clamp_tolerance(tolerance), at_bottom: true }
    }

    #[must_use]
    pub fn is_at_bottom(&self) -> bool {
        self.at_bottom
    }

    /// Recompute from viewport geometry. `last_rendered` is the bottom-most
    /// rendered row; `None` means nothing is rendered, which counts as bottom.
    pub fn update(
        &mut self,
        viewport_top: f32,
        viewport_bottom: f32,
        last_rendered: Option<RenderedRow>,
    ) -> Option<ScrollTransition> {
        let at_bottom = last_rendered
            .is_none_or(|row| row_in_view(&row, viewport_top, viewport_bottom, self.tolerance));
        self.set(at_bottom)
    }

    /// Apply a position known without geometry (a jump the session performed).
    pub fn force(&mut self, at_bottom: bool) -> Option<ScrollTransition> {
        self.set(at_bottom)
    }

    fn set(&mut self, at_bottom: bool) -> Option<ScrollTransition> {
        if self.at_bottom == at_bottom {
            return None;
        }
        self.at_bottom = at_bottom;
        tracing::trace!(at_bottom, "scroll position changed");
        Some(if at_bottom { ScrollTransition::ReachedBottom } else { ScrollTransition::LeftBottom })
    }
}

fn row_in_view(row: &RenderedRow, viewport_top: f32, viewport_bottom: f32, tolerance: f32) -> bool {
    row.top <= viewport_bottom + tolerance && row.bottom >= viewport_top - tolerance
}
