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

//! Time-bounded highlight of a permalink target.
//!
//! Every activation bumps a generation counter and schedules an expiry that
//! carries it. The previous expiry is cancelled first, and an expiry whose
//! generation no longer matches is ignored when it fires, so an old timer can
//! never clear a newer highlight.

use crate::model::{HighlightState, MessageId};
use crate::timer::{Millis, TimerHandle, TimerQueue};

/// Payload of a scheduled un-highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightExpiry {
    pub message_id: MessageId,
    pub generation: u64,
}

struct ActiveHighlight {
    message_id: MessageId,
    expires_at: Millis,
    timer: TimerHandle,
}

pub struct PermalinkHighlighter {
    duration: Millis,
    generation: u64,
    active: Option<ActiveHighlight>,
}

impl PermalinkHighlighter {
    pub fn new(duration: Millis) -> Self {
        Self { duration, generation: 0, active: None }
    }

    #[must_use]
    pub fn state(&self) -> HighlightState {
        match &self.active {
            Some(active) => HighlightState::Highlighted {
                message_id: active.message_id,
                expires_at: active.expires_at,
            },
            None => HighlightState::Inactive,
        }
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Highlight `message_id` until `now + duration`. Re-activating the same id
    /// restarts the window.
    pub fn activate(
        &mut self,
        message_id: MessageId,
        now: Millis,
        timers: &mut TimerQueue<HighlightExpiry>,
    ) -> TimerHandle {
        self.cancel_pending(timers);
        self.generation = self.generation.wrapping_add(1);
        let expires_at = now.saturating_add(self.duration);
        let timer =
            timers.schedule(expires_at, HighlightExpiry { message_id, generation: self.generation });
        self.active = Some(ActiveHighlight { message_id, expires_at, timer });
        tracing::debug!(%message_id, generation = self.generation, expires_at, "highlight activated");
        timer
    }

    /// Handle a fired expiry. Returns `true` if it cleared the highlight.
    pub fn on_expiry(&mut self, expiry: HighlightExpiry) -> bool {
        let current = self.active.as_ref().is_some_and(|active| {
            expiry.generation == self.generation && active.message_id == expiry.message_id
        });
        if !current {
            tracing::trace!(?expiry, generation = self.generation, "stale highlight expiry ignored");
            return false;
        }
        self.active = None;
        tracing::debug!(message_id = %expiry.message_id, "highlight expired");
        true
    }

    /// Clear immediately and cancel the pending expiry.
    /// Returns `true` if a highlight was active.
    pub fn deactivate(&mut self, timers: &mut TimerQueue<HighlightExpiry>) -> bool {
        let was_active = self.cancel_pending(timers);
        // Anything already in flight for the old generation becomes stale.
        self.generation = self.generation.wrapping_add(1);
        was_active
    }

    /// Cancel the highlight scheduled under `handle`. A handle from an earlier
    /// activation, or one whose expiry already fired, is a no-op.
    ///
    /// Cancel through here rather than on the queue directly: the queue alone
    /// would drop the expiry and leave the highlight up.
    pub fn cancel(&mut self, handle: TimerHandle, timers: &mut TimerQueue<HighlightExpiry>) -> bool {
        if self.active.as_ref().is_none_or(|active| active.timer != handle) {
            tracing::trace!(?handle, "cancel for a highlight that is no longer current");
            return false;
        }
        tracing::debug!(?handle, "highlight cancelled");
        self.deactivate(timers)
    }

    fn cancel_pending(&mut self, timers: &mut TimerQueue<HighlightExpiry>) -> bool {
        let Some(active) = self.active.take() else {
            return false;
        };
        timers.cancel(active.timer);
        true
    }
}
