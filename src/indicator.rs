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

//! The "jump to new messages" bar for one channel view.
//!
//! A reducer over classified events and scroll transitions. The bar becomes
//! visible only for a new message in the bound channel that arrives while the
//! viewer is away from the bottom and that has not been seen before.
//! Reactions and other events never move it.

use crate::classify::EventClass;
use crate::model::{ChannelId, IndicatorState, MessageId};
use std::collections::HashSet;

pub struct NewMessageIndicator {
    channel_id: ChannelId,
    state: IndicatorState,
    /// Newest message the viewer has acknowledged by being at the bottom.
    last_seen: Option<MessageId>,
    /// Newest message id observed in this channel.
    latest_known: Option<MessageId>,
    /// Ids counted into the unseen total since the viewer last reached bottom.
    counted: HashSet<MessageId>,
}

impl NewMessageIndicator {
    /// `latest_known` is the channel's newest message at open; it counts as seen.
    pub fn new(channel_id: ChannelId, latest_known: Option<MessageId>) -> Self {
        Self {
            channel_id,
            state: IndicatorState::Hidden,
            last_seen: latest_known,
            latest_known,
            counted: HashSet::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> IndicatorState {
        self.state
    }

    #[must_use]
    pub fn last_seen(&self) -> Option<MessageId> {
        self.last_seen
    }

    #[must_use]
    pub fn latest_known(&self) -> Option<MessageId> {
        self.latest_known
    }

    /// Record already-loaded history as seen without touching the bar.
    pub fn acknowledge(&mut self, id: MessageId) {
        self.latest_known = self.latest_known.max(Some(id));
        self.last_seen = self.last_seen.max(Some(id));
    }

    /// Returns `true` if the visible state changed.
    pub fn on_event(&mut self, class: &EventClass, at_bottom: bool) -> bool {
        let EventClass::NewMessage { message_id, channel_id } = class else {
            tracing::trace!(?class, "event does not affect the new-message bar");
            return false;
        };
        if *channel_id != self.channel_id {
            tracing::trace!(channel = %channel_id, "new message for another channel ignored");
            return false;
        }

        let id = *message_id;
        self.latest_known = self.latest_known.max(Some(id));

        if at_bottom {
            // The viewer is watching the tail; the message is seen as it lands.
            self.last_seen = self.last_seen.max(Some(id));
            return false;
        }

        if self.last_seen.is_some_and(|seen| id <= seen) || !self.counted.insert(id) {
            tracing::trace!(message_id = %id, "already seen or counted");
            return false;
        }

        let before = self.state;
        self.state = IndicatorState::Visible { unseen: self.counted.len() };
        tracing::debug!(
            channel = %self.channel_id,
            message_id = %id,
            unseen = self.counted.len(),
            "new message while away from bottom"
        );
        before != self.state
    }

    /// Viewer reached the bottom (scroll or explicit "jump to bottom").
    /// Returns `true` if the bar was visible.
    pub fn on_reached_bottom(&mut self) -> bool {
        self.last_seen = self.last_seen.max(self.latest_known);
        self.counted.clear();
        let was_visible = self.state.is_visible();
        self.state = IndicatorState::Hidden;
        if was_visible {
            tracing::debug!(
                channel = %self.channel_id,
                last_seen = ?self.last_seen,
                "new-message bar dismissed"
            );
        }
        was_visible
    }

    /// Drop any pending bar on teardown.
    pub fn reset(&mut self) {
        self.counted.clear();
        self.state = IndicatorState::Hidden;
    }
}
