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

//! One open channel view: scroll tracking, new-message bar and permalink
//! highlight wired together, plus the view's logical clock.
//!
//! Sessions share nothing. After `close()` every entry point is a no-op.

use crate::classify::classify;
use crate::config::NotifyConfig;
use crate::highlight::{HighlightExpiry, PermalinkHighlighter};
use crate::history::ChannelHistory;
use crate::indicator::NewMessageIndicator;
use crate::model::{
    ChannelEvent, ChannelId, HighlightState, IndicatorState, Message, MessageId,
    NavigationIntent, RenderedRow, ViewportState,
};
use crate::scroll::{ScrollTracker, ScrollTransition};
use crate::timer::{Millis, TimerHandle, TimerQueue};
use serde::{Deserialize, Serialize};

/// One input to a session, as read from a stream or a replay script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SessionInput {
    /// Raw channel event; decoded leniently so bad payloads degrade to `Other`.
    Event { event: serde_json::Value },
    Viewport {
        viewport_top: f32,
        viewport_bottom: f32,
        #[serde(default)]
        last_rendered: Option<RenderedRow>,
    },
    Navigate(NavigationIntent),
    JumpToBottom,
    /// Only moves the clock (replay scripts).
    Wait,
    Close,
}

/// Everything the host needs to render, at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub channel_id: ChannelId,
    pub at: Millis,
    pub indicator: IndicatorState,
    pub highlight: HighlightState,
    pub viewport: ViewportState,
    pub closed: bool,
}

impl Snapshot {
    /// Equal apart from the timestamp.
    #[must_use]
    pub fn same_state(&self, other: &Self) -> bool {
        self.channel_id == other.channel_id
            && self.indicator == other.indicator
            && self.highlight == other.highlight
            && self.viewport == other.viewport
            && self.closed == other.closed
    }
}

pub struct ChannelViewSession {
    channel_id: ChannelId,
    tracker: ScrollTracker,
    indicator: NewMessageIndicator,
    highlighter: PermalinkHighlighter,
    timers: TimerQueue<HighlightExpiry>,
    history: ChannelHistory,
    now: Millis,
    closed: bool,
}

impl ChannelViewSession {
    /// Open a view on `channel_id`. `latest_known` is the newest message the
    /// channel already had; it counts as seen.
    pub fn open(
        channel_id: ChannelId,
        latest_known: Option<MessageId>,
        config: &NotifyConfig,
    ) -> Self {
        tracing::debug!(channel = %channel_id, latest_known = ?latest_known, "channel view opened");
        Self {
            tracker: ScrollTracker::new(config.bottom_tolerance),
            indicator: NewMessageIndicator::new(channel_id.clone(), latest_known),
            highlighter: PermalinkHighlighter::new(config.highlight_duration_ms()),
            timers: TimerQueue::new(),
            history: ChannelHistory::new(channel_id.clone()),
            channel_id,
            now: 0,
            closed: false,
        }
    }

    /// Load history that was already in the channel when the view opened.
    /// None of it counts toward the new-message bar.
    pub fn preload(&mut self, messages: impl IntoIterator<Item = Message>) {
        if self.closed {
            return;
        }
        for message in messages {
            let id = message.id;
            if self.history.insert(message) {
                self.indicator.acknowledge(id);
            }
        }
    }

    #[must_use]
    pub fn channel_id(&self) -> &ChannelId {
        &self.channel_id
    }

    #[must_use]
    pub fn now(&self) -> Millis {
        self.now
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[must_use]
    pub fn history(&self) -> &ChannelHistory {
        &self.history
    }

    #[must_use]
    pub fn indicator_state(&self) -> IndicatorState {
        self.indicator.state()
    }

    #[must_use]
    pub fn highlight_state(&self) -> HighlightState {
        self.highlighter.state()
    }

    #[must_use]
    pub fn viewport(&self) -> ViewportState {
        ViewportState {
            is_at_bottom: self.tracker.is_at_bottom(),
            last_seen_message_id: self.indicator.last_seen(),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            channel_id: self.channel_id.clone(),
            at: self.now,
            indicator: self.indicator_state(),
            highlight: self.highlight_state(),
            viewport: self.viewport(),
            closed: self.closed,
        }
    }

    /// Next time `advance_to` has work to do, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        if self.closed {
            return None;
        }
        self.timers.next_deadline()
    }

    /// Handle one real-time event. Returns `true` if the bar changed.
    pub fn handle_event(&mut self, event: ChannelEvent) -> bool {
        if self.closed {
            tracing::trace!("event after close ignored");
            return false;
        }
        // Classify before any mutation.
        let class = classify(&event);
        match event {
            ChannelEvent::PostCreated(message) => {
                if message.channel_id == self.channel_id && !self.history.insert(message) {
                    tracing::trace!(?class, "duplicate post delivery");
                }
            }
            ChannelEvent::ReactionAdded { message_id, emoji, user_id } => {
                self.history.add_reaction(message_id, &emoji, &user_id);
            }
            ChannelEvent::ReactionRemoved { message_id, emoji, user_id } => {
                self.history.remove_reaction(message_id, &emoji, &user_id);
            }
            ChannelEvent::Other => {}
        }
        self.indicator.on_event(&class, self.tracker.is_at_bottom())
    }

    /// Geometry update from the render layer.
    pub fn update_viewport(
        &mut self,
        viewport_top: f32,
        viewport_bottom: f32,
        last_rendered: Option<RenderedRow>,
    ) -> Option<ScrollTransition> {
        if self.closed {
            return None;
        }
        let transition = self.tracker.update(viewport_top, viewport_bottom, last_rendered);
        self.apply_transition(transition);
        transition
    }

    /// The user clicked "jump to new messages".
    pub fn jump_to_bottom(&mut self) {
        if self.closed {
            return;
        }
        self.tracker.force(true);
        self.indicator.on_reached_bottom();
    }

    /// Permalink or search-result jump. Returns the expiry timer handle, or
    /// `None` if the intent was for another channel or the view is closed.
    pub fn navigate(&mut self, intent: &NavigationIntent) -> Option<TimerHandle> {
        if self.closed {
            return None;
        }
        if intent.channel_id != self.channel_id {
            tracing::debug!(
                channel = %self.channel_id,
                target_channel = %intent.channel_id,
                "navigation intent for another channel ignored"
            );
            return None;
        }

        let handle = self.highlighter.activate(intent.message_id, self.now, &mut self.timers);

        // Jumping to the newest message shows the tail; anything older lands
        // mid-history.
        let latest = self.indicator.latest_known().max(self.history.latest_id());
        let lands_at_bottom = latest.is_none_or(|latest| intent.message_id >= latest);
        let transition = self.tracker.force(lands_at_bottom);
        if lands_at_bottom && transition.is_none() {
            self.indicator.on_reached_bottom();
        }
        self.apply_transition(transition);
        tracing::debug!(
            message_id = %intent.message_id,
            source = ?intent.source,
            lands_at_bottom,
            "navigated to message"
        );
        Some(handle)
    }

    /// Cancel a highlight by the handle [`navigate`](Self::navigate) returned.
    /// Returns `false` if that highlight already expired or was replaced.
    pub fn cancel_highlight(&mut self, handle: TimerHandle) -> bool {
        if self.closed {
            return false;
        }
        self.highlighter.cancel(handle, &mut self.timers)
    }

    /// Move the clock forward, firing due timers in deadline order.
    /// Returns the number of timers that fired. Time never moves backwards.
    pub fn advance_to(&mut self, now: Millis) -> usize {
        if self.closed {
            return 0;
        }
        let target = now.max(self.now);
        let mut fired = 0;
        while let Some(due) = self.timers.pop_due(target) {
            self.now = due.deadline.max(self.now);
            self.highlighter.on_expiry(due.payload);
            fired += 1;
        }
        self.now = target;
        fired
    }

    pub fn advance_by(&mut self, delta: Millis) -> usize {
        self.advance_to(self.now.saturating_add(delta))
    }

    /// Apply one input at the current clock.
    pub fn apply(&mut self, input: SessionInput) {
        match input {
            SessionInput::Event { event } => {
                self.handle_event(ChannelEvent::from_value(event));
            }
            SessionInput::Viewport { viewport_top, viewport_bottom, last_rendered } => {
                self.update_viewport(viewport_top, viewport_bottom, last_rendered);
            }
            SessionInput::Navigate(intent) => {
                self.navigate(&intent);
            }
            SessionInput::JumpToBottom => self.jump_to_bottom(),
            SessionInput::Wait => {}
            SessionInput::Close => self.close(),
        }
    }

    /// Tear the view down. Any pending highlight expiry is cancelled, and a
    /// timer that would have fired afterwards has nothing left to run against.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.highlighter.deactivate(&mut self.timers);
        self.timers.clear();
        self.indicator.reset();
        self.closed = true;
        tracing::debug!(channel = %self.channel_id, at = self.now, "channel view closed");
    }

    fn apply_transition(&mut self, transition: Option<ScrollTransition>) {
        if transition == Some(ScrollTransition::ReachedBottom) {
            self.indicator.on_reached_bottom();
        }
    }
}
