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

//! Channel, message and view-state types shared by the state machines.

use crate::timer::Millis;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Message identifier. Unique within a channel and increasing in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(String);

impl ChannelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ChannelId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub emoji: String,
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub channel_id: ChannelId,
    pub author_id: UserId,
    #[serde(default)]
    pub body: String,
    /// Insertion-ordered, unique on `(emoji, user_id)`.
    /// Use `add_reaction()` / `remove_reaction()`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    reactions: Vec<Reaction>,
}

impl Message {
    pub fn new(
        id: MessageId,
        channel_id: ChannelId,
        author_id: UserId,
        body: impl Into<String>,
    ) -> Self {
        Self { id, channel_id, author_id, body: body.into(), reactions: Vec::new() }
    }

    #[must_use]
    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    /// Returns `false` if this user already reacted with this emoji.
    pub fn add_reaction(&mut self, emoji: &str, user_id: &UserId) -> bool {
        if self.has_reaction(emoji, user_id) {
            return false;
        }
        self.reactions.push(Reaction { emoji: emoji.to_owned(), user_id: user_id.clone() });
        true
    }

    /// Returns `false` if there was nothing to remove.
    pub fn remove_reaction(&mut self, emoji: &str, user_id: &UserId) -> bool {
        let before = self.reactions.len();
        self.reactions.retain(|r| !(r.emoji == emoji && r.user_id == *user_id));
        self.reactions.len() != before
    }

    #[must_use]
    pub fn has_reaction(&self, emoji: &str, user_id: &UserId) -> bool {
        self.reactions.iter().any(|r| r.emoji == emoji && r.user_id == *user_id)
    }

    /// Drop repeated `(emoji, user)` pairs that arrived through deserialization,
    /// keeping the first occurrence.
    pub(crate) fn dedup_reactions(&mut self) {
        let mut kept: Vec<Reaction> = Vec::with_capacity(self.reactions.len());
        for reaction in self.reactions.drain(..) {
            if !kept.iter().any(|k| k.emoji == reaction.emoji && k.user_id == reaction.user_id) {
                kept.push(reaction);
            }
        }
        self.reactions = kept;
    }
}

/// Real-time event pushed for the open channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ChannelEvent {
    PostCreated(Message),
    ReactionAdded { message_id: MessageId, emoji: String, user_id: UserId },
    ReactionRemoved { message_id: MessageId, emoji: String, user_id: UserId },
    /// Typing, presence, edits and anything this crate does not model.
    #[serde(other)]
    Other,
}

impl ChannelEvent {
    /// Decode a raw payload. Malformed or unrecognized payloads become `Other`
    /// instead of failing.
    pub fn from_value(value: serde_json::Value) -> Self {
        match serde_json::from_value(value) {
            Ok(event) => event,
            Err(err) => {
                tracing::debug!(%err, "malformed channel event payload; treating as other");
                Self::Other
            }
        }
    }

    pub fn from_json(text: &str) -> Self {
        match serde_json::from_str(text) {
            Ok(event) => event,
            Err(err) => {
                tracing::debug!(%err, "malformed channel event payload; treating as other");
                Self::Other
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportState {
    pub is_at_bottom: bool,
    pub last_seen_message_id: Option<MessageId>,
}

/// What the host renders for the "new messages" bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum IndicatorState {
    #[default]
    Hidden,
    Visible {
        unseen: usize,
    },
}

impl IndicatorState {
    #[must_use]
    pub fn is_visible(self) -> bool {
        matches!(self, Self::Visible { .. })
    }

    #[must_use]
    pub fn unseen(self) -> usize {
        match self {
            Self::Hidden => 0,
            Self::Visible { unseen } => unseen,
        }
    }
}

/// Which message, if any, the host should render highlighted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum HighlightState {
    #[default]
    Inactive,
    Highlighted {
        message_id: MessageId,
        expires_at: Millis,
    },
}

impl HighlightState {
    #[must_use]
    pub fn message_id(self) -> Option<MessageId> {
        match self {
            Self::Inactive => None,
            Self::Highlighted { message_id, .. } => Some(message_id),
        }
    }

    #[must_use]
    pub fn is_highlighted(self, id: MessageId) -> bool {
        self.message_id() == Some(id)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationSource {
    /// Direct link to a message.
    #[default]
    Permalink,
    /// "Jump" from a search result.
    SearchJump,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationIntent {
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    #[serde(default)]
    pub source: NavigationSource,
}

impl NavigationIntent {
    pub fn permalink(channel_id: ChannelId, message_id: MessageId) -> Self {
        Self { channel_id, message_id, source: NavigationSource::Permalink }
    }

    pub fn search_jump(channel_id: ChannelId, message_id: MessageId) -> Self {
        Self { channel_id, message_id, source: NavigationSource::SearchJump }
    }
}

/// Bounding region of a rendered message row, in content coordinates
/// (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderedRow {
    pub message_id: MessageId,
    pub top: f32,
    pub bottom: f32,
}
