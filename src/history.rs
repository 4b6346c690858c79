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

use crate::model::{ChannelId, Message, MessageId, UserId};
use std::collections::BTreeMap;

/// Locally known messages of one channel, ordered by id.
pub struct ChannelHistory {
    channel_id: ChannelId,
    messages: BTreeMap<MessageId, Message>,
}

impl ChannelHistory {
    pub fn new(channel_id: ChannelId) -> Self {
        Self { channel_id, messages: BTreeMap::new() }
    }

    /// Returns `false` for a message of another channel or an id already known.
    pub fn insert(&mut self, mut message: Message) -> bool {
        if message.channel_id != self.channel_id || self.messages.contains_key(&message.id) {
            return false;
        }
        message.dedup_reactions();
        self.messages.insert(message.id, message);
        true
    }

    /// Reactions on messages not held locally are dropped.
    pub fn add_reaction(&mut self, id: MessageId, emoji: &str, user_id: &UserId) -> bool {
        self.messages.get_mut(&id).is_some_and(|m| m.add_reaction(emoji, user_id))
    }

    pub fn remove_reaction(&mut self, id: MessageId, emoji: &str, user_id: &UserId) -> bool {
        self.messages.get_mut(&id).is_some_and(|m| m.remove_reaction(emoji, user_id))
    }

    #[must_use]
    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.messages.get(&id)
    }

    #[must_use]
    pub fn latest_id(&self) -> Option<MessageId> {
        self.messages.last_key_value().map(|(id, _)| *id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
