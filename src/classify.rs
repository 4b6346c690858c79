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

use crate::model::{ChannelEvent, ChannelId, MessageId};

/// What a channel event means for the new-message bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventClass {
    NewMessage { message_id: MessageId, channel_id: ChannelId },
    /// Reaction added or removed. Never surfaces the bar, even when the
    /// reacted-to message is off-screen.
    ReactionChange { message_id: MessageId },
    Other,
}

/// Stateless and total: every event maps to exactly one class.
#[must_use]
pub fn classify(event: &ChannelEvent) -> EventClass {
    match event {
        ChannelEvent::PostCreated(message) => EventClass::NewMessage {
            message_id: message.id,
            channel_id: message.channel_id.clone(),
        },
        ChannelEvent::ReactionAdded { message_id, .. }
        | ChannelEvent::ReactionRemoved { message_id, .. } => {
            EventClass::ReactionChange { message_id: *message_id }
        }
        ChannelEvent::Other => EventClass::Other,
    }
}
