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

//! Cooperative, cancellable timers on a logical millisecond clock.
//!
//! Nothing here runs on its own: the owner asks for due entries with
//! [`TimerQueue::pop_due`] and dispatches them itself. Cancelling removes the
//! entry, so a cancelled timer is never handed back and its work never runs.

use std::collections::{BTreeMap, HashMap};

/// Milliseconds on a session's logical clock.
pub type Millis = u64;

/// Handle returned by [`TimerQueue::schedule`], used to cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

/// A timer that came due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<T> {
    pub handle: TimerHandle,
    pub deadline: Millis,
    pub payload: T,
}

pub struct TimerQueue<T> {
    next_handle: u64,
    /// Keyed by `(deadline, handle)` so equal deadlines pop in scheduling order.
    pending: BTreeMap<(Millis, TimerHandle), T>,
    /// handle -> deadline, for O(log n) cancellation.
    deadlines: HashMap<TimerHandle, Millis>,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self { next_handle: 0, pending: BTreeMap::new(), deadlines: HashMap::new() }
    }

    pub fn schedule(&mut self, deadline: Millis, payload: T) -> TimerHandle {
        self.next_handle = self.next_handle.wrapping_add(1);
        let handle = TimerHandle(self.next_handle);
        self.pending.insert((deadline, handle), payload);
        self.deadlines.insert(handle, deadline);
        handle
    }

    /// Returns `true` if the timer was still pending. Cancelling a timer that
    /// already fired (or was already cancelled) is a no-op.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let Some(deadline) = self.deadlines.remove(&handle) else {
            return false;
        };
        self.pending.remove(&(deadline, handle)).is_some()
    }

    #[must_use]
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.deadlines.contains_key(&handle)
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        self.pending.first_key_value().map(|((deadline, _), _)| *deadline)
    }

    /// Pop the earliest timer whose deadline is at or before `now`.
    pub fn pop_due(&mut self, now: Millis) -> Option<Fired<T>> {
        if self.next_deadline()? > now {
            return None;
        }
        let ((deadline, handle), payload) = self.pending.pop_first()?;
        self.deadlines.remove(&handle);
        Some(Fired { handle, deadline, payload })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop every pending timer without firing it.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.deadlines.clear();
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
