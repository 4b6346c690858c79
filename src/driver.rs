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

//! Real-time loop: feeds a session from an input stream and fires its timers
//! against the tokio clock. Logical time is milliseconds since the loop started.

use crate::session::{ChannelViewSession, SessionInput, Snapshot};
use crate::timer::Millis;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Drive `session` until the input stream ends or the view is closed.
/// `on_change` sees the opening snapshot and then every observable change.
pub async fn drive<F>(
    session: &mut ChannelViewSession,
    mut inputs: mpsc::UnboundedReceiver<SessionInput>,
    mut on_change: F,
) where
    F: FnMut(&Snapshot),
{
    let started = Instant::now();
    let mut last = session.snapshot();
    on_change(&last);

    while !session.is_closed() {
        // Phase 1: wait for an input or the next timer deadline
        let deadline = session
            .next_deadline()
            .and_then(|ms| started.checked_add(Duration::from_millis(ms)));
        tokio::select! {
            input = inputs.recv() => {
                let Some(input) = input else {
                    tracing::debug!("input stream closed");
                    break;
                };
                session.advance_to(elapsed_ms(started));
                session.apply(input);
            }
            () = sleep_until(deadline) => {
                session.advance_to(elapsed_ms(started));
            }
        }

        // Phase 2: report
        let next = session.snapshot();
        if !next.same_state(&last) {
            on_change(&next);
        }
        last = next;
    }
}

/// Read JSON-lines [`SessionInput`]s from `reader` and forward them. Malformed
/// lines are logged and skipped.
pub async fn forward_lines<R>(reader: R, tx: mpsc::UnboundedSender<SessionInput>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                tracing::warn!(%err, "failed to read input line");
                break;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match serde_json::from_str::<SessionInput>(trimmed) {
            Ok(input) => {
                if tx.send(input).is_err() {
                    break;
                }
            }
            Err(err) => tracing::warn!(%err, line = trimmed, "skipping malformed input line"),
        }
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

fn elapsed_ms(started: Instant) -> Millis {
    Millis::try_from(started.elapsed().as_millis()).unwrap_or(Millis::MAX)
}
