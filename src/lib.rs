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

pub mod classify;
pub mod config;
pub mod driver;
pub mod error;
pub mod highlight;
pub mod history;
pub mod indicator;
pub mod model;
pub mod replay;
pub mod scroll;
pub mod session;
pub mod timer;

use clap::Parser;
use config::NotifyConfig;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "channel-notify",
    about = "Drive a channel view's new-message bar and permalink highlight"
)]
pub struct Cli {
    /// Channel the view is bound to
    #[arg(long, short)]
    pub channel: String,

    /// Latest message id already known when the view opens
    #[arg(long)]
    pub latest: Option<u64>,

    /// Replay a JSON-lines script on a logical clock instead of reading stdin
    #[arg(long, short)]
    pub script: Option<std::path::PathBuf>,

    /// Highlight duration in milliseconds (default 6000)
    #[arg(long)]
    pub highlight_ms: Option<u64>,

    /// Pixels of slack when deciding whether the last row is in view
    #[arg(long)]
    pub bottom_tolerance: Option<f32>,

    /// Write tracing diagnostics to this file
    #[arg(long)]
    pub log_file: Option<std::path::PathBuf>,

    /// Tracing filter directives (falls back to `RUST_LOG`, then `info`)
    #[arg(long)]
    pub log_filter: Option<String>,

    /// Append to the log file instead of truncating it
    #[arg(long)]
    pub log_append: bool,
}

impl Cli {
    /// Defaults with any command-line overrides applied.
    #[must_use]
    pub fn notify_config(&self) -> NotifyConfig {
        let mut config = NotifyConfig::default();
        if let Some(ms) = self.highlight_ms {
            config = config.with_highlight_duration(Duration::from_millis(ms));
        }
        if let Some(tolerance) = self.bottom_tolerance {
            config = config.with_bottom_tolerance(tolerance);
        }
        config
    }
}
