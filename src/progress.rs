//! Progress reporting utilities: count-style bars for bounded listings and a
//! spinner for listings whose length the platform decides.

use indicatif::{ProgressBar, ProgressStyle};

/// A small, ergonomic wrapper around `indicatif` progress bars.
/// - `count(..)` when the total is known up front
/// - `spinner(..)` when it isn't (e.g. a listing capped by the platform)
/// - `inc(delta)` ticks progress, `finish(msg)` finalizes with a message
pub struct ProgressScope {
    pb: ProgressBar,
}

impl ProgressScope {
    pub fn count<T: Into<String>>(label: T, total: u64) -> Self {
        let pb = ProgressBar::new(total);
        let style = ProgressStyle::with_template(
            "{spinner:.green} {msg} {pos}/{len} [{bar:.cyan/blue}] {percent:>3}%  \
             it/s: {per_sec}  elapsed: {elapsed_precise}  eta: {eta_precise}",
        )
        .unwrap()
        .progress_chars("█▉▊▋▌▍▎▏  ");
        pb.set_style(style);
        let label = label.into();
        if !label.is_empty() {
            pb.set_message(label);
        }
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        Self { pb }
    }

    pub fn spinner<T: Into<String>>(label: T) -> Self {
        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template(
            "{spinner:.green} {msg} {pos}  it/s: {per_sec}  elapsed: {elapsed_precise}",
        )
        .unwrap();
        pb.set_style(style);
        pb.set_message(label.into());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        Self { pb }
    }

    #[inline]
    pub fn inc(&self, delta: u64) {
        self.pb.inc(delta);
    }

    pub fn finish<T: Into<String>>(&self, msg: T) {
        self.pb.finish_with_message(msg.into());
    }
}
