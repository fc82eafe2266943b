//! Listing filter vocabulary and pre-flight validation.
//! Pure string-to-enum parsing; runs before any network activity so bad
//! input fails without spending API quota.

use crate::error::CollectError;
use std::fmt;
use std::str::FromStr;

/// Ranking mode for a subreddit listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PostFilter {
    New,
    Hot,
    Top,
}

impl PostFilter {
    /// Case-insensitive parse over the allowed vocabulary {new, hot, top}.
    pub fn parse(s: &str) -> Result<Self, CollectError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(PostFilter::New),
            "hot" => Ok(PostFilter::Hot),
            "top" => Ok(PostFilter::Top),
            _ => Err(CollectError::InvalidFilter {
                kind: "post_filter",
                value: s.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PostFilter::New => "new",
            PostFilter::Hot => "hot",
            PostFilter::Top => "top",
        }
    }
}

impl FromStr for PostFilter {
    type Err = CollectError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PostFilter::parse(s)
    }
}

impl fmt::Display for PostFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score-aggregation window, meaningful only for `PostFilter::Top`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeWindow {
    All,
    Day,
    Hour,
    Month,
    Week,
    Year,
}

impl TimeWindow {
    /// Case-insensitive parse over {all, day, hour, month, week, year}.
    pub fn parse(s: &str) -> Result<Self, CollectError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(TimeWindow::All),
            "day" => Ok(TimeWindow::Day),
            "hour" => Ok(TimeWindow::Hour),
            "month" => Ok(TimeWindow::Month),
            "week" => Ok(TimeWindow::Week),
            "year" => Ok(TimeWindow::Year),
            _ => Err(CollectError::InvalidFilter {
                kind: "top_post_filter",
                value: s.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::All => "all",
            TimeWindow::Day => "day",
            TimeWindow::Hour => "hour",
            TimeWindow::Month => "month",
            TimeWindow::Week => "week",
            TimeWindow::Year => "year",
        }
    }
}

impl FromStr for TimeWindow {
    type Err = CollectError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeWindow::parse(s)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the window actually sent to the platform.
///
/// Policy: "top" with no explicit window defaults to `All`; for "new" and
/// "hot" any supplied window is ignored and `None` goes to the client.
pub fn effective_window(filter: PostFilter, window: Option<TimeWindow>) -> Option<TimeWindow> {
    match filter {
        PostFilter::Top => Some(window.unwrap_or(TimeWindow::All)),
        PostFilter::New | PostFilter::Hot => None,
    }
}
