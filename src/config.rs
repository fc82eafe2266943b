use crate::filters::{PostFilter, TimeWindow};
use crate::tree::ResolveLimit;

/// User-facing collection options with sensible defaults and builder chaining.
#[derive(Clone, Debug)]
pub struct CollectOptions {
    pub post_filter: PostFilter,
    pub post_limit: Option<u32>,      // None = platform maximum (typically 1000)
    pub time_window: Option<TimeWindow>, // only meaningful for PostFilter::Top
    pub comment_data: bool,           // fetch comments for each collected post
    pub replies_data: bool,           // include nested replies, not just top level
    pub resolve_limit: ResolveLimit,  // "load more" placeholder expansion budget
    pub progress: bool,               // show progress bars
    pub progress_label: Option<String>, // optional label override for the bars
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            post_filter: PostFilter::New,
            post_limit: None,
            time_window: None,
            comment_data: true,
            replies_data: false,
            resolve_limit: ResolveLimit::Max(0),
            progress: true,
            progress_label: None,
        }
    }
}

impl CollectOptions {
    pub fn with_post_filter(mut self, filter: PostFilter) -> Self {
        self.post_filter = filter;
        self
    }
    pub fn with_post_limit(mut self, limit: Option<u32>) -> Self {
        self.post_limit = limit;
        self
    }
    pub fn with_time_window(mut self, window: Option<TimeWindow>) -> Self {
        self.time_window = window;
        self
    }
    pub fn with_comment_data(mut self, yes: bool) -> Self {
        self.comment_data = yes;
        self
    }
    pub fn with_replies_data(mut self, yes: bool) -> Self {
        self.replies_data = yes;
        self
    }
    pub fn with_resolve_limit(mut self, limit: ResolveLimit) -> Self {
        self.resolve_limit = limit;
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
    pub fn with_progress_label(mut self, label: impl Into<String>) -> Self {
        self.progress_label = Some(label.into());
        self
    }
}
