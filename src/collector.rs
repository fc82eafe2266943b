//! The collection pipeline: verify targets, walk ranked listings, expand and
//! flatten comment trees. Single-threaded and blocking throughout; every
//! request happens strictly in traversal order.

use crate::client::RedditClient;
use crate::config::CollectOptions;
use crate::error::CollectError;
use crate::filters::{effective_window, PostFilter, TimeWindow};
use crate::progress::ProgressScope;
use crate::records::{CommentRecord, PostRecord};
use crate::table::{to_table, to_tables, Table};
use crate::tree::{flatten, resolve_placeholders, ResolveLimit};
use crate::util::init_tracing_once;
use anyhow::{Context, Result};

/// Per-target post and comment sequences in request order; within a target,
/// rows are in traversal order. `comments` is `None` when comment collection
/// was not requested.
#[derive(Clone, Debug)]
pub struct CollectedData {
    pub posts: Vec<(String, Vec<PostRecord>)>,
    pub comments: Option<Vec<(String, Vec<CommentRecord>)>>,
}

impl CollectedData {
    /// All posts as one table (the `subreddit_name` column discriminates).
    pub fn posts_table(&self) -> Result<Table> {
        to_table(&self.posts)
    }

    /// One post table per target, in request order.
    pub fn posts_tables(&self) -> Result<Vec<(String, Table)>> {
        to_tables(&self.posts)
    }

    /// All comments as one table, if comment collection was requested.
    pub fn comments_table(&self) -> Result<Option<Table>> {
        self.comments.as_deref().map(to_table).transpose()
    }

    /// One comment table per target, if comment collection was requested.
    pub fn comments_tables(&self) -> Result<Option<Vec<(String, Table)>>> {
        self.comments.as_deref().map(to_tables).transpose()
    }
}

/// Stateful collector over an authenticated platform client.
///
/// Each `get_data` call owns its result structures exclusively until it
/// returns; on failure the whole call aborts and partial results are
/// discarded.
pub struct DataCollector<C: RedditClient> {
    client: C,
    opts: CollectOptions,
}

impl<C: RedditClient> DataCollector<C> {
    pub fn new(client: C) -> Self {
        Self { client, opts: CollectOptions::default() }
    }

    pub fn with_options(client: C, opts: CollectOptions) -> Self {
        Self { client, opts }
    }

    // -------- Builder methods --------
    pub fn post_filter(mut self, filter: PostFilter) -> Self { self.opts = self.opts.with_post_filter(filter); self }
    pub fn post_limit(mut self, limit: Option<u32>) -> Self { self.opts = self.opts.with_post_limit(limit); self }
    pub fn time_window(mut self, window: Option<TimeWindow>) -> Self { self.opts = self.opts.with_time_window(window); self }
    pub fn comment_data(mut self, yes: bool) -> Self { self.opts = self.opts.with_comment_data(yes); self }
    pub fn replies_data(mut self, yes: bool) -> Self { self.opts = self.opts.with_replies_data(yes); self }
    pub fn resolve_limit(mut self, limit: ResolveLimit) -> Self { self.opts = self.opts.with_resolve_limit(limit); self }
    pub fn progress(mut self, yes: bool) -> Self { self.opts = self.opts.with_progress(yes); self }
    pub fn progress_label(mut self, label: impl Into<String>) -> Self { self.opts = self.opts.with_progress_label(label); self }

    /// Collect post (and optionally comment) data for the given subreddits.
    ///
    /// Every target is verified before any listing traversal begins, so a
    /// typo'd name fails the whole batch without spending quota on partial
    /// collection.
    pub fn get_data(&self, subreddits: &[&str]) -> Result<CollectedData> {
        init_tracing_once();

        self.verify_subreddits(subreddits)?;

        let mut posts: Vec<(String, Vec<PostRecord>)> = Vec::with_capacity(subreddits.len());
        for sub in subreddits {
            let records = self
                .collect_posts(sub)
                .with_context(|| format!("collecting r/{} posts", sub))?;
            tracing::info!("collected {} post(s) from r/{}", records.len(), sub);
            posts.push((sub.to_string(), records));
        }

        let comments = if self.opts.comment_data {
            let mut all: Vec<(String, Vec<CommentRecord>)> = Vec::with_capacity(posts.len());
            for (sub, sub_posts) in &posts {
                let records = self
                    .collect_comments(sub, sub_posts)
                    .with_context(|| format!("collecting r/{} comments", sub))?;
                tracing::info!("collected {} comment(s) from r/{}", records.len(), sub);
                all.push((sub.clone(), records));
            }
            Some(all)
        } else {
            None
        };

        Ok(CollectedData { posts, comments })
    }

    /// Check every requested subreddit against the platform's name search,
    /// reporting all missing names at once.
    fn verify_subreddits(&self, subreddits: &[&str]) -> Result<()> {
        let mut missing: Vec<String> = Vec::new();
        for sub in subreddits {
            if !self.subreddit_exists(sub)? {
                missing.push(sub.to_string());
            }
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CollectError::TargetNotFound { names: missing }.into())
        }
    }

    /// The search may return numerous similar names; only the first match
    /// counts, compared case-insensitively against the canonical name.
    fn subreddit_exists(&self, subreddit: &str) -> Result<bool> {
        let matches = self
            .client
            .search_by_name(subreddit)
            .with_context(|| format!("searching for r/{}", subreddit))?;
        Ok(matches
            .first()
            .is_some_and(|name| name.eq_ignore_ascii_case(subreddit)))
    }

    fn collect_posts(&self, subreddit: &str) -> Result<Vec<PostRecord>> {
        let filter = self.opts.post_filter;
        let window = effective_window(filter, self.opts.time_window);
        // "top" ignores the caller limit by convention; the platform's
        // window-bounded maximum applies instead.
        let limit = match filter {
            PostFilter::Top => None,
            _ => self.opts.post_limit,
        };

        let label = self
            .opts
            .progress_label
            .clone()
            .unwrap_or_else(|| format!("Collecting {} r/{} posts", filter, subreddit));
        let pb = self.opts.progress.then(|| match limit {
            Some(n) => ProgressScope::count(label.clone(), n as u64),
            None => ProgressScope::spinner(label.clone()),
        });

        let mut records = Vec::new();
        for submission in self.client.ranked_listing(subreddit, filter, limit, window)? {
            let submission = submission?;
            records.push(PostRecord::from(&submission));
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        }
        if let Some(pb) = pb {
            pb.finish(label);
        }
        Ok(records)
    }

    fn collect_comments(&self, subreddit: &str, posts: &[PostRecord]) -> Result<Vec<CommentRecord>> {
        let label = format!("Collecting comments for {} r/{} posts", posts.len(), subreddit);
        let pb = self
            .opts
            .progress
            .then(|| ProgressScope::count(label.clone(), posts.len() as u64));

        let mut records = Vec::new();
        for post in posts {
            match self.client.comment_tree(&post.id)? {
                Some(mut nodes) => {
                    resolve_placeholders(&self.client, &post.id, &mut nodes, self.opts.resolve_limit)?;
                    for comment in flatten(&nodes, self.opts.replies_data) {
                        records.push(CommentRecord::from_comment(subreddit, comment));
                    }
                }
                // Vanished between collection phases: empty contribution,
                // never an aborted batch.
                None => tracing::warn!("post {} no longer resolves, skipping comments", post.id),
            }
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        }
        if let Some(pb) = pb {
            pb.finish(label);
        }
        Ok(records)
    }
}
