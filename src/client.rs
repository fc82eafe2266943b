//! Capability surface of the platform API client. The collector treats the
//! client as a black box: authentication, pagination and rate limiting live
//! behind this trait, which also makes the whole pipeline mockable.

use crate::filters::{PostFilter, TimeWindow};
use crate::tree::{CommentNode, MoreComments};
use anyhow::Result;

/// A lazy, finite stream of submissions in platform ranking order.
pub type Listing<'a> = Box<dyn Iterator<Item = Result<Submission>> + 'a>;

/// Raw submission data as exposed by a platform post handle.
/// Explicit schema: required fields are plain, optional ones are `Option`.
#[derive(Clone, Debug, PartialEq)]
pub struct Submission {
    pub subreddit: String,
    pub created_utc: f64,
    pub id: String,
    pub is_original_content: bool,
    pub is_self: bool,
    pub link_flair_text: Option<String>,
    pub locked: bool,
    pub num_comments: u64,
    pub over_18: bool,
    pub score: i64,
    pub spoiler: bool,
    pub stickied: bool,
    pub title: String,
    pub upvote_ratio: f64,
    pub url: String,
}

/// Raw comment data as exposed by a platform comment handle.
///
/// `link_id` is the fullname of the parent post (e.g. "t3_abc"), `parent_id`
/// the fullname of the direct parent, which is the post for a top-level
/// comment and another comment otherwise.
#[derive(Clone, Debug, PartialEq)]
pub struct Comment {
    pub id: String,
    pub link_id: String,
    pub parent_id: String,
    pub body: String,
    pub created_utc: f64,
    pub is_submitter: bool,
    pub score: i64,
    pub stickied: bool,
}

/// Authenticated read access to the platform.
///
/// Every method is a blocking network round-trip. Implementations own retry
/// policy for transient failures; the collector never retries.
pub trait RedditClient {
    /// Name search. Returns canonical display names, best match first.
    fn search_by_name(&self, query: &str) -> Result<Vec<String>>;

    /// Ranked listing of submissions for a subreddit.
    /// `limit: None` means the platform maximum (typically 1000);
    /// `window` is only passed for the "top" ranking.
    fn ranked_listing<'a>(
        &'a self,
        subreddit: &str,
        filter: PostFilter,
        limit: Option<u32>,
        window: Option<TimeWindow>,
    ) -> Result<Listing<'a>>;

    /// Fetch a post's comment forest. Returns `None` when the post no longer
    /// resolves (deleted/removed between collection phases).
    fn comment_tree(&self, post_id: &str) -> Result<Option<Vec<CommentNode>>>;

    /// Expand one unresolved placeholder into its children. The returned
    /// nodes may themselves contain further placeholders.
    fn resolve_more(&self, post_id: &str, more: &MoreComments) -> Result<Vec<CommentNode>>;
}

impl<T: RedditClient + ?Sized> RedditClient for &T {
    fn search_by_name(&self, query: &str) -> Result<Vec<String>> {
        (**self).search_by_name(query)
    }
    fn ranked_listing<'a>(
        &'a self,
        subreddit: &str,
        filter: PostFilter,
        limit: Option<u32>,
        window: Option<TimeWindow>,
    ) -> Result<Listing<'a>> {
        (**self).ranked_listing(subreddit, filter, limit, window)
    }
    fn comment_tree(&self, post_id: &str) -> Result<Option<Vec<CommentNode>>> {
        (**self).comment_tree(post_id)
    }
    fn resolve_more(&self, post_id: &str, more: &MoreComments) -> Result<Vec<CommentNode>> {
        (**self).resolve_more(post_id, more)
    }
}
