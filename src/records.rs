//! Flat record schemas for collected posts and comments. Column names match
//! the historical dataset layout, so merges against previously persisted
//! tables line up without migration.

use crate::client::{Comment, Submission};
use serde::{Deserialize, Serialize};

/// A record type with a fixed, rectangular column set. The column order here
/// is the column order of every table built from the type; optional fields
/// serialize as explicit nulls, never as absent columns.
pub trait Record: Serialize {
    const COLUMNS: &'static [&'static str];
}

/// One row per collected post.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    pub subreddit_name: String,
    pub post_created_utc: f64,
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

impl Record for PostRecord {
    const COLUMNS: &'static [&'static str] = &[
        "subreddit_name",
        "post_created_utc",
        "id",
        "is_original_content",
        "is_self",
        "link_flair_text",
        "locked",
        "num_comments",
        "over_18",
        "score",
        "spoiler",
        "stickied",
        "title",
        "upvote_ratio",
        "url",
    ];
}

impl From<&Submission> for PostRecord {
    fn from(s: &Submission) -> Self {
        Self {
            subreddit_name: s.subreddit.clone(),
            post_created_utc: s.created_utc,
            id: s.id.clone(),
            is_original_content: s.is_original_content,
            is_self: s.is_self,
            link_flair_text: s.link_flair_text.clone(),
            locked: s.locked,
            num_comments: s.num_comments,
            over_18: s.over_18,
            score: s.score,
            spoiler: s.spoiler,
            stickied: s.stickied,
            title: s.title.clone(),
            upvote_ratio: s.upvote_ratio,
            url: s.url.clone(),
        }
    }
}

/// One row per collected comment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub subreddit_name: String,
    pub id: String,
    pub post_id: String,
    pub parent_id: String,
    pub top_level_comment: bool,
    pub body: String,
    pub comment_created_utc: f64,
    pub is_submitter: bool,
    pub score: i64,
    pub stickied: bool,
}

impl Record for CommentRecord {
    const COLUMNS: &'static [&'static str] = &[
        "subreddit_name",
        "id",
        "post_id",
        "parent_id",
        "top_level_comment",
        "body",
        "comment_created_utc",
        "is_submitter",
        "score",
        "stickied",
    ];
}

impl CommentRecord {
    /// Build a record from a raw comment handle.
    ///
    /// `subreddit` comes from the traversal context, not from the comment:
    /// replies can be fetched through a post collected elsewhere. The
    /// `top_level_comment` flag is always computed from the parent ids and
    /// never read off the source, which reports it inconsistently.
    pub fn from_comment(subreddit: &str, c: &Comment) -> Self {
        Self {
            subreddit_name: subreddit.to_string(),
            id: c.id.clone(),
            post_id: c.link_id.clone(),
            parent_id: c.parent_id.clone(),
            top_level_comment: c.parent_id == c.link_id,
            body: c.body.clone(),
            comment_created_utc: c.created_utc,
            is_submitter: c.is_submitter,
            score: c.score,
            stickied: c.stickied,
        }
    }
}
