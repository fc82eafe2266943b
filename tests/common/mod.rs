use anyhow::Result;
use redsamp::{
    Comment, CommentNode, Listing, MoreComments, PostFilter, RedditClient, Submission, Table,
    TimeWindow,
};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;

/// Scripted platform client. Every call is counted so tests can assert that
/// pre-flight failures perform no traversal, and the last listing arguments
/// are recorded so tests can observe what actually went over the wire.
#[derive(Default)]
pub struct MockClient {
    /// (canonical display name, ranked listing) per subreddit.
    pub subs: Vec<(String, Vec<Submission>)>,
    /// post id -> comment forest; ids absent here "no longer resolve".
    pub trees: HashMap<String, Vec<CommentNode>>,
    /// placeholder token (first child id) -> replacement nodes.
    pub more: HashMap<String, Vec<CommentNode>>,

    pub search_calls: RefCell<u32>,
    pub listing_calls: RefCell<u32>,
    pub tree_calls: RefCell<u32>,
    pub more_calls: RefCell<u32>,
    #[allow(clippy::type_complexity)]
    pub last_listing: RefCell<Option<(String, PostFilter, Option<u32>, Option<TimeWindow>)>>,
}

impl MockClient {
    pub fn with_sub(mut self, name: &str, posts: Vec<Submission>) -> Self {
        self.subs.push((name.to_string(), posts));
        self
    }

    pub fn with_tree(mut self, post_id: &str, nodes: Vec<CommentNode>) -> Self {
        self.trees.insert(post_id.to_string(), nodes);
        self
    }

    pub fn with_more(mut self, token: &str, nodes: Vec<CommentNode>) -> Self {
        self.more.insert(token.to_string(), nodes);
        self
    }

    pub fn traversal_calls(&self) -> u32 {
        *self.listing_calls.borrow() + *self.tree_calls.borrow() + *self.more_calls.borrow()
    }
}

impl RedditClient for MockClient {
    fn search_by_name(&self, query: &str) -> Result<Vec<String>> {
        *self.search_calls.borrow_mut() += 1;
        // Name search returns near-matches too; the canonical name is first.
        let q = query.to_lowercase();
        let mut names: Vec<String> = self
            .subs
            .iter()
            .filter(|(name, _)| name.to_lowercase().starts_with(&q))
            .map(|(name, _)| name.clone())
            .collect();
        names.sort_by_key(|n| n.len());
        Ok(names)
    }

    fn ranked_listing<'a>(
        &'a self,
        subreddit: &str,
        filter: PostFilter,
        limit: Option<u32>,
        window: Option<TimeWindow>,
    ) -> Result<Listing<'a>> {
        *self.listing_calls.borrow_mut() += 1;
        *self.last_listing.borrow_mut() =
            Some((subreddit.to_string(), filter, limit, window));
        let posts: Vec<Submission> = self
            .subs
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(subreddit))
            .map(|(_, posts)| posts.clone())
            .unwrap_or_default();
        let take = limit.map(|n| n as usize).unwrap_or(posts.len());
        Ok(Box::new(posts.into_iter().take(take).map(Ok)))
    }

    fn comment_tree(&self, post_id: &str) -> Result<Option<Vec<CommentNode>>> {
        *self.tree_calls.borrow_mut() += 1;
        Ok(self.trees.get(post_id).cloned())
    }

    fn resolve_more(&self, _post_id: &str, more: &MoreComments) -> Result<Vec<CommentNode>> {
        *self.more_calls.borrow_mut() += 1;
        let token = more.children.first().map(String::as_str).unwrap_or("");
        Ok(self.more.get(token).cloned().unwrap_or_default())
    }
}

// -------- fixture builders --------

pub fn submission(subreddit: &str, id: &str) -> Submission {
    Submission {
        subreddit: subreddit.to_string(),
        created_utc: 1_600_000_000.0,
        id: id.to_string(),
        is_original_content: false,
        is_self: false,
        link_flair_text: None,
        locked: false,
        num_comments: 0,
        over_18: false,
        score: 1,
        spoiler: false,
        stickied: false,
        title: format!("post {}", id),
        upvote_ratio: 0.9,
        url: format!("https://example.com/{}", id),
    }
}

pub fn comment(id: &str, link_id: &str, parent_id: &str) -> Comment {
    Comment {
        id: id.to_string(),
        link_id: link_id.to_string(),
        parent_id: parent_id.to_string(),
        body: format!("body {}", id),
        created_utc: 1_600_000_100.0,
        is_submitter: false,
        score: 1,
        stickied: false,
    }
}

pub fn cnode(c: Comment, replies: Vec<CommentNode>) -> CommentNode {
    CommentNode::Comment { comment: c, replies }
}

pub fn more(count: u64, token: &str) -> CommentNode {
    CommentNode::More(MoreComments {
        count,
        children: vec![token.to_string()],
    })
}

/// Build a small table from literal rows.
pub fn table(columns: &[&str], rows: &[Vec<Value>]) -> Table {
    let mut t = Table::new(columns.iter().map(|c| c.to_string()).collect());
    for row in rows {
        t.push_row(row.clone()).unwrap();
    }
    t
}

/// Column values of one table column, for order assertions.
pub fn column_values(t: &Table, column: &str) -> Vec<Value> {
    (0..t.len())
        .map(|i| t.value(i, column).unwrap().clone())
        .collect()
}
