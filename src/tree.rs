//! Comment forest representation and the bounded "load more" expansion.
//!
//! The platform returns comment trees with deferred placeholder nodes in
//! place of comments it did not inline. Resolution is an explicit iterative
//! expansion with an auditable budget, so the cost of a collection run is
//! predictable and the whole mechanic is testable without network access.

use crate::client::{Comment, RedditClient};
use anyhow::Result;

/// One entry in a comment forest: either a resolved comment with its reply
/// subtree, or an unresolved placeholder standing in for comments the
/// platform did not return inline.
#[derive(Clone, Debug, PartialEq)]
pub enum CommentNode {
    Comment {
        comment: Comment,
        replies: Vec<CommentNode>,
    },
    More(MoreComments),
}

/// A deferred "load more comments" node: how many comments it hides and the
/// ids needed to fetch them.
#[derive(Clone, Debug, PartialEq)]
pub struct MoreComments {
    pub count: u64,
    pub children: Vec<String>,
}

/// Budget for placeholder expansion per comment tree.
/// `Max(0)` keeps only directly returned comments; `Unlimited` keeps
/// resolving until no placeholder remains, however many round-trips it takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolveLimit {
    Unlimited,
    Max(u32),
}

impl Default for ResolveLimit {
    fn default() -> Self {
        ResolveLimit::Max(0)
    }
}

struct Budget {
    remaining: Option<u32>, // None = unlimited
}

impl Budget {
    fn new(limit: ResolveLimit) -> Self {
        let remaining = match limit {
            ResolveLimit::Unlimited => None,
            ResolveLimit::Max(n) => Some(n),
        };
        Self { remaining }
    }

    /// Consume one expansion if any budget remains.
    fn take(&mut self) -> bool {
        match &mut self.remaining {
            None => true,
            Some(0) => false,
            Some(n) => {
                *n -= 1;
                true
            }
        }
    }
}

/// Expand placeholders in depth-first encounter order until the budget runs
/// out, then drop whatever placeholders remain. Resolved children are spliced
/// in place and re-examined, since they may carry placeholders of their own.
pub fn resolve_placeholders<C: RedditClient + ?Sized>(
    client: &C,
    post_id: &str,
    nodes: &mut Vec<CommentNode>,
    limit: ResolveLimit,
) -> Result<()> {
    let mut budget = Budget::new(limit);
    resolve_nodes(client, post_id, nodes, &mut budget)
}

fn resolve_nodes<C: RedditClient + ?Sized>(
    client: &C,
    post_id: &str,
    nodes: &mut Vec<CommentNode>,
    budget: &mut Budget,
) -> Result<()> {
    let mut i = 0;
    while i < nodes.len() {
        match &mut nodes[i] {
            CommentNode::Comment { replies, .. } => {
                resolve_nodes(client, post_id, replies, budget)?;
                i += 1;
            }
            CommentNode::More(more) => {
                if budget.take() {
                    let children = client.resolve_more(post_id, more)?;
                    tracing::debug!(
                        "resolved placeholder on {} into {} node(s)",
                        post_id,
                        children.len()
                    );
                    // Splice in place and re-examine from the same index.
                    nodes.splice(i..=i, children);
                } else {
                    nodes.remove(i);
                }
            }
        }
    }
    Ok(())
}

/// Flatten a resolved forest into comment references.
///
/// With `include_replies`, the order is depth-first: a top-level comment,
/// then its entire reply subtree, then the next sibling. Without it, only
/// the top-level set is kept. Leftover placeholders are skipped.
pub fn flatten(nodes: &[CommentNode], include_replies: bool) -> Vec<&Comment> {
    let mut out = Vec::new();
    for node in nodes {
        if let CommentNode::Comment { comment, replies } = node {
            out.push(comment);
            if include_replies {
                flatten_into(replies, &mut out);
            }
        }
    }
    out
}

fn flatten_into<'a>(nodes: &'a [CommentNode], out: &mut Vec<&'a Comment>) {
    for node in nodes {
        if let CommentNode::Comment { comment, replies } = node {
            out.push(comment);
            flatten_into(replies, out);
        }
    }
}
