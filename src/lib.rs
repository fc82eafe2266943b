mod error;
mod filters;
mod config;
mod util;
mod progress;

mod client;
mod tree;
mod records;
mod collector;

mod table;
mod store;
mod merge;

pub use crate::error::CollectError;
pub use crate::filters::{effective_window, PostFilter, TimeWindow};
pub use crate::config::CollectOptions;

pub use crate::client::{Comment, Listing, RedditClient, Submission};
pub use crate::tree::{flatten, resolve_placeholders, CommentNode, MoreComments, ResolveLimit};
pub use crate::records::{CommentRecord, PostRecord, Record};
pub use crate::collector::{CollectedData, DataCollector};

// Tabular layer: conversion, persistence, and the history merge engine.
pub use crate::table::{to_table, to_tables, Table};
pub use crate::store::{NdjsonStore, TableStore};
pub use crate::merge::{merge_tables, update_data, update_stored, DEFAULT_DEDUP_KEY, DEFAULT_SORT_FIELD};

// Expose progress helpers so applications can reuse the same bars.
pub use crate::progress::ProgressScope;

// Robust file ops, re-exported for binaries that persist tables themselves.
pub use crate::util::{init_tracing_once, replace_file_atomic};
