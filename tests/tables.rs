#[path = "common/mod.rs"]
mod common;

use common::*;
use redsamp::{to_table, to_tables, CommentRecord, DataCollector, PostRecord, Record, Table};
use serde_json::json;

#[test]
fn tables_are_rectangular_with_nullable_fields_as_nulls() {
    let mut s1 = submission("pics", "p1");
    s1.link_flair_text = None;
    let mut s2 = submission("pics", "p2");
    s2.link_flair_text = Some("OC".to_string());

    let records = vec![PostRecord::from(&s1), PostRecord::from(&s2)];
    let t = Table::from_records(&records).unwrap();

    assert_eq!(t.columns().len(), PostRecord::COLUMNS.len());
    assert_eq!(t.value(0, "link_flair_text"), Some(&json!(null)));
    assert_eq!(t.value(1, "link_flair_text"), Some(&json!("OC")));
    assert!(t.rows().iter().all(|r| r.len() == t.columns().len()));
}

#[test]
fn concatenation_preserves_within_target_order() {
    let per_target = vec![
        (
            "pics".to_string(),
            vec![
                PostRecord::from(&submission("pics", "p1")),
                PostRecord::from(&submission("pics", "p2")),
            ],
        ),
        (
            "funny".to_string(),
            vec![PostRecord::from(&submission("funny", "f1"))],
        ),
    ];

    let t = to_table(&per_target).unwrap();
    assert_eq!(
        column_values(&t, "id"),
        vec![json!("p1"), json!("p2"), json!("f1")]
    );
    assert_eq!(
        column_values(&t, "subreddit_name"),
        vec![json!("pics"), json!("pics"), json!("funny")]
    );
}

#[test]
fn per_target_tables_come_back_in_request_order() {
    let per_target = vec![
        (
            "pics".to_string(),
            vec![PostRecord::from(&submission("pics", "p1"))],
        ),
        (
            "funny".to_string(),
            vec![PostRecord::from(&submission("funny", "f1"))],
        ),
    ];

    let tables = to_tables(&per_target).unwrap();
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0].0, "pics");
    assert_eq!(tables[1].0, "funny");
    assert_eq!(tables[0].1.len(), 1);
    assert_eq!(tables[1].1.value(0, "id"), Some(&json!("f1")));
}

#[test]
fn comment_tables_carry_the_comment_schema() {
    let rec = CommentRecord::from_comment("pics", &comment("c1", "t3_p1", "t3_p1"));
    let t = Table::from_records(&[rec]).unwrap();

    assert_eq!(t.columns().len(), CommentRecord::COLUMNS.len());
    assert_eq!(t.value(0, "post_id"), Some(&json!("t3_p1")));
    assert_eq!(t.value(0, "top_level_comment"), Some(&json!(true)));
}

#[test]
fn collected_data_converts_to_tables_end_to_end() {
    let client = MockClient::default()
        .with_sub("pics", vec![submission("pics", "p1")])
        .with_sub("funny", vec![submission("funny", "f1")])
        .with_tree("p1", vec![cnode(comment("c1", "t3_p1", "t3_p1"), vec![])])
        .with_tree("f1", vec![cnode(comment("c2", "t3_f1", "t3_f1"), vec![])]);

    let data = DataCollector::new(client)
        .progress(false)
        .get_data(&["pics", "funny"])
        .unwrap();

    let posts = data.posts_table().unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(
        column_values(&posts, "subreddit_name"),
        vec![json!("pics"), json!("funny")]
    );

    let comments = data.comments_table().unwrap().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(
        column_values(&comments, "subreddit_name"),
        vec![json!("pics"), json!("funny")]
    );

    let per_target = data.posts_tables().unwrap();
    assert_eq!(per_target[0].0, "pics");
    assert_eq!(per_target[1].0, "funny");
}

#[test]
fn push_row_rejects_ragged_rows() {
    let mut t = Table::new(vec!["a".to_string(), "b".to_string()]);
    assert!(t.push_row(vec![json!(1)]).is_err());
    assert!(t.push_row(vec![json!(1), json!(2)]).is_ok());
}
