use std::path::Path;

use super::*;

fn sample() -> KnowledgeBase {
    KnowledgeBase {
        topics: vec!["rust".to_string(), "async io".to_string()],
        tone: "friendly".to_string(),
        target_audience: "backend engineers".to_string(),
        hashtags: vec![],
    }
}

#[test]
fn parse_list_trims_and_drops_blanks() {
    assert_eq!(
        parse_list(" #tech, #startups ,, #AI ,"),
        vec!["#tech", "#startups", "#AI"]
    );
}

#[test]
fn parse_list_empty_input_is_empty() {
    assert!(parse_list("").is_empty());
    assert!(parse_list(" , ,").is_empty());
}

#[test]
fn topics_clause_joins_in_order() {
    assert_eq!(sample().topics_clause(), "rust, async io");
}

#[test]
fn hashtags_clause_is_none_when_empty() {
    assert_eq!(sample().hashtags_clause(), None);
}

#[test]
fn hashtags_clause_joins_when_present() {
    let kb = KnowledgeBase {
        hashtags: vec!["#rustlang".to_string(), "#tokio".to_string()],
        ..sample()
    };
    assert_eq!(kb.hashtags_clause().as_deref(), Some("#rustlang, #tokio"));
}

#[test]
fn validate_rejects_empty_topics() {
    let kb = KnowledgeBase {
        topics: vec![],
        ..sample()
    };
    assert_eq!(kb.validate(), Err(CoreError::EmptyTopics));
}

#[test]
fn validate_rejects_blank_topics() {
    let kb = KnowledgeBase {
        topics: vec!["  ".to_string()],
        ..sample()
    };
    assert_eq!(kb.validate(), Err(CoreError::EmptyTopics));
}

#[test]
fn validate_accepts_sample() {
    assert!(sample().validate().is_ok());
}

#[test]
fn deserialize_defaults_missing_hashtags() {
    let kb: KnowledgeBase = serde_json::from_str(
        r#"{"topics":["rust"],"tone":"dry","target_audience":"devs"}"#,
    )
    .expect("deserialize");
    assert!(kb.hashtags.is_empty());
}

#[test]
fn load_example_knowledge_base_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../config/knowledge-base.example.yaml");
    let kb = load_knowledge_base(&path).expect("example file should load");
    assert!(!kb.topics.is_empty());
    assert!(!kb.tone.is_empty());
}

#[test]
fn load_missing_file_is_io_error() {
    let result = load_knowledge_base(Path::new("/nonexistent/knowledge-base.yaml"));
    assert!(
        matches!(result, Err(ConfigError::KnowledgeBaseFileIo { .. })),
        "expected KnowledgeBaseFileIo, got: {result:?}"
    );
}
