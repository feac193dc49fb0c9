use nlp_core::{
    generate_context, Conversation, LexiconSegmenter, Message, MessageAnalysisContext,
    MessageAnalyzer, NlpEngine, StopWordSet, WhitespaceSegmenter,
};
use std::collections::{BTreeSet, HashMap};

fn msg(id: i64, ts: i64, content: &str) -> Message {
    Message::new(id, ts, "alice", "bob", content)
}

fn english_engine() -> NlpEngine {
    let stop_words: StopWordSet = ["the", "a", "is", "i", "we"].into_iter().collect();
    NlpEngine::with_stop_words(Box::new(WhitespaceSegmenter), stop_words)
}

#[test]
fn chinese_chat_is_grouped_by_shared_keywords() {
    let segmenter = LexiconSegmenter::new(["苹果", "香蕉", "天气"].into_iter().collect());
    let mut engine = NlpEngine::new(Box::new(segmenter));
    engine.add_stop_words(["这", "是", "不", "那", "今天"]);

    let messages = vec![
        msg(0, 100, "这是苹果"),
        msg(1, 200, "苹果不是香蕉"),
        msg(2, 700, "那是香蕉"),
        msg(3, 1300, "天气"),
        msg(4, 1400, "天气不好"),
    ];
    let context = MessageAnalysisContext::new(Default::default(), 600)
        .with_keyword_limit(5)
        .with_min_messages_per_conversation(2);

    let result = MessageAnalyzer::new(&engine)
        .merge_messages_and_compute_keywords(&messages, &context)
        .unwrap();

    assert_eq!(result.len(), 2);
    assert_eq!(result[0].message_count(), 3);
    assert_eq!(result[0].start_timestamp_seconds, 100);
    assert_eq!(result[0].end_timestamp_seconds, 700);
    assert_eq!(result[0].keywords[0].word, "苹果");
    assert_eq!(result[1].message_count(), 2);
    assert_eq!(result[1].keywords[0].word, "天气");
}

#[test]
fn chained_merge_outcome_does_not_depend_on_passes() {
    let engine = english_engine();
    // A-B share "rust", B-C share "cargo"; A and C share nothing.
    let messages = vec![
        msg(0, 0, "rust lifetimes"),
        msg(1, 600, "rust cargo"),
        msg(2, 1200, "cargo workspaces"),
    ];
    let context = MessageAnalysisContext::new(Default::default(), 600);
    let result = MessageAnalyzer::new(&engine)
        .merge_messages_and_compute_keywords(&messages, &context)
        .unwrap();

    assert_eq!(result.len(), 1);
    let ids: BTreeSet<i64> = result[0].messages.iter().map(|m| m.id).collect();
    assert_eq!(ids, BTreeSet::from([0, 1, 2]));
    assert_eq!(result[0].start_timestamp_seconds, 0);
    assert_eq!(result[0].end_timestamp_seconds, 1200);
}

#[test]
fn zero_threshold_collapses_everything() {
    let engine = english_engine();
    let messages: Vec<Message> = (0..6).map(|i| msg(i, i * 1000, &format!("topic{}", i))).collect();
    let context = MessageAnalysisContext::new(Default::default(), 600)
        .with_common_keyword_threshold(0);
    let result = MessageAnalyzer::new(&engine)
        .merge_messages_and_compute_keywords(&messages, &context)
        .unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].message_count(), 6);
    assert_eq!(result[0].keyword_count(), 6);
}

#[test]
fn weighted_context_flows_into_conversation_keywords() {
    let engine = english_engine();
    let corpus = HashMap::from([
        ("hello".to_string(), 90u64),
        ("borrowck".to_string(), 10u64),
    ]);
    let frequency_context = generate_context(&corpus).unwrap();
    let messages = vec![msg(0, 10, "hello hello borrowck"), msg(1, 20, "hello")];
    let context = MessageAnalysisContext::new(frequency_context, 600);

    let result: Vec<Conversation> = MessageAnalyzer::new(&engine)
        .merge_messages_and_compute_keywords(&messages, &context)
        .unwrap();

    assert_eq!(result.len(), 1);
    let keywords = &result[0].keywords;
    assert_eq!(keywords[0].word, "borrowck");
    assert!((keywords[0].score - 10.0f64.ln()).abs() < 1e-9);
    assert_eq!(keywords[1].word, "hello");
    assert_eq!(keywords[1].count, 3);
    assert!((keywords[1].score - 3.0 * (100.0f64 / 90.0).ln()).abs() < 1e-9);
}

#[test]
fn keyword_info_without_corpus_equals_counts() {
    let engine = english_engine();
    let words: Vec<String> = ["x", "y", "x", "z", "x", "y"].iter().map(|s| s.to_string()).collect();
    for info in engine.keyword_info(&words, &Default::default(), 0) {
        assert_eq!(info.score, info.count as f64);
    }
}

#[test]
fn conversation_json_shape() {
    let engine = english_engine();
    let request = r#"{
        "messages": [
            {"id": 1, "timestamp_seconds": 5, "from_user_id": "u0", "to_user_id": "u1", "content": "ship it"},
            {"id": 2, "timestamp_seconds": 9, "content": "ship tonight"}
        ],
        "context": {"time_bucket_seconds": 600, "keyword_limit": 2}
    }"#;
    #[derive(serde::Deserialize)]
    struct Request {
        messages: Vec<Message>,
        context: MessageAnalysisContext,
    }
    let request: Request = serde_json::from_str(request).unwrap();
    let result = MessageAnalyzer::new(&engine)
        .merge_messages_and_compute_keywords(&request.messages, &request.context)
        .unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json[0]["keywords"][0]["word"], "ship");
    assert_eq!(json[0]["keywords"].as_array().unwrap().len(), 2);
    assert_eq!(json[0]["num_words"], 4);
}
