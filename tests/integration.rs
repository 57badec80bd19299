//! End-to-end tests for the dataset pipeline.

use convopack::config::DatasetConfig;
use convopack::core::{Contexts, make_training_examples};

fn conv(messages: &[&str]) -> Vec<String> {
    messages.iter().map(|m| (*m).to_string()).collect()
}

fn plain_config() -> DatasetConfig {
    DatasetConfig::new().with_seq_tags(false)
}

#[test]
fn empty_batch_produces_no_examples() {
    let dataset = make_training_examples(&[], &DatasetConfig::new());
    assert!(dataset.is_empty());
}

#[test]
fn zero_and_one_length_conversations_produce_no_examples() {
    let conversations = vec![conv(&[]), conv(&["single root message"])];
    let dataset = make_training_examples(&conversations, &DatasetConfig::new());
    assert!(dataset.is_empty());
}

#[test]
fn chain_of_n_produces_n_minus_one_examples() {
    let messages = ["m0", "m1", "m2", "m3", "m4"];
    let conversations = vec![conv(&messages)];
    let config = plain_config().with_combine_contexts(false);
    let dataset = make_training_examples(&conversations, &config);

    assert_eq!(dataset.len(), messages.len() - 1);
    let Contexts::Turns(contexts) = &dataset.contexts else {
        panic!("combine disabled");
    };
    for (i, response) in dataset.responses.iter().enumerate() {
        assert_eq!(response, messages[i + 1]);
        assert_eq!(contexts[i], conv(&messages[..=i]));
    }
}

#[test]
fn context_never_exceeds_configured_maximum() {
    let conversations = vec![conv(&["a0", "a1", "a2", "a3", "a4", "a5"])];
    let config = plain_config()
        .with_combine_contexts(false)
        .with_max_context_length(2);
    let dataset = make_training_examples(&conversations, &config);

    let Contexts::Turns(contexts) = &dataset.contexts else {
        panic!("combine disabled");
    };
    assert!(contexts.iter().all(|c| c.len() <= 2));
    // The node with 5 eligible ancestors keeps exactly the 2 nearest
    assert_eq!(contexts.last().unwrap(), &conv(&["a3", "a4"]));
}

#[test]
fn hyperlink_messages_respect_filter_toggle() {
    let conversations = vec![conv(&["hi", "go to www.example.com", "ok"])];

    let filtered = make_training_examples(
        &conversations,
        &plain_config().with_filter_hyperlinks(true),
    );
    assert!(filtered.responses.iter().all(|r| !r.contains("www")));

    let unfiltered = make_training_examples(&conversations, &plain_config());
    assert!(unfiltered.responses.iter().any(|r| r.contains("www")));
}

#[test]
fn boundary_markers_are_applied_exactly_once() {
    let conversations = vec![conv(&["hi", "hello", "how are you"])];
    let dataset = make_training_examples(&conversations, &DatasetConfig::new());

    assert_eq!(
        dataset.responses,
        vec!["<sos> hello <eos>", "<sos> how are you <eos>"]
    );
    for response in &dataset.responses {
        assert_eq!(response.matches("<sos>").count(), 1);
        assert_eq!(response.matches("<eos>").count(), 1);
    }
    assert_eq!(
        dataset.contexts,
        Contexts::Joined(vec![
            "<sos> hi <eos>".to_string(),
            "<sos> hi <eos> <sos> hello <eos>".to_string(),
        ])
    );
}

#[test]
fn combined_contexts_equal_space_joined_turns() {
    let conversations = vec![conv(&["one", "two", "three", "four"])];

    let combined = make_training_examples(&conversations, &plain_config());
    let split = make_training_examples(
        &conversations,
        &plain_config().with_combine_contexts(false),
    );

    let Contexts::Joined(joined) = &combined.contexts else {
        panic!("combine enabled");
    };
    let Contexts::Turns(turns) = &split.contexts else {
        panic!("combine disabled");
    };
    for (j, t) in joined.iter().zip(turns) {
        assert_eq!(j, &t.join(" "));
    }
}

#[test]
fn greeting_chain_scenario() {
    let conversations = vec![conv(&["hi", "hello", "how are you"])];
    let dataset = make_training_examples(&conversations, &plain_config());

    assert_eq!(
        dataset.contexts,
        Contexts::Joined(vec!["hi".to_string(), "hi hello".to_string()])
    );
    assert_eq!(dataset.responses, vec!["hello", "how are you"]);
}

#[cfg(feature = "messenger")]
mod messenger_pipeline {
    use super::*;
    use std::fs;
    use std::path::Path;

    use convopack::config::MessengerConfig;
    use convopack::extractors::MessengerExtractor;

    fn write_conversation(export_root: &Path, folder: &str, json: &str) {
        let dir = export_root.join("inbox").join(folder);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("message_1.json"), json).unwrap();
    }

    fn seed_export(root: &Path) {
        write_conversation(
            root,
            "alice_abc123",
            r#"{
                "participants": [{"name": "Alice"}, {"name": "Me"}],
                "messages": [
                    {"sender_name": "Me", "timestamp_ms": 3000, "content": "how are you"},
                    {"sender_name": "Alice", "timestamp_ms": 2000, "content": "hello"},
                    {"sender_name": "Me", "timestamp_ms": 1000, "content": "hi"}
                ]
            }"#,
        );
        write_conversation(
            root,
            "bob_def456",
            r#"{
                "participants": [{"name": "Bob"}, {"name": "Me"}],
                "messages": [
                    {"sender_name": "Bob", "timestamp_ms": 2000, "content": "not much"},
                    {"sender_name": "Me", "timestamp_ms": 1000, "content": "what's up"}
                ]
            }"#,
        );
    }

    #[test]
    fn export_to_dataset_end_to_end() {
        let tmp = tempfile::TempDir::new().unwrap();
        seed_export(tmp.path());

        let conversations = MessengerExtractor::new(tmp.path()).extract().unwrap();
        assert_eq!(conversations.len(), 2);

        let dataset = make_training_examples(&conversations, &plain_config());
        // 3-message chain gives 2 examples, 2-message chain gives 1
        assert_eq!(dataset.len(), 3);
        assert!(dataset.responses.contains(&"not much".to_string()));
        assert!(dataset.responses.contains(&"how are you".to_string()));
    }

    #[cfg(feature = "json-output")]
    #[test]
    fn export_to_jsonl_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        seed_export(tmp.path());

        let conversations = MessengerExtractor::with_config(
            tmp.path(),
            MessengerConfig::new().with_max_participants(2),
        )
        .extract()
        .unwrap();
        let dataset = make_training_examples(&conversations, &DatasetConfig::new());

        let out = tmp.path().join("pairs.jsonl");
        convopack::core::write_jsonl(&dataset, out.to_str().unwrap()).unwrap();

        let content = fs::read_to_string(&out).unwrap();
        assert_eq!(content.lines().count(), dataset.len());
        for line in content.lines() {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value["response"].as_str().unwrap().starts_with("<sos> "));
        }
    }
}
