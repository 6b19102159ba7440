use std::fs;

use CircularQueueMini::core::config::QueueConfig;
use CircularQueueMini::core::journal::{Journal, JournalEntry, Operation, append_entries};

#[test]
fn test_journal_appends_ndjson() {
    let path = std::env::temp_dir().join(format!("circular-queue-journal-{}.ndjson", std::process::id()));
    let _ = fs::remove_file(&path);

    let config = QueueConfig::from_json_str(r#"{"initial_capacity": 2}"#).unwrap();
    let mut journal = Journal::new(config.build_queue::<String>().unwrap());
    journal.enqueue("a".to_string());
    journal.enqueue("b".to_string());
    journal.enqueue("c".to_string());
    assert_eq!(journal.dequeue().unwrap(), "a");

    append_entries(journal.entries(), &path).unwrap();
    append_entries(journal.entries(), &path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let entries: Vec<JournalEntry<String>> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    let _ = fs::remove_file(&path);

    assert_eq!(entries.len(), 10);
    assert_eq!(entries[..5], journal.entries()[..]);

    let ops: Vec<_> = entries[..5].iter().map(|e| e.op).collect();
    assert_eq!(
        ops,
        vec![
            Operation::Enqueue,
            Operation::Enqueue,
            Operation::Grow,
            Operation::Enqueue,
            Operation::Dequeue,
        ]
    );
    assert_eq!(entries[4].count, 2);
    assert_eq!(entries[4].capacity, 4);
}

#[test]
fn test_journal_into_parts() {
    let mut journal = Journal::new(QueueConfig::default().build_queue().unwrap());
    journal.enqueue(1u8);
    let (queue, entries) = journal.into_parts();
    assert_eq!(queue.len(), 1);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].seq, 1);
}
