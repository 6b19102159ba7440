use std::fmt::{Display, Formatter};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::core::error::{ConfigError, Result};
use crate::core::queue::CircularQueue;

/// Kind of structural change a journal entry records
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Enqueue,
    Dequeue,
    Grow,
}

/// One recorded mutation, with the queue's shape right after the call
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry<T> {
    pub seq: u64,
    pub op: Operation,
    pub item: Option<T>, // None for Grow
    pub count: usize,
    pub capacity: usize,
    pub version: u64,
}

impl<T: std::fmt::Debug> Display for JournalEntry<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "JournalEntry {{ seq: {}, op: {:?}, item: {:?}, count: {}, capacity: {}, version: {} }}",
            self.seq, self.op, self.item, self.count, self.capacity, self.version,
        )
    }
}

/// Queue wrapper that records every mutation it forwards
#[derive(Clone, Debug)]
pub struct Journal<T> {
    queue: CircularQueue<T>,
    entries: Vec<JournalEntry<T>>,
    next_seq: u64,
}

impl<T: Clone> Journal<T> {
    pub fn new(queue: CircularQueue<T>) -> Self {
        Self {
            queue,
            entries: Vec::new(),
            next_seq: 1,
        }
    }

    /// Enqueue an item; a growth it triggers is recorded before it
    pub fn enqueue(&mut self, item: T) {
        let capacity_before = self.queue.capacity();
        self.queue.enqueue(item.clone());
        if self.queue.capacity() != capacity_before {
            self.record(Operation::Grow, None);
        }
        self.record(Operation::Enqueue, Some(item));
    }

    /// Dequeue an item; nothing is recorded when the queue is empty
    pub fn dequeue(&mut self) -> Result<T> {
        let item = self.queue.dequeue()?;
        self.record(Operation::Dequeue, Some(item.clone()));
        Ok(item)
    }

    pub fn queue(&self) -> &CircularQueue<T> {
        &self.queue
    }

    pub fn entries(&self) -> &[JournalEntry<T>] {
        &self.entries
    }

    pub fn into_parts(self) -> (CircularQueue<T>, Vec<JournalEntry<T>>) {
        (self.queue, self.entries)
    }

    fn record(&mut self, op: Operation, item: Option<T>) {
        let before = self.entries.len();
        self.entries.push(JournalEntry {
            seq: self.next_seq,
            op,
            item,
            count: self.queue.len(),
            capacity: self.queue.capacity(),
            version: self.queue.version(),
        });
        self.next_seq += 1;
        trace!("journal entry {:?} recorded", op);

        // --- journal grows by exactly one entry ---
        debug_assert_eq!(self.entries.len(), before + 1);
    }
}

/// Append entries to `path` as NDJSON, one object per line
pub fn append_entries<T: Serialize>(
    entries: &[JournalEntry<T>],
    path: impl AsRef<Path>,
) -> std::result::Result<(), ConfigError> {
    let mut file = OpenOptions::new().append(true).create(true).open(path)?;

    for entry in entries {
        let json = serde_json::to_string(entry)?;
        writeln!(file, "{}", json)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_is_recorded_before_the_enqueue() {
        let mut journal = Journal::new(CircularQueue::with_capacity(1).unwrap());
        journal.enqueue('a');
        journal.enqueue('b');

        let ops: Vec<_> = journal.entries().iter().map(|e| e.op).collect();
        assert_eq!(ops, vec![Operation::Enqueue, Operation::Grow, Operation::Enqueue]);
        assert_eq!(journal.entries()[1].capacity, 2);
        assert_eq!(journal.entries()[1].item, None);
    }

    #[test]
    fn failed_dequeue_is_not_recorded() {
        let mut journal: Journal<u32> = Journal::new(CircularQueue::new());
        assert!(journal.dequeue().is_err());
        assert!(journal.entries().is_empty());
    }

    #[test]
    fn entries_serialize_with_lowercase_ops() {
        let mut journal = Journal::new(CircularQueue::new());
        journal.enqueue(String::from("job"));
        let json = serde_json::to_string(&journal.entries()[0]).unwrap();
        assert_eq!(
            json,
            r#"{"seq":1,"op":"enqueue","item":"job","count":1,"capacity":4,"version":1}"#
        );
    }
}
