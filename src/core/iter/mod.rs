//! Iteration over a [`CircularQueue`].
//!
//! [`Iter`] borrows the queue, so the compiler already rules out mutation
//! while it is alive. [`Cursor`] holds no borrow between steps and instead
//! snapshots the queue's version, failing on the next step once the queue
//! has been structurally changed.

use std::iter::FusedIterator;

use crate::core::error::{QueueError, Result};
use crate::core::queue::CircularQueue;

/// Borrowing front-to-back iterator, created by [`CircularQueue::iter`]
pub struct Iter<'a, T> {
    queue: &'a CircularQueue<T>,
    head: usize,
    tail: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(queue: &'a CircularQueue<T>) -> Self {
        Self {
            queue,
            head: 0,
            tail: queue.len(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.head == self.tail {
            return None;
        }
        let element = self.queue.get(self.head);
        self.head += 1;
        element
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.tail - self.head;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.head == self.tail {
            return None;
        }
        self.tail -= 1;
        self.queue.get(self.tail)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Owning iterator that drains the queue in FIFO order
pub struct IntoIter<T> {
    queue: CircularQueue<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(queue: CircularQueue<T>) -> Self {
        Self { queue }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.queue.dequeue().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len(), Some(self.queue.len()))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Position {
    BeforeStart,
    At(usize),
    Ended,
}

/// Version-checked iteration handle.
///
/// A cursor does not borrow the queue between steps: each call takes the
/// queue it was created from; passing any other queue is an
/// [`QueueError::InvalidState`]. Any enqueue, dequeue or resize after the
/// cursor was created makes the next [`move_next`](Cursor::move_next) fail
/// with [`QueueError::InvalidState`]. Several cursors over one queue
/// advance independently.
#[derive(Clone, Debug)]
pub struct Cursor<T> {
    queue_id: u64,
    version: u64,
    position: Position,
    current: Option<T>,
}

impl<T> Cursor<T> {
    pub(crate) fn new(queue: &CircularQueue<T>) -> Self {
        Self {
            queue_id: queue.id(),
            version: queue.version(),
            position: Position::BeforeStart,
            current: None,
        }
    }

    /// Element the cursor is positioned on
    pub fn current(&self) -> Result<&T> {
        match self.position {
            Position::BeforeStart => Err(QueueError::InvalidState("iteration not started".into())),
            Position::Ended => Err(QueueError::InvalidState("iteration ended".into())),
            Position::At(_) => self
                .current
                .as_ref()
                .ok_or_else(|| QueueError::InvalidState("no current element".into())),
        }
    }

    /// Rewinding is not supported. A stale cursor still reports the
    /// modification first.
    pub fn reset(&mut self, queue: &CircularQueue<T>) -> Result<()> {
        self.check_version(queue)?;
        self.position = Position::BeforeStart;
        self.current = None;
        Err(QueueError::NotSupported("cursor reset".into()))
    }

    /// Put the cursor back before the start and drop the cached element
    pub fn release(&mut self) {
        self.position = Position::BeforeStart;
        self.current = None;
    }

    fn check_version(&self, queue: &CircularQueue<T>) -> Result<()> {
        if self.queue_id != queue.id() {
            return Err(QueueError::InvalidState(
                "cursor belongs to a different queue".into(),
            ));
        }
        if self.version != queue.version() {
            return Err(QueueError::modified());
        }
        Ok(())
    }
}

impl<T: Clone> Cursor<T> {
    /// Step to the next element. Returns `Ok(false)` once past the back.
    pub fn move_next(&mut self, queue: &CircularQueue<T>) -> Result<bool> {
        self.check_version(queue)?;

        let next = match self.position {
            Position::BeforeStart => 0,
            Position::At(offset) => offset + 1,
            Position::Ended => return Ok(false),
        };

        match queue.get(next) {
            Some(element) => {
                self.current = Some(element.clone());
                self.position = Position::At(next);
                Ok(true)
            }
            None => {
                self.current = None;
                self.position = Position::Ended;
                Ok(false)
            }
        }
    }
}
