use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, trace};

use crate::core::error::{QueueError, Result};
use crate::core::iter::{Cursor, IntoIter, Iter};

/// Capacity used by [`CircularQueue::new`]
pub const DEFAULT_CAPACITY: usize = 4;

static QUEUE_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// FIFO queue over a circular buffer that doubles when full.
///
/// Live elements sit in `front..front + count`, wrapping modulo the buffer
/// length. Every slot outside that range is `None`.
pub struct CircularQueue<T> {
    id: u64,
    elements: Box<[Option<T>]>,
    count: usize,
    front: usize,
    version: u64,
}

impl<T> CircularQueue<T> {
    /// Create a new, empty queue with the default capacity
    pub fn new() -> Self {
        Self::allocate(DEFAULT_CAPACITY)
    }

    /// Create an empty queue with room for `capacity` elements.
    ///
    /// Fails with [`QueueError::InvalidArgument`] if `capacity` is negative.
    pub fn with_capacity(capacity: isize) -> Result<Self> {
        let capacity = check_capacity(capacity)?;
        Ok(Self::allocate(capacity))
    }

    /// Create a queue holding the elements of `source` in iteration order.
    ///
    /// Fails with [`QueueError::NullReference`] if `source` is `None`.
    pub fn from_source<I>(source: Option<I>) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let source = check_source(source)?;
        let mut queue = Self::new();
        queue.extend(source);
        Ok(queue)
    }

    fn allocate(capacity: usize) -> Self {
        Self {
            id: next_id(),
            elements: empty_slots(capacity),
            count: 0,
            front: 0,
            version: 0,
        }
    }

    /// Enqueue an item, growing the buffer first if it is full
    pub fn enqueue(&mut self, element: T) {
        if self.count == self.capacity() {
            self.grow();
        }

        let back = self.back_index();
        self.elements[back] = Some(element);
        self.count += 1;
        self.bump_version();
        trace!("enqueued at slot {} (count {})", back, self.count);

        // --post operation assertion
        debug_assert!(self.count <= self.capacity(), "count must never exceed capacity");
    }

    /// Remove and return the front item
    pub fn dequeue(&mut self) -> Result<T> {
        self.check_not_empty()?;

        let slot = self.front;
        let element = self.elements[slot].take().ok_or_else(QueueError::empty)?;
        self.front = (self.front + 1) % self.capacity();
        self.count -= 1;
        self.bump_version();
        trace!("dequeued from slot {} (count {})", slot, self.count);

        Ok(element)
    }

    /// Borrow the front item without removing it
    pub fn peek(&self) -> Result<&T> {
        self.check_not_empty()?;
        self.get(0).ok_or_else(QueueError::empty)
    }

    /// Dequeue until empty, keeping the current capacity
    pub fn clear(&mut self) {
        let removed = self.count;
        while self.dequeue().is_ok() {}
        debug!("cleared {} elements", removed);
    }

    /// Number of elements currently in the queue
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Length of the backing buffer
    pub fn capacity(&self) -> usize {
        self.elements.len()
    }

    /// Slot holding the front element
    pub fn front_index(&self) -> usize {
        self.front
    }

    /// Slot the next enqueued element will land in
    pub fn back_index(&self) -> usize {
        match self.capacity() {
            0 => 0,
            capacity => (self.front + self.count) % capacity,
        }
    }

    /// Structural mutation stamp, see [`Cursor`]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Linear scan, front to back
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|element| element == item)
    }

    /// Borrowing iterator, front to back
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Detached iteration handle that reports mutations made after its creation
    pub fn cursor(&self) -> Cursor<T> {
        Cursor::new(self)
    }

    /// Identity shared by this queue and the cursors it hands out
    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    /// Element at logical position `offset` (0 is the front)
    pub(crate) fn get(&self, offset: usize) -> Option<&T> {
        if offset >= self.count {
            return None;
        }
        self.elements[self.slot(offset)].as_ref()
    }

    // only valid while offset < count, which implies a non-empty buffer
    fn slot(&self, offset: usize) -> usize {
        (self.front + offset) % self.capacity()
    }

    fn grow(&mut self) {
        let old_capacity = self.capacity();
        let new_capacity = old_capacity.max(1) * 2;

        let mut elements = empty_slots(new_capacity);
        for (offset, target) in elements.iter_mut().enumerate().take(self.count) {
            let slot = self.slot(offset);
            *target = self.elements[slot].take();
        }

        self.elements = elements;
        self.front = 0;
        self.bump_version();
        debug!("grew queue from {} to {} slots", old_capacity, new_capacity);
    }

    fn bump_version(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    fn check_not_empty(&self) -> Result<()> {
        if self.count == 0 {
            return Err(QueueError::empty());
        }
        Ok(())
    }
}

fn next_id() -> u64 {
    QUEUE_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

fn empty_slots<T>(capacity: usize) -> Box<[Option<T>]> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}

fn check_capacity(capacity: isize) -> Result<usize> {
    usize::try_from(capacity).map_err(|_| {
        QueueError::InvalidArgument(format!("capacity can't be negative, got {}", capacity))
    })
}

fn check_source<I>(source: Option<I>) -> Result<I> {
    source.ok_or_else(|| QueueError::NullReference("source collection is required".into()))
}

// a clone is a distinct queue, so cursors of the original must not accept it
impl<T: Clone> Clone for CircularQueue<T> {
    fn clone(&self) -> Self {
        Self {
            id: next_id(),
            elements: self.elements.clone(),
            count: self.count,
            front: self.front,
            version: self.version,
        }
    }
}

impl<T> Default for CircularQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for CircularQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for CircularQueue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for CircularQueue<T> {}

impl<T> Extend<T> for CircularQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.enqueue(element);
        }
    }
}

impl<T> FromIterator<T> for CircularQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

impl<'a, T> IntoIterator for &'a CircularQueue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for CircularQueue<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}
