pub mod core;

pub use crate::core::{
    error::{QueueError, Result},
    iter::Cursor,
    queue::CircularQueue,
};
