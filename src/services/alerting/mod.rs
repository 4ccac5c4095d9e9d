//! Outbound alert queue.
//!
//! Every producer (checkers and the command interface) holds a clone of the [`AlertSink`].
//! A single [`AlertPublisher`] drains the queue and hands each alert to the notifier, which
//! makes it the only point of egress towards the operator channel.

mod error;
mod publisher;
mod sink;

pub use error::SinkError;
pub use publisher::{AlertPublisher, PublisherStats};
pub use sink::AlertSink;
