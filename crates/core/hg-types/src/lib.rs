//! Core types for hourglass.
//!
//! This crate defines the data shared by the scanner, outputs and CLI:
//! - [`Slot`] / [`SlotRecord`] - one topic's files for one hour
//! - [`HourInterval`] - an inclusive, hour-floored time range
//! - [`TopicSources`] - per-topic root directory configuration

pub mod interval;
pub mod slot;
pub mod sources;

pub use interval::{HourInterval, floor_to_hour, hour_path, parse_timestamp};
pub use slot::{EVENT_COUNT_FIELD, Slot, SlotRecord, event_count, pattern_for};
pub use sources::{InputSpec, RootSpec, TopicConfig, TopicSources, strip_scheme};
