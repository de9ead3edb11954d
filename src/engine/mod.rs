// Async sequencing of per-title work: ordered listing and persistence fan-out.

pub mod listing;
pub mod persist;
pub mod sequencer;
