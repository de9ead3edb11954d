//! In-memory book library served over HTTP.
//!
//! Mutations go straight to the [`store::library::Library`]; listing and
//! persistence are sequenced by [`engine::sequencer::Sequencer`].

pub mod config;
pub mod engine;
pub mod error;
pub mod server;
pub mod storage;
pub mod store;
pub mod telemetry;
