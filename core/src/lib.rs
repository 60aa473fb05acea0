//! Hotel Manager simulation core.
//!
//! `engine::HotelEngine` owns the hotel's state and is the only thing that
//! mutates it. Everything else here supports it: the state schema,
//! configuration, the SQLite save store, events, player commands, and the
//! traits a presentation host implements.

pub mod clock;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod host;
pub mod name_generator;
pub mod rng;
pub mod snapshot;
pub mod state;
pub mod store;
pub mod types;
