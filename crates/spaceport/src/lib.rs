//! `spaceport` - A small web service tracking spaceflight companies, rockets and launches
//!
//! This library provides the `SQLite` storage layer, the record types and the
//! axum router serving both a JSON API and HTML listing pages.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod record;
pub mod server;
pub mod storage;
pub mod timecodec;

pub use config::Config;
pub use error::{Entity, Error, Result};
pub use logging::init_logging;
pub use record::{Company, Launch, Rocket};
pub use server::AppState;
pub use storage::{SeedReport, Storage, StorageStats};
