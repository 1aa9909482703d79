pub mod application;
pub mod cli;
pub mod domain;
pub mod io;
pub mod storage;
pub mod web;

pub use domain::*;
pub use storage::SnapshotStore;
