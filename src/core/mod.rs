//! core/mod.rs
//!
//! The brain of the crate:
//! - Load a tag, carry edits (`tags`)
//! - Get the edited file onto disk, through scoped storage if needed (`storage`)
//! - Persisted root + engine knobs (`prefs`, `config`)
//!
//! No terminal or UI code lives here. Hosts plug in through
//! [`storage::Host`] and [`storage::DocumentTree`].

pub mod config;
pub mod error;
pub mod prefs;
pub mod storage;
pub mod tags;
pub mod types;
