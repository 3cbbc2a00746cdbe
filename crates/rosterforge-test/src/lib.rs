//! Shared test fixtures for RosterForge crates.
//!
//! This crate provides builders for the engine's input records. All
//! timestamps fall on a fixed event day, [`EVENT_DAY`], so hour numbers are
//! enough to describe a slot.
//!
//! - [`time`] - timestamps, intervals and slot grids
//! - [`domain`] - roles, volunteers and friend links
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! rosterforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use rosterforge_test::{interval, role, volunteer, window};
//! ```

pub mod domain;
pub mod time;

pub use domain::{friends, role, volunteer};
pub use time::{at, interval, on, span, window, EVENT_DAY};
