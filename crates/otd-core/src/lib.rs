//! # otd-core
//!
//! Core types and pipeline logic for the "on this day" photo archive.
//!
//! This crate provides everything that does not talk to the network:
//! - Entity structs for photos, event groups, captions, and display events
//! - Date normalization of free-text catalog metadata into canonical dates
//! - Same-day filtering and grouping by historical date
//! - Caption merging and representative photo selection
//! - The query lifecycle (`Idle → Loading → Error | NoResults | Results`),
//!   the per-session photo cache, and query sequencing
//! - The day selector and the Dutch month vocabulary
//!
//! Network access sits behind the [`source::PhotoSource`] and
//! [`source::Captioner`] traits, implemented by `otd-catalog` and
//! `otd-caption`.

pub mod assemble;
pub mod date;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod group;
pub mod markup;
pub mod responses;
pub mod selector;
pub mod session;
pub mod source;
