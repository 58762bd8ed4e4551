//! Domain rules shared by the persistence and HTTP layers.
//!
//! Nothing in this crate touches the database or the network; every
//! function here is deterministic apart from quote-number generation.

pub mod attendance;
pub mod calendar;
pub mod error;
pub mod permissions;
pub mod price_list;
pub mod quotation;
pub mod types;
pub mod uploads;
