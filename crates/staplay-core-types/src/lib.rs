//! Core types shared across the STA Play facilities
//!
//! Canonical field keys and event names used by the logging facility
//! and by tests asserting on captured log events.

pub mod schema;
