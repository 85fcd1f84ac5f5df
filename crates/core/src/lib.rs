//! Domain model and pure consistency logic for Shotline.
//!
//! Nothing in this crate performs I/O except through the
//! [`store::ReferenceStore`] trait, which callers implement.

pub mod bible;
pub mod consistency;
pub mod error;
pub mod reference;
pub mod shot;
pub mod store;
pub mod types;
