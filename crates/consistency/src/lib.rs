//! Reference inheritance and consistency checking for storyboard shots.
//!
//! [`engine::ConsistencyEngine`] resolves what a shot inherits from its
//! sequence and project bible, validates the shot against it and scores the
//! result. [`session::ConsistencySession`] layers current-selection tracking
//! on top so stale evaluations are dropped.

pub mod config;
pub mod engine;
pub mod resolver;
pub mod session;

pub use config::{ConfigError, EngineConfig};
pub use engine::{ConsistencyEngine, ConsistencyReport};
pub use resolver::{InheritanceResolver, ResolvedShot};
pub use session::{ConsistencySession, SelectionTicket};
