//! Valentine proposal core
//!
//! Deterministic logic behind the "Will you be my Valentine?" page:
//! - Stage controller (attempts -> stage, mood, decline/accept appearance)
//! - Evasive placement of the decline target around the accept target
//! - Accept-target spawning once the visitor keeps declining
//! - Proposal session state machine (Proposing -> Success)
//! - Recipient parameter sanitizing and share-link building
//! - Bevy plugin wiring the session to page events

pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod placement;
pub mod plugin;
pub mod random;
pub mod recipient;
pub mod session;
pub mod share;
pub mod spawn;
pub mod stage;
