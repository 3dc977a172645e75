//! Event primitives and event types used by the helpers.
//!
//! Submodules:
//! - [`signal`] – typed publish/subscribe list backing every handler table
//! - [`observable`] – values that fire a signal when they change
//! - [`statechange`] – ECS event triggered on every behavior state transition
pub mod observable;
pub mod signal;
pub mod statechange;
