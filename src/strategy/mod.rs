//! Strategy rule engine
//!
//! One rule family per profile, evaluated statelessly against the current
//! and previous indicator snapshots.

pub mod rules;
pub mod signal;

pub use rules::*;
pub use signal::*;
