//! Portfolio management module
//!
//! Positions, the run-scoped capital ledger, and risk sizing.

pub mod ledger;
pub mod position;
pub mod sizer;

pub use ledger::*;
pub use position::*;
pub use sizer::*;
