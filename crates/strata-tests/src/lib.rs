//! Integration and adversarial test suite for the Strata reorg guard.
//!
//! The tests in `tests/` drive the checkpoint tables, the sync horizon, and
//! the shared block index together, from both an honest node's and an
//! attacker's perspective.

pub mod helpers;
