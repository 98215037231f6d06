//! # strata-core
//! Foundation types, the block index arena, and the chain view trait for
//! the Strata node.

pub mod block_index;
pub mod constants;
pub mod error;
pub mod traits;
pub mod types;
