//! Validated configuration structs.
//!
//! [`PoolParams`] holds the per-pool fees and optional weight schedule
//! fixed at creation; [`ModuleParams`] holds the engine-wide parameters
//! (currently the pool-creation fee) and can be loaded from TOML.

mod module_params;
mod pool_params;

pub use module_params::ModuleParams;
pub use pool_params::{PoolParams, SmoothWeightChange};
