//! Leaf data modules: raw storage and the pure pipeline stages.

pub mod axis;
pub mod outlier;
pub mod sample;
pub mod smooth;
pub mod store;
pub mod tooltip;
