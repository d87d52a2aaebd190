//! odds-bayes math utilities.

pub mod math;

pub use math::stable::*;
pub use math::odds::*;
pub use math::bayes_factor;
