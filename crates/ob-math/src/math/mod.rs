//! Core math modules.

pub mod stable;
pub mod odds;
pub mod bayes_factor;
