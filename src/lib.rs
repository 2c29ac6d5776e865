//! patchbay - run named patch recipes over building models
//!
//! Facade over [`patchbay_core`].

pub use patchbay_core::*;
