//! Procedural generation for the tree's particle populations, ribbon and
//! decorations, plus the per-frame rules that animate them.

pub mod animate;
pub mod curve;
pub mod decorations;
pub mod error;
pub mod field;
pub mod ribbon;
pub mod sampler;
pub mod tree;
pub mod tube;

pub use animate::*;
pub use curve::*;
pub use decorations::*;
pub use error::{ProcgenError, Result};
pub use field::*;
pub use ribbon::*;
pub use sampler::*;
pub use tree::*;
pub use tube::*;
