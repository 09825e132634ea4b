// extensions/mod.rs
//
// Optional helpers that sit outside the core table model.

pub mod easing;

pub use easing::{Easing, lerp, ease};
