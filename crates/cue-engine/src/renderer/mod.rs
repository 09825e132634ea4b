pub mod instance;

pub use instance::{BallInstance, DrawBuffer, MarkerInstance, SegmentInstance};
