pub mod markers;
pub mod render;
pub mod trajectory;
