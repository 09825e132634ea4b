pub mod ball;
pub mod entity;
