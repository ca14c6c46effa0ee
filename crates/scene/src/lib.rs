pub mod components;
pub mod entity;
pub mod markers;
pub mod world;

pub use markers::*;
pub use world::*;
