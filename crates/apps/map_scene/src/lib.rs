pub mod building;
pub mod cli;
pub mod config;
pub mod map_scene;

pub use building::*;
pub use config::*;
pub use map_scene::*;
