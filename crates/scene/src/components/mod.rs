pub mod label;
pub mod transform;
pub mod visibility;

pub use label::*;
pub use transform::*;
pub use visibility::*;
