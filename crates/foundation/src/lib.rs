pub mod handles;
pub mod math;

// Foundation crate: small, well-tested primitives only.
pub use handles::*;
pub use math::{CoordinateError, GeoCoordinate, ReferenceFrame, SceneOffset, project};
