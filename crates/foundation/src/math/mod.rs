pub mod geodesy;
pub mod local;
pub mod mercator;
pub mod vec;

pub use geodesy::*;
pub use local::*;
pub use mercator::*;
pub use vec::*;
