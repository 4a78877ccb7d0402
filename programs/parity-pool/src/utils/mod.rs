pub mod entropy;
pub mod math;
pub mod transfer;

pub use entropy::*;
pub use math::*;
pub use transfer::*;
