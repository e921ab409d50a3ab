pub mod geocoding;
pub mod push;

pub use geocoding::*;
pub use push::*;
