// HTTP routes
pub mod admin;
pub mod health;
pub mod public;

pub use admin::*;
pub use health::*;
pub use public::*;
