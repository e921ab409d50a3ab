//! Producer directory domain - the maricultores listed on the public map.

pub mod models;

pub use models::{Producer, ProducerInput};
