pub mod producer;

pub use producer::{Producer, ProducerInput};
