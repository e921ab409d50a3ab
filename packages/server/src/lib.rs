// Associação de Maricultores do Litoral Sul - back-office API
//
// This crate provides the backend for the association's public site and admin
// console: published-content listings, ordered-list reconciliation for the
// drag-and-drop admin screens, and the publish/notify workflow that pushes
// topic notifications to the member app.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
