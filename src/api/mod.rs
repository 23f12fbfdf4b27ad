//! API handlers for the Libris HTTP endpoints

pub mod authors;
pub mod books;
pub mod health;
pub mod openapi;
pub mod orders;
pub mod website;
