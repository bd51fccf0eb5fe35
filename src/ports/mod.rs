//! Ports (trait boundaries) for external dependencies.
//!
//! The learning core only knows these traits; concrete storage lives in
//! [`crate::adapters`].

pub mod repository;

pub use repository::TableRepository;
