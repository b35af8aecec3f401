//! Database implementations

pub mod bloat_repository;
pub mod manager;
pub mod pragmas;
pub mod queries;
pub mod tables;

pub use bloat_repository::*;
pub use manager::*;
pub use pragmas::*;
pub use tables::*;
