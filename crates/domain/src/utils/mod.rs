//! Presentation helpers shared by every layer.

pub mod format;
