//! Foundation module - Core utilities shared by the builder
//!
//! Currently this is only the logging facade; the geometry and scene types
//! live in their own modules.

pub mod logging;
