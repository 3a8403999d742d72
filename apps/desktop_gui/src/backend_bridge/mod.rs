//! Backend worker: runs transport calls off the UI thread.

pub mod commands;
pub mod runtime;
