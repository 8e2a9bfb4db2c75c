//! Shared helpers for the binary: formatting, file output and terminal styles.

pub mod format;
pub mod io;
pub mod styles;
