//! Diagnostic probes for LV2 plugin file-parameter metadata.
//!
//! Each probe locates a plugin through the listing tool (`lv2ls`), then
//! filters the introspection tool's (`lv2info`) dump for marker categories
//! and prints a report for a human operator.

pub mod checks;
pub mod cli;
pub mod config;
pub mod locator;
pub mod printer;
pub mod reporter;
pub mod utils;
