//! The fixed probe sequences, one per binary.

pub mod file_params;
pub mod ratatouille;
