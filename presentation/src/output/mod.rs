//! Output formatting for finished runs

pub mod console;
