//! Progress reporting during a run

pub mod reporter;
