//! Pipeline entry points for redirect operations.
//!
//! - `run_resolve`: Resolve a handful of paths given on the command line
//! - `run_batch`: Resolve a file of paths and build a JSON report
//! - `run_validate`: Check configuration and the cache index

pub mod batch;
pub mod resolve;
pub mod validate;

pub use batch::{BatchReport, read_inputs, run_batch};
pub use resolve::{format_line, run_resolve};
pub use validate::{ValidationSummary, run_validate};
