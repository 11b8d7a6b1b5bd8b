// src/lib.rs

//! Boost legacy documentation redirect library

pub mod error;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod matcher;
pub mod models;
pub mod pipeline;
pub mod resolver;
pub mod storage;
pub mod utils;

pub use resolver::{Resolver, determine_latest_url, resolve};
