pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod precondition;
pub mod rewrite;
pub mod ui;

pub use error::{BumpError, Result};
