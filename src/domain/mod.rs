//! Domain logic - pure release rules independent of git and the file system

pub mod step;
pub mod version;

pub use step::Step;
pub use version::{normalize, MessageVersion, VersionTag};
