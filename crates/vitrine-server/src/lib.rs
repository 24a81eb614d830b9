//! Vitrine Server — HTTP facade and build pipeline.
//!
//! Owns the component registry, serves interactive previews over HTTP for
//! Storybook's server framework, and orchestrates the Storybook
//! install/configure/build pipeline against a working directory.

pub mod build;
pub mod error;
pub mod registry;
pub mod runner;

mod preview;
mod router;

pub use registry::Storybook;
