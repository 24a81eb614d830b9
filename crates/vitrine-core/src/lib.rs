//! Vitrine Core — shared domain abstractions.
//!
//! This crate defines the component-preview domain: argument descriptors,
//! story configuration, the renderable-component capability, and the
//! dynamic constructor dispatcher. It contains no HTTP or filesystem code.

pub mod args;
pub mod component;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod ordered;
pub mod runner;
