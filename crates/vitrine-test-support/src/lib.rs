//! Shared test fakes for the Vitrine component-preview server.

mod runner;

pub use runner::{FailingRunner, Invocation, MissingProgramRunner, RecordingRunner};
