//! Domain error types.

use thiserror::Error;

/// Contract violations raised by the dynamic dispatcher.
///
/// These indicate a mis-registered component rather than a bad request,
/// and are surfaced to the preview client as a 500 with the error text.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The number of extracted argument values does not match the
    /// constructor's declared arity.
    #[error("component {component} expects {expected} arguments, but {actual} were provided")]
    ArityMismatch {
        /// The component being invoked.
        component: String,
        /// The constructor's declared arity.
        expected: usize,
        /// The number of values actually provided.
        actual: usize,
    },

    /// The constructor did not return exactly one renderable value.
    #[error("function {component} must return exactly one renderable component")]
    InvalidSignature {
        /// The component being invoked.
        component: String,
    },
}
