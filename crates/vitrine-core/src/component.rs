//! The renderable-component capability.

use std::io;

/// An opaque value capable of producing output bytes when asked to render.
///
/// Registered constructors must return a value implementing this trait;
/// the preview layer consumes it without knowing anything else about it.
pub trait Renderable {
    /// Render this component into `writer`.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised while writing the output.
    fn render(&self, writer: &mut dyn io::Write) -> io::Result<()>;
}

impl std::fmt::Debug for dyn Renderable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("<renderable>")
    }
}

impl Renderable for String {
    fn render(&self, writer: &mut dyn io::Write) -> io::Result<()> {
        writer.write_all(self.as_bytes())
    }
}
