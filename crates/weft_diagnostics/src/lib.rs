pub mod reporting;

pub use reporting::*;

/// Proof that a diagnostic was already emitted.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ErrorEmitted(());

impl ErrorEmitted {
    pub fn new() -> Self {
        Self(())
    }
}

impl Default for ErrorEmitted {
    fn default() -> Self {
        Self::new()
    }
}
