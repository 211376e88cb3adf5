pub mod diagnostic;
pub mod term;
