pub mod span;
pub mod symbols;
