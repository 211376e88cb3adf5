pub mod options;
pub mod walker;
