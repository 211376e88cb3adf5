pub mod compiler;
pub mod diag_ctx;
pub mod errors;
pub mod passes;
