mod errors;
pub mod specialize_paren_ops;

use crate::{compiler::CompilerContext, errors::Fatal, passes::errors::MalformedTree};
use std::fmt;
use tracing::{debug, info};
use weft_ast::{Ast, ModuleId};
use weft_span::span::Span;

pub use specialize_paren_ops::{ParenOpStats, SpecializeParenOps, specialize_paren_ops};

/// One stage of the pipeline, run once per module.
pub trait Pass {
    fn name(&self) -> &'static str;

    fn run(&mut self, cx: &mut CompilerContext, ast: &mut Ast, module: ModuleId)
    -> Result<(), Fatal>;
}

/// Runs passes in a fixed order. Each pass sees every module before the next pass
/// starts.
#[derive(Default)]
pub struct PassManager {
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// The front-end passes in the order the compiler runs them.
    pub fn front_end() -> Self {
        let mut manager = Self::new();
        manager.add(SpecializeParenOps::default());
        manager
    }

    pub fn add(&mut self, pass: impl Pass + 'static) -> &mut Self {
        self.passes.push(Box::new(pass));
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|pass| pass.name()).collect()
    }

    pub fn run(&mut self, cx: &mut CompilerContext, ast: &mut Ast) -> Result<(), Fatal> {
        cx.register_files(ast);
        let modules = ast.module_ids();

        for pass in &mut self.passes {
            if cx.options.print_passes {
                info!("running pass {}", pass.name());
            }

            for &module in &modules {
                debug!("{} visiting module: {:?}", pass.name(), ast.module(module).name);
                pass.run(cx, ast, module)?;

                if cx.options.developer {
                    if let Err(err) = ast.verify(module) {
                        let module = ast.module(module);
                        return Err(cx.internal_fatal(
                            MalformedTree {
                                pass: pass.name(),
                                module: module.name.to_string(),
                                error: err.to_string(),
                            },
                            None,
                            (Span::DUMMY, module.file_id),
                        ));
                    }
                }
            }
        }

        Ok(())
    }
}

impl fmt::Debug for PassManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PassManager").field("passes", &self.names()).finish()
    }
}
