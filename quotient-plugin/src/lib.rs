//! Quotient Plugin System
//!
//! The seam between the engine and the function table:
//! - `Expression`: the parsed tree every operator lowers into
//! - `FunctionPlugin` / `Builtin`: named functions with arity metadata
//! - `EvaluationState`: what a function sees while it runs
//! - `PluginRegistry`: alias-aware lookup with suggestions for typos

mod ast;
mod context;
mod registry;
mod traits;

pub use ast::{Expression, ExpressionKind, MAX_DEPTH};
pub use context::EvaluationState;
pub use registry::PluginRegistry;
pub use traits::{Arity, Builtin, BuiltinFn, Evaluate, FunctionMeta, FunctionPlugin};

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{
        Arity, Builtin, Evaluate, EvaluationState, Expression, ExpressionKind, FunctionMeta,
        FunctionPlugin, PluginRegistry,
    };
    pub use quotient_compute::prelude::*;
    pub use quotient_core::prelude::*;
}
