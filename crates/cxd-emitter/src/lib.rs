//! Desugaring source generator.
//!
//! Walks a typed C++ AST and emits equivalent, fully explicit source text:
//! closure classes for lambdas, guarded initialization for non-trivially
//! constructed static locals, per-element temporaries for structured
//! bindings, explicit cast keywords for implicit conversions, and normalized
//! literal suffixes and escapes.
//!
//! One [`Printer`] performs one generation pass; it owns the output buffer,
//! the lambda context stack, and the per-pass name registry, so repeated
//! passes over the same tree are byte-identical and independent.

pub mod options;
pub use options::{EmitterOptions, NewLineKind};

pub mod writer;
pub use writer::OutputBuffer;

pub mod proto;

pub mod printer;
pub use printer::{GeneratedOutput, LambdaCallerRole, Printer};
