//! Crate root: wires together the compilation pipeline.
//!
//! - `tokenizer` performs lexical analysis and produces a flat token stream.
//! - `parser` owns all syntactic knowledge and returns one function definition.
//! - `codegen` renders that definition as JavaScript.
//! - `error` centralises reporting utilities shared by the other modules.

pub mod codegen;
pub mod error;
pub mod parser;
pub mod tokenizer;

pub use codegen::{generate, generate_expr};
pub use error::{CompileError, CompileResult, Expected};
pub use parser::{Definition, Expr, MAX_CALL_DEPTH, parse};
pub use tokenizer::{Token, TokenKind, tokenize};

/// Helper every compiled program can call.
pub const RUNTIME: &str = "function add(x,y) { return x + y };";

/// Calls the compiled function and prints the result.
pub const INVOCATION: &str = "console.log(f(1, 2));";

/// Wrap the generated function between the runtime and the invocation line.
pub fn generate_program(def: &Definition) -> CompileResult<String> {
  let generated = generate(def)?;
  Ok([RUNTIME, generated.as_str(), INVOCATION].join("\n"))
}

/// Compile a source string into a runnable JavaScript program.
pub fn compile(source: &str) -> CompileResult<String> {
  let tokens = tokenize(source)?;
  let def = parse(tokens, source)?;
  generate_program(&def)
}
