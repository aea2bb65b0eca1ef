//! Code generation: render the parsed definition as JavaScript.
//!
//! Generation is a straight fold over the tree. The only failure mode is a
//! tree the parser could never have produced, e.g. a hand-built one with an
//! empty name, a repeated parameter, or calls nested past `MAX_CALL_DEPTH`.

use crate::error::{CompileError, CompileResult};
use crate::parser::{Definition, Expr, MAX_CALL_DEPTH};

/// Emit a function declaration for `def`.
pub fn generate(def: &Definition) -> CompileResult<String> {
  check_name(&def.name, "function name")?;
  for (i, param) in def.params.iter().enumerate() {
    check_name(param, "parameter name")?;
    if def.params[..i].contains(param) {
      return Err(CompileError::generation(format!(
        "duplicate parameter \"{param}\" in function \"{}\"",
        def.name
      )));
    }
  }

  let mut js = String::new();
  js.push_str(&format!("function {}({}) {{ return ", def.name, def.params.join(",")));
  emit_expr(&def.body, 0, &mut js)?;
  js.push_str(" };");
  Ok(js)
}

/// Emit a single expression on its own.
pub fn generate_expr(expr: &Expr) -> CompileResult<String> {
  let mut js = String::new();
  emit_expr(expr, 0, &mut js)?;
  Ok(js)
}

/// `depth` counts the calls already open around `expr`.
fn emit_expr(expr: &Expr, depth: usize, js: &mut String) -> CompileResult<()> {
  match expr {
    Expr::Integer { value } => js.push_str(&value.to_string()),
    Expr::Var { name } => {
      check_name(name, "variable name")?;
      js.push_str(name);
    }
    Expr::Call { callee, args } => {
      check_name(callee, "callee name")?;
      if depth == MAX_CALL_DEPTH {
        return Err(CompileError::generation(format!(
          "calls nested deeper than {MAX_CALL_DEPTH} levels"
        )));
      }
      js.push_str(callee);
      js.push('(');
      for (i, arg) in args.iter().enumerate() {
        if i > 0 {
          js.push(',');
        }
        emit_expr(arg, depth + 1, js)?;
      }
      js.push(')');
    }
  }
  Ok(())
}

/// Names must look like something the tokenizer would accept as an identifier.
fn check_name(name: &str, what: &str) -> CompileResult<()> {
  if name.is_empty() || !name.bytes().all(|b| b.is_ascii_alphabetic()) {
    return Err(CompileError::generation(format!("invalid {what} {name:?}")));
  }
  Ok(())
}
