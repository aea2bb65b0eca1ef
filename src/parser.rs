//! Recursive-descent parser producing a single function definition.
//!
//! One routine per grammar rule. The only lookahead beyond the current token
//! is the single peek that tells a call (`name(`) from a variable reference.
//! Calls may nest at most `MAX_CALL_DEPTH` levels deep.

use crate::error::{CompileError, CompileResult, Expected};
use crate::tokenizer::{Token, TokenKind};

/// Deepest call nesting accepted, counting the outermost call as 1.
pub const MAX_CALL_DEPTH: usize = 256;

/// Expression tree produced by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
  Integer { value: i64 },
  Var { name: String },
  Call { callee: String, args: Vec<Expr> },
}

impl Expr {
  pub fn integer(value: i64) -> Self {
    Self::Integer { value }
  }

  pub fn var(name: impl Into<String>) -> Self {
    Self::Var { name: name.into() }
  }

  pub fn call(callee: impl Into<String>, args: Vec<Expr>) -> Self {
    Self::Call {
      callee: callee.into(),
      args,
    }
  }
}

/// Root of the tree: `def name(params) body end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
  pub name: String,
  pub params: Vec<String>,
  pub body: Expr,
}

impl Definition {
  pub fn new(name: impl Into<String>, params: Vec<String>, body: Expr) -> Self {
    Self {
      name: name.into(),
      params,
      body,
    }
  }
}

/// Parse a whole token stream into one definition.
pub fn parse(tokens: Vec<Token<'_>>, source: &str) -> CompileResult<Definition> {
  let mut stream = TokenStream::new(tokens, source);
  let def = parse_def(&mut stream)?;

  if let Some(token) = stream.peek(0) {
    return Err(CompileError::parse(
      source,
      token.loc,
      Expected::EndOfInput,
      Some(token.kind),
    ));
  }

  Ok(def)
}

fn parse_def(stream: &mut TokenStream) -> CompileResult<Definition> {
  stream.expect(TokenKind::Def)?;
  let name = stream.expect(TokenKind::Identifier)?.text.to_string();
  let params = parse_param_names(stream)?;
  let body = parse_expr(stream)?;
  stream.expect(TokenKind::End)?;
  Ok(Definition { name, params, body })
}

fn parse_param_names(stream: &mut TokenStream) -> CompileResult<Vec<String>> {
  let mut params: Vec<String> = Vec::new();

  stream.expect(TokenKind::OParen)?;
  if stream.peek_is(TokenKind::Identifier, 0) {
    loop {
      let token = stream.expect(TokenKind::Identifier)?;
      if params.iter().any(|p| p == token.text) {
        return Err(CompileError::duplicate_parameter(
          stream.source,
          token.loc,
          token.text,
        ));
      }
      params.push(token.text.to_string());

      if !stream.peek_is(TokenKind::Comma, 0) {
        break;
      }
      stream.expect(TokenKind::Comma)?;
    }
  }
  stream.expect(TokenKind::CParen)?;

  Ok(params)
}

fn parse_expr(stream: &mut TokenStream) -> CompileResult<Expr> {
  if stream.peek_is(TokenKind::Integer, 0) {
    parse_integer(stream)
  } else if stream.peek_is(TokenKind::Identifier, 0) && stream.peek_is(TokenKind::OParen, 1) {
    parse_call(stream)
  } else {
    parse_var_ref(stream)
  }
}

fn parse_integer(stream: &mut TokenStream) -> CompileResult<Expr> {
  let token = stream.expect(TokenKind::Integer)?;
  let value = token
    .text
    .parse::<i64>()
    .map_err(|_| CompileError::integer_out_of_range(stream.source, token.loc, token.text))?;
  Ok(Expr::integer(value))
}

fn parse_call(stream: &mut TokenStream) -> CompileResult<Expr> {
  let token = stream.expect(TokenKind::Identifier)?;
  if stream.depth == MAX_CALL_DEPTH {
    return Err(CompileError::too_deep(stream.source, token.loc, MAX_CALL_DEPTH));
  }

  stream.depth += 1;
  let args = parse_arg_exprs(stream)?;
  stream.depth -= 1;

  Ok(Expr::call(token.text, args))
}

fn parse_var_ref(stream: &mut TokenStream) -> CompileResult<Expr> {
  let name = stream.expect(TokenKind::Identifier)?.text;
  Ok(Expr::var(name))
}

fn parse_arg_exprs(stream: &mut TokenStream) -> CompileResult<Vec<Expr>> {
  let mut args = Vec::new();

  stream.expect(TokenKind::OParen)?;
  if !stream.peek_is(TokenKind::CParen, 0) {
    args.push(parse_expr(stream)?);
    while stream.peek_is(TokenKind::Comma, 0) {
      stream.expect(TokenKind::Comma)?;
      args.push(parse_expr(stream)?);
    }
  }
  stream.expect(TokenKind::CParen)?;

  Ok(args)
}

/// Cursor over the token vector. Tokens are never removed; `pos` only moves forward.
struct TokenStream<'a> {
  tokens: Vec<Token<'a>>,
  source: &'a str,
  pos: usize,
  /// Calls currently open around `pos`.
  depth: usize,
}

impl<'a> TokenStream<'a> {
  fn new(tokens: Vec<Token<'a>>, source: &'a str) -> Self {
    Self {
      tokens,
      source,
      pos: 0,
      depth: 0,
    }
  }

  fn peek(&self, offset: usize) -> Option<&Token<'a>> {
    self.tokens.get(self.pos + offset)
  }

  /// Lookahead past the end of the stream is simply `false`.
  fn peek_is(&self, kind: TokenKind, offset: usize) -> bool {
    self.peek(offset).is_some_and(|token| token.kind == kind)
  }

  /// Consume the current token if it has the given kind.
  fn expect(&mut self, kind: TokenKind) -> CompileResult<Token<'a>> {
    match self.peek(0) {
      Some(token) if token.kind == kind => {
        let token = *token;
        self.pos += 1;
        Ok(token)
      }
      _ => Err(self.error_here(Expected::Token(kind))),
    }
  }

  fn error_here(&self, expected: Expected) -> CompileError {
    match self.peek(0) {
      Some(token) => CompileError::parse(self.source, token.loc, expected, Some(token.kind)),
      None => CompileError::parse(self.source, self.source.len(), expected, None),
    }
  }
}
