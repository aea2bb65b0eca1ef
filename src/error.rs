//! Shared error utilities used across the compilation pipeline.
//!
//! Diagnostics are kept lightweight: every input error quotes the offending
//! source line and points at the byte with a caret, then states what went
//! wrong.

use std::fmt;

use snafu::Snafu;

use crate::tokenizer::{TokenKind, describe_kind};

pub type CompileResult<T> = Result<T, CompileError>;

#[derive(Debug, Snafu)]
pub enum CompileError {
  #[snafu(display("{snippet} couldn't match a token on {rest:?}"))]
  Lex { rest: String, snippet: Snippet },

  #[snafu(display("{snippet} expected {expected}, but got {}", describe_kind(*found)))]
  Parse {
    expected: Expected,
    found: Option<TokenKind>,
    snippet: Snippet,
  },

  #[snafu(display("{snippet} duplicate parameter \"{name}\""))]
  DuplicateParameter { name: String, snippet: Snippet },

  #[snafu(display("{snippet} integer literal \"{text}\" does not fit in 64 bits"))]
  IntegerOutOfRange { text: String, snippet: Snippet },

  #[snafu(display("{snippet} calls nested deeper than {limit} levels"))]
  TooDeep { limit: usize, snippet: Snippet },

  #[snafu(display("internal error: {message}"))]
  Generation { message: String },
}

impl CompileError {
  /// No token pattern matches at `loc`.
  pub fn lex(source: &str, loc: usize) -> Self {
    Self::Lex {
      rest: source[loc..].to_string(),
      snippet: Snippet::at(source, loc),
    }
  }

  pub fn parse(source: &str, loc: usize, expected: Expected, found: Option<TokenKind>) -> Self {
    Self::Parse {
      expected,
      found,
      snippet: Snippet::at(source, loc),
    }
  }

  pub fn duplicate_parameter(source: &str, loc: usize, name: &str) -> Self {
    Self::DuplicateParameter {
      name: name.to_string(),
      snippet: Snippet::at(source, loc),
    }
  }

  pub fn integer_out_of_range(source: &str, loc: usize, text: &str) -> Self {
    Self::IntegerOutOfRange {
      text: text.to_string(),
      snippet: Snippet::at(source, loc),
    }
  }

  pub fn too_deep(source: &str, loc: usize, limit: usize) -> Self {
    Self::TooDeep {
      limit,
      snippet: Snippet::at(source, loc),
    }
  }

  pub fn generation(message: impl Into<String>) -> Self {
    Self::Generation {
      message: message.into(),
    }
  }
}

/// What the parser was looking for when it gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
  Token(TokenKind),
  EndOfInput,
}

impl fmt::Display for Expected {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Expected::Token(kind) => write!(f, "{kind}"),
      Expected::EndOfInput => write!(f, "end of input"),
    }
  }
}

/// The source line containing an error plus a caret marker under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
  pub line: usize,
  pub column: usize,
  pub text: String,
}

impl Snippet {
  /// Locate byte offset `loc` in `source`. Offsets past the end clamp to it.
  pub fn at(source: &str, loc: usize) -> Self {
    let safe_loc = loc.min(source.len());
    let line_start = source[..safe_loc].rfind('\n').map_or(0, |i| i + 1);
    let line_end = source[safe_loc..]
      .find('\n')
      .map_or(source.len(), |i| safe_loc + i);
    Self {
      line: source[..line_start].matches('\n').count() + 1,
      column: source[line_start..safe_loc].chars().count() + 1,
      text: source[line_start..line_end].trim_end_matches('\r').to_string(),
    }
  }
}

impl fmt::Display for Snippet {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    // The caret sits one column right of the opening quote.
    writeln!(f, "{}:{}: '{}'", self.line, self.column, self.text)?;
    let prefix = format!("{}:{}: ", self.line, self.column).len();
    write!(f, "{}^", " ".repeat(prefix + self.column))
  }
}
