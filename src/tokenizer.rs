//! Lexical analysis: turns the raw input string into a vector of tokens.
//!
//! Token patterns are tried in a fixed order at the current offset and the
//! first one that matches wins. Keywords sit ahead of identifiers in that
//! order, so `def` and `end` never come out as identifiers.

use std::fmt;

use crate::error::{CompileError, CompileResult};

/// Kinds of tokens recognised by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
  Def,
  End,
  Identifier,
  Integer,
  OParen,
  CParen,
  Comma,
}

impl fmt::Display for TokenKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      TokenKind::Def => "\"def\"",
      TokenKind::End => "\"end\"",
      TokenKind::Identifier => "identifier",
      TokenKind::Integer => "integer",
      TokenKind::OParen => "\"(\"",
      TokenKind::CParen => "\")\"",
      TokenKind::Comma => "\",\"",
    };
    f.write_str(name)
  }
}

/// A classified slice of the source. `loc` is the byte offset of `text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
  pub kind: TokenKind,
  pub text: &'a str,
  pub loc: usize,
}

impl<'a> Token<'a> {
  pub fn new(kind: TokenKind, text: &'a str, loc: usize) -> Self {
    Self { kind, text, loc }
  }
}

/// Returns the length of the match anchored at the start of the input.
type Matcher = fn(&str) -> Option<usize>;

/// Priority order matters: the first matcher that accepts wins.
const PATTERNS: [(TokenKind, Matcher); 7] = [
  (TokenKind::Def, match_def),
  (TokenKind::End, match_end),
  (TokenKind::Identifier, match_identifier),
  (TokenKind::Integer, match_integer),
  (TokenKind::OParen, match_oparen),
  (TokenKind::CParen, match_cparen),
  (TokenKind::Comma, match_comma),
];

/// Length of the leading run of word characters (`[A-Za-z0-9_]`).
///
/// Word-like patterns only match when they cover this whole run, which is
/// what keeps `definition` from splitting into `def` + `inition`.
fn word_len(rest: &str) -> usize {
  rest
    .bytes()
    .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
    .count()
}

fn match_keyword(rest: &str, keyword: &str) -> Option<usize> {
  (word_len(rest) == keyword.len() && rest.starts_with(keyword)).then_some(keyword.len())
}

fn match_def(rest: &str) -> Option<usize> {
  match_keyword(rest, "def")
}

fn match_end(rest: &str) -> Option<usize> {
  match_keyword(rest, "end")
}

fn match_identifier(rest: &str) -> Option<usize> {
  let len = word_len(rest);
  (len > 0 && rest[..len].bytes().all(|b| b.is_ascii_alphabetic())).then_some(len)
}

fn match_integer(rest: &str) -> Option<usize> {
  let len = word_len(rest);
  (len > 0 && rest[..len].bytes().all(|b| b.is_ascii_digit())).then_some(len)
}

fn match_punct(rest: &str, punct: char) -> Option<usize> {
  rest.starts_with(punct).then_some(punct.len_utf8())
}

fn match_oparen(rest: &str) -> Option<usize> {
  match_punct(rest, '(')
}

fn match_cparen(rest: &str) -> Option<usize> {
  match_punct(rest, ')')
}

fn match_comma(rest: &str) -> Option<usize> {
  match_punct(rest, ',')
}

/// Space between tokens: ASCII whitespace plus vertical tab.
fn is_space(c: char) -> bool {
  c.is_ascii_whitespace() || c == '\x0B'
}

/// Lex the whole input. Fails on the first position no pattern matches.
pub fn tokenize(input: &str) -> CompileResult<Vec<Token<'_>>> {
  let mut tokens = Vec::new();
  let mut i = 0;

  loop {
    i = input.len() - input[i..].trim_start_matches(is_space).len();
    if i >= input.len() {
      break;
    }

    let rest = &input[i..];
    let Some((kind, len)) = PATTERNS
      .iter()
      .find_map(|(kind, matcher)| matcher(rest).map(|len| (*kind, len)))
    else {
      return Err(CompileError::lex(input, i));
    };

    tokens.push(Token::new(kind, &rest[..len], i));
    i += len;
  }

  Ok(tokens)
}

/// Human-friendly description used in diagnostics.
pub fn describe_kind(kind: Option<TokenKind>) -> String {
  match kind {
    Some(kind) => kind.to_string(),
    None => "end of input".to_string(),
  }
}
