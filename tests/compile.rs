// End-to-end tests for the def-to-JavaScript compiler

use rdefc::{
  CompileError, Definition, Expected, Expr, INVOCATION, MAX_CALL_DEPTH, RUNTIME, TokenKind, compile,
  generate, parse, tokenize,
};

#[test]
fn test_compile_add_wrapper() {
  let output = compile("def f(x, y) add(x, y) end").expect("compile failed");

  assert_eq!(
    output,
    "function add(x,y) { return x + y };\n\
     function f(x,y) { return add(x,y) };\n\
     console.log(f(1, 2));"
  );
}

#[test]
fn test_program_is_runtime_function_invocation() {
  let output = compile("def zero() 0 end").expect("compile failed");
  let lines: Vec<&str> = output.lines().collect();

  assert_eq!(lines, vec![RUNTIME, "function zero() { return 0 };", INVOCATION]);
}

#[test]
fn test_multiline_source() {
  let source = r#"
    def f(a, b)
      add(
        add(a, 1),
        b
      )
    end
  "#;

  let output = compile(source).expect("compile failed");
  assert!(output.contains("function f(a,b) { return add(add(a,1),b) };"));
}

#[test]
fn test_tokens_for_scenario() {
  let tokens = tokenize("def f(x, y) add(x, y) end").expect("tokenize failed");
  let pairs: Vec<(TokenKind, &str)> = tokens.iter().map(|t| (t.kind, t.text)).collect();

  assert_eq!(
    pairs,
    vec![
      (TokenKind::Def, "def"),
      (TokenKind::Identifier, "f"),
      (TokenKind::OParen, "("),
      (TokenKind::Identifier, "x"),
      (TokenKind::Comma, ","),
      (TokenKind::Identifier, "y"),
      (TokenKind::CParen, ")"),
      (TokenKind::Identifier, "add"),
      (TokenKind::OParen, "("),
      (TokenKind::Identifier, "x"),
      (TokenKind::Comma, ","),
      (TokenKind::Identifier, "y"),
      (TokenKind::CParen, ")"),
      (TokenKind::End, "end"),
    ]
  );
}

#[test]
fn test_nested_calls_survive_generation() {
  let source = "def f(x) add(add(x,x),x) end";
  let def = parse(tokenize(source).expect("tokenize failed"), source).expect("parse failed");

  match &def.body {
    Expr::Call { callee, args } => {
      assert_eq!(callee, "add");
      assert!(matches!(&args[0], Expr::Call { .. }));
      assert_eq!(args[1], Expr::var("x"));
    }
    other => panic!("expected a call, got {other:?}"),
  }

  let js = generate(&def).expect("generate failed");
  assert_eq!(js, "function f(x) { return add(add(x,x),x) };");
}

#[test]
fn test_generated_text_has_name_and_params() {
  for (source, name, params) in [
    ("def f(x, y) add(x, y) end", "f", "x,y"),
    ("def zero() 0 end", "zero", ""),
    ("def pick(a, b, c) b end", "pick", "a,b,c"),
  ] {
    let output = compile(source).expect("compile failed");
    assert!(output.contains(&format!("function {name}({params})")), "{output}");
  }
}

#[test]
fn test_variable_named_like_a_parameter() {
  let source = "def f(x) x end";
  let def = parse(tokenize(source).expect("tokenize failed"), source).expect("parse failed");

  assert_eq!(def, Definition::new("f", vec!["x".to_string()], Expr::var("x")));
}

#[test]
fn test_trailing_comma_error() {
  let err = compile("def f(x,) x end").unwrap_err();

  assert!(matches!(
    err,
    CompileError::Parse {
      expected: Expected::Token(TokenKind::Identifier),
      found: Some(TokenKind::CParen),
      ..
    }
  ));
  assert!(err.to_string().contains("expected identifier, but got \")\""));
}

#[test]
fn test_lex_error_names_unmatched_text() {
  let err = compile("def f(x) x * 2 end").unwrap_err();

  assert!(matches!(err, CompileError::Lex { ref rest, .. } if rest == "* 2 end"));
  assert!(err.to_string().contains("\"* 2 end\""));
}

#[test]
fn test_compile_is_thread_safe() {
  let handles: Vec<_> = (0..4)
    .map(|i| std::thread::spawn(move || compile(&format!("def f(x) add(x, {i}) end"))))
    .collect();

  for (i, handle) in handles.into_iter().enumerate() {
    let output = handle.join().expect("thread panicked").expect("compile failed");
    assert!(output.contains(&format!("return add(x,{i})")));
  }
}

#[test]
fn test_missing_argument_expects_identifier() {
  let err = compile("def f(x) g(x,) end").unwrap_err();

  assert!(matches!(
    err,
    CompileError::Parse {
      expected: Expected::Token(TokenKind::Identifier),
      found: Some(TokenKind::CParen),
      ..
    }
  ));
}

#[test]
fn test_lex_error_carries_everything_after_the_failure() {
  let err = compile("def f() $\nend").unwrap_err();

  assert!(matches!(err, CompileError::Lex { ref rest, .. } if rest == "$\nend"));
}

#[test]
fn test_deep_nesting_is_an_error_not_a_crash() {
  let nest = |depth: usize| format!("def f(x) {}x{} end", "g(".repeat(depth), ")".repeat(depth));

  let output = compile(&nest(MAX_CALL_DEPTH)).expect("compile failed");
  assert!(output.contains(&"g(".repeat(MAX_CALL_DEPTH)));

  let err = compile(&nest(5_000)).unwrap_err();
  assert!(matches!(err, CompileError::TooDeep { limit: MAX_CALL_DEPTH, .. }));
  assert!(err.to_string().contains("calls nested deeper than 256 levels"));
}
