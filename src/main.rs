use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

use rdefc::{CompileResult, generate_program, parse, tokenize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Emit {
  Tokens,
  Ast,
  Js,
}

struct Options {
  emit: Emit,
  path: String,
}

fn usage(program: &str) -> ! {
  eprintln!("usage: {program} [--emit tokens|ast|js] <path|->");
  process::exit(1);
}

fn parse_args(args: &[String]) -> Option<Options> {
  let mut emit = Emit::Js;
  let mut path = None;
  let mut rest = args.iter().skip(1);

  while let Some(arg) = rest.next() {
    match arg.as_str() {
      "--emit" => {
        emit = match rest.next()?.as_str() {
          "tokens" => Emit::Tokens,
          "ast" => Emit::Ast,
          "js" => Emit::Js,
          _ => return None,
        };
      }
      flag if flag.starts_with("--") => return None,
      _ if path.is_some() => return None,
      _ => path = Some(arg.clone()),
    }
  }

  Some(Options { emit, path: path? })
}

fn read_source(path: &str) -> io::Result<String> {
  if path == "-" {
    let mut source = String::new();
    io::stdin().read_to_string(&mut source)?;
    Ok(source)
  } else {
    fs::read_to_string(path)
  }
}

fn run(source: &str, emit: Emit) -> CompileResult<String> {
  let tokens = tokenize(source)?;
  if emit == Emit::Tokens {
    let lines: Vec<String> = tokens
      .iter()
      .map(|token| format!("{:?} {}", token.kind, token.text))
      .collect();
    return Ok(lines.join("\n"));
  }

  let def = parse(tokens, source)?;
  match emit {
    Emit::Ast => Ok(format!("{def:#?}")),
    _ => generate_program(&def),
  }
}

fn main() {
  let args: Vec<String> = env::args().collect();
  let program = args.first().map(String::as_str).unwrap_or("rdefc");
  let Some(options) = parse_args(&args) else {
    usage(program);
  };

  let source = match read_source(&options.path) {
    Ok(source) => source,
    Err(err) => {
      eprintln!("{program}: cannot read {}: {err}", options.path);
      process::exit(1);
    }
  };

  match run(&source, options.emit) {
    Ok(output) => println!("{output}"),
    Err(err) => {
      eprintln!("{err}");
      process::exit(1);
    }
  }
}
