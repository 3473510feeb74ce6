use clap::{App, Arg, ArgMatches};
use rexpr::ast::AstPrinter;
use rexpr::{evaluate, parse, Context, Value};
use std::fs;
use std::io::{self, BufRead, Write};
use std::process;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const EXIT_EVAL_FAILURE: i32 = 65;
const EXIT_BAD_CONTEXT: i32 = 66;

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let matches = App::new("rexpr")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Evaluates expressions and ${...} templates")
        .arg(
            Arg::with_name("EXPRESSION")
                .help("Expression or template to evaluate; starts a prompt when absent")
                .index(1),
        )
        .arg(
            Arg::with_name("context")
                .short("c")
                .long("context")
                .value_name("FILE")
                .takes_value(true)
                .help("JSON object whose keys become variables"),
        )
        .arg(
            Arg::with_name("define")
                .short("D")
                .long("define")
                .value_name("NAME=VALUE")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .help("Binds one variable; VALUE is read as JSON when it parses, else as text"),
        )
        .arg(
            Arg::with_name("ast")
                .long("ast")
                .help("Prints the syntax tree instead of evaluating"),
        )
        .get_matches();

    let context = match build_context(&matches) {
        Ok(context) => context,
        Err(message) => {
            eprintln!("{}", message);
            process::exit(EXIT_BAD_CONTEXT);
        }
    };
    let show_ast = matches.is_present("ast");

    match matches.value_of("EXPRESSION") {
        Some(source) => {
            if !run(source, &context, show_ast) {
                process::exit(EXIT_EVAL_FAILURE);
            }
        }
        None => run_prompt(&context, show_ast),
    }
}

fn build_context(matches: &ArgMatches) -> Result<Context, String> {
    let mut context = match matches.value_of("context") {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("Could not read context file '{}': {}", path, e))?;
            let json: serde_json::Value = serde_json::from_str(&text)
                .map_err(|e| format!("Context file '{}' is not valid JSON: {}", path, e))?;
            Context::from_json("context", json)
                .ok_or_else(|| format!("Context file '{}' must hold a JSON object", path))?
        }
        None => Context::new("context"),
    };
    for definition in matches.values_of("define").into_iter().flatten() {
        let (name, raw) = definition
            .split_once('=')
            .ok_or_else(|| format!("Expected NAME=VALUE, found '{}'", definition))?;
        let value = match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(json) => Value::from(json),
            Err(_) => Value::from(raw),
        };
        context.define(name.trim(), value);
    }
    Ok(context)
}

fn run_prompt(context: &Context, show_ast: bool) {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            return;
        }
        match lines.next() {
            Some(Ok(line)) => {
                run(&line, context, show_ast);
            }
            _ => return,
        }
    }
}

fn run(source: &str, context: &Context, show_ast: bool) -> bool {
    if show_ast {
        return match parse(source) {
            Ok(ast) => {
                println!("{}", AstPrinter {}.print(&ast));
                true
            }
            Err(err) => {
                eprintln!("{}", err);
                false
            }
        };
    }
    match evaluate(source, Some(context)) {
        Ok(value) => {
            println!("{}", value);
            true
        }
        Err(err) => {
            eprintln!("{}", err);
            false
        }
    }
}
