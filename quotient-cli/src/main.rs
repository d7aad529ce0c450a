//! Quotient command line evaluator
//!
//! Each expression runs on a blocking worker. When a timeout is configured
//! and elapses, the evaluation is cancelled and whatever it produced by then
//! (usually NaN) is reported.

mod config;

use config::{Config, USAGE};
use quotient::{Engine, EvalError, Value};
use serde_json::json;
use std::collections::HashMap;
use std::io::{self, BufRead};
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, warn, Level};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("quotient: {}\n\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };
    if config.help {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    let engine = Engine::with_standard_library().with_parameters(config.parameters().clone());
    if let Some(category) = &config.list {
        print_functions(&engine, category.as_deref(), config.json);
        return ExitCode::SUCCESS;
    }

    let expressions = if config.expressions.is_empty() {
        match read_stdin() {
            Ok(lines) => lines,
            Err(e) => {
                eprintln!("quotient: cannot read stdin: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        config.expressions.clone()
    };

    let mut failed = false;
    evaluate_all(&engine, &expressions, config.timeout, |expression, outcome| {
        report(expression, outcome, config.json);
        failed |= outcome.is_err();
    })
    .await;

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn init_tracing() {
    let level = std::env::var("QUOTIENT_LOG")
        .ok()
        .and_then(|level| level.parse::<Level>().ok())
        .unwrap_or(Level::WARN);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

/// Non-empty lines that are not `#` comments.
fn read_stdin() -> io::Result<Vec<String>> {
    let mut expressions = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() && !line.starts_with('#') {
            expressions.push(line.to_string());
        }
    }
    Ok(expressions)
}

/// Evaluates the expressions in order. The result of the n-th line is `$n`
/// for the lines after it; a failed line leaves its `$n` unset.
async fn evaluate_all(
    engine: &Engine,
    expressions: &[String],
    timeout: Option<Duration>,
    mut on_outcome: impl FnMut(&str, &Result<Value, EvalError>),
) {
    let mut history: HashMap<String, Value> = HashMap::new();
    for (index, expression) in expressions.iter().enumerate() {
        let outcome = evaluate(engine, expression, &history, timeout).await;
        on_outcome(expression, &outcome);
        if let Ok(value) = outcome {
            history.insert((index + 1).to_string(), value);
        }
    }
}

async fn evaluate(
    engine: &Engine,
    expression: &str,
    history: &HashMap<String, Value>,
    timeout: Option<Duration>,
) -> Result<Value, EvalError> {
    let mut evaluation = engine.evaluation_with(expression, history.clone());
    let cancel = evaluation.cancel_token();
    let mut task = tokio::task::spawn_blocking(move || evaluation.evaluate());

    let joined = match timeout {
        Some(limit) => match tokio::time::timeout(limit, &mut task).await {
            Ok(joined) => joined,
            Err(_) => {
                warn!(expression, timeout_ms = limit.as_millis() as u64, "evaluation timed out, cancelling");
                cancel.request_cancel();
                task.await
            }
        },
        None => task.await,
    };

    joined.unwrap_or_else(|e| {
        Err(EvalError::internal(
            format!("evaluation worker failed: {}", e),
            0..expression.chars().count(),
        ))
    })
}

fn report(expression: &str, outcome: &Result<Value, EvalError>, as_json: bool) {
    if as_json {
        let line = match outcome {
            Ok(value) => json!({
                "expression": expression,
                "result": value,
                "text": value.to_string(),
                "approximate": value.is_approximation(),
            }),
            Err(error) => json!({
                "expression": expression,
                "error": error,
                "message": error.to_string(),
            }),
        };
        println!("{}", line);
        return;
    }

    match outcome {
        Ok(value) => {
            debug!(expression, kind = value.type_name(), "result");
            let marker = if value.is_approximation() { "≈ " } else { "" };
            println!("{}{}", marker, value);
        }
        Err(error) => {
            eprintln!("{}", expression);
            eprintln!("{}", underline(expression, &error.range));
            eprintln!("{}", error);
        }
    }
}

/// Carets under the characters an error refers to.
fn underline(expression: &str, range: &std::ops::Range<usize>) -> String {
    let length = expression.chars().count();
    let start = range.start.min(length);
    let width = range.end.min(length).saturating_sub(start).max(1);
    format!("{}{}", " ".repeat(start), "^".repeat(width))
}

fn print_functions(engine: &Engine, category: Option<&str>, as_json: bool) {
    let functions = engine.list_functions(category);
    if as_json {
        println!("{}", json!(functions));
        return;
    }
    for meta in functions {
        let aliases = if meta.aliases.is_empty() {
            String::new()
        } else {
            format!(" ({})", meta.aliases.join(", "))
        };
        println!("{:<14} {:<14} {}{}", meta.category, meta.usage, meta.description, aliases);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quotient::ErrorKind;

    #[test]
    fn test_underline() {
        assert_eq!(underline("1 + foo(2)", &(4..7)), "    ^^^");
        assert_eq!(underline("1 +", &(2..3)), "  ^");
        assert_eq!(underline("", &(0..0)), "^");
    }

    #[tokio::test]
    async fn test_history_is_positional() {
        let engine = Engine::with_standard_library();
        let mut history = HashMap::new();
        let first = evaluate(&engine, "6 * 7", &history, None).await.unwrap();
        history.insert("1".to_string(), first);
        let second = evaluate(&engine, "$1 / 2", &history, None).await.unwrap();
        assert_eq!(second.to_string(), "21");
    }

    #[tokio::test]
    async fn test_history_counts_failed_lines() {
        let engine = Engine::with_standard_library();
        let lines: Vec<String> = ["1/", "5", "$2 * 2", "$1"].iter().map(|l| l.to_string()).collect();
        let mut outcomes = Vec::new();
        evaluate_all(&engine, &lines, None, |_, outcome| {
            outcomes.push(outcome.as_ref().map(|v| v.to_string()).map_err(|e| e.kind.clone()));
        })
        .await;
        assert!(outcomes[0].is_err());
        assert_eq!(outcomes[1], Ok("5".to_string()));
        assert_eq!(outcomes[2], Ok("10".to_string()));
        assert_eq!(outcomes[3], Err(ErrorKind::UnknownVariable("1".to_string())));
    }

    #[tokio::test]
    async fn test_timeout_cancels() {
        let engine = Engine::with_standard_library();
        let outcome = evaluate(&engine, "factor(2^256 + 1)", &HashMap::new(), Some(Duration::from_millis(20))).await;
        // the factorization is cut short rather than running to completion
        let value = outcome.unwrap();
        assert!(value.is_nan());
    }
}
