//! Compile query documents and report the rendered predicate

use super::CliError;
use crate::{Arg, FieldWhitelist, JsonQuery};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The JSON query document to compile
    pub query: Option<String>,
    /// Whitelisted field names; empty allows all fields
    pub fields: Vec<String>,
    /// Only validate the document, don't report the predicate
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// The document compiled cleanly
    Valid,
    /// The rendered predicate as `{"sql": ..., "args": [...]}`
    Compiled(serde_json::Value),
}

/// Compile a query document against the given whitelist
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let text = options.query.as_ref().ok_or(CliError::NoInput)?;

    let whitelist = if options.fields.is_empty() {
        FieldWhitelist::allow_all()
    } else {
        FieldWhitelist::new(options.fields.iter().cloned())
    };

    let mut query = JsonQuery::new(whitelist);
    query.parse(text)?;

    if options.syntax_only {
        return Ok(CheckResult::Valid);
    }

    let (sql, args) = query.to_sql();
    let mut out = serde_json::Map::new();
    out.insert("sql".to_string(), serde_json::Value::String(sql));
    out.insert(
        "args".to_string(),
        serde_json::Value::Array(args.iter().map(arg_to_json).collect()),
    );
    Ok(CheckResult::Compiled(serde_json::Value::Object(out)))
}

/// Convert a bound argument to its JSON representation
fn arg_to_json(arg: &Arg) -> serde_json::Value {
    match arg {
        Arg::Str(s) => serde_json::Value::String(s.clone()),
        Arg::Int(n) => serde_json::Value::Number((*n).into()),
        Arg::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
    }
}
