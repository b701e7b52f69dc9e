//! The recursive query compiler.
//!
//! Walks a decoded query document and fills a [`Builder`] with parameterized
//! SQL fragments. Each document key is either a logical operator (`$and`,
//! `$or`, `$nor`), a field whose value is a scalar (implicit `$eq`), or a
//! field whose value is an object of compare operators. Logical operators
//! spawn fresh builders for their sub-documents and fold the rendered result
//! back into the current scope as one opaque expression, so no fragment ever
//! belongs to two scopes.
//!
//! A negation flag travels with each scope. `$not` re-enters the compiler
//! through the normal field path with the flag set, which prefixes every
//! fragment the nested scope emits with `NOT`. The flag is asserted, never
//! toggled: `$not` inside `$not` still negates once.

use crate::{
    builder::{Arg, Builder, SqlExpr, and_join, or_join},
    ops::{self, CompareOp, LogicalOp},
    value::{Kind, Value},
    whitelist::FieldWhitelist,
};

/// Faults raised while compiling a query document.
///
/// Each variant carries the offending key or operator so callers can match
/// structurally instead of string-comparing messages. Compilation stops at
/// the first fault.
#[derive(Debug, Clone, PartialEq)]
pub enum CompileError {
    /// A `$`-prefixed document key that is not a logical operator
    UnknownTopLevelOperator(String),

    /// A logical operator whose value is not an array
    OperatorArrayTypeRequired(String),

    /// A logical operator array containing a non-object element
    LogicalOperandMustBeObject(String),

    /// A field name rejected by the whitelist
    UnknownField(String),

    /// A field value that is neither scalar nor an operator object
    InvalidFieldValueType(String),

    /// An operator-object key outside the compare operator set
    UnknownOperator(String),

    /// A compare operator given an operand of the wrong type
    BadOperandType { field: String, op: CompareOp },

    /// A `$sw`/`$ew`/`$ct` operand containing LIKE wildcards
    InvalidOperand { field: String, op: CompareOp },
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::UnknownTopLevelOperator(key) => {
                write!(f, "unknown top level operator: {}", key)
            }
            CompileError::OperatorArrayTypeRequired(key) => {
                write!(f, "field '{}': operator supports only array type", key)
            }
            CompileError::LogicalOperandMustBeObject(key) => {
                write!(f, "field '{}': operator entries must be full objects", key)
            }
            CompileError::UnknownField(key) => write!(f, "unknown query field: {}", key),
            CompileError::InvalidFieldValueType(key) => write!(
                f,
                "field '{}': invalid value type. expects string, number or object",
                key
            ),
            CompileError::UnknownOperator(op) => write!(f, "unknown operator: {}", op),
            CompileError::BadOperandType { field, op } => write!(
                f,
                "field '{}': '{}' operator does not support this operand type",
                field, op
            ),
            CompileError::InvalidOperand { field, op } => write!(
                f,
                "field '{}': '{}' string cannot contain the characters '%' or '_'",
                field, op
            ),
        }
    }
}

impl std::error::Error for CompileError {}

/// Compiles query documents into SQL predicate fragments.
///
/// Stateless apart from the borrowed whitelist; one compiler can serve any
/// number of `compile` calls.
pub struct Compiler<'a> {
    whitelist: &'a FieldWhitelist,
}

impl<'a> Compiler<'a> {
    pub fn new(whitelist: &'a FieldWhitelist) -> Self {
        Compiler { whitelist }
    }

    /// Compile one document scope into `target`.
    ///
    /// A document with multiple keys is an implicit conjunction of all its
    /// entries. `negate` is the scope's negation flag; leaf fragments
    /// emitted while it is set are prefixed with `NOT`.
    pub fn compile(
        &self,
        doc: &[(String, Value)],
        target: &mut Builder,
        negate: bool,
    ) -> Result<(), CompileError> {
        for (key, value) in doc {
            if ops::is_operator_token(key) {
                self.compile_logical(key, value, target)?;
            } else {
                self.compile_field(key, value, target, negate)?;
            }
        }
        Ok(())
    }

    /// Handle a `$`-prefixed document key.
    fn compile_logical(
        &self,
        key: &str,
        value: &Value,
        target: &mut Builder,
    ) -> Result<(), CompileError> {
        // $not and the compare operators are not legal document keys
        let op = LogicalOp::from_token(key)
            .ok_or_else(|| CompileError::UnknownTopLevelOperator(key.to_owned()))?;

        let Value::Array(members) = value else {
            return Err(CompileError::OperatorArrayTypeRequired(key.to_owned()));
        };

        let mut docs = Vec::with_capacity(members.len());
        for member in members {
            let Value::Object(doc) = member else {
                return Err(CompileError::LogicalOperandMustBeObject(key.to_owned()));
            };
            docs.push(doc.as_slice());
        }

        match op {
            LogicalOp::And => {
                // all members share one child scope
                let mut child = Builder::new();
                for doc in &docs {
                    self.compile(doc, &mut child, false)?;
                }
                let expr = child.into_expr();
                if !expr.is_empty() {
                    target.and(expr);
                }
            }
            LogicalOp::Or => {
                let mut parts = Vec::with_capacity(docs.len());
                for doc in &docs {
                    let mut child = Builder::new();
                    self.compile(doc, &mut child, false)?;
                    parts.push(child.into_grouped());
                }
                let expr = or_join(parts);
                if !expr.is_empty() {
                    target.and(expr);
                }
            }
            LogicalOp::Nor => {
                // every member compiles pre-negated, then AND of the negations
                let mut parts = Vec::with_capacity(docs.len());
                for doc in &docs {
                    let mut child = Builder::new();
                    self.compile(doc, &mut child, true)?;
                    parts.push(child.into_grouped());
                }
                let expr = and_join(parts);
                if !expr.is_empty() {
                    target.and(expr);
                }
            }
        }
        Ok(())
    }

    /// Handle a plain field key: scalar means implicit `$eq`, an object
    /// means a set of compare operators, anything else is invalid.
    fn compile_field(
        &self,
        field: &str,
        value: &Value,
        target: &mut Builder,
        negate: bool,
    ) -> Result<(), CompileError> {
        if !self.whitelist.allows(field) {
            return Err(CompileError::UnknownField(field.to_owned()));
        }

        match value.kind() {
            Kind::Scalar => {
                let arg = scalar_arg(value)
                    .ok_or_else(|| CompileError::InvalidFieldValueType(field.to_owned()))?;
                target.and(field_expr(negate, format!("{field} = ?"), vec![arg]));
                Ok(())
            }
            Kind::Object => {
                let Value::Object(entries) = value else {
                    return Err(CompileError::InvalidFieldValueType(field.to_owned()));
                };
                self.compile_compare(field, entries, target, negate)
            }
            Kind::Array | Kind::Unsupported => {
                Err(CompileError::InvalidFieldValueType(field.to_owned()))
            }
        }
    }

    /// Dispatch the entries of a field's operator object.
    fn compile_compare(
        &self,
        field: &str,
        entries: &[(String, Value)],
        target: &mut Builder,
        negate: bool,
    ) -> Result<(), CompileError> {
        // validate every key before emitting anything
        let mut dispatch = Vec::with_capacity(entries.len());
        for (token, operand) in entries {
            let op = CompareOp::from_token(token)
                .ok_or_else(|| CompileError::UnknownOperator(token.clone()))?;
            dispatch.push((op, operand));
        }

        for (op, operand) in dispatch {
            match op {
                CompareOp::Eq
                | CompareOp::Gt
                | CompareOp::Gte
                | CompareOp::Lt
                | CompareOp::Lte
                | CompareOp::Ne => {
                    let arg = scalar_arg(operand).ok_or_else(|| bad_operand(field, op))?;
                    // symbol() is Some for all six binary operators
                    let sym = op.symbol().unwrap_or("=");
                    target.and(field_expr(negate, format!("{field} {sym} ?"), vec![arg]));
                }
                CompareOp::In | CompareOp::Nin => {
                    let Value::Array(items) = operand else {
                        return Err(bad_operand(field, op));
                    };
                    let mut args = Vec::with_capacity(items.len());
                    for item in items {
                        args.push(scalar_arg(item).ok_or_else(|| bad_operand(field, op))?);
                    }
                    let placeholders = vec!["?"; items.len()].join(",");
                    let keyword = if op == CompareOp::Nin { "NOT IN" } else { "IN" };
                    target.and(field_expr(
                        negate,
                        format!("{field} {keyword} ({placeholders})"),
                        args,
                    ));
                }
                CompareOp::Sw | CompareOp::Ew | CompareOp::Ct => {
                    let Value::String(s) = operand else {
                        return Err(bad_operand(field, op));
                    };
                    if s.contains('%') || s.contains('_') {
                        return Err(CompileError::InvalidOperand {
                            field: field.to_owned(),
                            op,
                        });
                    }
                    let pattern = like_pattern(op, s);
                    target.and(field_expr(
                        negate,
                        format!("{field} LIKE ?"),
                        vec![Arg::Str(pattern)],
                    ));
                }
                CompareOp::Not => {
                    let Value::Object(inner) = operand else {
                        return Err(bad_operand(field, op));
                    };
                    // Re-enter through the normal field path with negation
                    // asserted: { f: { $not: { $eq: x }}} compiles as
                    // { f: { $eq: x }} under negate=true, into the same
                    // builder. Nested $not re-asserts, it does not toggle.
                    let normalized = vec![(field.to_owned(), Value::Object(inner.clone()))];
                    self.compile(&normalized, target, true)?;
                }
            }
        }
        Ok(())
    }
}

/// Convert a scalar value into a bindable argument.
fn scalar_arg(value: &Value) -> Option<Arg> {
    match value {
        Value::String(s) => Some(Arg::Str(s.clone())),
        Value::Integer(n) => Some(Arg::Int(*n)),
        Value::Float(n) => Some(Arg::Float(*n)),
        _ => None,
    }
}

/// Build a leaf fragment, prefixed with `NOT` when the scope is negated.
fn field_expr(negate: bool, sql: String, args: Vec<Arg>) -> SqlExpr {
    if negate {
        SqlExpr::new(format!("NOT {sql}"), args)
    } else {
        SqlExpr::new(sql, args)
    }
}

fn like_pattern(op: CompareOp, value: &str) -> String {
    match op {
        CompareOp::Sw => format!("{value}%"),
        CompareOp::Ew => format!("%{value}"),
        _ => format!("%{value}%"),
    }
}

fn bad_operand(field: &str, op: CompareOp) -> CompileError {
    CompileError::BadOperandType {
        field: field.to_owned(),
        op,
    }
}
