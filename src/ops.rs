//! The closed operator taxonomy.
//!
//! Operator keys are marked with a leading `$`. The sets are closed: a
//! marked key that is not in [`LogicalOp`] is rejected at document level,
//! and an object key under a field that is not in [`CompareOp`] is rejected
//! as an unknown operator.

use std::fmt;

/// Marker character that introduces an operator key.
pub const OPERATOR_MARKER: char = '$';

/// Check whether a document key is an operator token.
pub fn is_operator_token(key: &str) -> bool {
    key.starts_with(OPERATOR_MARKER)
}

/// Logical combinators accepted as document keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    /// `$and` - conjunction of sub-documents
    And,
    /// `$or` - disjunction of sub-documents
    Or,
    /// `$nor` - joint denial: none of the sub-documents match
    Nor,
}

impl LogicalOp {
    /// Look a token up in the logical operator set.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "$and" => Some(LogicalOp::And),
            "$or" => Some(LogicalOp::Or),
            "$nor" => Some(LogicalOp::Nor),
            _ => None,
        }
    }

    pub fn as_token(self) -> &'static str {
        match self {
            LogicalOp::And => "$and",
            LogicalOp::Or => "$or",
            LogicalOp::Nor => "$nor",
        }
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// Comparison operators accepted inside a field's operator object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `$eq` - equal
    Eq,
    /// `$gt` - greater than
    Gt,
    /// `$gte` - greater than or equal
    Gte,
    /// `$lt` - less than
    Lt,
    /// `$lte` - less than or equal
    Lte,
    /// `$ne` - not equal
    Ne,
    /// `$in` - in array
    In,
    /// `$nin` - not in array
    Nin,
    /// `$not` - negate a nested operator object
    Not,
    /// `$sw` - starts with
    Sw,
    /// `$ew` - ends with
    Ew,
    /// `$ct` - contains
    Ct,
}

impl CompareOp {
    /// Look a token up in the compare operator set.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "$eq" => Some(CompareOp::Eq),
            "$gt" => Some(CompareOp::Gt),
            "$gte" => Some(CompareOp::Gte),
            "$lt" => Some(CompareOp::Lt),
            "$lte" => Some(CompareOp::Lte),
            "$ne" => Some(CompareOp::Ne),
            "$in" => Some(CompareOp::In),
            "$nin" => Some(CompareOp::Nin),
            "$not" => Some(CompareOp::Not),
            "$sw" => Some(CompareOp::Sw),
            "$ew" => Some(CompareOp::Ew),
            "$ct" => Some(CompareOp::Ct),
            _ => None,
        }
    }

    pub fn as_token(self) -> &'static str {
        match self {
            CompareOp::Eq => "$eq",
            CompareOp::Gt => "$gt",
            CompareOp::Gte => "$gte",
            CompareOp::Lt => "$lt",
            CompareOp::Lte => "$lte",
            CompareOp::Ne => "$ne",
            CompareOp::In => "$in",
            CompareOp::Nin => "$nin",
            CompareOp::Not => "$not",
            CompareOp::Sw => "$sw",
            CompareOp::Ew => "$ew",
            CompareOp::Ct => "$ct",
        }
    }

    /// SQL comparison symbol for the six binary operators.
    pub fn symbol(self) -> Option<&'static str> {
        match self {
            CompareOp::Eq => Some("="),
            CompareOp::Gt => Some(">"),
            CompareOp::Gte => Some(">="),
            CompareOp::Lt => Some("<"),
            CompareOp::Lte => Some("<="),
            CompareOp::Ne => Some("<>"),
            _ => None,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}
