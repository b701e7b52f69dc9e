//! The predicate accumulator.
//!
//! A [`Builder`] is an append-only conjunction of SQL fragments. The
//! compiler fills one builder per document scope; nested logical scopes get
//! fresh builders whose rendered output is folded back into the parent as a
//! single opaque expression. Rendering joins fragments with ` AND ` and
//! concatenates their arguments left to right, so placeholder `i` always
//! pairs with argument `i`.

/// A scalar argument bound to one `?` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Str(String),
    Int(i64),
    Float(f64),
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Str(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Str(s)
    }
}

impl From<i64> for Arg {
    fn from(n: i64) -> Self {
        Arg::Int(n)
    }
}

impl From<f64> for Arg {
    fn from(n: f64) -> Self {
        Arg::Float(n)
    }
}

/// One SQL fragment with the arguments bound to its placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlExpr {
    pub sql: String,
    pub args: Vec<Arg>,
}

impl SqlExpr {
    pub fn new(sql: impl Into<String>, args: Vec<Arg>) -> Self {
        SqlExpr {
            sql: sql.into(),
            args,
        }
    }

    /// An expression that renders to nothing.
    pub fn empty() -> Self {
        SqlExpr {
            sql: String::new(),
            args: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}

/// Append-only, render-once conjunction of SQL fragments.
#[derive(Debug, Clone, Default)]
pub struct Builder {
    conds: Vec<SqlExpr>,
}

impl Builder {
    pub fn new() -> Self {
        Builder::default()
    }

    /// Append one fragment to the conjunction.
    pub fn and(&mut self, expr: SqlExpr) {
        self.conds.push(expr);
    }

    pub fn is_empty(&self) -> bool {
        self.conds.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conds.len()
    }

    /// Render the conjunction to `(sql, args)`.
    ///
    /// Fragments appear in append order; an empty builder renders to
    /// `("", [])`, meaning "match all rows".
    pub fn to_sql(&self) -> (String, Vec<Arg>) {
        let sql = self
            .conds
            .iter()
            .map(|c| c.sql.as_str())
            .collect::<Vec<_>>()
            .join(" AND ");
        let args = self.conds.iter().flat_map(|c| c.args.clone()).collect();
        (sql, args)
    }

    /// Collapse into a single expression for folding into a parent builder.
    pub fn into_expr(self) -> SqlExpr {
        let (sql, args) = self.to_sql();
        SqlExpr::new(sql, args)
    }

    /// Like [`Builder::into_expr`], but parenthesized when the render holds
    /// more than one fragment, so it stays atomic under an enclosing OR.
    pub fn into_grouped(self) -> SqlExpr {
        let multi = self.len() > 1;
        let (sql, args) = self.to_sql();
        if multi {
            SqlExpr::new(format!("({sql})"), args)
        } else {
            SqlExpr::new(sql, args)
        }
    }
}

/// Join already-rendered expressions with OR into one parenthesized
/// expression. Empty members are dropped; a single member passes through
/// unwrapped.
pub fn or_join(members: Vec<SqlExpr>) -> SqlExpr {
    join(members, " OR ", true)
}

/// Join already-rendered expressions with AND into one expression.
///
/// Used for `$nor`, whose members compile pre-negated (De Morgan: NOR is
/// the AND of the negations).
pub fn and_join(members: Vec<SqlExpr>) -> SqlExpr {
    join(members, " AND ", false)
}

fn join(members: Vec<SqlExpr>, sep: &str, wrap: bool) -> SqlExpr {
    let mut members: Vec<SqlExpr> = members.into_iter().filter(|m| !m.is_empty()).collect();
    match members.len() {
        0 => SqlExpr::empty(),
        1 => members.remove(0),
        _ => {
            let sql = members
                .iter()
                .map(|m| m.sql.as_str())
                .collect::<Vec<_>>()
                .join(sep);
            let args = members.into_iter().flat_map(|m| m.args).collect();
            if wrap {
                SqlExpr::new(format!("({sql})"), args)
            } else {
                SqlExpr::new(sql, args)
            }
        }
    }
}
