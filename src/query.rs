//! The query façade.
//!
//! [`JsonQuery`] ties the pieces together: it holds the field whitelist,
//! owns the root predicate builder, decodes incoming JSON, runs the
//! compiler, and hands the rendered `(sql, args)` pair to an [`Executor`]
//! collaborator for the actual database round trip. One instance owns one
//! root predicate; use a fresh instance per in-flight query.

use crate::{
    builder::{Arg, Builder},
    compiler::{CompileError, Compiler},
    value::{self, Value},
    whitelist::FieldWhitelist,
};

/// Errors surfaced by the query façade.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryError {
    /// The input was not decodable JSON, or not a JSON object
    MalformedInput,

    /// The document decoded but failed compilation
    Compile(CompileError),

    /// An execution call was made before `set_table`
    NoTable,

    /// The execution collaborator reported a failure
    Exec(ExecError),
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryError::MalformedInput => write!(f, "malformed json"),
            QueryError::Compile(e) => write!(f, "{}", e),
            QueryError::NoTable => write!(f, "no table bound. call set_table first"),
            QueryError::Exec(e) => write!(f, "execution failed: {}", e),
        }
    }
}

impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QueryError::Compile(e) => Some(e),
            QueryError::Exec(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CompileError> for QueryError {
    fn from(e: CompileError) -> Self {
        QueryError::Compile(e)
    }
}

/// Failure reported by an [`Executor`] implementation.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecError(pub String);

impl std::fmt::Display for ExecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ExecError {}

/// Knobs forwarded to the execution collaborator alongside the predicate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOption {
    /// ORDER BY clause content, driver syntax
    pub order_by: Option<String>,
    /// Maximum number of rows to fetch
    pub limit: Option<i64>,
}

/// Table descriptor bound by [`JsonQuery::set_table`].
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
}

/// Execution collaborator that runs a rendered predicate against a store.
///
/// Rows come back as decoded [`Value::Object`] documents; binding them to
/// typed records, ordering semantics, and retry policy are all the driver's
/// concern. The façade only renders and forwards.
pub trait Executor {
    /// Fetch rows from `table` matching the predicate, honouring `opt`.
    /// An empty `sql` means no predicate: match all rows.
    fn fetch(
        &self,
        table: &Table,
        sql: &str,
        args: &[Arg],
        opt: &QueryOption,
    ) -> Result<Vec<Value>, ExecError>;

    /// Count rows in `table` matching the predicate.
    fn count(&self, table: &Table, sql: &str, args: &[Arg]) -> Result<i64, ExecError>;
}

/// Compiles MongoDB-style JSON filter documents into SQL predicates.
///
/// # Examples
///
/// ```
/// use jsonwhere::{FieldWhitelist, JsonQuery};
///
/// let mut q = JsonQuery::new(FieldWhitelist::allow_all());
/// q.parse(r#"{"age": {"$gt": 21}}"#).unwrap();
/// let (sql, args) = q.to_sql();
/// assert_eq!(sql, "age > ?");
/// assert_eq!(args.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct JsonQuery {
    whitelist: FieldWhitelist,
    root: Builder,
    table: Option<Table>,
}

impl JsonQuery {
    pub fn new(whitelist: FieldWhitelist) -> Self {
        JsonQuery {
            whitelist,
            root: Builder::new(),
            table: None,
        }
    }

    /// Decode and compile a JSON query document.
    ///
    /// The root builder is replaced only on success; a failed parse leaves
    /// no partial predicate behind.
    pub fn parse(&mut self, json: &str) -> Result<(), QueryError> {
        let decoded: serde_json::Value =
            serde_json::from_str(json).map_err(|_| QueryError::MalformedInput)?;
        let Value::Object(doc) = value::from_json(decoded) else {
            return Err(QueryError::MalformedInput);
        };

        let mut root = Builder::new();
        Compiler::new(&self.whitelist).compile(&doc, &mut root, false)?;
        self.root = root;
        Ok(())
    }

    /// Render the compiled predicate.
    ///
    /// Returns `("", [])` when nothing was compiled, meaning "match all
    /// rows".
    pub fn to_sql(&self) -> (String, Vec<Arg>) {
        self.root.to_sql()
    }

    /// Bind the table later execution calls run against. `plural`
    /// pluralizes the name with a trailing `s`, the usual ORM table naming
    /// convention.
    pub fn set_table(&mut self, name: &str, plural: bool) {
        let name = if plural {
            format!("{name}s")
        } else {
            name.to_string()
        };
        self.table = Some(Table { name });
    }

    fn table(&self) -> Result<&Table, QueryError> {
        self.table.as_ref().ok_or(QueryError::NoTable)
    }

    /// Fetch all rows matching the compiled predicate.
    pub fn find<E: Executor>(
        &self,
        db: &E,
        opt: Option<QueryOption>,
    ) -> Result<Vec<Value>, QueryError> {
        let table = self.table()?;
        let (sql, args) = self.to_sql();
        db.fetch(table, &sql, &args, &opt.unwrap_or_default())
            .map_err(QueryError::Exec)
    }

    /// Alias for [`JsonQuery::find`].
    pub fn all<E: Executor>(
        &self,
        db: &E,
        opt: Option<QueryOption>,
    ) -> Result<Vec<Value>, QueryError> {
        self.find(db, opt)
    }

    /// Fetch the first row matching the compiled predicate.
    pub fn first<E: Executor>(
        &self,
        db: &E,
        opt: Option<QueryOption>,
    ) -> Result<Option<Value>, QueryError> {
        let mut opt = opt.unwrap_or_default();
        opt.limit = Some(1);
        Ok(self.find(db, Some(opt))?.into_iter().next())
    }

    /// Fetch the last row matching the compiled predicate.
    pub fn last<E: Executor>(
        &self,
        db: &E,
        opt: Option<QueryOption>,
    ) -> Result<Option<Value>, QueryError> {
        Ok(self.find(db, opt)?.pop())
    }

    /// Count rows matching the compiled predicate.
    pub fn count<E: Executor>(&self, db: &E) -> Result<i64, QueryError> {
        let table = self.table()?;
        let (sql, args) = self.to_sql();
        db.count(table, &sql, &args).map_err(QueryError::Exec)
    }
}
