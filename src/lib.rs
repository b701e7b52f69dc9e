pub mod builder;
pub mod cli;
pub mod compiler;
pub mod ops;
pub mod query;
pub mod value;
pub mod whitelist;

pub use builder::{Arg, Builder, SqlExpr};
pub use compiler::{CompileError, Compiler};
pub use ops::{CompareOp, LogicalOp};
pub use query::{ExecError, Executor, JsonQuery, QueryError, QueryOption, Table};
pub use value::{Kind, Value};
pub use whitelist::FieldWhitelist;
