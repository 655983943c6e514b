//! # csvql
//!
//! The front end and type substrate of a SQL-dialect query engine for
//! CSV-like tabular data: a scanner and recursive-descent parser that
//! turn query text into a re-renderable AST, the `Primary` scalar
//! domain with three-valued logic, and the coercion/comparison rules
//! every later evaluation stage builds on.
//!
//! ```
//! let program = csvql::parse("select c1 from t1 where c1 = 1").unwrap();
//! assert_eq!(program.statements.len(), 1);
//! assert_eq!(
//!     program.statements[0].to_string(),
//!     "SELECT c1 FROM t1 WHERE c1 = 1"
//! );
//! ```
//!
//! Query execution, file I/O and the CLI surface are external to this
//! crate; they consume [`Statement`] trees and [`Primary`] values
//! through the interfaces exported here.

pub mod ast;
pub mod coerce;
pub mod compare;
pub mod dtformat;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod ternary;
pub mod value;

pub use ast::{Expression, Statement};
pub use coerce::{
    maybe_integer, maybe_number, str_to_time, to_boolean, to_datetime, to_float, to_integer,
    to_string, DatetimeContext,
};
pub use compare::{
    compare, compare_combinedly, compare_row_values, equal, equivalent, greater,
    greater_or_equal, less, less_or_equal, not_equal, ComparisonResult, RowValue,
};
pub use dtformat::{convert_datetime_format, DatetimeFormatMap};
pub use error::{ComparisonError, SyntaxError};
pub use lexer::Scanner;
pub use parser::{parse, parse_with, ParseOptions, Parser, Program};
pub use ternary::Ternary;
pub use value::Primary;
