//! Abstract syntax tree for the query dialect.
//!
//! Two node families live here. [`statements::Statement`] is the
//! top-level executable unit — queries, DML, DDL, procedural control
//! flow, declarations. [`expressions::Expression`] is the composable
//! sub-expression family — literals, references, predicates, operators,
//! function calls and the clause/table nodes that queries are built of.
//!
//! Every node renders back to source text through [`std::fmt::Display`].
//! The rendered text is canonical (uppercase keywords, normalized
//! spacing) rather than byte-identical to the input, but it is always
//! re-parseable to a structurally equal tree; the executor relies on
//! this for logging and re-entrant execution.
//!
//! Submodules:
//!
//! - **[tokens]** - lexical tokens, keyword tables and source positions
//! - **[operators]** - operator enums and their render spellings
//! - **[expressions]** - expression nodes
//! - **[query]** - query structure: clauses, tables, joins, set operations
//! - **[statements]** - top-level statements

pub mod expressions;
pub mod operators;
pub mod query;
pub mod statements;
pub mod tokens;

use std::fmt;

pub use expressions::Expression;
pub use statements::Statement;
pub use tokens::{Keyword, Pos, Token, TokenKind};

pub(crate) fn join_with_space(parts: &[String]) -> String {
    parts.join(" ")
}

pub(crate) fn list<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn put_parentheses(s: &str) -> String {
    format!("({})", s)
}

pub(crate) fn quote_string(s: &str) -> String {
    format!("'{}'", s)
}

pub(crate) fn quote_identifier(s: &str) -> String {
    format!("`{}`", s)
}

pub(crate) fn block(statements: &[Statement]) -> String {
    statements
        .iter()
        .map(|s| format!("{};", s))
        .collect::<Vec<_>>()
        .join(" ")
}
