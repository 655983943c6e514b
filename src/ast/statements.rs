//! Top-level statements.

use std::fmt;

use crate::ast::expressions::{
    Expression, FieldReference, Flag, Identifier, Variable, VariableSubstitution,
};
use crate::ast::query::{FromClause, SelectQuery, WhereClause, WithClause};
use crate::ast::{block, join_with_space, list, put_parentheses, quote_string};

/// An executable unit of a program.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    SelectQuery(SelectQuery),
    InsertQuery(InsertQuery),
    UpdateQuery(UpdateQuery),
    DeleteQuery(DeleteQuery),
    ReplaceQuery(ReplaceQuery),
    CreateTable(CreateTable),
    AddColumns(AddColumns),
    DropColumns(DropColumns),
    RenameColumn(RenameColumn),
    SetTableAttribute(SetTableAttribute),
    VariableDeclaration(VariableDeclaration),
    VariableSubstitution(VariableSubstitution),
    DisposeVariable(DisposeVariable),
    CursorDeclaration(CursorDeclaration),
    OpenCursor(OpenCursor),
    CloseCursor(CloseCursor),
    DisposeCursor(DisposeCursor),
    FetchCursor(FetchCursor),
    ViewDeclaration(ViewDeclaration),
    DisposeView(DisposeView),
    FunctionDeclaration(FunctionDeclaration),
    AggregateDeclaration(AggregateDeclaration),
    DisposeFunction(DisposeFunction),
    StatementPreparation(StatementPreparation),
    ExecutePrepared(ExecutePrepared),
    DisposePrepared(DisposePrepared),
    If(If),
    While(While),
    WhileInCursor(WhileInCursor),
    Case(CaseStatement),
    FlowControl(FlowControl),
    Exit(Exit),
    Return(Return),
    TransactionControl(TransactionControl),
    SetFlag(SetFlag),
    Print(Print),
    Printf(Printf),
    Source(Source),
    Echo(Echo),
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::SelectQuery(s) => s.fmt(f),
            Statement::InsertQuery(s) => s.fmt(f),
            Statement::UpdateQuery(s) => s.fmt(f),
            Statement::DeleteQuery(s) => s.fmt(f),
            Statement::ReplaceQuery(s) => s.fmt(f),
            Statement::CreateTable(s) => s.fmt(f),
            Statement::AddColumns(s) => s.fmt(f),
            Statement::DropColumns(s) => s.fmt(f),
            Statement::RenameColumn(s) => s.fmt(f),
            Statement::SetTableAttribute(s) => s.fmt(f),
            Statement::VariableDeclaration(s) => s.fmt(f),
            Statement::VariableSubstitution(s) => s.fmt(f),
            Statement::DisposeVariable(s) => s.fmt(f),
            Statement::CursorDeclaration(s) => s.fmt(f),
            Statement::OpenCursor(s) => s.fmt(f),
            Statement::CloseCursor(s) => s.fmt(f),
            Statement::DisposeCursor(s) => s.fmt(f),
            Statement::FetchCursor(s) => s.fmt(f),
            Statement::ViewDeclaration(s) => s.fmt(f),
            Statement::DisposeView(s) => s.fmt(f),
            Statement::FunctionDeclaration(s) => s.fmt(f),
            Statement::AggregateDeclaration(s) => s.fmt(f),
            Statement::DisposeFunction(s) => s.fmt(f),
            Statement::StatementPreparation(s) => s.fmt(f),
            Statement::ExecutePrepared(s) => s.fmt(f),
            Statement::DisposePrepared(s) => s.fmt(f),
            Statement::If(s) => s.fmt(f),
            Statement::While(s) => s.fmt(f),
            Statement::WhileInCursor(s) => s.fmt(f),
            Statement::Case(s) => s.fmt(f),
            Statement::FlowControl(s) => s.fmt(f),
            Statement::Exit(s) => s.fmt(f),
            Statement::Return(s) => s.fmt(f),
            Statement::TransactionControl(s) => s.fmt(f),
            Statement::SetFlag(s) => s.fmt(f),
            Statement::Print(s) => s.fmt(f),
            Statement::Printf(s) => s.fmt(f),
            Statement::Source(s) => s.fmt(f),
            Statement::Echo(s) => s.fmt(f),
        }
    }
}

fn with_prefix(with: &Option<WithClause>, rest: Vec<String>) -> String {
    let mut parts = Vec::new();
    if let Some(with) = with {
        parts.push(with.to_string());
    }
    parts.extend(rest);
    join_with_space(&parts)
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsertQuery {
    pub with_clause: Option<WithClause>,
    pub table: Identifier,
    pub fields: Vec<Expression>,
    pub values: Vec<Expression>,
    pub query: Option<SelectQuery>,
}

impl fmt::Display for InsertQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec!["INSERT INTO".to_string(), self.table.to_string()];
        if !self.fields.is_empty() {
            parts.push(put_parentheses(&list(&self.fields)));
        }
        match &self.query {
            Some(query) => parts.push(query.to_string()),
            None => {
                parts.push("VALUES".to_string());
                parts.push(list(&self.values));
            }
        }
        f.write_str(&with_prefix(&self.with_clause, parts))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateSet {
    pub field: FieldReference,
    pub value: Expression,
}

impl fmt::Display for UpdateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.field, self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateQuery {
    pub with_clause: Option<WithClause>,
    pub tables: Vec<Expression>,
    pub set_list: Vec<UpdateSet>,
    pub from_clause: Option<FromClause>,
    pub where_clause: Option<WhereClause>,
}

impl fmt::Display for UpdateQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec![
            "UPDATE".to_string(),
            list(&self.tables),
            "SET".to_string(),
            list(&self.set_list),
        ];
        if let Some(from) = &self.from_clause {
            parts.push(from.to_string());
        }
        if let Some(where_clause) = &self.where_clause {
            parts.push(where_clause.to_string());
        }
        f.write_str(&with_prefix(&self.with_clause, parts))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteQuery {
    pub with_clause: Option<WithClause>,
    pub tables: Vec<Expression>,
    pub from_clause: FromClause,
    pub where_clause: Option<WhereClause>,
}

impl fmt::Display for DeleteQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec!["DELETE".to_string()];
        if !self.tables.is_empty() {
            parts.push(list(&self.tables));
        }
        parts.push(self.from_clause.to_string());
        if let Some(where_clause) = &self.where_clause {
            parts.push(where_clause.to_string());
        }
        f.write_str(&with_prefix(&self.with_clause, parts))
    }
}

/// `REPLACE INTO t [(fields)] USING (keys) VALUES ...`: insert-or-update
/// keyed on the `USING` columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaceQuery {
    pub with_clause: Option<WithClause>,
    pub table: Identifier,
    pub fields: Vec<Expression>,
    pub keys: Vec<Expression>,
    pub values: Vec<Expression>,
    pub query: Option<SelectQuery>,
}

impl fmt::Display for ReplaceQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec!["REPLACE INTO".to_string(), self.table.to_string()];
        if !self.fields.is_empty() {
            parts.push(put_parentheses(&list(&self.fields)));
        }
        parts.push("USING".to_string());
        parts.push(put_parentheses(&list(&self.keys)));
        match &self.query {
            Some(query) => parts.push(query.to_string()),
            None => {
                parts.push("VALUES".to_string());
                parts.push(list(&self.values));
            }
        }
        f.write_str(&with_prefix(&self.with_clause, parts))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable {
    pub table: Identifier,
    pub fields: Vec<Expression>,
    pub query: Option<SelectQuery>,
}

impl fmt::Display for CreateTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec!["CREATE TABLE".to_string(), self.table.to_string()];
        if !self.fields.is_empty() {
            parts.push(put_parentheses(&list(&self.fields)));
        }
        if let Some(query) = &self.query {
            parts.push("AS".to_string());
            parts.push(query.to_string());
        }
        f.write_str(&join_with_space(&parts))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefault {
    pub column: Identifier,
    pub value: Option<Expression>,
}

impl fmt::Display for ColumnDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{} DEFAULT {}", self.column, value),
            None => self.column.fmt(f),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnPositionType {
    First,
    Last,
    After,
    Before,
}

impl fmt::Display for ColumnPositionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColumnPositionType::First => "FIRST",
            ColumnPositionType::Last => "LAST",
            ColumnPositionType::After => "AFTER",
            ColumnPositionType::Before => "BEFORE",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnPosition {
    pub position: ColumnPositionType,
    pub column: Option<Expression>,
}

impl fmt::Display for ColumnPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.column {
            Some(column) => write!(f, "{} {}", self.position, column),
            None => self.position.fmt(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddColumns {
    pub table: Identifier,
    pub columns: Vec<ColumnDefault>,
    pub position: Option<ColumnPosition>,
}

impl fmt::Display for AddColumns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec![
            "ALTER TABLE".to_string(),
            self.table.to_string(),
            "ADD".to_string(),
            put_parentheses(&list(&self.columns)),
        ];
        if let Some(position) = &self.position {
            parts.push(position.to_string());
        }
        f.write_str(&join_with_space(&parts))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropColumns {
    pub table: Identifier,
    pub columns: Vec<Expression>,
}

impl fmt::Display for DropColumns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ALTER TABLE {} DROP {}",
            self.table,
            put_parentheses(&list(&self.columns))
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenameColumn {
    pub table: Identifier,
    pub old: Identifier,
    pub new: Identifier,
}

impl fmt::Display for RenameColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ALTER TABLE {} RENAME {} TO {}",
            self.table, self.old, self.new
        )
    }
}

/// `ALTER TABLE t SET attr TO value`
#[derive(Debug, Clone, PartialEq)]
pub struct SetTableAttribute {
    pub table: Identifier,
    pub attribute: Identifier,
    pub value: Expression,
}

impl fmt::Display for SetTableAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ALTER TABLE {} SET {} TO {}",
            self.table, self.attribute, self.value
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableAssignment {
    pub variable: Variable,
    pub value: Option<Expression>,
}

impl fmt::Display for VariableAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{} := {}", self.variable, value),
            None => self.variable.fmt(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub assignments: Vec<VariableAssignment>,
}

impl fmt::Display for VariableDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DECLARE {}", list(&self.assignments))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisposeVariable {
    pub variable: Variable,
}

impl fmt::Display for DisposeVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DISPOSE {}", self.variable)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CursorDeclaration {
    pub cursor: Identifier,
    pub query: SelectQuery,
}

impl fmt::Display for CursorDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DECLARE {} CURSOR FOR {}", self.cursor, self.query)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpenCursor {
    pub cursor: Identifier,
}

impl fmt::Display for OpenCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OPEN {}", self.cursor)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CloseCursor {
    pub cursor: Identifier,
}

impl fmt::Display for CloseCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CLOSE {}", self.cursor)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisposeCursor {
    pub cursor: Identifier,
}

impl fmt::Display for DisposeCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DISPOSE CURSOR {}", self.cursor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPositionType {
    Next,
    Prior,
    First,
    Last,
    Absolute,
    Relative,
}

impl fmt::Display for FetchPositionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FetchPositionType::Next => "NEXT",
            FetchPositionType::Prior => "PRIOR",
            FetchPositionType::First => "FIRST",
            FetchPositionType::Last => "LAST",
            FetchPositionType::Absolute => "ABSOLUTE",
            FetchPositionType::Relative => "RELATIVE",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchPosition {
    pub position: FetchPositionType,
    pub number: Option<Expression>,
}

impl fmt::Display for FetchPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.number {
            Some(number) => write!(f, "{} {}", self.position, number),
            None => self.position.fmt(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchCursor {
    pub position: Option<FetchPosition>,
    pub cursor: Identifier,
    pub variables: Vec<Variable>,
}

impl fmt::Display for FetchCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec!["FETCH".to_string()];
        if let Some(position) = &self.position {
            parts.push(position.to_string());
        }
        parts.push(self.cursor.to_string());
        parts.push("INTO".to_string());
        parts.push(list(&self.variables));
        f.write_str(&join_with_space(&parts))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewDeclaration {
    pub view: Identifier,
    pub fields: Vec<Expression>,
    pub query: Option<SelectQuery>,
}

impl fmt::Display for ViewDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec!["DECLARE".to_string(), self.view.to_string(), "VIEW".to_string()];
        if !self.fields.is_empty() {
            parts.push(put_parentheses(&list(&self.fields)));
        }
        if let Some(query) = &self.query {
            parts.push("AS".to_string());
            parts.push(query.to_string());
        }
        f.write_str(&join_with_space(&parts))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisposeView {
    pub view: Identifier,
}

impl fmt::Display for DisposeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DISPOSE VIEW {}", self.view)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub name: Identifier,
    pub parameters: Vec<VariableAssignment>,
    pub statements: Vec<Statement>,
}

impl fmt::Display for FunctionDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DECLARE {} FUNCTION {} AS BEGIN {} END",
            self.name,
            put_parentheses(&list(&self.parameters)),
            block(&self.statements)
        )
    }
}

/// User-defined aggregate: the first parameter names the cursor the
/// executor feeds the grouped values through.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateDeclaration {
    pub name: Identifier,
    pub cursor: Identifier,
    pub parameters: Vec<VariableAssignment>,
    pub statements: Vec<Statement>,
}

impl fmt::Display for AggregateDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut params = vec![self.cursor.to_string()];
        params.extend(self.parameters.iter().map(|p| p.to_string()));
        write!(
            f,
            "DECLARE {} AGGREGATE ({}) AS BEGIN {} END",
            self.name,
            params.join(", "),
            block(&self.statements)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisposeFunction {
    pub name: Identifier,
}

impl fmt::Display for DisposeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DISPOSE FUNCTION {}", self.name)
    }
}

/// `PREPARE name FROM 'statement text'`
#[derive(Debug, Clone, PartialEq)]
pub struct StatementPreparation {
    pub name: Identifier,
    pub statement: String,
}

impl fmt::Display for StatementPreparation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PREPARE {} FROM {}",
            self.name,
            quote_string(&self.statement)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExecutePrepared {
    pub name: Identifier,
    pub values: Vec<Expression>,
}

impl fmt::Display for ExecutePrepared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EXECUTE {}", self.name)?;
        if !self.values.is_empty() {
            write!(f, " USING {}", list(&self.values))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisposePrepared {
    pub name: Identifier,
}

impl fmt::Display for DisposePrepared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DISPOSE PREPARE {}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElseIf {
    pub condition: Expression,
    pub statements: Vec<Statement>,
}

impl fmt::Display for ElseIf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ELSEIF {} THEN {}", self.condition, block(&self.statements))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Else {
    pub statements: Vec<Statement>,
}

impl fmt::Display for Else {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ELSE {}", block(&self.statements))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct If {
    pub condition: Expression,
    pub statements: Vec<Statement>,
    pub else_if: Vec<ElseIf>,
    pub else_stmt: Option<Else>,
}

impl fmt::Display for If {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec![
            "IF".to_string(),
            self.condition.to_string(),
            "THEN".to_string(),
            block(&self.statements),
        ];
        for elseif in &self.else_if {
            parts.push(elseif.to_string());
        }
        if let Some(else_stmt) = &self.else_stmt {
            parts.push(else_stmt.to_string());
        }
        parts.push("END IF".to_string());
        f.write_str(&join_with_space(&parts))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct While {
    pub condition: Expression,
    pub statements: Vec<Statement>,
}

impl fmt::Display for While {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WHILE {} DO {} END WHILE",
            self.condition,
            block(&self.statements)
        )
    }
}

/// `WHILE @a, @b IN cur DO ... END WHILE`
#[derive(Debug, Clone, PartialEq)]
pub struct WhileInCursor {
    pub variables: Vec<Variable>,
    pub cursor: Identifier,
    pub statements: Vec<Statement>,
}

impl fmt::Display for WhileInCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WHILE {} IN {} DO {} END WHILE",
            list(&self.variables),
            self.cursor,
            block(&self.statements)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseStatementWhen {
    pub condition: Expression,
    pub statements: Vec<Statement>,
}

impl fmt::Display for CaseStatementWhen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WHEN {} THEN {}", self.condition, block(&self.statements))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseStatement {
    pub value: Option<Expression>,
    pub when: Vec<CaseStatementWhen>,
    pub else_stmt: Option<Else>,
}

impl fmt::Display for CaseStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec!["CASE".to_string()];
        if let Some(value) = &self.value {
            parts.push(value.to_string());
        }
        for when in &self.when {
            parts.push(when.to_string());
        }
        if let Some(else_stmt) = &self.else_stmt {
            parts.push(else_stmt.to_string());
        }
        parts.push("END CASE".to_string());
        f.write_str(&join_with_space(&parts))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowControl {
    Continue,
    Break,
}

impl fmt::Display for FlowControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FlowControl::Continue => "CONTINUE",
            FlowControl::Break => "BREAK",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Exit {
    pub code: Option<Expression>,
}

impl fmt::Display for Exit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "EXIT {}", code),
            None => f.write_str("EXIT"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Return {
    pub value: Option<Expression>,
}

impl fmt::Display for Return {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "RETURN {}", value),
            None => f.write_str("RETURN"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionControl {
    Commit,
    Rollback,
}

impl fmt::Display for TransactionControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransactionControl::Commit => "COMMIT",
            TransactionControl::Rollback => "ROLLBACK",
        })
    }
}

/// `SET @@flag TO value`
#[derive(Debug, Clone, PartialEq)]
pub struct SetFlag {
    pub flag: Flag,
    pub value: Expression,
}

impl fmt::Display for SetFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SET {} TO {}", self.flag, self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Print {
    pub value: Expression,
}

impl fmt::Display for Print {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PRINT {}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Printf {
    pub format: Expression,
    pub values: Vec<Expression>,
}

impl fmt::Display for Printf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PRINTF {}", self.format)?;
        if !self.values.is_empty() {
            write!(f, " USING {}", list(&self.values))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    pub file_path: Expression,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SOURCE {}", self.file_path)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Echo {
    pub value: Expression,
}

impl fmt::Display for Echo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ECHO {}", self.value)
    }
}
