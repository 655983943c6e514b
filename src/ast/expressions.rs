//! Expression nodes.

use std::fmt;

use crate::ast::operators::{ArithmeticOperator, LogicOperator};
use crate::ast::query::{AnalyticClause, OrderByClause, Subquery, Table};
use crate::ast::tokens::Pos;
use crate::ast::{join_with_space, list, put_parentheses, quote_identifier, quote_string};
use crate::value::Primary;

/// A composable sub-expression.
///
/// Recursive variants are boxed; leaf variants that name program
/// objects carry a [`Pos`] for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Primitive(PrimitiveType),
    Identifier(Identifier),
    FieldReference(FieldReference),
    ColumnNumber(ColumnNumber),
    AllColumns(AllColumns),
    Parentheses(Box<Parentheses>),
    RowValue(Box<RowValue>),
    ValueList(ValueList),
    RowValueList(RowValueList),
    Variable(Variable),
    VariableSubstitution(Box<VariableSubstitution>),
    Flag(Flag),
    Placeholder(Placeholder),
    Arithmetic(Box<Arithmetic>),
    UnaryArithmetic(Box<UnaryArithmetic>),
    Concat(Concat),
    Comparison(Box<Comparison>),
    Is(Box<Is>),
    Between(Box<Between>),
    In(Box<In>),
    Like(Box<Like>),
    Any(Box<Any>),
    All(Box<All>),
    Exists(Box<Exists>),
    Logic(Box<Logic>),
    UnaryLogic(Box<UnaryLogic>),
    Function(Function),
    AggregateFunction(AggregateFunction),
    ListFunction(ListFunction),
    AnalyticFunction(Box<AnalyticFunction>),
    CaseExpr(Box<CaseExpr>),
    Subquery(Box<Subquery>),
    CursorStatus(CursorStatus),
    CursorAttribute(CursorAttribute),
    Dual(Dual),
    Stdin(Stdin),
    Table(Box<Table>),
    Join(Box<crate::ast::query::Join>),
}

impl Expression {
    /// Source position for diagnostics. Leaf nodes report their own
    /// position, composite nodes delegate to their leading child, and
    /// nodes synthesized without source report no position info.
    pub fn pos(&self) -> Pos {
        match self {
            Expression::Primitive(e) => e.pos.clone(),
            Expression::Identifier(e) => e.pos.clone(),
            Expression::FieldReference(e) => e.pos.clone(),
            Expression::ColumnNumber(e) => e.pos.clone(),
            Expression::Variable(e) => e.pos.clone(),
            Expression::Flag(e) => e.pos.clone(),
            Expression::Placeholder(e) => e.pos.clone(),
            Expression::Function(e) => e.pos.clone(),
            Expression::AggregateFunction(e) => e.pos.clone(),
            Expression::ListFunction(e) => e.pos.clone(),
            Expression::AnalyticFunction(e) => e.pos.clone(),
            Expression::CursorStatus(e) => e.cursor.pos.clone(),
            Expression::CursorAttribute(e) => e.cursor.pos.clone(),
            Expression::Parentheses(e) => e.expr.pos(),
            Expression::RowValue(e) => e.value.pos(),
            Expression::ValueList(e) => e.values.first().map(Expression::pos).unwrap_or_default(),
            Expression::RowValueList(e) => {
                e.row_values.first().map(Expression::pos).unwrap_or_default()
            }
            Expression::VariableSubstitution(e) => e.variable.pos.clone(),
            Expression::Arithmetic(e) => e.lhs.pos(),
            Expression::UnaryArithmetic(e) => e.operand.pos(),
            Expression::Concat(e) => e.items.first().map(Expression::pos).unwrap_or_default(),
            Expression::Comparison(e) => e.lhs.pos(),
            Expression::Is(e) => e.lhs.pos(),
            Expression::Between(e) => e.lhs.pos(),
            Expression::In(e) => e.lhs.pos(),
            Expression::Like(e) => e.lhs.pos(),
            Expression::Any(e) => e.lhs.pos(),
            Expression::All(e) => e.lhs.pos(),
            Expression::Logic(e) => e.lhs.pos(),
            Expression::UnaryLogic(e) => e.operand.pos(),
            Expression::Table(e) => e.object.pos(),
            Expression::Join(e) => e.table.pos(),
            _ => Pos::none(),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Primitive(e) => e.fmt(f),
            Expression::Identifier(e) => e.fmt(f),
            Expression::FieldReference(e) => e.fmt(f),
            Expression::ColumnNumber(e) => e.fmt(f),
            Expression::AllColumns(e) => e.fmt(f),
            Expression::Parentheses(e) => e.fmt(f),
            Expression::RowValue(e) => e.fmt(f),
            Expression::ValueList(e) => e.fmt(f),
            Expression::RowValueList(e) => e.fmt(f),
            Expression::Variable(e) => e.fmt(f),
            Expression::VariableSubstitution(e) => e.fmt(f),
            Expression::Flag(e) => e.fmt(f),
            Expression::Placeholder(e) => e.fmt(f),
            Expression::Arithmetic(e) => e.fmt(f),
            Expression::UnaryArithmetic(e) => e.fmt(f),
            Expression::Concat(e) => e.fmt(f),
            Expression::Comparison(e) => e.fmt(f),
            Expression::Is(e) => e.fmt(f),
            Expression::Between(e) => e.fmt(f),
            Expression::In(e) => e.fmt(f),
            Expression::Like(e) => e.fmt(f),
            Expression::Any(e) => e.fmt(f),
            Expression::All(e) => e.fmt(f),
            Expression::Exists(e) => e.fmt(f),
            Expression::Logic(e) => e.fmt(f),
            Expression::UnaryLogic(e) => e.fmt(f),
            Expression::Function(e) => e.fmt(f),
            Expression::AggregateFunction(e) => e.fmt(f),
            Expression::ListFunction(e) => e.fmt(f),
            Expression::AnalyticFunction(e) => e.fmt(f),
            Expression::CaseExpr(e) => e.fmt(f),
            Expression::Subquery(e) => e.fmt(f),
            Expression::CursorStatus(e) => e.fmt(f),
            Expression::CursorAttribute(e) => e.fmt(f),
            Expression::Dual(e) => e.fmt(f),
            Expression::Stdin(e) => e.fmt(f),
            Expression::Table(e) => e.fmt(f),
            Expression::Join(e) => e.fmt(f),
        }
    }
}

/// A literal wrapping a [`Primary`] value. The source literal text is
/// kept so numbers and datetimes render the way they were written.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveType {
    pub literal: String,
    pub value: Primary,
    pub pos: Pos,
}

impl PrimitiveType {
    pub fn new(literal: impl Into<String>, value: Primary, pos: Pos) -> PrimitiveType {
        PrimitiveType {
            literal: literal.into(),
            value,
            pos,
        }
    }

    /// Build a literal node from a bare value, e.g. in tests or when
    /// the executor synthesizes constants.
    pub fn from_primary(value: Primary) -> PrimitiveType {
        let literal = match &value {
            Primary::String(s) => s.clone(),
            Primary::Datetime(dt) => {
                dt.to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true)
            }
            other => other.to_string(),
        };
        PrimitiveType {
            literal,
            value,
            pos: Pos::none(),
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Primary::String(_) | Primary::Datetime(_) => {
                f.write_str(&quote_string(&self.literal))
            }
            _ if self.literal.is_empty() => write!(f, "{}", self.value),
            _ => f.write_str(&self.literal),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub literal: String,
    pub quoted: bool,
    pub pos: Pos,
}

impl Identifier {
    pub fn new(literal: impl Into<String>) -> Identifier {
        Identifier {
            literal: literal.into(),
            quoted: false,
            pos: Pos::none(),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quoted {
            f.write_str(&quote_identifier(&self.literal))
        } else {
            f.write_str(&self.literal)
        }
    }
}

/// `column` or `view.column`
#[derive(Debug, Clone, PartialEq)]
pub struct FieldReference {
    pub view: Option<Identifier>,
    pub column: Identifier,
    pub pos: Pos,
}

impl fmt::Display for FieldReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(view) = &self.view {
            write!(f, "{}.", view)?;
        }
        self.column.fmt(f)
    }
}

/// `view.3`: reference to a column by 1-based ordinal
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnNumber {
    pub view: Identifier,
    pub number: i64,
    pub pos: Pos,
}

impl fmt::Display for ColumnNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.view, self.number)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AllColumns;

impl fmt::Display for AllColumns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("*")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parentheses {
    pub expr: Expression,
}

impl fmt::Display for Parentheses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&put_parentheses(&self.expr.to_string()))
    }
}

/// A parenthesized comma-list used as a tuple operand. Distinct from a
/// single parenthesized scalar because tuple comparison has its own
/// semantics. Wraps a [`ValueList`] or a [`Subquery`].
#[derive(Debug, Clone, PartialEq)]
pub struct RowValue {
    pub value: Expression,
}

impl fmt::Display for RowValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueList {
    pub values: Vec<Expression>,
}

impl fmt::Display for ValueList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&put_parentheses(&list(&self.values)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowValueList {
    pub row_values: Vec<Expression>,
}

impl fmt::Display for RowValueList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&put_parentheses(&list(&self.row_values)))
    }
}

/// `@name`
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub pos: Pos,
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)
    }
}

/// `@var := value`
#[derive(Debug, Clone, PartialEq)]
pub struct VariableSubstitution {
    pub variable: Variable,
    pub value: Expression,
}

impl fmt::Display for VariableSubstitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} := {}", self.variable, self.value)
    }
}

/// `@@name`
#[derive(Debug, Clone, PartialEq)]
pub struct Flag {
    pub name: String,
    pub pos: Pos,
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@@{}", self.name)
    }
}

/// `?` (ordinal) or `:name` (named), for prepared statements
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    pub literal: String,
    pub ordinal: usize,
    pub name: Option<String>,
    pub pos: Pos,
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Arithmetic {
    pub lhs: Expression,
    pub operator: ArithmeticOperator,
    pub rhs: Expression,
}

impl fmt::Display for Arithmetic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.operator, self.rhs)
    }
}

/// Sign applied to a term, e.g. `-1`
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryArithmetic {
    pub operand: Expression,
    pub operator: ArithmeticOperator,
}

impl fmt::Display for UnaryArithmetic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator, self.operand)
    }
}

/// n-ary `||`, flattened during parsing
#[derive(Debug, Clone, PartialEq)]
pub struct Concat {
    pub items: Vec<Expression>,
}

impl fmt::Display for Concat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.items.iter().map(|i| i.to_string()).collect();
        f.write_str(&parts.join(" || "))
    }
}

/// Binary comparison; the operator keeps its source spelling so the
/// comparison engine can dispatch on it and `<>` round-trips.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub lhs: Expression,
    pub operator: String,
    pub rhs: Expression,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.operator, self.rhs)
    }
}

/// `lhs IS [NOT] rhs` where rhs is NULL or a ternary literal
#[derive(Debug, Clone, PartialEq)]
pub struct Is {
    pub lhs: Expression,
    pub rhs: Expression,
    pub negation: bool,
}

impl fmt::Display for Is {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec![self.lhs.to_string(), "IS".to_string()];
        if self.negation {
            parts.push("NOT".to_string());
        }
        parts.push(self.rhs.to_string());
        f.write_str(&join_with_space(&parts))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Between {
    pub lhs: Expression,
    pub low: Expression,
    pub high: Expression,
    pub negation: bool,
}

impl fmt::Display for Between {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec![self.lhs.to_string()];
        if self.negation {
            parts.push("NOT".to_string());
        }
        parts.push("BETWEEN".to_string());
        parts.push(self.low.to_string());
        parts.push("AND".to_string());
        parts.push(self.high.to_string());
        f.write_str(&join_with_space(&parts))
    }
}

/// `lhs [NOT] IN values` where values is a [`ValueList`], a
/// [`RowValueList`] or a [`Subquery`]
#[derive(Debug, Clone, PartialEq)]
pub struct In {
    pub lhs: Expression,
    pub values: Expression,
    pub negation: bool,
}

impl fmt::Display for In {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec![self.lhs.to_string()];
        if self.negation {
            parts.push("NOT".to_string());
        }
        parts.push("IN".to_string());
        parts.push(self.values.to_string());
        f.write_str(&join_with_space(&parts))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Like {
    pub lhs: Expression,
    pub pattern: Expression,
    pub negation: bool,
}

impl fmt::Display for Like {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec![self.lhs.to_string()];
        if self.negation {
            parts.push("NOT".to_string());
        }
        parts.push("LIKE".to_string());
        parts.push(self.pattern.to_string());
        f.write_str(&join_with_space(&parts))
    }
}

/// `lhs op ANY values`
#[derive(Debug, Clone, PartialEq)]
pub struct Any {
    pub lhs: Expression,
    pub operator: String,
    pub values: Expression,
}

impl fmt::Display for Any {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ANY {}", self.lhs, self.operator, self.values)
    }
}

/// `lhs op ALL values`
#[derive(Debug, Clone, PartialEq)]
pub struct All {
    pub lhs: Expression,
    pub operator: String,
    pub values: Expression,
}

impl fmt::Display for All {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ALL {}", self.lhs, self.operator, self.values)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Exists {
    pub query: Subquery,
}

impl fmt::Display for Exists {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EXISTS {}", self.query)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Logic {
    pub lhs: Expression,
    pub operator: LogicOperator,
    pub rhs: Expression,
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.operator, self.rhs)
    }
}

/// `NOT x` or `!x`; the spelling is kept
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryLogic {
    pub operand: Expression,
    pub operator: String,
}

impl fmt::Display for UnaryLogic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operator == "!" {
            write!(f, "!{}", self.operand)
        } else {
            write!(f, "{} {}", self.operator, self.operand)
        }
    }
}

/// Scalar function call
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub args: Vec<Expression>,
    pub pos: Pos,
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, list(&self.args))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateFunction {
    pub name: String,
    pub distinct: bool,
    pub args: Vec<Expression>,
    pub pos: Pos,
}

impl fmt::Display for AggregateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, option_args(self.distinct, &self.args))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListFunction {
    pub name: String,
    pub distinct: bool,
    pub args: Vec<Expression>,
    pub within_group: Option<OrderByClause>,
    pub pos: Pos,
}

impl fmt::Display for ListFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, option_args(self.distinct, &self.args))?;
        if let Some(order_by) = &self.within_group {
            write!(f, " WITHIN GROUP ({})", order_by)?;
        }
        Ok(())
    }
}

/// Any function with an `OVER` clause
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticFunction {
    pub name: String,
    pub distinct: bool,
    pub args: Vec<Expression>,
    pub ignore_nulls: bool,
    pub analytic_clause: AnalyticClause,
    pub pos: Pos,
}

impl fmt::Display for AnalyticFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, option_args(self.distinct, &self.args))?;
        if self.ignore_nulls {
            f.write_str(" IGNORE NULLS")?;
        }
        write!(f, " OVER ({})", self.analytic_clause)
    }
}

fn option_args(distinct: bool, args: &[Expression]) -> String {
    let mut parts = Vec::new();
    if distinct {
        parts.push("DISTINCT".to_string());
    }
    if !args.is_empty() {
        parts.push(list(args));
    }
    join_with_space(&parts)
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseExpr {
    pub value: Option<Expression>,
    pub when: Vec<CaseExprWhen>,
    pub else_expr: Option<CaseExprElse>,
}

impl fmt::Display for CaseExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec!["CASE".to_string()];
        if let Some(value) = &self.value {
            parts.push(value.to_string());
        }
        for w in &self.when {
            parts.push(w.to_string());
        }
        if let Some(e) = &self.else_expr {
            parts.push(e.to_string());
        }
        parts.push("END".to_string());
        f.write_str(&join_with_space(&parts))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseExprWhen {
    pub condition: Expression,
    pub result: Expression,
}

impl fmt::Display for CaseExprWhen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WHEN {} THEN {}", self.condition, self.result)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseExprElse {
    pub result: Expression,
}

impl fmt::Display for CaseExprElse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ELSE {}", self.result)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorStatusType {
    Open,
    InRange,
}

/// `CURSOR cur IS [NOT] OPEN` / `CURSOR cur IS [NOT] IN RANGE`
#[derive(Debug, Clone, PartialEq)]
pub struct CursorStatus {
    pub cursor: Identifier,
    pub negation: bool,
    pub status: CursorStatusType,
}

impl fmt::Display for CursorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec!["CURSOR".to_string(), self.cursor.to_string(), "IS".to_string()];
        if self.negation {
            parts.push("NOT".to_string());
        }
        parts.push(match self.status {
            CursorStatusType::Open => "OPEN".to_string(),
            CursorStatusType::InRange => "IN RANGE".to_string(),
        });
        f.write_str(&join_with_space(&parts))
    }
}

/// `CURSOR cur COUNT`
#[derive(Debug, Clone, PartialEq)]
pub struct CursorAttribute {
    pub cursor: Identifier,
}

impl fmt::Display for CursorAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CURSOR {} COUNT", self.cursor)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dual;

impl fmt::Display for Dual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DUAL")
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stdin;

impl fmt::Display for Stdin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("STDIN")
    }
}
