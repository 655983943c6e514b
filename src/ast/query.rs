//! Query structure: select entities, clauses, tables, joins and set
//! operations.

use std::fmt;

use crate::ast::expressions::{Expression, Identifier};
use crate::ast::operators::{
    JoinDirection, JoinType, NullsPosition, SetOperator, SortDirection,
};
use crate::ast::{join_with_space, list, put_parentheses};

/// A complete (possibly compound) select query.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    pub with_clause: Option<WithClause>,
    pub entity: SelectComponent,
    pub order_by_clause: Option<OrderByClause>,
    pub limit_clause: Option<LimitClause>,
    pub offset_clause: Option<OffsetClause>,
}

impl fmt::Display for SelectQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(with) = &self.with_clause {
            parts.push(with.to_string());
        }
        parts.push(self.entity.to_string());
        if let Some(order_by) = &self.order_by_clause {
            parts.push(order_by.to_string());
        }
        if let Some(limit) = &self.limit_clause {
            parts.push(limit.to_string());
        }
        if let Some(offset) = &self.offset_clause {
            parts.push(offset.to_string());
        }
        f.write_str(&join_with_space(&parts))
    }
}

/// Either a plain select entity or a set operation over two of them.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectComponent {
    Entity(SelectEntity),
    Set(Box<SelectSet>),
}

impl fmt::Display for SelectComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectComponent::Entity(e) => e.fmt(f),
            SelectComponent::Set(s) => s.fmt(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectEntity {
    pub select_clause: SelectClause,
    pub from_clause: Option<FromClause>,
    pub where_clause: Option<WhereClause>,
    pub group_by_clause: Option<GroupByClause>,
    pub having_clause: Option<HavingClause>,
}

impl fmt::Display for SelectEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec![self.select_clause.to_string()];
        if let Some(from) = &self.from_clause {
            parts.push(from.to_string());
        }
        if let Some(where_clause) = &self.where_clause {
            parts.push(where_clause.to_string());
        }
        if let Some(group_by) = &self.group_by_clause {
            parts.push(group_by.to_string());
        }
        if let Some(having) = &self.having_clause {
            parts.push(having.to_string());
        }
        f.write_str(&join_with_space(&parts))
    }
}

/// `lhs UNION [ALL] rhs` and friends. `INTERSECT` binds tighter than
/// `UNION`/`EXCEPT`; the parser encodes that in the tree shape.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectSet {
    pub lhs: SelectComponent,
    pub operator: SetOperator,
    pub all: bool,
    pub rhs: SelectComponent,
}

impl fmt::Display for SelectSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec![self.lhs.to_string(), self.operator.to_string()];
        if self.all {
            parts.push("ALL".to_string());
        }
        parts.push(self.rhs.to_string());
        f.write_str(&join_with_space(&parts))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectClause {
    pub distinct: bool,
    pub fields: Vec<Field>,
}

impl fmt::Display for SelectClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec!["SELECT".to_string()];
        if self.distinct {
            parts.push("DISTINCT".to_string());
        }
        parts.push(list(&self.fields));
        f.write_str(&join_with_space(&parts))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FromClause {
    pub tables: Vec<Expression>,
}

impl fmt::Display for FromClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FROM {}", list(&self.tables))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    pub filter: Expression,
}

impl fmt::Display for WhereClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WHERE {}", self.filter)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupByClause {
    pub items: Vec<Expression>,
}

impl fmt::Display for GroupByClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GROUP BY {}", list(&self.items))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HavingClause {
    pub filter: Expression,
}

impl fmt::Display for HavingClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HAVING {}", self.filter)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderByClause {
    pub items: Vec<OrderItem>,
}

impl fmt::Display for OrderByClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ORDER BY {}", list(&self.items))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub value: Expression,
    pub direction: Option<SortDirection>,
    pub nulls_position: Option<NullsPosition>,
}

impl fmt::Display for OrderItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec![self.value.to_string()];
        if let Some(direction) = &self.direction {
            parts.push(direction.to_string());
        }
        if let Some(nulls) = &self.nulls_position {
            parts.push(nulls.to_string());
        }
        f.write_str(&join_with_space(&parts))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitUnit {
    Percent,
    Row,
    Rows,
}

impl fmt::Display for LimitUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LimitUnit::Percent => "PERCENT",
            LimitUnit::Row => "ROW",
            LimitUnit::Rows => "ROWS",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LimitClause {
    pub value: Expression,
    pub unit: Option<LimitUnit>,
    pub with_ties: bool,
}

impl fmt::Display for LimitClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec!["LIMIT".to_string(), self.value.to_string()];
        if let Some(unit) = &self.unit {
            parts.push(unit.to_string());
        }
        if self.with_ties {
            parts.push("WITH TIES".to_string());
        }
        f.write_str(&join_with_space(&parts))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetUnit {
    Row,
    Rows,
}

impl fmt::Display for OffsetUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OffsetUnit::Row => "ROW",
            OffsetUnit::Rows => "ROWS",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OffsetClause {
    pub value: Expression,
    pub unit: Option<OffsetUnit>,
}

impl fmt::Display for OffsetClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec!["OFFSET".to_string(), self.value.to_string()];
        if let Some(unit) = &self.unit {
            parts.push(unit.to_string());
        }
        f.write_str(&join_with_space(&parts))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WithClause {
    pub inline_tables: Vec<InlineTable>,
}

impl fmt::Display for WithClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WITH {}", list(&self.inline_tables))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InlineTable {
    pub recursive: bool,
    pub name: Identifier,
    pub fields: Vec<Identifier>,
    pub query: SelectQuery,
}

impl fmt::Display for InlineTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.recursive {
            parts.push("RECURSIVE".to_string());
        }
        parts.push(self.name.to_string());
        if !self.fields.is_empty() {
            parts.push(put_parentheses(&list(&self.fields)));
        }
        parts.push("AS".to_string());
        parts.push(put_parentheses(&self.query.to_string()));
        f.write_str(&join_with_space(&parts))
    }
}

/// One item of a select field list.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub object: Expression,
    pub alias: Option<Identifier>,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "{} AS {}", self.object, alias),
            None => self.object.fmt(f),
        }
    }
}

/// One item of a FROM list: an identifier, `DUAL`, `STDIN` or a
/// subquery, optionally aliased.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub object: Expression,
    pub alias: Option<Identifier>,
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "{} AS {}", self.object, alias),
            None => self.object.fmt(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum JoinCondition {
    On(Expression),
    Using(Vec<Identifier>),
}

impl fmt::Display for JoinCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinCondition::On(expr) => write!(f, "ON {}", expr),
            JoinCondition::Using(fields) => {
                write!(f, "USING {}", put_parentheses(&list(fields)))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub table: Expression,
    pub join_table: Expression,
    pub natural: bool,
    pub join_type: Option<JoinType>,
    pub direction: Option<JoinDirection>,
    pub condition: Option<JoinCondition>,
}

impl fmt::Display for Join {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec![self.table.to_string()];
        if self.natural {
            parts.push("NATURAL".to_string());
        }
        if let Some(direction) = &self.direction {
            parts.push(direction.to_string());
        }
        if let Some(join_type) = &self.join_type {
            parts.push(join_type.to_string());
        }
        parts.push("JOIN".to_string());
        parts.push(self.join_table.to_string());
        if let Some(condition) = &self.condition {
            parts.push(condition.to_string());
        }
        f.write_str(&join_with_space(&parts))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Subquery {
    pub query: SelectQuery,
}

impl fmt::Display for Subquery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&put_parentheses(&self.query.to_string()))
    }
}

/// Body of an `OVER (...)` clause.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalyticClause {
    pub partition_clause: Option<PartitionClause>,
    pub order_by_clause: Option<OrderByClause>,
}

impl fmt::Display for AnalyticClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(partition) = &self.partition_clause {
            parts.push(partition.to_string());
        }
        if let Some(order_by) = &self.order_by_clause {
            parts.push(order_by.to_string());
        }
        f.write_str(&join_with_space(&parts))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartitionClause {
    pub values: Vec<Expression>,
}

impl fmt::Display for PartitionClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PARTITION BY {}", list(&self.values))
    }
}
