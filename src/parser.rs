//! Recursive-descent parser from the token stream to statements.
//!
//! The parser pulls tokens from the [`Scanner`] on demand — both run on
//! one call stack with no suspension. Grammar precedence is encoded as
//! nested parse functions, loosest binding outermost:
//!
//! `OR` → `AND` → `NOT` → predicates (comparison, `IS`, `BETWEEN`,
//! `IN`, `LIKE`, `ANY`/`ALL`) → `||` → `+ -` → `* / %` → unary →
//! primary terms.
//!
//! A syntax error aborts the parse of the whole program; there is no
//! recovery and no state retained between parses.

use std::sync::Arc;

use crate::ast::expressions::*;
use crate::ast::operators::*;
use crate::ast::query::*;
use crate::ast::statements::*;
use crate::ast::tokens::{Keyword, Token, TokenKind};
use crate::coerce::{str_to_time, DatetimeContext};
use crate::error::SyntaxError;
use crate::lexer::Scanner;
use crate::value::Primary;

/// Dialect and environment switches for a single parse call.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Label reported in diagnostics, usually a file name.
    pub source_file: Option<String>,
    /// When set, double quotes delimit identifiers instead of strings.
    pub ansi_quotes: bool,
    /// When set, `?` and `:name` scan as placeholders.
    pub enable_placeholders: bool,
    /// Formats, location and translation cache for datetime literals.
    pub datetime: DatetimeContext,
}

/// A parsed program.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
    /// Number of ordinal (`?`) placeholders scanned.
    pub holder_count: usize,
}

/// Parse a program with default options.
pub fn parse(src: &str) -> Result<Program, SyntaxError> {
    parse_with(src, &ParseOptions::default())
}

/// Parse a program.
pub fn parse_with(src: &str, opts: &ParseOptions) -> Result<Program, SyntaxError> {
    let parser = Parser::new(src, opts)?;
    parser.parse_program()
}

pub struct Parser {
    scanner: Scanner,
    token: Token,
    peeked: Option<Token>,
    holder_count: usize,
    datetime_ctx: DatetimeContext,
}

impl Parser {
    pub fn new(src: &str, opts: &ParseOptions) -> Result<Parser, SyntaxError> {
        let source_file: Option<Arc<str>> = opts.source_file.as_deref().map(Arc::from);
        let mut scanner = Scanner::new(
            src,
            source_file,
            opts.ansi_quotes,
            opts.enable_placeholders,
            opts.datetime.clone(),
        );
        let token = scanner.scan()?;
        Ok(Parser {
            scanner,
            token,
            peeked: None,
            holder_count: 0,
            datetime_ctx: opts.datetime.clone(),
        })
    }

    // ------------------------------------------------------------------
    // token plumbing
    // ------------------------------------------------------------------

    fn advance(&mut self) -> Result<(), SyntaxError> {
        self.token = match self.peeked.take() {
            Some(token) => token,
            None => self.scanner.scan()?,
        };
        Ok(())
    }

    fn peek(&mut self) -> Result<&Token, SyntaxError> {
        if self.peeked.is_none() {
            self.peeked = Some(self.scanner.scan()?);
        }
        match &self.peeked {
            Some(token) => Ok(token),
            None => unreachable!("peek slot was just filled"),
        }
    }

    fn unexpected(&self) -> SyntaxError {
        let message = if self.token.kind == TokenKind::Eof {
            "syntax error: unexpected termination".to_string()
        } else {
            format!("syntax error: unexpected token {:?}", self.token.literal)
        };
        SyntaxError::new(
            message,
            self.token.line,
            self.token.column,
            self.token.source_file.clone(),
        )
    }

    fn is_symbol(&self, ch: char) -> bool {
        self.token.kind == TokenKind::Symbol(ch)
    }

    fn is_keyword(&self, keyword: Keyword) -> bool {
        self.token.kind == TokenKind::Keyword(keyword)
    }

    fn is_eof(&self) -> bool {
        self.token.kind == TokenKind::Eof
    }

    fn expect_symbol(&mut self, ch: char) -> Result<(), SyntaxError> {
        if !self.is_symbol(ch) {
            return Err(self.unexpected());
        }
        self.advance()
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), SyntaxError> {
        if !self.is_keyword(keyword) {
            return Err(self.unexpected());
        }
        self.advance()
    }

    fn accept_keyword(&mut self, keyword: Keyword) -> Result<bool, SyntaxError> {
        if self.is_keyword(keyword) {
            self.advance()?;
            return Ok(true);
        }
        Ok(false)
    }

    fn parse_identifier(&mut self) -> Result<Identifier, SyntaxError> {
        if self.token.kind != TokenKind::Identifier {
            return Err(self.unexpected());
        }
        let identifier = Identifier {
            literal: self.token.literal.clone(),
            quoted: self.token.quoted,
            pos: self.token.pos(),
        };
        self.advance()?;
        Ok(identifier)
    }

    fn parse_variable(&mut self) -> Result<Variable, SyntaxError> {
        if self.token.kind != TokenKind::Variable {
            return Err(self.unexpected());
        }
        let variable = Variable {
            name: self.token.literal.clone(),
            pos: self.token.pos(),
        };
        self.advance()?;
        Ok(variable)
    }

    // ------------------------------------------------------------------
    // program and statements
    // ------------------------------------------------------------------

    pub fn parse_program(mut self) -> Result<Program, SyntaxError> {
        let mut statements = Vec::new();

        loop {
            while self.is_symbol(';') {
                self.advance()?;
            }
            if self.is_eof() {
                break;
            }

            statements.push(self.parse_statement()?);

            if self.is_symbol(';') {
                self.advance()?;
            } else if !self.is_eof() {
                return Err(self.unexpected());
            }
        }

        tracing::debug!(
            statements = statements.len(),
            holders = self.holder_count,
            "parsed program"
        );
        Ok(Program {
            statements,
            holder_count: self.holder_count,
        })
    }

    fn parse_statement(&mut self) -> Result<Statement, SyntaxError> {
        match self.token.kind {
            TokenKind::Keyword(Keyword::Select) => {
                Ok(Statement::SelectQuery(self.parse_select_query()?))
            }
            TokenKind::Keyword(Keyword::With) => {
                let with_clause = Some(self.parse_with_clause()?);
                match self.token.kind {
                    TokenKind::Keyword(Keyword::Select) => Ok(Statement::SelectQuery(
                        self.parse_select_query_body(with_clause)?,
                    )),
                    TokenKind::Keyword(Keyword::Insert) => {
                        Ok(Statement::InsertQuery(self.parse_insert_query(with_clause)?))
                    }
                    TokenKind::Keyword(Keyword::Update) => {
                        Ok(Statement::UpdateQuery(self.parse_update_query(with_clause)?))
                    }
                    TokenKind::Keyword(Keyword::Delete) => {
                        Ok(Statement::DeleteQuery(self.parse_delete_query(with_clause)?))
                    }
                    TokenKind::Keyword(Keyword::Replace) => Ok(Statement::ReplaceQuery(
                        self.parse_replace_query(with_clause)?,
                    )),
                    _ => Err(self.unexpected()),
                }
            }
            TokenKind::Keyword(Keyword::Insert) => {
                Ok(Statement::InsertQuery(self.parse_insert_query(None)?))
            }
            TokenKind::Keyword(Keyword::Update) => {
                Ok(Statement::UpdateQuery(self.parse_update_query(None)?))
            }
            TokenKind::Keyword(Keyword::Delete) => {
                Ok(Statement::DeleteQuery(self.parse_delete_query(None)?))
            }
            TokenKind::Keyword(Keyword::Replace) => {
                Ok(Statement::ReplaceQuery(self.parse_replace_query(None)?))
            }
            TokenKind::Keyword(Keyword::Create) => self.parse_create_table(),
            TokenKind::Keyword(Keyword::Alter) => self.parse_alter_table(),
            TokenKind::Keyword(Keyword::Declare) => self.parse_declare(),
            TokenKind::Keyword(Keyword::Var) => {
                self.advance()?;
                Ok(Statement::VariableDeclaration(
                    self.parse_variable_declaration_body()?,
                ))
            }
            TokenKind::Keyword(Keyword::Dispose) => self.parse_dispose(),
            TokenKind::Keyword(Keyword::Open) => {
                self.advance()?;
                Ok(Statement::OpenCursor(OpenCursor {
                    cursor: self.parse_identifier()?,
                }))
            }
            TokenKind::Keyword(Keyword::Close) => {
                self.advance()?;
                Ok(Statement::CloseCursor(CloseCursor {
                    cursor: self.parse_identifier()?,
                }))
            }
            TokenKind::Keyword(Keyword::Fetch) => self.parse_fetch_cursor(),
            TokenKind::Keyword(Keyword::Prepare) => self.parse_statement_preparation(),
            TokenKind::Keyword(Keyword::Execute) => self.parse_execute_prepared(),
            TokenKind::Keyword(Keyword::If) => self.parse_if_statement(),
            TokenKind::Keyword(Keyword::While) => self.parse_while_statement(),
            TokenKind::Keyword(Keyword::Case) => self.parse_case_statement(),
            TokenKind::Keyword(Keyword::Continue) => {
                self.advance()?;
                Ok(Statement::FlowControl(FlowControl::Continue))
            }
            TokenKind::Keyword(Keyword::Break) => {
                self.advance()?;
                Ok(Statement::FlowControl(FlowControl::Break))
            }
            TokenKind::Keyword(Keyword::Exit) => {
                self.advance()?;
                let code = self.parse_optional_expression()?;
                Ok(Statement::Exit(Exit { code }))
            }
            TokenKind::Keyword(Keyword::Return) => {
                self.advance()?;
                let value = self.parse_optional_expression()?;
                Ok(Statement::Return(Return { value }))
            }
            TokenKind::Keyword(Keyword::Commit) => {
                self.advance()?;
                Ok(Statement::TransactionControl(TransactionControl::Commit))
            }
            TokenKind::Keyword(Keyword::Rollback) => {
                self.advance()?;
                Ok(Statement::TransactionControl(TransactionControl::Rollback))
            }
            TokenKind::Keyword(Keyword::Set) => self.parse_set_flag(),
            TokenKind::Keyword(Keyword::Print) => {
                self.advance()?;
                Ok(Statement::Print(Print {
                    value: self.parse_expression()?,
                }))
            }
            TokenKind::Keyword(Keyword::Printf) => self.parse_printf(),
            TokenKind::Keyword(Keyword::Source) => {
                self.advance()?;
                Ok(Statement::Source(Source {
                    file_path: self.parse_expression()?,
                }))
            }
            TokenKind::Keyword(Keyword::Echo) => {
                self.advance()?;
                Ok(Statement::Echo(Echo {
                    value: self.parse_expression()?,
                }))
            }
            TokenKind::Variable => {
                let start = self.token.clone();
                let expr = self.parse_expression()?;
                match expr {
                    Expression::VariableSubstitution(substitution) => {
                        Ok(Statement::VariableSubstitution(*substitution))
                    }
                    _ => Err(SyntaxError::new(
                        format!("syntax error: unexpected token {:?}", start.literal),
                        start.line,
                        start.column,
                        start.source_file,
                    )),
                }
            }
            _ => Err(self.unexpected()),
        }
    }

    /// An optional trailing expression, absent when the statement ends
    /// right here.
    fn parse_optional_expression(&mut self) -> Result<Option<Expression>, SyntaxError> {
        if self.is_symbol(';') || self.is_eof() {
            return Ok(None);
        }
        Ok(Some(self.parse_expression()?))
    }

    /// Statements terminated by `;` until one of the given keywords.
    fn parse_block(&mut self, terminators: &[Keyword]) -> Result<Vec<Statement>, SyntaxError> {
        let mut statements = Vec::new();
        loop {
            while self.is_symbol(';') {
                self.advance()?;
            }
            if let TokenKind::Keyword(keyword) = self.token.kind {
                if terminators.contains(&keyword) {
                    return Ok(statements);
                }
            }
            if self.is_eof() {
                return Err(self.unexpected());
            }
            statements.push(self.parse_statement()?);
            self.expect_symbol(';')?;
        }
    }

    // ------------------------------------------------------------------
    // select
    // ------------------------------------------------------------------

    fn parse_select_query(&mut self) -> Result<SelectQuery, SyntaxError> {
        let with_clause = if self.is_keyword(Keyword::With) {
            Some(self.parse_with_clause()?)
        } else {
            None
        };
        self.parse_select_query_body(with_clause)
    }

    fn parse_select_query_body(
        &mut self,
        with_clause: Option<WithClause>,
    ) -> Result<SelectQuery, SyntaxError> {
        let entity = self.parse_select_component()?;

        let order_by_clause = if self.is_keyword(Keyword::Order) {
            self.advance()?;
            self.expect_keyword(Keyword::By)?;
            Some(OrderByClause {
                items: self.parse_order_items()?,
            })
        } else {
            None
        };

        let limit_clause = if self.is_keyword(Keyword::Limit) {
            self.advance()?;
            let value = self.parse_expression()?;
            let unit = if self.accept_keyword(Keyword::Percent)? {
                Some(LimitUnit::Percent)
            } else if self.accept_keyword(Keyword::Row)? {
                Some(LimitUnit::Row)
            } else if self.accept_keyword(Keyword::Rows)? {
                Some(LimitUnit::Rows)
            } else {
                None
            };
            let with_ties = if self.is_keyword(Keyword::With) {
                self.advance()?;
                self.expect_keyword(Keyword::Ties)?;
                true
            } else {
                false
            };
            Some(LimitClause {
                value,
                unit,
                with_ties,
            })
        } else {
            None
        };

        let offset_clause = if self.is_keyword(Keyword::Offset) {
            self.advance()?;
            let value = self.parse_expression()?;
            let unit = if self.accept_keyword(Keyword::Row)? {
                Some(OffsetUnit::Row)
            } else if self.accept_keyword(Keyword::Rows)? {
                Some(OffsetUnit::Rows)
            } else {
                None
            };
            Some(OffsetClause { value, unit })
        } else {
            None
        };

        Ok(SelectQuery {
            with_clause,
            entity,
            order_by_clause,
            limit_clause,
            offset_clause,
        })
    }

    fn parse_select_component(&mut self) -> Result<SelectComponent, SyntaxError> {
        let mut left = self.parse_select_intersect()?;
        loop {
            let operator = if self.is_keyword(Keyword::Union) {
                SetOperator::Union
            } else if self.is_keyword(Keyword::Except) {
                SetOperator::Except
            } else {
                return Ok(left);
            };
            self.advance()?;
            let all = self.accept_keyword(Keyword::All)?;
            let rhs = self.parse_select_intersect()?;
            left = SelectComponent::Set(Box::new(SelectSet {
                lhs: left,
                operator,
                all,
                rhs,
            }));
        }
    }

    fn parse_select_intersect(&mut self) -> Result<SelectComponent, SyntaxError> {
        let mut left = SelectComponent::Entity(self.parse_select_entity()?);
        while self.is_keyword(Keyword::Intersect) {
            self.advance()?;
            let all = self.accept_keyword(Keyword::All)?;
            let rhs = SelectComponent::Entity(self.parse_select_entity()?);
            left = SelectComponent::Set(Box::new(SelectSet {
                lhs: left,
                operator: SetOperator::Intersect,
                all,
                rhs,
            }));
        }
        Ok(left)
    }

    fn parse_select_entity(&mut self) -> Result<SelectEntity, SyntaxError> {
        self.expect_keyword(Keyword::Select)?;
        let distinct = self.accept_keyword(Keyword::Distinct)?;

        let mut fields = vec![self.parse_field()?];
        while self.is_symbol(',') {
            self.advance()?;
            fields.push(self.parse_field()?);
        }

        let from_clause = if self.is_keyword(Keyword::From) {
            Some(self.parse_from_clause()?)
        } else {
            None
        };

        let where_clause = if self.is_keyword(Keyword::Where) {
            self.advance()?;
            Some(WhereClause {
                filter: self.parse_expression()?,
            })
        } else {
            None
        };

        let group_by_clause = if self.is_keyword(Keyword::Group) {
            self.advance()?;
            self.expect_keyword(Keyword::By)?;
            Some(GroupByClause {
                items: self.parse_expression_list()?,
            })
        } else {
            None
        };

        let having_clause = if self.is_keyword(Keyword::Having) {
            self.advance()?;
            Some(HavingClause {
                filter: self.parse_expression()?,
            })
        } else {
            None
        };

        Ok(SelectEntity {
            select_clause: SelectClause { distinct, fields },
            from_clause,
            where_clause,
            group_by_clause,
            having_clause,
        })
    }

    fn parse_field(&mut self) -> Result<Field, SyntaxError> {
        if self.is_symbol('*') {
            self.advance()?;
            return Ok(Field {
                object: Expression::AllColumns(AllColumns),
                alias: None,
            });
        }

        let object = self.parse_expression()?;
        let alias = if self.accept_keyword(Keyword::As)? {
            Some(self.parse_identifier()?)
        } else if self.token.kind == TokenKind::Identifier {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        Ok(Field { object, alias })
    }

    fn parse_order_items(&mut self) -> Result<Vec<OrderItem>, SyntaxError> {
        let mut items = vec![self.parse_order_item()?];
        while self.is_symbol(',') {
            self.advance()?;
            items.push(self.parse_order_item()?);
        }
        Ok(items)
    }

    fn parse_order_item(&mut self) -> Result<OrderItem, SyntaxError> {
        let value = self.parse_expression()?;
        let direction = if self.accept_keyword(Keyword::Asc)? {
            Some(SortDirection::Ascending)
        } else if self.accept_keyword(Keyword::Desc)? {
            Some(SortDirection::Descending)
        } else {
            None
        };
        let nulls_position = if self.is_keyword(Keyword::Nulls) {
            self.advance()?;
            if self.accept_keyword(Keyword::First)? {
                Some(NullsPosition::First)
            } else {
                self.expect_keyword(Keyword::Last)?;
                Some(NullsPosition::Last)
            }
        } else {
            None
        };
        Ok(OrderItem {
            value,
            direction,
            nulls_position,
        })
    }

    fn parse_with_clause(&mut self) -> Result<WithClause, SyntaxError> {
        self.expect_keyword(Keyword::With)?;
        let mut inline_tables = vec![self.parse_inline_table()?];
        while self.is_symbol(',') {
            self.advance()?;
            inline_tables.push(self.parse_inline_table()?);
        }
        Ok(WithClause { inline_tables })
    }

    fn parse_inline_table(&mut self) -> Result<InlineTable, SyntaxError> {
        let recursive = self.accept_keyword(Keyword::Recursive)?;
        let name = self.parse_identifier()?;
        let mut fields = Vec::new();
        if self.is_symbol('(') {
            self.advance()?;
            fields.push(self.parse_identifier()?);
            while self.is_symbol(',') {
                self.advance()?;
                fields.push(self.parse_identifier()?);
            }
            self.expect_symbol(')')?;
        }
        self.expect_keyword(Keyword::As)?;
        self.expect_symbol('(')?;
        let query = self.parse_select_query()?;
        self.expect_symbol(')')?;
        Ok(InlineTable {
            recursive,
            name,
            fields,
            query,
        })
    }

    // ------------------------------------------------------------------
    // from clause, tables and joins
    // ------------------------------------------------------------------

    fn parse_from_clause(&mut self) -> Result<FromClause, SyntaxError> {
        self.expect_keyword(Keyword::From)?;
        let mut tables = vec![self.parse_table()?];
        while self.is_symbol(',') {
            self.advance()?;
            tables.push(self.parse_table()?);
        }
        Ok(FromClause { tables })
    }

    fn parse_table(&mut self) -> Result<Expression, SyntaxError> {
        let mut table = self.parse_table_item()?;

        loop {
            let natural = self.is_keyword(Keyword::Natural);
            if natural {
                self.advance()?;
            }

            let direction = if self.accept_keyword(Keyword::Left)? {
                Some(JoinDirection::Left)
            } else if self.accept_keyword(Keyword::Right)? {
                Some(JoinDirection::Right)
            } else if self.accept_keyword(Keyword::Full)? {
                Some(JoinDirection::Full)
            } else {
                None
            };

            let join_type = if self.accept_keyword(Keyword::Inner)? {
                Some(JoinType::Inner)
            } else if self.accept_keyword(Keyword::Cross)? {
                Some(JoinType::Cross)
            } else if self.accept_keyword(Keyword::Outer)? {
                Some(JoinType::Outer)
            } else {
                None
            };

            if !natural && direction.is_none() && join_type.is_none() {
                if !self.is_keyword(Keyword::Join) {
                    return Ok(table);
                }
            }
            self.expect_keyword(Keyword::Join)?;

            let join_table = self.parse_table_item()?;

            let condition = if self.is_keyword(Keyword::On) {
                self.advance()?;
                Some(JoinCondition::On(self.parse_expression()?))
            } else if self.is_keyword(Keyword::Using) {
                self.advance()?;
                self.expect_symbol('(')?;
                let mut fields = vec![self.parse_identifier()?];
                while self.is_symbol(',') {
                    self.advance()?;
                    fields.push(self.parse_identifier()?);
                }
                self.expect_symbol(')')?;
                Some(JoinCondition::Using(fields))
            } else {
                None
            };

            table = Expression::Join(Box::new(Join {
                table,
                join_table,
                natural,
                join_type,
                direction,
                condition,
            }));
        }
    }

    /// One table reference without join handling: an identifier (file
    /// names may contain one dot), `DUAL`, `STDIN` or a subquery, with
    /// an optional alias.
    fn parse_table_item(&mut self) -> Result<Expression, SyntaxError> {
        let object = match self.token.kind {
            TokenKind::Keyword(Keyword::Dual) => {
                self.advance()?;
                Expression::Dual(Dual)
            }
            TokenKind::Keyword(Keyword::Stdin) => {
                self.advance()?;
                Expression::Stdin(Stdin)
            }
            TokenKind::Symbol('(') => Expression::Subquery(Box::new(self.parse_subquery()?)),
            TokenKind::Identifier => {
                let mut identifier = self.parse_identifier()?;
                if self.is_symbol('.') && self.peek()?.kind == TokenKind::Identifier {
                    self.advance()?;
                    let extension = self.parse_identifier()?;
                    identifier.literal = format!("{}.{}", identifier.literal, extension.literal);
                }
                Expression::Identifier(identifier)
            }
            _ => return Err(self.unexpected()),
        };

        let alias = if self.accept_keyword(Keyword::As)? {
            Some(self.parse_identifier()?)
        } else if self.token.kind == TokenKind::Identifier {
            Some(self.parse_identifier()?)
        } else {
            None
        };

        Ok(Expression::Table(Box::new(Table { object, alias })))
    }

    fn parse_subquery(&mut self) -> Result<Subquery, SyntaxError> {
        self.expect_symbol('(')?;
        let query = self.parse_select_query()?;
        self.expect_symbol(')')?;
        Ok(Subquery { query })
    }

    // ------------------------------------------------------------------
    // DML
    // ------------------------------------------------------------------

    fn parse_insert_query(
        &mut self,
        with_clause: Option<WithClause>,
    ) -> Result<InsertQuery, SyntaxError> {
        self.expect_keyword(Keyword::Insert)?;
        self.expect_keyword(Keyword::Into)?;
        let table = self.parse_identifier()?;

        let mut fields = Vec::new();
        if self.is_symbol('(') {
            self.advance()?;
            fields = self.parse_expression_list()?;
            self.expect_symbol(')')?;
        }

        if self.is_keyword(Keyword::Values) {
            self.advance()?;
            let values = self.parse_row_value_list()?;
            Ok(InsertQuery {
                with_clause,
                table,
                fields,
                values,
                query: None,
            })
        } else {
            let query = self.parse_select_query()?;
            Ok(InsertQuery {
                with_clause,
                table,
                fields,
                values: Vec::new(),
                query: Some(query),
            })
        }
    }

    /// Comma list of parenthesized value rows.
    fn parse_row_value_list(&mut self) -> Result<Vec<Expression>, SyntaxError> {
        let mut rows = vec![self.parse_row_value()?];
        while self.is_symbol(',') {
            self.advance()?;
            rows.push(self.parse_row_value()?);
        }
        Ok(rows)
    }

    fn parse_row_value(&mut self) -> Result<Expression, SyntaxError> {
        self.expect_symbol('(')?;
        let values = self.parse_expression_list()?;
        self.expect_symbol(')')?;
        Ok(Expression::RowValue(Box::new(RowValue {
            value: Expression::ValueList(ValueList { values }),
        })))
    }

    fn parse_update_query(
        &mut self,
        with_clause: Option<WithClause>,
    ) -> Result<UpdateQuery, SyntaxError> {
        self.expect_keyword(Keyword::Update)?;
        let mut tables = vec![self.parse_table_item()?];
        while self.is_symbol(',') {
            self.advance()?;
            tables.push(self.parse_table_item()?);
        }

        self.expect_keyword(Keyword::Set)?;
        let mut set_list = vec![self.parse_update_set()?];
        while self.is_symbol(',') {
            self.advance()?;
            set_list.push(self.parse_update_set()?);
        }

        let from_clause = if self.is_keyword(Keyword::From) {
            Some(self.parse_from_clause()?)
        } else {
            None
        };
        let where_clause = if self.is_keyword(Keyword::Where) {
            self.advance()?;
            Some(WhereClause {
                filter: self.parse_expression()?,
            })
        } else {
            None
        };

        Ok(UpdateQuery {
            with_clause,
            tables,
            set_list,
            from_clause,
            where_clause,
        })
    }

    fn parse_update_set(&mut self) -> Result<UpdateSet, SyntaxError> {
        let field = self.parse_field_reference()?;
        self.expect_symbol('=')?;
        let value = self.parse_expression()?;
        Ok(UpdateSet { field, value })
    }

    fn parse_field_reference(&mut self) -> Result<FieldReference, SyntaxError> {
        let first = self.parse_identifier()?;
        if self.is_symbol('.') && self.peek()?.kind == TokenKind::Identifier {
            self.advance()?;
            let column = self.parse_identifier()?;
            let pos = first.pos.clone();
            return Ok(FieldReference {
                view: Some(first),
                column,
                pos,
            });
        }
        let pos = first.pos.clone();
        Ok(FieldReference {
            view: None,
            column: first,
            pos,
        })
    }

    fn parse_delete_query(
        &mut self,
        with_clause: Option<WithClause>,
    ) -> Result<DeleteQuery, SyntaxError> {
        self.expect_keyword(Keyword::Delete)?;

        let mut tables = Vec::new();
        if !self.is_keyword(Keyword::From) {
            tables.push(Expression::Identifier(self.parse_identifier()?));
            while self.is_symbol(',') {
                self.advance()?;
                tables.push(Expression::Identifier(self.parse_identifier()?));
            }
        }

        let from_clause = self.parse_from_clause()?;
        let where_clause = if self.is_keyword(Keyword::Where) {
            self.advance()?;
            Some(WhereClause {
                filter: self.parse_expression()?,
            })
        } else {
            None
        };

        Ok(DeleteQuery {
            with_clause,
            tables,
            from_clause,
            where_clause,
        })
    }

    fn parse_replace_query(
        &mut self,
        with_clause: Option<WithClause>,
    ) -> Result<ReplaceQuery, SyntaxError> {
        self.expect_keyword(Keyword::Replace)?;
        self.expect_keyword(Keyword::Into)?;
        let table = self.parse_identifier()?;

        let mut fields = Vec::new();
        if self.is_symbol('(') {
            self.advance()?;
            fields = self.parse_expression_list()?;
            self.expect_symbol(')')?;
        }

        self.expect_keyword(Keyword::Using)?;
        self.expect_symbol('(')?;
        let keys = self.parse_expression_list()?;
        self.expect_symbol(')')?;

        if self.is_keyword(Keyword::Values) {
            self.advance()?;
            let values = self.parse_row_value_list()?;
            Ok(ReplaceQuery {
                with_clause,
                table,
                fields,
                keys,
                values,
                query: None,
            })
        } else {
            let query = self.parse_select_query()?;
            Ok(ReplaceQuery {
                with_clause,
                table,
                fields,
                keys,
                values: Vec::new(),
                query: Some(query),
            })
        }
    }

    // ------------------------------------------------------------------
    // DDL
    // ------------------------------------------------------------------

    fn parse_create_table(&mut self) -> Result<Statement, SyntaxError> {
        self.expect_keyword(Keyword::Create)?;
        self.expect_keyword(Keyword::Table)?;
        let table = self.parse_identifier()?;

        let mut fields = Vec::new();
        if self.is_symbol('(') {
            self.advance()?;
            fields = self.parse_expression_list()?;
            self.expect_symbol(')')?;
        }

        let query = if self.accept_keyword(Keyword::As)? {
            Some(self.parse_select_query()?)
        } else {
            None
        };

        if fields.is_empty() && query.is_none() {
            return Err(self.unexpected());
        }

        Ok(Statement::CreateTable(CreateTable {
            table,
            fields,
            query,
        }))
    }

    fn parse_alter_table(&mut self) -> Result<Statement, SyntaxError> {
        self.expect_keyword(Keyword::Alter)?;
        self.expect_keyword(Keyword::Table)?;
        let table = self.parse_identifier()?;

        match self.token.kind {
            TokenKind::Keyword(Keyword::Add) => {
                self.advance()?;
                let mut columns = Vec::new();
                if self.is_symbol('(') {
                    self.advance()?;
                    columns.push(self.parse_column_default()?);
                    while self.is_symbol(',') {
                        self.advance()?;
                        columns.push(self.parse_column_default()?);
                    }
                    self.expect_symbol(')')?;
                } else {
                    columns.push(self.parse_column_default()?);
                }
                let position = self.parse_column_position()?;
                Ok(Statement::AddColumns(AddColumns {
                    table,
                    columns,
                    position,
                }))
            }
            TokenKind::Keyword(Keyword::Drop) => {
                self.advance()?;
                let mut columns = Vec::new();
                if self.is_symbol('(') {
                    self.advance()?;
                    columns = self.parse_expression_list()?;
                    self.expect_symbol(')')?;
                } else {
                    columns.push(Expression::FieldReference(self.parse_field_reference()?));
                }
                Ok(Statement::DropColumns(DropColumns { table, columns }))
            }
            TokenKind::Keyword(Keyword::Rename) => {
                self.advance()?;
                let old = self.parse_identifier()?;
                self.expect_keyword(Keyword::To)?;
                let new = self.parse_identifier()?;
                Ok(Statement::RenameColumn(RenameColumn { table, old, new }))
            }
            TokenKind::Keyword(Keyword::Set) => {
                self.advance()?;
                let attribute = self.parse_identifier()?;
                self.expect_keyword(Keyword::To)?;
                let value = self.parse_expression()?;
                Ok(Statement::SetTableAttribute(SetTableAttribute {
                    table,
                    attribute,
                    value,
                }))
            }
            _ => Err(self.unexpected()),
        }
    }

    fn parse_column_default(&mut self) -> Result<ColumnDefault, SyntaxError> {
        let column = self.parse_identifier()?;
        let value = if self.accept_keyword(Keyword::Default)? {
            Some(self.parse_expression()?)
        } else {
            None
        };
        Ok(ColumnDefault { column, value })
    }

    fn parse_column_position(&mut self) -> Result<Option<ColumnPosition>, SyntaxError> {
        let position = if self.accept_keyword(Keyword::First)? {
            ColumnPositionType::First
        } else if self.accept_keyword(Keyword::Last)? {
            ColumnPositionType::Last
        } else if self.accept_keyword(Keyword::After)? {
            ColumnPositionType::After
        } else if self.accept_keyword(Keyword::Before)? {
            ColumnPositionType::Before
        } else {
            return Ok(None);
        };

        let column = match position {
            ColumnPositionType::After | ColumnPositionType::Before => {
                Some(Expression::FieldReference(self.parse_field_reference()?))
            }
            _ => None,
        };
        Ok(Some(ColumnPosition { position, column }))
    }

    // ------------------------------------------------------------------
    // declarations
    // ------------------------------------------------------------------

    fn parse_declare(&mut self) -> Result<Statement, SyntaxError> {
        self.expect_keyword(Keyword::Declare)?;

        if self.token.kind == TokenKind::Variable {
            return Ok(Statement::VariableDeclaration(
                self.parse_variable_declaration_body()?,
            ));
        }

        let name = self.parse_identifier()?;
        match self.token.kind {
            TokenKind::Keyword(Keyword::Cursor) => {
                self.advance()?;
                self.expect_keyword(Keyword::For)?;
                let query = self.parse_select_query()?;
                Ok(Statement::CursorDeclaration(CursorDeclaration {
                    cursor: name,
                    query,
                }))
            }
            TokenKind::Keyword(Keyword::View) => {
                self.advance()?;
                let mut fields = Vec::new();
                if self.is_symbol('(') {
                    self.advance()?;
                    fields = self.parse_expression_list()?;
                    self.expect_symbol(')')?;
                }
                let query = if self.accept_keyword(Keyword::As)? {
                    Some(self.parse_select_query()?)
                } else {
                    None
                };
                if fields.is_empty() && query.is_none() {
                    return Err(self.unexpected());
                }
                Ok(Statement::ViewDeclaration(ViewDeclaration {
                    view: name,
                    fields,
                    query,
                }))
            }
            TokenKind::Keyword(Keyword::Function) => {
                self.advance()?;
                self.expect_symbol('(')?;
                let parameters = self.parse_parameter_list()?;
                self.expect_symbol(')')?;
                self.expect_keyword(Keyword::As)?;
                self.expect_keyword(Keyword::Begin)?;
                let statements = self.parse_block(&[Keyword::End])?;
                self.expect_keyword(Keyword::End)?;
                Ok(Statement::FunctionDeclaration(FunctionDeclaration {
                    name,
                    parameters,
                    statements,
                }))
            }
            TokenKind::Keyword(Keyword::Aggregate) => {
                self.advance()?;
                self.expect_symbol('(')?;
                let cursor = self.parse_identifier()?;
                let mut parameters = Vec::new();
                while self.is_symbol(',') {
                    self.advance()?;
                    parameters.push(self.parse_variable_assignment()?);
                }
                self.expect_symbol(')')?;
                self.expect_keyword(Keyword::As)?;
                self.expect_keyword(Keyword::Begin)?;
                let statements = self.parse_block(&[Keyword::End])?;
                self.expect_keyword(Keyword::End)?;
                Ok(Statement::AggregateDeclaration(AggregateDeclaration {
                    name,
                    cursor,
                    parameters,
                    statements,
                }))
            }
            _ => Err(self.unexpected()),
        }
    }

    fn parse_variable_declaration_body(&mut self) -> Result<VariableDeclaration, SyntaxError> {
        let mut assignments = vec![self.parse_variable_assignment()?];
        while self.is_symbol(',') {
            self.advance()?;
            assignments.push(self.parse_variable_assignment()?);
        }
        Ok(VariableDeclaration { assignments })
    }

    fn parse_variable_assignment(&mut self) -> Result<VariableAssignment, SyntaxError> {
        let variable = self.parse_variable()?;
        let value = if self.token.kind == TokenKind::SubstitutionOp {
            self.advance()?;
            Some(self.parse_expression()?)
        } else {
            None
        };
        Ok(VariableAssignment { variable, value })
    }

    fn parse_parameter_list(&mut self) -> Result<Vec<VariableAssignment>, SyntaxError> {
        let mut parameters = Vec::new();
        if self.token.kind == TokenKind::Variable {
            parameters.push(self.parse_variable_assignment()?);
            while self.is_symbol(',') {
                self.advance()?;
                parameters.push(self.parse_variable_assignment()?);
            }
        }
        Ok(parameters)
    }

    fn parse_dispose(&mut self) -> Result<Statement, SyntaxError> {
        self.expect_keyword(Keyword::Dispose)?;
        match self.token.kind {
            TokenKind::Variable => Ok(Statement::DisposeVariable(DisposeVariable {
                variable: self.parse_variable()?,
            })),
            TokenKind::Keyword(Keyword::Cursor) => {
                self.advance()?;
                Ok(Statement::DisposeCursor(DisposeCursor {
                    cursor: self.parse_identifier()?,
                }))
            }
            TokenKind::Keyword(Keyword::View) => {
                self.advance()?;
                Ok(Statement::DisposeView(DisposeView {
                    view: self.parse_identifier()?,
                }))
            }
            TokenKind::Keyword(Keyword::Function) => {
                self.advance()?;
                Ok(Statement::DisposeFunction(DisposeFunction {
                    name: self.parse_identifier()?,
                }))
            }
            TokenKind::Keyword(Keyword::Prepare) => {
                self.advance()?;
                Ok(Statement::DisposePrepared(DisposePrepared {
                    name: self.parse_identifier()?,
                }))
            }
            _ => Err(self.unexpected()),
        }
    }

    fn parse_fetch_cursor(&mut self) -> Result<Statement, SyntaxError> {
        self.expect_keyword(Keyword::Fetch)?;

        let position = if self.accept_keyword(Keyword::Next)? {
            Some(FetchPosition {
                position: FetchPositionType::Next,
                number: None,
            })
        } else if self.accept_keyword(Keyword::Prior)? {
            Some(FetchPosition {
                position: FetchPositionType::Prior,
                number: None,
            })
        } else if self.accept_keyword(Keyword::First)? {
            Some(FetchPosition {
                position: FetchPositionType::First,
                number: None,
            })
        } else if self.accept_keyword(Keyword::Last)? {
            Some(FetchPosition {
                position: FetchPositionType::Last,
                number: None,
            })
        } else if self.accept_keyword(Keyword::Absolute)? {
            Some(FetchPosition {
                position: FetchPositionType::Absolute,
                number: Some(self.parse_expression()?),
            })
        } else if self.accept_keyword(Keyword::Relative)? {
            Some(FetchPosition {
                position: FetchPositionType::Relative,
                number: Some(self.parse_expression()?),
            })
        } else {
            None
        };

        let cursor = self.parse_identifier()?;
        self.expect_keyword(Keyword::Into)?;
        let mut variables = vec![self.parse_variable()?];
        while self.is_symbol(',') {
            self.advance()?;
            variables.push(self.parse_variable()?);
        }

        Ok(Statement::FetchCursor(FetchCursor {
            position,
            cursor,
            variables,
        }))
    }

    fn parse_statement_preparation(&mut self) -> Result<Statement, SyntaxError> {
        self.expect_keyword(Keyword::Prepare)?;
        let name = self.parse_identifier()?;
        self.expect_keyword(Keyword::From)?;
        if self.token.kind != TokenKind::StringLit {
            return Err(self.unexpected());
        }
        let statement = self.token.literal.clone();
        self.advance()?;
        Ok(Statement::StatementPreparation(StatementPreparation {
            name,
            statement,
        }))
    }

    fn parse_execute_prepared(&mut self) -> Result<Statement, SyntaxError> {
        self.expect_keyword(Keyword::Execute)?;
        let name = self.parse_identifier()?;
        let values = if self.accept_keyword(Keyword::Using)? {
            self.parse_expression_list()?
        } else {
            Vec::new()
        };
        Ok(Statement::ExecutePrepared(ExecutePrepared { name, values }))
    }

    // ------------------------------------------------------------------
    // control flow
    // ------------------------------------------------------------------

    fn parse_if_statement(&mut self) -> Result<Statement, SyntaxError> {
        self.expect_keyword(Keyword::If)?;
        let condition = self.parse_expression()?;
        self.expect_keyword(Keyword::Then)?;
        let statements = self.parse_block(&[Keyword::Elseif, Keyword::Else, Keyword::End])?;

        let mut else_if = Vec::new();
        while self.is_keyword(Keyword::Elseif) {
            self.advance()?;
            let condition = self.parse_expression()?;
            self.expect_keyword(Keyword::Then)?;
            let statements = self.parse_block(&[Keyword::Elseif, Keyword::Else, Keyword::End])?;
            else_if.push(ElseIf {
                condition,
                statements,
            });
        }

        let else_stmt = if self.is_keyword(Keyword::Else) {
            self.advance()?;
            Some(Else {
                statements: self.parse_block(&[Keyword::End])?,
            })
        } else {
            None
        };

        self.expect_keyword(Keyword::End)?;
        self.expect_keyword(Keyword::If)?;

        Ok(Statement::If(If {
            condition,
            statements,
            else_if,
            else_stmt,
        }))
    }

    fn parse_while_statement(&mut self) -> Result<Statement, SyntaxError> {
        self.expect_keyword(Keyword::While)?;

        // `WHILE @a, @b IN cur` against `WHILE @a < 10`: a variable list
        // followed by `,` or `IN` is the cursor form
        let cursor_form = self.token.kind == TokenKind::Variable && {
            let next = self.peek()?.kind;
            next == TokenKind::Symbol(',') || next == TokenKind::Keyword(Keyword::In)
        };

        if cursor_form {
            let mut variables = vec![self.parse_variable()?];
            while self.is_symbol(',') {
                self.advance()?;
                variables.push(self.parse_variable()?);
            }
            self.expect_keyword(Keyword::In)?;
            let cursor = self.parse_identifier()?;
            self.expect_keyword(Keyword::Do)?;
            let statements = self.parse_block(&[Keyword::End])?;
            self.expect_keyword(Keyword::End)?;
            self.expect_keyword(Keyword::While)?;
            return Ok(Statement::WhileInCursor(WhileInCursor {
                variables,
                cursor,
                statements,
            }));
        }

        let condition = self.parse_expression()?;
        self.expect_keyword(Keyword::Do)?;
        let statements = self.parse_block(&[Keyword::End])?;
        self.expect_keyword(Keyword::End)?;
        self.expect_keyword(Keyword::While)?;
        Ok(Statement::While(While {
            condition,
            statements,
        }))
    }

    fn parse_case_statement(&mut self) -> Result<Statement, SyntaxError> {
        self.expect_keyword(Keyword::Case)?;

        let value = if self.is_keyword(Keyword::When) {
            None
        } else {
            Some(self.parse_expression()?)
        };

        let mut when = Vec::new();
        while self.is_keyword(Keyword::When) {
            self.advance()?;
            let condition = self.parse_expression()?;
            self.expect_keyword(Keyword::Then)?;
            let statements = self.parse_block(&[Keyword::When, Keyword::Else, Keyword::End])?;
            when.push(CaseStatementWhen {
                condition,
                statements,
            });
        }
        if when.is_empty() {
            return Err(self.unexpected());
        }

        let else_stmt = if self.is_keyword(Keyword::Else) {
            self.advance()?;
            Some(Else {
                statements: self.parse_block(&[Keyword::End])?,
            })
        } else {
            None
        };

        self.expect_keyword(Keyword::End)?;
        self.expect_keyword(Keyword::Case)?;

        Ok(Statement::Case(CaseStatement {
            value,
            when,
            else_stmt,
        }))
    }

    fn parse_set_flag(&mut self) -> Result<Statement, SyntaxError> {
        self.expect_keyword(Keyword::Set)?;
        if self.token.kind != TokenKind::Flag {
            return Err(self.unexpected());
        }
        let flag = Flag {
            name: self.token.literal.clone(),
            pos: self.token.pos(),
        };
        self.advance()?;
        self.expect_keyword(Keyword::To)?;
        let value = self.parse_expression()?;
        Ok(Statement::SetFlag(SetFlag { flag, value }))
    }

    fn parse_printf(&mut self) -> Result<Statement, SyntaxError> {
        self.expect_keyword(Keyword::Printf)?;
        let format = self.parse_expression()?;
        let values = if self.accept_keyword(Keyword::Using)? {
            self.parse_expression_list()?
        } else {
            Vec::new()
        };
        Ok(Statement::Printf(Printf { format, values }))
    }

    // ------------------------------------------------------------------
    // expressions
    // ------------------------------------------------------------------

    fn parse_expression_list(&mut self) -> Result<Vec<Expression>, SyntaxError> {
        let mut expressions = vec![self.parse_expression()?];
        while self.is_symbol(',') {
            self.advance()?;
            expressions.push(self.parse_expression()?);
        }
        Ok(expressions)
    }

    pub fn parse_expression(&mut self) -> Result<Expression, SyntaxError> {
        self.parse_logic_or()
    }

    fn parse_logic_or(&mut self) -> Result<Expression, SyntaxError> {
        let mut left = self.parse_logic_and()?;
        while self.is_keyword(Keyword::Or) {
            self.advance()?;
            let right = self.parse_logic_and()?;
            left = Expression::Logic(Box::new(Logic {
                lhs: left,
                operator: LogicOperator::Or,
                rhs: right,
            }));
        }
        Ok(left)
    }

    fn parse_logic_and(&mut self) -> Result<Expression, SyntaxError> {
        let mut left = self.parse_logic_not()?;
        while self.is_keyword(Keyword::And) {
            self.advance()?;
            let right = self.parse_logic_not()?;
            left = Expression::Logic(Box::new(Logic {
                lhs: left,
                operator: LogicOperator::And,
                rhs: right,
            }));
        }
        Ok(left)
    }

    fn parse_logic_not(&mut self) -> Result<Expression, SyntaxError> {
        if self.is_keyword(Keyword::Not) {
            self.advance()?;
            let operand = self.parse_logic_not()?;
            return Ok(Expression::UnaryLogic(Box::new(UnaryLogic {
                operand,
                operator: "NOT".to_string(),
            })));
        }
        self.parse_predicate()
    }

    fn parse_predicate(&mut self) -> Result<Expression, SyntaxError> {
        let lhs = self.parse_concat()?;

        if self.token.kind == TokenKind::ComparisonOp || self.is_symbol('=') {
            let operator = if self.is_symbol('=') {
                "=".to_string()
            } else {
                self.token.literal.clone()
            };
            self.advance()?;

            if self.is_keyword(Keyword::Any) {
                self.advance()?;
                let values = self.parse_set_values()?;
                return Ok(Expression::Any(Box::new(Any {
                    lhs,
                    operator,
                    values,
                })));
            }
            if self.is_keyword(Keyword::All) {
                self.advance()?;
                let values = self.parse_set_values()?;
                return Ok(Expression::All(Box::new(All {
                    lhs,
                    operator,
                    values,
                })));
            }

            let rhs = self.parse_concat()?;
            return Ok(Expression::Comparison(Box::new(Comparison {
                lhs,
                operator,
                rhs,
            })));
        }

        if self.is_keyword(Keyword::Is) {
            self.advance()?;
            let negation = self.accept_keyword(Keyword::Not)?;
            let rhs = self.parse_concat()?;
            return Ok(Expression::Is(Box::new(Is {
                lhs,
                rhs,
                negation,
            })));
        }

        let negation = if self.is_keyword(Keyword::Not) {
            self.advance()?;
            true
        } else {
            false
        };

        if self.is_keyword(Keyword::Between) {
            self.advance()?;
            let low = self.parse_concat()?;
            self.expect_keyword(Keyword::And)?;
            let high = self.parse_concat()?;
            return Ok(Expression::Between(Box::new(Between {
                lhs,
                low,
                high,
                negation,
            })));
        }
        if self.is_keyword(Keyword::In) {
            self.advance()?;
            let values = self.parse_set_values()?;
            return Ok(Expression::In(Box::new(In {
                lhs,
                values,
                negation,
            })));
        }
        if self.is_keyword(Keyword::Like) {
            self.advance()?;
            let pattern = self.parse_concat()?;
            return Ok(Expression::Like(Box::new(Like {
                lhs,
                pattern,
                negation,
            })));
        }

        if negation {
            // NOT here can only introduce BETWEEN, IN or LIKE
            return Err(self.unexpected());
        }

        Ok(lhs)
    }

    /// The parenthesized right side of `IN`, `ANY` and `ALL`: a
    /// subquery, a scalar list or a row value list.
    fn parse_set_values(&mut self) -> Result<Expression, SyntaxError> {
        self.expect_symbol('(')?;

        if self.is_keyword(Keyword::Select) || self.is_keyword(Keyword::With) {
            let query = self.parse_select_query()?;
            self.expect_symbol(')')?;
            return Ok(Expression::Subquery(Box::new(Subquery { query })));
        }

        let values = self.parse_expression_list()?;
        self.expect_symbol(')')?;

        let tuple_shaped = matches!(values.first(), Some(Expression::RowValue(_)));
        if tuple_shaped {
            Ok(Expression::RowValueList(RowValueList { row_values: values }))
        } else {
            Ok(Expression::ValueList(ValueList { values }))
        }
    }

    fn parse_concat(&mut self) -> Result<Expression, SyntaxError> {
        let first = self.parse_additive()?;
        if self.token.kind != TokenKind::StringOp {
            return Ok(first);
        }
        let mut items = vec![first];
        while self.token.kind == TokenKind::StringOp {
            self.advance()?;
            items.push(self.parse_additive()?);
        }
        Ok(Expression::Concat(Concat { items }))
    }

    fn parse_additive(&mut self) -> Result<Expression, SyntaxError> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let operator = if self.is_symbol('+') {
                ArithmeticOperator::Add
            } else if self.is_symbol('-') {
                ArithmeticOperator::Subtract
            } else {
                return Ok(left);
            };
            self.advance()?;
            let right = self.parse_multiplicative()?;
            left = Expression::Arithmetic(Box::new(Arithmetic {
                lhs: left,
                operator,
                rhs: right,
            }));
        }
    }

    fn parse_multiplicative(&mut self) -> Result<Expression, SyntaxError> {
        let mut left = self.parse_unary()?;
        loop {
            let operator = if self.is_symbol('*') {
                ArithmeticOperator::Multiply
            } else if self.is_symbol('/') {
                ArithmeticOperator::Divide
            } else if self.is_symbol('%') {
                ArithmeticOperator::Modulo
            } else {
                return Ok(left);
            };
            self.advance()?;
            let right = self.parse_unary()?;
            left = Expression::Arithmetic(Box::new(Arithmetic {
                lhs: left,
                operator,
                rhs: right,
            }));
        }
    }

    fn parse_unary(&mut self) -> Result<Expression, SyntaxError> {
        if self.is_symbol('-') {
            self.advance()?;
            let operand = self.parse_unary()?;
            return Ok(Expression::UnaryArithmetic(Box::new(UnaryArithmetic {
                operand,
                operator: ArithmeticOperator::Subtract,
            })));
        }
        if self.is_symbol('+') {
            self.advance()?;
            let operand = self.parse_unary()?;
            return Ok(Expression::UnaryArithmetic(Box::new(UnaryArithmetic {
                operand,
                operator: ArithmeticOperator::Add,
            })));
        }
        if self.is_symbol('!') {
            self.advance()?;
            let operand = self.parse_unary()?;
            return Ok(Expression::UnaryLogic(Box::new(UnaryLogic {
                operand,
                operator: "!".to_string(),
            })));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expression, SyntaxError> {
        match self.token.kind {
            TokenKind::IntegerLit => {
                let node = PrimitiveType::new(
                    self.token.literal.clone(),
                    Primary::integer_from_str(&self.token.literal),
                    self.token.pos(),
                );
                self.advance()?;
                Ok(Expression::Primitive(node))
            }
            TokenKind::FloatLit => {
                let node = PrimitiveType::new(
                    self.token.literal.clone(),
                    Primary::float_from_str(&self.token.literal),
                    self.token.pos(),
                );
                self.advance()?;
                Ok(Expression::Primitive(node))
            }
            TokenKind::StringLit => {
                let node = PrimitiveType::new(
                    self.token.literal.clone(),
                    Primary::String(self.token.literal.clone()),
                    self.token.pos(),
                );
                self.advance()?;
                Ok(Expression::Primitive(node))
            }
            TokenKind::TernaryLit => {
                let node = PrimitiveType::new(
                    self.token.literal.clone(),
                    Primary::ternary_from_str(&self.token.literal),
                    self.token.pos(),
                );
                self.advance()?;
                Ok(Expression::Primitive(node))
            }
            TokenKind::DatetimeLit => {
                // the lexer only classifies parseable datetimes
                let value = match str_to_time(&self.token.literal, &self.datetime_ctx) {
                    Some(dt) => Primary::Datetime(dt),
                    None => Primary::Null,
                };
                let node = PrimitiveType::new(self.token.literal.clone(), value, self.token.pos());
                self.advance()?;
                Ok(Expression::Primitive(node))
            }
            TokenKind::Keyword(Keyword::Null) => {
                let node = PrimitiveType::new(
                    self.token.literal.clone(),
                    Primary::Null,
                    self.token.pos(),
                );
                self.advance()?;
                Ok(Expression::Primitive(node))
            }
            TokenKind::Variable => {
                let variable = self.parse_variable()?;
                if self.token.kind == TokenKind::SubstitutionOp {
                    self.advance()?;
                    let value = self.parse_expression()?;
                    return Ok(Expression::VariableSubstitution(Box::new(
                        VariableSubstitution { variable, value },
                    )));
                }
                Ok(Expression::Variable(variable))
            }
            TokenKind::Flag => {
                let flag = Flag {
                    name: self.token.literal.clone(),
                    pos: self.token.pos(),
                };
                self.advance()?;
                Ok(Expression::Flag(flag))
            }
            TokenKind::Placeholder => {
                let literal = self.token.literal.clone();
                let pos = self.token.pos();
                self.advance()?;
                let (ordinal, name) = if literal == "?" {
                    self.holder_count += 1;
                    (self.holder_count, None)
                } else {
                    (0, Some(literal[1..].to_string()))
                };
                Ok(Expression::Placeholder(Placeholder {
                    literal,
                    ordinal,
                    name,
                    pos,
                }))
            }
            TokenKind::Keyword(Keyword::Case) => self.parse_case_expression(),
            TokenKind::Keyword(Keyword::Exists) => {
                self.advance()?;
                let query = self.parse_subquery()?;
                Ok(Expression::Exists(Box::new(Exists { query })))
            }
            TokenKind::Keyword(Keyword::Cursor) => self.parse_cursor_predicate(),
            TokenKind::Keyword(Keyword::Count) => {
                let name = self.token.literal.clone();
                let pos = self.token.pos();
                self.advance()?;
                self.expect_symbol('(')?;
                let distinct = self.accept_keyword(Keyword::Distinct)?;
                let args = if self.is_symbol('*') {
                    self.advance()?;
                    vec![Expression::AllColumns(AllColumns)]
                } else {
                    self.parse_expression_list()?
                };
                self.expect_symbol(')')?;
                self.finish_function_call(name, distinct, args, pos)
            }
            TokenKind::AggregateFunction => {
                let name = self.token.literal.clone();
                let pos = self.token.pos();
                self.advance()?;
                self.expect_symbol('(')?;
                let distinct = self.accept_keyword(Keyword::Distinct)?;
                let args = self.parse_expression_list()?;
                self.expect_symbol(')')?;
                self.finish_function_call(name, distinct, args, pos)
            }
            TokenKind::ListFunction => {
                let name = self.token.literal.clone();
                let pos = self.token.pos();
                self.advance()?;
                self.expect_symbol('(')?;
                let distinct = self.accept_keyword(Keyword::Distinct)?;
                let args = if self.is_symbol(')') {
                    Vec::new()
                } else {
                    self.parse_expression_list()?
                };
                self.expect_symbol(')')?;

                let within_group = if self.is_keyword(Keyword::Within) {
                    self.advance()?;
                    self.expect_keyword(Keyword::Group)?;
                    self.expect_symbol('(')?;
                    self.expect_keyword(Keyword::Order)?;
                    self.expect_keyword(Keyword::By)?;
                    let items = self.parse_order_items()?;
                    self.expect_symbol(')')?;
                    Some(OrderByClause { items })
                } else {
                    None
                };

                if within_group.is_none() && self.is_keyword(Keyword::Over) {
                    return self.finish_analytic_function(name, distinct, args, false, pos);
                }
                Ok(Expression::ListFunction(ListFunction {
                    name,
                    distinct,
                    args,
                    within_group,
                    pos,
                }))
            }
            TokenKind::AnalyticFunction => {
                let name = self.token.literal.clone();
                let pos = self.token.pos();
                self.advance()?;
                self.expect_symbol('(')?;
                let args = if self.is_symbol(')') {
                    Vec::new()
                } else {
                    self.parse_expression_list()?
                };
                self.expect_symbol(')')?;
                self.finish_analytic_function(name, false, args, false, pos)
            }
            TokenKind::FunctionNth | TokenKind::FunctionWithIgnoreNulls => {
                let name = self.token.literal.clone();
                let pos = self.token.pos();
                self.advance()?;
                self.expect_symbol('(')?;
                let args = self.parse_expression_list()?;
                self.expect_symbol(')')?;
                let ignore_nulls = if self.is_keyword(Keyword::Ignore) {
                    self.advance()?;
                    self.expect_keyword(Keyword::Nulls)?;
                    true
                } else {
                    false
                };
                self.finish_analytic_function(name, false, args, ignore_nulls, pos)
            }
            TokenKind::Identifier => {
                if self.peek()?.kind == TokenKind::Symbol('(') {
                    let name = self.token.literal.clone();
                    let pos = self.token.pos();
                    self.advance()?;
                    self.expect_symbol('(')?;
                    let args = if self.is_symbol(')') {
                        Vec::new()
                    } else {
                        self.parse_expression_list()?
                    };
                    self.expect_symbol(')')?;
                    return self.finish_scalar_function(name, args, pos);
                }

                let first = self.parse_identifier()?;
                if self.is_symbol('.') {
                    match self.peek()?.kind {
                        TokenKind::Identifier => {
                            self.advance()?;
                            let column = self.parse_identifier()?;
                            let pos = first.pos.clone();
                            return Ok(Expression::FieldReference(FieldReference {
                                view: Some(first),
                                column,
                                pos,
                            }));
                        }
                        TokenKind::IntegerLit => {
                            self.advance()?;
                            let number = self.token.literal.parse::<i64>().unwrap_or(0);
                            self.advance()?;
                            let pos = first.pos.clone();
                            return Ok(Expression::ColumnNumber(ColumnNumber {
                                view: first,
                                number,
                                pos,
                            }));
                        }
                        _ => {}
                    }
                }
                let pos = first.pos.clone();
                Ok(Expression::FieldReference(FieldReference {
                    view: None,
                    column: first,
                    pos,
                }))
            }
            TokenKind::Symbol('(') => self.parse_parenthesized(),
            _ => Err(self.unexpected()),
        }
    }

    /// `(` already seen: a subquery, a single parenthesized expression
    /// or a tuple-shaped row value.
    fn parse_parenthesized(&mut self) -> Result<Expression, SyntaxError> {
        if self.peek()?.kind == TokenKind::Keyword(Keyword::Select)
            || self.peek()?.kind == TokenKind::Keyword(Keyword::With)
        {
            let query = self.parse_subquery()?;
            return Ok(Expression::Subquery(Box::new(query)));
        }

        self.expect_symbol('(')?;
        let first = self.parse_expression()?;

        if self.is_symbol(',') {
            let mut values = vec![first];
            while self.is_symbol(',') {
                self.advance()?;
                values.push(self.parse_expression()?);
            }
            self.expect_symbol(')')?;
            return Ok(Expression::RowValue(Box::new(RowValue {
                value: Expression::ValueList(ValueList { values }),
            })));
        }

        self.expect_symbol(')')?;
        Ok(Expression::Parentheses(Box::new(Parentheses {
            expr: first,
        })))
    }

    fn parse_case_expression(&mut self) -> Result<Expression, SyntaxError> {
        self.expect_keyword(Keyword::Case)?;

        let value = if self.is_keyword(Keyword::When) {
            None
        } else {
            Some(self.parse_expression()?)
        };

        let mut when = Vec::new();
        while self.is_keyword(Keyword::When) {
            self.advance()?;
            let condition = self.parse_expression()?;
            self.expect_keyword(Keyword::Then)?;
            let result = self.parse_expression()?;
            when.push(CaseExprWhen { condition, result });
        }
        if when.is_empty() {
            return Err(self.unexpected());
        }

        let else_expr = if self.is_keyword(Keyword::Else) {
            self.advance()?;
            Some(CaseExprElse {
                result: self.parse_expression()?,
            })
        } else {
            None
        };

        self.expect_keyword(Keyword::End)?;

        Ok(Expression::CaseExpr(Box::new(CaseExpr {
            value,
            when,
            else_expr,
        })))
    }

    fn parse_cursor_predicate(&mut self) -> Result<Expression, SyntaxError> {
        self.expect_keyword(Keyword::Cursor)?;
        let cursor = self.parse_identifier()?;

        if self.is_keyword(Keyword::Count) {
            self.advance()?;
            return Ok(Expression::CursorAttribute(CursorAttribute { cursor }));
        }

        self.expect_keyword(Keyword::Is)?;
        let negation = self.accept_keyword(Keyword::Not)?;
        let status = if self.accept_keyword(Keyword::Open)? {
            CursorStatusType::Open
        } else {
            self.expect_keyword(Keyword::In)?;
            self.expect_keyword(Keyword::Range)?;
            CursorStatusType::InRange
        };

        Ok(Expression::CursorStatus(CursorStatus {
            cursor,
            negation,
            status,
        }))
    }

    /// Wrap a completed aggregate-shaped call, promoting it to an
    /// analytic function when `OVER` follows.
    fn finish_function_call(
        &mut self,
        name: String,
        distinct: bool,
        args: Vec<Expression>,
        pos: crate::ast::tokens::Pos,
    ) -> Result<Expression, SyntaxError> {
        if self.is_keyword(Keyword::Over) {
            return self.finish_analytic_function(name, distinct, args, false, pos);
        }
        Ok(Expression::AggregateFunction(AggregateFunction {
            name,
            distinct,
            args,
            pos,
        }))
    }

    fn finish_scalar_function(
        &mut self,
        name: String,
        args: Vec<Expression>,
        pos: crate::ast::tokens::Pos,
    ) -> Result<Expression, SyntaxError> {
        if self.is_keyword(Keyword::Over) {
            return self.finish_analytic_function(name, false, args, false, pos);
        }
        Ok(Expression::Function(Function { name, args, pos }))
    }

    fn finish_analytic_function(
        &mut self,
        name: String,
        distinct: bool,
        args: Vec<Expression>,
        ignore_nulls: bool,
        pos: crate::ast::tokens::Pos,
    ) -> Result<Expression, SyntaxError> {
        self.expect_keyword(Keyword::Over)?;
        self.expect_symbol('(')?;

        let partition_clause = if self.is_keyword(Keyword::Partition) {
            self.advance()?;
            self.expect_keyword(Keyword::By)?;
            Some(PartitionClause {
                values: self.parse_expression_list()?,
            })
        } else {
            None
        };

        let order_by_clause = if self.is_keyword(Keyword::Order) {
            self.advance()?;
            self.expect_keyword(Keyword::By)?;
            Some(OrderByClause {
                items: self.parse_order_items()?,
            })
        } else {
            None
        };

        self.expect_symbol(')')?;

        Ok(Expression::AnalyticFunction(Box::new(AnalyticFunction {
            name,
            distinct,
            args,
            ignore_nulls,
            analytic_clause: AnalyticClause {
                partition_clause,
                order_by_clause,
            },
            pos,
        })))
    }
}
