// tests/parser_tests.rs

use csvql::ast::expressions::*;
use csvql::ast::operators::*;
use csvql::ast::query::*;
use csvql::ast::statements::*;
use csvql::parser::{parse, parse_with, ParseOptions};
use csvql::value::Primary;

fn parse_single(src: &str) -> Statement {
    let program = parse(src).expect("parse failed");
    assert_eq!(program.statements.len(), 1, "expected one statement");
    program.statements.into_iter().next().unwrap()
}

fn select_entity(statement: &Statement) -> &SelectEntity {
    match statement {
        Statement::SelectQuery(query) => match &query.entity {
            SelectComponent::Entity(entity) => entity,
            other => panic!("expected select entity, got {:?}", other),
        },
        other => panic!("expected select query, got {:?}", other),
    }
}

// ============================================================================
// Select queries
// ============================================================================

#[test]
fn test_minimal_select() {
    let statement = parse_single("select 1");
    let entity = select_entity(&statement);
    assert_eq!(entity.select_clause.fields.len(), 1);
    assert!(matches!(
        &entity.select_clause.fields[0].object,
        Expression::Primitive(p) if p.value == Primary::Integer(1)
    ));
}

#[test]
fn test_select_where_comparison() {
    let statement = parse_single("select c1 from t1 where c1 = 1");
    let entity = select_entity(&statement);

    let filter = &entity.where_clause.as_ref().unwrap().filter;
    match filter {
        Expression::Comparison(cmp) => {
            assert!(matches!(
                &cmp.lhs,
                Expression::FieldReference(r) if r.column.literal == "c1" && r.view.is_none()
            ));
            assert_eq!(cmp.operator, "=");
            assert!(matches!(
                &cmp.rhs,
                Expression::Primitive(p) if p.value == Primary::Integer(1)
            ));
        }
        other => panic!("expected comparison, got {:?}", other),
    }
}

#[test]
fn test_select_clause_options() {
    let statement = parse_single(
        "select distinct t1.c1, c2 as x, * from t1 group by c1 having count(*) > 1",
    );
    let entity = select_entity(&statement);
    assert!(entity.select_clause.distinct);
    assert_eq!(entity.select_clause.fields.len(), 3);
    assert!(matches!(
        &entity.select_clause.fields[0].object,
        Expression::FieldReference(r) if r.view.as_ref().unwrap().literal == "t1"
    ));
    assert_eq!(
        entity.select_clause.fields[1].alias.as_ref().unwrap().literal,
        "x"
    );
    assert!(matches!(
        &entity.select_clause.fields[2].object,
        Expression::AllColumns(_)
    ));
    assert!(entity.group_by_clause.is_some());
    assert!(entity.having_clause.is_some());
}

#[test]
fn test_column_number_reference() {
    let statement = parse_single("select t1.2 from t1");
    let entity = select_entity(&statement);
    assert!(matches!(
        &entity.select_clause.fields[0].object,
        Expression::ColumnNumber(n) if n.view.literal == "t1" && n.number == 2
    ));
}

#[test]
fn test_order_limit_offset() {
    let statement =
        parse_single("select c1 from t1 order by c1 desc nulls last limit 10 percent with ties offset 2 rows");
    let query = match &statement {
        Statement::SelectQuery(q) => q,
        other => panic!("unexpected {:?}", other),
    };

    let order_by = query.order_by_clause.as_ref().unwrap();
    assert_eq!(order_by.items[0].direction, Some(SortDirection::Descending));
    assert_eq!(order_by.items[0].nulls_position, Some(NullsPosition::Last));

    let limit = query.limit_clause.as_ref().unwrap();
    assert_eq!(limit.unit, Some(LimitUnit::Percent));
    assert!(limit.with_ties);

    let offset = query.offset_clause.as_ref().unwrap();
    assert_eq!(offset.unit, Some(OffsetUnit::Rows));
}

#[test]
fn test_set_operations_precedence() {
    let statement = parse_single("select 1 union select 2 intersect select 3 except all select 4");
    let query = match &statement {
        Statement::SelectQuery(q) => q,
        other => panic!("unexpected {:?}", other),
    };

    // ((1 UNION (2 INTERSECT 3)) EXCEPT ALL 4)
    match &query.entity {
        SelectComponent::Set(except) => {
            assert_eq!(except.operator, SetOperator::Except);
            assert!(except.all);
            match &except.lhs {
                SelectComponent::Set(union) => {
                    assert_eq!(union.operator, SetOperator::Union);
                    assert!(!union.all);
                    assert!(matches!(
                        &union.rhs,
                        SelectComponent::Set(intersect)
                            if intersect.operator == SetOperator::Intersect
                    ));
                }
                other => panic!("expected nested set, got {:?}", other),
            }
        }
        other => panic!("expected set operation, got {:?}", other),
    }
}

#[test]
fn test_with_clause() {
    let statement =
        parse_single("with recursive t (n) as (select 1), u as (select 2) select * from t");
    let query = match &statement {
        Statement::SelectQuery(q) => q,
        other => panic!("unexpected {:?}", other),
    };
    let with = query.with_clause.as_ref().unwrap();
    assert_eq!(with.inline_tables.len(), 2);
    assert!(with.inline_tables[0].recursive);
    assert_eq!(with.inline_tables[0].name.literal, "t");
    assert_eq!(with.inline_tables[0].fields[0].literal, "n");
    assert!(!with.inline_tables[1].recursive);
}

// ============================================================================
// Tables and joins
// ============================================================================

#[test]
fn test_from_items() {
    let statement = parse_single("select 1 from dual, stdin, t1 as a, (select 1) b, data.csv");
    let entity = select_entity(&statement);
    let tables = &entity.from_clause.as_ref().unwrap().tables;
    assert_eq!(tables.len(), 5);
    assert!(matches!(
        &tables[0],
        Expression::Table(t) if matches!(t.object, Expression::Dual(_))
    ));
    assert!(matches!(
        &tables[1],
        Expression::Table(t) if matches!(t.object, Expression::Stdin(_))
    ));
    assert!(matches!(
        &tables[2],
        Expression::Table(t) if t.alias.as_ref().unwrap().literal == "a"
    ));
    assert!(matches!(
        &tables[3],
        Expression::Table(t) if matches!(t.object, Expression::Subquery(_))
    ));
    assert!(matches!(
        &tables[4],
        Expression::Table(t)
            if matches!(&t.object, Expression::Identifier(i) if i.literal == "data.csv")
    ));
}

#[test]
fn test_join_chain() {
    let statement = parse_single(
        "select 1 from t1 inner join t2 on t1.c1 = t2.c1 left outer join t3 using (c1) natural join t4 cross join t5",
    );
    let entity = select_entity(&statement);
    let tables = &entity.from_clause.as_ref().unwrap().tables;
    assert_eq!(tables.len(), 1);

    // outermost join is the cross join
    let cross = match &tables[0] {
        Expression::Join(join) => join,
        other => panic!("expected join, got {:?}", other),
    };
    assert_eq!(cross.join_type, Some(JoinType::Cross));
    assert!(cross.condition.is_none());

    let natural = match &cross.table {
        Expression::Join(join) => join,
        other => panic!("expected join, got {:?}", other),
    };
    assert!(natural.natural);

    let left = match &natural.table {
        Expression::Join(join) => join,
        other => panic!("expected join, got {:?}", other),
    };
    assert_eq!(left.direction, Some(JoinDirection::Left));
    assert_eq!(left.join_type, Some(JoinType::Outer));
    assert!(matches!(
        left.condition.as_ref().unwrap(),
        JoinCondition::Using(fields) if fields.len() == 1
    ));

    let inner = match &left.table {
        Expression::Join(join) => join,
        other => panic!("expected join, got {:?}", other),
    };
    assert_eq!(inner.join_type, Some(JoinType::Inner));
    assert!(matches!(
        inner.condition.as_ref().unwrap(),
        JoinCondition::On(_)
    ));
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_arithmetic_precedence() {
    let statement = parse_single("select 1 + 2 * 3");
    let entity = select_entity(&statement);
    match &entity.select_clause.fields[0].object {
        Expression::Arithmetic(add) => {
            assert_eq!(add.operator, ArithmeticOperator::Add);
            assert!(matches!(
                &add.rhs,
                Expression::Arithmetic(mul) if mul.operator == ArithmeticOperator::Multiply
            ));
        }
        other => panic!("expected arithmetic, got {:?}", other),
    }
}

#[test]
fn test_logic_precedence() {
    let statement = parse_single("select not c1 = 1 and c2 = 2 or c3 = 3");
    let entity = select_entity(&statement);
    // ((NOT (c1 = 1)) AND (c2 = 2)) OR (c3 = 3)
    match &entity.select_clause.fields[0].object {
        Expression::Logic(or) => {
            assert_eq!(or.operator, LogicOperator::Or);
            match &or.lhs {
                Expression::Logic(and) => {
                    assert_eq!(and.operator, LogicOperator::And);
                    assert!(matches!(&and.lhs, Expression::UnaryLogic(_)));
                }
                other => panic!("expected and, got {:?}", other),
            }
        }
        other => panic!("expected logic, got {:?}", other),
    }
}

#[test]
fn test_concat_flattens() {
    let statement = parse_single("select c1 || '-' || c2");
    let entity = select_entity(&statement);
    assert!(matches!(
        &entity.select_clause.fields[0].object,
        Expression::Concat(c) if c.items.len() == 3
    ));
}

#[test]
fn test_predicates() {
    let cases = vec![
        "select 1 where c1 is not null",
        "select 1 where c1 between 1 and 10",
        "select 1 where c1 not between 1 and 10",
        "select 1 where c1 in (1, 2, 3)",
        "select 1 where c1 not in (select c1 from t2)",
        "select 1 where c1 like '%abc%'",
        "select 1 where c1 > any (select c1 from t2)",
        "select 1 where c1 = all ((1, 2), (3, 4))",
        "select 1 where exists (select 1 from t2)",
    ];
    for src in cases {
        parse(src).unwrap_or_else(|e| panic!("failed for {:?}: {}", src, e));
    }
}

#[test]
fn test_row_value_comparison_shape() {
    let statement = parse_single("select 1 where (c1, c2) = (1, 2)");
    let entity = select_entity(&statement);
    match &entity.where_clause.as_ref().unwrap().filter {
        Expression::Comparison(cmp) => {
            assert!(matches!(&cmp.lhs, Expression::RowValue(_)));
            assert!(matches!(&cmp.rhs, Expression::RowValue(_)));
        }
        other => panic!("expected comparison, got {:?}", other),
    }
}

#[test]
fn test_single_parenthesized_scalar_is_not_a_row_value() {
    let statement = parse_single("select (1)");
    let entity = select_entity(&statement);
    assert!(matches!(
        &entity.select_clause.fields[0].object,
        Expression::Parentheses(_)
    ));
}

#[test]
fn test_in_row_value_list() {
    let statement = parse_single("select 1 where (c1, c2) in ((1, 2), (3, 4))");
    let entity = select_entity(&statement);
    match &entity.where_clause.as_ref().unwrap().filter {
        Expression::In(in_expr) => {
            assert!(matches!(
                &in_expr.values,
                Expression::RowValueList(l) if l.row_values.len() == 2
            ));
        }
        other => panic!("expected in, got {:?}", other),
    }
}

#[test]
fn test_case_expression() {
    let statement =
        parse_single("select case c1 when 1 then 'one' when 2 then 'two' else 'other' end");
    let entity = select_entity(&statement);
    match &entity.select_clause.fields[0].object {
        Expression::CaseExpr(case) => {
            assert!(case.value.is_some());
            assert_eq!(case.when.len(), 2);
            assert!(case.else_expr.is_some());
        }
        other => panic!("expected case, got {:?}", other),
    }
}

#[test]
fn test_function_calls() {
    let statement = parse_single(
        "select now(), count(*), sum(distinct c1), listagg(c1, ',') within group (order by c1)",
    );
    let entity = select_entity(&statement);
    let fields = &entity.select_clause.fields;
    assert!(matches!(&fields[0].object, Expression::Function(f) if f.name == "now"));
    assert!(matches!(
        &fields[1].object,
        Expression::AggregateFunction(f)
            if f.name == "count" && matches!(f.args[0], Expression::AllColumns(_))
    ));
    assert!(matches!(
        &fields[2].object,
        Expression::AggregateFunction(f) if f.distinct
    ));
    assert!(matches!(
        &fields[3].object,
        Expression::ListFunction(f) if f.within_group.is_some()
    ));
}

#[test]
fn test_analytic_functions() {
    let statement = parse_single(
        "select rank() over (partition by c1 order by c2), lag(c1) ignore nulls over (order by c2), sum(c1) over ()",
    );
    let entity = select_entity(&statement);
    let fields = &entity.select_clause.fields;
    match &fields[0].object {
        Expression::AnalyticFunction(f) => {
            assert_eq!(f.name, "rank");
            assert!(f.analytic_clause.partition_clause.is_some());
            assert!(f.analytic_clause.order_by_clause.is_some());
        }
        other => panic!("expected analytic function, got {:?}", other),
    }
    assert!(matches!(
        &fields[1].object,
        Expression::AnalyticFunction(f) if f.ignore_nulls
    ));
    assert!(matches!(
        &fields[2].object,
        Expression::AnalyticFunction(f) if f.name == "sum"
    ));
}

#[test]
fn test_variable_substitution_expression() {
    let statement = parse_single("select @a := @b := 1");
    let entity = select_entity(&statement);
    match &entity.select_clause.fields[0].object {
        Expression::VariableSubstitution(outer) => {
            assert_eq!(outer.variable.name, "a");
            assert!(matches!(&outer.value, Expression::VariableSubstitution(_)));
        }
        other => panic!("expected substitution, got {:?}", other),
    }
}

#[test]
fn test_cursor_predicates() {
    let statement = parse_single("select case when cursor cur is not open then 1 else cursor cur count end");
    let entity = select_entity(&statement);
    match &entity.select_clause.fields[0].object {
        Expression::CaseExpr(case) => {
            assert!(matches!(
                &case.when[0].condition,
                Expression::CursorStatus(s)
                    if s.negation && s.status == CursorStatusType::Open
            ));
            assert!(matches!(
                &case.else_expr.as_ref().unwrap().result,
                Expression::CursorAttribute(_)
            ));
        }
        other => panic!("expected case, got {:?}", other),
    }
}

// ============================================================================
// DML and DDL
// ============================================================================

#[test]
fn test_insert_values() {
    let statement = parse_single("insert into t1 (c1, c2) values (1, 'a'), (2, 'b')");
    match &statement {
        Statement::InsertQuery(insert) => {
            assert_eq!(insert.table.literal, "t1");
            assert_eq!(insert.fields.len(), 2);
            assert_eq!(insert.values.len(), 2);
            assert!(insert.query.is_none());
        }
        other => panic!("expected insert, got {:?}", other),
    }
}

#[test]
fn test_insert_select() {
    let statement = parse_single("insert into t1 select c1 from t2");
    assert!(matches!(
        &statement,
        Statement::InsertQuery(insert) if insert.query.is_some()
    ));
}

#[test]
fn test_update() {
    let statement = parse_single("update t1 set c1 = 1, c2 = 'a' from t1 join t2 on t1.id = t2.id where t2.c1 > 0");
    match &statement {
        Statement::UpdateQuery(update) => {
            assert_eq!(update.set_list.len(), 2);
            assert!(update.from_clause.is_some());
            assert!(update.where_clause.is_some());
        }
        other => panic!("expected update, got {:?}", other),
    }
}

#[test]
fn test_delete() {
    let statement = parse_single("delete t1 from t1 join t2 on t1.id = t2.id");
    match &statement {
        Statement::DeleteQuery(delete) => {
            assert_eq!(delete.tables.len(), 1);
        }
        other => panic!("expected delete, got {:?}", other),
    }
}

#[test]
fn test_replace() {
    let statement = parse_single("replace into t1 (c1, c2) using (c1) values (1, 'a')");
    match &statement {
        Statement::ReplaceQuery(replace) => {
            assert_eq!(replace.keys.len(), 1);
            assert_eq!(replace.values.len(), 1);
        }
        other => panic!("expected replace, got {:?}", other),
    }
}

#[test]
fn test_create_table() {
    assert!(matches!(
        parse_single("create table t1 (c1, c2)"),
        Statement::CreateTable(ct) if ct.fields.len() == 2 && ct.query.is_none()
    ));
    assert!(matches!(
        parse_single("create table t1 as select 1"),
        Statement::CreateTable(ct) if ct.query.is_some()
    ));
}

#[test]
fn test_alter_table() {
    assert!(matches!(
        parse_single("alter table t1 add (c2 default 0, c3) after c1"),
        Statement::AddColumns(add)
            if add.columns.len() == 2
                && add.position.as_ref().unwrap().position == ColumnPositionType::After
    ));
    assert!(matches!(
        parse_single("alter table t1 drop (c1, c2)"),
        Statement::DropColumns(drop) if drop.columns.len() == 2
    ));
    assert!(matches!(
        parse_single("alter table t1 rename c1 to c9"),
        Statement::RenameColumn(rename) if rename.new.literal == "c9"
    ));
    assert!(matches!(
        parse_single("alter table t1 set format to 'json'"),
        Statement::SetTableAttribute(set) if set.attribute.literal == "format"
    ));
}

// ============================================================================
// Declarations, cursors, control flow
// ============================================================================

#[test]
fn test_variable_statements() {
    assert!(matches!(
        parse_single("declare @a := 1, @b"),
        Statement::VariableDeclaration(d) if d.assignments.len() == 2
    ));
    assert!(matches!(
        parse_single("var @a"),
        Statement::VariableDeclaration(_)
    ));
    assert!(matches!(
        parse_single("@a := 1"),
        Statement::VariableSubstitution(s) if s.variable.name == "a"
    ));
    assert!(matches!(
        parse_single("dispose @a"),
        Statement::DisposeVariable(_)
    ));
}

#[test]
fn test_cursor_statements() {
    assert!(matches!(
        parse_single("declare cur cursor for select c1 from t1"),
        Statement::CursorDeclaration(d) if d.cursor.literal == "cur"
    ));
    assert!(matches!(parse_single("open cur"), Statement::OpenCursor(_)));
    assert!(matches!(parse_single("close cur"), Statement::CloseCursor(_)));
    assert!(matches!(
        parse_single("dispose cursor cur"),
        Statement::DisposeCursor(_)
    ));
    assert!(matches!(
        parse_single("fetch cur into @a, @b"),
        Statement::FetchCursor(fetch) if fetch.position.is_none() && fetch.variables.len() == 2
    ));
    assert!(matches!(
        parse_single("fetch absolute 3 cur into @a"),
        Statement::FetchCursor(fetch)
            if matches!(
                fetch.position.as_ref().unwrap().position,
                FetchPositionType::Absolute
            )
    ));
}

#[test]
fn test_view_and_function_declarations() {
    assert!(matches!(
        parse_single("declare v view as select c1 from t1"),
        Statement::ViewDeclaration(v) if v.query.is_some()
    ));
    assert!(matches!(
        parse_single("dispose view v"),
        Statement::DisposeView(_)
    ));

    let statement =
        parse_single("declare f function (@a, @b := 1) as begin return @a + @b; end");
    match &statement {
        Statement::FunctionDeclaration(func) => {
            assert_eq!(func.name.literal, "f");
            assert_eq!(func.parameters.len(), 2);
            assert_eq!(func.statements.len(), 1);
            assert!(matches!(&func.statements[0], Statement::Return(_)));
        }
        other => panic!("expected function declaration, got {:?}", other),
    }

    assert!(matches!(
        parse_single("declare agg aggregate (list, @sep := ',') as begin return @sep; end"),
        Statement::AggregateDeclaration(a)
            if a.cursor.literal == "list" && a.parameters.len() == 1
    ));
    assert!(matches!(
        parse_single("dispose function f"),
        Statement::DisposeFunction(_)
    ));
}

#[test]
fn test_prepared_statements() {
    assert!(matches!(
        parse_single("prepare stmt from 'select 1'"),
        Statement::StatementPreparation(p) if p.statement == "select 1"
    ));
    assert!(matches!(
        parse_single("execute stmt using 1, 'a'"),
        Statement::ExecutePrepared(e) if e.values.len() == 2
    ));
    assert!(matches!(
        parse_single("dispose prepare stmt"),
        Statement::DisposePrepared(_)
    ));
}

#[test]
fn test_if_statement() {
    let statement = parse_single(
        "if @a = 1 then print 1; elseif @a = 2 then print 2; else print 3; end if",
    );
    match &statement {
        Statement::If(if_stmt) => {
            assert_eq!(if_stmt.statements.len(), 1);
            assert_eq!(if_stmt.else_if.len(), 1);
            assert!(if_stmt.else_stmt.is_some());
        }
        other => panic!("expected if, got {:?}", other),
    }
}

#[test]
fn test_while_statements() {
    assert!(matches!(
        parse_single("while @a < 10 do @a := @a + 1; end while"),
        Statement::While(w) if w.statements.len() == 1
    ));
    assert!(matches!(
        parse_single("while @a, @b in cur do print @a; end while"),
        Statement::WhileInCursor(w) if w.variables.len() == 2 && w.cursor.literal == "cur"
    ));
}

#[test]
fn test_case_statement() {
    let statement =
        parse_single("case @a when 1 then print 'one'; when 2 then print 'two'; else print 'other'; end case");
    match &statement {
        Statement::Case(case) => {
            assert!(case.value.is_some());
            assert_eq!(case.when.len(), 2);
            assert!(case.else_stmt.is_some());
        }
        other => panic!("expected case, got {:?}", other),
    }
}

#[test]
fn test_flow_control_statements() {
    assert!(matches!(
        parse_single("while true do continue; end while"),
        Statement::While(w) if matches!(w.statements[0], Statement::FlowControl(FlowControl::Continue))
    ));
    assert!(matches!(
        parse_single("exit 1"),
        Statement::Exit(e) if e.code.is_some()
    ));
    assert!(matches!(parse_single("exit"), Statement::Exit(e) if e.code.is_none()));
    assert!(matches!(parse_single("return"), Statement::Return(r) if r.value.is_none()));
}

#[test]
fn test_transaction_and_environment_statements() {
    assert!(matches!(
        parse_single("commit"),
        Statement::TransactionControl(TransactionControl::Commit)
    ));
    assert!(matches!(
        parse_single("rollback"),
        Statement::TransactionControl(TransactionControl::Rollback)
    ));
    assert!(matches!(
        parse_single("set @@wait_timeout to 15"),
        Statement::SetFlag(s) if s.flag.name == "wait_timeout"
    ));
    assert!(matches!(parse_single("print 1"), Statement::Print(_)));
    assert!(matches!(
        parse_single("printf '%s-%s' using c1, c2"),
        Statement::Printf(p) if p.values.len() == 2
    ));
    assert!(matches!(
        parse_single("source 'queries.sql'"),
        Statement::Source(_)
    ));
    assert!(matches!(parse_single("echo @a"), Statement::Echo(_)));
}

// ============================================================================
// Programs, placeholders, errors
// ============================================================================

#[test]
fn test_multiple_statements() {
    let program = parse("select 1; select 2;; select 3").unwrap();
    assert_eq!(program.statements.len(), 3);
}

#[test]
fn test_empty_program() {
    assert_eq!(parse("").unwrap().statements.len(), 0);
    assert_eq!(parse(" ;; ").unwrap().statements.len(), 0);
}

#[test]
fn test_placeholder_count() {
    let opts = ParseOptions {
        enable_placeholders: true,
        ..Default::default()
    };
    let program =
        parse_with("select c1 from t1 where c1 = ? and c2 = :name and c3 = ?", &opts).unwrap();
    assert_eq!(program.holder_count, 2);
}

#[test]
fn test_ansi_quotes_dialect() {
    let opts = ParseOptions {
        ansi_quotes: true,
        ..Default::default()
    };
    let program = parse_with(r#"select "my column" from t1"#, &opts).unwrap();
    let entity = select_entity(&program.statements[0]);
    assert!(matches!(
        &entity.select_clause.fields[0].object,
        Expression::FieldReference(r) if r.column.literal == "my column" && r.column.quoted
    ));
}

#[test]
fn test_syntax_error_position() {
    let err = parse("select c1 from\nwhere c1 = 1").unwrap_err();
    assert_eq!(err.message, "syntax error: unexpected token \"where\"");
    assert_eq!(err.line, 2);
    assert_eq!(err.column, 1);
}

#[test]
fn test_unexpected_termination() {
    let err = parse("select c1 from t1 where").unwrap_err();
    assert_eq!(err.message, "syntax error: unexpected termination");
}

#[test]
fn test_uncategorized_operator_is_rejected() {
    let err = parse("select 1 => 2").unwrap_err();
    assert_eq!(err.message, "syntax error: unexpected token \"=>\"");
}

#[test]
fn test_lexical_error_is_surfaced() {
    let err = parse("select 'unterminated").unwrap_err();
    assert_eq!(err.message, "literal not terminated");
    assert_eq!(err.line, 1);
}

#[test]
fn test_source_file_in_error() {
    let opts = ParseOptions {
        source_file: Some("broken.sql".to_string()),
        ..Default::default()
    };
    let err = parse_with("select from", &opts).unwrap_err();
    assert_eq!(err.source_file.as_deref(), Some("broken.sql"));
    assert!(err.to_string().ends_with("broken.sql"));
}
