// tests/integration_tests.rs
//
// Round-trip guarantees: rendering a parsed statement yields canonical,
// re-parseable text whose AST is structurally equal to the original
// (positions excluded, they never take part in equality).

use csvql::ast::expressions::Expression;
use csvql::ast::query::SelectComponent;
use csvql::ast::statements::Statement;
use csvql::parser::parse;
use csvql::value::Primary;

fn round_trip(src: &str) {
    let first = parse(src).unwrap_or_else(|e| panic!("parse failed for {:?}: {}", src, e));
    let rendered = first
        .statements
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join("; ");
    let second =
        parse(&rendered).unwrap_or_else(|e| panic!("re-parse failed for {:?}: {}", rendered, e));
    assert_eq!(
        first.statements, second.statements,
        "round trip changed the tree for {:?} (rendered as {:?})",
        src, rendered
    );
}

#[test]
fn test_round_trip_queries() {
    let sources = vec![
        "select 1",
        "select distinct c1, c2 as x from t1",
        "select * from dual",
        "select t1.c1, t1.2 from t1 as a, stdin",
        "select c1 from t1 where c1 = 1 and c2 <> 'a' or not c3",
        "select c1 from t1 where c1 is not null",
        "select c1 from t1 where c1 between -1 and 10",
        "select c1 from t1 where c1 not in (1, 2, 3)",
        "select c1 from t1 where (c1, c2) in ((1, 2), (3, 4))",
        "select c1 from t1 where c1 like '%a_'",
        "select c1 from t1 where c1 >= any (select c1 from t2)",
        "select c1 from t1 where c1 = all ((1, 2), (3, 4))",
        "select c1 from t1 where exists (select 1 from t2)",
        "select c1 || '-' || c2 from t1",
        "select 1 + 2 * 3 - 4 / 5 % 6",
        "select -c1, !c2, not c3 from t1",
        "select (1 + 2) * 3",
        "select case when c1 = 1 then 'one' else 'other' end from t1",
        "select case c1 when 1 then 'one' when 2 then 'two' end from t1",
        "select count(*), sum(distinct c1), avg(c1) from t1 group by c2 having count(*) > 1",
        "select listagg(c1, ',') within group (order by c1) from t1",
        "select rank() over (partition by c1 order by c2 desc) from t1",
        "select first_value(c1) ignore nulls over (order by c2) from t1",
        "select coalesce(c1, 0) from t1",
        "select c1 from t1 inner join t2 on t1.c1 = t2.c1",
        "select c1 from t1 natural join t2 cross join t3",
        "select c1 from t1 left outer join t2 using (c1, c2)",
        "select c1 from (select c1 from t2) t",
        "select c1 from t1 order by c1 asc, c2 desc nulls first limit 10 percent with ties offset 1 row",
        "select 1 union all select 2 intersect select 3",
        "with t (n) as (select 1), u as (select 2) select * from t except select * from u",
        "select '2012-02-03 09:18:15' from t1",
        "select 'it''s' from t1",
        "select `quoted name` from `file name.csv`",
        "select @var, @@flag, @v := 1 from t1",
        "select cursor cur is in range, cursor cur count from t1",
    ];

    for src in sources {
        round_trip(src);
    }
}

#[test]
fn test_round_trip_statements() {
    let sources = vec![
        "insert into t1 (c1, c2) values (1, 'a'), (2, 'b')",
        "insert into t1 select c1, c2 from t2",
        "update t1 set c1 = 1 from t1 join t2 on t1.id = t2.id where t2.ok",
        "delete from t1 where c1 = 1",
        "delete t1 from t1 join t2 on t1.id = t2.id",
        "replace into t1 (c1, c2) using (c1) values (1, 'a')",
        "create table new_table (c1, c2)",
        "create table new_table as select c1 from t1",
        "alter table t1 add (c2 default 0, c3) after c1",
        "alter table t1 add (c2) first",
        "alter table t1 drop (c2)",
        "alter table t1 rename c1 to c9",
        "alter table t1 set delimiter to '\t'",
        "declare @a := 1, @b",
        "@a := @b := 2",
        "dispose @a",
        "declare cur cursor for select c1 from t1",
        "open cur; fetch next cur into @a; close cur; dispose cursor cur",
        "fetch relative 2 cur into @a, @b",
        "declare v view (c1, c2) as select c1, c2 from t1",
        "dispose view v",
        "declare f function (@a, @b := 1) as begin return @a + @b; end",
        "declare agg aggregate (list, @sep := ',') as begin return @sep; end",
        "dispose function f",
        "prepare stmt from 'select 1'; execute stmt using 1; dispose prepare stmt",
        "if @a = 1 then print 1; elseif @a = 2 then print 2; else print 3; end if",
        "while @a < 10 do @a := @a + 1; continue; end while",
        "while @a, @b in cur do print @a; break; end while",
        "case @a when 1 then print 'one'; else print 'other'; end case",
        "case when @a = 1 then exit 1; end case",
        "return @a",
        "commit; rollback",
        "set @@wait_timeout to 15",
        "print 1; printf '%s' using c1; source 'queries.sql'; echo @a",
    ];

    for src in sources {
        round_trip(src);
    }
}

#[test]
fn test_canonical_rendering() {
    let cases = vec![
        (
            "select c1 from t1 where c1 = 1",
            "SELECT c1 FROM t1 WHERE c1 = 1",
        ),
        (
            "select Distinct c1 From t1 Order By c1 Desc",
            "SELECT DISTINCT c1 FROM t1 ORDER BY c1 DESC",
        ),
        ("select 'a' || 'b'", "SELECT 'a' || 'b'"),
        (
            "insert into t1 values (1)",
            "INSERT INTO t1 VALUES (1)",
        ),
        (
            "select c1 from t1 where c1 not between 1 and 2",
            "SELECT c1 FROM t1 WHERE c1 NOT BETWEEN 1 AND 2",
        ),
        (
            "if true then print 1; end if",
            "IF true THEN PRINT 1; END IF",
        ),
    ];

    for (src, expected) in cases {
        let program = parse(src).unwrap();
        assert_eq!(program.statements[0].to_string(), expected);
    }
}

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[test]
fn test_end_to_end_select() {
    let program = parse("select c1 from t1 where c1 = 1").unwrap();
    assert_eq!(program.statements.len(), 1);
    assert_eq!(program.holder_count, 0);

    let query = match &program.statements[0] {
        Statement::SelectQuery(query) => query,
        other => panic!("expected select query, got {:?}", other),
    };
    let entity = match &query.entity {
        SelectComponent::Entity(entity) => entity,
        other => panic!("expected entity, got {:?}", other),
    };

    match &entity.where_clause.as_ref().unwrap().filter {
        Expression::Comparison(cmp) => {
            assert!(matches!(
                &cmp.lhs,
                Expression::FieldReference(r) if r.column.literal == "c1"
            ));
            assert_eq!(cmp.operator, "=");
            assert!(matches!(
                &cmp.rhs,
                Expression::Primitive(p) if p.value == Primary::Integer(1)
            ));
        }
        other => panic!("expected comparison, got {:?}", other),
    }

    // the rendering is itself a valid program with the same shape
    round_trip("select c1 from t1 where c1 = 1");
}

#[test]
fn test_end_to_end_error() {
    let err = parse("select 'unterminated").unwrap_err();
    assert_eq!(err.message, "literal not terminated");
    assert_eq!(err.line, 1);
    assert_eq!(err.to_string(), "literal not terminated [L:1 C:8]");
}

#[test]
fn test_positions_do_not_affect_equality() {
    let a = parse("select c1\nfrom t1").unwrap();
    let b = parse("select    c1 from t1").unwrap();
    assert_eq!(a.statements, b.statements);
}

#[test]
fn test_positions_are_reported() {
    let program = parse("select c1 from t1").unwrap();
    let entity = match &program.statements[0] {
        Statement::SelectQuery(query) => match &query.entity {
            SelectComponent::Entity(entity) => entity,
            other => panic!("unexpected {:?}", other),
        },
        other => panic!("unexpected {:?}", other),
    };
    let pos = entity.select_clause.fields[0].object.pos();
    let loc = pos.loc().expect("field should carry a position");
    assert_eq!((loc.line, loc.column), (1, 8));

    // programmatically built nodes have no position info
    use csvql::ast::expressions::PrimitiveType;
    let synthetic = Expression::Primitive(PrimitiveType::from_primary(Primary::Integer(1)));
    assert!(synthetic.pos().loc().is_none());
    assert_eq!(synthetic.pos().to_string(), "no position info");
}
