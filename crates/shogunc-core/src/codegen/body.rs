//! Bodies of generated query methods.

use super::go::{Expr, FuncDecl, GoType, Param, StructDecl, Stmt};
use super::{Lowering, ResultShape};

/// Builds `func (q *Queries) Name(ctx, params) (T, error)` around `sql`.
pub(super) fn query_function(
    name: &str,
    sql: &str,
    lowering: &Lowering,
    params: Option<&StructDecl>,
) -> FuncDecl {
    let mut fn_params = vec![Param::new("ctx", GoType::context())];
    let mut args = vec![Expr::ident("ctx"), Expr::ident("query")];
    if let Some(record) = params {
        fn_params.push(Param::new("params", GoType::named(record.name.clone())));
        args.extend(
            record
                .fields
                .iter()
                .map(|field| Expr::ident("params").dot(field.name.clone())),
        );
    }

    let db = Expr::ident("q").dot("db");
    let mut body = vec![Stmt::define(&["query"], Expr::Str(sql.to_string()))];

    match &lowering.shape {
        ResultShape::Single(row) => {
            body.push(Stmt::Var("result".to_string(), row.clone()));
            body.push(Stmt::define(&["row"], db.dot("QueryRow").call(args)));
            body.push(Stmt::return_on_err(
                Some(Stmt::define(
                    &["err"],
                    Expr::ident("row")
                        .dot("Scan")
                        .call(scan_targets("result", &lowering.scan)),
                )),
                vec![Expr::ident("result"), Expr::ident("err")],
            ));
            body.push(Stmt::Return(vec![Expr::ident("result"), Expr::Nil]));
        }
        ResultShape::List(row) => {
            let rows = Expr::ident("rows");
            body.push(Stmt::Var("result".to_string(), row.clone().slice()));
            body.push(Stmt::define(&["rows", "err"], db.dot("Query").call(args)));
            body.push(Stmt::return_on_err(None, nil_err()));
            body.push(Stmt::Defer(rows.clone().dot("Close").call(Vec::new())));
            body.push(Stmt::For(
                rows.clone().dot("Next").call(Vec::new()),
                vec![
                    Stmt::Var("item".to_string(), row.clone()),
                    Stmt::return_on_err(
                        Some(Stmt::define(
                            &["err"],
                            rows.clone()
                                .dot("Scan")
                                .call(scan_targets("item", &lowering.scan)),
                        )),
                        nil_err(),
                    ),
                    Stmt::assign(
                        "result",
                        Expr::ident("append").call(vec![Expr::ident("result"), Expr::ident("item")]),
                    ),
                ],
            ));
            body.push(Stmt::return_on_err(
                Some(Stmt::define(&["err"], rows.dot("Err").call(Vec::new()))),
                nil_err(),
            ));
            body.push(Stmt::Return(vec![Expr::ident("result"), Expr::Nil]));
        }
        ResultShape::None => {
            body.push(Stmt::Return(vec![db.dot("Exec").call(args)]));
        }
    }

    FuncDecl {
        receiver: Some(Param::new("q", GoType::named("Queries").pointer())),
        name: name.to_string(),
        params: fn_params,
        results: lowering.shape.result_types(),
        body,
    }
}

/// `&target.Field` for each decoded column.
fn scan_targets(target: &str, fields: &[String]) -> Vec<Expr> {
    fields
        .iter()
        .map(|field| Expr::ident(target).dot(field.clone()).addr())
        .collect()
}

fn nil_err() -> Vec<Expr> {
    vec![Expr::Nil, Expr::ident("err")]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exec_lowering() -> Lowering {
        Lowering {
            shape: ResultShape::None,
            scan: Vec::new(),
            nullable_params: true,
        }
    }

    #[test]
    fn test_exec_without_params() {
        let func = query_function("Touch", "insert into pings (at) values ('now');", &exec_lowering(), None);
        assert_eq!(
            func.to_string(),
            "func (q *Queries) Touch(ctx context.Context) error {\n\
             \tquery := \"insert into pings (at) values ('now');\"\n\
             \treturn q.db.Exec(ctx, query)\n\
             }"
        );
    }

    #[test]
    fn test_params_are_passed_in_field_order() {
        use crate::codegen::go::StructField;

        let params = StructDecl {
            name: "AddParams".into(),
            fields: vec![
                StructField {
                    name: "Id".into(),
                    ty: GoType::String,
                    tag: None,
                },
                StructField {
                    name: "Email".into(),
                    ty: GoType::String.pointer(),
                    tag: None,
                },
            ],
        };
        let func = query_function("Add", "q", &exec_lowering(), Some(&params));
        let source = func.to_string();
        assert!(source.starts_with("func (q *Queries) Add(ctx context.Context, params AddParams) error {"));
        assert!(source.contains("return q.db.Exec(ctx, query, params.Id, params.Email)"));
    }
}
