use lamb::ast::Expr;
use lamb::types::{Infer, Scheme, Substitution, Type, TypeError, TypeVar, initial_env, unify};

fn infer_scheme(expr: &Expr<()>) -> Result<Scheme, Vec<TypeError>> {
    Infer::new().infer_expr(expr)
}

#[test]
fn test_literals_have_base_types() {
    assert_eq!(
        infer_scheme(&Expr::int(42)).unwrap(),
        Scheme::monomorphic(Type::Int)
    );
    assert_eq!(
        infer_scheme(&Expr::bool(false)).unwrap(),
        Scheme::monomorphic(Type::Bool)
    );
}

#[test]
fn test_identity_lambda_generalizes() {
    let scheme = infer_scheme(&Expr::lambda("x", Expr::ident("x"))).unwrap();
    assert_eq!(scheme.vars.len(), 1);
    let var = Type::Var(scheme.vars[0].clone());
    assert_eq!(scheme.ty, Type::fun(var.clone(), var));
}

#[test]
fn test_identity_identity_stays_polymorphic() {
    let expr = Expr::app(Expr::ident("identity"), Expr::ident("identity"));
    let scheme = infer_scheme(&expr).unwrap();
    assert_eq!(scheme.vars.len(), 1);
    let var = Type::Var(scheme.vars[0].clone());
    assert_eq!(scheme.ty, Type::fun(var.clone(), var));
}

#[test]
fn test_identity_applied_to_int() {
    let expr = Expr::app(Expr::ident("identity"), Expr::int(3));
    assert_eq!(
        infer_scheme(&expr).unwrap(),
        Scheme::monomorphic(Type::Int)
    );
}

#[test]
fn test_add_partially_applied() {
    let expr = Expr::app(Expr::ident("add"), Expr::int(1));
    assert_eq!(
        infer_scheme(&expr).unwrap(),
        Scheme::monomorphic(Type::fun(Type::Int, Type::Int))
    );
}

#[test]
fn test_add_int_bool_reports_unification_error() {
    let expr = Expr::app(
        Expr::app(Expr::ident("add"), Expr::int(1)),
        Expr::bool(true),
    );
    let errors = infer_scheme(&expr).unwrap_err();
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        TypeError::Unification { t1, t2, .. } => {
            assert_eq!(*t1, Type::Int);
            assert_eq!(*t2, Type::Bool);
        }
        other => panic!("expected unification error, got: {}", other),
    }
}

#[test]
fn test_unbound_variable_reports_unknown_var() {
    let errors = infer_scheme(&Expr::ident("y")).unwrap_err();
    assert_eq!(
        errors,
        vec![TypeError::unknown_var(
            "y".to_string(),
            lamb::ast::Span::default()
        )]
    );
}

#[test]
fn test_several_errors_surface_together() {
    // add nope (1 true): an unknown variable and an ill-typed application
    let expr = Expr::app(
        Expr::app(Expr::ident("add"), Expr::ident("nope")),
        Expr::app(Expr::int(1), Expr::bool(true)),
    );
    let errors = infer_scheme(&expr).unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(matches!(errors[0], TypeError::UnknownVar { .. }));
    assert!(matches!(errors[1], TypeError::Unification { .. }));
}

#[test]
fn test_error_does_not_cascade_through_parents() {
    // the unknown variable is reported once even though it sits under two
    // applications and a lambda
    let expr = Expr::lambda(
        "x",
        Expr::app(
            Expr::app(Expr::ident("add"), Expr::ident("nope")),
            Expr::ident("x"),
        ),
    );
    let errors = infer_scheme(&expr).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], TypeError::UnknownVar { .. }));
}

#[test]
fn test_self_application_is_an_occurs_check_failure() {
    let expr = Expr::lambda("x", Expr::app(Expr::ident("x"), Expr::ident("x")));
    let errors = infer_scheme(&expr).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], TypeError::OccursCheck { .. }));
}

#[test]
fn test_occurs_check_unit() {
    let a = TypeVar::new(0);
    let result = unify(
        &Type::Var(a.clone()),
        &Type::fun(Type::Var(a), Type::Int),
    );
    assert!(matches!(
        result,
        Err(lamb::types::UnifyError::OccursCheck { .. })
    ));
}

#[test]
fn test_unification_soundness_property() {
    let t1 = Type::fun(Type::Var(TypeVar::new(0)), Type::Var(TypeVar::new(1)));
    let t2 = Type::fun(Type::fun(Type::Int, Type::Bool), Type::Var(TypeVar::new(2)));
    let s = unify(&t1, &t2).unwrap();
    assert_eq!(s.apply(&t1), s.apply(&t2));
}

#[test]
fn test_compose_apply_compatibility_property() {
    let s1 = Substitution::singleton(TypeVar::new(0), Type::Var(TypeVar::new(1)));
    let s2 = Substitution::singleton(TypeVar::new(1), Type::fun(Type::Int, Type::Int));
    let samples = [
        Type::Int,
        Type::Var(TypeVar::new(0)),
        Type::Var(TypeVar::new(1)),
        Type::fun(Type::Var(TypeVar::new(0)), Type::Var(TypeVar::new(1))),
    ];
    for ty in &samples {
        assert_eq!(s2.compose(&s1).apply(ty), s2.apply(&s1.apply(ty)));
    }
}

#[test]
fn test_generalize_instantiate_round_trip() {
    let mut infer = Infer::new();
    let scheme = infer
        .infer_expr(&Expr::lambda("x", Expr::ident("x")))
        .unwrap();
    let instance = infer.instantiate(&scheme);

    let s = unify(&instance, &scheme.ty).unwrap();
    assert!(s.0.values().all(|ty| matches!(ty, Type::Var(_))));
}

#[test]
fn test_ascribed_literal() {
    let expr = Expr::ascribe(Expr::int(5), Type::Int);
    assert_eq!(
        infer_scheme(&expr).unwrap(),
        Scheme::monomorphic(Type::Int)
    );

    let expr = Expr::ascribe(Expr::int(5), Type::Bool);
    let errors = infer_scheme(&expr).unwrap_err();
    assert!(matches!(errors[0], TypeError::Unification { .. }));
}

#[test]
fn test_ascription_constrains_polymorphic_expr() {
    // (identity : Int -> Int) narrows the instantiated variable
    let expr = Expr::ascribe(Expr::ident("identity"), Type::fun(Type::Int, Type::Int));
    assert_eq!(
        infer_scheme(&expr).unwrap(),
        Scheme::monomorphic(Type::fun(Type::Int, Type::Int))
    );
}

#[test]
fn test_open_ascription_is_recoverable() {
    let expr = Expr::ascribe(Expr::int(5), Type::Var(TypeVar::with_name(0, "a")));
    let errors = infer_scheme(&expr).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], TypeError::OpenAscription { .. }));
}

#[test]
fn test_initial_env_bindings() {
    let env = initial_env();
    assert_eq!(
        env.lookup("add").unwrap().ty,
        Type::fun(Type::Int, Type::fun(Type::Int, Type::Int))
    );
    let identity = env.lookup("identity").unwrap();
    assert_eq!(identity.vars.len(), 1);
}

#[test]
fn test_independent_runs_do_not_interfere() {
    let mut first = Infer::new();
    let mut second = Infer::new();

    let _ = first.infer_expr(&Expr::ident("nope"));
    let scheme = second
        .infer_expr(&Expr::lambda("x", Expr::ident("x")))
        .unwrap();
    assert_eq!(scheme.vars.len(), 1);
}

#[test]
fn test_scheme_display_round() {
    let scheme = infer_scheme(&Expr::lambda("x", Expr::ident("x"))).unwrap();
    let shown = scheme.to_string();
    assert!(shown.starts_with("forall "));
    assert!(shown.contains(" -> "));
}
