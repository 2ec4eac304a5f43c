use super::*;
use crate::constraint::{ConstraintMap, ValueConstraint};
use crate::error::ConstraintError;

fn constraints_with_value(name: &str) -> ConstraintMap {
    let mut c = ConstraintMap::new();
    c.parameter_values = vec![ValueConstraint::new(name, 10.0, 15.0)];
    c
}

#[test]
fn zero_value_constraints_compile_declarative() {
    let ctx = QueryContext::new(ConstraintMap::new()).unwrap();

    let compiled = ctx.compile_measured();
    assert!(matches!(compiled, CompiledQuery::Declarative(_)));
    assert!(compiled.value_constraints().is_empty());
}

#[test]
fn value_constraints_compile_self_join() {
    let ctx = QueryContext::new(constraints_with_value("temperature")).unwrap();

    let compiled = ctx.compile_measured();
    let CompiledQuery::SelfJoin(plan) = compiled else {
        panic!("expected self-join plan");
    };
    assert_eq!(plan.constraints.len(), 1);
    assert_eq!(plan.constraints[0].parameter_name, "temperature");
}

#[test]
fn construction_rejects_invalid_literal_before_compilation() {
    let err = QueryContext::new(constraints_with_value("temp'erature")).unwrap_err();

    assert!(matches!(err, ConstraintError::InvalidLiteral { .. }));
}

#[test]
fn constraint_order_is_preserved_in_plan() {
    let mut c = ConstraintMap::new();
    c.parameter_values = vec![
        ValueConstraint::new("salinity", 33.0, 34.0),
        ValueConstraint::new("temperature", 10.0, 15.0),
    ];
    let ctx = QueryContext::new(c).unwrap();

    let CompiledQuery::SelfJoin(plan) = ctx.compile_measured() else {
        panic!("expected self-join plan");
    };
    assert_eq!(plan.constraints[0].parameter_name, "salinity");
    assert_eq!(plan.constraints[1].parameter_name, "temperature");
}

#[test]
fn specs_are_refilterable() {
    use crate::constraint::Predicate;

    let ctx = QueryContext::new(ConstraintMap::new()).unwrap();
    let spec = ctx.activities().filter(Predicate::eq("name", "survey_1"));

    assert!(!spec.predicate().is_noop());
}

#[test]
fn contexts_are_value_equal_for_equal_constraints() {
    let a = QueryContext::new(constraints_with_value("temperature")).unwrap();
    let b = QueryContext::new(constraints_with_value("temperature")).unwrap();

    assert_eq!(a, b);
    assert_eq!(a.compile_measured(), b.compile_measured());
}
