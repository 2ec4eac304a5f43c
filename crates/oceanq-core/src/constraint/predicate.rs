use chrono::{DateTime, Utc};

///
/// Predicate AST
///
/// Pure representation of entity-level filters. No schema access, no
/// execution semantics: evaluation happens against a field resolver
/// supplied by the dataset, lowering to SQL happens in `sql`.
///

///
/// Value
///

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Text(String),
    Float(f64),
    Time(DateTime<Utc>),
    /// Multi-valued field resolution (e.g. all parameter names measured by
    /// an activity). A list matches when any element matches.
    List(Vec<Value>),
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Self::Time(t)
    }
}

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompareOp {
    Eq,
    Lt,
    Lte,
    Gt,
    Gte,
}

///
/// ComparePredicate
///

#[derive(Clone, Debug, PartialEq)]
pub struct ComparePredicate {
    pub field: &'static str,
    pub op: CompareOp,
    pub value: Value,
}

///
/// Predicate
///

#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    /// Matches everything; the no-op produced by absent constraints.
    True,
    And(Vec<Self>),
    Or(Vec<Self>),
    Compare(ComparePredicate),
    In {
        field: &'static str,
        values: Vec<String>,
    },
}

impl Predicate {
    #[must_use]
    pub fn eq(field: &'static str, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Eq, value)
    }

    #[must_use]
    pub fn lt(field: &'static str, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Lt, value)
    }

    #[must_use]
    pub fn lte(field: &'static str, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Lte, value)
    }

    #[must_use]
    pub fn gt(field: &'static str, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Gt, value)
    }

    #[must_use]
    pub fn gte(field: &'static str, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Gte, value)
    }

    #[must_use]
    pub fn in_(field: &'static str, values: Vec<String>) -> Self {
        Self::In { field, values }
    }

    fn compare(field: &'static str, op: CompareOp, value: impl Into<Value>) -> Self {
        Self::Compare(ComparePredicate {
            field,
            op,
            value: value.into(),
        })
    }

    /// AND a list of predicates, dropping no-ops. Empty input is the no-op.
    #[must_use]
    pub fn and_all(preds: Vec<Self>) -> Self {
        let mut kept: Vec<Self> = preds.into_iter().filter(|p| *p != Self::True).collect();

        match kept.len() {
            0 => Self::True,
            1 => kept.remove(0),
            _ => Self::And(kept),
        }
    }

    /// True when this predicate matches everything.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::True)
    }

    /// Evaluate against a field resolver.
    ///
    /// An unresolvable field matches nothing: an unknown name yields an
    /// empty result set, never an error.
    pub fn matches<F>(&self, resolve: &F) -> bool
    where
        F: Fn(&str) -> Option<Value>,
    {
        match self {
            Self::True => true,
            Self::And(preds) => preds.iter().all(|p| p.matches(resolve)),
            Self::Or(preds) => preds.iter().any(|p| p.matches(resolve)),
            Self::Compare(cmp) => match resolve(cmp.field) {
                Some(actual) => compare_value(&actual, cmp.op, &cmp.value),
                None => false,
            },
            Self::In { field, values } => match resolve(field) {
                Some(actual) => in_value(&actual, values),
                None => false,
            },
        }
    }
}

/// Compare a resolved field value against a literal. A `List` on the field
/// side matches when any element matches. Type mismatches match nothing.
fn compare_value(actual: &Value, op: CompareOp, literal: &Value) -> bool {
    match (actual, literal) {
        (Value::List(items), _) => items.iter().any(|item| compare_value(item, op, literal)),
        (Value::Float(a), Value::Float(b)) => compare_ord(a.partial_cmp(b), op),
        (Value::Time(a), Value::Time(b)) => compare_ord(a.partial_cmp(b), op),
        (Value::Text(a), Value::Text(b)) => compare_ord(a.partial_cmp(b), op),
        _ => false,
    }
}

fn compare_ord(ord: Option<std::cmp::Ordering>, op: CompareOp) -> bool {
    use std::cmp::Ordering::{Equal, Greater, Less};

    match (ord, op) {
        (Some(Equal), CompareOp::Eq | CompareOp::Lte | CompareOp::Gte)
        | (Some(Less), CompareOp::Lt | CompareOp::Lte)
        | (Some(Greater), CompareOp::Gt | CompareOp::Gte) => true,
        _ => false,
    }
}

fn in_value(actual: &Value, values: &[String]) -> bool {
    match actual {
        Value::Text(t) => values.iter().any(|v| v == t),
        Value::List(items) => items.iter().any(|item| in_value(item, values)),
        _ => false,
    }
}
