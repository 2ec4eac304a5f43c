//! Lowering from compiled queries to the SQL AST.
//!
//! The join-graph builder here replaces the source pattern of regex
//! rewriting rendered query text: joins and WHERE fragments are
//! constructed structurally, then rendered once.

use crate::{
    constraint::{CompareOp, Predicate, Value, vocabulary},
    error::SqlError,
    query::CompiledQuery,
    sql::ast::{ColumnRef, Condition, Join, SelectItem, SqlLiteral, SqlOp, SqlSelect, TableRef},
};

///
/// Table names
///

pub(crate) const MEASUREDPARAMETER: &str = "measuredparameter";
pub(crate) const MEASUREMENT: &str = "measurement";
pub(crate) const INSTANTPOINT: &str = "instantpoint";
pub(crate) const PARAMETER: &str = "parameter";
pub(crate) const ACTIVITY: &str = "activity";
pub(crate) const ACTIVITYPARAMETER: &str = "activityparameter";
pub(crate) const PLATFORM: &str = "platform";
pub(crate) const SAMPLE: &str = "sample";

///
/// SelectList
///
/// Caller-chosen ordered output expressions. REST responses need about
/// everything; section plots need just time, depth, and value.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SelectList {
    Rest,
    Plot,
}

impl SelectList {
    fn items(self) -> Vec<SelectItem> {
        // measuredparameter.id always leads: raw-row consumers key on it.
        let mut items = vec![SelectItem::column(MEASUREDPARAMETER, "id")];

        match self {
            Self::Rest => {
                items.push(SelectItem::column(PARAMETER, "name").aliased("parameter_name"));
                items.push(
                    SelectItem::column(PARAMETER, "standard_name")
                        .aliased("parameter_standard_name"),
                );
                items.push(SelectItem::column(MEASUREMENT, "depth").aliased("depth"));
                items.push(SelectItem::as_text(MEASUREMENT, "geom").aliased("geom"));
                items.push(SelectItem::column(INSTANTPOINT, "timevalue").aliased("timevalue"));
                items.push(SelectItem::column(PLATFORM, "name").aliased("platform_name"));
                items.push(SelectItem::column(MEASUREDPARAMETER, "datavalue").aliased("datavalue"));
                items.push(SelectItem::column(PARAMETER, "units").aliased("units"));
            }
            Self::Plot => {
                items.push(SelectItem::column(INSTANTPOINT, "timevalue").aliased("timevalue"));
                items.push(SelectItem::column(MEASUREMENT, "depth").aliased("depth"));
                items.push(SelectItem::column(MEASUREDPARAMETER, "datavalue").aliased("datavalue"));
            }
        }

        items
    }
}

/// Lower a compiled measurement-level query to a `SqlSelect`.
///
/// For each value constraint `i` (1-based, input order) the builder adds a
/// `parameter p_i` copy to the FROM list, an INNER JOIN of
/// `measuredparameter mp_i` bound to the base table by shared measurement
/// identity, and four WHERE fragments, prepended ahead of the base
/// predicate's fragments.
pub fn lower(compiled: &CompiledQuery, select: SelectList) -> Result<SqlSelect, SqlError> {
    let mut from = Vec::new();
    let mut joins = Vec::new();
    let mut conditions = Vec::new();

    for (n, vc) in compiled.value_constraints().iter().enumerate() {
        let i = n + 1;
        let p_alias = format!("p_{i}");
        let mp_alias = format!("mp_{i}");

        from.push(TableRef::aliased(PARAMETER, p_alias.clone()));
        joins.push(Join {
            table: TableRef::aliased(MEASUREDPARAMETER, mp_alias.clone()),
            left: ColumnRef::new(mp_alias.clone(), "measurement_id"),
            right: ColumnRef::new(MEASUREDPARAMETER, "measurement_id"),
        });

        conditions.push(Condition::Literal {
            column: ColumnRef::new(p_alias.clone(), "name"),
            op: SqlOp::Eq,
            value: SqlLiteral::Text(vc.parameter_name.clone()),
        });
        conditions.push(Condition::Literal {
            column: ColumnRef::new(mp_alias.clone(), "datavalue"),
            op: SqlOp::Gt,
            value: SqlLiteral::Number(vc.lo),
        });
        conditions.push(Condition::Literal {
            column: ColumnRef::new(mp_alias.clone(), "datavalue"),
            op: SqlOp::Lt,
            value: SqlLiteral::Number(vc.hi),
        });
        conditions.push(Condition::Columns {
            left: ColumnRef::new(mp_alias, "parameter_id"),
            right: ColumnRef::new(p_alias, "id"),
        });
    }

    from.push(TableRef::plain(MEASUREDPARAMETER));
    joins.extend(base_joins());
    lower_predicate(compiled.base_predicate(), measured_column, &mut conditions)?;

    Ok(SqlSelect {
        select: select.items(),
        from,
        joins,
        conditions,
    })
}

/// The canonical measurement join chain.
fn base_joins() -> Vec<Join> {
    vec![
        Join {
            table: TableRef::plain(MEASUREMENT),
            left: ColumnRef::new(MEASUREDPARAMETER, "measurement_id"),
            right: ColumnRef::new(MEASUREMENT, "id"),
        },
        Join {
            table: TableRef::plain(INSTANTPOINT),
            left: ColumnRef::new(MEASUREMENT, "instantpoint_id"),
            right: ColumnRef::new(INSTANTPOINT, "id"),
        },
        Join {
            table: TableRef::plain(PARAMETER),
            left: ColumnRef::new(MEASUREDPARAMETER, "parameter_id"),
            right: ColumnRef::new(PARAMETER, "id"),
        },
        Join {
            table: TableRef::plain(ACTIVITY),
            left: ColumnRef::new(INSTANTPOINT, "activity_id"),
            right: ColumnRef::new(ACTIVITY, "id"),
        },
        Join {
            table: TableRef::plain(PLATFORM),
            left: ColumnRef::new(ACTIVITY, "platform_id"),
            right: ColumnRef::new(PLATFORM, "id"),
        },
    ]
}

/// Map a measurement-target field path onto its column.
pub(crate) fn measured_column(field: &str) -> Result<ColumnRef, SqlError> {
    let column = match field {
        vocabulary::PARAMETER_NAME => ColumnRef::new(PARAMETER, "name"),
        vocabulary::PARAMETER_STANDARD_NAME => ColumnRef::new(PARAMETER, "standard_name"),
        vocabulary::PLATFORM_NAME => ColumnRef::new(PLATFORM, "name"),
        vocabulary::TIMEVALUE => ColumnRef::new(INSTANTPOINT, "timevalue"),
        vocabulary::DEPTH => ColumnRef::new(MEASUREMENT, "depth"),
        _ => {
            return Err(SqlError::UnknownField {
                field: field.to_string(),
            });
        }
    };

    Ok(column)
}

/// Map an activity-target field path onto its column.
pub(crate) fn activity_column(field: &str) -> Result<ColumnRef, SqlError> {
    let column = match field {
        vocabulary::PLATFORM_NAME => ColumnRef::new(PLATFORM, "name"),
        vocabulary::PARAMETER_NAME => ColumnRef::new(PARAMETER, "name"),
        vocabulary::PARAMETER_STANDARD_NAME => ColumnRef::new(PARAMETER, "standard_name"),
        vocabulary::STARTDATE => ColumnRef::new(ACTIVITY, "startdate"),
        vocabulary::ENDDATE => ColumnRef::new(ACTIVITY, "enddate"),
        vocabulary::MINDEPTH => ColumnRef::new(ACTIVITY, "mindepth"),
        vocabulary::MAXDEPTH => ColumnRef::new(ACTIVITY, "maxdepth"),
        _ => {
            return Err(SqlError::UnknownField {
                field: field.to_string(),
            });
        }
    };

    Ok(column)
}

/// Map a sample-target field path onto its column.
pub(crate) fn sample_column(field: &str) -> Result<ColumnRef, SqlError> {
    let column = match field {
        vocabulary::PLATFORM_NAME => ColumnRef::new(PLATFORM, "name"),
        vocabulary::TIMEVALUE => ColumnRef::new(INSTANTPOINT, "timevalue"),
        vocabulary::DEPTH => ColumnRef::new(SAMPLE, "depth"),
        _ => {
            return Err(SqlError::UnknownField {
                field: field.to_string(),
            });
        }
    };

    Ok(column)
}

/// Flatten a constraint-built predicate into AND-ed conditions.
///
/// Constraint vocabularies only produce `True`/`And`/`Compare`/`In`; any
/// other shape is a lowering invariant failure, not client error.
pub(crate) fn lower_predicate(
    predicate: &Predicate,
    column_for: fn(&str) -> Result<ColumnRef, SqlError>,
    out: &mut Vec<Condition>,
) -> Result<(), SqlError> {
    match predicate {
        Predicate::True => {}
        Predicate::And(preds) => {
            for p in preds {
                lower_predicate(p, column_for, out)?;
            }
        }
        Predicate::Compare(cmp) => {
            out.push(Condition::Literal {
                column: column_for(cmp.field)?,
                op: lower_op(cmp.op),
                value: lower_value(&cmp.value)?,
            });
        }
        Predicate::In { field, values } => {
            out.push(Condition::Literal {
                column: column_for(field)?,
                op: SqlOp::In,
                value: SqlLiteral::TextList(values.clone()),
            });
        }
        Predicate::Or(_) => {
            return Err(SqlError::UnsupportedPredicate {
                detail: "disjunction outside an IN list".to_string(),
            });
        }
    }

    Ok(())
}

const fn lower_op(op: CompareOp) -> SqlOp {
    match op {
        CompareOp::Eq => SqlOp::Eq,
        CompareOp::Lt => SqlOp::Lt,
        CompareOp::Lte => SqlOp::Lte,
        CompareOp::Gt => SqlOp::Gt,
        CompareOp::Gte => SqlOp::Gte,
    }
}

fn lower_value(value: &Value) -> Result<SqlLiteral, SqlError> {
    match value {
        Value::Text(t) => Ok(SqlLiteral::Text(t.clone())),
        Value::Float(f) => Ok(SqlLiteral::Number(*f)),
        Value::Time(t) => Ok(SqlLiteral::Time(*t)),
        Value::List(_) => Err(SqlError::UnsupportedPredicate {
            detail: "list literal outside an IN list".to_string(),
        }),
    }
}
