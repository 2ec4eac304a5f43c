//! Mapserver geometry subqueries.
//!
//! The map layer consumes a `DATA`-statement form that wraps a compact
//! SELECT aliasing a `gid` key and a `geom` column. Joins are added only
//! when the current constraints actually reference the joined table.

use crate::{
    error::SqlError,
    query::QueryContext,
    sql::{
        ast::{ColumnRef, Condition, Join, SelectItem, SqlSelect, TableRef},
        lower::{
            ACTIVITY, ACTIVITYPARAMETER, INSTANTPOINT, PARAMETER, PLATFORM, SAMPLE,
            activity_column, lower_predicate, sample_column,
        },
        render::render_compact,
    },
};

const SRID: u32 = 4326;

/// Activity-track geometry subquery for a mapfile DATA statement.
pub fn activity_geo_query(ctx: &QueryContext) -> Result<String, SqlError> {
    let mut conditions = Vec::new();
    lower_predicate(ctx.activities().predicate(), activity_column, &mut conditions)?;

    let mut joins = Vec::new();
    if references(&conditions, PLATFORM) {
        joins.push(Join {
            table: TableRef::plain(PLATFORM),
            left: ColumnRef::new(ACTIVITY, "platform_id"),
            right: ColumnRef::new(PLATFORM, "id"),
        });
    }
    if references(&conditions, PARAMETER) {
        joins.push(Join {
            table: TableRef::plain(ACTIVITYPARAMETER),
            left: ColumnRef::new(ACTIVITYPARAMETER, "activity_id"),
            right: ColumnRef::new(ACTIVITY, "id"),
        });
        joins.push(Join {
            table: TableRef::plain(PARAMETER),
            left: ColumnRef::new(ACTIVITYPARAMETER, "parameter_id"),
            right: ColumnRef::new(PARAMETER, "id"),
        });
    }

    let q = SqlSelect {
        select: vec![
            SelectItem::column(ACTIVITY, "id").aliased("gid"),
            SelectItem::column(ACTIVITY, "maptrack").aliased("geom"),
        ],
        from: vec![TableRef::plain(ACTIVITY)],
        joins,
        conditions,
    };

    Ok(wrap(&q))
}

/// Sample-location geometry subquery for a mapfile DATA statement.
pub fn sample_geo_query(ctx: &QueryContext) -> Result<String, SqlError> {
    let mut conditions = Vec::new();
    lower_predicate(ctx.samples().predicate(), sample_column, &mut conditions)?;

    let mut joins = Vec::new();
    if references(&conditions, INSTANTPOINT) || references(&conditions, PLATFORM) {
        joins.push(Join {
            table: TableRef::plain(INSTANTPOINT),
            left: ColumnRef::new(SAMPLE, "instantpoint_id"),
            right: ColumnRef::new(INSTANTPOINT, "id"),
        });
    }
    if references(&conditions, PLATFORM) {
        joins.push(Join {
            table: TableRef::plain(ACTIVITY),
            left: ColumnRef::new(INSTANTPOINT, "activity_id"),
            right: ColumnRef::new(ACTIVITY, "id"),
        });
        joins.push(Join {
            table: TableRef::plain(PLATFORM),
            left: ColumnRef::new(ACTIVITY, "platform_id"),
            right: ColumnRef::new(PLATFORM, "id"),
        });
    }

    let q = SqlSelect {
        select: vec![
            SelectItem::column(SAMPLE, "id").aliased("gid"),
            SelectItem::column(SAMPLE, "geom").aliased("geom"),
        ],
        from: vec![TableRef::plain(SAMPLE)],
        joins,
        conditions,
    };

    Ok(wrap(&q))
}

fn wrap(q: &SqlSelect) -> String {
    format!(
        "geom from ({}) as subquery using unique gid using srid={SRID}",
        render_compact(q)
    )
}

fn references(conditions: &[Condition], table: &str) -> bool {
    conditions.iter().any(|c| match c {
        Condition::Literal { column, .. } => column.table == table,
        Condition::Columns { left, right } => left.table == table || right.table == table,
    })
}
