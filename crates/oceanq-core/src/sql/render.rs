//! Text rendering for the SQL AST.
//!
//! Keywords are uppercase, one clause element per line, statement
//! terminated with `;`. Rendering is deterministic: the same AST always
//! produces character-identical text, so compiled queries can be shown to
//! users as "what ran".

use crate::sql::ast::{Condition, SelectExpr, SqlLiteral, SqlOp, SqlSelect};
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Render with a leading database-selection directive line.
#[must_use]
pub fn render_with_directive(q: &SqlSelect, dbname: &str) -> String {
    format!("\\c {dbname}\n{}", render(q))
}

/// Multi-line formatted statement.
#[must_use]
pub fn render(q: &SqlSelect) -> String {
    let mut out = String::new();

    write_select(&mut out, q, "\n       ");
    out.push('\n');
    write_from(&mut out, q, "\n     ");
    if !q.conditions.is_empty() {
        out.push('\n');
        write_where(&mut out, q, "\n      ");
    }
    out.push_str("\n;");

    out
}

/// Single-line form for embedding as a subquery.
#[must_use]
pub fn render_compact(q: &SqlSelect) -> String {
    let mut out = String::new();

    write_select(&mut out, q, " ");
    out.push(' ');
    write_from(&mut out, q, " ");
    if !q.conditions.is_empty() {
        out.push(' ');
        write_where(&mut out, q, " ");
    }

    out
}

fn write_select(out: &mut String, q: &SqlSelect, sep: &str) {
    out.push_str("SELECT ");
    for (i, item) in q.select.iter().enumerate() {
        if i > 0 {
            out.push(',');
            out.push_str(sep);
        }
        match &item.expr {
            SelectExpr::Column(col) => {
                let _ = write!(out, "{}.{}", col.table, col.column);
            }
            SelectExpr::AsText(col) => {
                let _ = write!(out, "ST_AsText({}.{})", col.table, col.column);
            }
        }
        if let Some(alias) = item.alias {
            let _ = write!(out, " AS {alias}");
        }
    }
}

fn write_from(out: &mut String, q: &SqlSelect, sep: &str) {
    out.push_str("FROM ");
    for (i, table) in q.from.iter().enumerate() {
        if i > 0 {
            out.push(',');
            out.push_str(sep);
        }
        out.push_str(table.table);
        if let Some(alias) = &table.alias {
            let _ = write!(out, " {alias}");
        }
    }
    for join in &q.joins {
        out.push_str(sep);
        out.push_str("INNER JOIN ");
        out.push_str(join.table.table);
        if let Some(alias) = &join.table.alias {
            let _ = write!(out, " {alias}");
        }
        let _ = write!(
            out,
            " ON ({}.{} = {}.{})",
            join.left.table, join.left.column, join.right.table, join.right.column
        );
    }
}

fn write_where(out: &mut String, q: &SqlSelect, sep: &str) {
    out.push_str("WHERE ");
    for (i, condition) in q.conditions.iter().enumerate() {
        if i > 0 {
            out.push_str(" AND");
            out.push_str(sep);
        }
        match condition {
            Condition::Literal { column, op, value } => {
                let _ = write!(
                    out,
                    "({}.{} {} {})",
                    column.table,
                    column.column,
                    op_text(*op),
                    literal_text(value)
                );
            }
            Condition::Columns { left, right } => {
                let _ = write!(
                    out,
                    "({}.{} = {}.{})",
                    left.table, left.column, right.table, right.column
                );
            }
        }
    }
}

const fn op_text(op: SqlOp) -> &'static str {
    match op {
        SqlOp::Eq => "=",
        SqlOp::Lt => "<",
        SqlOp::Lte => "<=",
        SqlOp::Gt => ">",
        SqlOp::Gte => ">=",
        SqlOp::In => "IN",
    }
}

fn literal_text(value: &SqlLiteral) -> String {
    match value {
        SqlLiteral::Text(t) => quote_text(t),
        SqlLiteral::Number(n) => format!("{n:?}"),
        SqlLiteral::Time(t) => quote_time(*t),
        SqlLiteral::TextList(items) => {
            let quoted: Vec<String> = items.iter().map(|t| quote_text(t)).collect();
            format!("({})", quoted.join(", "))
        }
    }
}

/// Standard SQL quoting: embedded single quotes are doubled. Value-range
/// constraint literals never reach here with quotes; they are rejected at
/// validation instead of escaped.
fn quote_text(t: &str) -> String {
    format!("'{}'", t.replace('\'', "''"))
}

fn quote_time(t: DateTime<Utc>) -> String {
    format!("'{}'", t.format("%Y-%m-%d %H:%M:%S"))
}
