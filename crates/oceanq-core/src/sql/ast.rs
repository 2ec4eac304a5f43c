use chrono::{DateTime, Utc};

///
/// SQL AST
///
/// Small structured form of the SELECT statements this crate emits. Built
/// by the lowering pass, rendered to text only at the very end; no query
/// text is ever pattern-matched or rewritten after rendering.
///

///
/// ColumnRef
/// `table` is a base table name or an alias such as `mp_1`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ColumnRef {
    pub table: String,
    pub column: &'static str,
}

impl ColumnRef {
    #[must_use]
    pub fn new(table: impl Into<String>, column: &'static str) -> Self {
        Self {
            table: table.into(),
            column,
        }
    }
}

///
/// SelectExpr
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SelectExpr {
    Column(ColumnRef),
    /// `ST_AsText(column)` so geometry decodes as WKT in text responses.
    AsText(ColumnRef),
}

///
/// SelectItem
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SelectItem {
    pub expr: SelectExpr,
    pub alias: Option<&'static str>,
}

impl SelectItem {
    #[must_use]
    pub fn column(table: impl Into<String>, column: &'static str) -> Self {
        Self {
            expr: SelectExpr::Column(ColumnRef::new(table, column)),
            alias: None,
        }
    }

    #[must_use]
    pub const fn aliased(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }

    #[must_use]
    pub fn as_text(table: impl Into<String>, column: &'static str) -> Self {
        Self {
            expr: SelectExpr::AsText(ColumnRef::new(table, column)),
            alias: None,
        }
    }
}

///
/// TableRef
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TableRef {
    pub table: &'static str,
    pub alias: Option<String>,
}

impl TableRef {
    #[must_use]
    pub const fn plain(table: &'static str) -> Self {
        Self { table, alias: None }
    }

    #[must_use]
    pub fn aliased(table: &'static str, alias: impl Into<String>) -> Self {
        Self {
            table,
            alias: Some(alias.into()),
        }
    }

    /// Name other clauses use to reference this table.
    #[must_use]
    pub fn reference(&self) -> &str {
        self.alias.as_deref().unwrap_or(self.table)
    }
}

///
/// Join
/// INNER JOIN `table` ON (`left` = `right`).
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Join {
    pub table: TableRef,
    pub left: ColumnRef,
    pub right: ColumnRef,
}

///
/// SqlLiteral
///

#[derive(Clone, Debug, PartialEq)]
pub enum SqlLiteral {
    Text(String),
    Number(f64),
    Time(DateTime<Utc>),
    TextList(Vec<String>),
}

///
/// SqlOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SqlOp {
    Eq,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
}

///
/// Condition
/// One AND-ed WHERE fragment.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Condition {
    Literal {
        column: ColumnRef,
        op: SqlOp,
        value: SqlLiteral,
    },
    /// Column-to-column equality (the self-join parameter link).
    Columns { left: ColumnRef, right: ColumnRef },
}

///
/// SqlSelect
///
/// `from` may hold several comma-separated tables: the self-join compiler
/// places each `p_i` parameter copy there, ahead of the base table.
///

#[derive(Clone, Debug, PartialEq)]
pub struct SqlSelect {
    pub select: Vec<SelectItem>,
    pub from: Vec<TableRef>,
    pub joins: Vec<Join>,
    pub conditions: Vec<Condition>,
}
