//! Declarative column descriptors.
//!
//! A column is one of three kinds: a plain field lookup, a derived cell
//! computed from the whole row, or a set of row actions. Derived and action
//! columns are never displayed through the raw field value.

use std::sync::Arc;

use serde::Serialize;

/// Visual emphasis of a badge or action. The renderer picks the colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Neutral,
    Success,
    Warning,
    Danger,
    Info,
    Accent,
}

/// A button rendered inside an action column. `id` is what gets relayed back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowAction {
    pub id: String,
    pub label: String,
    pub tone: Tone,
}

impl RowAction {
    pub fn new(id: impl Into<String>, label: impl Into<String>, tone: Tone) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            tone,
        }
    }
}

/// Displayable cell content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Cell {
    Empty,
    Text { text: String },
    Badge { label: String, tone: Tone },
    Actions { actions: Vec<RowAction> },
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Cell::Text { text: text.into() }
    }

    pub fn badge(label: impl Into<String>, tone: Tone) -> Self {
        Cell::Badge {
            label: label.into(),
            tone,
        }
    }
}

impl core::fmt::Display for Cell {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text { text } => f.write_str(text),
            Cell::Badge { label, .. } => f.write_str(label),
            Cell::Actions { actions } => {
                for (i, action) in actions.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "[{}]", action.label)?;
                }
                Ok(())
            }
        }
    }
}

/// Raw field access for plain columns.
pub trait TableRow {
    /// The verbatim value of `key`, or [`Cell::Empty`] when absent.
    fn field(&self, key: &str) -> Cell;
}

impl TableRow for serde_json::Value {
    fn field(&self, key: &str) -> Cell {
        match self.get(key) {
            None | Some(serde_json::Value::Null) => Cell::Empty,
            Some(serde_json::Value::String(s)) => Cell::text(s.clone()),
            Some(other) => Cell::text(other.to_string()),
        }
    }
}

pub type CellRenderer<R> = Arc<dyn Fn(&R) -> Cell + Send + Sync>;
pub type ActionRenderer<R> = Arc<dyn Fn(&R) -> Vec<RowAction> + Send + Sync>;

pub enum ColumnKind<R> {
    /// `row[key]` verbatim.
    Plain,
    /// Mapping with the fixed signature `(row) -> Cell`.
    Derived(CellRenderer<R>),
    /// Per-row buttons.
    Action(ActionRenderer<R>),
}

impl<R> Clone for ColumnKind<R> {
    fn clone(&self) -> Self {
        match self {
            ColumnKind::Plain => ColumnKind::Plain,
            ColumnKind::Derived(f) => ColumnKind::Derived(Arc::clone(f)),
            ColumnKind::Action(f) => ColumnKind::Action(Arc::clone(f)),
        }
    }
}

impl<R> core::fmt::Debug for ColumnKind<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            ColumnKind::Plain => "Plain",
            ColumnKind::Derived(_) => "Derived",
            ColumnKind::Action(_) => "Action",
        })
    }
}

/// Static description of one table column.
pub struct Column<R> {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    pub filterable: bool,
    pub kind: ColumnKind<R>,
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            label: self.label.clone(),
            sortable: self.sortable,
            filterable: self.filterable,
            kind: self.kind.clone(),
        }
    }
}

impl<R> core::fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("kind", &self.kind)
            .finish()
    }
}

impl<R> Column<R> {
    fn with_kind(key: impl Into<String>, label: impl Into<String>, kind: ColumnKind<R>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
            filterable: false,
            kind,
        }
    }

    pub fn plain(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_kind(key, label, ColumnKind::Plain)
    }

    pub fn derived<F>(key: impl Into<String>, label: impl Into<String>, render: F) -> Self
    where
        F: Fn(&R) -> Cell + Send + Sync + 'static,
    {
        Self::with_kind(key, label, ColumnKind::Derived(Arc::new(render)))
    }

    pub fn actions<F>(key: impl Into<String>, label: impl Into<String>, actions: F) -> Self
    where
        F: Fn(&R) -> Vec<RowAction> + Send + Sync + 'static,
    {
        Self::with_kind(key, label, ColumnKind::Action(Arc::new(actions)))
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }
}

impl<R: TableRow> Column<R> {
    pub fn cell(&self, row: &R) -> Cell {
        match &self.kind {
            ColumnKind::Plain => row.field(&self.key),
            ColumnKind::Derived(render) => render(row),
            ColumnKind::Action(actions) => Cell::Actions {
                actions: actions(row),
            },
        }
    }
}
