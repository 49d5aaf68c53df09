//! Query definition structures
//!
//! A definition is plain data: base table, inner-join path, filters,
//! projection or grouping, aggregates, sort, limit. The executor
//! interprets it; nothing here touches a dataset.

use std::fmt;

use serde_json::Value;

use crate::dataset::TableName;

/// A column of one source table
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    pub table: TableName,
    pub column: String,
}

impl ColumnRef {
    pub fn new(table: TableName, column: impl Into<String>) -> Self {
        Self {
            table,
            column: column.into(),
        }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}

/// Filter operation types
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOp {
    /// Equality: column = value
    Eq(Value),
    /// Greater than or equal: column >= value
    Gte(Value),
    /// Greater than: column > value
    Gt(Value),
    /// Less than or equal: column <= value
    Lte(Value),
    /// Less than: column < value
    Lt(Value),
}

/// A single predicate (column + operation)
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: ColumnRef,
    pub op: FilterOp,
}

impl Predicate {
    /// Create an equality predicate
    pub fn eq(column: ColumnRef, value: Value) -> Self {
        Self {
            column,
            op: FilterOp::Eq(value),
        }
    }
}

/// Inner join of `table` on `left = table.right_column`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    pub table: TableName,
    pub left: ColumnRef,
    pub right_column: String,
}

impl Join {
    pub fn on(table: TableName, left: ColumnRef, right_column: impl Into<String>) -> Self {
        Self {
            table,
            left,
            right_column: right_column.into(),
        }
    }
}

/// A source column emitted under an output name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputColumn {
    pub source: ColumnRef,
    pub alias: String,
}

impl OutputColumn {
    pub fn new(source: ColumnRef, alias: impl Into<String>) -> Self {
        Self {
            source,
            alias: alias.into(),
        }
    }

    /// Output under the source column's own name
    pub fn named(source: ColumnRef) -> Self {
        let alias = source.column.clone();
        Self { source, alias }
    }
}

/// Aggregate functions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateFunction {
    /// Rows in the group
    Count,
    /// Non-null values of a column in the group
    CountOf(ColumnRef),
    /// Sum of a numeric column; null when every value is null
    Sum(ColumnRef),
    /// Mean of a numeric column, rounded to 2 decimal places
    Avg(ColumnRef),
    /// 100 × group rows / all rows, rounded to 2 decimal places
    Percentage,
}

impl AggregateFunction {
    pub fn name(&self) -> &'static str {
        match self {
            AggregateFunction::Count => "count",
            AggregateFunction::CountOf(_) => "count_of",
            AggregateFunction::Sum(_) => "sum",
            AggregateFunction::Avg(_) => "avg",
            AggregateFunction::Percentage => "percentage",
        }
    }

    /// The column this aggregate reads, if any
    pub fn column(&self) -> Option<&ColumnRef> {
        match self {
            AggregateFunction::CountOf(c)
            | AggregateFunction::Sum(c)
            | AggregateFunction::Avg(c) => Some(c),
            AggregateFunction::Count | AggregateFunction::Percentage => None,
        }
    }
}

/// One aggregate output column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateSpec {
    pub function: AggregateFunction,
    pub alias: String,
}

/// What a definition emits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// One output row per input row
    Projection(Vec<OutputColumn>),
    /// One output row per distinct group key
    Aggregate {
        group_by: Vec<OutputColumn>,
        aggregates: Vec<AggregateSpec>,
    },
}

impl Selection {
    /// Output column names, in order
    pub fn output_names(&self) -> Vec<&str> {
        match self {
            Selection::Projection(columns) => columns.iter().map(|c| c.alias.as_str()).collect(),
            Selection::Aggregate {
                group_by,
                aggregates,
            } => group_by
                .iter()
                .map(|c| c.alias.as_str())
                .chain(aggregates.iter().map(|a| a.alias.as_str()))
                .collect(),
        }
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self, Selection::Aggregate { .. })
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Sort on an output column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// Output alias to sort by
    pub alias: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// A complete, parameterless query
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDefinition {
    /// Base table
    pub from: TableName,
    /// Inner joins, applied in order
    pub joins: Vec<Join>,
    /// Filter predicates (all combined with AND)
    pub predicates: Vec<Predicate>,
    /// Output shape
    pub select: Selection,
    /// Optional sort; ties fall back to group keys ascending
    pub sort: Option<SortSpec>,
    /// Optional row limit
    pub limit: Option<usize>,
}

impl QueryDefinition {
    /// Starts a definition over `table` with an empty projection
    pub fn scan(table: TableName) -> Self {
        Self {
            from: table,
            joins: Vec::new(),
            predicates: Vec::new(),
            select: Selection::Projection(Vec::new()),
            sort: None,
            limit: None,
        }
    }

    /// Adds an inner join
    pub fn join(
        mut self,
        table: TableName,
        left: ColumnRef,
        right_column: impl Into<String>,
    ) -> Self {
        self.joins.push(Join::on(table, left, right_column));
        self
    }

    /// Adds a predicate
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Replaces the selection with a projection
    pub fn project(mut self, columns: Vec<OutputColumn>) -> Self {
        self.select = Selection::Projection(columns);
        self
    }

    /// Adds a group key, switching to an aggregate selection
    pub fn group_by(mut self, column: OutputColumn) -> Self {
        match &mut self.select {
            Selection::Aggregate { group_by, .. } => group_by.push(column),
            Selection::Projection(_) => {
                self.select = Selection::Aggregate {
                    group_by: vec![column],
                    aggregates: Vec::new(),
                }
            }
        }
        self
    }

    /// Adds an aggregate output, switching to an aggregate selection
    pub fn aggregate(mut self, function: AggregateFunction, alias: impl Into<String>) -> Self {
        let spec = AggregateSpec {
            function,
            alias: alias.into(),
        };
        match &mut self.select {
            Selection::Aggregate { aggregates, .. } => aggregates.push(spec),
            Selection::Projection(_) => {
                self.select = Selection::Aggregate {
                    group_by: Vec::new(),
                    aggregates: vec![spec],
                }
            }
        }
        self
    }

    /// Sets the sort specification
    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Sets the limit
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Tables reachable by column references: base first, then joins
    pub fn tables_in_scope(&self) -> Vec<TableName> {
        std::iter::once(self.from)
            .chain(self.joins.iter().map(|j| j.table))
            .collect()
    }
}
