//! Comparison operators for query clauses.

use std::cmp::Ordering;

/// Comparison operator for a query clause.
///
/// - **Universal**: `Eq`, `Ne`
/// - **String / list**: `StartsWith`, `EndsWith`, `Contains`, `IContains`
/// - **Numeric / timestamp**: `Gt`, `Gte`, `Lt`, `Lte`, plus `Before` / `After` aliases
/// - **Set membership**: `In` (enum sets and string sets)
/// - **Bool alias**: `Is`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Eq,
    Ne,

    StartsWith,
    EndsWith,
    /// Case-sensitive substring.
    Contains,
    /// Case-insensitive substring.
    IContains,

    Gt,
    Gte,
    Lt,
    Lte,

    /// Alias for `Lt` on timestamps.
    Before,
    /// Alias for `Gt` on timestamps.
    After,

    /// Value is one of the given set.
    In,

    /// Alias for `Eq` (reads naturally: `has_github.is(true)`).
    Is,
}

impl Op {
    /// Maps aliases to their canonical operator.
    pub fn normalize(self) -> Op {
        match self {
            Op::Before => Op::Lt,
            Op::After => Op::Gt,
            Op::Is => Op::Eq,
            other => other,
        }
    }

    /// Evaluates an ordering-based operator given `field.cmp(clause)`.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self.normalize() {
            Op::Eq => ordering == Ordering::Equal,
            Op::Ne => ordering != Ordering::Equal,
            Op::Gt => ordering == Ordering::Greater,
            Op::Gte => ordering != Ordering::Less,
            Op::Lt => ordering == Ordering::Less,
            Op::Lte => ordering != Ordering::Greater,
            _ => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "eq",
            Op::Ne => "ne",
            Op::StartsWith => "startswith",
            Op::EndsWith => "endswith",
            Op::Contains => "contains",
            Op::IContains => "icontains",
            Op::Gt => "gt",
            Op::Gte => "gte",
            Op::Lt => "lt",
            Op::Lte => "lte",
            Op::Before => "before",
            Op::After => "after",
            Op::In => "in",
            Op::Is => "is",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
