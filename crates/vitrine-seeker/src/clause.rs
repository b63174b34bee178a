//! Clause types for query predicates.
//!
//! A [`Clause`] is a single filter predicate: a field name, an operator,
//! and a comparison value.

use crate::op::Op;
use crate::value::{Number, Timestamp, Value};

/// A single filter predicate.
///
/// ```
/// use vitrine_seeker::{Clause, Op, Value};
///
/// let clause = Clause::new("title", Op::IContains, "rust");
/// assert!(clause.matches(&Value::String("Intro to Rust")));
/// ```
#[derive(Debug, Clone)]
pub struct Clause {
    pub field: String,
    pub op: Op,
    pub value: ClauseValue,
}

impl Clause {
    pub fn new(field: impl Into<String>, op: Op, value: impl Into<ClauseValue>) -> Self {
        Clause {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    /// Evaluates this clause against a field value.
    ///
    /// Missing fields and type mismatches never match, whatever the operator.
    pub fn matches(&self, field_value: &Value<'_>) -> bool {
        match (&self.value, field_value) {
            (ClauseValue::String(pattern), Value::String(s)) => self.match_string(s, pattern),
            (ClauseValue::String(pattern), Value::List(items)) => {
                self.match_list(items, pattern)
            }

            (ClauseValue::StringSet(set), Value::String(s)) => {
                self.op == Op::In && set.iter().any(|candidate| candidate == s)
            }
            (ClauseValue::StringSet(set), Value::List(items)) => {
                self.op == Op::In && items.iter().any(|item| set.contains(item))
            }

            (ClauseValue::Number(clause_num), Value::Number(field_num)) => field_num
                .compare(*clause_num)
                .is_some_and(|ordering| self.op.eval_ordering(ordering)),

            (ClauseValue::Timestamp(clause_ts), Value::Timestamp(field_ts)) => {
                self.op.eval_ordering(field_ts.cmp(clause_ts))
            }

            (ClauseValue::Enum(clause_disc), Value::Enum(field_disc)) => {
                self.match_equality(field_disc == clause_disc)
            }
            (ClauseValue::EnumSet(set), Value::Enum(field_disc)) => {
                self.op == Op::In && set.contains(field_disc)
            }

            (ClauseValue::Bool(clause_bool), Value::Bool(field_bool)) => {
                self.match_equality(field_bool == clause_bool)
            }

            _ => false,
        }
    }

    fn match_string(&self, field: &str, pattern: &str) -> bool {
        match self.op.normalize() {
            Op::Eq => field == pattern,
            Op::Ne => field != pattern,
            Op::StartsWith => field.starts_with(pattern),
            Op::EndsWith => field.ends_with(pattern),
            Op::Contains => field.contains(pattern),
            Op::IContains => field.to_lowercase().contains(&pattern.to_lowercase()),
            _ => false,
        }
    }

    // Ne over a list means "no element equals"; every other operator
    // matches when some element matches.
    fn match_list(&self, items: &[String], pattern: &str) -> bool {
        match self.op.normalize() {
            Op::Ne => items.iter().all(|item| item != pattern),
            _ => items.iter().any(|item| self.match_string(item, pattern)),
        }
    }

    fn match_equality(&self, equal: bool) -> bool {
        match self.op.normalize() {
            Op::Eq => equal,
            Op::Ne => !equal,
            _ => false,
        }
    }
}

/// Owned value for storage in a clause.
///
/// Unlike [`Value`], which borrows from the record, `ClauseValue` owns its
/// data so it can live in a query definition.
#[derive(Debug, Clone)]
pub enum ClauseValue {
    String(String),
    Number(Number),
    Timestamp(Timestamp),
    Enum(u32),
    /// Set of enum discriminants (for `In`).
    EnumSet(Vec<u32>),
    /// Set of strings (for `In` over strings and lists).
    StringSet(Vec<String>),
    Bool(bool),
}

impl From<String> for ClauseValue {
    fn from(s: String) -> Self {
        ClauseValue::String(s)
    }
}

impl From<&str> for ClauseValue {
    fn from(s: &str) -> Self {
        ClauseValue::String(s.to_string())
    }
}

impl From<Number> for ClauseValue {
    fn from(n: Number) -> Self {
        ClauseValue::Number(n)
    }
}

impl From<Timestamp> for ClauseValue {
    fn from(t: Timestamp) -> Self {
        ClauseValue::Timestamp(t)
    }
}

impl From<bool> for ClauseValue {
    fn from(b: bool) -> Self {
        ClauseValue::Bool(b)
    }
}

impl From<Vec<u32>> for ClauseValue {
    fn from(v: Vec<u32>) -> Self {
        ClauseValue::EnumSet(v)
    }
}

impl From<Vec<String>> for ClauseValue {
    fn from(v: Vec<String>) -> Self {
        ClauseValue::StringSet(v)
    }
}

macro_rules! clause_from_number {
    ($($source:ty),+) => {
        $(
            impl From<$source> for ClauseValue {
                fn from(n: $source) -> Self {
                    ClauseValue::Number(Number::from(n))
                }
            }
        )+
    };
}

clause_from_number!(i32, i64, u32, u64, usize, f64);
