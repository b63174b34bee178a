//! Traits records implement to be queried.

use crate::value::Value;

/// Trait for types that can be queried using Seeker.
///
/// ```
/// use vitrine_seeker::{Query, Seekable, Value, Number};
///
/// struct Member {
///     name: String,
///     karma: u8,
/// }
///
/// impl Seekable for Member {
///     fn seeker_field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "name" => Value::String(&self.name),
///             "karma" => Value::Number(Number::from(self.karma)),
///             _ => Value::None,
///         }
///     }
/// }
///
/// let members = vec![
///     Member { name: "Ada".into(), karma: 3 },
///     Member { name: "Linus".into(), karma: 9 },
/// ];
/// let query = Query::new().and_gte("karma", 5i64);
/// assert_eq!(query.filter(&members, Member::accessor).len(), 1);
/// ```
pub trait Seekable {
    /// Returns the value of a field for query comparison, or [`Value::None`]
    /// if the field doesn't exist or is absent on this record.
    fn seeker_field_value(&self, field: &str) -> Value<'_>;

    /// Returns a function pointer compatible with the query execution methods.
    fn accessor<'a>(item: &'a Self, field: &str) -> Value<'a>
    where
        Self: Sized,
    {
        item.seeker_field_value(field)
    }
}

/// Maps enum variants to stable discriminants for `Enum` / `In` clauses.
///
/// Use explicit values rather than declaration order so stored queries keep
/// their meaning when variants are added.
pub trait SeekerEnum {
    fn seeker_discriminant(&self) -> u32;
}
