//! Domain records rendered by the site's list views.
//!
//! Records are immutable once normalized. Every closed vocabulary coming from
//! the data files (cohort, statuses, categories) is a real enum here; the
//! string form only exists at the normalization and serialization edges.

use chrono::{DateTime, Utc};
use vitrine_seeker::Timestamp;

/// Error returned when a label is not part of a closed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabel(pub String);

impl std::fmt::Display for UnknownLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown label `{}`", self.0)
    }
}

impl std::error::Error for UnknownLabel {}

pub(crate) fn ts(dt: &DateTime<Utc>) -> Timestamp {
    Timestamp::from_millis(dt.timestamp_millis())
}

pub(crate) fn opt_ts(dt: Option<&DateTime<Utc>>) -> Option<Timestamp> {
    dt.map(ts)
}

/// Declares a closed label vocabulary.
///
/// Generates `ALL`, `as_str`, `FromStr` (case-insensitive, with extra
/// aliases), `Display`, serde support through the label, and `SeekerEnum`
/// with the given discriminants.
macro_rules! labels {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident = $disc:literal => $label:literal $(| $alias:literal)*),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::records::UnknownLabel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case($label) $(|| s.eq_ignore_ascii_case($alias))* {
                        return Ok($name::$variant);
                    }
                )+
                Err($crate::records::UnknownLabel(s.to_string()))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let label = <String as serde::Deserialize>::deserialize(deserializer)?;
                label.parse().map_err(serde::de::Error::custom)
            }
        }

        impl vitrine_seeker::SeekerEnum for $name {
            fn seeker_discriminant(&self) -> u32 {
                match self {
                    $($name::$variant => $disc),+
                }
            }
        }
    };
}

mod activity;
mod event;
mod member;
mod news;

pub use activity::{Activity, ActivityCategory};
pub use event::{Event, EventStatus, Location};
pub use member::{Cohort, Member};
pub use news::{Author, News, NewsStatus, UNKNOWN_AUTHOR};
