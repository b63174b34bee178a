use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value as Json;
use vitrine_seeker::{Number, Seekable, SeekerEnum, Value};

use super::opt_ts;
use crate::error::Result;
use crate::normalize::{Normalize, RawRecord};

labels! {
    pub enum ActivityCategory {
        Academic = 0 => "academic",
        Social = 1 => "social",
        Professional = 2 => "professional",
        Technical = 3 => "technical",
    }
}

impl Default for ActivityCategory {
    fn default() -> Self {
        ActivityCategory::Social
    }
}

/// A recurring club activity (workshops, tutoring, hackathons...).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: ActivityCategory,
    pub is_active: bool,
    pub schedule: String,
    pub location: String,
    pub participants: u32,
    pub difficulty: String,
    pub technologies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_session: Option<DateTime<Utc>>,
}

impl Activity {
    pub const ID: &'static str = "id";
    pub const NAME: &'static str = "name";
    pub const DESCRIPTION: &'static str = "description";
    pub const CATEGORY: &'static str = "category";
    pub const ACTIVE: &'static str = "isActive";
    pub const PARTICIPANTS: &'static str = "participants";
    pub const TECHNOLOGIES: &'static str = "technologies";
    pub const NEXT_SESSION: &'static str = "nextSession";

    pub fn new(id: impl Into<String>, name: impl Into<String>, category: ActivityCategory) -> Self {
        Activity {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category,
            is_active: true,
            schedule: String::new(),
            location: String::new(),
            participants: 0,
            difficulty: String::new(),
            technologies: Vec::new(),
            next_session: None,
        }
    }
}

impl Seekable for Activity {
    fn seeker_field_value(&self, field: &str) -> Value<'_> {
        match field {
            Activity::ID => Value::String(&self.id),
            Activity::NAME => Value::String(&self.name),
            Activity::DESCRIPTION => Value::String(&self.description),
            Activity::CATEGORY => Value::Enum(self.category.seeker_discriminant()),
            Activity::ACTIVE => Value::Bool(self.is_active),
            Activity::PARTICIPANTS => Value::Number(Number::from(self.participants)),
            Activity::TECHNOLOGIES => Value::List(&self.technologies),
            Activity::NEXT_SESSION => Value::opt_timestamp(opt_ts(self.next_session.as_ref())),
            _ => Value::None,
        }
    }
}

impl Normalize for Activity {
    const KIND: &'static str = "activity";

    fn normalize(raw: &Json) -> Result<Self> {
        let record = RawRecord::new(Self::KIND, raw)?;
        let mut activity = Activity::new(
            record.id()?,
            record.required_string("name")?,
            record.coerce("category"),
        );
        activity.description = record.string_or_default("description");
        activity.is_active = record.flag("isActive");
        activity.schedule = record.string_or_default("schedule");
        activity.location = record.string_or_default("location");
        activity.participants = record.optional_count("participants").unwrap_or(0);
        activity.difficulty = record.string_or_default("difficulty");
        activity.technologies = record.string_list("technologies");
        activity.next_session = record.optional_timestamp("nextSession");
        Ok(activity)
    }
}
