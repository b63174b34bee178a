use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value as Json;
use vitrine_seeker::{Number, Seekable, SeekerEnum, Value};

use super::{opt_ts, ts};
use crate::error::Result;
use crate::normalize::{Normalize, RawRecord};

labels! {
    /// Lifecycle of an event.
    pub enum EventStatus {
        Upcoming = 0 => "upcoming",
        Ongoing = 1 => "ongoing",
        Completed = 2 => "completed",
        Cancelled = 3 => "cancelled",
    }
}

impl Default for EventStatus {
    fn default() -> Self {
        EventStatus::Upcoming
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Location {
    pub fn named(name: impl Into<String>) -> Self {
        Location {
            name: name.into(),
            address: None,
            url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub organizer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_participants: Option<u32>,
    pub registration_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_deadline: Option<DateTime<Utc>>,
    /// `None` for free events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub tags: Vec<String>,
    pub status: EventStatus,
    pub slug: String,
}

impl Event {
    pub const ID: &'static str = "id";
    pub const TITLE: &'static str = "title";
    pub const DESCRIPTION: &'static str = "description";
    pub const ORGANIZER: &'static str = "organizer";
    pub const LOCATION: &'static str = "location";
    pub const TAGS: &'static str = "tags";
    pub const STATUS: &'static str = "status";
    pub const STARTS_AT: &'static str = "startDate";
    /// End date, falling back to the start date for single-moment events.
    pub const ENDS_AT: &'static str = "endsAt";
    pub const PARTICIPANTS: &'static str = "participants";
    pub const SLUG: &'static str = "slug";
    pub const REGISTRATION_DEADLINE: &'static str = "registrationDeadline";

    pub fn new(id: impl Into<String>, title: impl Into<String>, start_date: DateTime<Utc>) -> Self {
        Event {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            start_date,
            end_date: None,
            location: None,
            image: None,
            organizer: String::new(),
            max_participants: None,
            current_participants: None,
            registration_required: false,
            registration_deadline: None,
            price: None,
            tags: Vec::new(),
            status: EventStatus::default(),
            slug: String::new(),
        }
    }

    pub fn location_name(&self) -> Option<&str> {
        self.location.as_ref().map(|location| location.name.as_str())
    }

    /// Registered participants, 0 when unknown.
    pub fn participants(&self) -> u32 {
        self.current_participants.unwrap_or(0)
    }

    pub fn ends_at(&self) -> DateTime<Utc> {
        self.end_date.unwrap_or(self.start_date)
    }

    pub fn is_full(&self) -> bool {
        self.max_participants
            .is_some_and(|max| self.participants() >= max)
    }
}

impl Seekable for Event {
    fn seeker_field_value(&self, field: &str) -> Value<'_> {
        match field {
            Event::ID => Value::String(&self.id),
            Event::TITLE => Value::String(&self.title),
            Event::DESCRIPTION => Value::String(&self.description),
            Event::ORGANIZER => Value::String(&self.organizer),
            Event::LOCATION => Value::opt_str(self.location_name()),
            Event::TAGS => Value::List(&self.tags),
            Event::STATUS => Value::Enum(self.status.seeker_discriminant()),
            Event::STARTS_AT => Value::Timestamp(ts(&self.start_date)),
            Event::ENDS_AT => Value::Timestamp(ts(&self.ends_at())),
            Event::PARTICIPANTS => Value::Number(Number::from(self.participants())),
            Event::SLUG => Value::String(&self.slug),
            Event::REGISTRATION_DEADLINE => {
                Value::opt_timestamp(opt_ts(self.registration_deadline.as_ref()))
            }
            _ => Value::None,
        }
    }
}

impl Normalize for Event {
    const KIND: &'static str = "event";

    fn normalize(raw: &Json) -> Result<Self> {
        let record = RawRecord::new(Self::KIND, raw)?;
        let mut event = Event::new(
            record.id()?,
            record.required_string("title")?,
            record.required_timestamp("startDate")?,
        );
        event.description = record.string_or_default("description");
        event.end_date = record.optional_timestamp("endDate");
        event.location = record.object("location").and_then(|location| {
            Some(Location {
                name: location.optional_string("name")?,
                address: location.optional_string("address"),
                url: location.optional_string("url"),
            })
        });
        event.image = record.optional_string("image");
        event.organizer = record.string_or_default("organizer");
        event.max_participants = record.optional_count("maxParticipants").filter(|n| *n > 0);
        event.current_participants = record.optional_count("currentParticipants");
        event.registration_required = record.flag("registrationRequired");
        event.registration_deadline = record.optional_timestamp("registrationDeadline");
        event.price = record.optional_number("price").filter(|price| *price > 0.0);
        event.tags = record.string_list("tags");
        event.status = record.coerce("status");
        event.slug = record.string_or_default("slug");
        Ok(event)
    }
}
