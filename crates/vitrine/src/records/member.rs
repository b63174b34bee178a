use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value as Json;
use vitrine_seeker::{Seekable, SeekerEnum, Value};

use super::opt_ts;
use crate::error::Result;
use crate::normalize::{Normalize, RawRecord};

labels! {
    /// Study level of a member.
    pub enum Cohort {
        L3 = 0 => "L3",
        M1 = 1 => "M1",
        M2 = 2 => "M2",
        Alumni = 3 => "Alumni",
        Other = 4 => "Other" | "Autre",
    }
}

impl Default for Cohort {
    fn default() -> Self {
        Cohort::L3
    }
}

/// A member of the association, as shown in the directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    first_name: String,
    last_name: String,
    #[serde(skip)]
    full_name: String,
    pub cohort: Cohort,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_date: Option<DateTime<Utc>>,
}

impl Member {
    pub const ID: &'static str = "id";
    pub const FULL_NAME: &'static str = "fullName";
    pub const COHORT: &'static str = "cohort";
    pub const SKILLS: &'static str = "skills";
    pub const ROLE: &'static str = "role";
    pub const HAS_LINKEDIN: &'static str = "hasLinkedin";
    pub const HAS_GITHUB: &'static str = "hasGithub";
    pub const JOIN_DATE: &'static str = "joinDate";

    /// A member with only the required fields set.
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        cohort: Cohort,
    ) -> Self {
        let first_name = first_name.into();
        let last_name = last_name.into();
        Member {
            id: id.into(),
            full_name: format!("{first_name} {last_name}"),
            first_name,
            last_name,
            cohort,
            photo: None,
            linkedin: None,
            github: None,
            email: None,
            role: None,
            description: None,
            skills: Vec::new(),
            join_date: None,
        }
    }

    /// Replaces both name parts; the searched full name follows.
    pub fn with_name(
        mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self.full_name = format!("{} {}", self.first_name, self.last_name);
        self
    }

    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_linkedin(mut self, url: impl Into<String>) -> Self {
        self.linkedin = Some(url.into());
        self
    }

    pub fn with_github(mut self, url: impl Into<String>) -> Self {
        self.github = Some(url.into());
        self
    }

    pub fn with_join_date(mut self, date: DateTime<Utc>) -> Self {
        self.join_date = Some(date);
        self
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// "First Last", the name searched and sorted on.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn has_linkedin(&self) -> bool {
        self.linkedin.is_some()
    }

    pub fn has_github(&self) -> bool {
        self.github.is_some()
    }
}

impl Seekable for Member {
    fn seeker_field_value(&self, field: &str) -> Value<'_> {
        match field {
            Member::ID => Value::String(&self.id),
            Member::FULL_NAME => Value::String(&self.full_name),
            Member::COHORT => Value::Enum(self.cohort.seeker_discriminant()),
            Member::SKILLS => Value::List(&self.skills),
            Member::ROLE => Value::opt_str(self.role.as_deref()),
            Member::HAS_LINKEDIN => Value::Bool(self.has_linkedin()),
            Member::HAS_GITHUB => Value::Bool(self.has_github()),
            Member::JOIN_DATE => Value::opt_timestamp(opt_ts(self.join_date.as_ref())),
            _ => Value::None,
        }
    }
}

impl Normalize for Member {
    const KIND: &'static str = "member";

    fn normalize(raw: &Json) -> Result<Self> {
        let record = RawRecord::new(Self::KIND, raw)?;
        let mut member = Member::new(
            record.id()?,
            record.required_string("firstName")?,
            record.required_string("lastName")?,
            if record.optional_string("promo").is_some() {
                record.coerce("promo")
            } else {
                record.coerce("cohort")
            },
        );
        member.photo = record.optional_string("photo");
        member.linkedin = record.optional_string("linkedin");
        member.github = record.optional_string("github");
        member.email = record.optional_string("email");
        member.role = record.optional_string("role");
        member.description = record.optional_string("description");
        member.skills = record.string_list("skills");
        member.join_date = record.optional_timestamp("joinDate");
        Ok(member)
    }
}
