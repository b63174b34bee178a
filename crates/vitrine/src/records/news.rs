use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value as Json;
use vitrine_seeker::{Seekable, SeekerEnum, Value};

use super::{opt_ts, ts};
use crate::error::Result;
use crate::normalize::{Normalize, RawRecord};

/// Author name shown when a news record carries none.
pub const UNKNOWN_AUTHOR: &str = "Auteur inconnu";

labels! {
    /// Editorial state of a news item.
    pub enum NewsStatus {
        Draft = 0 => "draft",
        Published = 1 => "published",
        Archived = 2 => "archived",
    }
}

impl Default for NewsStatus {
    fn default() -> Self {
        NewsStatus::Published
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Author {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Default for Author {
    fn default() -> Self {
        Author {
            name: UNKNOWN_AUTHOR.to_string(),
            avatar: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct News {
    pub id: String,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub author: Author,
    pub published_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub tags: Vec<String>,
    pub status: NewsStatus,
    pub slug: String,
}

impl News {
    pub const ID: &'static str = "id";
    pub const TITLE: &'static str = "title";
    pub const CONTENT: &'static str = "content";
    pub const EXCERPT: &'static str = "excerpt";
    pub const AUTHOR: &'static str = "author";
    pub const PUBLISHED_AT: &'static str = "publishedAt";
    pub const UPDATED_AT: &'static str = "updatedAt";
    pub const TAGS: &'static str = "tags";
    pub const STATUS: &'static str = "status";
    pub const SLUG: &'static str = "slug";

    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        published_at: DateTime<Utc>,
    ) -> Self {
        News {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            excerpt: String::new(),
            author: Author::default(),
            published_at,
            updated_at: None,
            image: None,
            tags: Vec::new(),
            status: NewsStatus::default(),
            slug: String::new(),
        }
    }

    pub fn is_published(&self) -> bool {
        self.status == NewsStatus::Published
    }
}

impl Seekable for News {
    fn seeker_field_value(&self, field: &str) -> Value<'_> {
        match field {
            News::ID => Value::String(&self.id),
            News::TITLE => Value::String(&self.title),
            News::CONTENT => Value::String(&self.content),
            News::EXCERPT => Value::String(&self.excerpt),
            News::AUTHOR => Value::String(&self.author.name),
            News::PUBLISHED_AT => Value::Timestamp(ts(&self.published_at)),
            News::UPDATED_AT => Value::opt_timestamp(opt_ts(self.updated_at.as_ref())),
            News::TAGS => Value::List(&self.tags),
            News::STATUS => Value::Enum(self.status.seeker_discriminant()),
            News::SLUG => Value::String(&self.slug),
            _ => Value::None,
        }
    }
}

fn read_author(record: &RawRecord<'_>) -> Author {
    if let Some(author) = record.object("author") {
        return Author {
            name: author
                .optional_string("name")
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            avatar: author.optional_string("avatar"),
        };
    }
    match record.optional_string("author") {
        Some(name) => Author { name, avatar: None },
        None => Author::default(),
    }
}

impl Normalize for News {
    const KIND: &'static str = "news";

    fn normalize(raw: &Json) -> Result<Self> {
        let record = RawRecord::new(Self::KIND, raw)?;
        let mut news = News::new(
            record.id()?,
            record.required_string("title")?,
            record.required_string("content")?,
            record.required_timestamp("publishedAt")?,
        );
        news.excerpt = record.string_or_default("excerpt");
        news.author = read_author(&record);
        news.updated_at = record.optional_timestamp("updatedAt");
        news.image = record.optional_string("image");
        news.tags = record.string_list("tags");
        news.status = record.coerce("status");
        news.slug = record.string_or_default("slug");
        Ok(news)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;
    use serde_json::json;

    #[test]
    fn defaults_author_and_status() {
        let raw = json!({
            "id": "n1",
            "title": "Rentrée",
            "content": "Bienvenue",
            "publishedAt": "2024-09-02",
            "status": "pinned"
        });
        let news = News::normalize(&raw).unwrap();
        assert_eq!(news.author.name, UNKNOWN_AUTHOR);
        assert_eq!(news.status, NewsStatus::Published);
        assert!(news.is_published());
        assert_eq!(news.excerpt, "");
    }

    #[test]
    fn reads_author_object_or_name() {
        let object = json!({
            "id": "n1", "title": "T", "content": "C", "publishedAt": "2024-09-02",
            "author": { "name": "Bureau", "avatar": "/a.png" }
        });
        let news = News::normalize(&object).unwrap();
        assert_eq!(news.author.name, "Bureau");
        assert_eq!(news.author.avatar.as_deref(), Some("/a.png"));

        let plain = json!({
            "id": "n2", "title": "T", "content": "C", "publishedAt": "2024-09-02",
            "author": "Léa"
        });
        assert_eq!(News::normalize(&plain).unwrap().author.name, "Léa");

        let nameless = json!({
            "id": "n3", "title": "T", "content": "C", "publishedAt": "2024-09-02",
            "author": {}
        });
        assert_eq!(News::normalize(&nameless).unwrap().author.name, UNKNOWN_AUTHOR);
    }

    #[test]
    fn content_and_publish_date_are_required() {
        let no_content = json!({ "id": "n1", "title": "T", "publishedAt": "2024-09-02" });
        assert!(matches!(
            News::normalize(&no_content),
            Err(LoadError::MissingField { field: "content", .. })
        ));

        let no_date = json!({ "id": "n1", "title": "T", "content": "C" });
        assert!(matches!(
            News::normalize(&no_date),
            Err(LoadError::MissingField { field: "publishedAt", .. })
        ));
    }
}
