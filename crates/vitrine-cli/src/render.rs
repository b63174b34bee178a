//! Plain-text rendering of a list snapshot.

use console::{style, Style};
use vitrine::{Activity, Event, ListSnapshot, Member, News, ViewStatus};

/// One line per record in the text output.
pub trait Row {
    fn title(&self) -> &str;
    fn detail(&self) -> String;
}

impl Row for Member {
    fn title(&self) -> &str {
        self.full_name()
    }

    fn detail(&self) -> String {
        let mut parts = vec![self.cohort.to_string()];
        if let Some(role) = &self.role {
            parts.push(role.clone());
        }
        if !self.skills.is_empty() {
            parts.push(self.skills.join(", "));
        }
        parts.join(" · ")
    }
}

impl Row for Event {
    fn title(&self) -> &str {
        &self.title
    }

    fn detail(&self) -> String {
        let mut parts = vec![
            self.start_date.format("%Y-%m-%d %H:%M").to_string(),
            self.status.to_string(),
        ];
        if let Some(location) = self.location_name() {
            parts.push(location.to_string());
        }
        if let Some(count) = self.current_participants {
            parts.push(format!("{count} participants"));
        }
        parts.join(" · ")
    }
}

impl Row for News {
    fn title(&self) -> &str {
        &self.title
    }

    fn detail(&self) -> String {
        format!(
            "{} · {} · {}",
            self.published_at.format("%Y-%m-%d"),
            self.author.name,
            self.status
        )
    }
}

impl Row for Activity {
    fn title(&self) -> &str {
        &self.name
    }

    fn detail(&self) -> String {
        let state = if self.is_active { "active" } else { "paused" };
        format!("{} · {} · {} participants", self.category, state, self.participants)
    }
}

pub fn text<T: Row>(kind: &str, snapshot: &ListSnapshot<'_, T>) -> String {
    let dim = Style::new().dim();
    let mut out = String::new();

    match snapshot.status {
        ViewStatus::Loading => out.push_str("Loading…\n"),
        ViewStatus::Failed => {
            out.push_str(&format!("No {kind} to show: the data could not be loaded.\n"))
        }
        ViewStatus::Empty => out.push_str(&format!("No {kind} yet.\n")),
        ViewStatus::NoResults => out.push_str(&format!(
            "No {kind} match these filters. Drop --facet/--search to see all {}.\n",
            snapshot.total_count
        )),
        ViewStatus::Results => {
            let offset = (snapshot.current_page - 1) * snapshot.page_size;
            for (i, item) in snapshot.items.iter().enumerate() {
                out.push_str(&format!(
                    "{:>4}. {}  {}\n",
                    offset + i + 1,
                    style(item.title()).bold(),
                    dim.apply_to(item.detail())
                ));
            }
        }
    }

    out.push_str(&format!(
        "{}\n",
        dim.apply_to(format!(
            "Page {} of {} · {} of {} {kind}",
            snapshot.current_page, snapshot.total_pages, snapshot.result_count, snapshot.total_count
        ))
    ));
    out
}
