//! Book instance (physical copy) model and related types

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{book::BookTitleView, format_date_iso, format_date_med, parse_draft_date};
use crate::error::{AppError, AppResult};

/// Circulation status of a copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum BookInstanceStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl BookInstanceStatus {
    pub const ALL: [BookInstanceStatus; 4] = [
        BookInstanceStatus::Available,
        BookInstanceStatus::Maintenance,
        BookInstanceStatus::Loaned,
        BookInstanceStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookInstanceStatus::Available => "Available",
            BookInstanceStatus::Maintenance => "Maintenance",
            BookInstanceStatus::Loaned => "Loaned",
            BookInstanceStatus::Reserved => "Reserved",
        }
    }
}

impl FromStr for BookInstanceStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| AppError::Validation(format!("'{}' is not a valid book instance status", s)))
    }
}

impl std::fmt::Display for BookInstanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored book instance record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookInstance {
    pub id: Uuid,
    pub book: Uuid,
    pub imprint: String,
    #[serde(default)]
    pub status: BookInstanceStatus,
    pub due_back: DateTime<Utc>,
}

impl BookInstance {
    pub fn url(&self) -> String {
        book_instance_url(self.id)
    }

    pub fn due_back_formatted(&self) -> String {
        format_date_med(self.due_back.date_naive())
    }

    pub fn due_back_yyyy_mm_dd(&self) -> String {
        format_date_iso(self.due_back.date_naive())
    }

    pub fn view(self) -> BookInstanceView {
        BookInstanceView {
            url: self.url(),
            due_back_formatted: self.due_back_formatted(),
            due_back_yyyy_mm_dd: self.due_back_yyyy_mm_dd(),
            book_instance: self,
        }
    }
}

pub fn book_instance_url(id: Uuid) -> String {
    format!("/catalog/bookinstance/{}", id)
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookInstanceView {
    #[serde(flatten)]
    pub book_instance: BookInstance,
    pub url: String,
    pub due_back_formatted: String,
    pub due_back_yyyy_mm_dd: String,
}

/// Book instance with the referenced book resolved
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PopulatedBookInstance {
    #[serde(flatten)]
    pub book_instance: BookInstanceView,
    /// `None` when the referenced book no longer exists
    pub book_title: Option<BookTitleView>,
}

/// Sanitized book instance form input.
///
/// `status` is kept as submitted (after sanitization); it only becomes a
/// [`BookInstanceStatus`] when the draft is turned into a document.
/// `due_back` is form text, as for author dates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct BookInstanceDraft {
    pub id: Option<Uuid>,
    pub book: Option<Uuid>,
    pub imprint: String,
    pub status: String,
    pub due_back: String,
}

#[derive(Debug, Serialize)]
pub struct BookInstanceDocument<'a> {
    pub book: Option<Uuid>,
    pub imprint: &'a str,
    pub status: BookInstanceStatus,
    pub due_back: DateTime<Utc>,
}

impl BookInstanceDraft {
    pub fn from_book_instance(instance: &BookInstance) -> Self {
        Self {
            id: Some(instance.id),
            book: Some(instance.book),
            imprint: instance.imprint.clone(),
            status: instance.status.as_str().to_string(),
            due_back: instance.due_back_yyyy_mm_dd(),
        }
    }

    /// Apply schema defaults and domain checks. `now` stands in for an
    /// absent due date.
    pub fn document(&self, now: DateTime<Utc>) -> AppResult<BookInstanceDocument<'_>> {
        let status = if self.status.is_empty() {
            BookInstanceStatus::default()
        } else {
            self.status.parse()?
        };
        let due_back = parse_draft_date("due_back", &self.due_back)?
            .map(|date| date.and_time(NaiveTime::MIN).and_utc())
            .unwrap_or(now);

        Ok(BookInstanceDocument {
            book: self.book,
            imprint: &self.imprint,
            status,
            due_back,
        })
    }
}
