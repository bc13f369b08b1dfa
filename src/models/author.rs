//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{format_date_iso, format_date_med, parse_draft_date};
use crate::error::AppResult;

/// Stored author record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// `family_name, first_name`, or empty when either part is missing
    pub fn name(&self) -> String {
        if self.first_name.is_empty() || self.family_name.is_empty() {
            return String::new();
        }
        format!("{}, {}", self.family_name, self.first_name)
    }

    pub fn url(&self) -> String {
        author_url(self.id)
    }

    pub fn lifespan(&self) -> String {
        let birth = self.date_of_birth.map(format_date_med).unwrap_or_default();
        let death = self.date_of_death.map(format_date_med).unwrap_or_default();
        format!("{} - {}", birth, death)
    }

    pub fn view(self) -> AuthorView {
        AuthorView {
            name: self.name(),
            url: self.url(),
            lifespan: self.lifespan(),
            date_of_birth_yyyy_mm_dd: self.date_of_birth.map(format_date_iso).unwrap_or_default(),
            date_of_death_yyyy_mm_dd: self.date_of_death.map(format_date_iso).unwrap_or_default(),
            author: self,
        }
    }
}

pub fn author_url(id: Uuid) -> String {
    format!("/catalog/author/{}", id)
}

/// Author as rendered, with derived attributes
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorView {
    #[serde(flatten)]
    pub author: Author,
    pub name: String,
    pub url: String,
    pub lifespan: String,
    pub date_of_birth_yyyy_mm_dd: String,
    pub date_of_death_yyyy_mm_dd: String,
}

/// Sanitized author form input.
///
/// Dates are kept as form text: `YYYY-MM-DD` once accepted, or the
/// sanitized submission when it did not parse, so a rejected form shows
/// what was typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct AuthorDraft {
    /// Set when the draft updates an existing author
    pub id: Option<Uuid>,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: String,
    pub date_of_death: String,
}

/// Stored body of an author document (the id lives outside the body)
#[derive(Debug, Serialize)]
pub struct AuthorDocument<'a> {
    pub first_name: &'a str,
    pub family_name: &'a str,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl AuthorDraft {
    pub fn from_author(author: &Author) -> Self {
        Self {
            id: Some(author.id),
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: author.date_of_birth.map(format_date_iso).unwrap_or_default(),
            date_of_death: author.date_of_death.map(format_date_iso).unwrap_or_default(),
        }
    }

    pub fn document(&self) -> AppResult<AuthorDocument<'_>> {
        Ok(AuthorDocument {
            first_name: &self.first_name,
            family_name: &self.family_name,
            date_of_birth: parse_draft_date("date_of_birth", &self.date_of_birth)?,
            date_of_death: parse_draft_date("date_of_death", &self.date_of_death)?,
        })
    }
}
