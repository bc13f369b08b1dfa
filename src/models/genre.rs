//! Genre model

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Stored genre record. Names are unique ignoring case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
}

impl Genre {
    pub fn url(&self) -> String {
        genre_url(self.id)
    }

    pub fn view(self) -> GenreView {
        GenreView {
            url: self.url(),
            genre: self,
        }
    }
}

pub fn genre_url(id: Uuid) -> String {
    format!("/catalog/genre/{}", id)
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenreView {
    #[serde(flatten)]
    pub genre: Genre,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct GenreDraft {
    pub id: Option<Uuid>,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct GenreDocument<'a> {
    pub name: &'a str,
}

impl GenreDraft {
    pub fn from_genre(genre: &Genre) -> Self {
        Self {
            id: Some(genre.id),
            name: genre.name.clone(),
        }
    }

    pub fn document(&self) -> GenreDocument<'_> {
        GenreDocument { name: &self.name }
    }
}
