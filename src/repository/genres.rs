//! Genre domain methods on Repository

use uuid::Uuid;

use super::{Collection, Filter, FindQuery, Repository};
use crate::{
    error::AppResult,
    models::genre::{Genre, GenreDraft},
};

impl Repository {
    /// List all genres ordered by name
    pub async fn genres_list(&self) -> AppResult<Vec<Genre>> {
        self.find(Collection::Genres, &FindQuery::all().sort_asc("name"))
            .await
    }

    pub async fn genres_get(&self, id: Uuid) -> AppResult<Option<Genre>> {
        self.get(Collection::Genres, id).await
    }

    /// Resolve genre references, ordered by name. Unknown ids are skipped.
    pub async fn genres_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = FindQuery::new(Filter::IdIn(ids.to_vec())).sort_asc("name");
        self.find(Collection::Genres, &query).await
    }

    /// Find a genre whose name matches ignoring case
    pub async fn genres_find_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let query = FindQuery::new(Filter::EqIgnoreCase("name", name.to_string()));
        let mut found: Vec<Genre> = self.find(Collection::Genres, &query).await?;
        Ok(if found.is_empty() { None } else { Some(found.swap_remove(0)) })
    }

    pub async fn genres_create(&self, draft: &GenreDraft) -> AppResult<Uuid> {
        self.insert(Collection::Genres, &draft.document()).await
    }

    pub async fn genres_update(&self, id: Uuid, draft: &GenreDraft) -> AppResult<()> {
        self.replace(Collection::Genres, id, &draft.document()).await
    }

    pub async fn genres_delete(&self, id: Uuid) -> AppResult<bool> {
        self.remove(Collection::Genres, id).await
    }
}
