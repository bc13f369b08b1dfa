//! Author domain methods on Repository

use uuid::Uuid;

use super::{Collection, FindQuery, Repository};
use crate::{
    error::AppResult,
    models::author::{Author, AuthorDraft},
};

impl Repository {
    /// List all authors ordered by family name
    pub async fn authors_list(&self) -> AppResult<Vec<Author>> {
        self.find(Collection::Authors, &FindQuery::all().sort_asc("family_name"))
            .await
    }

    /// Get author by ID
    pub async fn authors_get(&self, id: Uuid) -> AppResult<Option<Author>> {
        self.get(Collection::Authors, id).await
    }

    pub async fn authors_create(&self, draft: &AuthorDraft) -> AppResult<Uuid> {
        self.insert(Collection::Authors, &draft.document()?).await
    }

    pub async fn authors_update(&self, id: Uuid, draft: &AuthorDraft) -> AppResult<()> {
        self.replace(Collection::Authors, id, &draft.document()?).await
    }

    pub async fn authors_delete(&self, id: Uuid) -> AppResult<bool> {
        self.remove(Collection::Authors, id).await
    }
}
