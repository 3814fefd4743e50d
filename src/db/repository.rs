//! Content repository: typed CRUD for each content kind.
//!
//! The only layer that talks to the document store. Store errors propagate unchanged.

use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::SqlitePool;

use super::{Document, DocumentStore};
use crate::errors::AppError;
use crate::models::{
    ContentKind, Entry, ServerTimestamp, SiteDetails, SiteMetadata, SiteMetadataPatch,
    METADATA_KEY, SITE_COLLECTION,
};

/// Field every ordered collection is sorted by.
const ORDER_FIELD: &str = "order";

/// Content repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    store: DocumentStore,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            store: DocumentStore::new(pool),
        }
    }

    /// Close the underlying store.
    pub async fn close(&self) {
        self.store.close().await;
    }

    /// Get the current revision ID.
    pub async fn get_revision_id(&self) -> Result<i64, AppError> {
        self.store.revision().await
    }

    // ==================== ORDERED COLLECTIONS ====================

    /// List all entries of a kind, ascending by sort order.
    pub async fn list<K: ContentKind>(&self) -> Result<Vec<Entry<K>>, AppError> {
        let documents = self.store.list(K::COLLECTION, ORDER_FIELD).await?;
        documents.into_iter().map(entry_from_document).collect()
    }

    /// Get an entry by ID.
    pub async fn get<K: ContentKind>(&self, id: &str) -> Result<Option<Entry<K>>, AppError> {
        self.store
            .get(K::COLLECTION, id)
            .await?
            .map(entry_from_document)
            .transpose()
    }

    /// Number of entries of a kind.
    pub async fn count<K: ContentKind>(&self) -> Result<i64, AppError> {
        self.store.count(K::COLLECTION).await
    }

    /// Create a new entry. The sort order is stored as given.
    pub async fn create<K: ContentKind>(&self, fields: &K) -> Result<Entry<K>, AppError> {
        let document = self.store.add(K::COLLECTION, to_object(fields)?).await?;
        tracing::info!(collection = K::COLLECTION, id = %document.id, "Created {}", K::LABEL);
        entry_from_document(document)
    }

    /// Merge the fields set in `patch` into an existing entry.
    pub async fn update<K: ContentKind>(
        &self,
        id: &str,
        patch: &K::Patch,
    ) -> Result<Entry<K>, AppError> {
        let document = self
            .store
            .update_merge(K::COLLECTION, id, to_object(patch)?)
            .await
            .map_err(|e| relabel(e, K::LABEL, id))?;
        tracing::info!(collection = K::COLLECTION, id, "Updated {}", K::LABEL);
        entry_from_document(document)
    }

    /// Delete an entry.
    pub async fn delete<K: ContentKind>(&self, id: &str) -> Result<ServerTimestamp, AppError> {
        let stamp = self
            .store
            .delete(K::COLLECTION, id)
            .await
            .map_err(|e| relabel(e, K::LABEL, id))?;
        tracing::info!(collection = K::COLLECTION, id, "Deleted {}", K::LABEL);
        Ok(stamp)
    }

    // ==================== SITE METADATA ====================

    /// Get the metadata singleton; `None` until it has been written once.
    pub async fn get_site_metadata(&self) -> Result<Option<SiteMetadata>, AppError> {
        self.store
            .get(SITE_COLLECTION, METADATA_KEY)
            .await?
            .map(metadata_from_document)
            .transpose()
    }

    /// Merge the fields set in `patch` into the metadata singleton.
    pub async fn update_site_metadata(
        &self,
        patch: &SiteMetadataPatch,
    ) -> Result<SiteMetadata, AppError> {
        let document = self
            .store
            .update_merge(SITE_COLLECTION, METADATA_KEY, to_object(patch)?)
            .await
            .map_err(|e| relabel(e, "Site metadata", METADATA_KEY))?;
        tracing::info!("Updated site metadata");
        metadata_from_document(document)
    }

    /// Overwrite the metadata singleton, creating it if needed.
    pub async fn put_site_metadata(&self, details: &SiteDetails) -> Result<SiteMetadata, AppError> {
        let document = self
            .store
            .set(SITE_COLLECTION, METADATA_KEY, to_object(details)?)
            .await?;
        metadata_from_document(document)
    }

    /// Certifications kept on the metadata singleton.
    pub async fn list_certifications(&self) -> Result<Vec<String>, AppError> {
        Ok(self
            .get_site_metadata()
            .await?
            .map(|m| m.details.certifications)
            .unwrap_or_default())
    }
}

// Helper functions for document conversion

fn to_object<T: Serialize>(value: &T) -> Result<Map<String, Value>, AppError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(AppError::Internal(
            "Record did not serialize to an object".to_string(),
        )),
        Err(e) => Err(AppError::Internal(format!("Failed to encode record: {}", e))),
    }
}

fn entry_from_document<K: ContentKind>(document: Document) -> Result<Entry<K>, AppError> {
    let Document {
        id,
        data,
        created_at,
        updated_at,
    } = document;

    let fields = serde_json::from_value(Value::Object(data)).map_err(|e| {
        AppError::Internal(format!("Malformed {} document {}: {}", K::LABEL, id, e))
    })?;

    Ok(Entry {
        id,
        fields,
        created_at,
        updated_at,
    })
}

fn metadata_from_document(document: Document) -> Result<SiteMetadata, AppError> {
    let details = serde_json::from_value(Value::Object(document.data))
        .map_err(|e| AppError::Internal(format!("Malformed site metadata: {}", e)))?;

    Ok(SiteMetadata {
        details,
        updated_at: document.updated_at,
    })
}

fn relabel(err: AppError, label: &str, id: &str) -> AppError {
    if err.is_not_found() {
        AppError::NotFound(format!("{} {} not found", label, id))
    } else {
        err
    }
}
