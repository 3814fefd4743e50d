//! Collection/document store on top of SQLite.
//!
//! Documents are JSON objects addressed by `(collection, id)`. Every write draws the next
//! store revision as its server timestamp inside the same transaction as the write.

use chrono::Utc;
use serde_json::{Map, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, SqlitePool, Transaction};

use crate::errors::AppError;
use crate::models::ServerTimestamp;

/// Keys owned by the store; callers cannot write them.
const RESERVED_KEYS: [&str; 3] = ["id", "createdAt", "updatedAt"];

/// A stored document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Map<String, Value>,
    pub created_at: ServerTimestamp,
    pub updated_at: ServerTimestamp,
}

/// Handle to the document store.
#[derive(Clone)]
pub struct DocumentStore {
    pool: SqlitePool,
}

impl DocumentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Close every pooled connection; later calls fail as unavailable.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Get the current revision ID.
    pub async fn revision(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT revision_id FROM meta WHERE id = 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("revision_id"))
    }

    /// List a collection ascending by a numeric field, oldest first among equals.
    pub async fn list(&self, collection: &str, order_field: &str) -> Result<Vec<Document>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, data, created_seq, created_at, updated_seq, updated_at
               FROM documents
               WHERE collection = ?
               ORDER BY COALESCE(json_extract(data, ?), 0), created_seq"#,
        )
        .bind(collection)
        .bind(format!("$.{}", order_field))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(document_from_row).collect()
    }

    /// Number of documents in a collection.
    pub async fn count(&self, collection: &str) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM documents WHERE collection = ?")
            .bind(collection)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("total"))
    }

    /// Get a document by ID.
    pub async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, AppError> {
        let row = sqlx::query(
            r#"SELECT id, data, created_seq, created_at, updated_seq, updated_at
               FROM documents WHERE collection = ? AND id = ?"#,
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(document_from_row).transpose()
    }

    /// Insert a new document under a fresh identifier.
    pub async fn add(&self, collection: &str, data: Map<String, Value>) -> Result<Document, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let data = strip_reserved(data);
        let body = encode(&data)?;

        let mut tx = self.pool.begin().await?;
        let stamp = next_stamp(&mut tx).await?;

        sqlx::query(
            r#"INSERT INTO documents (collection, id, data, created_seq, created_at, updated_seq, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(collection)
        .bind(&id)
        .bind(&body)
        .bind(stamp.sequence)
        .bind(stamp.recorded_at)
        .bind(stamp.sequence)
        .bind(stamp.recorded_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(collection, id = %id, "Document added");

        Ok(Document {
            id,
            data,
            created_at: stamp.clone(),
            updated_at: stamp,
        })
    }

    /// Write a document at a fixed key, replacing any previous content.
    ///
    /// The creation stamp of an existing document is kept.
    pub async fn set(
        &self,
        collection: &str,
        id: &str,
        data: Map<String, Value>,
    ) -> Result<Document, AppError> {
        let data = strip_reserved(data);
        let body = encode(&data)?;

        let mut tx = self.pool.begin().await?;
        let stamp = next_stamp(&mut tx).await?;

        sqlx::query(
            r#"INSERT INTO documents (collection, id, data, created_seq, created_at, updated_seq, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?)
               ON CONFLICT (collection, id) DO UPDATE SET
                   data = excluded.data,
                   updated_seq = excluded.updated_seq,
                   updated_at = excluded.updated_at"#,
        )
        .bind(collection)
        .bind(id)
        .bind(&body)
        .bind(stamp.sequence)
        .bind(stamp.recorded_at)
        .bind(stamp.sequence)
        .bind(stamp.recorded_at)
        .execute(&mut *tx)
        .await?;

        let row = fetch_in_tx(&mut tx, collection, id).await?;
        tx.commit().await?;

        row.ok_or_else(|| not_found(collection, id))
    }

    /// Shallow-merge `patch` into an existing document.
    ///
    /// Top-level keys in `patch` overwrite stored keys; nested values are replaced whole.
    /// A `null` value removes the key.
    pub async fn update_merge(
        &self,
        collection: &str,
        id: &str,
        patch: Map<String, Value>,
    ) -> Result<Document, AppError> {
        let mut tx = self.pool.begin().await?;
        // Stamp first so the transaction holds the write lock before reading.
        let stamp = next_stamp(&mut tx).await?;

        let mut document = fetch_in_tx(&mut tx, collection, id)
            .await?
            .ok_or_else(|| not_found(collection, id))?;

        for (key, value) in strip_reserved(patch) {
            if value.is_null() {
                document.data.remove(&key);
            } else {
                document.data.insert(key, value);
            }
        }
        let body = encode(&document.data)?;

        sqlx::query(
            "UPDATE documents SET data = ?, updated_seq = ?, updated_at = ? WHERE collection = ? AND id = ?",
        )
        .bind(&body)
        .bind(stamp.sequence)
        .bind(stamp.recorded_at)
        .bind(collection)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        document.updated_at = stamp;
        Ok(document)
    }

    /// Delete a document, returning the stamp of the deletion.
    pub async fn delete(&self, collection: &str, id: &str) -> Result<ServerTimestamp, AppError> {
        let mut tx = self.pool.begin().await?;
        let stamp = next_stamp(&mut tx).await?;

        let result = sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(collection, id));
        }

        tx.commit().await?;
        Ok(stamp)
    }
}

/// Increment the revision ID and return it as a stamp.
async fn next_stamp(tx: &mut Transaction<'_, Sqlite>) -> Result<ServerTimestamp, AppError> {
    let now = Utc::now();
    sqlx::query("UPDATE meta SET revision_id = revision_id + 1, generated_at = ? WHERE id = 1")
        .bind(now.to_rfc3339())
        .execute(&mut **tx)
        .await?;

    let row = sqlx::query("SELECT revision_id FROM meta WHERE id = 1")
        .fetch_one(&mut **tx)
        .await?;

    Ok(ServerTimestamp::new(row.get("revision_id"), now))
}

async fn fetch_in_tx(
    tx: &mut Transaction<'_, Sqlite>,
    collection: &str,
    id: &str,
) -> Result<Option<Document>, AppError> {
    let row = sqlx::query(
        r#"SELECT id, data, created_seq, created_at, updated_seq, updated_at
           FROM documents WHERE collection = ? AND id = ?"#,
    )
    .bind(collection)
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?;

    row.as_ref().map(document_from_row).transpose()
}

fn document_from_row(row: &SqliteRow) -> Result<Document, AppError> {
    let id: String = row.get("id");
    let raw: String = row.get("data");

    let data = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            return Err(AppError::Internal(format!(
                "Document {} is not a JSON object",
                id
            )))
        }
        Err(e) => {
            return Err(AppError::Internal(format!(
                "Document {} has malformed data: {}",
                id, e
            )))
        }
    };

    Ok(Document {
        id,
        data,
        created_at: ServerTimestamp::new(row.get("created_seq"), row.get("created_at")),
        updated_at: ServerTimestamp::new(row.get("updated_seq"), row.get("updated_at")),
    })
}

fn strip_reserved(mut data: Map<String, Value>) -> Map<String, Value> {
    for key in RESERVED_KEYS {
        data.remove(key);
    }
    data
}

fn encode(data: &Map<String, Value>) -> Result<String, AppError> {
    serde_json::to_string(data)
        .map_err(|e| AppError::Internal(format!("Failed to encode document: {}", e)))
}

fn not_found(collection: &str, id: &str) -> AppError {
    AppError::NotFound(format!("Document {}/{} not found", collection, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;
    use serde_json::json;
    use tempfile::TempDir;

    async fn test_store() -> (DocumentStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_database(&temp_dir.path().join("store.sqlite"))
            .await
            .unwrap();
        (DocumentStore::new(pool), temp_dir)
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[tokio::test]
    async fn test_add_assigns_id_and_stamps() {
        let (store, _dir) = test_store().await;

        let doc = store
            .add("notes", object(json!({ "text": "hello" })))
            .await
            .unwrap();

        assert!(!doc.id.is_empty());
        assert_eq!(doc.created_at, doc.updated_at);
        assert_eq!(doc.created_at.sequence, store.revision().await.unwrap());

        let fetched = store.get("notes", &doc.id).await.unwrap().unwrap();
        assert_eq!(fetched.data["text"], "hello");
        assert_eq!(fetched.created_at.sequence, doc.created_at.sequence);
    }

    #[tokio::test]
    async fn test_reserved_keys_are_dropped() {
        let (store, _dir) = test_store().await;

        let doc = store
            .add(
                "notes",
                object(json!({ "id": "mine", "createdAt": 1, "updatedAt": 2, "text": "x" })),
            )
            .await
            .unwrap();

        assert_ne!(doc.id, "mine");
        assert_eq!(doc.data.len(), 1);
    }

    #[tokio::test]
    async fn test_list_orders_by_field_then_creation() {
        let (store, _dir) = test_store().await;

        for (name, order) in [("c", 2), ("a", 0), ("b", 2), ("d", 1)] {
            store
                .add("items", object(json!({ "name": name, "order": order })))
                .await
                .unwrap();
        }
        store
            .add("other", object(json!({ "name": "z", "order": 0 })))
            .await
            .unwrap();

        let names: Vec<String> = store
            .list("items", "order")
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.data["name"].as_str().unwrap().to_string())
            .collect();

        assert_eq!(names, vec!["a", "d", "c", "b"]);
        assert_eq!(store.count("items").await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_update_merge_is_shallow() {
        let (store, _dir) = test_store().await;

        let doc = store
            .add(
                "site",
                object(json!({ "email": "a@b.com", "social": { "github": "g", "linkedin": "l" } })),
            )
            .await
            .unwrap();

        let updated = store
            .update_merge("site", &doc.id, object(json!({ "social": { "github": "g2" } })))
            .await
            .unwrap();

        assert_eq!(updated.data["email"], "a@b.com");
        assert_eq!(updated.data["social"], json!({ "github": "g2" }));
        assert!(updated.updated_at > doc.updated_at);
        assert_eq!(updated.created_at, doc.created_at);
    }

    #[tokio::test]
    async fn test_update_merge_null_removes_key() {
        let (store, _dir) = test_store().await;

        let doc = store
            .add("experience", object(json!({ "role": "Analyst", "location": "Lusaka" })))
            .await
            .unwrap();

        store
            .update_merge("experience", &doc.id, object(json!({ "location": null })))
            .await
            .unwrap();

        let stored = store.get("experience", &doc.id).await.unwrap().unwrap();
        assert!(!stored.data.contains_key("location"));
        assert_eq!(stored.data["role"], "Analyst");
    }

    #[tokio::test]
    async fn test_update_missing_document() {
        let (store, _dir) = test_store().await;
        let before = store.revision().await.unwrap();

        let err = store
            .update_merge("items", "missing", Map::new())
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        // The failed write must not consume a revision.
        assert_eq!(store.revision().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let (store, _dir) = test_store().await;

        let doc = store.add("items", Map::new()).await.unwrap();
        store.delete("items", &doc.id).await.unwrap();

        assert!(store.get("items", &doc.id).await.unwrap().is_none());
        assert!(store.delete("items", &doc.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_set_keeps_creation_stamp() {
        let (store, _dir) = test_store().await;

        let first = store
            .set("site", "metadata", object(json!({ "name": "One", "phone": "1" })))
            .await
            .unwrap();
        let second = store
            .set("site", "metadata", object(json!({ "name": "Two" })))
            .await
            .unwrap();

        assert_eq!(second.id, "metadata");
        assert_eq!(second.created_at, first.created_at);
        assert!(second.updated_at > first.updated_at);
        assert!(second.data.get("phone").is_none());
    }

    #[tokio::test]
    async fn test_closed_pool_is_store_unavailable() {
        let (store, _dir) = test_store().await;
        store.close().await;

        let err = store.list("items", "order").await.unwrap_err();
        assert_eq!(err.error_code(), "STORE_UNAVAILABLE");
    }
}
