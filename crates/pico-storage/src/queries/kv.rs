// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key-value operations on the `kv_store` table.

use pico_core::PicoError;
use rusqlite::{OptionalExtension, params};

use crate::database::Database;

/// Read the value stored under `key`.
pub async fn get_value(db: &Database, key: &str) -> Result<Option<String>, PicoError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Insert or replace the value under `key`.
pub async fn put_value(db: &Database, key: &str, value: &str) -> Result<(), PicoError> {
    let key = key.to_string();
    let value = value.to_string();
    let now = chrono::Utc::now().to_rfc3339();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, now],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete `key` if present.
pub async fn remove_value(db: &Database, key: &str) -> Result<(), PicoError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// All keys starting with `prefix`, in ascending order.
pub async fn keys_with_prefix(db: &Database, prefix: &str) -> Result<Vec<String>, PicoError> {
    let prefix = prefix.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare("SELECT key FROM kv_store ORDER BY key")?;
            let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
            let mut keys = Vec::new();
            for key in rows {
                let key = key?;
                if key.starts_with(&prefix) {
                    keys.push(key);
                }
            }
            Ok(keys)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn test_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kv.db");
        let db = Database::open(path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn missing_key_is_none() {
        let (db, _dir) = test_db().await;
        assert_eq!(get_value(&db, "reports:hiring").await.unwrap(), None);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn put_replaces_previous_value() {
        let (db, _dir) = test_db().await;
        put_value(&db, "memos", "[]").await.unwrap();
        put_value(&db, "memos", "[{\"id\":\"memo-1\"}]").await.unwrap();
        assert_eq!(
            get_value(&db, "memos").await.unwrap().as_deref(),
            Some("[{\"id\":\"memo-1\"}]")
        );
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn remove_missing_key_is_ok() {
        let (db, _dir) = test_db().await;
        remove_value(&db, "nothing").await.unwrap();
        put_value(&db, "customers", "[]").await.unwrap();
        remove_value(&db, "customers").await.unwrap();
        assert_eq!(get_value(&db, "customers").await.unwrap(), None);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn prefix_listing_is_sorted_and_filtered() {
        let (db, _dir) = test_db().await;
        put_value(&db, "reports:product", "[]").await.unwrap();
        put_value(&db, "memos", "[]").await.unwrap();
        put_value(&db, "reports:hiring", "[]").await.unwrap();

        let keys = keys_with_prefix(&db, "reports:").await.unwrap();
        assert_eq!(keys, vec!["reports:hiring", "reports:product"]);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn values_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("persist.db");
        let path = path.to_str().unwrap();

        let db = Database::open(path).await.unwrap();
        put_value(&db, "memos", "[\"kept\"]").await.unwrap();
        db.close().await.unwrap();

        let db = Database::open(path).await.unwrap();
        assert_eq!(
            get_value(&db, "memos").await.unwrap().as_deref(),
            Some("[\"kept\"]")
        );
        db.close().await.unwrap();
    }
}
