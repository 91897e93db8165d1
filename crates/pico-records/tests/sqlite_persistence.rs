// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record stores backed by a real SQLite database.

use std::sync::Arc;

use pico_config::model::StorageConfig;
use pico_core::forms::ProductForm;
use pico_core::types::ReportDraft;
use pico_core::{ReportForm, ReportType, StorageAdapter};
use pico_records::{CustomerRegistry, MemoStore, ReportStore};
use pico_storage::SqliteStorage;

async fn open(dir: &std::path::Path) -> Arc<SqliteStorage> {
    let storage = SqliteStorage::new(StorageConfig {
        database_path: dir.join("records.db").display().to_string(),
        wal_mode: true,
    });
    storage.initialize().await.unwrap();
    Arc::new(storage)
}

#[tokio::test]
async fn records_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();

    let report_id;
    {
        let storage = open(dir.path()).await;
        let reports = ReportStore::new(storage.clone());
        let memos = MemoStore::new(storage.clone());
        let customers = CustomerRegistry::new(storage.clone());

        report_id = reports
            .add(
                ReportType::Product,
                ReportDraft::new(
                    "피코 약국 맞춤 제품 추천",
                    "추천 내용",
                    ReportForm::Product(ProductForm::default()),
                ),
            )
            .await
            .unwrap()
            .id;
        memos.add("재고 확인").await.unwrap();
        assert!(customers.delete("cust_001").await);
        storage.close().await.unwrap();
    }

    let storage = open(dir.path()).await;
    let reports = ReportStore::new(storage.clone());
    let memos = MemoStore::new(storage.clone());
    let customers = CustomerRegistry::new(storage.clone());

    let stored = reports.get(ReportType::Product, &report_id).await.unwrap();
    assert_eq!(stored.title, "피코 약국 맞춤 제품 추천");
    assert_eq!(memos.list().await[0].content, "재고 확인");
    let ids: Vec<_> = customers.list().await.into_iter().map(|c| c.id).collect();
    assert_eq!(ids, vec!["cust_002", "cust_003"]);
}
