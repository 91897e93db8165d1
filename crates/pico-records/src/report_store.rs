// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable reports, one storage partition per report type.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use pico_core::types::{Report, ReportDraft};
use pico_core::{PicoError, ReportType, StorageAdapter};
use strum::IntoEnumIterator;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::ids::IdClock;
use crate::partition;

/// Report CRUD over lazily loaded per-type partitions.
///
/// Each partition is read from storage on first access. After that the
/// in-memory list is authoritative: a failed write is logged and the
/// change is kept for the rest of the process.
pub struct ReportStore {
    storage: Arc<dyn StorageAdapter>,
    partitions: Mutex<HashMap<ReportType, Vec<Report>>>,
    ids: IdClock,
}

impl ReportStore {
    pub fn new(storage: Arc<dyn StorageAdapter>) -> Self {
        Self {
            storage,
            partitions: Mutex::new(HashMap::new()),
            ids: IdClock::new("report"),
        }
    }

    /// Load every partition not yet cached.
    ///
    /// All partitions are read together so the id clock has seen every
    /// stored id before the first new one is issued. A partition whose
    /// read fails stays uncached and is retried on the next access.
    async fn load_missing(&self, partitions: &mut HashMap<ReportType, Vec<Report>>) {
        for report_type in ReportType::iter() {
            if partitions.contains_key(&report_type) {
                continue;
            }
            let key = report_type.storage_key();
            let Some(loaded) = partition::load::<Report>(self.storage.as_ref(), &key)
                .await
                .usable()
            else {
                continue;
            };
            for report in &loaded {
                self.ids.observe(&report.id);
            }
            debug!(%report_type, count = loaded.len(), "loaded report partition");
            partitions.insert(report_type, loaded);
        }
    }

    /// Run `f` against the loaded partition for `report_type`, persisting
    /// afterwards when `f` reports a change.
    ///
    /// Returns `None` without calling `f` when the partition cannot be read.
    async fn with_partition<R>(
        &self,
        report_type: ReportType,
        f: impl FnOnce(&mut Vec<Report>) -> (R, bool),
    ) -> Option<R> {
        let mut partitions = self.partitions.lock().await;
        if !partitions.contains_key(&report_type) {
            self.load_missing(&mut partitions).await;
        }
        let reports = partitions.get_mut(&report_type)?;

        let (result, changed) = f(reports);
        if changed {
            partition::persist(self.storage.as_ref(), &report_type.storage_key(), reports).await;
        }
        Some(result)
    }

    /// Reports of one type in insertion order.
    pub async fn list(&self, report_type: ReportType) -> Vec<Report> {
        self.with_partition(report_type, |reports| (reports.clone(), false))
            .await
            .unwrap_or_default()
    }

    /// Reports of one type, newest first.
    pub async fn list_recent(&self, report_type: ReportType) -> Vec<Report> {
        let mut reports = self.list(report_type).await;
        reports.reverse();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        reports
    }

    /// Reports of every type, newest first.
    pub async fn list_all_recent(&self) -> Vec<Report> {
        let mut all = Vec::new();
        for report_type in ReportType::iter() {
            all.extend(self.list(report_type).await);
        }
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        all
    }

    pub async fn get(&self, report_type: ReportType, id: &str) -> Option<Report> {
        self.with_partition(report_type, |reports| {
            (reports.iter().find(|r| r.id == id).cloned(), false)
        })
        .await
        .flatten()
    }

    /// Find a report by id across all types.
    pub async fn find(&self, id: &str) -> Option<Report> {
        for report_type in ReportType::iter() {
            if let Some(report) = self.get(report_type, id).await {
                return Some(report);
            }
        }
        None
    }

    /// Append a new report built from `draft` and persist the partition.
    ///
    /// The draft's form must belong to `report_type`. Fails with
    /// `PicoError::Storage` when the partition cannot be read, so stored
    /// reports are never overwritten by a partial list.
    pub async fn add(&self, report_type: ReportType, draft: ReportDraft) -> Result<Report, PicoError> {
        if draft.report_type() != report_type {
            return Err(PicoError::Validation(format!(
                "a {} form cannot be stored as a {report_type} report",
                draft.report_type()
            )));
        }

        let report = self
            .with_partition(report_type, |reports| {
                let report = Report {
                    id: self.ids.next(),
                    report_type,
                    title: draft.title,
                    content: draft.content,
                    sub_type: draft.sub_type,
                    form: draft.form,
                    image: draft.image,
                    sources: draft.sources,
                    created_at: Utc::now(),
                };
                reports.push(report.clone());
                (report, true)
            })
            .await
            .ok_or_else(|| partition::unavailable(&report_type.storage_key()))?;
        debug!(id = %report.id, %report_type, "report added");
        Ok(report)
    }

    /// Replace the stored report with the same id.
    ///
    /// The stored type and creation time are kept. Returns `false` (and
    /// writes nothing) when no report matches.
    pub async fn update(&self, report: Report) -> bool {
        let report_type = report.report_type;
        let updated = self
            .with_partition(report_type, |reports| {
                let Some(existing) = reports.iter_mut().find(|r| r.id == report.id) else {
                    return (false, false);
                };
                existing.title = report.title;
                existing.content = report.content;
                existing.image = report.image;
                existing.sources = report.sources;
                if report.form.report_type() == existing.report_type {
                    existing.sub_type = report.form.content_kind();
                    existing.form = report.form;
                } else {
                    warn!(id = %existing.id, "ignoring form of a different report type");
                }
                (true, true)
            })
            .await
            .unwrap_or(false);
        if !updated {
            debug!(%report_type, "update of unknown report ignored");
        }
        updated
    }

    /// Remove the report with `id`. Returns `false` when absent.
    pub async fn delete(&self, report_type: ReportType, id: &str) -> bool {
        self.with_partition(report_type, |reports| {
            let before = reports.len();
            reports.retain(|r| r.id != id);
            let removed = reports.len() != before;
            (removed, removed)
        })
        .await
        .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pico_core::forms::{
        BlogForm, CustomerMessageForm, HiringForm, LaborSnapshot, MedicationForm, ProductForm,
        WorkReportForm,
    };
    use pico_core::types::Citation;
    use pico_core::{ContentForm, ReportForm};
    use pico_test_utils::MemoryStorage;
    use proptest::prelude::*;

    fn hiring_draft(title: &str) -> ReportDraft {
        ReportDraft::new(title, "본문", ReportForm::Hiring(HiringForm::default()))
    }

    fn draft_for(report_type: ReportType, title: &str) -> ReportDraft {
        let form = match report_type {
            ReportType::Hiring => ReportForm::Hiring(HiringForm::default()),
            ReportType::Product => ReportForm::Product(ProductForm::default()),
            ReportType::Labor => ReportForm::Labor(LaborSnapshot::default()),
            ReportType::Content => ReportForm::Content(ContentForm::default()),
            ReportType::Medication => ReportForm::Medication(MedicationForm::default()),
            ReportType::Customer => {
                ReportForm::Customer(CustomerMessageForm::new("cust_001", "김민준"))
            }
            ReportType::WorkReport => ReportForm::WorkReport(WorkReportForm::default()),
        };
        ReportDraft::new(title, "본문", form)
    }

    fn store() -> (ReportStore, MemoryStorage) {
        let storage = MemoryStorage::new();
        (ReportStore::new(Arc::new(storage.clone())), storage)
    }

    #[tokio::test]
    async fn missing_partition_is_empty() {
        let (store, _) = store();
        assert!(store.list(ReportType::Hiring).await.is_empty());
    }

    #[tokio::test]
    async fn corrupt_partition_is_empty() {
        let (store, storage) = store();
        storage.set_raw("reports:product", "{not json").await;
        assert!(store.list(ReportType::Product).await.is_empty());
    }

    #[tokio::test]
    async fn add_assigns_id_and_persists() {
        let (store, storage) = store();
        let report = store
            .add(ReportType::Hiring, hiring_draft("채용 공고"))
            .await
            .unwrap();

        assert!(report.id.starts_with("report-"));
        assert_eq!(report.report_type, ReportType::Hiring);
        let raw = storage.raw("reports:hiring").await.unwrap();
        let persisted: Vec<Report> = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted, vec![report]);
    }

    #[tokio::test]
    async fn add_rejects_mismatched_form() {
        let (store, storage) = store();
        let err = store
            .add(ReportType::Product, hiring_draft("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, PicoError::Validation(_)));
        assert_eq!(storage.write_count(), 0);
    }

    #[tokio::test]
    async fn ids_are_unique_and_increasing() {
        let (store, _) = store();
        let mut ids = Vec::new();
        for i in 0..20 {
            let r = store
                .add(ReportType::Hiring, hiring_draft(&format!("r{i}")))
                .await
                .unwrap();
            ids.push(r.id);
        }
        let numbers: Vec<i64> = ids
            .iter()
            .map(|id| id.trim_start_matches("report-").parse().unwrap())
            .collect();
        assert!(numbers.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn list_recent_is_newest_first() {
        let (store, _) = store();
        let a = store.add(ReportType::Hiring, hiring_draft("a")).await.unwrap();
        let b = store.add(ReportType::Hiring, hiring_draft("b")).await.unwrap();
        let c = store.add(ReportType::Hiring, hiring_draft("c")).await.unwrap();

        let ids: Vec<_> = store
            .list(ReportType::Hiring)
            .await
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![a.id.clone(), b.id.clone(), c.id.clone()]);

        let recent: Vec<_> = store
            .list_recent(ReportType::Hiring)
            .await
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(recent, vec![c.id, b.id, a.id]);
    }

    #[tokio::test]
    async fn update_replaces_content_and_keeps_identity() {
        let (store, _) = store();
        let original = store
            .add(
                ReportType::Content,
                ReportDraft::new(
                    "블로그: 환절기",
                    "초안",
                    ReportForm::Content(ContentForm::Blog(BlogForm::default())),
                ),
            )
            .await
            .unwrap();

        let mut edited = original.clone();
        edited.content = "수정본".to_string();
        edited.sources = vec![Citation {
            uri: "https://example.org".into(),
            title: None,
        }];
        edited.created_at = Utc::now() + chrono::Duration::days(3);
        assert!(store.update(edited).await);

        let stored = store.get(ReportType::Content, &original.id).await.unwrap();
        assert_eq!(stored.content, "수정본");
        assert_eq!(stored.sources.len(), 1);
        assert_eq!(stored.created_at, original.created_at);
        assert_eq!(stored.sub_type, original.sub_type);
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_a_silent_no_op() {
        let (store, storage) = store();
        let report = store.add(ReportType::Hiring, hiring_draft("a")).await.unwrap();
        let writes = storage.write_count();

        let mut ghost = report.clone();
        ghost.id = "report-1".to_string();
        ghost.content = "ghost".to_string();
        assert!(!store.update(ghost).await);
        assert_eq!(storage.write_count(), writes);
        assert_eq!(store.list(ReportType::Hiring).await, vec![report]);
    }

    #[tokio::test]
    async fn update_ignores_form_of_another_type() {
        let (store, _) = store();
        let report = store.add(ReportType::Hiring, hiring_draft("a")).await.unwrap();
        let mut edited = report.clone();
        edited.form = ReportForm::Product(ProductForm::default());
        edited.title = "new".to_string();
        assert!(store.update(edited).await);
        let stored = store.get(ReportType::Hiring, &report.id).await.unwrap();
        assert_eq!(stored.title, "new");
        assert!(matches!(stored.form, ReportForm::Hiring(_)));
    }

    #[tokio::test]
    async fn delete_removes_and_ignores_missing() {
        let (store, storage) = store();
        let a = store.add(ReportType::Hiring, hiring_draft("a")).await.unwrap();
        let b = store.add(ReportType::Hiring, hiring_draft("b")).await.unwrap();

        assert!(store.delete(ReportType::Hiring, &a.id).await);
        let writes = storage.write_count();
        assert!(!store.delete(ReportType::Hiring, &a.id).await);
        assert_eq!(storage.write_count(), writes);
        assert_eq!(store.list(ReportType::Hiring).await, vec![b]);
    }

    #[tokio::test]
    async fn write_failure_keeps_in_memory_state() {
        let (store, storage) = store();
        storage.fail_writes(true);
        let report = store.add(ReportType::Hiring, hiring_draft("a")).await.unwrap();
        assert_eq!(store.list(ReportType::Hiring).await, vec![report]);
        assert!(storage.raw("reports:hiring").await.is_none());
    }

    #[tokio::test]
    async fn partitions_are_independent() {
        let (store, _) = store();
        store.add(ReportType::Hiring, hiring_draft("a")).await.unwrap();
        store
            .add(
                ReportType::WorkReport,
                ReportDraft::new("일일", "x", ReportForm::WorkReport(WorkReportForm::default())),
            )
            .await
            .unwrap();
        assert_eq!(store.list(ReportType::Hiring).await.len(), 1);
        assert_eq!(store.list(ReportType::WorkReport).await.len(), 1);
        assert_eq!(store.list_all_recent().await.len(), 2);
    }

    #[tokio::test]
    async fn reload_from_storage_continues_ids() {
        let storage = MemoryStorage::new();
        let first = ReportStore::new(Arc::new(storage.clone()));
        let old = first.add(ReportType::Hiring, hiring_draft("a")).await.unwrap();

        let second = ReportStore::new(Arc::new(storage.clone()));
        let new = second.add(ReportType::Hiring, hiring_draft("b")).await.unwrap();
        assert_ne!(old.id, new.id);
        let listed = second.list(ReportType::Hiring).await;
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, old.id);
    }

    #[tokio::test]
    async fn read_failure_never_overwrites_stored_reports() {
        let storage = MemoryStorage::new();
        let first = ReportStore::new(Arc::new(storage.clone()));
        first.add(ReportType::Hiring, hiring_draft("a")).await.unwrap();
        first.add(ReportType::Hiring, hiring_draft("b")).await.unwrap();

        let second = ReportStore::new(Arc::new(storage.clone()));
        storage.fail_reads(true);
        assert!(second.list(ReportType::Hiring).await.is_empty());
        let err = second
            .add(ReportType::Hiring, hiring_draft("lost"))
            .await
            .unwrap_err();
        assert!(matches!(err, PicoError::Storage { .. }));
        assert!(!second.delete(ReportType::Hiring, "report-1").await);
        assert_eq!(storage.write_count(), 2);

        // Once storage recovers the partition is loaded, not replaced.
        storage.fail_reads(false);
        second.add(ReportType::Hiring, hiring_draft("c")).await.unwrap();
        let raw = storage.raw("reports:hiring").await.unwrap();
        let persisted: Vec<Report> = serde_json::from_str(&raw).unwrap();
        let titles: Vec<_> = persisted.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn list_is_idempotent() {
        let (store, storage) = store();
        store.add(ReportType::Labor, draft_for(ReportType::Labor, "a")).await.unwrap();
        store.add(ReportType::Labor, draft_for(ReportType::Labor, "b")).await.unwrap();
        let writes = storage.write_count();

        let first = store.list(ReportType::Labor).await;
        let second = store.list(ReportType::Labor).await;
        assert_eq!(first, second);
        assert_eq!(storage.write_count(), writes);
    }

    #[tokio::test]
    async fn ids_increase_across_partitions_after_reload() {
        let storage = MemoryStorage::new();
        let first = ReportStore::new(Arc::new(storage.clone()));
        let mut newest = String::new();
        for _ in 0..5 {
            newest = first
                .add(ReportType::Medication, draft_for(ReportType::Medication, "m"))
                .await
                .unwrap()
                .id;
        }
        // Pretend the stored ids lie in the future relative to the clock.
        let raw = storage.raw("reports:medication").await.unwrap();
        storage
            .set_raw("reports:medication", &raw.replace(&newest, "report-99999999999999"))
            .await;

        let second = ReportStore::new(Arc::new(storage.clone()));
        let added = second
            .add(ReportType::Hiring, hiring_draft("first touch is another type"))
            .await
            .unwrap();
        assert_eq!(added.id, "report-100000000000000");
    }

    fn run<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(future)
    }

    proptest! {
        #[test]
        fn add_touches_only_its_own_partition(
            seeded in proptest::collection::vec(0usize..7, 0..12),
            target in 0usize..7,
        ) {
            let types: Vec<ReportType> = ReportType::iter().collect();
            let target = types[target];
            run(async {
                let (store, _) = store();
                for (i, t) in seeded.iter().enumerate() {
                    let t = types[*t];
                    store.add(t, draft_for(t, &format!("seed {i}"))).await.unwrap();
                }
                let mut before = HashMap::new();
                for t in ReportType::iter() {
                    before.insert(t, store.list(t).await);
                }

                let added = store.add(target, draft_for(target, "new")).await.unwrap();

                for t in ReportType::iter() {
                    let after = store.list(t).await;
                    if t == target {
                        assert_eq!(after.len(), before[&t].len() + 1);
                        assert_eq!(after.last(), Some(&added));
                        assert_eq!(store.list_recent(t).await.first(), Some(&added));
                    } else {
                        assert_eq!(after, before[&t]);
                    }
                }
            });
        }
    }
}
