// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Customer registry seeded from fixtures on first run.

use std::sync::Arc;

use chrono::{Local, Utc};
use pico_core::types::{CommunicationRecord, Customer, CustomerDraft};
use pico_core::{PicoError, StorageAdapter};
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info};

use crate::ids::IdClock;
use crate::partition::{self, Loaded};

/// Storage key of the customer list.
pub const CUSTOMERS_KEY: &str = "customers";

/// Customer CRUD persisted as one list under [`CUSTOMERS_KEY`].
///
/// A missing or malformed list is replaced by the fixture customers. A
/// list that storage fails to return is neither seeded nor overwritten.
pub struct CustomerRegistry {
    storage: Arc<dyn StorageAdapter>,
    customers: OnceCell<Mutex<Vec<Customer>>>,
    ids: IdClock,
}

impl CustomerRegistry {
    pub fn new(storage: Arc<dyn StorageAdapter>) -> Self {
        Self {
            storage,
            customers: OnceCell::new(),
            ids: IdClock::new("cust"),
        }
    }

    /// The cached customer list, loading or seeding it on first use.
    ///
    /// `None` while storage cannot be read: nothing is seeded or cached,
    /// so the next call tries again.
    async fn customers(&self) -> Option<&Mutex<Vec<Customer>>> {
        self.customers
            .get_or_try_init(|| async {
                let customers = match partition::load(self.storage.as_ref(), CUSTOMERS_KEY).await {
                    Loaded::Present(customers) => customers,
                    Loaded::Missing | Loaded::Corrupt => {
                        info!("seeding customer registry from fixtures");
                        pico_pharmacy::fixtures::customers()
                    }
                    Loaded::Unavailable => return Err(partition::unavailable(CUSTOMERS_KEY)),
                };
                for customer in &customers {
                    self.ids.observe(&customer.id);
                }
                Ok(Mutex::new(customers))
            })
            .await
            .ok()
    }

    async fn save(&self, customers: &[Customer]) {
        partition::persist(self.storage.as_ref(), CUSTOMERS_KEY, customers).await;
    }

    /// Customers in stored order (newest additions first).
    pub async fn list(&self) -> Vec<Customer> {
        match self.customers().await {
            Some(customers) => customers.lock().await.clone(),
            None => Vec::new(),
        }
    }

    pub async fn get(&self, id: &str) -> Option<Customer> {
        self.customers()
            .await?
            .lock()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    /// Register a new customer at the front of the list.
    ///
    /// Fails with `PicoError::Storage` when the stored list cannot be read.
    pub async fn add(&self, draft: CustomerDraft) -> Result<Customer, PicoError> {
        let mut customers = self
            .customers()
            .await
            .ok_or_else(|| partition::unavailable(CUSTOMERS_KEY))?
            .lock()
            .await;
        let customer = Customer {
            id: self.ids.next(),
            name: draft.name,
            age: draft.age,
            gender: draft.gender,
            tags: draft.tags,
            notes: draft.notes,
            last_visit: Local::now().date_naive(),
            total_spent: 0,
            purchase_history: Vec::new(),
            communication_history: Vec::new(),
        };
        customers.insert(0, customer.clone());
        self.save(&customers).await;
        debug!(id = %customer.id, "customer added");
        Ok(customer)
    }

    /// Replace the customer with the same id. Returns `false` when absent.
    pub async fn update(&self, customer: Customer) -> bool {
        let Some(customers) = self.customers().await else {
            return false;
        };
        let mut customers = customers.lock().await;
        let Some(slot) = customers.iter_mut().find(|c| c.id == customer.id) else {
            return false;
        };
        *slot = customer;
        self.save(&customers).await;
        true
    }

    /// Remove the customer with `id`. Returns `false` when absent.
    pub async fn delete(&self, id: &str) -> bool {
        let Some(customers) = self.customers().await else {
            return false;
        };
        let mut customers = customers.lock().await;
        let before = customers.len();
        customers.retain(|c| c.id != id);
        if customers.len() == before {
            return false;
        }
        self.save(&customers).await;
        true
    }

    /// Prepend a sent message to the customer's communication history.
    pub async fn record_communication(
        &self,
        id: &str,
        kind: &str,
        message: &str,
    ) -> Option<Customer> {
        let mut customers = self.customers().await?.lock().await;
        let customer = customers.iter_mut().find(|c| c.id == id)?;
        customer.communication_history.insert(
            0,
            CommunicationRecord {
                date: Utc::now(),
                kind: kind.to_string(),
                message: message.to_string(),
            },
        );
        let updated = customer.clone();
        self.save(&customers).await;
        Some(updated)
    }
}

/// Customers whose name or any tag contains `term`, ignoring case, sorted by name.
///
/// A blank term matches everyone.
pub fn search(customers: &[Customer], term: &str) -> Vec<Customer> {
    let term = term.trim();
    let mut found: Vec<Customer> = customers
        .iter()
        .filter(|c| term.is_empty() || c.matches(term))
        .cloned()
        .collect();
    found.sort_by(|a, b| a.name.cmp(&b.name));
    found
}
