// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Application context shared by every command.
//!
//! Built once at startup and passed by reference; nothing here is global.

use std::sync::Arc;

use pico_agent::{ChatSession, ContentGateway, PlaceOrderTool, ToolRegistry, load_system_instruction};
use pico_config::PicoConfig;
use pico_core::types::ReportType;
use pico_core::{CompletionProvider, ImageProvider, PicoError, StorageAdapter};
use pico_gemini::GeminiProvider;
use pico_panels::PanelController;
use pico_pharmacy::{PharmacyDataProvider, SimulatedSupplier};
use pico_records::{CustomerRegistry, MemoStore, ReportStore};
use pico_storage::SqliteStorage;
use tracing::{debug, info};

pub struct AppContext {
    pub config: PicoConfig,
    pub storage: Arc<dyn StorageAdapter>,
    pub reports: Arc<ReportStore>,
    pub memos: MemoStore,
    pub customers: CustomerRegistry,
    pub pharmacy: PharmacyDataProvider,
    pub supplier: Arc<SimulatedSupplier>,
    pub gateway: Arc<ContentGateway>,
}

impl AppContext {
    /// Opens the SQLite store and the Gemini provider named in `config`.
    pub async fn open(config: PicoConfig) -> Result<Self, PicoError> {
        let storage = SqliteStorage::new(config.storage.clone());
        storage.initialize().await?;
        info!(path = %config.storage.database_path, "storage ready");

        let provider = Arc::new(GeminiProvider::new(&config)?);
        Self::with_parts(config, Arc::new(storage), provider.clone(), provider).await
    }

    /// Assembles the context around already-initialized adapters.
    pub async fn with_parts(
        config: PicoConfig,
        storage: Arc<dyn StorageAdapter>,
        completions: Arc<dyn CompletionProvider>,
        images: Arc<dyn ImageProvider>,
    ) -> Result<Self, PicoError> {
        let instruction = load_system_instruction(
            &config.agent.system_instruction,
            &config.agent.system_instruction_file,
        )
        .await;
        let gateway = Arc::new(
            ContentGateway::new(completions, images, instruction)
                .with_text_model(config.gemini.text_model.clone()),
        );

        let pharmacy = PharmacyDataProvider::new(config.pharmacy.clone());
        debug!(
            inventory = pharmacy.inventory().len(),
            sales = pharmacy.sales_history().len(),
            "mock pharmacy data generated"
        );

        Ok(Self {
            reports: Arc::new(ReportStore::new(storage.clone())),
            memos: MemoStore::new(storage.clone()),
            customers: CustomerRegistry::new(storage.clone()),
            supplier: Arc::new(SimulatedSupplier::new(&config.supplier)),
            pharmacy,
            gateway,
            storage,
            config,
        })
    }

    /// A fresh chat session with the ordering tool registered.
    pub fn chat_session(&self) -> ChatSession {
        let mut tools = ToolRegistry::new();
        tools.register(Arc::new(PlaceOrderTool::new(self.supplier.clone())));
        ChatSession::from_config(self.gateway.clone(), Arc::new(tools), &self.config.chat)
    }

    pub fn panel(&self, report_type: ReportType) -> PanelController {
        PanelController::new(report_type, self.reports.clone(), self.gateway.clone())
    }

    /// Flushes storage before exit.
    pub async fn shutdown(&self) -> Result<(), PicoError> {
        self.storage.close().await
    }
}
