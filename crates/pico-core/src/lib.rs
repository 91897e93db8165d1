// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Pico pharmacy assistant.
//!
//! This crate provides the adapter traits, the error type, domain entities,
//! and the per-panel form shapes shared by every other Pico crate.

pub mod error;
pub mod forms;
pub mod traits;
pub mod types;

pub use error::PicoError;
pub use forms::{ContentForm, ContentKind, ReportForm};
pub use types::{AdapterType, HealthStatus, MessageId, ReportType};

pub use traits::{
    CompletionProvider, ImageProvider, PluginAdapter, StorageAdapter, SupplierAdapter,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pico_error_has_all_variants() {
        let _config = PicoError::Config("test".into());
        let _storage = PicoError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _provider = PicoError::Provider {
            message: "test".into(),
            source: None,
        };
        let _malformed = PicoError::MalformedResponse {
            message: "test".into(),
            raw: "{".into(),
        };
        let _validation = PicoError::Validation("test".into());
        let _file = PicoError::UnsupportedFile {
            file_name: "a.pdf".into(),
            mime_type: "application/pdf".into(),
        };
        let _tools = PicoError::ToolLimitExceeded { iterations: 5 };
        let _missing = PicoError::NotFound {
            kind: "report",
            id: "report-1".into(),
        };
        let _timeout = PicoError::Timeout {
            duration: std::time::Duration::from_secs(30),
        };
        let _internal = PicoError::Internal("test".into());
    }

    #[test]
    fn adapter_type_round_trip() {
        use std::str::FromStr;

        for variant in [AdapterType::Provider, AdapterType::Storage, AdapterType::Supplier] {
            let s = variant.to_string();
            let parsed = AdapterType::from_str(&s).expect("should parse back");
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn health_status_variants() {
        let healthy = HealthStatus::Healthy;
        let degraded = HealthStatus::Degraded("slow".into());
        let unhealthy = HealthStatus::Unhealthy("down".into());

        assert_eq!(healthy, HealthStatus::Healthy);
        assert_ne!(degraded, healthy);
        assert_ne!(unhealthy, healthy);
    }

    #[test]
    fn all_trait_modules_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_completion_provider<T: CompletionProvider>() {}
        fn _assert_image_provider<T: ImageProvider>() {}
        fn _assert_storage_adapter<T: StorageAdapter>() {}
        fn _assert_supplier_adapter<T: SupplierAdapter>() {}
    }
}
