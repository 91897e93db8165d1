// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Customer messaging on top of the panel cycle.

use pico_core::ReportForm;
use pico_core::error::PicoError;
use pico_core::types::{Customer, Report};
use pico_records::CustomerRegistry;
use tracing::info;

use crate::generate::PanelRequest;

/// Builds a message request for the customer with `customer_id`.
pub async fn message_request(
    registry: &CustomerRegistry,
    customer_id: &str,
    message_type: &str,
) -> Result<PanelRequest, PicoError> {
    let customer = registry
        .get(customer_id)
        .await
        .ok_or_else(|| PicoError::NotFound {
            kind: "customer",
            id: customer_id.to_string(),
        })?;
    Ok(PanelRequest::Customer {
        customer,
        message_type: message_type.to_string(),
    })
}

/// Records a generated message in the addressed customer's history.
///
/// `message` is the text actually sent, which may differ from the saved
/// report after hand edits.
pub async fn save_message_to_profile(
    registry: &CustomerRegistry,
    report: &Report,
    message: &str,
) -> Result<Customer, PicoError> {
    let ReportForm::Customer(form) = &report.form else {
        return Err(PicoError::Validation(format!(
            "report {} is not a customer message",
            report.id
        )));
    };
    let customer = registry
        .record_communication(&form.customer_id, &form.message_type, message)
        .await
        .ok_or_else(|| PicoError::NotFound {
            kind: "customer",
            id: form.customer_id.clone(),
        })?;
    info!(customer = %customer.id, kind = %form.message_type, "message saved to profile");
    Ok(customer)
}
