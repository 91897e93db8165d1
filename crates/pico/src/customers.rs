// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `pico customers` command implementation.

use chrono::Local;
use colored::Colorize;
use pico_core::PicoError;
use pico_core::types::{Customer, CustomerDraft, Gender};
use pico_panels::SubmitOutcome;
use pico_panels::customer::{message_request, save_message_to_profile};
use pico_records::search;

use crate::app::AppContext;
use crate::reports::confirm;

pub async fn run_list(ctx: &AppContext, term: Option<&str>) {
    let customers = ctx.customers.list().await;
    let customers = match term {
        Some(term) => search(&customers, term),
        None => customers,
    };
    if customers.is_empty() {
        println!("{}", "고객이 없습니다.".dimmed());
        return;
    }
    for customer in &customers {
        println!("{}", summary_line(customer));
    }
}

fn summary_line(customer: &Customer) -> String {
    format!(
        "{}  {} ({}세, {})  [{}]  최근 방문 {}",
        customer.id.dimmed(),
        customer.name.bold(),
        customer.age,
        customer.gender,
        customer.tags.join(", "),
        customer.last_visit
    )
}

pub async fn run_add(
    ctx: &AppContext,
    name: &str,
    age: u32,
    gender: Gender,
    tags: Vec<String>,
    notes: &str,
) -> Result<(), PicoError> {
    if name.trim().is_empty() {
        return Err(PicoError::Validation("customer name is empty".into()));
    }
    let customer = ctx
        .customers
        .add(CustomerDraft {
            name: name.trim().to_string(),
            age,
            gender,
            tags,
            notes: notes.to_string(),
        })
        .await?;
    println!("{} {}", "고객 등록:".green(), summary_line(&customer));
    Ok(())
}

pub async fn run_delete(ctx: &AppContext, id: &str) -> Result<(), PicoError> {
    if ctx.customers.delete(id).await {
        println!("{} {id}", "고객 삭제:".green());
        Ok(())
    } else {
        Err(PicoError::NotFound {
            kind: "customer",
            id: id.to_string(),
        })
    }
}

/// Generates a message for one customer and offers to log it.
pub async fn run_message(
    ctx: &AppContext,
    id: &str,
    message_type: &str,
    save: bool,
) -> Result<(), PicoError> {
    let request = message_request(&ctx.customers, id, message_type).await?;
    let mut panel = ctx.panel(request.report_type());

    let report = match panel.submit(&request, &[], Local::now().date_naive()).await? {
        SubmitOutcome::Saved(report) => report,
        SubmitOutcome::Failed { error, content } => {
            eprintln!("{}", content.red());
            return Err(error);
        }
        SubmitOutcome::Discarded => return Ok(()),
    };

    println!("{}\n", report.title.bold());
    println!("{}", report.content);

    if save || confirm("고객 소통 기록에 저장할까요?")? {
        let customer = save_message_to_profile(&ctx.customers, &report, &report.content).await?;
        println!(
            "{} {} ({}건)",
            "소통 기록 저장:".green(),
            customer.name,
            customer.communication_history.len()
        );
    }
    Ok(())
}
