// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `pico memo` command implementation.

use colored::Colorize;
use pico_core::PicoError;

use crate::app::AppContext;
use crate::render_time;

pub async fn run_add(ctx: &AppContext, content: &str) -> Result<(), PicoError> {
    match ctx.memos.add(content).await {
        Some(memo) => {
            println!("{} {}", "메모 추가:".green(), memo.id);
            Ok(())
        }
        None => Err(PicoError::Validation("memo content is empty".into())),
    }
}

pub async fn run_list(ctx: &AppContext) {
    let memos = ctx.memos.list_recent().await;
    if memos.is_empty() {
        println!("{}", "메모가 없습니다.".dimmed());
        return;
    }
    for memo in memos {
        println!(
            "{}  {}  {}",
            memo.id.dimmed(),
            render_time(memo.created_at),
            memo.content
        );
    }
}

pub async fn run_delete(ctx: &AppContext, id: &str) -> Result<(), PicoError> {
    if ctx.memos.delete(id).await {
        println!("{} {id}", "메모 삭제:".green());
        Ok(())
    } else {
        Err(PicoError::NotFound {
            kind: "memo",
            id: id.to_string(),
        })
    }
}
