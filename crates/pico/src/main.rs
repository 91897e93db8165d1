// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pico - an AI assistant for community pharmacy operators.
//!
//! This is the binary entry point.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use pico::app::AppContext;
use pico::generate::{ContentArg, PanelKind};
use pico::{customers, dashboard, generate, memo, reports, shell};
use pico_core::PicoError;
use pico_core::types::{Gender, ReportType};
use tracing_subscriber::EnvFilter;

/// Pico - an AI assistant for community pharmacy operators.
#[derive(Parser, Debug)]
#[command(name = "pico", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the dashboard: greeting, sales summary, recent memos.
    Dashboard,
    /// Chat with the assistant.
    Chat,
    /// Generate a report with one of the AI panels.
    Generate {
        #[arg(value_enum)]
        panel: PanelKind,
        /// TOML file holding the panel's form fields.
        #[arg(long)]
        form: Option<PathBuf>,
        /// Use real-time web search (product and medication panels).
        #[arg(long)]
        search: bool,
        /// Content format for the content panel.
        #[arg(long, value_enum, default_value = "card-news")]
        sub_type: ContentArg,
    },
    /// Browse saved reports.
    Reports {
        #[command(subcommand)]
        action: ReportsAction,
    },
    /// Quick memos shown on the dashboard.
    Memo {
        #[command(subcommand)]
        action: MemoAction,
    },
    /// Customer registry.
    Customers {
        #[command(subcommand)]
        action: CustomersAction,
    },
}

#[derive(Subcommand, Debug)]
enum ReportsAction {
    /// List saved reports, newest first.
    List {
        /// Only one category (hiring, product, labor, content, medication, customer, work_report).
        #[arg(long = "type")]
        report_type: Option<ReportType>,
    },
    /// Print one report.
    Show { id: String },
    /// Delete a report.
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum MemoAction {
    /// Add a memo.
    Add { content: String },
    /// List memos, newest first.
    List,
    /// Delete a memo.
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
enum CustomersAction {
    /// List customers, optionally filtered by name or tag.
    List {
        #[arg(long)]
        search: Option<String>,
    },
    /// Register a customer.
    Add {
        name: String,
        #[arg(long)]
        age: u32,
        /// 남 or 여.
        #[arg(long)]
        gender: Gender,
        /// Comma-separated tags.
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Delete a customer.
    Delete { id: String },
    /// Draft a message for a customer.
    Message {
        id: String,
        /// Message purpose, e.g. "재방문 유도" or "신제품 안내".
        #[arg(long = "type", default_value = "복약지도 리마인더")]
        message_type: String,
        /// Save to the communication history without asking.
        #[arg(long)]
        save: bool,
    },
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pico={log_level},warn")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup
    let config = match pico_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            pico_config::render_errors(&errors);
            std::process::exit(1);
        }
    };
    init_tracing(&config.agent.log_level);

    let Some(command) = cli.command else {
        println!("pico: use --help for available commands");
        return;
    };

    let ctx = match AppContext::open(config).await {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("{}: {e}", "error".red());
            std::process::exit(1);
        }
    };

    let result = run(&ctx, command).await;
    if let Err(e) = ctx.shutdown().await {
        tracing::warn!(error = %e, "storage shutdown failed");
    }
    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

async fn run(ctx: &AppContext, command: Commands) -> Result<(), PicoError> {
    match command {
        Commands::Dashboard => dashboard::run_dashboard(ctx).await,
        Commands::Chat => shell::run_chat(ctx).await?,
        Commands::Generate {
            panel,
            form,
            search,
            sub_type,
        } => generate::run_generate(ctx, panel, form.as_deref(), search, sub_type).await?,
        Commands::Reports { action } => match action {
            ReportsAction::List { report_type } => reports::run_list(ctx, report_type).await,
            ReportsAction::Show { id } => reports::run_show(ctx, &id).await?,
            ReportsAction::Delete { id, yes } => reports::run_delete(ctx, &id, yes).await?,
        },
        Commands::Memo { action } => match action {
            MemoAction::Add { content } => memo::run_add(ctx, &content).await?,
            MemoAction::List => memo::run_list(ctx).await,
            MemoAction::Delete { id } => memo::run_delete(ctx, &id).await?,
        },
        Commands::Customers { action } => match action {
            CustomersAction::List { search } => customers::run_list(ctx, search.as_deref()).await,
            CustomersAction::Add {
                name,
                age,
                gender,
                tags,
                notes,
            } => customers::run_add(ctx, &name, age, gender, tags, &notes).await?,
            CustomersAction::Delete { id } => customers::run_delete(ctx, &id).await?,
            CustomersAction::Message {
                id,
                message_type,
                save,
            } => customers::run_message(ctx, &id, &message_type, save).await?,
        },
    }
    Ok(())
}
