// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Civic-Reports command line client
//!
//! Public report submission and tracking, plus the staff dashboard
//! operations, against a configured reports API.

use chrono::{Local, NaiveDate};
use civic_reports::{
    config::Config,
    error::{ClientError, Result},
    middleware::SignInNotice,
    models::{
        AttachmentUpload, Coordinates, Credentials, DateRange, NewReport, NewUser, ReportStatus,
        UserUpdate,
    },
    services::ReportFilter,
    session::FileStore,
    views::{self, labels, report as report_view},
    AppState,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "civic-reports", version)]
#[command(about = "Anonymous incident reports: submit, track and administer")]
struct Cli {
    /// Print raw JSON instead of formatted text
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in as a staff member
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "CIVIC_REPORTS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Look up a report by its tracking code
    Track { code: String },
    /// File an anonymous report
    Submit {
        /// Category id (see `categories`)
        #[arg(long)]
        category: String,
        #[arg(long)]
        description: String,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        #[arg(long)]
        address: String,
        /// File to attach; repeatable
        #[arg(long = "attach")]
        attachments: Vec<PathBuf>,
    },
    /// List the report categories
    Categories,
    Reports {
        #[command(subcommand)]
        command: ReportsCommand,
    },
    Users {
        #[command(subcommand)]
        command: UsersCommand,
    },
    Dashboard {
        #[command(subcommand)]
        command: DashboardCommand,
    },
}

#[derive(Subcommand)]
enum ReportsCommand {
    List {
        #[arg(long, value_parser = ReportStatus::parse_known)]
        status: Option<ReportStatus>,
        /// Created on or after (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Created on or before (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        page_size: Option<u32>,
        /// Follow pagination to the end
        #[arg(long, default_value_t = false)]
        all: bool,
        /// Keep rows whose code or category contains this text
        #[arg(long)]
        search: Option<String>,
    },
    Show {
        id: String,
    },
    Status {
        id: String,
        #[arg(value_parser = ReportStatus::parse_known)]
        status: ReportStatus,
        #[arg(long)]
        note: Option<String>,
    },
    Assign {
        id: String,
        user_id: String,
    },
}

#[derive(Subcommand)]
enum UsersCommand {
    List {
        /// Keep users whose name or email contains this text
        #[arg(long)]
        search: Option<String>,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        organization: String,
    },
    Edit {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        organization: String,
        #[arg(long, env = "CIVIC_REPORTS_NEW_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Activate {
        id: String,
    },
    Deactivate {
        id: String,
    },
}

#[derive(Subcommand)]
enum DashboardCommand {
    Metrics,
    /// Opened vs resolved per day
    Timeline {
        /// 14, 30, 45 or 60
        #[arg(long, default_value_t = 30, value_parser = parse_range)]
        days: i64,
    },
    Heatmap,
}

fn parse_range(raw: &str) -> std::result::Result<i64, String> {
    let days: i64 = raw.parse().map_err(|e| format!("{}", e))?;
    DateRange::from_days(days)
        .map(|r| r.days())
        .ok_or_else(|| "expected one of 14, 30, 45, 60".to_string())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(api = %config.api_base_url, "Configuration loaded");

    let store = Arc::new(FileStore::new(config.session_file.clone()));
    let state = match AppState::new(config, store, Arc::new(SignInNotice)) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("{}", e.user_message());
            return ExitCode::FAILURE;
        }
    };

    match run(&state, cli.command, cli.json).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(state: &AppState, command: Command, json: bool) -> Result<()> {
    let maps_key = state.config.maps_api_key.as_deref();

    match command {
        Command::Login { email, password } => {
            let user = state.auth.login(&Credentials { email, password }).await?;
            if json {
                return print_json(&user);
            }
            println!("Conectado como {}", user.name.or(user.email).unwrap_or_default());
        }
        Command::Logout => {
            state.auth.logout().await;
            println!("Sessão encerrada.");
        }
        Command::Whoami => {
            let user = state.auth.current_user().await?;
            if json {
                return print_json(&user);
            }
            println!(
                "{}\t{}\t{}",
                user.id,
                user.name.as_deref().unwrap_or("-"),
                user.email.as_deref().unwrap_or("-")
            );
        }
        Command::Track { code } => match state.reports.track(&code).await? {
            Some(report) if json => return print_json(&report),
            Some(report) => print_lines(report_view::tracked_lines(&report, maps_key, &Local)),
            None => {
                return Err(ClientError::NotFound(format!(
                    "Nenhuma denúncia encontrada com o código {}",
                    code.trim()
                )))
            }
        },
        Command::Submit {
            category,
            description,
            lat,
            lng,
            address,
            attachments,
        } => {
            let mut uploads = Vec::with_capacity(attachments.len());
            for path in &attachments {
                uploads.push(AttachmentUpload::from_path(path).await?);
            }
            let receipt = state
                .reports
                .submit(&NewReport {
                    title: category,
                    description,
                    coordinates: Coordinates { lat, lng },
                    address,
                    attachments: uploads,
                })
                .await?;
            if json {
                return print_json(&receipt);
            }
            println!("Denúncia registrada. Código de acompanhamento: {}", receipt.code);
        }
        Command::Categories => {
            for category in civic_reports::models::CATEGORIES.iter() {
                println!("{}\t{}", category.id, category.name);
            }
        }
        Command::Reports { command } => run_reports(state, command, json).await?,
        Command::Users { command } => run_users(state, command, json).await?,
        Command::Dashboard { command } => run_dashboard(state, command, json).await?,
    }
    Ok(())
}

async fn run_reports(state: &AppState, command: ReportsCommand, json: bool) -> Result<()> {
    match command {
        ReportsCommand::List {
            status,
            from,
            to,
            page,
            page_size,
            all,
            search,
        } => {
            let filter = ReportFilter {
                status,
                created_from: from,
                created_to: to,
                page_size,
            };
            let rows = if all {
                state.reports.pages(filter).collect_all().await?
            } else {
                state.reports.list(&filter, page).await?.results
            };
            let rows: Vec<_> = views::filter_reports(&rows, search.as_deref().unwrap_or(""));
            if json {
                return print_json(&rows);
            }
            for row in rows {
                println!("{}", report_view::summary_line(row, &Local));
            }
        }
        ReportsCommand::Show { id } => {
            let report = state.reports.get(&id).await?;
            if json {
                return print_json(&report);
            }
            let maps_key = state.config.maps_api_key.as_deref();
            print_lines(report_view::detail_lines(&report, maps_key, &Local));
        }
        ReportsCommand::Status { id, status, note } => {
            state
                .reports
                .update_status(&id, &status, note.as_deref())
                .await?;
            println!("Status atualizado para {}", labels::status_badge(&status));
        }
        ReportsCommand::Assign { id, user_id } => {
            state.reports.assign(&id, &user_id).await?;
            println!("Denúncia atribuída.");
        }
    }
    Ok(())
}

async fn run_users(state: &AppState, command: UsersCommand, json: bool) -> Result<()> {
    match command {
        UsersCommand::List { search } => {
            let users = state.users.list().await?;
            let users = views::filter_users(&users, search.as_deref().unwrap_or(""));
            if json {
                return print_json(&users);
            }
            for user in users {
                println!("{}", report_view::user_line(user));
            }
        }
        UsersCommand::Create {
            name,
            email,
            organization,
        } => {
            state
                .users
                .create(&NewUser {
                    name,
                    email,
                    organization,
                })
                .await?;
            println!("Usuário criado.");
        }
        UsersCommand::Edit {
            id,
            name,
            organization,
            password,
        } => {
            state
                .users
                .update(
                    &id,
                    &UserUpdate {
                        name,
                        organization,
                        password,
                    },
                )
                .await?;
            println!("Usuário atualizado.");
        }
        UsersCommand::Activate { id } => {
            state.users.activate(&id).await?;
            println!("Usuário ativado.");
        }
        UsersCommand::Deactivate { id } => {
            state.users.deactivate(&id).await?;
            println!("Usuário desativado.");
        }
    }
    Ok(())
}

async fn run_dashboard(state: &AppState, command: DashboardCommand, json: bool) -> Result<()> {
    match command {
        DashboardCommand::Metrics => {
            let metrics = state.dashboard.metrics().await?;
            if json {
                return print_json(&metrics);
            }
            for card in views::stat_cards(&metrics) {
                println!("{}: {} ({})", card.title, card.value, card.description);
            }
            let summary = views::resolution_summary(&metrics.resolution_rate_comparison);
            println!(
                "Taxa de resolução {}: {} ({})",
                summary.current_month, summary.current_rate, summary.current_detail
            );
            println!(
                "Taxa de resolução {}: {} ({})",
                summary.last_month, summary.last_rate, summary.last_detail
            );
            println!("Diferença: {}", summary.difference);
            if let Some(variation) = summary.variation {
                println!("{}", variation);
            }
        }
        DashboardCommand::Timeline { days } => {
            let range = DateRange::from_days(days).unwrap_or_default();
            let points = state.dashboard.reports_timeline(range).await?;
            if json {
                return print_json(&points);
            }
            println!("{}", views::range_label(range));
            for point in points {
                println!("{}\tabertas={}\tresolvidas={}", point.date, point.open, point.resolved);
            }
        }
        DashboardCommand::Heatmap => {
            let points = state.dashboard.heatmap().await?;
            if json {
                return print_json(&points);
            }
            for point in points {
                println!("{}\t{}\t{}", point.lat, point.lng, point.weight);
            }
        }
    }
    Ok(())
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| ClientError::Internal(anyhow::anyhow!("Failed to encode output: {}", e)))?;
    println!("{}", text);
    Ok(())
}

/// Initialize structured JSON logging on stderr.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("civic_reports=info,warn"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
