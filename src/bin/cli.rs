//! MindMentor CLI
//!
//! Command-line interface for a running MindMentor server:
//! - Dashboard stats and logging focus sessions
//! - Curated resources, study plans, notes and PDFs
//! - Profile updates
//! - Config file generation

use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

use mindmentor::api::dto::{CreateNoteRequest, CreatePlanRequest};
use mindmentor::client::notify::{self, ListKind};
use mindmentor::client::{
    load_dashboard, reload_plans, spawn_refresh, ApiClient, ClientError, EventBus,
    PLAN_REFRESH_DELAY, REFRESH_DELAY,
};
use mindmentor::config::Config;
use mindmentor::paging::Page;
use mindmentor::stats::WEEKLY_GOAL_HOURS;
use mindmentor::storage::{NoteBlock, StudyPlan, StudySession};

#[derive(Parser)]
#[command(name = "mindmentor")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Study tracking from the command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL (default: [client].api_url)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Act as this user (sent as X-User-Id)
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show dashboard statistics
    Stats,

    /// Record a completed focus session
    LogSession {
        /// Length in minutes
        #[arg(short, long, default_value = "25")]
        minutes: u32,
        /// Session label
        #[arg(long, default_value = "pomodoro")]
        mode: String,
        /// When the session ended: "now" or RFC 3339
        #[arg(long, default_value = "now")]
        ended: String,
    },

    /// Curated learning resources
    Resources {
        #[command(subcommand)]
        action: ResourceCommand,
    },

    /// Study plans
    Plans {
        #[command(subcommand)]
        action: PlanCommand,
    },

    /// Notes
    Notes {
        #[command(subcommand)]
        action: NoteCommand,
    },

    /// PDF documents
    Pdf {
        #[command(subcommand)]
        action: PdfCommand,
    },

    /// Show or update the profile
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ResourceCommand {
    List {
        #[arg(short, long, default_value = "1")]
        page: usize,
    },
    /// Curate resources for a subject
    Create { subject: String },
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum PlanCommand {
    List {
        #[arg(short, long, default_value = "1")]
        page: usize,
    },
    /// Generate a plan
    Create {
        subject: String,
        #[arg(long, default_value = "5")]
        hours: u32,
        #[arg(long, default_value = "4")]
        weeks: u32,
        #[arg(long)]
        goal: Option<String>,
    },
    /// Deactivate a plan
    Delete { id: String },
    /// Export active plans as CSV
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum NoteCommand {
    List {
        #[arg(short, long, default_value = "1")]
        page: usize,
    },
    Create {
        title: String,
        #[arg(short, long, default_value = "")]
        content: String,
        #[arg(long)]
        parent: Option<String>,
    },
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum PdfCommand {
    List {
        #[arg(short, long, default_value = "1")]
        page: usize,
    },
    Upload { path: PathBuf },
    Delete { id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load_default();

    let mut client = ApiClient::from_config(&config)?;
    if let Some(url) = &cli.api_url {
        let timeout = std::time::Duration::from_secs(config.api.request_timeout_secs);
        client = ApiClient::new(url.clone(), timeout)?;
        if let Some(user) = &config.client.user_id {
            client = client.with_user(user.clone());
        }
    }
    if let Some(user) = &cli.user {
        client = client.with_user(user.clone());
    }

    let json = cli.format == "json";

    match cli.command {
        Commands::Stats => show_stats(&client, json).await?,

        Commands::LogSession {
            minutes,
            mode,
            ended,
        } => {
            let end = parse_time(&ended)?;
            let session = StudySession::new(end - Duration::minutes(minutes as i64), end, mode);

            // The dashboard re-fetch the timer page triggers
            let bus = EventBus::default();
            let client = client.with_events(bus.clone());
            let (tx, mut updates) = tokio::sync::mpsc::unbounded_channel();
            spawn_refresh(std::sync::Arc::new(client.clone()), bus.subscribe(), move |dashboard| {
                let _ = tx.send(dashboard);
            });

            let stored = client.record_session(&session).await.or_else(fail)?;
            println!(
                "Logged {} minute {} session ending {}",
                stored.duration / 60,
                stored.mode,
                stored.end_time.format("%Y-%m-%d %H:%M UTC")
            );

            let wait = REFRESH_DELAY + std::time::Duration::from_secs(config.api.request_timeout_secs);
            if let Ok(Some(dashboard)) = tokio::time::timeout(wait, updates.recv()).await {
                println!(
                    "Current streak: {} days, {:.1} hours studied",
                    dashboard.stats.current_streak, dashboard.summary.total_study_hours
                );
            }
        }

        Commands::Resources { action } => run_resources(&client, action, json).await?,
        Commands::Plans { action } => run_plans(&client, action, json).await?,
        Commands::Notes { action } => run_notes(&client, action, json).await?,
        Commands::Pdf { action } => run_pdf(&client, action, json).await?,

        Commands::Profile { name, email } => {
            let current = client.get_profile().await.or_else(fail)?;
            let profile = match (name, email) {
                (None, None) => current,
                (name, email) => client
                    .update_profile(
                        name.as_deref().unwrap_or(&current.name),
                        email.as_deref().unwrap_or(&current.email),
                    )
                    .await
                    .or_else(fail)?,
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&profile)?);
            } else {
                println!("Name:   {}", profile.name);
                println!(
                    "Email:  {}",
                    if profile.email.is_empty() { "-" } else { profile.email.as_str() }
                );
                println!("Since:  {}", profile.created_at.format("%Y-%m-%d"));
            }
        }

        Commands::Config { output } => write_config(output.as_ref())?,
    }

    Ok(())
}

/// Report a failed request and exit
fn fail<T>(err: ClientError) -> anyhow::Result<T> {
    eprintln!("Error: {}", err);
    if matches!(err, ClientError::Unavailable) {
        eprintln!();
        eprintln!("Make sure the MindMentor server is running:");
        eprintln!("  cargo run --bin mindmentor");
    }
    std::process::exit(1);
}

fn toast_exit<T>(toast: notify::Toast) -> anyhow::Result<T> {
    eprintln!("{}", toast);
    std::process::exit(1);
}

// ============================================
// STATS
// ============================================

async fn show_stats(client: &ApiClient, json: bool) -> anyhow::Result<()> {
    let dashboard = load_dashboard(client).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }

    let summary = &dashboard.summary;
    println!(
        "Study hours:     {:.1} ({}% of the {}h weekly goal)",
        summary.total_study_hours,
        summary.progress_percent(),
        WEEKLY_GOAL_HOURS
    );
    println!("Sessions:        {}", summary.total_sessions);
    println!("Avg weekly:      {:.1}h", summary.average_weekly_hours());
    println!("Current streak:  {} days", dashboard.stats.current_streak);
    println!("Best streak:     {} days", dashboard.stats.best_streak);
    println!("Active days:     {}", dashboard.stats.total_days);

    println!();
    if dashboard.earned_count() == 0 {
        println!("Start your journey: complete study sessions to earn achievements.");
    } else {
        println!("Achievements:");
        for achievement in dashboard.achievements().iter().filter(|a| a.earned) {
            println!("  * {} - {}", achievement.title, achievement.description);
        }
    }

    Ok(())
}

// ============================================
// RESOURCES
// ============================================

async fn run_resources(client: &ApiClient, action: ResourceCommand, json: bool) -> anyhow::Result<()> {
    match action {
        ResourceCommand::List { page } => {
            let resources = match client.get_curated_resources().await {
                Ok(resources) => resources,
                Err(e) => {
                    eprintln!("{}", e);
                    return toast_exit(notify::fetch_failed(ListKind::Resources));
                }
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&resources)?);
                return Ok(());
            }

            if resources.is_empty() {
                println!("No curated resources yet.");
                println!("  mindmentor-cli resources create \"Linear Algebra\"");
                return Ok(());
            }

            let view = Page::new(&resources, page);
            for resource in view.items {
                println!("{}  {}", resource.id, resource.topic);
                for link in &resource.resources {
                    println!("    [{}] {} - {}", link.kind, link.title, link.url);
                }
            }
            print_pager(&view);
        }

        ResourceCommand::Create { subject } => {
            match client.create_curated_resources(&subject).await {
                Ok(resource) => {
                    println!("{}", notify::resources_created());
                    println!("{}  {} ({} links)", resource.id, resource.topic, resource.resources.len());
                }
                Err(e) => {
                    let toast = notify::resource_create_failed(&e);
                    if toast.is_error() {
                        return toast_exit(toast);
                    }
                    println!("{}", toast);
                }
            }
        }

        ResourceCommand::Delete { id } => {
            client.delete_curated_resource(&id).await.or_else(fail)?;
            println!("{}", notify::resource_deleted());
        }
    }

    Ok(())
}

// ============================================
// STUDY PLANS
// ============================================

async fn run_plans(client: &ApiClient, action: PlanCommand, json: bool) -> anyhow::Result<()> {
    match action {
        PlanCommand::List { page } => {
            let plans = fetch_plans(client).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&plans)?);
                return Ok(());
            }

            if plans.is_empty() {
                println!("No active study plans.");
                return Ok(());
            }

            let view = Page::new(&plans, page);
            println!("{:<38} {:<24} {:>6} {:>6}", "ID", "Subject", "Weeks", "Hours");
            println!("{}", "-".repeat(78));
            for plan in view.items {
                println!(
                    "{:<38} {:<24} {:>6} {:>6}",
                    plan.id,
                    truncate(&plan.subject, 24),
                    plan.weeks.len(),
                    plan.total_hours()
                );
            }
            print_pager(&view);
        }

        PlanCommand::Create {
            subject,
            hours,
            weeks,
            goal,
        } => {
            let request = CreatePlanRequest {
                subject,
                goal,
                hours_per_week: hours,
                weeks,
            };
            match client.create_study_plan(&request).await {
                Ok(plan) => {
                    println!("Created plan {} ({} weeks)", plan.id, plan.weeks.len());
                    for week in &plan.weeks {
                        println!("  Week {:>2}: {} ({}h)", week.week, week.focus, week.hours);
                    }
                    if let Some(plans) = reload_plans(client, PLAN_REFRESH_DELAY).await {
                        println!("{} active plans", plans.len());
                    }
                }
                Err(e) if e.is_rate_limited() => {
                    return toast_exit(notify::rate_limited(e.retry_after()));
                }
                Err(e) => return fail(e),
            }
        }

        PlanCommand::Delete { id } => match client.delete_study_plan(&id).await {
            Ok(response) => println!("{}", notify::plan_deactivated(response.message.as_deref())),
            Err(e) => return toast_exit(notify::plan_deactivate_failed(&e)),
        },

        PlanCommand::Export { output } => {
            let plans = fetch_plans(client).await?;
            match output {
                Some(path) => {
                    let file = std::fs::File::create(&path)
                        .with_context(|| format!("creating {:?}", path))?;
                    write_plans_csv(&plans, file)?;
                    println!("Exported {} plans to {:?}", plans.len(), path);
                }
                None => write_plans_csv(&plans, std::io::stdout().lock())?,
            }
        }
    }

    Ok(())
}

async fn fetch_plans(client: &ApiClient) -> anyhow::Result<Vec<StudyPlan>> {
    match client.get_study_plans().await {
        Ok(plans) => Ok(plans),
        Err(e) => {
            eprintln!("{}", e);
            toast_exit(notify::fetch_failed(ListKind::Plans))
        }
    }
}

/// One row per plan week
fn write_plans_csv<W: Write>(plans: &[StudyPlan], out: W) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["plan_id", "subject", "goal", "week", "focus", "hours", "tasks"])?;

    for plan in plans {
        for week in &plan.weeks {
            writer.write_record([
                plan.id.as_str(),
                plan.subject.as_str(),
                plan.goal.as_deref().unwrap_or(""),
                week.week.to_string().as_str(),
                week.focus.as_str(),
                week.hours.to_string().as_str(),
                week.tasks.join("; ").as_str(),
            ])?;
        }
    }

    writer.flush()?;
    Ok(())
}

// ============================================
// NOTES
// ============================================

async fn run_notes(client: &ApiClient, action: NoteCommand, json: bool) -> anyhow::Result<()> {
    match action {
        NoteCommand::List { page } => {
            let notes = match client.list_notes().await {
                Ok(notes) => notes,
                Err(e) => {
                    eprintln!("{}", e);
                    return toast_exit(notify::notes_load_failed());
                }
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&notes)?);
                return Ok(());
            }

            let view = Page::new(&notes, page);
            for note in view.items {
                println!(
                    "{}  {}  (updated {})",
                    note.id,
                    note.title,
                    note.updated_at.format("%Y-%m-%d %H:%M")
                );
                let text = note.text();
                if !text.is_empty() {
                    println!("    {}", truncate(text, 72));
                }
            }
            print_pager(&view);
        }

        NoteCommand::Create {
            title,
            content,
            parent,
        } => {
            let request = CreateNoteRequest {
                title,
                content: vec![NoteBlock::text(content)],
                parent_id: parent,
            };
            let note = client.create_note(&request).await.or_else(fail)?;
            println!("Created note {}", note.id);
        }

        NoteCommand::Delete { id } => {
            client.delete_note(&id).await.or_else(fail)?;
            println!("Deleted note {}", id);
        }
    }

    Ok(())
}

// ============================================
// PDF
// ============================================

async fn run_pdf(client: &ApiClient, action: PdfCommand, json: bool) -> anyhow::Result<()> {
    match action {
        PdfCommand::List { page } => {
            let docs = client.list_pdfs().await.or_else(fail)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&docs)?);
                return Ok(());
            }

            let view = Page::new(&docs, page);
            for doc in view.items {
                println!(
                    "{}  {}  ({} pages, {} KB)",
                    doc.id,
                    doc.title,
                    doc.page_count,
                    doc.size_bytes / 1024
                );
            }
            print_pager(&view);
        }

        PdfCommand::Upload { path } => match client.upload_pdf_file(&path).await {
            Ok(doc) => {
                println!("{}", notify::pdf_uploaded());
                println!("{}  {} ({} pages)", doc.id, doc.title, doc.page_count);
            }
            Err(e) => return toast_exit(notify::pdf_upload_failed(&e)),
        },

        PdfCommand::Delete { id } => {
            client.delete_pdf(&id).await.or_else(fail)?;
            println!("{}", notify::pdf_deleted());
        }
    }

    Ok(())
}

// ============================================
// HELPERS
// ============================================

fn write_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let config = mindmentor::config::generate_default_config();

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => print!("{}", config),
    }
    Ok(())
}

fn print_pager<T>(view: &Page<'_, T>) {
    if view.items.is_empty() {
        println!("(page {} is empty)", view.page);
    }
    if view.show_controls() {
        println!();
        println!(
            "Page {} of {} ({} items){}{}",
            view.page,
            view.total_pages,
            view.total_items,
            if view.has_previous() { "  --page N-1 for previous" } else { "" },
            if view.has_next() { "  --page N+1 for next" } else { "" },
        );
    }
}

fn parse_time(s: &str) -> anyhow::Result<DateTime<Utc>> {
    match s.trim() {
        "now" => Ok(Utc::now()),
        other => DateTime::parse_from_rfc3339(other)
            .map(|dt| dt.with_timezone(&Utc))
            .with_context(|| format!("Invalid time '{}': use \"now\" or RFC 3339", other)),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
