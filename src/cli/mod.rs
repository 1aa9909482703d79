use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::application::{ExpenseService, MutationResult};
use crate::domain::format_cents;
use crate::io::RowError;
use crate::web;

/// Spesa - Personal Expense Tracker
#[derive(Parser)]
#[command(name = "spesa")]
#[command(about = "A local-first personal expense tracker with a terminal and a web front-end")]
#[command(version)]
pub struct Cli {
    /// Snapshot file path
    #[arg(short, long, default_value = "expenses.csv")]
    pub file: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a new expense
    Add {
        /// Amount spent (e.g., "12.50" or "12")
        amount: String,

        /// Category label (e.g., "Food")
        #[arg(short, long)]
        category: String,

        /// Day of the expense (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Free-text note
        #[arg(short, long, default_value = "")]
        note: String,
    },

    /// Remove an expense by id
    Remove {
        /// Entry id (shown by `list`)
        id: String,
    },

    /// List recorded expenses
    List {
        /// Filter by category ("All" disables the filter)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show spending summary and derived metrics
    Summary {
        /// Filter by category before aggregating
        #[arg(short, long)]
        category: Option<String>,

        /// Reference day for the month-over-month window (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        as_of: Option<String>,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Suggest a category for a note based on past expenses
    Suggest {
        /// Note text to look up
        note: String,
    },

    /// Export the ledger as CSV
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Serve the web dashboard
    Serve {
        /// Address to bind
        #[arg(short, long, default_value = "127.0.0.1:3000")]
        bind: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let (mut service, rejected) = ExpenseService::open(&self.file)?;
        report_rejected_rows(&rejected, self.verbose);

        match self.command {
            Commands::Add {
                amount,
                category,
                date,
                note,
            } => {
                let date = date
                    .unwrap_or_else(|| Utc::now().date_naive().format("%Y-%m-%d").to_string());
                let result = service.add(&date, &category, &amount, &note)?;

                println!(
                    "Recorded expense: {} {} on {} ({})",
                    format_cents(result.entry.amount_cents),
                    result.entry.category,
                    result.entry.date,
                    result.entry.id
                );
                warn_if_not_saved(&result);
            }

            Commands::Remove { id } => {
                let id = Uuid::parse_str(&id).context("Invalid entry id (expected UUID)")?;
                let result = service.remove(id)?;

                println!(
                    "Removed expense: {} {} on {}",
                    format_cents(result.entry.amount_cents),
                    result.entry.category,
                    result.entry.date
                );
                warn_if_not_saved(&result);
            }

            Commands::List { category } => {
                run_list_command(&service, category.as_deref());
            }

            Commands::Summary {
                category,
                as_of,
                format,
            } => {
                let as_of = parse_as_of(as_of)?;
                run_summary_command(&service, category.as_deref(), as_of, &format)?;
            }

            Commands::Suggest { note } => match service.suggest(&note) {
                Some(category) => println!("{category}"),
                None => println!("(no suggestion)"),
            },

            Commands::Export { output } => {
                run_export_command(&service, output.as_deref())?;
            }

            Commands::Serve { bind } => {
                let listener = tokio::net::TcpListener::bind(&bind)
                    .await
                    .with_context(|| format!("Failed to bind {bind}"))?;
                web::run_with_listener(service, listener).await?;
            }
        }

        Ok(())
    }
}

fn run_list_command(service: &ExpenseService, category: Option<&str>) {
    let entries = service.filtered(category);
    if entries.is_empty() {
        println!("No expenses recorded.");
        return;
    }

    println!(
        "{:<12} {:<16} {:>10}  {:<24} {}",
        "DATE", "CATEGORY", "AMOUNT", "NOTE", "ID"
    );
    println!("{}", "-".repeat(104));

    for entry in &entries {
        println!(
            "{:<12} {:<16} {:>10}  {:<24} {}",
            entry.date.format("%Y-%m-%d"),
            truncate(&entry.category, 16),
            format_cents(entry.amount_cents),
            truncate(&entry.note, 24),
            entry.id
        );
    }

    println!("{}", "-".repeat(104));
    println!("{} expense(s)", entries.len());
}

fn run_summary_command(
    service: &ExpenseService,
    category: Option<&str>,
    as_of: NaiveDate,
    format: &str,
) -> Result<()> {
    let summary = service.summary(category, as_of);

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        _ => {
            // Table format
            println!("Expense Summary");
            println!("As of: {}", as_of.format("%Y-%m-%d"));
            println!();
            println!(
                "Total Spend:          {:>12}",
                format_cents(summary.metrics.total_cents)
            );
            match &summary.metrics.top_category {
                Some(top) => println!(
                    "Top Category:         {} ({})",
                    top,
                    format_cents(summary.metrics.top_category_cents)
                ),
                None => println!("Top Category:         (none)"),
            }
            println!(
                "This vs Last Month:   {:>+11.1}%",
                summary.metrics.month_over_month_pct
            );

            if !summary.categories.is_empty() {
                println!();
                println!("By Category:");
                for cat in &summary.categories {
                    println!(
                        "  {:<18} {:>12} ({:>5.1}%)",
                        truncate(&cat.category, 18),
                        format_cents(cat.total_cents),
                        cat.percentage
                    );
                }
            }

            if !summary.months.is_empty() {
                println!();
                println!("By Month:");
                for month in &summary.months {
                    println!(
                        "  {:<18} {:>12}",
                        month.month,
                        format_cents(month.total_cents)
                    );
                }
            }
        }
    }

    Ok(())
}

fn run_export_command(service: &ExpenseService, output: Option<&str>) -> Result<()> {
    use std::fs::File;
    use std::io::{Write, stdout};

    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {path}"))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    let count = service.export(writer)?;
    if output.is_some() {
        eprintln!("Exported {count} expense(s)");
    }

    Ok(())
}

fn parse_as_of(as_of: Option<String>) -> Result<NaiveDate> {
    match as_of {
        Some(date_str) => NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{date_str}'. Use YYYY-MM-DD")),
        None => Ok(Utc::now().date_naive()),
    }
}

fn report_rejected_rows(rejected: &[RowError], verbose: bool) {
    if rejected.is_empty() {
        return;
    }

    eprintln!(
        "Warning: skipped {} malformed snapshot row(s)",
        rejected.len()
    );
    if verbose {
        for row in rejected {
            eprintln!(
                "  Line {}: {}",
                row.line,
                row.field
                    .as_ref()
                    .map(|f| format!("{f}: "))
                    .unwrap_or_default()
                    + &row.error
            );
        }
    }
}

fn warn_if_not_saved(result: &MutationResult) {
    if let Some(warning) = &result.save_warning {
        eprintln!("Warning: {warning}");
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{head}...")
    }
}
