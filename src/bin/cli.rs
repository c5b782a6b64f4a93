//! Compass CLI
//!
//! Command-line interface for a running Compass server:
//! - List, add, change and remove objectives
//! - Show chart coordinates
//! - Import/Export CSV
//! - Check status

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use compass::api::dto::{HealthResponse, ObjectiveListResponse};
use compass::objective::{Axis, ObjectivePatch, StoredObjective};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "compass")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Score objectives on fun, achievement, ease and impact")]
#[command(long_about = "Compass is a personal coaching objective tracker.\nScore your objectives on four axes and see where they land on the Personal, Collective and Combined charts.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:8090", global = true)]
    pub api_url: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

/// Axis values given on the command line
#[derive(clap::Args)]
pub struct AxisArgs {
    /// Fun (0-1)
    #[arg(long)]
    fun: Option<f64>,
    /// Achievement (0-1)
    #[arg(long)]
    achievement: Option<f64>,
    /// Ease (0-1)
    #[arg(long)]
    ease: Option<f64>,
    /// Impact (0-1)
    #[arg(long)]
    impact: Option<f64>,
}

impl AxisArgs {
    fn patch(&self, name: Option<String>) -> ObjectivePatch {
        ObjectivePatch {
            name,
            fun: self.fun,
            achievement: self.achievement,
            ease: self.ease,
            impact: self.impact,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all objectives
    List,

    /// Add an objective (omitted axes default to 0.5)
    Add {
        /// Objective name (default: "Objective N")
        name: Option<String>,
        #[command(flatten)]
        axes: AxisArgs,
    },

    /// Change an objective
    Set {
        /// Objective id (see `list`)
        id: u64,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        #[command(flatten)]
        axes: AxisArgs,
    },

    /// Remove an objective
    Remove {
        /// Objective id (see `list`)
        id: u64,
    },

    /// Show chart coordinates
    Charts,

    /// Replace all objectives with the contents of a CSV file
    Import {
        /// Path to CSV file
        path: PathBuf,
    },

    /// Export objectives as CSV
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show server status
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = format!("{}/api/v1", cli.api_url.trim_end_matches('/'));

    match cli.command {
        Commands::List => {
            let response = client
                .get(format!("{}/objectives", base))
                .send()
                .await
                .context("Failed to reach Compass server")?;
            let response = ensure_success(response).await?;

            if cli.format == "json" {
                println!("{}", response.text().await?);
            } else {
                let list: ObjectiveListResponse = response.json().await?;
                print_objectives(&list.objectives);
            }
        }

        Commands::Add { name, axes } => {
            let response = client
                .post(format!("{}/objectives", base))
                .json(&axes.patch(name))
                .send()
                .await
                .context("Failed to reach Compass server")?;
            let result = mutation_result(ensure_success(response).await?).await?;

            match result["created"].as_u64() {
                Some(id) => println!("Added objective {}", id),
                None => println!("Added objective"),
            }
            report_unsaved(&result);
        }

        Commands::Set { id, name, axes } => {
            let patch = axes.patch(name);
            if patch.is_empty() {
                bail!("Nothing to change: pass --name or at least one axis");
            }

            let response = client
                .put(format!("{}/objectives/{}", base, id))
                .json(&patch)
                .send()
                .await
                .context("Failed to reach Compass server")?;
            let result = mutation_result(ensure_success(response).await?).await?;

            println!("Updated objective {}", id);
            report_unsaved(&result);
        }

        Commands::Remove { id } => {
            let response = client
                .delete(format!("{}/objectives/{}", base, id))
                .send()
                .await
                .context("Failed to reach Compass server")?;
            let result = mutation_result(ensure_success(response).await?).await?;

            println!("Removed objective {}", id);
            report_unsaved(&result);
        }

        Commands::Charts => {
            let response = client
                .get(format!("{}/charts", base))
                .send()
                .await
                .context("Failed to reach Compass server")?;
            let data: serde_json::Value = ensure_success(response).await?.json().await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&data["frame"])?);
            } else {
                print_frame(&data);
            }
        }

        Commands::Import { path } => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {:?}", path))?;

            let response = client
                .post(format!("{}/import", base))
                .header(reqwest::header::CONTENT_TYPE, "text/csv")
                .body(text)
                .send()
                .await
                .context("Failed to reach Compass server")?;
            let result: serde_json::Value = ensure_success(response).await?.json().await?;

            println!("Import results:");
            println!("  Objectives: {}", result["imported"].as_u64().unwrap_or(0));
            println!("  Rows skipped: {}", result["rows_skipped"].as_u64().unwrap_or(0));
            if let Some(missing) = result["missing_columns"].as_array() {
                let names: Vec<&str> = missing.iter().filter_map(|c| c.as_str()).collect();
                println!("  Missing columns (read as 0): {}", names.join(", "));
            }
            report_unsaved(&result);
        }

        Commands::Export { output } => {
            let response = client
                .get(format!("{}/export", base))
                .send()
                .await
                .context("Failed to reach Compass server")?;
            let data = ensure_success(response).await?.text().await?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &data)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Exported to {:?}", path);
                }
                None => {
                    print!("{}", data);
                }
            }
        }

        Commands::Status => {
            let url = format!("{}/health", cli.api_url.trim_end_matches('/'));
            match client.get(&url).send().await {
                Ok(response) if response.status().is_success() => {
                    let health: HealthResponse = response.json().await?;
                    println!("Compass Status");
                    println!("==============");
                    println!("Status:      {}", health.status);
                    println!("Storage:     {}", health.storage);
                    println!("Objectives:  {}", health.objectives);
                    println!("Live views:  {}", health.ws_connections);
                    println!("Uptime:      {}", format_duration(health.uptime_seconds));
                    println!("Version:     {}", health.version);
                }
                Ok(response) => {
                    bail!("Server unhealthy: {}", response.status());
                }
                Err(e) => {
                    bail!("Cannot connect to Compass server at {}: {}", cli.api_url, e);
                }
            }
        }

        Commands::Config { output } => {
            let config = compass::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

async fn ensure_success(response: reqwest::Response) -> anyhow::Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or(text);
    bail!("Request failed ({}): {}", status, message)
}

async fn mutation_result(response: reqwest::Response) -> anyhow::Result<serde_json::Value> {
    Ok(response.json().await?)
}

fn report_unsaved(result: &serde_json::Value) {
    if result["saved"] == false {
        eprintln!("Warning: the server could not save the change; it is kept in memory only");
    }
}

fn print_objectives(objectives: &[StoredObjective]) {
    if objectives.is_empty() {
        println!("No objectives");
        return;
    }

    print!("{:<5} {:<30}", "Id", "Name");
    for axis in Axis::all() {
        print!(" | {:<11}", axis.as_str());
    }
    println!();
    println!("{}", "-".repeat(36 + Axis::all().len() * 14));

    for entry in objectives {
        print!("{:<5} {:<30}", entry.id, truncate(&entry.objective.name, 30));
        for axis in Axis::all() {
            print!(" | {:<11.2}", entry.objective.axis(*axis));
        }
        println!();
    }
}

fn print_frame(data: &serde_json::Value) {
    let frame = &data["frame"];
    let labels = match frame["labels"].as_array() {
        Some(l) if !l.is_empty() => l,
        _ => {
            println!("No objectives");
            return;
        }
    };

    println!(
        "Combined projection: {}",
        data["projection"].as_str().unwrap_or("?")
    );
    println!(
        "{:<30} | {:<15} | {:<15} | {:<15}",
        "Name", "Personal", "Collective", "Combined"
    );
    println!("{}", "-".repeat(84));

    let point = |chart: &str, i: usize| {
        let p = &frame[chart][i];
        match (p["x"].as_f64(), p["y"].as_f64()) {
            (Some(x), Some(y)) => format!("({:.2}, {:.2})", x, y),
            _ => "-".to_string(),
        }
    };

    for (i, label) in labels.iter().enumerate() {
        println!(
            "{:<30} | {:<15} | {:<15} | {:<15}",
            truncate(label.as_str().unwrap_or(""), 30),
            point("personal", i),
            point("collective", i),
            point("combined", i)
        );
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max - 1).collect();
        format!("{}…", cut)
    }
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}
