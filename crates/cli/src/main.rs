// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `wfe`: a thin administrative CLI over a `PersistentEngine` journal.
//!
//! Ambient glue only — no decider/activity business logic lives here, per
//! the non-goal that this crate is packaging, not workflow logic. Every
//! subcommand opens the journal, performs one `Engine` operation, and exits;
//! the journal's `fs2` advisory lock means this can't run concurrently with
//! a live worker process pointed at the same file.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use wfe_core::{ActivityResult, Decision, EngineConfig, Process, ProcessId, RunId};
use wfe_engine::Engine;
use wfe_persist::PersistentEngine;

#[derive(Parser)]
#[command(name = "wfe", about = "Administrative CLI for the workflow engine journal")]
struct Cli {
    /// Path to the durable journal file.
    #[arg(long, global = true)]
    journal: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Register (or update) a workflow type.
    RegisterWorkflow {
        name: String,
        #[arg(long)]
        timeout_secs: Option<u64>,
        #[arg(long)]
        decision_timeout_secs: Option<u64>,
    },
    /// Register (or update) an activity type.
    RegisterActivity {
        name: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        scheduled_timeout_secs: Option<u64>,
        #[arg(long)]
        execution_timeout_secs: Option<u64>,
        #[arg(long)]
        heartbeat_timeout_secs: Option<u64>,
    },
    /// Start a new process instance.
    Start {
        workflow: String,
        #[arg(long)]
        input: Option<String>,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Append a signal to a running process.
    Signal {
        process_id: String,
        name: String,
        #[arg(long)]
        data: Option<String>,
    },
    /// Cancel a running process.
    Cancel {
        process_id: String,
        #[arg(long)]
        details: Option<String>,
        #[arg(long)]
        reason: Option<String>,
    },
    /// List processes, optionally filtered by workflow and/or tag.
    List {
        #[arg(long)]
        workflow: Option<String>,
        #[arg(long)]
        tag: Option<String>,
    },
    /// Show a single process's full history.
    Show { process_id: String },
    /// Poll for (and print, without completing) the next decision task.
    PollDecision,
    /// Apply a JSON array of decisions to a decision run.
    CompleteDecision { run_id: String, decisions_json: String },
    /// Poll for (and print, without completing) the next activity task in a category.
    PollActivity { category: String },
    /// Apply a JSON activity result to an activity run.
    CompleteActivity { run_id: String, result_json: String },
    /// Extend a running activity's heartbeat deadline.
    Heartbeat { run_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let engine =
        PersistentEngine::open(&cli.journal, EngineConfig::default()).context("opening journal")?;

    match cli.command {
        Command::RegisterWorkflow { name, timeout_secs, decision_timeout_secs } => {
            let mut workflow = wfe_core::WorkflowType::new(name, &EngineConfig::default());
            if let Some(secs) = timeout_secs {
                workflow = workflow.timeout(Duration::from_secs(secs));
            }
            if let Some(secs) = decision_timeout_secs {
                workflow = workflow.decision_timeout(Duration::from_secs(secs));
            }
            engine.register_workflow(workflow).await?;
        }
        Command::RegisterActivity {
            name,
            category,
            scheduled_timeout_secs,
            execution_timeout_secs,
            heartbeat_timeout_secs,
        } => {
            let mut activity = wfe_core::ActivityType::new(name, &EngineConfig::default());
            if let Some(category) = category {
                activity = activity.category(category);
            }
            if let Some(secs) = scheduled_timeout_secs {
                activity = activity.scheduled_timeout(Duration::from_secs(secs));
            }
            if let Some(secs) = execution_timeout_secs {
                activity = activity.execution_timeout(Duration::from_secs(secs));
            }
            if let Some(secs) = heartbeat_timeout_secs {
                activity = activity.heartbeat_timeout(Duration::from_secs(secs));
            }
            engine.register_activity(activity).await?;
        }
        Command::Start { workflow, input, tags } => {
            let mut process = Process::new(workflow);
            if let Some(input) = input {
                process = process.input(input);
            }
            process = process.tags(tags);
            let process_id = engine.start_process(process).await?;
            println!("{process_id}");
        }
        Command::Signal { process_id, name, data } => {
            engine.signal_process(&parse_process_id(&process_id), &name, data).await?;
        }
        Command::Cancel { process_id, details, reason } => {
            engine.cancel_process(&parse_process_id(&process_id), details, reason).await?;
        }
        Command::List { workflow, tag } => {
            let processes = engine.list_processes(workflow.as_deref(), tag.as_deref()).await?;
            println!("{}", serde_json::to_string_pretty(&processes)?);
        }
        Command::Show { process_id } => {
            let process = engine.process_by_id(&parse_process_id(&process_id)).await?;
            println!("{}", serde_json::to_string_pretty(&process)?);
        }
        Command::PollDecision => match engine.poll_decision_task().await? {
            Some(task) => {
                println!("run_id: {}", task.context.run_id);
                println!("{}", serde_json::to_string_pretty(&task.process)?);
            }
            None => println!("(no decision task available)"),
        },
        Command::CompleteDecision { run_id, decisions_json } => {
            let decisions: Vec<Decision> =
                serde_json::from_str(&decisions_json).context("parsing decisions JSON")?;
            engine.complete_decision_task(&parse_run_id(&run_id), decisions).await?;
        }
        Command::PollActivity { category } => match engine.poll_activity_task(&category).await? {
            Some(task) => {
                println!("run_id: {}", task.context.run_id);
                println!("{}", serde_json::to_string_pretty(&task.execution)?);
            }
            None => println!("(no activity task available)"),
        },
        Command::CompleteActivity { run_id, result_json } => {
            let result: ActivityResult =
                serde_json::from_str(&result_json).context("parsing activity result JSON")?;
            engine.complete_activity_task(&parse_run_id(&run_id), result).await?;
        }
        Command::Heartbeat { run_id } => {
            engine.heartbeat_activity_task(&parse_run_id(&run_id)).await?;
        }
    }

    Ok(())
}

fn parse_process_id(s: &str) -> ProcessId {
    ProcessId::from_string(s)
}

fn parse_run_id(s: &str) -> RunId {
    RunId::from_string(s)
}
