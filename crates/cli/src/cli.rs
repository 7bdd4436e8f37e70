// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

const QUICKSTART_HELP: &str = "\
Get started:
  taskq add \"Buy milk\"      Create a task (works offline)
  taskq list                 List tasks with their sync state
  taskq done <id>            Mark a task as completed
  taskq sync                 Push queued changes to the remote";

#[derive(Parser)]
#[command(name = "taskq")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "An offline-first task list that syncs with a remote collection")]
#[command(
    long_about = "An offline-first task list.\n\n\
    Every change is saved locally first and queued. Queued changes are sent to \
    the remote in order whenever it is reachable."
)]
#[command(after_help = QUICKSTART_HELP)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options accepted by every command.
#[derive(Args, Clone, Debug, Default)]
pub struct GlobalArgs {
    /// Directory holding tasks, the queue and config.toml
    #[arg(long, global = true, env = "TASKQ_DATA_DIR", value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Do not contact the remote; changes stay queued
    #[arg(long, global = true)]
    pub offline: bool,

    /// Log sync activity to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create the data directory and config file
    #[command(after_help = "Examples:\n  \
        taskq init                                      Use the default remote\n  \
        taskq init --remote http://localhost:3000/todos   Use a local server")]
    Init {
        /// Remote collection URL
        #[arg(long, value_name = "URL")]
        remote: Option<String>,
    },

    /// Create a task
    #[command(arg_required_else_help = true)]
    Add {
        /// Task title
        #[arg(value_parser = non_empty_string)]
        title: String,

        /// Optional description
        #[arg(long, short)]
        description: Option<String>,
    },

    /// Change a task's title or description
    #[command(
        arg_required_else_help = true,
        after_help = "Examples:\n  \
            taskq edit 3f2a --title \"Buy oat milk\"     Rename\n  \
            taskq edit 3f2a --description \"\"           Clear the description"
    )]
    Edit {
        /// Task ID (or unique prefix)
        id: String,

        /// New title
        #[arg(long, short)]
        title: Option<String>,

        /// New description (empty clears it)
        #[arg(long, short)]
        description: Option<String>,
    },

    /// Mark a task as completed
    #[command(arg_required_else_help = true)]
    Done {
        /// Task ID (or unique prefix)
        id: String,
    },

    /// Mark a task as not completed
    #[command(arg_required_else_help = true)]
    Reopen {
        /// Task ID (or unique prefix)
        id: String,
    },

    /// Flip a task between completed and not completed
    #[command(arg_required_else_help = true)]
    Toggle {
        /// Task ID (or unique prefix)
        id: String,
    },

    /// Delete a task
    #[command(arg_required_else_help = true)]
    Rm {
        /// Task ID (or unique prefix)
        id: String,
    },

    /// List tasks
    List {
        /// Output format (text, json)
        #[arg(long, short, value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Show queued operations in replay order
    Queue {
        /// Output format (text, json)
        #[arg(long, short, value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Send queued operations to the remote now
    Sync,

    /// Show connectivity and queue size
    Status,

    /// Keep syncing in the foreground until interrupted
    Watch,
}
