// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde::Serialize;
use tq_core::{Op, Task};

use super::Context;
use crate::cli::OutputFormat;
use crate::display::{format_op_line, format_task_line, sync_summary};
use crate::error::Result;

/// JSON output structure for the list command.
#[derive(Serialize)]
struct ListOutputJson<'a> {
    summary: String,
    pending: Vec<&'a Task>,
    completed: Vec<&'a Task>,
}

pub async fn run(ctx: &Context, output: OutputFormat) -> Result<()> {
    let tasks = ctx.engine.tasks().await;
    print!("{}", render_list(&tasks, output)?);
    Ok(())
}

/// Renders tasks in two sections, pending first.
pub(crate) fn render_list(tasks: &[Task], output: OutputFormat) -> Result<String> {
    let (completed, pending): (Vec<&Task>, Vec<&Task>) = tasks.iter().partition(|t| t.completed);

    if output == OutputFormat::Json {
        let json = ListOutputJson {
            summary: sync_summary(tasks),
            pending,
            completed,
        };
        return Ok(format!("{}\n", serde_json::to_string_pretty(&json)?));
    }

    let mut out = format!("{}\n", sync_summary(tasks));
    for (heading, section) in [("Pending", &pending), ("Completed", &completed)] {
        if section.is_empty() {
            continue;
        }
        out.push_str(&format!("\n{} ({}):\n", heading, section.len()));
        for task in section.iter() {
            out.push_str(&format!("  {}\n", format_task_line(task)));
        }
    }
    if tasks.is_empty() {
        out.push_str("\nNo tasks\n");
    }
    Ok(out)
}

pub async fn queue(ctx: &Context, output: OutputFormat) -> Result<()> {
    let ops = ctx.engine.pending_ops().await;
    print!("{}", render_queue(&ops, output)?);
    Ok(())
}

/// Renders queued ops in replay order.
pub(crate) fn render_queue(ops: &[Op], output: OutputFormat) -> Result<String> {
    if output == OutputFormat::Json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(ops)?));
    }
    if ops.is_empty() {
        return Ok("Queue empty\n".to_string());
    }

    let mut out = format!("{} queued:\n", ops.len());
    for (idx, op) in ops.iter().enumerate() {
        out.push_str(&format!("  {}\n", format_op_line(idx + 1, op)));
    }
    Ok(out)
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
