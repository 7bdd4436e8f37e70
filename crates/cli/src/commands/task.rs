// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use tq_core::{Task, TaskPatch};

use super::Context;
use crate::error::{Error, Result};
use crate::validate::{validate_and_trim_description, validate_and_trim_title};

pub async fn add(ctx: &Context, title: String, description: Option<String>) -> Result<()> {
    let task = add_impl(ctx, &title, description.as_deref()).await?;
    println!("Created {}: {}", task.short_id(), task.title);
    ctx.sync_if_online().await;
    Ok(())
}

pub(crate) async fn add_impl(
    ctx: &Context,
    title: &str,
    description: Option<&str>,
) -> Result<Task> {
    let title = validate_and_trim_title(title)?;
    let description = description
        .map(validate_and_trim_description)
        .transpose()?
        .filter(|d| !d.is_empty());
    Ok(ctx.engine.add_task(title, description).await?)
}

pub async fn edit(
    ctx: &Context,
    id: &str,
    title: Option<String>,
    description: Option<String>,
) -> Result<()> {
    let task = edit_impl(ctx, id, title.as_deref(), description.as_deref()).await?;
    println!("Updated {}: {}", task.short_id(), task.title);
    ctx.sync_if_online().await;
    Ok(())
}

pub(crate) async fn edit_impl(
    ctx: &Context,
    id: &str,
    title: Option<&str>,
    description: Option<&str>,
) -> Result<Task> {
    let patch = TaskPatch {
        title: title.map(validate_and_trim_title).transpose()?,
        description: description.map(validate_and_trim_description).transpose()?,
        completed: None,
    };
    if patch.is_empty() {
        return Err(Error::EmptyPatch);
    }
    update(ctx, id, &patch).await
}

pub async fn done(ctx: &Context, id: &str) -> Result<()> {
    let task = update(ctx, id, &TaskPatch::completed(true)).await?;
    println!("Completed {}: {}", task.short_id(), task.title);
    ctx.sync_if_online().await;
    Ok(())
}

pub async fn reopen(ctx: &Context, id: &str) -> Result<()> {
    let task = update(ctx, id, &TaskPatch::completed(false)).await?;
    println!("Reopened {}: {}", task.short_id(), task.title);
    ctx.sync_if_online().await;
    Ok(())
}

pub async fn toggle(ctx: &Context, id: &str) -> Result<()> {
    let task = toggle_impl(ctx, id).await?;
    let verb = if task.completed { "Completed" } else { "Reopened" };
    println!("{} {}: {}", verb, task.short_id(), task.title);
    ctx.sync_if_online().await;
    Ok(())
}

pub(crate) async fn toggle_impl(ctx: &Context, id: &str) -> Result<Task> {
    let local_id = ctx.engine.resolve(id).await?.local_id;
    ctx.engine
        .toggle_task(&local_id)
        .await?
        .ok_or_else(|| Error::TaskNotFound(id.to_string()))
}

pub async fn remove(ctx: &Context, id: &str) -> Result<()> {
    let task = remove_impl(ctx, id).await?;
    println!("Deleted {}: {}", task.short_id(), task.title);
    ctx.sync_if_online().await;
    Ok(())
}

pub(crate) async fn remove_impl(ctx: &Context, id: &str) -> Result<Task> {
    let local_id = ctx.engine.resolve(id).await?.local_id;
    ctx.engine
        .delete_task(&local_id)
        .await?
        .ok_or_else(|| Error::TaskNotFound(id.to_string()))
}

/// Resolves `id` and applies `patch`.
pub(crate) async fn update(ctx: &Context, id: &str, patch: &TaskPatch) -> Result<Task> {
    let local_id = ctx.engine.resolve(id).await?.local_id;
    ctx.engine
        .update_task(&local_id, patch)
        .await?
        .ok_or_else(|| Error::TaskNotFound(id.to_string()))
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
