use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashSet;

use super::command::Command;
use super::traits::CommandHandler;
use crate::router::{Ctx, Router};

/// Built-in handler listing categories and commands, or describing one command.
pub struct HelpCommand;

impl HelpCommand {
    /// A ready-made `help` command, matched case-insensitively.
    pub fn command() -> Command {
        Command::new("help", HelpCommand)
            .with_aliases(["h"])
            .with_description("Show available commands")
            .with_usage("[command]")
            .with_example("help ping")
            .ignore_case(true)
    }
}

fn display_prefix(router: &Router) -> String {
    router.get_prefixes().into_iter().next().unwrap_or_default()
}

/// Categories in declaration order, then uncategorised commands.
pub fn render_overview(router: &Router) -> String {
    let prefix = display_prefix(router);
    let mut lines = vec!["Available commands:".to_string()];
    let mut seen = HashSet::new();

    for meta in router.categories() {
        if !seen.insert(meta.name.to_lowercase()) {
            continue;
        }
        let Some(category) = router.get_category(&meta.name) else {
            continue;
        };
        if category.description.is_empty() {
            lines.push(format!("{}:", category.name));
        } else {
            lines.push(format!("{} ({}):", category.name, category.description));
        }
        let names: Vec<&str> = category.commands.iter().map(|c| c.name()).collect();
        lines.push(format!("  {}", names.join(", ")));
    }

    let uncategorized: Vec<&str> = router
        .commands()
        .iter()
        .filter(|c| c.category().is_none())
        .map(|c| c.name())
        .collect();
    if !uncategorized.is_empty() {
        lines.push("Uncategorized:".to_string());
        lines.push(format!("  {}", uncategorized.join(", ")));
    }

    lines.push(format!("Use `{prefix}help <command>` for details."));
    lines.join("\n")
}

pub fn render_command(router: &Router, command: &Command) -> String {
    let prefix = display_prefix(router);
    let mut lines = vec![format!("{prefix}{}", command.name())];
    if !command.description().is_empty() {
        lines.push(command.description().to_string());
    }
    if let Some(category) = command.category() {
        lines.push(format!("Category: {}", category.name));
    }
    if !command.aliases().is_empty() {
        lines.push(format!("Aliases: {}", command.aliases().join(", ")));
    }
    if !command.usage().is_empty() {
        lines.push(format!("Usage: {prefix}{} {}", command.name(), command.usage()));
    }
    if !command.example().is_empty() {
        lines.push(format!("Example: {prefix}{}", command.example()));
    }
    if !command.sub_commands().is_empty() {
        let subs: Vec<&str> = command.sub_commands().iter().map(|c| c.name()).collect();
        lines.push(format!("Sub-commands: {}", subs.join(", ")));
    }
    lines.join("\n")
}

#[async_trait]
impl CommandHandler for HelpCommand {
    async fn execute(&self, ctx: &Ctx) -> Result<()> {
        let text = match ctx.arguments.get(0) {
            None => render_overview(&ctx.router),
            Some(name) => match ctx.router.get_cmd(name.raw()) {
                Some(command) => render_command(&ctx.router, command),
                None => format!("Unknown command `{}`.", name.raw()),
            },
        };
        ctx.respond_text(&text).await
    }
}
