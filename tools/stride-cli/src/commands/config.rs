//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match ctx.config_file {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let config = &ctx.config;

    ctx.output.info("");
    ctx.output.info("[api]");
    ctx.output.kv("base_url", &config.api.base_url);
    ctx.output.kv("timeout_secs", &config.api.timeout_secs.to_string());

    ctx.output.info("");
    ctx.output.info("[storage]");
    ctx.output.kv("path", &ctx.storage_path().display().to_string());
    ctx.output.kv("key", &config.storage.key);

    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output.kv("level", config.logging.level.as_str());
    ctx.output.kv("format", &format!("{:?}", config.logging.format).to_lowercase());
    if let Some(ref directives) = config.logging.directives {
        ctx.output.kv("directives", directives);
    }

    ctx.output.info("");
    ctx.output.info("[messages]");
    let messages = &config.messages;
    ctx.output.kv("add_failed", &messages.add_failed);
    ctx.output.kv("remove_failed", &messages.remove_failed);
    ctx.output.kv("update_failed", &messages.update_failed);
    ctx.output.kv("out_of_stock", &messages.out_of_stock);
    ctx.output.kv("cart_unreadable", &messages.cart_unreadable);

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("stride.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use crate::output::Output;

    fn context_in(dir: &std::path::Path) -> Context {
        Context {
            config: CliConfig::default(),
            config_file: None,
            output: Output::new(false, true),
            cwd: dir.to_path_buf(),
        }
    }

    #[tokio::test]
    async fn test_init_writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path());

        init_config(false, &ctx).await.unwrap();

        let path = dir.path().join("stride.toml");
        let loaded = CliConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded.storage.key, "stride:cart");
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stride.toml");
        fs::write(&path, "[api]\nbase_url = \"http://keep\"\n").unwrap();
        let ctx = context_in(dir.path());

        assert!(init_config(false, &ctx).await.is_err());
        assert!(fs::read_to_string(&path).unwrap().contains("http://keep"));

        init_config(true, &ctx).await.unwrap();
        assert!(!fs::read_to_string(&path).unwrap().contains("http://keep"));
    }
}
