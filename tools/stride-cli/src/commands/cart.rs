//! Cart commands: show, add, remove and update.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context as _, Result};
use stride_cache::FileStore;
use stride_cart::{
    CartManager, CartOperation, CartOutcome, FanOutNotifier, LogNotifier, RecordingNotifier,
    UpdateProductAmount,
};
use stride_data::{FetchClient, HttpCatalog};

use super::{AddArgs, RemoveArgs, UpdateArgs};
use crate::context::Context;

/// A loaded cart plus the notifications it has raised so far.
///
/// Notifications are also logged, so `--verbose` and JSON log output carry
/// them alongside the cart events.
struct Session {
    manager: CartManager,
    notifier: Arc<RecordingNotifier>,
}

impl Session {
    fn open(ctx: &Context) -> Result<Self> {
        let storage_path = ctx.storage_path();
        let store = FileStore::open(&storage_path)
            .with_context(|| format!("Failed to open storage: {}", storage_path.display()))?;
        let client = FetchClient::new()
            .with_base_url(ctx.config.api.base_url.as_str())
            .with_timeout(Duration::from_secs(ctx.config.api.timeout_secs));

        ctx.output.debug(&format!("API: {}", client.base_url().unwrap_or("-")));
        ctx.output.debug(&format!("Storage: {}", store.path().display()));

        let notifier = Arc::new(RecordingNotifier::new());
        let fan_out = FanOutNotifier::new()
            .with(notifier.clone())
            .with(Arc::new(LogNotifier));
        let manager = CartManager::load(
            Arc::new(HttpCatalog::with_client(client)),
            Arc::new(store),
            Arc::new(fan_out),
            ctx.config.cart_config(),
        );

        Ok(Self { manager, notifier })
    }

    /// Print what happened and turn a failed outcome into an error.
    fn report(&self, ctx: &Context, operation: CartOperation, outcome: CartOutcome) -> Result<()> {
        let notifications = self.notifier.take();

        if ctx.output.is_json() {
            ctx.output.json(&serde_json::json!({
                "operation": operation.to_string(),
                "outcome": outcome_label(outcome),
                "notifications": notifications,
                "cart": self.manager.cart(),
            }));
        } else {
            for notification in &notifications {
                ctx.output.notification(notification);
            }
            match outcome {
                CartOutcome::Updated => {
                    ctx.output.success("Cart updated");
                    ctx.output.cart(self.manager.cart());
                }
                CartOutcome::Unchanged => ctx.output.info("Nothing to change"),
                CartOutcome::Failed(_) => {}
            }
        }

        if let CartOutcome::Failed(kind) = outcome {
            bail!("{} failed: {}", operation, kind.as_str());
        }
        Ok(())
    }
}

fn outcome_label(outcome: CartOutcome) -> &'static str {
    match outcome {
        CartOutcome::Updated => "updated",
        CartOutcome::Unchanged => "unchanged",
        CartOutcome::Failed(_) => "failed",
    }
}

/// Print the persisted cart without touching the API.
pub async fn show(ctx: &Context) -> Result<()> {
    let session = Session::open(ctx)?;
    let notifications = session.notifier.take();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "notifications": notifications,
            "cart": session.manager.cart(),
        }));
        return Ok(());
    }

    for notification in &notifications {
        ctx.output.notification(notification);
    }
    ctx.output.header("Cart");
    ctx.output.cart(session.manager.cart());
    Ok(())
}

pub async fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let mut session = Session::open(ctx)?;

    let spinner = ctx.output.spinner(&format!("Adding product {}...", args.id));
    let outcome = session.manager.add_product(args.id).await;
    spinner.finish_and_clear();

    session.report(ctx, CartOperation::Add, outcome)
}

pub async fn remove(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let mut session = Session::open(ctx)?;
    let outcome = session.manager.remove_product(args.id);
    session.report(ctx, CartOperation::Remove, outcome)
}

pub async fn update(args: UpdateArgs, ctx: &Context) -> Result<()> {
    let mut session = Session::open(ctx)?;

    let spinner = ctx
        .output
        .spinner(&format!("Checking stock for product {}...", args.id));
    let outcome = session
        .manager
        .update_product_amount(UpdateProductAmount::new(args.id, args.amount))
        .await;
    spinner.finish_and_clear();

    session.report(ctx, CartOperation::UpdateAmount, outcome)
}
