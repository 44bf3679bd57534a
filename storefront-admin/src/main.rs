mod drafts;

use anyhow::Context;
use storefront_core::repository::OrderRepository;
use storefront_order::{OrderStats, OrderTab, PricingEngine};
use storefront_store::{app_config::Config, CatalogSeed, MemoryStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::drafts::OrderDraft;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load config")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let orders_path = std::env::args()
        .nth(1)
        .context("usage: storefront-admin <orders.json>")?;

    let store = MemoryStore::new();
    match &config.catalog.seed_path {
        Some(seed_path) => {
            CatalogSeed::from_path(seed_path)
                .with_context(|| format!("Failed to read catalog seed {}", seed_path))?
                .load_into(&store.categories(), &store.brands(), &store.products())
                .await?;
        }
        None => tracing::warn!("No catalog seed configured, every product lookup will fail"),
    }

    let drafts = OrderDraft::list_from_path(&orders_path)
        .with_context(|| format!("Failed to read order drafts {}", orders_path))?;
    tracing::info!("Pricing {} order draft(s) from {}", drafts.len(), orders_path);

    let engine = PricingEngine::new(store.products());
    let products = store.products();
    let orders = store.orders();

    // A rejected draft is logged and skipped
    for (index, draft) in drafts.iter().enumerate() {
        match draft.compose(&engine, &products, config.pricing.default_currency).await {
            Ok(order) => {
                orders.save(&order).await?;
                tracing::info!("Order {} ({:?}): {}", order.id, order.status, order.grand_total_display());
            }
            Err(e) => tracing::error!("Order draft #{} rejected: {}", index + 1, e),
        }
    }

    let all = orders.list(OrderTab::All).await?;
    let stats = OrderStats::collect(&all, config.pricing.default_currency)?;
    tracing::info!(
        "New: {}, Processing: {}, Shipped: {}, Average: {}",
        stats.new_orders,
        stats.processing_orders,
        stats.shipped_orders,
        stats.average_display()
    );

    Ok(())
}
