//! Stock query and movement commands.

use stockpilot_console::api::products::StockAdjustment;
use stockpilot_console::transfer::{FollowUpOrder, TransferOrchestrator, TransferPlan};
use stockpilot_console::{ApiClient, ApiError, ConsoleConfig};
use stockpilot_core::{ProductId, WarehouseId};

pub async fn show(
    client: &ApiClient,
    product: i32,
    warehouse: Option<i32>,
) -> Result<(), ApiError> {
    let product = ProductId::new(product);
    match warehouse {
        Some(warehouse) => {
            let stock = client.stock_at(product, WarehouseId::new(warehouse)).await?;
            println!("{}", stock.quantity);
        }
        None => {
            let summary = client.stock_summary(product).await?;
            println!("Total: {}", summary.total_quantity_all_warehouses);
            for id in &summary.warehouses_with_stock {
                let stock = client.stock_at(product, *id).await?;
                println!("  warehouse {id}: {}", stock.quantity);
            }
        }
    }
    Ok(())
}

pub async fn add(
    client: &ApiClient,
    product: i32,
    warehouse: i32,
    quantity: u32,
) -> Result<(), ApiError> {
    let outcome = client
        .add_stock(&StockAdjustment {
            product_id: ProductId::new(product),
            warehouse_id: WarehouseId::new(warehouse),
            quantity,
        })
        .await?;
    if outcome.is_success() {
        tracing::info!(
            "Added {quantity} units; stock is now {}",
            outcome.stock_quantity.unwrap_or_default()
        );
    } else {
        tracing::warn!("Stock add refused: {}", outcome.message_or_default());
    }
    Ok(())
}

pub async fn decrease(
    client: &ApiClient,
    product: i32,
    warehouse: i32,
    quantity: u32,
) -> Result<(), ApiError> {
    let outcome = client
        .decrease_stock(&StockAdjustment {
            product_id: ProductId::new(product),
            warehouse_id: WarehouseId::new(warehouse),
            quantity,
        })
        .await?;
    if outcome.is_success() {
        tracing::info!(
            "Wrote off {quantity} units; stock is now {}",
            outcome.stock_quantity.unwrap_or_default()
        );
    } else {
        tracing::warn!("Stock decrease refused: {}", outcome.message_or_default());
    }
    Ok(())
}

/// Run the transfer workflow: fetch current source stock, validate,
/// transfer, optionally create the receiving order.
pub async fn transfer(
    client: &ApiClient,
    config: &ConsoleConfig,
    product: i32,
    from: i32,
    to: i32,
    quantity: u32,
    create_order: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let product = ProductId::new(product);
    let source = WarehouseId::new(from);
    let destination = WarehouseId::new(to);

    let available = client.stock_at(product, source).await?.quantity;

    let orchestrator = TransferOrchestrator::new(client.clone(), config);
    let report = orchestrator
        .execute(&TransferPlan {
            product_id: product,
            source,
            destination: Some(destination),
            quantity,
            available,
            create_follow_up_order: create_order,
        })
        .await?;

    tracing::info!(
        "Transferred {quantity} units; source stock {}, destination stock {}",
        report.outcome.from_warehouse_stock,
        report.outcome.to_warehouse_stock
    );
    match report.follow_up {
        Some(FollowUpOrder::Created(order)) => {
            tracing::info!("Created receiving order {}", order.id);
        }
        Some(FollowUpOrder::Failed(message)) => {
            tracing::warn!("Stock was transferred, but the receiving order failed: {message}");
        }
        None => {}
    }

    // Confirmed quantities, re-fetched rather than trusted from the
    // transfer response.
    let source_stock = client.stock_at(product, source).await?.quantity;
    let destination_stock = client.stock_at(product, destination).await?.quantity;
    println!("warehouse {source}: {source_stock}");
    println!("warehouse {destination}: {destination_stock}");
    Ok(())
}
