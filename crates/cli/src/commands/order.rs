//! Order commands.

use stockpilot_console::api::orders::{OrderCreate, OrderItemCreate};
use stockpilot_console::lifecycle::OrderLifecycle;
use stockpilot_console::view::OrderSortField;
use stockpilot_console::{ApiClient, ApiError};
use stockpilot_core::{OrderId, OrderStatus, ProductId, WarehouseId};

pub async fn list(
    client: &ApiClient,
    sort: Option<OrderSortField>,
    desc: bool,
) -> Result<(), ApiError> {
    let orders = client.list_orders().await?;
    let view = super::sorted_view(orders, sort, desc);

    println!(
        "{:<6} {:<12} {:<18} {:<20} TOTAL",
        "ID", "STATUS", "CREATED", "CLIENT"
    );
    for o in view.sorted() {
        println!(
            "{:<6} {:<12} {:<18} {:<20} {}",
            o.id,
            o.status,
            o.created_at.format("%Y-%m-%d %H:%M"),
            o.client_name,
            o.total_price
        );
    }
    Ok(())
}

pub async fn show(client: &ApiClient, id: i32) -> Result<(), ApiError> {
    let order = client.get_order(OrderId::new(id)).await?;

    println!("Order {} ({})", order.id, order.status);
    println!("Created: {}", order.created_at.format("%Y-%m-%d %H:%M"));
    println!("Warehouse: {}", order.warehouse);
    println!("Client: {}", order.client_name);
    println!("Destination: {}", order.destination_address);
    if let Some(comment) = &order.comment {
        println!("Comment: {comment}");
    }
    if let Some(reason) = &order.cancellation_reason {
        println!("Cancellation reason: {reason}");
    }
    println!("Items:");
    for item in &order.items {
        println!(
            "  {:<6} {:<24} x{:<6} @ {} = {}",
            item.product_id,
            item.name,
            item.quantity,
            item.price,
            item.line_total()
        );
    }
    println!("Total: {}", order.total_price);
    Ok(())
}

pub async fn create(
    client: &ApiClient,
    warehouse: i32,
    client_name: String,
    address: String,
    comment: Option<String>,
    items: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let items = items
        .iter()
        .map(|raw| parse_item(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let order = client
        .create_order(&OrderCreate {
            warehouse_id: WarehouseId::new(warehouse),
            client_name,
            destination_address: address,
            comment,
            items,
        })
        .await?;
    tracing::info!("Created order {} with total {}", order.id, order.total_price);
    Ok(())
}

pub async fn status(
    client: &ApiClient,
    id: i32,
    status: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let target: OrderStatus = status.parse()?;
    let order = client.get_order(OrderId::new(id)).await?;

    let lifecycle = OrderLifecycle::new(client.clone());
    let change = lifecycle.advance(&order, target).await?;
    tracing::info!("Order {} is now {}", change.order.id, change.order.status);

    if let Some(report) = change.completion {
        if report.is_clean() {
            tracing::info!("Received stock booked for all {} items", change.order.items.len());
        } else {
            for failure in &report.failures {
                tracing::warn!(
                    "Stock for {} (product {}) was not booked: {}",
                    failure.name,
                    failure.product_id,
                    failure.message
                );
            }
        }
    }
    Ok(())
}

pub async fn cancel(
    client: &ApiClient,
    id: i32,
    reason: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let order = client.get_order(OrderId::new(id)).await?;

    let lifecycle = OrderLifecycle::new(client.clone());
    let cancelled = lifecycle.cancel(&order, reason).await?;
    tracing::info!(
        "Order {} cancelled: {}",
        cancelled.id,
        cancelled.cancellation_reason.as_deref().unwrap_or(reason)
    );
    Ok(())
}

/// Parse a `product_id:quantity` line-item argument.
fn parse_item(raw: &str) -> Result<OrderItemCreate, String> {
    let (product, quantity) = raw
        .split_once(':')
        .ok_or_else(|| format!("invalid item '{raw}', expected product_id:quantity"))?;
    let product_id: i32 = product
        .parse()
        .map_err(|_| format!("invalid product id in '{raw}'"))?;
    let quantity: u32 = quantity
        .parse()
        .map_err(|_| format!("invalid quantity in '{raw}'"))?;
    Ok(OrderItemCreate {
        product_id: ProductId::new(product_id),
        quantity,
    })
}
