//! Warehouse commands.

use stockpilot_console::api::warehouses::{WarehouseCreate, WarehouseUpdate};
use stockpilot_console::view::{total_stock_value, WarehouseSortField};
use stockpilot_console::{ApiClient, ApiError};
use stockpilot_core::WarehouseId;

pub async fn list(
    client: &ApiClient,
    sort: Option<WarehouseSortField>,
    desc: bool,
) -> Result<(), ApiError> {
    let warehouses = client.list_warehouses().await?;
    let view = super::sorted_view(warehouses, sort, desc);

    println!("{:<6} {:<24} ADDRESS", "ID", "NAME");
    for w in view.sorted() {
        println!(
            "{:<6} {:<24} {}",
            w.id,
            w.name,
            w.address.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

/// Show one warehouse together with the total value of its stock.
pub async fn show(client: &ApiClient, id: i32) -> Result<(), ApiError> {
    let id = WarehouseId::new(id);
    let warehouse = client.get_warehouse(id).await?;
    let products = client.list_products(Some(id)).await?;
    let product_ids: Vec<_> = products.iter().map(|p| p.id).collect();
    let quantities = client.stock_levels(&product_ids, id).await;
    let value = total_stock_value(&products, &quantities);

    println!("Warehouse {}: {}", warehouse.id, warehouse.name);
    println!("Address: {}", warehouse.address.as_deref().unwrap_or("-"));
    println!("Stocked products: {}", products.len());
    println!("Total stock value: {value}");
    for p in &products {
        let qty = quantities.get(&p.id).copied().unwrap_or(0);
        println!("  {:<6} {:<24} x{:<6} @ {}", p.id, p.name, qty, p.price);
    }
    Ok(())
}

pub async fn create(
    client: &ApiClient,
    name: String,
    address: Option<String>,
) -> Result<(), ApiError> {
    let warehouse = client
        .create_warehouse(&WarehouseCreate { name, address })
        .await?;
    tracing::info!("Created warehouse {} ({})", warehouse.id, warehouse.name);
    Ok(())
}

pub async fn update(
    client: &ApiClient,
    id: i32,
    name: Option<String>,
    address: Option<String>,
) -> Result<(), ApiError> {
    let warehouse = client
        .update_warehouse(WarehouseId::new(id), &WarehouseUpdate { name, address })
        .await?;
    tracing::info!("Updated warehouse {} ({})", warehouse.id, warehouse.name);
    Ok(())
}

pub async fn delete(client: &ApiClient, id: i32) -> Result<(), ApiError> {
    let outcome = client.delete_warehouse(WarehouseId::new(id)).await?;
    if outcome.is_success() {
        tracing::info!("Deleted warehouse {id}");
    } else {
        tracing::warn!("Backend refused deletion: {}", outcome.message);
    }
    Ok(())
}
