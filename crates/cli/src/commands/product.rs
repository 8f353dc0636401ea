//! Product commands.

use rust_decimal::Decimal;
use stockpilot_console::api::products::{ProductCreate, ProductUpdate};
use stockpilot_console::view::ProductSortField;
use stockpilot_console::{ApiClient, ApiError};
use stockpilot_core::{ProductId, WarehouseId};

pub async fn list(
    client: &ApiClient,
    warehouse: Option<i32>,
    sort: Option<ProductSortField>,
    desc: bool,
) -> Result<(), ApiError> {
    let products = client
        .list_products(warehouse.map(WarehouseId::new))
        .await?;
    let view = super::sorted_view(products, sort, desc);

    println!("{:<6} {:<24} {:<16} PRICE", "ID", "NAME", "TYPE");
    for p in view.sorted() {
        println!("{:<6} {:<24} {:<16} {}", p.id, p.name, p.product_type, p.price);
    }
    Ok(())
}

pub async fn show(client: &ApiClient, id: i32) -> Result<(), ApiError> {
    let id = ProductId::new(id);
    let product = client.get_product(id).await?;
    let summary = client.stock_summary(id).await?;

    println!("Product {}: {}", product.id, product.name);
    println!("Type: {}", product.product_type);
    println!("Price: {}", product.price);
    if let Some(description) = &product.product_description {
        println!("Description: {description}");
    }
    println!("Total stock: {}", summary.total_quantity_all_warehouses);
    let warehouses: Vec<String> = summary
        .warehouses_with_stock
        .iter()
        .map(ToString::to_string)
        .collect();
    println!("Stocked at warehouses: {}", warehouses.join(", "));
    Ok(())
}

pub async fn create(
    client: &ApiClient,
    name: String,
    product_type: String,
    price: &str,
    description: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let price: Decimal = price.parse()?;
    let product = client
        .create_product(&ProductCreate {
            name,
            product_type,
            price,
            product_description: description,
        })
        .await?;
    tracing::info!("Created product {} ({})", product.id, product.name);
    Ok(())
}

pub async fn update(
    client: &ApiClient,
    id: i32,
    name: Option<String>,
    product_type: Option<String>,
    price: Option<String>,
    description: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let price = price.map(|p| p.parse::<Decimal>()).transpose()?;
    let product = client
        .update_product(
            ProductId::new(id),
            &ProductUpdate {
                name,
                product_type,
                price,
                product_description: description,
            },
        )
        .await?;
    tracing::info!("Updated product {} ({})", product.id, product.name);
    Ok(())
}

pub async fn delete(client: &ApiClient, id: i32) -> Result<(), ApiError> {
    let outcome = client.delete_product(ProductId::new(id)).await?;
    if outcome.is_success() {
        tracing::info!("Deleted product {id}");
    } else {
        tracing::warn!("Backend refused deletion: {}", outcome.message);
    }
    Ok(())
}
