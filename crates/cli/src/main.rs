//! Stockpilot CLI - console for the warehouse backend.
//!
//! # Usage
//!
//! ```bash
//! # List warehouses, products, orders
//! sp-cli warehouse list
//! sp-cli product list --warehouse 2
//! sp-cli order list --sort created-at
//!
//! # Stock operations
//! sp-cli stock show --product 10 --warehouse 1
//! sp-cli stock transfer --product 10 --from 1 --to 2 --quantity 5 --create-order
//!
//! # Order lifecycle
//! sp-cli order status 5 shipped
//! sp-cli order cancel 5 --reason "duplicate"
//!
//! # Reports
//! sp-cli report order 5
//! ```
//!
//! Credentials can be passed globally (`--username`/`--password`); the
//! session lives for the duration of the process.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand, ValueEnum};
use secrecy::SecretString;
use stockpilot_console::{ApiClient, ConsoleConfig, Session};

mod commands;

#[derive(Parser)]
#[command(name = "sp-cli")]
#[command(author, version, about = "Stockpilot warehouse console")]
struct Cli {
    /// Username for backend login (optional; backend may allow anonymous reads)
    #[arg(long, global = true)]
    username: Option<String>,

    /// Password for backend login
    #[arg(long, global = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify credentials against the backend
    Login,
    /// Show the identity bound to the current session
    Whoami,
    /// Manage warehouses
    Warehouse {
        #[command(subcommand)]
        action: WarehouseAction,
    },
    /// Manage products
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Query and move stock
    Stock {
        #[command(subcommand)]
        action: StockAction,
    },
    /// Manage orders
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Download spreadsheet reports
    Report {
        #[command(subcommand)]
        kind: ReportKind,
    },
}

#[derive(Subcommand)]
enum WarehouseAction {
    /// List all warehouses
    List {
        /// Sort column
        #[arg(long, value_enum)]
        sort: Option<WarehouseColumn>,
        /// Sort descending
        #[arg(long)]
        desc: bool,
    },
    /// Show one warehouse with its stock value
    Show { id: i32 },
    /// Create a warehouse
    Create {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        address: Option<String>,
    },
    /// Update a warehouse
    Update {
        id: i32,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        address: Option<String>,
    },
    /// Delete a warehouse
    Delete { id: i32 },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List products, optionally only those stocked at a warehouse
    List {
        #[arg(short, long)]
        warehouse: Option<i32>,
        #[arg(long, value_enum)]
        sort: Option<ProductColumn>,
        #[arg(long)]
        desc: bool,
    },
    /// Show one product
    Show { id: i32 },
    /// Create a product
    Create {
        #[arg(short, long)]
        name: String,
        #[arg(short = 't', long)]
        product_type: String,
        #[arg(short, long)]
        price: String,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Update a product
    Update {
        id: i32,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short = 't', long)]
        product_type: Option<String>,
        #[arg(short, long)]
        price: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a product
    Delete { id: i32 },
}

#[derive(Subcommand)]
enum StockAction {
    /// Show stock of a product, at one warehouse or across all
    Show {
        #[arg(long)]
        product: i32,
        #[arg(long)]
        warehouse: Option<i32>,
    },
    /// Add stock at a warehouse
    Add {
        #[arg(long)]
        product: i32,
        #[arg(long)]
        warehouse: i32,
        #[arg(short, long)]
        quantity: u32,
    },
    /// Write off stock at a warehouse
    Decrease {
        #[arg(long)]
        product: i32,
        #[arg(long)]
        warehouse: i32,
        #[arg(short, long)]
        quantity: u32,
    },
    /// Move stock between warehouses
    Transfer {
        #[arg(long)]
        product: i32,
        #[arg(long)]
        from: i32,
        #[arg(long)]
        to: i32,
        #[arg(short, long)]
        quantity: u32,
        /// Also create a receiving order at the destination
        #[arg(long)]
        create_order: bool,
    },
}

#[derive(Subcommand)]
enum OrderAction {
    /// List all orders
    List {
        #[arg(long, value_enum)]
        sort: Option<OrderColumn>,
        #[arg(long)]
        desc: bool,
    },
    /// Show one order with its items
    Show { id: i32 },
    /// Create an order
    Create {
        #[arg(long)]
        warehouse: i32,
        #[arg(short, long)]
        client: String,
        #[arg(short, long)]
        address: String,
        #[arg(long)]
        comment: Option<String>,
        /// Line item as `product_id:quantity`; repeatable
        #[arg(short, long = "item", required = true)]
        items: Vec<String>,
    },
    /// Advance an order's status (new, processing, shipped, completed)
    Status { id: i32, status: String },
    /// Cancel an order with a reason
    Cancel {
        id: i32,
        #[arg(short, long)]
        reason: String,
    },
}

#[derive(Subcommand)]
enum ReportKind {
    /// Stock levels across all warehouses
    Stock {
        #[arg(short, long)]
        out: Option<String>,
    },
    /// All orders
    Orders {
        #[arg(short, long)]
        out: Option<String>,
    },
    /// A single order
    Order {
        id: i32,
        #[arg(short, long)]
        out: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum WarehouseColumn {
    Id,
    Name,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProductColumn {
    Id,
    Name,
    Type,
    Price,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OrderColumn {
    Id,
    Status,
    CreatedAt,
    Client,
    Total,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ConsoleConfig::from_env()?;
    let client = ApiClient::new(&config)?;
    let mut session = Session::new(client.clone());

    // A provided credential pair authenticates the whole invocation.
    if let (Some(username), Some(password)) = (&cli.username, &cli.password) {
        session
            .login(username, &SecretString::from(password.clone()))
            .await?;
    }

    match cli.command {
        Commands::Login => commands::auth::login(&session)?,
        Commands::Whoami => commands::auth::whoami(&mut session).await?,
        Commands::Warehouse { action } => match action {
            WarehouseAction::List { sort, desc } => {
                commands::warehouse::list(&client, sort.map(Into::into), desc).await?;
            }
            WarehouseAction::Show { id } => commands::warehouse::show(&client, id).await?,
            WarehouseAction::Create { name, address } => {
                commands::warehouse::create(&client, name, address).await?;
            }
            WarehouseAction::Update { id, name, address } => {
                commands::warehouse::update(&client, id, name, address).await?;
            }
            WarehouseAction::Delete { id } => commands::warehouse::delete(&client, id).await?,
        },
        Commands::Product { action } => match action {
            ProductAction::List {
                warehouse,
                sort,
                desc,
            } => {
                commands::product::list(&client, warehouse, sort.map(Into::into), desc).await?;
            }
            ProductAction::Show { id } => commands::product::show(&client, id).await?,
            ProductAction::Create {
                name,
                product_type,
                price,
                description,
            } => {
                commands::product::create(&client, name, product_type, &price, description).await?;
            }
            ProductAction::Update {
                id,
                name,
                product_type,
                price,
                description,
            } => {
                commands::product::update(&client, id, name, product_type, price, description)
                    .await?;
            }
            ProductAction::Delete { id } => commands::product::delete(&client, id).await?,
        },
        Commands::Stock { action } => match action {
            StockAction::Show { product, warehouse } => {
                commands::stock::show(&client, product, warehouse).await?;
            }
            StockAction::Add {
                product,
                warehouse,
                quantity,
            } => commands::stock::add(&client, product, warehouse, quantity).await?,
            StockAction::Decrease {
                product,
                warehouse,
                quantity,
            } => commands::stock::decrease(&client, product, warehouse, quantity).await?,
            StockAction::Transfer {
                product,
                from,
                to,
                quantity,
                create_order,
            } => {
                commands::stock::transfer(&client, &config, product, from, to, quantity, create_order)
                    .await?;
            }
        },
        Commands::Order { action } => match action {
            OrderAction::List { sort, desc } => {
                commands::order::list(&client, sort.map(Into::into), desc).await?;
            }
            OrderAction::Show { id } => commands::order::show(&client, id).await?,
            OrderAction::Create {
                warehouse,
                client: client_name,
                address,
                comment,
                items,
            } => {
                commands::order::create(&client, warehouse, client_name, address, comment, &items)
                    .await?;
            }
            OrderAction::Status { id, status } => {
                commands::order::status(&client, id, &status).await?;
            }
            OrderAction::Cancel { id, reason } => {
                commands::order::cancel(&client, id, &reason).await?;
            }
        },
        Commands::Report { kind } => match kind {
            ReportKind::Stock { out } => commands::report::stock(&client, out).await?,
            ReportKind::Orders { out } => commands::report::orders(&client, out).await?,
            ReportKind::Order { id, out } => commands::report::order(&client, id, out).await?,
        },
    }
    Ok(())
}

impl From<WarehouseColumn> for stockpilot_console::view::WarehouseSortField {
    fn from(column: WarehouseColumn) -> Self {
        match column {
            WarehouseColumn::Id => Self::Id,
            WarehouseColumn::Name => Self::Name,
        }
    }
}

impl From<ProductColumn> for stockpilot_console::view::ProductSortField {
    fn from(column: ProductColumn) -> Self {
        match column {
            ProductColumn::Id => Self::Id,
            ProductColumn::Name => Self::Name,
            ProductColumn::Type => Self::ProductType,
            ProductColumn::Price => Self::Price,
        }
    }
}

impl From<OrderColumn> for stockpilot_console::view::OrderSortField {
    fn from(column: OrderColumn) -> Self {
        match column {
            OrderColumn::Id => Self::Id,
            OrderColumn::Status => Self::Status,
            OrderColumn::CreatedAt => Self::CreatedAt,
            OrderColumn::Client => Self::ClientName,
            OrderColumn::Total => Self::TotalPrice,
        }
    }
}
