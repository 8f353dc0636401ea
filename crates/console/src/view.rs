//! Per-page view state.
//!
//! Each page owns one [`ListView`] or [`DetailView`]: the
//! authoritative-for-this-session copy of what the backend last
//! returned, plus UI-local state (sort column and direction, selection,
//! a pending-action flag). Sorting is a purely local derived view and
//! never triggers a request.
//!
//! # Commit protocol
//!
//! After a successful mutation the caller either patches the one
//! changed entity into place ([`ListView::patch`], when the server's
//! response is the mutation's full effect) or replaces the whole
//! collection from a re-fetch ([`ListView::replace`], whenever derived
//! data such as stock or `warehouses_with_stock` may have shifted).
//! When in doubt, re-fetch; partial knowledge is not assumed complete.

use std::cmp::Ordering;
use std::collections::HashMap;

use rust_decimal::Decimal;
use stockpilot_core::{Order, OrderId, Product, ProductId, Warehouse, WarehouseId};

use crate::error::ApiError;

// ============================================================================
// Load state and sorting primitives
// ============================================================================

/// Where a page is in its load lifecycle.
///
/// `Failed` is terminal for the page; there is no retry loop. A fresh
/// view must be constructed to try again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// A sortable column of entity `T`.
///
/// Implementations supply the comparator and the page's default sort.
pub trait SortField<T>: Copy + PartialEq {
    const DEFAULT_FIELD: Self;
    const DEFAULT_DIRECTION: SortDirection;

    fn compare(self, a: &T, b: &T) -> Ordering;
}

/// Entity with a stable identifier usable for selection and patching.
pub trait Keyed {
    type Key: Copy + PartialEq + std::fmt::Debug;

    fn key(&self) -> Self::Key;
}

/// Case-insensitive lexicographic comparison for string columns.
fn cmp_str(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

// ============================================================================
// Per-entity sort fields
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarehouseSortField {
    Id,
    Name,
}

impl SortField<Warehouse> for WarehouseSortField {
    const DEFAULT_FIELD: Self = Self::Id;
    const DEFAULT_DIRECTION: SortDirection = SortDirection::Ascending;

    fn compare(self, a: &Warehouse, b: &Warehouse) -> Ordering {
        match self {
            Self::Id => a.id.cmp(&b.id),
            Self::Name => cmp_str(&a.name, &b.name),
        }
    }
}

impl Keyed for Warehouse {
    type Key = WarehouseId;

    fn key(&self) -> WarehouseId {
        self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSortField {
    Id,
    Name,
    ProductType,
    Price,
}

impl SortField<Product> for ProductSortField {
    const DEFAULT_FIELD: Self = Self::Id;
    const DEFAULT_DIRECTION: SortDirection = SortDirection::Ascending;

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Id => a.id.cmp(&b.id),
            Self::Name => cmp_str(&a.name, &b.name),
            Self::ProductType => cmp_str(&a.product_type, &b.product_type),
            Self::Price => a.price.cmp(&b.price),
        }
    }
}

impl Keyed for Product {
    type Key = ProductId;

    fn key(&self) -> ProductId {
        self.id
    }
}

/// Orders default to newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSortField {
    Id,
    Status,
    CreatedAt,
    ClientName,
    TotalPrice,
}

impl SortField<Order> for OrderSortField {
    const DEFAULT_FIELD: Self = Self::CreatedAt;
    const DEFAULT_DIRECTION: SortDirection = SortDirection::Descending;

    fn compare(self, a: &Order, b: &Order) -> Ordering {
        match self {
            Self::Id => a.id.cmp(&b.id),
            Self::Status => cmp_str(&a.status.to_string(), &b.status.to_string()),
            Self::CreatedAt => a.created_at.cmp(&b.created_at),
            Self::ClientName => cmp_str(&a.client_name, &b.client_name),
            Self::TotalPrice => a.total_price.cmp(&b.total_price),
        }
    }
}

impl Keyed for Order {
    type Key = OrderId;

    fn key(&self) -> OrderId {
        self.id
    }
}

// ============================================================================
// List view
// ============================================================================

/// View state for a collection page.
///
/// Items are stored in the order the backend returned them; [`Self::sorted`]
/// derives the display order without mutating the stored list, so ties
/// always keep their fetch order regardless of how often the user re-sorts.
#[derive(Debug, Clone)]
pub struct ListView<T: Keyed, F: SortField<T>> {
    items: Vec<T>,
    load: LoadState,
    sort_field: F,
    direction: SortDirection,
    selected: Option<T::Key>,
    pending: bool,
}

impl<T: Keyed, F: SortField<T>> ListView<T, F> {
    /// A fresh view in the loading state with the page's default sort.
    #[must_use]
    pub fn loading() -> Self {
        Self {
            items: Vec::new(),
            load: LoadState::Loading,
            sort_field: F::DEFAULT_FIELD,
            direction: F::DEFAULT_DIRECTION,
            selected: None,
            pending: false,
        }
    }

    /// Commit the initial fetch, success or failure. The loading state
    /// is cleared on both paths.
    pub fn finish_load(&mut self, result: Result<Vec<T>, ApiError>) {
        match result {
            Ok(items) => {
                self.items = items;
                self.load = LoadState::Loaded;
            }
            Err(e) => {
                self.items.clear();
                self.load = LoadState::Failed(e.to_string());
            }
        }
    }

    #[must_use]
    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.load == LoadState::Loading
    }

    /// Click a column header: same field flips direction, a new field
    /// resets to ascending.
    pub fn sort_on(&mut self, field: F) {
        if field == self.sort_field {
            self.direction = self.direction.toggled();
        } else {
            self.sort_field = field;
            self.direction = SortDirection::Ascending;
        }
    }

    /// Set the sort directly, bypassing the header-click toggle.
    pub fn set_sort(&mut self, field: F, direction: SortDirection) {
        self.sort_field = field;
        self.direction = direction;
    }

    #[must_use]
    pub fn sort_state(&self) -> (F, SortDirection) {
        (self.sort_field, self.direction)
    }

    /// Items in display order. Stable for ties.
    #[must_use]
    pub fn sorted(&self) -> Vec<&T> {
        let mut out: Vec<&T> = self.items.iter().collect();
        out.sort_by(|a, b| {
            let ord = self.sort_field.compare(a, b);
            match self.direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });
        out
    }

    /// Raw items in fetch order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Commit a mutation whose full effect is the returned entity:
    /// swap the matching item in place. Unknown keys are appended,
    /// covering creates.
    pub fn patch(&mut self, entity: T) {
        match self.items.iter_mut().find(|i| i.key() == entity.key()) {
            Some(slot) => *slot = entity,
            None => self.items.push(entity),
        }
    }

    /// Remove an entity after a confirmed delete.
    pub fn remove(&mut self, key: T::Key) {
        self.items.retain(|i| i.key() != key);
        if self.selected == Some(key) {
            self.selected = None;
        }
    }

    /// Commit a mutation by re-fetch: replace the whole collection.
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.load = LoadState::Loaded;
    }

    pub fn select(&mut self, key: T::Key) {
        self.selected = Some(key);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    #[must_use]
    pub fn selected(&self) -> Option<&T> {
        let key = self.selected?;
        self.items.iter().find(|i| i.key() == key)
    }

    /// Mark a mutating action in flight. Re-entrant actions are the
    /// caller's bug; the flag is a plain bool.
    pub fn begin_action(&mut self) {
        self.pending = true;
    }

    pub fn end_action(&mut self) {
        self.pending = false;
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

// ============================================================================
// Detail view
// ============================================================================

/// View state for a single-entity page.
#[derive(Debug, Clone)]
pub struct DetailView<T> {
    entity: Option<T>,
    load: LoadState,
    pending: bool,
}

impl<T> DetailView<T> {
    #[must_use]
    pub fn loading() -> Self {
        Self {
            entity: None,
            load: LoadState::Loading,
            pending: false,
        }
    }

    pub fn finish_load(&mut self, result: Result<T, ApiError>) {
        match result {
            Ok(entity) => {
                self.entity = Some(entity);
                self.load = LoadState::Loaded;
            }
            Err(e) => {
                self.entity = None;
                self.load = LoadState::Failed(e.to_string());
            }
        }
    }

    #[must_use]
    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    #[must_use]
    pub fn entity(&self) -> Option<&T> {
        self.entity.as_ref()
    }

    /// Replace the entity with the server's authoritative copy.
    pub fn patch(&mut self, entity: T) {
        self.entity = Some(entity);
        self.load = LoadState::Loaded;
    }

    pub fn begin_action(&mut self) {
        self.pending = true;
    }

    pub fn end_action(&mut self) {
        self.pending = false;
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

// ============================================================================
// Derived aggregates
// ============================================================================

/// Total value of the stock held at one warehouse: sum of price times
/// quantity over the given per-product quantities. Products missing
/// from the map count as zero.
#[must_use]
pub fn total_stock_value(products: &[Product], quantities: &HashMap<ProductId, i64>) -> Decimal {
    products
        .iter()
        .map(|p| {
            let qty = quantities.get(&p.id).copied().unwrap_or(0);
            p.price * Decimal::from(qty)
        })
        .sum()
}
