//! Command implementations, one module per resource.

pub mod auth;
pub mod order;
pub mod product;
pub mod report;
pub mod stock;
pub mod warehouse;

use stockpilot_console::view::{Keyed, ListView, SortDirection, SortField};

/// Build a loaded list view with the requested sort applied, so every
/// table the CLI prints goes through the same sorting path the pages use.
fn sorted_view<T: Keyed, F: SortField<T>>(
    items: Vec<T>,
    sort: Option<F>,
    desc: bool,
) -> ListView<T, F> {
    let mut view = ListView::loading();
    view.finish_load(Ok(items));
    match sort {
        Some(field) => {
            let direction = if desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            view.set_sort(field, direction);
        }
        None if desc => view.set_sort(F::DEFAULT_FIELD, SortDirection::Descending),
        None => {}
    }
    view
}
