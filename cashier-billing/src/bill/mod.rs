//! Bill line items
//!
//! UI-side line item model and the transforms between it and the request
//! payload:
//!
//! - `validate_line_items`: selected lines → request lines, densely ordered
//! - `populate_existing_line_items`: saved request lines → editable lines,
//!   with background item-details enrichment
//! - `reorder_item_prices`: move an item's default price to the front of
//!   the line's price list

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::bill::{ItemPrice, RequestLineItem};

use crate::money::{self, to_decimal, to_f64};
use crate::utils::error::BillingError;

/// Billable item reference held by a bill line
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemStock {
    pub uuid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Enriched item record returned by the external details loader
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemDetails {
    pub uuid: String,
    /// Full price list for the item
    pub prices: Vec<ItemPrice>,
    /// The designated default among `prices`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_price: Option<ItemPrice>,
}

/// One editable line of the cashier bill
///
/// Created when an item is added to the bill, destroyed when removed or on
/// form reset. `prices` starts empty and is filled in once the item
/// details load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// Stable UI identity for the line (list keys, enrichment routing)
    pub instance_id: String,
    pub item_stock: ItemStock,
    /// Price snapshot the line was created with
    pub item_stock_price: ItemPrice,
    pub item_stock_quantity: i32,
    /// Selectable price list, default price first once details load
    pub prices: Vec<ItemPrice>,
    selected: bool,
    total: f64,
}

impl LineItem {
    pub fn new(item_stock: ItemStock, quantity: i32, price_snapshot: ItemPrice) -> Self {
        Self {
            instance_id: uuid::Uuid::new_v4().to_string(),
            item_stock,
            item_stock_price: price_snapshot,
            item_stock_quantity: quantity,
            prices: Vec::new(),
            selected: false,
            total: 0.0,
        }
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_total(&mut self, total: f64) {
        self.total = total;
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    /// Fold loaded item details into the line: adopt the full price list
    /// and move the item's default price to the front.
    pub fn apply_details(&mut self, details: &ItemDetails) {
        self.prices = details.prices.clone();
        reorder_item_prices(self, details);
    }
}

/// Form-controller surface the reconstruction flow reports back to
#[async_trait]
pub trait BillContext: Send + Sync {
    /// Fetch the full item record for an existing line. Fire-and-forget:
    /// completions may resolve in any order, and each is expected to fold
    /// the details into its line and trigger its own recompute.
    async fn load_item_details(&self, item_uuid: String, instance_id: String);

    /// Recompute the aggregate payable total held by the form. Idempotent.
    fn compute_total_price(&self);
}

/// Build the request-ready lines from the selected subset of the bill
///
/// Order numbers are dense over the selected subset, not the original
/// indices. An empty selection is an error: the bill must not be posted.
pub fn validate_line_items(line_items: &[LineItem]) -> Result<Vec<RequestLineItem>, BillingError> {
    let mut validated = Vec::new();

    for line in line_items.iter().filter(|l| l.is_selected()) {
        money::validate_line_item(line)?;
        validated.push(RequestLineItem {
            item: line.item_stock.uuid.clone(),
            line_item_order: validated.len() as i32,
            price: line.item_stock_price.price,
            price_name: line.item_stock_price.name.clone().unwrap_or_default(),
            price_uuid: line.item_stock_price.uuid.clone(),
            quantity: line.item_stock_quantity,
        });
    }

    if validated.is_empty() {
        return Err(BillingError::EmptySelection);
    }
    Ok(validated)
}

/// Rebuild the editable bill lines from a previously saved request payload
///
/// Each line comes back selected, its total restored from the saved
/// `price * quantity` snapshot. Item details load on background tasks; the
/// single `compute_total_price` call happens before any of them is
/// guaranteed to complete, so the initial total reflects only the
/// snapshots. Must be called from within a tokio runtime.
pub fn populate_existing_line_items(
    saved: &[RequestLineItem],
    ctx: &Arc<dyn BillContext>,
) -> Vec<LineItem> {
    let mut populated = Vec::with_capacity(saved.len());

    for saved_line in saved {
        let price_snapshot = ItemPrice {
            uuid: saved_line.price_uuid.clone(),
            name: (!saved_line.price_name.is_empty()).then(|| saved_line.price_name.clone()),
            price: saved_line.price,
        };
        let mut line = LineItem::new(
            ItemStock {
                uuid: saved_line.item.clone(),
                name: None,
            },
            saved_line.quantity,
            price_snapshot,
        );
        line.set_selected(true);
        line.set_total(to_f64(
            to_decimal(saved_line.price) * Decimal::from(saved_line.quantity),
        ));

        let ctx = Arc::clone(ctx);
        let item_uuid = saved_line.item.clone();
        let instance_id = line.instance_id.clone();
        tokio::spawn(async move {
            ctx.load_item_details(item_uuid, instance_id).await;
        });

        populated.push(line);
    }

    ctx.compute_total_price();
    populated
}

/// Move the item's default price to the front of the line's price list
///
/// Prices are matched by uuid. A missing default price, or a default that
/// is not in the line's list, leaves the list untouched.
pub fn reorder_item_prices(line_item: &mut LineItem, item_details: &ItemDetails) {
    let Some(default_price) = item_details
        .default_price
        .as_ref()
        .and_then(|default| item_details.prices.iter().find(|p| p.uuid == default.uuid))
    else {
        return;
    };

    match line_item
        .prices
        .iter()
        .position(|p| p.uuid == default_price.uuid)
    {
        Some(index) => {
            let price = line_item.prices.remove(index);
            line_item.prices.insert(0, price);
        }
        None => {
            tracing::debug!(
                item = %item_details.uuid,
                "default price not in line item price list, keeping order"
            );
        }
    }
}
