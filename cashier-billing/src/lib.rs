//! Cashier billing helpers for the clinical POS billing screen
//!
//! # Module structure
//!
//! ```text
//! cashier-billing/src/
//! ├── money/     # Decimal arithmetic: formatting, rounding, payable totals
//! ├── bill/      # Line items: UI models, validation, reconstruction, price order
//! ├── payments/  # Payment transforms between UI model and request payload
//! ├── dialog/    # Confirmation dialog orchestration
//! └── utils/     # Errors, logging, input validation
//! ```
//!
//! Every operation is view-model glue invoked from UI event handlers; the
//! modal chrome, the item-details endpoint and the save/post actions stay
//! behind injected traits.

pub mod bill;
pub mod dialog;
pub mod money;
pub mod payments;
pub mod utils;

// Re-export public types
pub use bill::{
    BillContext, ItemDetails, ItemStock, LineItem, populate_existing_line_items,
    reorder_item_prices, validate_line_items,
};
pub use dialog::{
    BackgroundGuard, BillForm, ConfirmationDialog, DialogState, ModalService, SaveActions,
};
pub use money::{
    PricedItem, calculate_total_payable, format_item_price, is_payment_sufficient, money_eq,
    round_item_price,
};
pub use payments::{
    AttributeTypeDefinition, AttributeTypeRef, AttributeTypeValidator,
    ModeAttributeTypeValidator, Payment, PaymentAttribute, PaymentModeRef, create_payment,
    populate_payments,
};
pub use utils::{BillingError, BillingResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
