//! Business logic services for the Stride retail back-office

pub mod adjustment;
pub mod auth;
pub mod invoicing;
pub mod item;
pub mod purchasing;
pub mod reconciliation;
pub mod report;
pub mod sequence;
pub mod stock_ledger;
pub mod transaction;

pub use adjustment::AdjustmentService;
pub use auth::AuthService;
pub use invoicing::InvoicingService;
pub use item::ItemService;
pub use purchasing::PurchasingService;
pub use reconciliation::ReconciliationService;
pub use report::ReportService;
pub use sequence::SequenceService;
pub use stock_ledger::StockLedgerService;
pub use transaction::TransactionService;
