//! Schema sanity tests
//!
//! The services select and insert through hand-written column lists, so
//! a drifted migration fails only at runtime against a live database.
//! These checks pin the DDL to the columns the queries actually use.

const INITIAL_MIGRATION: &str = include_str!("../migrations/20250801000000_initial.sql");

/// The CREATE TABLE block for one table
fn table_block(name: &str) -> &'static str {
    let header = format!("CREATE TABLE {} (", name);
    let start = INITIAL_MIGRATION
        .find(&header)
        .unwrap_or_else(|| panic!("no CREATE TABLE for {}", name));
    let end = INITIAL_MIGRATION[start..]
        .find(");")
        .unwrap_or_else(|| panic!("unterminated CREATE TABLE for {}", name))
        + start;
    &INITIAL_MIGRATION[start..end]
}

fn assert_columns(table: &str, columns: &[&str]) {
    let block = table_block(table);
    for column in columns {
        assert!(
            block.contains(column),
            "{} is missing column {}",
            table,
            column
        );
    }
}

/// Items carry a category; size and color belong to group variants
#[test]
fn test_items_table_matches_item_queries() {
    assert_columns(
        "items",
        &[
            "id",
            "sku",
            "name",
            "category",
            "warehouse_stocks",
            "created_at",
            "updated_at",
        ],
    );

    let block = table_block("items");
    assert!(!block.contains("size"), "size lives on variants, not items");
    assert!(!block.contains("color"), "color lives on variants, not items");
}

#[test]
fn test_item_groups_table_matches_group_queries() {
    assert_columns(
        "item_groups",
        &["id", "name", "variants", "created_at", "updated_at"],
    );
}

#[test]
fn test_transactions_table_matches_transaction_queries() {
    assert_columns(
        "transactions",
        &[
            "id", "txn_type", "cash", "bank", "upi", "loc_code", "txn_date", "note", "source",
            "created_at",
        ],
    );
}

#[test]
fn test_close_transactions_unique_per_store_day() {
    let block = table_block("close_transactions");
    assert_columns(
        "close_transactions",
        &[
            "id",
            "loc_code",
            "close_date",
            "close_cash",
            "calculated_cash",
            "calculated_bank",
            "note",
        ],
    );
    assert!(
        block.contains("UNIQUE (loc_code, close_date)"),
        "closing upsert needs the (loc_code, close_date) unique key"
    );
}

#[test]
fn test_sales_invoices_table_matches_invoice_queries() {
    assert_columns(
        "sales_invoices",
        &[
            "id",
            "number",
            "loc_code",
            "customer",
            "warehouse",
            "lines",
            "total",
            "cash",
            "bank",
            "upi",
            "invoice_date",
            "created_at",
        ],
    );
}

#[test]
fn test_counters_table_matches_sequence_queries() {
    assert_columns("counters", &["id", "seq"]);
}
