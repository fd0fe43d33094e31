//! Entity definitions for the inventory ledger schema.
//!
//! Reference data (warehouses, articles, movement types, users, business
//! partners, document types) is read-only from the core's point of view;
//! the mutable tables are vouchers, voucher lines, stock balances and the
//! append-only kardex.

pub mod article;
pub mod business_partner;
pub mod document_type;
pub mod kardex_entry;
pub mod movement_type;
pub mod stock_balance;
pub mod user;
pub mod voucher;
pub mod voucher_line;
pub mod warehouse;
