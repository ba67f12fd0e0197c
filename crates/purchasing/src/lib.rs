//! Purchasing records (supplier side).

pub mod purch_data;
pub mod supp_allocation;

pub use purch_data::{NewPurchData, PurchData};
pub use supp_allocation::{NewSuppAllocation, SuppAllocation};
