//! Inventory records: stock movements issued to work orders.

pub mod wo_issue;

pub use wo_issue::{NewWoIssue, NewWoIssueItem, WoIssue, WoIssueItem};
