use ledgerdesk_core::RecordId;
use ledgerdesk_inventory::{NewWoIssue, NewWoIssueItem, WoIssue, WoIssueItem};

use crate::{Fetched, Resource, ResourceClient};

/// `/api/wo-issues`
pub struct WoIssuesApi;

impl Resource for WoIssuesApi {
    const NAME: &'static str = "work order issue";
    const PATH: &'static str = "/api/wo-issues";

    type Record = WoIssue;
    type Payload = NewWoIssue;
}

/// `/api/wo-issue-items`
pub struct WoIssueItemsApi;

impl Resource for WoIssueItemsApi {
    const NAME: &'static str = "work order issue item";
    const PATH: &'static str = "/api/wo-issue-items";

    type Record = WoIssueItem;
    type Payload = NewWoIssueItem;
}

pub type WoIssueClient = ResourceClient<WoIssuesApi>;
pub type WoIssueItemClient = ResourceClient<WoIssueItemsApi>;

impl ResourceClient<WoIssuesApi> {
    /// Issues raised against one work order.
    pub async fn by_work_order(&self, workorder_id: impl Into<RecordId>) -> Fetched<Vec<WoIssue>> {
        self.filter_by(&workorder_id.into(), |row| Some(&row.workorder_id)).await
    }
}

impl ResourceClient<WoIssueItemsApi> {
    /// Item lines of one issue.
    pub async fn by_issue(&self, issue_no: impl Into<RecordId>) -> Fetched<Vec<WoIssueItem>> {
        self.filter_by(&issue_no.into(), |row| Some(&row.issue_id)).await
    }
}
