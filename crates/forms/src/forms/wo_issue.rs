//! Work-order issue form: an issue header with its item lines.
//!
//! The header is created first; each line is then posted with the issue
//! number the backend assigned. When a line fails, the created header and the
//! lines already posted stay in the draft, so a resubmit only posts what is
//! missing.

use serde::{Deserialize, Serialize};

use ledgerdesk_client::ApiError;
use ledgerdesk_client::resources::{WoIssueClient, WoIssueItemClient};
use ledgerdesk_core::RecordId;
use ledgerdesk_inventory::{NewWoIssue, NewWoIssueItem, WoIssue, WoIssueItem};

use crate::{FieldErrors, FormModel, FormView, SubmitOutcome, Validator};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueLineDraft {
    pub stock_id: String,
    pub qty_issued: String,
    /// Blank means zero.
    pub unit_cost: String,
    /// Set once the line was posted by an earlier, partly failed submit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved: Option<WoIssueItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WoIssueForm {
    pub workorder_id: String,
    pub reference: String,
    pub issue_date: String,
    pub loc_code: String,
    pub workcentre_id: String,
    pub items: Vec<IssueLineDraft>,
    /// Header created by an earlier, partly failed submit. Header fields are
    /// not sent again while it is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<WoIssue>,
}

impl WoIssueForm {
    pub fn for_work_order(workorder_id: impl Into<RecordId>) -> Self {
        Self {
            workorder_id: workorder_id.into().to_string(),
            items: vec![IssueLineDraft::default()],
            ..Self::default()
        }
    }

    pub fn add_line(&mut self) {
        self.items.push(IssueLineDraft::default());
    }

    pub fn remove_line(&mut self, index: usize) {
        if index < self.items.len() {
            self.items.remove(index);
        }
    }

    fn record_progress(&mut self, progress: IssueProgress) {
        self.created = progress.issue;
        for (line, saved) in self.items.iter_mut().zip(progress.items) {
            line.saved = saved;
        }
    }
}

/// What the backend already holds for the issue being submitted.
#[derive(Debug, Default)]
struct IssueProgress {
    issue: Option<WoIssue>,
    /// Posted item per draft line, by index.
    items: Vec<Option<WoIssueItem>>,
}

impl IssueProgress {
    fn of(form: &WoIssueForm) -> Self {
        Self {
            issue: form.created.clone(),
            items: form.items.iter().map(|line| line.saved.clone()).collect(),
        }
    }
}

/// A validated line, waiting for its issue number.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueLine {
    pub stock_id: RecordId,
    pub qty_issued: f64,
    pub unit_cost: f64,
}

impl IssueLine {
    pub fn into_item(self, issue_id: RecordId) -> NewWoIssueItem {
        NewWoIssueItem {
            stock_id: self.stock_id,
            issue_id,
            qty_issued: self.qty_issued,
            unit_cost: self.unit_cost,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WoIssuePayload {
    pub issue: NewWoIssue,
    pub lines: Vec<IssueLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SavedIssue {
    pub issue: WoIssue,
    pub items: Vec<WoIssueItem>,
}

impl FormModel for WoIssueForm {
    const KEY: &'static str = "wo_issue_form";
    const TITLE: &'static str = "Work order issue";

    type Payload = WoIssuePayload;

    fn validate(&self) -> Result<WoIssuePayload, FieldErrors> {
        let mut v = Validator::new();

        let workorder_id = v.id("workorder_id", &self.workorder_id);
        let reference = v.required("reference", &self.reference);
        let issue_date = v.date("issue_date", &self.issue_date);
        let loc_code = v.required("loc_code", &self.loc_code);
        let workcentre_id = v.id("workcentre_id", &self.workcentre_id);

        let mut lines = Vec::with_capacity(self.items.len());
        for (i, line) in self.items.iter().enumerate() {
            let field = |name: &str| format!("items[{i}].{name}");

            let stock_id = v.required(&field("stock_id"), &line.stock_id).map(RecordId::Text);
            let qty_issued = v.positive(&field("qty_issued"), &line.qty_issued);
            let unit_cost = if line.unit_cost.trim().is_empty() {
                Some(0.0)
            } else {
                v.non_negative(&field("unit_cost"), &line.unit_cost)
            };

            if let (Some(stock_id), Some(qty_issued), Some(unit_cost)) = (stock_id, qty_issued, unit_cost) {
                lines.push(IssueLine {
                    stock_id,
                    qty_issued,
                    unit_cost,
                });
            }
        }
        v.ensure("items", !self.items.is_empty(), "add at least one item");

        match (workorder_id, reference, issue_date, loc_code, workcentre_id) {
            (Some(workorder_id), Some(reference), Some(issue_date), Some(loc_code), Some(workcentre_id))
                if v.is_valid() =>
            {
                Ok(WoIssuePayload {
                    issue: NewWoIssue {
                        workorder_id,
                        reference,
                        issue_date,
                        loc_code,
                        workcentre_id,
                    },
                    lines,
                })
            }
            _ => Err(v.into_errors()),
        }
    }
}

async fn post_issue(
    issues: &WoIssueClient,
    items: &WoIssueItemClient,
    payload: WoIssuePayload,
    progress: &mut IssueProgress,
) -> Result<SavedIssue, ApiError> {
    let issue = match &progress.issue {
        Some(issue) => issue.clone(),
        None => {
            let issue = issues.create(&payload.issue).await?;
            progress.issue = Some(issue.clone());
            issue
        }
    };

    progress.items.resize(payload.lines.len(), None);
    for (i, line) in payload.lines.into_iter().enumerate() {
        if progress.items[i].is_some() {
            continue;
        }
        match items.create(&line.into_item(issue.issue_no.clone())).await {
            Ok(item) => progress.items[i] = Some(item),
            Err(err) => {
                tracing::warn!(
                    issue_no = %issue.issue_no,
                    line = i,
                    "issue header created but an item line failed"
                );
                return Err(err);
            }
        }
    }

    Ok(SavedIssue {
        issue,
        items: progress.items.iter().flatten().cloned().collect(),
    })
}

impl FormView<WoIssueForm> {
    /// Create the issue header, then every line against it.
    ///
    /// A failed line keeps the created header and posted lines in the draft;
    /// the next call resumes from there.
    pub async fn save(&mut self, issues: &WoIssueClient, items: &WoIssueItemClient) -> SubmitOutcome<SavedIssue> {
        let mut progress = IssueProgress::of(self.draft());
        let tracked = &mut progress;
        let outcome = self
            .submit(move |payload| post_issue(issues, items, payload, tracked))
            .await;

        if !outcome.is_saved() && progress.issue.is_some() {
            self.edit(|draft| draft.record_progress(progress));
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> WoIssueForm {
        WoIssueForm {
            reference: "ISS-12".into(),
            issue_date: "2024-05-02".into(),
            loc_code: "DEF".into(),
            workcentre_id: "1".into(),
            items: vec![
                IssueLineDraft {
                    stock_id: "BOLT".into(),
                    qty_issued: "4".into(),
                    unit_cost: "0.5".into(),
                    ..IssueLineDraft::default()
                },
                IssueLineDraft {
                    stock_id: "NUT".into(),
                    qty_issued: "10".into(),
                    unit_cost: String::new(),
                    ..IssueLineDraft::default()
                },
            ],
            ..WoIssueForm::for_work_order(3)
        }
    }

    #[test]
    fn header_and_lines_validate_together() {
        let payload = filled().validate().unwrap();
        assert_eq!(payload.issue.workorder_id, RecordId::Int(3));
        assert_eq!(payload.lines.len(), 2);
        assert_eq!(payload.lines[1].unit_cost, 0.0);

        let item = payload.lines[0].clone().into_item(RecordId::Int(12));
        assert_eq!(item.issue_id, RecordId::Int(12));
    }

    #[test]
    fn line_errors_are_keyed_by_index() {
        let mut draft = filled();
        draft.items[1].qty_issued = "0".into();
        draft.items[1].stock_id = " ".into();

        let errors = draft.validate().unwrap_err();
        assert!(errors.contains("items[1].qty_issued"));
        assert!(errors.contains("items[1].stock_id"));
        assert!(!errors.contains("items[0].qty_issued"));
    }

    #[test]
    fn an_issue_needs_at_least_one_line() {
        let mut draft = filled();
        draft.remove_line(1);
        draft.remove_line(0);
        draft.remove_line(0);
        assert_eq!(draft.validate().unwrap_err().get("items"), Some("add at least one item"));

        draft.add_line();
        assert_eq!(draft.items.len(), 1);
    }
}
