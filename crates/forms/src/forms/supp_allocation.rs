//! Supplier allocation form: applies a payment or credit to an invoice.

use serde::{Deserialize, Serialize};

use ledgerdesk_purchasing::NewSuppAllocation;

use crate::{FieldErrors, FormModel, Validator};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SuppAllocationForm {
    pub person_id: String,
    pub amt: String,
    pub date_alloc: String,
    pub trans_no_from: String,
    pub trans_type_from: String,
    pub trans_no_to: String,
    pub trans_type_to: String,
}

impl FormModel for SuppAllocationForm {
    const KEY: &'static str = "supp_allocation_form";
    const TITLE: &'static str = "Supplier allocation";

    type Payload = NewSuppAllocation;

    fn validate(&self) -> Result<NewSuppAllocation, FieldErrors> {
        let mut v = Validator::new();

        let person_id = v.id("person_id", &self.person_id);
        let amt = v.positive("amt", &self.amt);
        let date_alloc = v.date("date_alloc", &self.date_alloc);
        let trans_no_from = v.id("trans_no_from", &self.trans_no_from);
        let trans_type_from = v.id("trans_type_from", &self.trans_type_from);
        let trans_no_to = v.id("trans_no_to", &self.trans_no_to);
        let trans_type_to = v.id("trans_type_to", &self.trans_type_to);

        if let (Some(no_from), Some(type_from), Some(no_to), Some(type_to)) =
            (&trans_no_from, &trans_type_from, &trans_no_to, &trans_type_to)
        {
            let same = no_from.loosely_eq(no_to) && type_from.loosely_eq(type_to);
            v.ensure("trans_no_to", !same, "cannot allocate a transaction to itself");
        }
        if !v.is_valid() {
            return Err(v.into_errors());
        }

        match (person_id, amt, date_alloc, trans_no_from, trans_type_from, trans_no_to, trans_type_to) {
            (
                Some(person_id),
                Some(amt),
                Some(date_alloc),
                Some(trans_no_from),
                Some(trans_type_from),
                Some(trans_no_to),
                Some(trans_type_to),
            ) => Ok(NewSuppAllocation {
                person_id: Some(person_id),
                amt,
                date_alloc,
                trans_no_from,
                trans_type_from,
                trans_no_to,
                trans_type_to,
            }),
            _ => Err(v.into_errors()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn filled() -> SuppAllocationForm {
        SuppAllocationForm {
            person_id: "3".into(),
            amt: "150.00".into(),
            date_alloc: "2024-04-15".into(),
            trans_no_from: "12".into(),
            trans_type_from: "22".into(),
            trans_no_to: "40".into(),
            trans_type_to: "20".into(),
        }
    }

    #[test]
    fn valid_allocation() {
        let payload = filled().validate().unwrap();
        assert_eq!(payload.amt, 150.0);
        assert_eq!(payload.date_alloc, NaiveDate::from_ymd_opt(2024, 4, 15).unwrap());
    }

    #[test]
    fn allocating_to_itself_is_rejected() {
        let draft = SuppAllocationForm {
            trans_no_to: "12".into(),
            trans_type_to: "22".into(),
            ..filled()
        };
        assert!(draft.validate().unwrap_err().contains("trans_no_to"));
    }

    #[test]
    fn amount_must_be_positive() {
        let draft = SuppAllocationForm {
            amt: "-5".into(),
            ..filled()
        };
        assert_eq!(draft.validate().unwrap_err().get("amt"), Some("must be greater than zero"));
    }
}
