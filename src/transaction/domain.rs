//! Core transaction data models.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::database_id::{AccountId, CategoryId, TransactionId};

/// Money moving into or out of an account.
///
/// Positive amounts represent income/credits, negative amounts represent
/// expenses/debits. This follows standard accounting conventions where money
/// flowing into an account is positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The account the money moved into or out of.
    pub account_id: AccountId,
    /// The category the transaction is labelled with, if any.
    pub category_id: Option<CategoryId>,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// When the transaction happened.
    pub date: Date,
    /// Who the money went to or came from.
    pub payee: String,
    /// Free-form notes about the transaction.
    pub notes: Option<String>,
}

/// The fields needed to create a transaction, or to overwrite an existing
/// one's fields during an edit.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub account_id: AccountId,
    pub category_id: Option<CategoryId>,
    pub amount: f64,
    pub date: Date,
    pub payee: String,
    pub notes: Option<String>,
}

/// The form data submitted by the transaction sheets.
///
/// The selects submit an empty string when nothing is chosen, which
/// axum_extra's form extractor parses as `None`. A missing account is a
/// validation error, a missing category means uncategorized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionFormData {
    #[serde(default)]
    pub account_id: Option<AccountId>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    pub amount: f64,
    pub date: Date,
    pub payee: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl TransactionFormData {
    /// Validate the form data, normalizing empty notes away.
    ///
    /// # Errors
    ///
    /// Returns [crate::Error::MissingAccount] if no account was selected and
    /// [crate::Error::EmptyPayee] if the payee is blank.
    pub fn into_new_transaction(self) -> Result<NewTransaction, crate::Error> {
        let account_id = self.account_id.ok_or(crate::Error::MissingAccount)?;

        let payee = self.payee.trim().to_string();
        if payee.is_empty() {
            return Err(crate::Error::EmptyPayee);
        }

        let notes = self
            .notes
            .map(|notes| notes.trim().to_string())
            .filter(|notes| !notes.is_empty());

        Ok(NewTransaction {
            account_id,
            category_id: self.category_id,
            amount: self.amount,
            date: self.date,
            payee,
            notes,
        })
    }
}

#[cfg(test)]
mod transaction_form_data_tests {
    use time::macros::date;

    use crate::Error;

    use super::TransactionFormData;

    fn valid_form() -> TransactionFormData {
        TransactionFormData {
            account_id: Some(1),
            category_id: None,
            amount: -12.5,
            date: date!(2024 - 01 - 01),
            payee: "Cafe".to_string(),
            notes: None,
        }
    }

    #[test]
    fn missing_account_is_an_error() {
        let form = TransactionFormData {
            account_id: None,
            ..valid_form()
        };

        assert_eq!(form.into_new_transaction(), Err(Error::MissingAccount));
    }

    #[test]
    fn blank_payee_is_an_error() {
        let form = TransactionFormData {
            payee: "  ".to_string(),
            ..valid_form()
        };

        assert_eq!(form.into_new_transaction(), Err(Error::EmptyPayee));
    }

    #[test]
    fn blank_notes_become_none() {
        let form = TransactionFormData {
            notes: Some("   ".to_string()),
            ..valid_form()
        };

        let new_transaction = form.into_new_transaction().unwrap();

        assert_eq!(new_transaction.notes, None);
    }
}
