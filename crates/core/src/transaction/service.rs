//! Transaction recording service.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;
use valuta_shared::types::money::round_foreign;
use valuta_shared::types::{TransactionId, UserId};

use super::error::TransactionError;
use super::number::{branch_code_segment, format_transaction_number};
use super::store::TransactionStore;
use super::types::{local_amount_of, NewTransaction, Transaction};
use crate::branch::BranchConfig;
use crate::calendar::AccountingCalendar;
use crate::customer::CustomerDirectory;

/// Records buy/sell transactions against the store.
pub struct TransactionService<'a> {
    store: &'a dyn TransactionStore,
    customers: &'a dyn CustomerDirectory,
    branches: &'a dyn BranchConfig,
    calendar: AccountingCalendar,
    org_code: String,
}

impl<'a> TransactionService<'a> {
    /// Creates a service over the given collaborators.
    #[must_use]
    pub fn new(
        store: &'a dyn TransactionStore,
        customers: &'a dyn CustomerDirectory,
        branches: &'a dyn BranchConfig,
        calendar: AccountingCalendar,
        org_code: impl Into<String>,
    ) -> Self {
        Self {
            store,
            customers,
            branches,
            calendar,
            org_code: org_code.into(),
        }
    }

    /// Records a new transaction.
    ///
    /// The branch is taken from the customer's profile; the accounting date
    /// is derived from the business-effective instant through the calendar
    /// and stored on the record.
    ///
    /// # Errors
    ///
    /// Returns [`TransactionError::CustomerNotFound`] /
    /// [`TransactionError::BranchNotFound`] for dangling references and
    /// [`TransactionError::NonPositiveAmount`] /
    /// [`TransactionError::NonPositiveRate`] for invalid figures.
    pub fn create(
        &self,
        input: NewTransaction,
        created_by: UserId,
    ) -> Result<Transaction, TransactionError> {
        if input.foreign_amount <= Decimal::ZERO {
            return Err(TransactionError::NonPositiveAmount);
        }
        if input.exchange_rate <= Decimal::ZERO {
            return Err(TransactionError::NonPositiveRate);
        }

        let customer = self
            .customers
            .get(input.customer_id)
            .ok_or(TransactionError::CustomerNotFound(input.customer_id))?;
        let branch_id = customer.branch_id;
        if !self.branches.exists(branch_id) {
            return Err(TransactionError::BranchNotFound(branch_id));
        }

        let transaction_instant = input.transaction_instant.unwrap_or_else(Utc::now);
        let accounting_date = self.calendar.accounting_date_of(transaction_instant);
        let foreign_amount = round_foreign(input.foreign_amount);
        let local_amount = local_amount_of(foreign_amount, input.exchange_rate);

        // Two concurrent creations can read the same count and collide on
        // the human-readable number; the id below stays unique regardless.
        let sequence = self.store.count_by_accounting_date(accounting_date) + 1;
        let number = format_transaction_number(
            &self.org_code,
            input.direction,
            sequence,
            &branch_code_segment(self.branches.branch_code(branch_id).as_deref()),
            accounting_date,
        );

        let transaction = Transaction {
            id: TransactionId::new(),
            number,
            voucher_number: input.voucher_number,
            customer_id: input.customer_id,
            branch_id,
            currency: input.currency,
            direction: input.direction,
            foreign_amount,
            exchange_rate: input.exchange_rate,
            local_amount,
            transaction_instant,
            accounting_date,
            notes: input.notes,
            payment_method: input.payment_method,
            transaction_purpose: input.transaction_purpose,
            created_by,
            created_at: Utc::now(),
            deletion: None,
        };
        debug!(
            number = %transaction.number,
            currency = %transaction.currency,
            %accounting_date,
            "transaction recorded"
        );
        self.store.insert(transaction.clone());
        Ok(transaction)
    }

    /// Soft-deletes a transaction, keeping it for audit.
    ///
    /// # Errors
    ///
    /// Returns [`TransactionError::TransactionNotFound`] when no such
    /// transaction exists.
    pub fn soft_delete(
        &self,
        id: TransactionId,
        actor: UserId,
    ) -> Result<(), TransactionError> {
        if self.store.soft_delete(id, actor, Utc::now()) {
            debug!(%id, "transaction soft-deleted");
            Ok(())
        } else {
            Err(TransactionError::TransactionNotFound(id))
        }
    }
}
