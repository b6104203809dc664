//! Single-pass aggregation over filtered transactions
//!
//! Sums are integer minor units. Addition saturates at `u64::MAX` so that
//! absurd inputs degrade instead of panicking.

use serde::Serialize;

use crate::config::CategoryVocabulary;
use crate::models::{Transaction, TransactionKind};

use super::classify::{classify, SpendClass};

/// Aggregates for one window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: u64,
    pub expense: u64,
    pub essentials: u64,
    pub discretionary: u64,
}

impl Totals {
    /// `income - expense`
    ///
    /// Exact while the difference fits in `i64`. Beyond that (sums past
    /// `i64::MAX`) it is clamped to `i64::MIN..=i64::MAX`.
    pub fn net(&self) -> i64 {
        let net = i128::from(self.income) - i128::from(self.expense);
        net.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
    }

    /// Discretionary share of expense; 0 when there is no expense
    pub fn discretionary_ratio(&self) -> f64 {
        if self.expense == 0 {
            return 0.0;
        }
        self.discretionary as f64 / self.expense as f64
    }

    /// Essentials share of expense, dividing by at least 1
    pub fn essentials_ratio(&self) -> f64 {
        self.essentials as f64 / self.expense.max(1) as f64
    }

    fn add(&mut self, tx: &Transaction, vocabulary: &CategoryVocabulary) {
        match tx.kind {
            TransactionKind::Inflow => {
                self.income = self.income.saturating_add(tx.amount_minor);
            }
            TransactionKind::Outflow => {
                self.expense = self.expense.saturating_add(tx.amount_minor);
                match classify(tx.category.as_deref(), vocabulary) {
                    SpendClass::Essential => {
                        self.essentials = self.essentials.saturating_add(tx.amount_minor);
                    }
                    SpendClass::Discretionary => {
                        self.discretionary = self.discretionary.saturating_add(tx.amount_minor);
                    }
                    SpendClass::Unclassified => {}
                }
            }
        }
    }
}

/// Sum income, expense and the classified expense buckets
pub fn aggregate<'a, I>(transactions: I, vocabulary: &CategoryVocabulary) -> Totals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals = Totals::default();
    for tx in transactions {
        totals.add(tx, vocabulary);
    }
    totals
}
