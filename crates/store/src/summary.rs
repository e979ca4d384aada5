//! Category aggregation over an expense list.
//!
//! This is the single source of truth for per-category totals: the summary
//! endpoint and any UI consume this function instead of re-deriving the
//! numbers.
use crate::{Amount, Expense};

/// Total spent in one category.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Amount,
}

/// Per-category totals plus the grand total across all categories.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Summary {
    pub entries: Vec<CategoryTotal>,
    pub grand_total: Amount,
}

/// Groups expenses by exact category match (case-sensitive, no
/// normalization) and sums amounts as integer cents.
///
/// Entries come out in first-seen order; callers wanting a ranking re-sort by
/// total. The empty list yields empty entries and a zero grand total.
#[must_use]
pub fn category_totals(expenses: &[Expense]) -> Summary {
    let mut summary = Summary::default();

    for expense in expenses {
        summary.grand_total += expense.amount;
        match summary
            .entries
            .iter_mut()
            .find(|entry| entry.category == expense.category)
        {
            Some(entry) => entry.total += expense.amount,
            None => summary.entries.push(CategoryTotal {
                category: expense.category.clone(),
                total: expense.amount,
            }),
        }
    }

    summary
}
