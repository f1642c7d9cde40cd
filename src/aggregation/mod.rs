//! Aggregation engine: subtotals and grand totals over the form state
//!
//! Everything here is a pure function of the current state except
//! [`TotalsCache`], which only ever returns totals for the exact section
//! version it was filled at.

mod sums;
mod summary;
mod cache;

pub use sums::{
    Accumulator, sum_fields, sum_list_field, sum_list_of_fields, sum_section_list,
    grand_total, round_cents, format_currency,
};
pub use summary::{
    CategoryTotal, SectionTotals, FormSummary, category_amount, section_totals,
    summarize_section, summarize,
};
pub use cache::TotalsCache;
