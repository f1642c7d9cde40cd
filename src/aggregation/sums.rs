//! Summation primitives over sections and record lists
//!
//! Missing fields, blank text and anything that does not parse as a number
//! contribute 0, so none of these can fail.

use crate::form::{Record, Section};

/// Neumaier-compensated running sum
///
/// `0.1` added ten times totals exactly `1.0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Accumulator {
    sum: f64,
    compensation: f64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: f64) {
        let t = self.sum + value;
        if !t.is_finite() {
            // Overflowed: keep the infinity, leave compensation alone
            self.sum = t;
            return;
        }
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - t) + value;
        } else {
            self.compensation += (value - t) + self.sum;
        }
        self.sum = t;
    }

    pub fn total(&self) -> f64 {
        if self.sum.is_finite() {
            self.sum + self.compensation
        } else {
            self.sum
        }
    }
}

impl FromIterator<f64> for Accumulator {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut acc = Accumulator::new();
        for value in iter {
            acc.add(value);
        }
        acc
    }
}

fn total(values: impl IntoIterator<Item = f64>) -> f64 {
    values.into_iter().collect::<Accumulator>().total()
}

/// Sum of the named scalar fields of a section
pub fn sum_fields(section: &Section, field_names: &[&str]) -> f64 {
    total(field_names.iter().map(|name| section.amount(name)))
}

/// Sum of one field across every record
pub fn sum_list_field(list: &[Record], field_name: &str) -> f64 {
    total(list.iter().map(|record| record.amount(field_name)))
}

/// Per-record sum of several fields, then summed across records
pub fn sum_list_of_fields(list: &[Record], field_names: &[&str]) -> f64 {
    total(
        list.iter()
            .flat_map(move |record| field_names.iter().map(move |name| record.amount(name))),
    )
}

/// Like [`sum_list_of_fields`] for a list looked up by name; absent lists sum to 0
pub fn sum_section_list(section: &Section, list_name: &str, field_names: &[&str]) -> f64 {
    section
        .list(list_name)
        .map(|list| sum_list_of_fields(list, field_names))
        .unwrap_or(0.0)
}

/// Plain sum of subtotals
pub fn grand_total(subtotals: &[f64]) -> f64 {
    total(subtotals.iter().copied())
}

/// Round to cents for display; totals are kept unrounded internally
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// `$1,234.56` style display, negatives as `-$12.00`; an overflowed total
/// shows as `inf` rather than a number
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = (cents / 100).to_string();

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn automobiles() -> Vec<Record> {
        vec![
            Record::new().with("leasePayment", "300").with("gasOil", "50"),
            Record::new().with("leasePayment", "").with("gasOil", "40"),
        ]
    }

    #[test]
    fn test_sum_fields_absent_is_zero() {
        let section = Section::new();
        assert_eq!(sum_fields(&section, &["groceries", "diningOut", "clothing"]), 0.0);
        assert_eq!(sum_fields(&section, &[]), 0.0);
    }

    #[test]
    fn test_sum_fields_order_independent() {
        let section = Section::new()
            .with("groceries", "612.37")
            .with("diningOut", "88.10")
            .with("clothing", "not sure")
            .with("laundry", 19.99);

        let forward = sum_fields(&section, &["groceries", "diningOut", "clothing", "laundry"]);
        let reverse = sum_fields(&section, &["laundry", "clothing", "diningOut", "groceries"]);
        let shuffled = sum_fields(&section, &["diningOut", "laundry", "groceries", "clothing"]);

        assert_relative_eq!(forward, 720.46, epsilon = 1e-9);
        assert_eq!(forward, reverse);
        assert_eq!(forward, shuffled);
    }

    #[test]
    fn test_sum_list_field_blank_is_zero() {
        let cash = vec![
            Record::new().with("currentAmount", "100.50"),
            Record::new().with("currentAmount", ""),
        ];
        assert_eq!(sum_list_field(&cash, "currentAmount"), 100.50);
        assert_eq!(sum_list_field(&[], "currentAmount"), 0.0);
    }

    #[test]
    fn test_sum_list_of_fields() {
        assert_eq!(sum_list_of_fields(&automobiles(), &["leasePayment", "gasOil"]), 390.0);
        assert_eq!(sum_list_of_fields(&automobiles(), &["gasOil"]), 90.0);
    }

    #[test]
    fn test_sum_section_list() {
        let section = Section::new()
            .with_list("automobiles", automobiles())
            .with("rentOrMortgage", "1500");

        assert_eq!(sum_section_list(&section, "automobiles", &["leasePayment", "gasOil"]), 390.0);
        assert_eq!(sum_section_list(&section, "otherExpenses", &["monthlyAmount"]), 0.0);
        // A scalar is not a list
        assert_eq!(sum_section_list(&section, "rentOrMortgage", &["rentOrMortgage"]), 0.0);
    }

    #[test]
    fn test_grand_total() {
        assert_eq!(grand_total(&[100.00, 250.75, 0.0, 49.25]), 400.00);
        assert_eq!(grand_total(&[]), 0.0);
    }

    #[test]
    fn test_compensated_sum() {
        assert_eq!(grand_total(&[0.1; 10]), 1.0);

        let pennies: Vec<Record> = (0..100_000)
            .map(|_| Record::new().with("currentAmount", "0.01"))
            .collect();
        assert_eq!(round_cents(sum_list_field(&pennies, "currentAmount")), 1000.0);
    }

    #[test]
    fn test_overflow_stays_infinite() {
        assert_eq!(grand_total(&[1e308, 1e308]), f64::INFINITY);
        assert_eq!(grand_total(&[-1e308, -1e308, 5.0]), f64::NEG_INFINITY);

        let huge = vec![
            Record::new().with("currentAmount", "1e308"),
            Record::new().with("currentAmount", "1e308"),
        ];
        let total = sum_list_field(&huge, "currentAmount");
        assert!(total.is_infinite() && total > 0.0);
        assert_eq!(format_currency(total), "inf");
        assert_eq!(format_currency(f64::NAN), "NaN");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(400.0), "$400.00");
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(1_000_000.004), "$1,000,000.00");
        assert_eq!(format_currency(-12.3), "-$12.30");
        assert_eq!(format_currency(-0.001), "$0.00");
    }
}
