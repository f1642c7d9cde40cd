//! Per-category subtotals and form-wide totals driven by the template registry

use serde::{Deserialize, Serialize};

use super::sums::{grand_total, sum_fields, sum_section_list};
use crate::form::{FormState, Section, SectionName};
use crate::templates::{section_spec, CategorySource, CategorySpec};

/// One subtotal line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub name: String,
    pub label: String,
    pub amount: f64,
}

/// Subtotals of one section and their sum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionTotals {
    pub section: SectionName,
    pub categories: Vec<CategoryTotal>,
    /// Sum of `categories`
    pub total: f64,
    /// Amounts taken off the total (income deductions); empty elsewhere
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deductions: Vec<CategoryTotal>,
    #[serde(default)]
    pub total_deductions: f64,
}

impl SectionTotals {
    /// Total less deductions
    pub fn net(&self) -> f64 {
        self.total - self.total_deductions
    }

    pub fn category(&self, name: &str) -> Option<&CategoryTotal> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn amount(&self, name: &str) -> f64 {
        self.category(name).map(|c| c.amount).unwrap_or(0.0)
    }
}

/// Totals for every amount-bearing section and the figures derived from them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSummary {
    pub income: SectionTotals,
    pub assets: SectionTotals,
    pub liabilities: SectionTotals,
    pub expenses: SectionTotals,
}

impl FormSummary {
    /// Monthly gross income
    pub fn gross_income(&self) -> f64 {
        self.income.total
    }

    /// Monthly income after deductions
    pub fn net_income(&self) -> f64 {
        self.income.net()
    }

    /// Assets less liabilities
    pub fn net_worth(&self) -> f64 {
        self.assets.total - self.liabilities.total
    }

    /// Net monthly income less monthly expenses (negative = shortfall)
    pub fn monthly_surplus(&self) -> f64 {
        self.net_income() - self.expenses.total
    }

    pub fn sections(&self) -> [&SectionTotals; 4] {
        [&self.income, &self.assets, &self.liabilities, &self.expenses]
    }
}

/// Amount of one category over a section
pub fn category_amount(section: &Section, category: &CategorySpec) -> f64 {
    match category.source {
        CategorySource::Fields(fields) => sum_fields(section, fields),
        CategorySource::List { list, fields } => sum_section_list(section, list, fields),
    }
}

fn category_totals(section: &Section, specs: &[CategorySpec]) -> Vec<CategoryTotal> {
    specs
        .iter()
        .map(|spec| CategoryTotal {
            name: spec.name.to_string(),
            label: spec.label.to_string(),
            amount: category_amount(section, spec),
        })
        .collect()
}

fn amounts(categories: &[CategoryTotal]) -> Vec<f64> {
    categories.iter().map(|c| c.amount).collect()
}

/// Subtotals for one section of a section value
pub fn section_totals(name: SectionName, section: &Section) -> SectionTotals {
    let spec = section_spec(name);
    let categories = category_totals(section, spec.categories);
    let deductions = category_totals(section, spec.deductions);

    SectionTotals {
        section: name,
        total: grand_total(&amounts(&categories)),
        total_deductions: grand_total(&amounts(&deductions)),
        categories,
        deductions,
    }
}

/// Subtotals for one section of the form
pub fn summarize_section(form: &FormState, name: SectionName) -> SectionTotals {
    section_totals(name, form.section(name))
}

/// Totals across the whole form
pub fn summarize(form: &FormState) -> FormSummary {
    FormSummary {
        income: summarize_section(form, SectionName::Income),
        assets: summarize_section(form, SectionName::Assets),
        liabilities: summarize_section(form, SectionName::Liabilities),
        expenses: summarize_section(form, SectionName::Expenses),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::Record;
    use approx::assert_relative_eq;

    fn sample_form() -> FormState {
        FormState::new()
            .with_section(
                SectionName::Income,
                Section::new()
                    .with("grossSalary", "6250.00")
                    .with("overtime", "310.40")
                    .with("interestDividends", "12.15")
                    .with("federalTax", "820.00")
                    .with("stateTax", "310.00")
                    .with("retirementContribution", "375")
                    .with_list(
                        "additionalEmployment",
                        vec![Record::new().with("employer", "Weekend Cafe").with("monthlyGross", "640")],
                    ),
            )
            .with_section(
                SectionName::Assets,
                Section::new()
                    .with_list(
                        "cashAccounts",
                        vec![
                            Record::new().with("currentAmount", "100.50"),
                            Record::new().with("currentAmount", ""),
                        ],
                    )
                    .with_list(
                        "realEstate",
                        vec![Record::new()
                            .with("marketValue", "410000")
                            .with("mortgageBalance", "265000")],
                    ),
            )
            .with_section(
                SectionName::Liabilities,
                Section::new().with_list(
                    "mortgages",
                    vec![Record::new().with("balance", "265000").with("monthlyPayment", "1710")],
                ),
            )
            .with_section(
                SectionName::Expenses,
                Section::new()
                    .with("rentOrMortgage", "1710")
                    .with("groceries", "650.25")
                    .with_list(
                        "automobiles",
                        vec![
                            Record::new().with("leasePayment", "300").with("gasOil", "50"),
                            Record::new().with("leasePayment", "").with("gasOil", "40"),
                        ],
                    ),
            )
    }

    #[test]
    fn test_empty_form_totals_zero() {
        let summary = summarize(&FormState::new());
        for totals in summary.sections() {
            assert_eq!(totals.total, 0.0);
            assert!(totals.categories.iter().all(|c| c.amount == 0.0));
        }
        assert_eq!(summary.net_worth(), 0.0);
        assert_eq!(summary.monthly_surplus(), 0.0);
    }

    #[test]
    fn test_category_lines_follow_registry() {
        let totals = summarize_section(&sample_form(), SectionName::Assets);
        let names: Vec<_> = totals.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["realEstate", "cash", "retirement", "investments", "vehicles", "lifeInsurance", "business", "other"]
        );
        assert_eq!(totals.amount("cash"), 100.50);
        // Mortgage balance is a liability, not an asset
        assert_eq!(totals.amount("realEstate"), 410_000.0);
        assert_relative_eq!(totals.total, 410_100.50);
    }

    #[test]
    fn test_income_net_of_deductions() {
        let totals = summarize_section(&sample_form(), SectionName::Income);

        assert_relative_eq!(totals.amount("employment"), 6560.40, epsilon = 1e-9);
        assert_eq!(totals.amount("additionalEmployment"), 640.0);
        assert_relative_eq!(totals.total, 7212.55, epsilon = 1e-9);
        assert_eq!(totals.total_deductions, 1505.0);
        assert_relative_eq!(totals.net(), 5707.55, epsilon = 1e-9);
    }

    #[test]
    fn test_expenses_include_automobiles() {
        let totals = summarize_section(&sample_form(), SectionName::Expenses);

        assert_eq!(totals.amount("automobiles"), 390.0);
        assert_eq!(totals.amount("housing"), 1710.0);
        assert_relative_eq!(totals.total, 2750.25, epsilon = 1e-9);
    }

    #[test]
    fn test_derived_figures() {
        let summary = summarize(&sample_form());

        assert_relative_eq!(summary.net_worth(), 145_100.50, epsilon = 1e-6);
        assert_relative_eq!(summary.monthly_surplus(), 5707.55 - 2750.25, epsilon = 1e-9);
        assert!(summary.income.deductions.len() == 3);
        assert!(summary.assets.deductions.is_empty());
    }

    #[test]
    fn test_family_data_has_no_categories() {
        let totals = summarize_section(&sample_form(), SectionName::FamilyData);
        assert!(totals.categories.is_empty());
        assert_eq!(totals.total, 0.0);
    }
}
