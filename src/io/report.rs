//! Plain text summary document
//!
//! PDF and Word output belong to external renderers fed from a form
//! snapshot; this is the built-in text rendering of the totals.

use crate::aggregation::{format_currency, CategoryTotal, FormSummary, SectionTotals};
use crate::form::{FormState, SectionName};

const WIDTH: usize = 52;

fn line(out: &mut String, label: &str, amount: f64) {
    let amount = format_currency(amount);
    let pad = WIDTH.saturating_sub(label.len() + 2);
    out.push_str(&format!("  {}{:>pad$}\n", label, amount, pad = pad));
}

fn heading(out: &mut String, title: &str) {
    out.push('\n');
    out.push_str(title);
    out.push('\n');
    out.push_str(&"-".repeat(WIDTH));
    out.push('\n');
}

fn categories(out: &mut String, lines: &[CategoryTotal]) {
    for c in lines {
        line(out, &c.label, c.amount);
    }
}

fn section_block(out: &mut String, title: &str, totals: &SectionTotals, total_label: &str) {
    heading(out, title);
    categories(out, &totals.categories);
    line(out, total_label, totals.total);
}

/// Render the totals of a form as a text document
pub fn render_summary(form: &FormState, summary: &FormSummary) -> String {
    let mut out = String::new();

    out.push_str("Financial Disclosure Summary\n");
    out.push_str(&"=".repeat(WIDTH));
    out.push('\n');

    let family = form.section(SectionName::FamilyData);
    if let Some(name) = family.scalar("clientName").filter(|v| !v.is_blank()) {
        out.push_str(&format!("Client: {}\n", name));
    }
    if let Some(spouse) = family.scalar("spouseName").filter(|v| !v.is_blank()) {
        out.push_str(&format!("Spouse: {}\n", spouse));
    }
    if let Some(children) = family.list("children").filter(|l| !l.is_empty()) {
        out.push_str(&format!("Children: {}\n", children.len()));
    }

    section_block(&mut out, "Income (monthly)", &summary.income, "Gross income");
    categories(&mut out, &summary.income.deductions);
    line(&mut out, "Total deductions", summary.income.total_deductions);
    line(&mut out, "Net income", summary.net_income());

    section_block(&mut out, "Assets", &summary.assets, "Total assets");
    section_block(&mut out, "Liabilities", &summary.liabilities, "Total liabilities");
    section_block(&mut out, "Expenses (monthly)", &summary.expenses, "Total expenses");

    heading(&mut out, "Overview");
    line(&mut out, "Net worth", summary.net_worth());
    line(&mut out, "Monthly surplus (shortfall)", summary.monthly_surplus());

    out
}
