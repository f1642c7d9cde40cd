//! Static layout of the disclosure form
//!
//! Field names match the keys used in saved and exported forms. Category
//! field lists decide what each subtotal sums, so every name listed there
//! must be declared as a money field.

use super::schema::{CategorySource, CategorySpec, FieldKind, FieldSpec, ListSpec, SectionSpec};
use crate::form::{Record, SectionName};

const fn text(name: &'static str) -> FieldSpec {
    FieldSpec::optional(name, FieldKind::Text)
}

const fn date(name: &'static str) -> FieldSpec {
    FieldSpec::optional(name, FieldKind::Date)
}

const fn money(name: &'static str) -> FieldSpec {
    FieldSpec::optional(name, FieldKind::Money)
}

const fn percentage(name: &'static str) -> FieldSpec {
    FieldSpec::optional(name, FieldKind::Percentage)
}

const fn select(name: &'static str) -> FieldSpec {
    FieldSpec::optional(name, FieldKind::Select)
}

const fn required(spec: FieldSpec) -> FieldSpec {
    FieldSpec { required: true, ..spec }
}

const fn fields(name: &'static str, label: &'static str, fields: &'static [&'static str]) -> CategorySpec {
    CategorySpec { name, label, source: CategorySource::Fields(fields) }
}

const fn list(
    name: &'static str,
    label: &'static str,
    list: &'static str,
    fields: &'static [&'static str],
) -> CategorySpec {
    CategorySpec { name, label, source: CategorySource::List { list, fields } }
}

// ---- Family data ----

static FAMILY_DATA: SectionSpec = SectionSpec {
    section: SectionName::FamilyData,
    fields: &[
        required(text("clientName")),
        required(date("dateOfBirth")),
        text("address"),
        text("phone"),
        text("email"),
        required(select("maritalStatus")),
        text("spouseName"),
        date("spouseDateOfBirth"),
        date("marriageDate"),
        date("separationDate"),
    ],
    lists: &[ListSpec {
        name: "children",
        fields: &[
            required(text("name")),
            required(date("dateOfBirth")),
            select("residesWith"),
            text("school"),
        ],
    }],
    categories: &[],
    deductions: &[],
};

// ---- Income (monthly) ----

static INCOME: SectionSpec = SectionSpec {
    section: SectionName::Income,
    fields: &[
        text("employer"),
        text("occupation"),
        select("payFrequency"),
        required(money("grossSalary")),
        money("overtime"),
        money("commissionsBonuses"),
        money("selfEmployment"),
        money("rentalIncome"),
        money("interestDividends"),
        money("socialSecurity"),
        money("pensionAnnuity"),
        money("unemploymentDisability"),
        money("alimonyReceived"),
        money("childSupportReceived"),
        money("otherIncome"),
        money("federalTax"),
        money("stateTax"),
        money("socialSecurityTax"),
        money("medicareTax"),
        money("healthInsurance"),
        money("retirementContribution"),
        money("unionDues"),
        money("otherDeductions"),
    ],
    lists: &[ListSpec {
        name: "additionalEmployment",
        fields: &[
            required(text("employer")),
            text("position"),
            date("startDate"),
            money("monthlyGross"),
        ],
    }],
    categories: &[
        fields("employment", "Employment", &["grossSalary", "overtime", "commissionsBonuses"]),
        list("additionalEmployment", "Additional employment", "additionalEmployment", &["monthlyGross"]),
        fields("business", "Business and rental", &["selfEmployment", "rentalIncome"]),
        fields("investment", "Interest and dividends", &["interestDividends"]),
        fields("benefits", "Benefits and pensions", &["socialSecurity", "pensionAnnuity", "unemploymentDisability"]),
        fields("support", "Support received", &["alimonyReceived", "childSupportReceived"]),
        fields("other", "Other income", &["otherIncome"]),
    ],
    deductions: &[
        fields("taxes", "Taxes", &["federalTax", "stateTax", "socialSecurityTax", "medicareTax"]),
        fields("payroll", "Payroll deductions", &["healthInsurance", "retirementContribution", "unionDues"]),
        fields("otherDeductions", "Other deductions", &["otherDeductions"]),
    ],
};

// ---- Assets (current values) ----

static ASSETS: SectionSpec = SectionSpec {
    section: SectionName::Assets,
    fields: &[],
    lists: &[
        ListSpec {
            name: "realEstate",
            fields: &[
                required(text("address")),
                select("titleHolder"),
                date("purchaseDate"),
                money("purchasePrice"),
                money("marketValue"),
                money("mortgageBalance"),
            ],
        },
        ListSpec {
            name: "cashAccounts",
            fields: &[
                required(text("institution")),
                text("accountNumber"),
                select("accountType"),
                select("titleHolder"),
                money("currentAmount"),
            ],
        },
        ListSpec {
            name: "retirementAccounts",
            fields: &[required(text("description")), money("currentValue")],
        },
        ListSpec {
            name: "investmentAccounts",
            fields: &[
                required(text("institution")),
                text("accountNumber"),
                select("titleHolder"),
                money("currentValue"),
            ],
        },
        ListSpec {
            name: "vehicles",
            fields: &[
                required(text("yearMakeModel")),
                select("titleHolder"),
                money("marketValue"),
                money("loanBalance"),
            ],
        },
        ListSpec {
            name: "lifeInsurance",
            fields: &[
                required(text("company")),
                text("policyNumber"),
                text("insured"),
                text("beneficiary"),
                money("faceValue"),
                money("cashValue"),
            ],
        },
        ListSpec {
            name: "businessInterests",
            fields: &[
                required(text("businessName")),
                percentage("ownershipPercentage"),
                money("estimatedValue"),
            ],
        },
        ListSpec {
            name: "otherAssets",
            fields: &[required(text("description")), money("currentValue")],
        },
    ],
    categories: &[
        list("realEstate", "Real estate", "realEstate", &["marketValue"]),
        list("cash", "Cash and bank accounts", "cashAccounts", &["currentAmount"]),
        list("retirement", "Retirement accounts", "retirementAccounts", &["currentValue"]),
        list("investments", "Investment accounts", "investmentAccounts", &["currentValue"]),
        list("vehicles", "Vehicles", "vehicles", &["marketValue"]),
        list("lifeInsurance", "Life insurance cash value", "lifeInsurance", &["cashValue"]),
        list("business", "Business interests", "businessInterests", &["estimatedValue"]),
        list("other", "Other assets", "otherAssets", &["currentValue"]),
    ],
    deductions: &[],
};

// ---- Liabilities (outstanding balances) ----

static LIABILITIES: SectionSpec = SectionSpec {
    section: SectionName::Liabilities,
    fields: &[],
    lists: &[
        ListSpec {
            name: "mortgages",
            fields: &[
                required(text("lender")),
                text("propertyAddress"),
                money("balance"),
                money("monthlyPayment"),
            ],
        },
        ListSpec {
            name: "creditCards",
            fields: &[
                required(text("creditor")),
                text("accountNumber"),
                money("balance"),
                money("monthlyPayment"),
            ],
        },
        ListSpec {
            name: "loans",
            fields: &[
                required(text("lender")),
                text("purpose"),
                date("dateIncurred"),
                money("balance"),
                money("monthlyPayment"),
            ],
        },
        ListSpec {
            name: "taxesOwed",
            fields: &[required(text("agency")), text("taxYear"), money("balance")],
        },
        ListSpec {
            name: "otherDebts",
            fields: &[
                required(text("creditor")),
                text("description"),
                money("balance"),
                money("monthlyPayment"),
            ],
        },
    ],
    categories: &[
        list("mortgages", "Mortgages", "mortgages", &["balance"]),
        list("creditCards", "Credit cards", "creditCards", &["balance"]),
        list("loans", "Loans", "loans", &["balance"]),
        list("taxesOwed", "Taxes owed", "taxesOwed", &["balance"]),
        list("other", "Other debts", "otherDebts", &["balance"]),
    ],
    deductions: &[],
};

// ---- Expenses (monthly) ----

const HOUSING: &[&str] = &["rentOrMortgage", "propertyTax", "homeInsurance", "hoaFees", "homeRepairs"];
const UTILITIES: &[&str] = &["electricity", "gasHeating", "water", "telephone", "internetCable"];
const FOOD: &[&str] = &["groceries", "diningOut"];
const PERSONAL: &[&str] = &["clothing", "laundry", "personalCare"];
const MEDICAL: &[&str] = &["medicalUnreimbursed", "dental", "prescriptions", "healthInsurancePremium"];
const CHILDREN: &[&str] = &["childcare", "schoolTuition", "childActivities"];
const DISCRETIONARY: &[&str] = &["entertainment", "vacations", "gifts", "charitableContributions"];
const AUTOMOBILE_COSTS: &[&str] = &["leasePayment", "gasOil", "insurance", "repairs", "registration", "parking"];

static EXPENSES: SectionSpec = SectionSpec {
    section: SectionName::Expenses,
    fields: &[
        required(money("rentOrMortgage")),
        money("propertyTax"),
        money("homeInsurance"),
        money("hoaFees"),
        money("homeRepairs"),
        money("electricity"),
        money("gasHeating"),
        money("water"),
        money("telephone"),
        money("internetCable"),
        money("groceries"),
        money("diningOut"),
        money("clothing"),
        money("laundry"),
        money("personalCare"),
        money("medicalUnreimbursed"),
        money("dental"),
        money("prescriptions"),
        money("healthInsurancePremium"),
        money("childcare"),
        money("schoolTuition"),
        money("childActivities"),
        money("entertainment"),
        money("vacations"),
        money("gifts"),
        money("charitableContributions"),
    ],
    lists: &[
        ListSpec {
            name: "automobiles",
            fields: &[
                required(text("yearMakeModel")),
                money("leasePayment"),
                money("gasOil"),
                money("insurance"),
                money("repairs"),
                money("registration"),
                money("parking"),
            ],
        },
        ListSpec {
            name: "otherExpenses",
            fields: &[required(text("description")), money("monthlyAmount")],
        },
    ],
    categories: &[
        fields("housing", "Housing", HOUSING),
        fields("utilities", "Utilities", UTILITIES),
        fields("food", "Food", FOOD),
        fields("personal", "Personal", PERSONAL),
        fields("medical", "Medical", MEDICAL),
        fields("children", "Children", CHILDREN),
        fields("discretionary", "Discretionary", DISCRETIONARY),
        list("automobiles", "Automobiles", "automobiles", AUTOMOBILE_COSTS),
        list("other", "Other expenses", "otherExpenses", &["monthlyAmount"]),
    ],
    deductions: &[],
};

/// Layout of a section
pub fn section_spec(section: SectionName) -> &'static SectionSpec {
    match section {
        SectionName::FamilyData => &FAMILY_DATA,
        SectionName::Income => &INCOME,
        SectionName::Assets => &ASSETS,
        SectionName::Liabilities => &LIABILITIES,
        SectionName::Expenses => &EXPENSES,
    }
}

/// Every section layout, in form display order
pub fn registry() -> impl Iterator<Item = &'static SectionSpec> {
    SectionName::ALL.into_iter().map(section_spec)
}

pub fn list_spec(section: SectionName, list: &str) -> Option<&'static ListSpec> {
    section_spec(section).list(list)
}

/// Initial record for a list: every declared field present and blank
pub fn template_for(section: SectionName, list: &str) -> Option<Record> {
    list_spec(section, list).map(ListSpec::template)
}

/// Money-kind field names of a list, or of the section's scalars when `list` is `None`
pub fn money_fields(section: SectionName, list: Option<&str>) -> Vec<&'static str> {
    let spec = section_spec(section);
    match list {
        Some(name) => spec.list(name).map(ListSpec::money_fields).unwrap_or_default(),
        None => spec
            .fields
            .iter()
            .filter(|f| f.kind == FieldKind::Money)
            .map(|f| f.name)
            .collect(),
    }
}
