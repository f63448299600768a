//! Income and expense categories
//!
//! Both category sets are fixed. The declaration order is the display order
//! used by tables and CSV files.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Share of lottery and lotto gross sales recognised as store income
pub const LOTTERY_COMMISSION_RATE: Decimal = dec!(0.05);

/// Unit a category is recorded in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Currency,
    Gallons,
}

/// How a category's monthly total counts toward income
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountingRule {
    /// The whole monthly total counts
    Full,
    /// The monthly total is multiplied by the rate before counting
    Scaled(Decimal),
    /// Tracked for reference only, never part of income or profit
    Excluded,
}

impl CountingRule {
    pub fn is_included(&self) -> bool {
        !matches!(self, CountingRule::Excluded)
    }
}

/// A daily income column
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IncomeCategory {
    #[serde(rename = "Taxable")]
    Taxable,
    #[serde(rename = "Non-tax")]
    NonTax,
    #[serde(rename = "CC")]
    CreditCard,
    #[serde(rename = "Sales Tax")]
    SalesTax,
    #[serde(rename = "FS")]
    FoodStamps,
    #[serde(rename = "Lottery")]
    Lottery,
    #[serde(rename = "Lotto")]
    Lotto,
    #[serde(rename = "Fuel Sales")]
    FuelSales,
    #[serde(rename = "Fuel Gallons")]
    FuelGallons,
    #[serde(rename = "Rebates")]
    Rebates,
    #[serde(rename = "ATM")]
    Atm,
    #[serde(rename = "OI")]
    OtherIncome,
}

impl IncomeCategory {
    /// All income categories in display order
    pub const ALL: [IncomeCategory; 12] = [
        IncomeCategory::Taxable,
        IncomeCategory::NonTax,
        IncomeCategory::CreditCard,
        IncomeCategory::SalesTax,
        IncomeCategory::FoodStamps,
        IncomeCategory::Lottery,
        IncomeCategory::Lotto,
        IncomeCategory::FuelSales,
        IncomeCategory::FuelGallons,
        IncomeCategory::Rebates,
        IncomeCategory::Atm,
        IncomeCategory::OtherIncome,
    ];

    /// Column label as it appears in tables and CSV headers
    pub const fn label(&self) -> &'static str {
        match self {
            IncomeCategory::Taxable => "Taxable",
            IncomeCategory::NonTax => "Non-tax",
            IncomeCategory::CreditCard => "CC",
            IncomeCategory::SalesTax => "Sales Tax",
            IncomeCategory::FoodStamps => "FS",
            IncomeCategory::Lottery => "Lottery",
            IncomeCategory::Lotto => "Lotto",
            IncomeCategory::FuelSales => "Fuel Sales",
            IncomeCategory::FuelGallons => "Fuel Gallons",
            IncomeCategory::Rebates => "Rebates",
            IncomeCategory::Atm => "ATM",
            IncomeCategory::OtherIncome => "OI",
        }
    }

    pub const fn unit(&self) -> Unit {
        match self {
            IncomeCategory::FuelGallons => Unit::Gallons,
            _ => Unit::Currency,
        }
    }

    pub fn counting_rule(&self) -> CountingRule {
        match self {
            IncomeCategory::CreditCard | IncomeCategory::SalesTax | IncomeCategory::FuelGallons => {
                CountingRule::Excluded
            }
            IncomeCategory::Lottery | IncomeCategory::Lotto => {
                CountingRule::Scaled(LOTTERY_COMMISSION_RATE)
            }
            _ => CountingRule::Full,
        }
    }

    /// Look up a category by its exact column label
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for IncomeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lenient parsing for command-line input: case-insensitive, `-`/`_` read as spaces
impl FromStr for IncomeCategory {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|c| normalize(c.label()) == wanted || wanted == normalize(&format!("{:?}", c)))
            .ok_or_else(|| CategoryParseError::Income(s.to_string()))
    }
}

/// A monthly expense line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    #[serde(rename = "BANK CHARGES")]
    BankCharges,
    #[serde(rename = "CC FEES")]
    CcFees,
    #[serde(rename = "CONTRACT LABOR")]
    ContractLabor,
    #[serde(rename = "OFFICE SUPPLY")]
    OfficeSupply,
    #[serde(rename = "INSURANCE PREMIUMS")]
    InsurancePremiums,
    #[serde(rename = "INTEREST")]
    Interest,
    #[serde(rename = "LEGAL FEE")]
    LegalFee,
    #[serde(rename = "MAINTENANCE")]
    Maintenance,
    #[serde(rename = "WASTE MANAGEMENT")]
    WasteManagement,
    #[serde(rename = "RENT")]
    Rent,
    #[serde(rename = "SECURITY")]
    Security,
    #[serde(rename = "SUPPLIES")]
    Supplies,
    #[serde(rename = "TAXES & LICENSE")]
    TaxesAndLicense,
    #[serde(rename = "TELEPHONES")]
    Telephones,
    #[serde(rename = "UTILITIES")]
    Utilities,
    #[serde(rename = "CC CHARGE")]
    CcCharge,
    #[serde(rename = "STORE EXPENSES")]
    StoreExpenses,
    #[serde(rename = "GASOLINE EXPENSES")]
    GasolineExpenses,
    #[serde(rename = "PAY ROLL")]
    Payroll,
    #[serde(rename = "PAY ROLL TAXES")]
    PayrollTaxes,
    #[serde(rename = "Gasoline Purchase")]
    GasolinePurchase,
    #[serde(rename = "INVENTORY STOCK")]
    InventoryStock,
    #[serde(rename = "INVENTORY CASH")]
    InventoryCash,
    #[serde(rename = "INVENTORY ACCOUNT 2")]
    InventoryAccount2,
}

impl ExpenseCategory {
    /// All expense categories in display order
    pub const ALL: [ExpenseCategory; 24] = [
        ExpenseCategory::BankCharges,
        ExpenseCategory::CcFees,
        ExpenseCategory::ContractLabor,
        ExpenseCategory::OfficeSupply,
        ExpenseCategory::InsurancePremiums,
        ExpenseCategory::Interest,
        ExpenseCategory::LegalFee,
        ExpenseCategory::Maintenance,
        ExpenseCategory::WasteManagement,
        ExpenseCategory::Rent,
        ExpenseCategory::Security,
        ExpenseCategory::Supplies,
        ExpenseCategory::TaxesAndLicense,
        ExpenseCategory::Telephones,
        ExpenseCategory::Utilities,
        ExpenseCategory::CcCharge,
        ExpenseCategory::StoreExpenses,
        ExpenseCategory::GasolineExpenses,
        ExpenseCategory::Payroll,
        ExpenseCategory::PayrollTaxes,
        ExpenseCategory::GasolinePurchase,
        ExpenseCategory::InventoryStock,
        ExpenseCategory::InventoryCash,
        ExpenseCategory::InventoryAccount2,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::BankCharges => "BANK CHARGES",
            ExpenseCategory::CcFees => "CC FEES",
            ExpenseCategory::ContractLabor => "CONTRACT LABOR",
            ExpenseCategory::OfficeSupply => "OFFICE SUPPLY",
            ExpenseCategory::InsurancePremiums => "INSURANCE PREMIUMS",
            ExpenseCategory::Interest => "INTEREST",
            ExpenseCategory::LegalFee => "LEGAL FEE",
            ExpenseCategory::Maintenance => "MAINTENANCE",
            ExpenseCategory::WasteManagement => "WASTE MANAGEMENT",
            ExpenseCategory::Rent => "RENT",
            ExpenseCategory::Security => "SECURITY",
            ExpenseCategory::Supplies => "SUPPLIES",
            ExpenseCategory::TaxesAndLicense => "TAXES & LICENSE",
            ExpenseCategory::Telephones => "TELEPHONES",
            ExpenseCategory::Utilities => "UTILITIES",
            ExpenseCategory::CcCharge => "CC CHARGE",
            ExpenseCategory::StoreExpenses => "STORE EXPENSES",
            ExpenseCategory::GasolineExpenses => "GASOLINE EXPENSES",
            ExpenseCategory::Payroll => "PAY ROLL",
            ExpenseCategory::PayrollTaxes => "PAY ROLL TAXES",
            ExpenseCategory::GasolinePurchase => "Gasoline Purchase",
            ExpenseCategory::InventoryStock => "INVENTORY STOCK",
            ExpenseCategory::InventoryCash => "INVENTORY CASH",
            ExpenseCategory::InventoryAccount2 => "INVENTORY ACCOUNT 2",
        }
    }

    /// Position in display order
    pub fn index(&self) -> usize {
        // ALL is declared in variant order
        *self as usize
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExpenseCategory {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|c| normalize(c.label()) == wanted || wanted == normalize(&format!("{:?}", c)))
            .ok_or_else(|| CategoryParseError::Expense(s.to_string()))
    }
}

fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect::<String>()
        .to_lowercase()
}

/// Error for unrecognised category names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryParseError {
    Income(String),
    Expense(String),
}

impl fmt::Display for CategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryParseError::Income(s) => write!(f, "Unknown income category: {}", s),
            CategoryParseError::Expense(s) => write!(f, "Unknown expense category: {}", s),
        }
    }
}

impl std::error::Error for CategoryParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_income_labels_round_trip() {
        for category in IncomeCategory::ALL {
            assert_eq!(IncomeCategory::from_label(category.label()), Some(category));
        }
        assert_eq!(IncomeCategory::from_label("Other Income"), None);
        assert_eq!(IncomeCategory::from_label("sales tax"), None);
    }

    #[test]
    fn test_expense_index_matches_display_order() {
        for (i, category) in ExpenseCategory::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }

    #[test]
    fn test_lenient_parse() {
        let income = |s: &str| s.parse::<IncomeCategory>().unwrap();
        let expense = |s: &str| s.parse::<ExpenseCategory>().unwrap();

        assert_eq!(income("sales tax"), IncomeCategory::SalesTax);
        assert_eq!(income("fuel-gallons"), IncomeCategory::FuelGallons);
        assert_eq!(income("oi"), IncomeCategory::OtherIncome);
        assert_eq!(income("OtherIncome"), IncomeCategory::OtherIncome);
        assert_eq!(expense("pay_roll"), ExpenseCategory::Payroll);
        assert_eq!(expense("taxes & license"), ExpenseCategory::TaxesAndLicense);
        assert!("parking".parse::<ExpenseCategory>().is_err());
    }

    #[test]
    fn test_counting_rules() {
        let excluded: Vec<_> = IncomeCategory::ALL
            .into_iter()
            .filter(|c| !c.counting_rule().is_included())
            .collect();
        assert_eq!(
            excluded,
            vec![
                IncomeCategory::CreditCard,
                IncomeCategory::SalesTax,
                IncomeCategory::FuelGallons
            ]
        );
        assert_eq!(
            IncomeCategory::Lottery.counting_rule(),
            CountingRule::Scaled(LOTTERY_COMMISSION_RATE)
        );
        assert_eq!(IncomeCategory::Taxable.counting_rule(), CountingRule::Full);
    }

    #[test]
    fn test_only_fuel_gallons_is_volume() {
        for category in IncomeCategory::ALL {
            let expected = if category == IncomeCategory::FuelGallons {
                Unit::Gallons
            } else {
                Unit::Currency
            };
            assert_eq!(category.unit(), expected);
        }
    }
}
