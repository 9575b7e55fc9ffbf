use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::ValidationError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Income,
    Expenditure,
    Savings,
    Loan,
}

impl Category {
    /// Display and chart order.
    pub const ALL: [Category; 4] = [
        Category::Income,
        Category::Expenditure,
        Category::Savings,
        Category::Loan,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expenditure => "Expenditure",
            Self::Savings => "Savings",
            Self::Loan => "Loans",
        }
    }

    pub fn invalid_prompt(&self) -> &'static str {
        match self {
            Self::Income => "Please enter a valid income amount",
            Self::Expenditure => "Please enter a valid expenditure amount",
            Self::Savings => "Please enter a valid savings amount",
            Self::Loan => "Please enter a valid loan amount and due date",
        }
    }

    /// Direction in which an entry of this category moves the balance.
    pub fn sign(&self) -> Decimal {
        match self {
            Self::Income | Self::Savings => Decimal::ONE,
            Self::Expenditure | Self::Loan => Decimal::NEGATIVE_ONE,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Income => "#34b7f1",
            Self::Expenditure => "#e74c3c",
            Self::Savings => "#2ecc71",
            Self::Loan => "#f39c12",
        }
    }

    pub fn requires_due_date(&self) -> bool {
        matches!(self, Self::Loan)
    }
}

/// A recorded amount. Only loans carry a due date.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub amount: Decimal,
    pub due_date: Option<NaiveDate>,
}

/// Parses a form amount. Accepts plain and scientific notation, rejects
/// blanks, non-numbers and anything not strictly positive.
pub fn parse_amount(category: Category, raw: &str) -> Result<Decimal, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingAmount(category));
    }

    let amount = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| ValidationError::InvalidAmount(category))?;

    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount(category));
    }
    Ok(amount)
}

pub fn parse_due_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingDueDate);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDueDate {
        value: raw.to_string(),
    })
}

/// Four append-only entry lists plus the running balance.
///
/// The balance is adjusted on every insert instead of being summed on demand.
/// Paying off a loan removes the entry but leaves the balance where it was.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ledger {
    income: Vec<Entry>,
    expenditure: Vec<Entry>,
    savings: Vec<Entry>,
    loan: Vec<Entry>,
    balance: Decimal,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self, category: Category) -> &[Entry] {
        match category {
            Category::Income => &self.income,
            Category::Expenditure => &self.expenditure,
            Category::Savings => &self.savings,
            Category::Loan => &self.loan,
        }
    }

    fn entries_mut(&mut self, category: Category) -> &mut Vec<Entry> {
        match category {
            Category::Income => &mut self.income,
            Category::Expenditure => &mut self.expenditure,
            Category::Savings => &mut self.savings,
            Category::Loan => &mut self.loan,
        }
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Sum of one category. `add_entry` refuses entries that would push a
    /// category total or the balance past `Decimal::MAX`, so this never
    /// actually saturates.
    pub fn total(&self, category: Category) -> Decimal {
        self.entries(category)
            .iter()
            .fold(Decimal::ZERO, |acc, e| acc.saturating_add(e.amount))
    }

    /// Validates the raw form values and appends a new entry. `due_date` is
    /// only consulted for loans.
    pub fn add_entry(
        &mut self,
        category: Category,
        amount: &str,
        due_date: Option<&str>,
    ) -> Result<&Entry, ValidationError> {
        let amount = parse_amount(category, amount)?;
        let due_date = if category.requires_due_date() {
            Some(parse_due_date(due_date.unwrap_or_default())?)
        } else {
            None
        };

        let balance = self
            .balance
            .checked_add(category.sign() * amount)
            .ok_or(ValidationError::AmountTooLarge(category))?;
        if self.total(category).checked_add(amount).is_none() {
            return Err(ValidationError::AmountTooLarge(category));
        }

        self.balance = balance;
        let entries = self.entries_mut(category);
        entries.push(Entry { amount, due_date });
        log::debug!("recorded {} entry of {}", category.label(), amount);
        Ok(&entries[entries.len() - 1])
    }

    /// Marks the loan at `index` as paid by removing it. The balance is left
    /// untouched.
    pub fn delete_loan(&mut self, index: usize) -> Result<Entry, ValidationError> {
        let len = self.loan.len();
        if index >= len {
            return Err(ValidationError::LoanIndexOutOfRange { index, len });
        }
        Ok(self.loan.remove(index))
    }
}
