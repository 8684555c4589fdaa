//! Expense service
//!
//! Edits to the budget document. Every operation reads the current state,
//! validates, and returns a [`Patch`]: a whole new state plus the audit
//! entries describing the change. The input state is never touched, so a
//! rejected edit leaves nothing half-applied.

use crate::audit::{AuditEntry, EntityType};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{
    parse_date_key, BudgetState, FixedExpenseCategory, FixedExpenseItem, Money, Month, ThemeColor,
};

/// Result of an accepted edit
#[derive(Debug, Clone)]
pub struct Patch {
    pub state: BudgetState,
    pub audit: Vec<AuditEntry>,
}

impl Patch {
    fn new(state: BudgetState) -> Self {
        Self {
            state,
            audit: Vec::new(),
        }
    }

    fn with(mut self, entry: AuditEntry) -> Self {
        self.audit.push(entry);
        self
    }

    /// Whether the edit actually changed anything
    pub fn is_empty(&self) -> bool {
        self.audit.is_empty()
    }
}

/// Service producing edits to a budget document
pub struct ExpenseService<'a> {
    state: &'a BudgetState,
}

impl<'a> ExpenseService<'a> {
    pub fn new(state: &'a BudgetState) -> Self {
        Self { state }
    }

    /// Set a day's spend and note
    ///
    /// A zero amount with an empty note removes the day entirely.
    pub fn set_expense(&self, date: &str, amount: Money, note: &str) -> BudgetResult<Patch> {
        parse_date_key(date)?;
        ensure_not_negative(amount, "Expense amount")?;

        let before_amount = self.state.expenses.get(date).copied();
        let note = note.trim();

        let mut state = self.state.clone();
        if amount.is_zero() {
            state.expenses.remove(date);
        } else {
            state.expenses.insert(date.to_string(), amount);
        }
        if note.is_empty() {
            state.notes.remove(date);
        } else {
            state.notes.insert(date.to_string(), note.to_string());
        }

        let entity_name = (!note.is_empty()).then(|| note.to_string());
        let entry = match (before_amount, amount.is_zero()) {
            (None, true) if note.is_empty() => match self.state.notes.get(date) {
                Some(old_note) => AuditEntry::delete(
                    EntityType::Expense,
                    date,
                    Some(old_note.clone()),
                    &Money::default(),
                ),
                None => return Ok(Patch::new(state)),
            },
            (Some(before), true) if note.is_empty() => {
                AuditEntry::delete(EntityType::Expense, date, None, &before)
            }
            (None, _) => AuditEntry::create(EntityType::Expense, date, entity_name, &amount),
            (Some(before), _) => {
                AuditEntry::update(EntityType::Expense, date, entity_name, &before, &amount)
            }
        };

        tracing::debug!(date, amount = %amount, "expense set");
        Ok(Patch::new(state).with(entry))
    }

    /// Add to a day's spend, appending to its note
    pub fn add_to_expense(&self, date: &str, amount: Money, note: &str) -> BudgetResult<Patch> {
        ensure_not_negative(amount, "Expense amount")?;

        let total = self
            .state
            .spent_on(date)
            .checked_add(amount)
            .ok_or_else(|| BudgetError::Validation(format!("Total spent on {} is too large", date)))?;
        let existing_note = self.state.note_on(date);
        let note = match (existing_note.is_empty(), note.trim().is_empty()) {
            (_, true) => existing_note.to_string(),
            (true, false) => note.trim().to_string(),
            (false, false) => format!("{}; {}", existing_note, note.trim()),
        };

        self.set_expense(date, total, &note)
    }

    /// Remove a day's spend and note
    pub fn clear_expense(&self, date: &str) -> BudgetResult<Patch> {
        parse_date_key(date)?;

        if !self.state.expenses.contains_key(date) && !self.state.notes.contains_key(date) {
            return Err(BudgetError::NotFound {
                entity_type: "Expense",
                identifier: date.to_string(),
            });
        }

        let before = self.state.spent_on(date);
        let note = self.state.notes.get(date).cloned();

        let mut state = self.state.clone();
        state.expenses.remove(date);
        state.notes.remove(date);

        Ok(Patch::new(state).with(AuditEntry::delete(EntityType::Expense, date, note, &before)))
    }

    pub fn set_default_budget(&self, amount: Money) -> BudgetResult<Patch> {
        ensure_not_negative(amount, "Monthly budget")?;

        let before = self.state.default_monthly_budget;
        let mut state = self.state.clone();
        state.default_monthly_budget = amount;

        Ok(Patch::new(state).with(AuditEntry::update(
            EntityType::MonthlyBudget,
            "default",
            None,
            &before,
            &amount,
        )))
    }

    pub fn set_default_fixed_budget(&self, amount: Money) -> BudgetResult<Patch> {
        ensure_not_negative(amount, "Fixed budget")?;

        let before = self.state.default_fixed_budget;
        let mut state = self.state.clone();
        state.default_fixed_budget = amount;

        Ok(Patch::new(state).with(AuditEntry::update(
            EntityType::FixedBudget,
            "default",
            None,
            &before,
            &amount,
        )))
    }

    /// Override one month's daily-spending budget
    pub fn set_month_budget(&self, month: Month, amount: Money) -> BudgetResult<Patch> {
        ensure_not_negative(amount, "Monthly budget")?;

        let key = month.key();
        let before = self.state.monthly_budget(month.year, month.month);
        let mut state = self.state.clone();
        state.custom_budgets.insert(key.clone(), amount);

        Ok(Patch::new(state).with(AuditEntry::update(
            EntityType::MonthlyBudget,
            key,
            Some(month.friendly()),
            &before,
            &amount,
        )))
    }

    /// Override one month's fixed-expense budget
    pub fn set_month_fixed_budget(&self, month: Month, amount: Money) -> BudgetResult<Patch> {
        ensure_not_negative(amount, "Fixed budget")?;

        let key = month.key();
        let before = self.state.fixed_budget(month.year, month.month);
        let mut state = self.state.clone();
        state.custom_fixed_budgets.insert(key.clone(), amount);

        Ok(Patch::new(state).with(AuditEntry::update(
            EntityType::FixedBudget,
            key,
            Some(month.friendly()),
            &before,
            &amount,
        )))
    }

    /// Drop both budget overrides for a month, falling back to the defaults
    pub fn clear_month_budget(&self, month: Month) -> BudgetResult<Patch> {
        let key = month.key();
        let mut state = self.state.clone();
        let mut patch_audit = Vec::new();

        if let Some(before) = state.custom_budgets.remove(&key) {
            patch_audit.push(AuditEntry::delete(
                EntityType::MonthlyBudget,
                key.clone(),
                Some(month.friendly()),
                &before,
            ));
        }
        if let Some(before) = state.custom_fixed_budgets.remove(&key) {
            patch_audit.push(AuditEntry::delete(
                EntityType::FixedBudget,
                key.clone(),
                Some(month.friendly()),
                &before,
            ));
        }

        Ok(Patch {
            state,
            audit: patch_audit,
        })
    }

    /// Log a fixed expense against a month
    pub fn add_fixed_expense(
        &self,
        month: Month,
        category: FixedExpenseCategory,
        amount: Money,
        note: &str,
    ) -> BudgetResult<Patch> {
        let item = FixedExpenseItem::new(category, amount, note.trim());
        item.validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        let entry = AuditEntry::create(
            EntityType::FixedExpense,
            item.id.to_string(),
            Some(format!("{} {}", month.key(), item.category)),
            &item,
        );

        let mut state = self.state.clone();
        state
            .monthly_fixed_expenses
            .entry(month.key())
            .or_default()
            .push(item);

        Ok(Patch::new(state).with(entry))
    }

    /// Remove a fixed expense by full or short id
    pub fn delete_fixed_expense(&self, month: Month, reference: &str) -> BudgetResult<Patch> {
        let key = month.key();
        let mut state = self.state.clone();

        let items = state
            .monthly_fixed_expenses
            .get_mut(&key)
            .ok_or_else(|| BudgetError::fixed_expense_not_found(reference))?;
        let matching: Vec<usize> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.id.matches(reference))
            .map(|(index, _)| index)
            .collect();
        let position = match matching.as_slice() {
            [] => return Err(BudgetError::fixed_expense_not_found(reference)),
            [index] => *index,
            _ => {
                return Err(BudgetError::Validation(format!(
                    "'{}' matches {} fixed expenses in {}; use a longer ID",
                    reference,
                    matching.len(),
                    key
                )))
            }
        };

        let removed = items.remove(position);
        if items.is_empty() {
            state.monthly_fixed_expenses.remove(&key);
        }

        let entry = AuditEntry::delete(
            EntityType::FixedExpense,
            removed.id.to_string(),
            Some(format!("{} {}", key, removed.category)),
            &removed,
        );
        Ok(Patch::new(state).with(entry))
    }

    pub fn set_display_name(&self, name: &str) -> BudgetResult<Patch> {
        let name = name.trim().to_string();
        if name.chars().count() > 64 {
            return Err(BudgetError::Validation(
                "Display name must be at most 64 characters".into(),
            ));
        }

        let before = self.state.display_name.clone();
        let mut state = self.state.clone();
        state.display_name = name.clone();

        Ok(Patch::new(state).with(AuditEntry::update(
            EntityType::Preferences,
            "display_name",
            None,
            &before,
            &name,
        )))
    }

    pub fn set_theme(&self, theme: ThemeColor) -> BudgetResult<Patch> {
        let before = self.state.theme_color;
        let mut state = self.state.clone();
        state.theme_color = theme;

        Ok(Patch::new(state).with(AuditEntry::update(
            EntityType::Preferences,
            "theme_color",
            None,
            &before,
            &theme,
        )))
    }

    pub fn set_dark_mode(&self, enabled: bool) -> BudgetResult<Patch> {
        let before = self.state.is_dark_mode;
        let mut state = self.state.clone();
        state.is_dark_mode = enabled;

        Ok(Patch::new(state).with(AuditEntry::update(
            EntityType::Preferences,
            "is_dark_mode",
            None,
            &before,
            &enabled,
        )))
    }
}

fn ensure_not_negative(amount: Money, what: &str) -> BudgetResult<()> {
    if amount.is_negative() {
        return Err(BudgetError::Validation(format!(
            "{} cannot be negative: {}",
            what, amount
        )));
    }
    Ok(())
}
