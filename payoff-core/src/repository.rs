//! Debt storage seam owned by the calling layer.
//!
//! The simulator only ever sees a `&[Debt]`; where that list comes from is
//! up to whoever implements `DebtRepository`.

use crate::debt::Debt;

pub trait DebtRepository {
    fn get(&self, id: &str) -> Option<Debt>;

    /// Insert, or replace an existing debt with the same id in place
    fn put(&mut self, debt: Debt);

    fn remove(&mut self, id: &str) -> Option<Debt>;

    /// All debts in insertion order
    fn list(&self) -> Vec<Debt>;
}

/// Vec-backed repository. Insertion order is kept because it is the order
/// minimum payments are made in.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDebtRepository {
    debts: Vec<Debt>,
}

impl InMemoryDebtRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.debts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.debts.is_empty()
    }
}

impl FromIterator<Debt> for InMemoryDebtRepository {
    fn from_iter<I: IntoIterator<Item = Debt>>(iter: I) -> Self {
        let mut repo = Self::new();
        for d in iter {
            repo.put(d);
        }
        repo
    }
}

impl DebtRepository for InMemoryDebtRepository {
    fn get(&self, id: &str) -> Option<Debt> {
        self.debts.iter().find(|d| d.id == id).cloned()
    }

    fn put(&mut self, debt: Debt) {
        match self.debts.iter_mut().find(|d| d.id == debt.id) {
            Some(existing) => *existing = debt,
            None => self.debts.push(debt),
        }
    }

    fn remove(&mut self, id: &str) -> Option<Debt> {
        let idx = self.debts.iter().position(|d| d.id == id)?;
        Some(self.debts.remove(idx))
    }

    fn list(&self) -> Vec<Debt> {
        self.debts.clone()
    }
}
