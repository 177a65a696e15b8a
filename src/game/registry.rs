//! The territory registry.

use crate::error::{WarError, WarResult};
use crate::game::Territory;

/// Ordered, fixed-size collection of territories.
///
/// The size is chosen at creation and never changes. Territories are
/// addressed by their 0-based index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    /// Territories in registration order.
    territories: Vec<Territory>,
}

impl Registry {
    /// Create a registry of `count` blank territories.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSize` if `count` is zero and `AllocationFailure` if
    /// storage cannot be reserved.
    pub fn new(count: usize) -> WarResult<Self> {
        if count == 0 {
            return Err(WarError::InvalidSize(0));
        }

        let mut territories = Vec::new();
        territories
            .try_reserve_exact(count)
            .map_err(|_| WarError::AllocationFailure(count))?;
        territories.resize_with(count, Territory::default);

        Ok(Self { territories })
    }

    /// Create a registry from a territory count supplied by the user.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSize` for zero or negative counts.
    pub fn with_requested(count: i64) -> WarResult<Self> {
        match usize::try_from(count) {
            Ok(n) if n > 0 => Self::new(n),
            _ => Err(WarError::InvalidSize(count)),
        }
    }

    /// Create a registry holding the given territories.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSize` if `territories` is empty.
    pub fn from_territories(territories: Vec<Territory>) -> WarResult<Self> {
        if territories.is_empty() {
            return Err(WarError::InvalidSize(0));
        }
        Ok(Self { territories })
    }

    /// Number of territories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.territories.len()
    }

    /// Always `false`: a registry holds at least one territory.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.territories.is_empty()
    }

    /// Borrow the territory at `index`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index >= len()`.
    pub fn get(&self, index: usize) -> WarResult<&Territory> {
        let len = self.len();
        self.territories
            .get(index)
            .ok_or(WarError::IndexOutOfRange { index, len })
    }

    /// Mutably borrow the territory at `index`.
    ///
    /// Only registration and the attack resolver mutate territories.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index >= len()`.
    pub fn get_mut(&mut self, index: usize) -> WarResult<&mut Territory> {
        let len = self.len();
        self.territories
            .get_mut(index)
            .ok_or(WarError::IndexOutOfRange { index, len })
    }

    /// Fill slot `index` during registration.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index >= len()`.
    pub fn register(&mut self, index: usize, territory: Territory) -> WarResult<()> {
        *self.get_mut(index)? = territory;
        Ok(())
    }

    /// Mutably borrow two distinct territories at once.
    ///
    /// Returns `None` when `first == second` or either index is out of range.
    #[must_use]
    pub(crate) fn pair_mut(
        &mut self,
        first: usize,
        second: usize,
    ) -> Option<(&mut Territory, &mut Territory)> {
        if first == second || first >= self.len() || second >= self.len() {
            return None;
        }

        if first < second {
            let (head, tail) = self.territories.split_at_mut(second);
            Some((&mut head[first], &mut tail[0]))
        } else {
            let (head, tail) = self.territories.split_at_mut(first);
            Some((&mut tail[0], &mut head[second]))
        }
    }

    /// Territories in index order.
    #[must_use]
    #[inline]
    pub fn territories(&self) -> &[Territory] {
        &self.territories
    }

    /// Iterate over `(index, territory)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Territory)> {
        self.territories.iter().enumerate()
    }

    /// Territories owned by `color`.
    pub fn owned_by<'a>(&'a self, color: &'a str) -> impl Iterator<Item = &'a Territory> + 'a {
        self.territories.iter().filter(move |t| t.owner == color)
    }

    /// Count the territories owned by `color`.
    #[must_use]
    pub fn count_owned(&self, color: &str) -> usize {
        self.owned_by(color).count()
    }

    /// Total troops across the territories owned by `color`.
    #[must_use]
    pub fn total_troops(&self, color: &str) -> u64 {
        self.owned_by(color).map(|t| u64::from(t.troops)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Registry {
        Registry::from_territories(vec![
            Territory::new("A", "Azul", 10).unwrap(),
            Territory::new("B", "Vermelho", 5).unwrap(),
            Territory::new("C", "Azul", 1).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_zero_initialized() {
        let registry = Registry::new(4).unwrap();
        assert_eq!(registry.len(), 4);
        assert!(registry.territories().iter().all(|t| *t == Territory::default()));
    }

    #[test]
    fn test_new_rejects_zero() {
        assert!(matches!(Registry::new(0), Err(WarError::InvalidSize(0))));
    }

    #[test]
    fn test_with_requested_rejects_negative() {
        assert!(matches!(
            Registry::with_requested(-3),
            Err(WarError::InvalidSize(-3))
        ));
        assert!(matches!(
            Registry::with_requested(0),
            Err(WarError::InvalidSize(0))
        ));
        assert_eq!(Registry::with_requested(2).unwrap().len(), 2);
    }

    #[test]
    fn test_get_out_of_range() {
        let registry = sample();
        assert!(registry.get(2).is_ok());
        assert!(matches!(
            registry.get(3),
            Err(WarError::IndexOutOfRange { index: 3, len: 3 })
        ));
    }

    #[test]
    fn test_register_overwrites_slot() {
        let mut registry = Registry::new(2).unwrap();
        registry
            .register(1, Territory::new("Chile", "Verde", 4).unwrap())
            .unwrap();
        assert_eq!(registry.get(1).unwrap().name, "Chile");
        assert!(registry.register(2, Territory::default()).is_err());
    }

    #[test]
    fn test_pair_mut_both_orders() {
        let mut registry = sample();
        {
            let (a, c) = registry.pair_mut(0, 2).unwrap();
            assert_eq!(a.name, "A");
            assert_eq!(c.name, "C");
        }
        let (c, a) = registry.pair_mut(2, 0).unwrap();
        assert_eq!(c.name, "C");
        assert_eq!(a.name, "A");
    }

    #[test]
    fn test_pair_mut_rejects_alias_and_range() {
        let mut registry = sample();
        assert!(registry.pair_mut(1, 1).is_none());
        assert!(registry.pair_mut(0, 3).is_none());
    }

    #[test]
    fn test_ownership_queries() {
        let registry = sample();
        assert_eq!(registry.count_owned("Azul"), 2);
        assert_eq!(registry.total_troops("Azul"), 11);
        assert_eq!(registry.count_owned("azul"), 0);
    }
}
