use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::{Holding, HoldingId};

/* The full collection of holdings for one fund as of one observation.
Keyed by security code; inserting the same code twice keeps the later
row (sources occasionally repeat a line). Input order carries no
meaning, so iteration order is left to the map; anything user-facing
sorts explicitly. */
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HoldingSet {
    holdings: HashMap<HoldingId, Holding>,
}

impl HoldingSet {
    pub fn new() -> Self {
        return HoldingSet {
            holdings: HashMap::new(),
        };
    }

    /* Last write wins on duplicate codes. */
    pub fn insert(&mut self, holding: Holding) {
        self.holdings.insert(holding.id.clone(), holding);
    }

    pub fn get(&self, id: &HoldingId) -> Option<&Holding> {
        return self.holdings.get(id);
    }

    pub fn len(&self) -> usize {
        return self.holdings.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.holdings.is_empty();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Holding> {
        return self.holdings.values();
    }

    pub fn ids(&self) -> impl Iterator<Item = &HoldingId> {
        return self.holdings.keys();
    }

    /* Display order for reports and persisted files: heaviest weight
    first, code as tiebreak so output is reproducible. */
    pub fn sorted_by_weight(&self) -> Vec<&Holding> {
        let mut holdings: Vec<&Holding> = self.holdings.values().collect();
        holdings.sort_by(|a, b| {
            b.weight
                .unwrap_or_default()
                .cmp(&a.weight.unwrap_or_default())
                .then_with(|| a.id.cmp(&b.id))
        });
        return holdings;
    }
}

impl FromIterator<Holding> for HoldingSet {
    fn from_iter<I: IntoIterator<Item = Holding>>(iter: I) -> Self {
        let mut set = HoldingSet::new();
        for holding in iter {
            set.insert(holding);
        }
        return set;
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn holding(code: &str, shares: rust_decimal::Decimal) -> Holding {
        Holding {
            id: HoldingId::new(code),
            name: format!("{code} Corp"),
            shares,
            weight: None,
        }
    }

    #[test]
    fn duplicate_code_keeps_last_row() {
        let mut set = HoldingSet::new();
        set.insert(holding("2330", dec!(100)));
        set.insert(holding("2330", dec!(250)));

        assert_eq!(set.len(), 1);
        assert_eq!(set.get(&HoldingId::new("2330")).unwrap().shares, dec!(250));
    }

    #[test]
    fn sorted_by_weight_is_descending_with_code_tiebreak() {
        let mut set = HoldingSet::new();
        let mut a = holding("AAA", dec!(1));
        a.weight = Some(dec!(2.5));
        let mut b = holding("BBB", dec!(1));
        b.weight = Some(dec!(7.1));
        let mut c = holding("CCC", dec!(1));
        c.weight = Some(dec!(2.5));
        set.insert(a);
        set.insert(b);
        set.insert(c);

        let order: Vec<&str> = set
            .sorted_by_weight()
            .iter()
            .map(|h| h.id.as_str())
            .collect();
        assert_eq!(order, vec!["BBB", "AAA", "CCC"]);
    }
}
