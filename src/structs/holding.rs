use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/* Security code identifying one instrument within a fund's disclosure.
Kept as text end to end: codes like "0050" must never round-trip through
a numeric type and come back as "50". Normalization is trim + uppercase,
nothing more. */
#[derive(Hash, Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Serialize, Deserialize)]
pub struct HoldingId(String);

impl HoldingId {
    pub fn new(raw: &str) -> Self {
        return HoldingId(raw.trim().to_uppercase());
    }

    pub fn as_str(&self) -> &str {
        return &self.0;
    }
}

impl fmt::Display for HoldingId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/* One line of a fund's disclosed portfolio at one observation instant.
An empty name means the source did not provide one. */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub id: HoldingId,
    pub name: String,
    pub shares: Decimal,
    pub weight: Option<Decimal>,
}

impl Holding {
    pub fn has_name(&self) -> bool {
        return !self.name.trim().is_empty();
    }
}
