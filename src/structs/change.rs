use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::HoldingId;

/* Closed set of outcomes when one security code is reconciled across
two snapshots. Never derived from display text. */
#[derive(Hash, Eq, PartialEq, Debug, Clone, Copy, Serialize, Deserialize)]
pub enum ChangeKind {
    New,
    Increased,
    Decreased,
    Exited,
    Unchanged,
}

impl ChangeKind {
    /* Report order: entries first, then adds, trims, exits.
    Unchanged rows sort last and are hidden from the changes view. */
    pub fn priority(&self) -> u8 {
        match self {
            ChangeKind::New => 0,
            ChangeKind::Increased => 1,
            ChangeKind::Decreased => 2,
            ChangeKind::Exited => 3,
            ChangeKind::Unchanged => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChangeKind::New => "New position",
            ChangeKind::Increased => "Increased",
            ChangeKind::Decreased => "Reduced",
            ChangeKind::Exited => "Closed out",
            ChangeKind::Unchanged => "Unchanged",
        }
    }
}

/* The result of reconciling one code across two snapshots. Derived
once, never mutated. */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub id: HoldingId,
    pub name: String,
    pub kind: ChangeKind,
    pub previous_shares: Decimal,
    pub current_shares: Decimal,
    pub delta: Decimal,
}

impl Change {
    /* Unchanged rows stay in the merged table but are not "changes". */
    pub fn is_movement(&self) -> bool {
        return self.kind != ChangeKind::Unchanged;
    }
}
