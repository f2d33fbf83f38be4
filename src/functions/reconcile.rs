use rust_decimal::Decimal;

use crate::structs::{Change, ChangeKind, Holding, HoldingId, HoldingSet};

/* Shown when neither snapshot carries a display name for a code. */
pub const UNKNOWN_NAME: &str = "unknown";

/* Outer-join comparison of today's snapshot against the most recent
prior one.

With no prior snapshot (first run, or the stored file was unreadable)
every current holding is a new position; that is a fully defined result,
not an error. Otherwise every code present on either side gets exactly
one entry, with a missing side counting as zero shares.

Classification uses exact Decimal equality: both sides have already
been through the same text normalization, so no epsilon band is applied
on top. Unchanged rows are kept so the caller still has the full merged
table; the changes-only view is `movements`.

Output is sorted by category (new, increased, decreased, exited,
unchanged) with the code as tiebreak, so runs are reproducible. */
pub fn reconcile(current: &HoldingSet, previous: Option<&HoldingSet>) -> Vec<Change> {
    let mut changes: Vec<Change> = match previous {
        None => current.iter().map(first_seen).collect(),
        Some(previous) => {
            let mut ids: Vec<&HoldingId> = current.ids().chain(previous.ids()).collect();
            ids.sort();
            ids.dedup();
            ids.into_iter()
                .map(|id| classify(id, current.get(id), previous.get(id)))
                .collect()
        }
    };

    changes.sort_by(|a, b| {
        a.kind
            .priority()
            .cmp(&b.kind.priority())
            .then_with(|| a.id.cmp(&b.id))
    });
    return changes;
}

/* The changes-only view: everything except unchanged rows, in the
same order `reconcile` produced. */
pub fn movements(changes: &[Change]) -> Vec<&Change> {
    return changes.iter().filter(|c| c.is_movement()).collect();
}

fn first_seen(holding: &Holding) -> Change {
    return Change {
        id: holding.id.clone(),
        name: resolve_name(Some(holding), None),
        kind: ChangeKind::New,
        previous_shares: Decimal::ZERO,
        current_shares: holding.shares,
        delta: holding.shares,
    };
}

fn classify(id: &HoldingId, current: Option<&Holding>, previous: Option<&Holding>) -> Change {
    let previous_shares = previous.map(|h| h.shares).unwrap_or(Decimal::ZERO);
    let current_shares = current.map(|h| h.shares).unwrap_or(Decimal::ZERO);
    let delta = current_shares - previous_shares;

    // First match wins; the order matters for the zero-share edges.
    let kind = if previous_shares.is_zero() && current_shares > Decimal::ZERO {
        ChangeKind::New
    } else if previous_shares > Decimal::ZERO && current_shares.is_zero() {
        ChangeKind::Exited
    } else if delta > Decimal::ZERO {
        ChangeKind::Increased
    } else if delta < Decimal::ZERO {
        ChangeKind::Decreased
    } else {
        ChangeKind::Unchanged
    };

    return Change {
        id: id.clone(),
        name: resolve_name(current, previous),
        kind,
        previous_shares,
        current_shares,
        delta,
    };
}

/* Today's name wins; a closed-out position falls back to the name the
prior snapshot had for it. */
fn resolve_name(current: Option<&Holding>, previous: Option<&Holding>) -> String {
    if let Some(holding) = current {
        if holding.has_name() {
            return holding.name.clone();
        }
    }
    if let Some(holding) = previous {
        if holding.has_name() {
            return holding.name.clone();
        }
    }
    return UNKNOWN_NAME.to_string();
}
