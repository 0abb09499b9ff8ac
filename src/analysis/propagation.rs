//! # Taint Propagator
//!
//! Computes the transitive closure of taint over the construction graph:
//! a unit that directly or indirectly constructs a tainted unit becomes
//! tainted itself. Taint flows from callee to caller, against the edge
//! direction observed at the construction site.
//!
//! ## Algorithm
//!
//! Instead of rescanning the clean set to a fixed point, the propagator
//! builds a reverse adjacency index (`full name -> dependent units`) and
//! drains a work queue seeded with every directly tainted unit. Each
//! dequeued unit taints and enqueues its still-clean dependents. A unit
//! moves clean -> tainted at most once, so self-edges and cycles terminate
//! and the whole pass is linear in edges.

use crate::model::Unit;
use std::collections::{HashMap, VecDeque};

/// Propagates taint through the unit collection in place.
///
/// Mutates only `indirectly_tainted`, and only ever from `false` to `true`:
/// the tainted set grows monotonically and a second invocation on an
/// already-fixed-point collection is a no-op.
pub fn propagate(units: &mut [Unit]) {
    // Reverse adjacency: dependency full name -> indices of units that
    // construct it. Duplicate dependency entries collapse harmlessly since
    // a unit is tainted at most once.
    let mut dependents: HashMap<String, Vec<usize>> = HashMap::new();
    for (idx, unit) in units.iter().enumerate() {
        for dep in &unit.dependencies {
            dependents.entry(dep.clone()).or_default().push(idx);
        }
    }

    let mut queue: VecDeque<usize> = units
        .iter()
        .enumerate()
        .filter(|(_, u)| u.is_tainted())
        .map(|(idx, _)| idx)
        .collect();

    let mut spread = 0usize;
    while let Some(idx) = queue.pop_front() {
        let full_name = units[idx].full_name();
        let Some(callers) = dependents.get(&full_name) else {
            continue;
        };

        for &caller in callers {
            if units[caller].is_clean() {
                units[caller].indirectly_tainted = true;
                log::debug!(
                    "taint spread: {} -> {}",
                    full_name,
                    units[caller].full_name()
                );
                spread += 1;
                queue.push_back(caller);
            }
        }
    }

    if spread > 0 {
        log::debug!("propagation tainted {} additional units", spread);
    }
}
