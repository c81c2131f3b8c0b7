//! Read-only dashboard aggregation over the relief store.
//!
//! Pure projections: counts, sums, and the most recent ledger activity.
//! No state is touched.

use std::collections::BTreeMap;

use serde::Serialize;
use ts_rs::TS;

use relief_types::{AllocationRecord, ResourceKind};

use crate::store::ReliefStore;

/// Number of recent ledger records shown on the dashboard.
const RECENT_ALLOCATIONS: usize = 5;

/// Headline aggregate figures for the operations dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Overview {
    /// Number of disasters in the data set.
    pub total_disasters: usize,
    /// Disasters with severity 4 or 5.
    pub critical_disasters: usize,
    /// Sum of affected population across all disasters.
    pub total_affected: u64,
    /// Sum of `available` units per kind across all hubs.
    pub total_resources: BTreeMap<ResourceKind, u64>,
}

/// The full dashboard payload: overview plus recent ledger activity.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Dashboard {
    /// Aggregate figures.
    pub overview: Overview,
    /// The five most recent allocations, newest first.
    pub recent_allocations: Vec<AllocationRecord>,
}

/// Compute the dashboard projection.
pub fn dashboard(store: &ReliefStore) -> Dashboard {
    let total_disasters = store.disasters.len();
    let critical_disasters = store
        .disasters
        .values()
        .filter(|d| d.is_critical())
        .count();
    let total_affected = store
        .disasters
        .values()
        .map(|d| d.affected_population)
        .fold(0_u64, u64::saturating_add);

    let mut total_resources: BTreeMap<ResourceKind, u64> =
        ResourceKind::ALL.iter().map(|&kind| (kind, 0)).collect();
    for hub in store.hubs.values() {
        for (&kind, stock) in &hub.resources {
            if let Some(total) = total_resources.get_mut(&kind) {
                *total = total.saturating_add(u64::from(stock.available));
            }
        }
    }

    let mut recent: Vec<&AllocationRecord> = store.allocations().iter().collect();
    recent.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    let recent_allocations = recent
        .into_iter()
        .take(RECENT_ALLOCATIONS)
        .cloned()
        .collect();

    Dashboard {
        overview: Overview {
            total_disasters,
            critical_disasters,
            total_affected,
            total_resources,
        },
        recent_allocations,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testkit;
    use chrono::{Duration, Utc};
    use relief_types::AllocationStatus;

    #[test]
    fn overview_counts_and_sums() {
        let mut store = testkit::store_with_scenario();
        let mut minor = testkit::disaster("D2", "C1", &[(ResourceKind::Tents, 5)]);
        minor.severity = 2;
        minor.affected_population = 4_000;
        store.disasters.insert(minor.id.clone(), minor);

        let board = dashboard(&store);
        assert_eq!(board.overview.total_disasters, 2);
        // Only the severity-4 scenario disaster is critical.
        assert_eq!(board.overview.critical_disasters, 1);
        assert_eq!(board.overview.total_affected, 124_000);
    }

    #[test]
    fn resource_totals_match_independent_iteration() {
        let store = testkit::store_with_scenario();
        let board = dashboard(&store);

        for kind in ResourceKind::ALL {
            let independent: u64 = store
                .hubs
                .values()
                .map(|hub| u64::from(hub.available(kind)))
                .sum();
            assert_eq!(board.overview.total_resources.get(&kind), Some(&independent));
        }
        // Scenario stocks: 200 medical across H1+H2, 50 food, nothing else.
        assert_eq!(
            board.overview.total_resources.get(&ResourceKind::MedicalKits),
            Some(&200)
        );
        assert_eq!(
            board.overview.total_resources.get(&ResourceKind::Tents),
            Some(&0)
        );
    }

    #[test]
    fn recent_allocations_are_newest_first_and_capped_at_five() {
        let mut store = testkit::store_with_scenario();
        let base = Utc::now();
        for offset in 0..7_i64 {
            let mut record = testkit::record("H1", AllocationStatus::Dispatched);
            record.timestamp = base + Duration::seconds(offset);
            store.append_allocation(record).unwrap();
        }

        let board = dashboard(&store);
        assert_eq!(board.recent_allocations.len(), 5);
        let newest = board.recent_allocations.first().unwrap();
        assert_eq!(newest.timestamp, base + Duration::seconds(6));
        for pair in board.recent_allocations.windows(2) {
            let [earlier, later] = pair else {
                continue;
            };
            assert!(earlier.timestamp >= later.timestamp);
        }
    }
}
