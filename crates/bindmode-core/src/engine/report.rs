use super::interaction::{InteractionKind, InteractionRecord, ParticipantKey};
use crate::core::models::residue::ResidueKey;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Accumulates classifier output into an [`InteractionReport`].
///
/// The builder is the single writer of a report. Records are deduplicated per kind by
/// their canonical participant key; the first record seen for a key is kept.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    interactions: BTreeMap<InteractionKind, Vec<InteractionRecord>>,
    seen: BTreeMap<InteractionKind, HashSet<ParticipantKey>>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `records` under `kind`, returning how many were new.
    ///
    /// Records whose own kind differs from `kind` are ignored.
    pub fn merge(&mut self, kind: InteractionKind, records: Vec<InteractionRecord>) -> usize {
        let seen = self.seen.entry(kind).or_default();
        let bucket = self.interactions.entry(kind).or_default();
        let mut added = 0;
        for record in records {
            if record.kind != kind {
                continue;
            }
            if seen.insert(record.key().clone()) {
                bucket.push(record);
                added += 1;
            }
        }
        added
    }

    pub fn build(self) -> InteractionReport {
        let mut interactions = self.interactions;
        for kind in InteractionKind::ALL {
            interactions.entry(kind).or_default();
        }
        for records in interactions.values_mut() {
            records.sort_by(|a, b| a.key().cmp(b.key()));
        }

        let mut residue_counts: BTreeMap<ResidueKey, BTreeMap<InteractionKind, usize>> =
            BTreeMap::new();
        for (kind, records) in &interactions {
            for record in records {
                for residue in record.receptor_residues() {
                    *residue_counts
                        .entry(residue)
                        .or_default()
                        .entry(*kind)
                        .or_default() += 1;
                }
            }
        }

        InteractionReport {
            interactions,
            residue_counts,
        }
    }
}

/// One row of the per-residue summary table: a receptor residue that takes part in at
/// least one interaction of the given type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ResidueSummaryRow {
    pub interaction_type: InteractionKind,
    pub receptor_residue: ResidueKey,
}

/// Aggregate statistics of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub total_interactions: usize,
    /// Interaction records per type.
    pub interaction_counts: BTreeMap<InteractionKind, usize>,
    /// Residue summary rows per type.
    pub residue_rows_per_type: BTreeMap<InteractionKind, usize>,
    pub unique_residues: usize,
}

/// Detected interactions grouped by type, with per-residue counts.
///
/// Every [`InteractionKind`] is present, possibly with no records. Records within a
/// kind are ordered by participant key, so identical inputs produce identical reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionReport {
    #[serde(flatten)]
    interactions: BTreeMap<InteractionKind, Vec<InteractionRecord>>,
    #[serde(skip)]
    residue_counts: BTreeMap<ResidueKey, BTreeMap<InteractionKind, usize>>,
}

impl InteractionReport {
    pub fn records(&self, kind: InteractionKind) -> &[InteractionRecord] {
        self.interactions
            .get(&kind)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Iterates over every kind and its records in report order.
    pub fn iter(&self) -> impl Iterator<Item = (InteractionKind, &[InteractionRecord])> {
        self.interactions.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    /// Every record in which `residue` takes part on the receptor side.
    pub fn records_for_residue(&self, residue: &ResidueKey) -> Vec<&InteractionRecord> {
        self.interactions
            .values()
            .flatten()
            .filter(|record| {
                record
                    .receptor_atoms
                    .iter()
                    .any(|site| &site.residue_key() == residue)
            })
            .collect()
    }

    pub fn type_count(&self, kind: InteractionKind) -> usize {
        self.records(kind).len()
    }

    /// Interaction counts per receptor residue and type.
    pub fn residue_counts(&self) -> &BTreeMap<ResidueKey, BTreeMap<InteractionKind, usize>> {
        &self.residue_counts
    }

    pub fn residue_count(&self, residue: &ResidueKey, kind: InteractionKind) -> usize {
        self.residue_counts
            .get(residue)
            .and_then(|counts| counts.get(&kind))
            .copied()
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.interactions.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Distinct `(type, receptor residue)` pairs, ordered by type then residue.
    pub fn residue_summary(&self) -> Vec<ResidueSummaryRow> {
        let rows: BTreeSet<ResidueSummaryRow> = self
            .residue_counts
            .iter()
            .flat_map(|(residue, counts)| {
                counts.keys().map(move |kind| ResidueSummaryRow {
                    interaction_type: *kind,
                    receptor_residue: residue.clone(),
                })
            })
            .collect();
        rows.into_iter().collect()
    }

    pub fn summary(&self) -> ReportSummary {
        let interaction_counts = InteractionKind::ALL
            .into_iter()
            .map(|kind| (kind, self.type_count(kind)))
            .collect();
        let mut residue_rows_per_type: BTreeMap<InteractionKind, usize> =
            InteractionKind::ALL.into_iter().map(|kind| (kind, 0)).collect();
        for row in self.residue_summary() {
            *residue_rows_per_type.entry(row.interaction_type).or_default() += 1;
        }
        ReportSummary {
            total_interactions: self.total(),
            interaction_counts,
            residue_rows_per_type,
            unique_residues: self.residue_counts.len(),
        }
    }
}
