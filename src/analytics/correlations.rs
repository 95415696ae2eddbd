//! Correlation Engine
//!
//! Computes pairwise symptom co-occurrence strength across daily logs.
//! A pair's correlation is the number of logs containing both symptoms divided
//! by the occurrence count of the rarer symptom.

use crate::analytics::types::{DailyLog, SymptomCorrelation};
use std::collections::{BTreeMap, BTreeSet};

/// Minimum co-occurrences and per-symptom occurrences to report a pair
pub const MIN_OCCURRENCES: usize = 3;

/// Pairs at or below this ratio are dropped
pub const MIN_CORRELATION: f64 = 0.4;

/// Maximum number of pairs returned
pub const MAX_CORRELATIONS: usize = 10;

/// Calculate co-occurrence correlations for all symptom pairs
///
/// Returns at most 10 pairs, strongest first. Input order does not matter.
pub fn symptom_correlations(logs: &[DailyLog]) -> Vec<SymptomCorrelation> {
    let mut totals: BTreeMap<&str, usize> = BTreeMap::new();
    let mut pairs: BTreeMap<(&str, &str), usize> = BTreeMap::new();

    for log in logs {
        // Sorted and deduplicated, so (a, b) always has a < b
        let ids: BTreeSet<&str> = log.symptoms.iter().map(|s| s.symptom_id.as_str()).collect();

        for &id in &ids {
            *totals.entry(id).or_insert(0) += 1;
        }

        if ids.len() < 2 {
            continue;
        }

        let ids: Vec<&str> = ids.into_iter().collect();
        for i in 0..ids.len() {
            for j in (i + 1)..ids.len() {
                *pairs.entry((ids[i], ids[j])).or_insert(0) += 1;
            }
        }
    }

    let mut correlations: Vec<SymptomCorrelation> = pairs
        .into_iter()
        .filter_map(|((a, b), count)| {
            let total_a = totals.get(a).copied().unwrap_or(0);
            let total_b = totals.get(b).copied().unwrap_or(0);

            if count < MIN_OCCURRENCES || total_a < MIN_OCCURRENCES || total_b < MIN_OCCURRENCES {
                return None;
            }

            let correlation = count as f64 / total_a.min(total_b) as f64;
            if correlation <= MIN_CORRELATION {
                return None;
            }

            Some(SymptomCorrelation {
                symptom_a: a.to_string(),
                symptom_b: b.to_string(),
                correlation,
                co_occurrence_count: count,
            })
        })
        .collect();

    // Strongest first; ties broken by count, then by name for stable output
    correlations.sort_by(|x, y| {
        y.correlation
            .partial_cmp(&x.correlation)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| y.co_occurrence_count.cmp(&x.co_occurrence_count))
            .then_with(|| x.symptom_a.cmp(&y.symptom_a))
            .then_with(|| x.symptom_b.cmp(&y.symptom_b))
    });
    correlations.truncate(MAX_CORRELATIONS);

    tracing::debug!(
        logs = logs.len(),
        symptoms = totals.len(),
        correlations = correlations.len(),
        "Computed symptom correlations"
    );

    correlations
}
