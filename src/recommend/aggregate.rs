//! Candidate Aggregator: recommendation strings for a set of crime labels.

use tracing::warn;

use crate::corpus::Corpus;

/// Collects every recommendation registered under the given labels.
///
/// Order is label order, then scenario order, then recommendation order.
/// Labels absent from the corpus are logged and skipped — they contribute
/// nothing but are not errors. Duplicates across entries are preserved;
/// dedup happens after scoring.
pub fn collect_recommendations(corpus: &Corpus, labels: &[String]) -> Vec<String> {
    let mut recommendations = Vec::new();

    for label in labels {
        let Some(entry) = corpus.crime_by_label(label) else {
            warn!(label = %label, "Unknown crime label, skipping");
            continue;
        };

        for scenario in &entry.scenarios {
            recommendations.extend(scenario.recommendations.iter().cloned());
        }
    }

    recommendations
}
