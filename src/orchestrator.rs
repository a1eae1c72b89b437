// Baseline-versus-candidates comparison over files
use crate::differ::{Baseline, Comparison};
use crate::error::DiffError;
use crate::parser::ItineraryParser;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Result of comparing one candidate file with the baseline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileComparison {
    #[serde(rename = "file")]
    pub path: PathBuf,
    #[serde(flatten)]
    pub comparison: Comparison,
}

/// Compare every candidate file with the baseline file.
///
/// All files are parsed before anything is compared, so an unreadable or
/// malformed file fails the whole run without partial results. Candidates
/// are never compared with each other. Results follow the candidate order.
pub fn compare_files<B: AsRef<Path>, P: AsRef<Path>>(
    baseline: B,
    candidates: &[P],
) -> Result<Vec<FileComparison>, DiffError> {
    if candidates.is_empty() {
        return Err(DiffError::NotEnoughFiles(1));
    }

    let parser = ItineraryParser::new();
    let baseline = Baseline::new(parser.parse_file(baseline.as_ref())?);
    let documents = candidates
        .iter()
        .map(|path| {
            let path = path.as_ref();
            parser
                .parse_file(path)
                .map(|document| (path.to_path_buf(), document))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let results: Vec<FileComparison> = documents
        .iter()
        .map(|(path, document)| FileComparison {
            path: path.clone(),
            comparison: baseline.compare(document),
        })
        .collect();

    info!(
        candidates = results.len(),
        baseline_itineraries = baseline.document().len(),
        "comparison finished"
    );
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itinerary::ItineraryKey;
    use std::fs;

    const SAMPLE_ONE_WAY_PATH: &str = "samples/one_way_baseline.xml";
    const SAMPLE_ONE_WAY_CHANGED_PATH: &str = "samples/one_way_changed.xml";
    const SAMPLE_ROUND_TRIP_PATH: &str = "samples/round_trip.xml";

    #[test]
    fn test_compare_sample_files() {
        let result = compare_files(
            SAMPLE_ONE_WAY_PATH,
            &[SAMPLE_ONE_WAY_CHANGED_PATH, SAMPLE_ONE_WAY_PATH],
        );
        assert!(result.is_ok(), "comparison failed: {:?}", result.err());
        let results = result.unwrap();
        assert_eq!(results.len(), 2);

        let changed = &results[0];
        assert_eq!(changed.path, PathBuf::from(SAMPLE_ONE_WAY_CHANGED_PATH));
        let counts = changed.comparison.counts();
        assert_eq!(counts.added, 1);
        assert_eq!(counts.removed, 1);
        assert_eq!(counts.price_changed, 1);
        assert_eq!(counts.data_changed, 1);

        let added = changed.comparison.added[0].key();
        assert_eq!(added.onward()[0].flight_number, "334");

        assert!(results[1].comparison.is_empty());
    }

    #[test]
    fn test_round_trip_candidate_against_one_way_baseline() {
        let results = compare_files(SAMPLE_ONE_WAY_PATH, &[SAMPLE_ROUND_TRIP_PATH]).unwrap();
        let comparison = &results[0].comparison;

        // The round trip's onward flights match a one-way baseline itinerary
        assert!(comparison
            .removed
            .iter()
            .all(|record| record.key().onward()[0].flight_number != "996"));
        assert!(comparison
            .records()
            .all(|record| !matches!(record.key(), ItineraryKey::RoundTrip { .. })));
        assert_eq!(comparison.price_changed.len(), 1);
    }

    #[test]
    fn test_one_way_candidates_against_round_trip_baseline() {
        let results = compare_files(
            SAMPLE_ROUND_TRIP_PATH,
            &[SAMPLE_ONE_WAY_PATH, SAMPLE_ONE_WAY_CHANGED_PATH],
        )
        .unwrap();
        assert_eq!(results.len(), 2);
        for result in &results {
            assert!(result
                .comparison
                .records()
                .all(|record| record.route().inbound.is_none()));
        }
    }

    #[test]
    fn test_missing_candidate_aborts_run() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.xml");
        let baseline = PathBuf::from(SAMPLE_ONE_WAY_PATH);

        match compare_files(baseline, &[missing.clone()]) {
            Err(DiffError::FileAccess { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected a file access error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_candidate_aborts_run() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.xml");
        fs::write(
            &broken,
            "<AirFareSearchResponse><PricedItineraries><Flights></Flights></PricedItineraries></AirFareSearchResponse>",
        )
        .unwrap();
        let good = PathBuf::from(SAMPLE_ONE_WAY_CHANGED_PATH);

        let result = compare_files(PathBuf::from(SAMPLE_ONE_WAY_PATH), &[good, broken.clone()]);
        match result {
            Err(DiffError::Parse { path, .. }) => assert_eq!(path, broken),
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_needs_a_candidate() {
        let candidates: [&str; 0] = [];
        assert!(matches!(
            compare_files(SAMPLE_ONE_WAY_PATH, &candidates),
            Err(DiffError::NotEnoughFiles(1))
        ));
    }
}
