// Comparison of two parsed itinerary responses
use crate::itinerary::{ItineraryKey, ParsedDocument, PriceBreakdown, Route};
use serde::Serialize;
use std::borrow::Cow;
use std::cell::OnceCell;
use tracing::debug;

/// One detected change, carrying the legs of the affected itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiffRecord {
    /// Present only in the candidate; legs and price as the candidate has them.
    Added { route: Route, price: PriceBreakdown },
    /// Present only in the baseline.
    Removed { route: Route, price: PriceBreakdown },
    PriceChanged {
        route: Route,
        old: PriceBreakdown,
        new: PriceBreakdown,
    },
    DataChanged { old: Route, new: Route },
}

impl DiffRecord {
    /// Legs as they appear in the newer of the two documents.
    pub fn route(&self) -> &Route {
        match self {
            DiffRecord::Added { route, .. }
            | DiffRecord::Removed { route, .. }
            | DiffRecord::PriceChanged { route, .. } => route,
            DiffRecord::DataChanged { new, .. } => new,
        }
    }

    pub fn key(&self) -> ItineraryKey {
        self.route().key()
    }
}

/// Changes of one candidate relative to the baseline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub added: Vec<DiffRecord>,
    pub removed: Vec<DiffRecord>,
    pub price_changed: Vec<DiffRecord>,
    pub data_changed: Vec<DiffRecord>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonCounts {
    pub added: usize,
    pub removed: usize,
    pub price_changed: usize,
    pub data_changed: usize,
}

impl Comparison {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.price_changed.is_empty()
            && self.data_changed.is_empty()
    }

    pub fn counts(&self) -> ComparisonCounts {
        ComparisonCounts {
            added: self.added.len(),
            removed: self.removed.len(),
            price_changed: self.price_changed.len(),
            data_changed: self.data_changed.len(),
        }
    }

    /// All records in report order: added, removed, price, data.
    pub fn records(&self) -> impl Iterator<Item = &DiffRecord> {
        self.added
            .iter()
            .chain(&self.removed)
            .chain(&self.price_changed)
            .chain(&self.data_changed)
    }
}

/// Compare a candidate against a baseline.
///
/// When exactly one side contains round trips both are compared on their
/// onward flights only, see [`ParsedDocument::one_way_view`].
pub fn compare(baseline: &ParsedDocument, candidate: &ParsedDocument) -> Comparison {
    let (baseline, candidate) = align(baseline, candidate);
    compare_aligned(&baseline, &candidate)
}

fn align<'a>(
    baseline: &'a ParsedDocument,
    candidate: &'a ParsedDocument,
) -> (Cow<'a, ParsedDocument>, Cow<'a, ParsedDocument>) {
    match (baseline.round_trip, candidate.round_trip) {
        (true, false) => (Cow::Owned(baseline.one_way_view()), Cow::Borrowed(candidate)),
        (false, true) => (Cow::Borrowed(baseline), Cow::Owned(candidate.one_way_view())),
        _ => (Cow::Borrowed(baseline), Cow::Borrowed(candidate)),
    }
}

// Both documents must already share a key shape
fn compare_aligned(baseline: &ParsedDocument, candidate: &ParsedDocument) -> Comparison {
    let mut comparison = Comparison::default();

    for (key, itinerary) in &candidate.itineraries {
        let Some(old) = baseline.itineraries.get(key) else {
            comparison.added.push(DiffRecord::Added {
                route: Route::new(key, &itinerary.data),
                price: itinerary.price.clone(),
            });
            continue;
        };

        if old.price != itinerary.price {
            comparison.price_changed.push(DiffRecord::PriceChanged {
                route: Route::new(key, &itinerary.data),
                old: old.price.clone(),
                new: itinerary.price.clone(),
            });
        }
        if old.data != itinerary.data {
            comparison.data_changed.push(DiffRecord::DataChanged {
                old: Route::new(key, &old.data),
                new: Route::new(key, &itinerary.data),
            });
        }
    }

    for (key, itinerary) in &baseline.itineraries {
        if !candidate.itineraries.contains_key(key) {
            comparison.removed.push(DiffRecord::Removed {
                route: Route::new(key, &itinerary.data),
                price: itinerary.price.clone(),
            });
        }
    }

    debug!(
        added = comparison.added.len(),
        removed = comparison.removed.len(),
        price_changed = comparison.price_changed.len(),
        data_changed = comparison.data_changed.len(),
        "compared itinerary responses"
    );
    comparison
}

/// Baseline document shared by several comparisons.
///
/// The onward-only projection is built the first time a one-way candidate
/// meets a round-trip baseline and reused afterwards.
#[derive(Debug)]
pub struct Baseline {
    document: ParsedDocument,
    one_way: OnceCell<ParsedDocument>,
}

impl Baseline {
    pub fn new(document: ParsedDocument) -> Self {
        Self {
            document,
            one_way: OnceCell::new(),
        }
    }

    pub fn document(&self) -> &ParsedDocument {
        &self.document
    }

    #[cfg(test)]
    fn is_projected(&self) -> bool {
        self.one_way.get().is_some()
    }

    pub fn compare(&self, candidate: &ParsedDocument) -> Comparison {
        match (self.document.round_trip, candidate.round_trip) {
            (true, false) => {
                let projected = self.one_way.get_or_init(|| {
                    debug!("projecting round-trip baseline to onward flights");
                    self.document.one_way_view()
                });
                compare_aligned(projected, candidate)
            }
            _ => compare(&self.document, candidate),
        }
    }
}
