// Itinerary response comparison: parsing, diffing and reporting

pub mod differ;
pub mod error;
pub mod itinerary;
pub mod orchestrator;
pub mod parser;
pub mod report;
pub mod xml_response;

// Re-export key types for convenience
pub use differ::{compare, Baseline, Comparison, ComparisonCounts, DiffRecord};
pub use error::{DiffError, ParseError};
pub use itinerary::{
    FlightData, FlightId, FlightLeg, ItineraryKey, LegData, ParsedDocument, PriceBreakdown,
    PricedItinerary, Route, ServiceCharge,
};
pub use orchestrator::{compare_files, FileComparison};
pub use parser::ItineraryParser;
pub use report::{write_report, ReportConfig, ReportFormat};
