use std::path::PathBuf;
use thiserror::Error;

// Errors raised while turning one response document into itineraries.
// `itinerary` is the 1-based position of the PricedItineraries/Flights node.
#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("XML parse error: {0}")]
    XmlParseError(String),

    #[error("itinerary #{itinerary}: missing required element {element}")]
    MissingElement { itinerary: usize, element: String },

    #[error("itinerary #{itinerary}: element {element} is empty")]
    EmptyElement { itinerary: usize, element: String },

    #[error("itinerary #{itinerary}: {element} has no time component: {value:?}")]
    InvalidTimestamp {
        itinerary: usize,
        element: String,
        value: String,
    },

    #[error("itinerary #{itinerary}: no onward flights")]
    NoOnwardFlights { itinerary: usize },
}

// Errors that abort a whole comparison run
#[derive(Error, Debug)]
pub enum DiffError {
    #[error("cannot read {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed document {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("need a baseline and at least one file to compare, got {0} file(s)")]
    NotEnoughFiles(usize),
}
