// Canonical itinerary model shared by the parser and the differ
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

// Fields used to recognise the same flight across responses
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FlightId {
    pub carrier: String,
    pub flight_number: String,
    pub source: String,
    pub destination: String,
}

// Fields compared for changes but never used for matching.
// Times keep only the time-of-day part of the timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FlightData {
    pub class: String,
    pub ticket_type: String,
    pub departure_time: String,
    pub arrival_time: String,
}

/// A single flight of one direction, identity and data together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightLeg {
    #[serde(flatten)]
    pub id: FlightId,
    #[serde(flatten)]
    pub data: FlightData,
}

impl fmt::Display for FlightLeg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{Carrier: {}, FlightNumber: {}, Source: {}, Destination: {}, Class: {}, TicketType: {}, DepartureTimeStamp: {}, ArrivalTimeStamp: {}}}",
            self.id.carrier,
            self.id.flight_number,
            self.id.source,
            self.id.destination,
            self.data.class,
            self.data.ticket_type,
            self.data.departure_time,
            self.data.arrival_time,
        )
    }
}

/// Identity of a priced itinerary: the ordered onward flight ids, plus the
/// ordered return flight ids for round trips.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItineraryKey {
    OneWay(Vec<FlightId>),
    RoundTrip {
        onward: Vec<FlightId>,
        inbound: Vec<FlightId>,
    },
}

impl ItineraryKey {
    pub fn onward(&self) -> &[FlightId] {
        match self {
            ItineraryKey::OneWay(onward) | ItineraryKey::RoundTrip { onward, .. } => onward,
        }
    }

    pub fn is_round_trip(&self) -> bool {
        matches!(self, ItineraryKey::RoundTrip { .. })
    }
}

/// Per-leg data in the same shape as the key it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegData {
    OneWay(Vec<FlightData>),
    RoundTrip {
        onward: Vec<FlightData>,
        inbound: Vec<FlightData>,
    },
}

impl LegData {
    pub fn onward(&self) -> &[FlightData] {
        match self {
            LegData::OneWay(onward) | LegData::RoundTrip { onward, .. } => onward,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceCharge {
    pub passenger_type: String,
    pub amount: String,
}

/// Currency plus the `TotalAmount` charges of an itinerary, in document order.
/// Compared as-is: amounts are text, order matters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    pub currency: String,
    pub charges: Vec<ServiceCharge>,
}

impl fmt::Display for PriceBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.currency)?;
        for (i, charge) in self.charges.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", charge.passenger_type, charge.amount)?;
        }
        write!(f, "]")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedItinerary {
    pub price: PriceBreakdown,
    pub data: LegData,
}

/// Flight legs rebuilt from a key and its data, for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub onward: Vec<FlightLeg>,
    #[serde(rename = "return", skip_serializing_if = "Option::is_none")]
    pub inbound: Option<Vec<FlightLeg>>,
}

impl Route {
    pub fn new(key: &ItineraryKey, data: &LegData) -> Self {
        match (key, data) {
            (
                ItineraryKey::RoundTrip { onward, inbound },
                LegData::RoundTrip {
                    onward: onward_data,
                    inbound: inbound_data,
                },
            ) => Route {
                onward: zip_legs(onward, onward_data),
                inbound: Some(zip_legs(inbound, inbound_data)),
            },
            // Shapes only disagree if a caller mixes a projected key with
            // native data; fall back to the onward direction on both sides.
            _ => Route {
                onward: zip_legs(key.onward(), data.onward()),
                inbound: None,
            },
        }
    }

    /// Re-derive the identity key from the legs.
    pub fn key(&self) -> ItineraryKey {
        let onward = self.onward.iter().map(|leg| leg.id.clone()).collect();
        match &self.inbound {
            Some(inbound) => ItineraryKey::RoundTrip {
                onward,
                inbound: inbound.iter().map(|leg| leg.id.clone()).collect(),
            },
            None => ItineraryKey::OneWay(onward),
        }
    }
}

fn zip_legs(ids: &[FlightId], data: &[FlightData]) -> Vec<FlightLeg> {
    ids.iter()
        .zip(data)
        .map(|(id, data)| FlightLeg {
            id: id.clone(),
            data: data.clone(),
        })
        .collect()
}

fn write_legs(f: &mut fmt::Formatter<'_>, legs: &[FlightLeg]) -> fmt::Result {
    write!(f, "[")?;
    for (i, leg) in legs.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", leg)?;
    }
    write!(f, "]")
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_legs(f, &self.onward)?;
        if let Some(inbound) = &self.inbound {
            write!(f, " return ")?;
            write_legs(f, inbound)?;
        }
        Ok(())
    }
}

/// All priced itineraries of one response file, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    /// Set when at least one itinerary has a return direction.
    pub round_trip: bool,
    pub itineraries: IndexMap<ItineraryKey, PricedItinerary>,
}

impl ParsedDocument {
    pub fn len(&self) -> usize {
        self.itineraries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.itineraries.is_empty()
    }

    // A repeated key keeps its first position but takes the later value
    pub fn insert(&mut self, key: ItineraryKey, itinerary: PricedItinerary) {
        if key.is_round_trip() {
            self.round_trip = true;
        }
        self.itineraries.insert(key, itinerary);
    }

    /// Onward-only view of the document, used when comparing against a
    /// response of the other shape. Round trips are re-keyed on their onward
    /// flights and keep only onward data; one-way entries are carried over.
    /// Itineraries sharing onward flights collapse to the last one in
    /// document order.
    pub fn one_way_view(&self) -> ParsedDocument {
        let mut itineraries = IndexMap::with_capacity(self.itineraries.len());
        for (key, itinerary) in &self.itineraries {
            itineraries.insert(
                ItineraryKey::OneWay(key.onward().to_vec()),
                PricedItinerary {
                    price: itinerary.price.clone(),
                    data: LegData::OneWay(itinerary.data.onward().to_vec()),
                },
            );
        }

        ParsedDocument {
            round_trip: false,
            itineraries,
        }
    }
}
