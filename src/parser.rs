// Itinerary response parsing
use crate::error::{DiffError, ParseError};
use crate::itinerary::{
    FlightData, FlightId, ItineraryKey, LegData, ParsedDocument, PriceBreakdown,
    PricedItinerary, ServiceCharge,
};
use crate::xml_response::{XmlAirFareSearchResponse, XmlFlight, XmlItinerary, XmlText};
use quick_xml::de::from_str;
use std::path::Path;
use tracing::debug;

/// Only charges of this kind make up an itinerary's price breakdown.
pub const TOTAL_AMOUNT_CHARGE: &str = "TotalAmount";

// Parses whole documents in memory; responses are assumed to fit.
#[derive(Debug, Default, Clone, Copy)]
pub struct ItineraryParser;

impl ItineraryParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a response document already loaded into memory.
    pub fn parse_str(&self, xml: &str) -> Result<ParsedDocument, ParseError> {
        let response: XmlAirFareSearchResponse =
            from_str(xml).map_err(|e| ParseError::XmlParseError(e.to_string()))?;

        let mut document = ParsedDocument::default();
        for (index, itinerary) in response.priced_itineraries.itineraries.iter().enumerate() {
            let (key, priced) = convert_itinerary(index + 1, itinerary)?;
            document.insert(key, priced);
        }

        Ok(document)
    }

    /// Read and parse one response file.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<ParsedDocument, DiffError> {
        let path = path.as_ref();
        let xml = std::fs::read_to_string(path).map_err(|source| DiffError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;

        let document = self.parse_str(&xml).map_err(|source| DiffError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(
            path = %path.display(),
            itineraries = document.len(),
            round_trip = document.round_trip,
            "parsed itinerary response"
        );
        Ok(document)
    }
}

fn convert_itinerary(
    itinerary: usize,
    xml: &XmlItinerary,
) -> Result<(ItineraryKey, PricedItinerary), ParseError> {
    let onward = match &xml.onward_priced_itinerary {
        Some(direction) => convert_flights(itinerary, &direction.flights.flights)?,
        None => (Vec::new(), Vec::new()),
    };
    if onward.0.is_empty() {
        return Err(ParseError::NoOnwardFlights { itinerary });
    }

    let inbound = match &xml.return_priced_itinerary {
        Some(direction) => convert_flights(itinerary, &direction.flights.flights)?,
        None => (Vec::new(), Vec::new()),
    };

    let price = convert_pricing(itinerary, xml)?;

    let (onward_ids, onward_data) = onward;
    let (inbound_ids, inbound_data) = inbound;
    let entry = if inbound_ids.is_empty() {
        (
            ItineraryKey::OneWay(onward_ids),
            PricedItinerary {
                price,
                data: LegData::OneWay(onward_data),
            },
        )
    } else {
        (
            ItineraryKey::RoundTrip {
                onward: onward_ids,
                inbound: inbound_ids,
            },
            PricedItinerary {
                price,
                data: LegData::RoundTrip {
                    onward: onward_data,
                    inbound: inbound_data,
                },
            },
        )
    };

    Ok(entry)
}

fn convert_flights(
    itinerary: usize,
    flights: &[XmlFlight],
) -> Result<(Vec<FlightId>, Vec<FlightData>), ParseError> {
    let mut ids = Vec::with_capacity(flights.len());
    let mut data = Vec::with_capacity(flights.len());

    for flight in flights {
        ids.push(FlightId {
            carrier: required_text(itinerary, "Carrier", &flight.carrier)?,
            flight_number: required_text(itinerary, "FlightNumber", &flight.flight_number)?,
            source: required_text(itinerary, "Source", &flight.source)?,
            destination: required_text(itinerary, "Destination", &flight.destination)?,
        });
        data.push(FlightData {
            class: required_text(itinerary, "Class", &flight.class)?,
            ticket_type: required_text(itinerary, "TicketType", &flight.ticket_type)?,
            departure_time: time_of_day(
                itinerary,
                "DepartureTimeStamp",
                &flight.departure_time_stamp,
            )?,
            arrival_time: time_of_day(itinerary, "ArrivalTimeStamp", &flight.arrival_time_stamp)?,
        });
    }

    Ok((ids, data))
}

fn convert_pricing(itinerary: usize, xml: &XmlItinerary) -> Result<PriceBreakdown, ParseError> {
    let pricing = xml
        .pricing
        .as_ref()
        .ok_or_else(|| ParseError::MissingElement {
            itinerary,
            element: "Pricing".to_string(),
        })?;

    let currency = pricing
        .currency
        .clone()
        .ok_or_else(|| ParseError::MissingElement {
            itinerary,
            element: "Pricing/@currency".to_string(),
        })?;

    let mut charges = Vec::new();
    for charge in &pricing.service_charges {
        if charge.charge_type.as_deref() != Some(TOTAL_AMOUNT_CHARGE) {
            continue;
        }

        let passenger_type = charge
            .passenger_type
            .clone()
            .ok_or_else(|| ParseError::MissingElement {
                itinerary,
                element: "ServiceCharges/@type".to_string(),
            })?;
        let amount = charge
            .amount
            .as_deref()
            .map(str::trim)
            .filter(|amount| !amount.is_empty())
            .ok_or_else(|| ParseError::EmptyElement {
                itinerary,
                element: "ServiceCharges".to_string(),
            })?;

        charges.push(ServiceCharge {
            passenger_type,
            amount: amount.to_string(),
        });
    }

    Ok(PriceBreakdown { currency, charges })
}

fn required_text(
    itinerary: usize,
    element: &str,
    value: &Option<XmlText>,
) -> Result<String, ParseError> {
    let text = value.as_ref().ok_or_else(|| ParseError::MissingElement {
        itinerary,
        element: element.to_string(),
    })?;

    match text.value.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(ParseError::EmptyElement {
            itinerary,
            element: element.to_string(),
        }),
    }
}

// "2015-03-09T0910" -> "0910"; the date is dropped on purpose
fn time_of_day(
    itinerary: usize,
    element: &str,
    value: &Option<XmlText>,
) -> Result<String, ParseError> {
    let timestamp = required_text(itinerary, element, value)?;
    match timestamp.split('T').nth(1) {
        Some(time) if !time.is_empty() => Ok(time.to_string()),
        _ => Err(ParseError::InvalidTimestamp {
            itinerary,
            element: element.to_string(),
            value: timestamp,
        }),
    }
}

// A small sample for inline testing
pub const SMALL_SAMPLE_XML: &str = r#"
<AirFareSearchResponse>
  <RequestId>1</RequestId>
  <PricedItineraries>
    <Flights>
      <OnwardPricedItinerary>
        <Flights>
          <Flight>
            <Carrier id="AI">AirIndia</Carrier>
            <FlightNumber>996</FlightNumber>
            <Source>DXB</Source>
            <Destination>DEL</Destination>
            <DepartureTimeStamp>2018-10-22T0005</DepartureTimeStamp>
            <ArrivalTimeStamp>2018-10-22T0445</ArrivalTimeStamp>
            <Class>G</Class>
            <NumberOfStops>0</NumberOfStops>
            <TicketType>E</TicketType>
          </Flight>
          <Flight>
            <Carrier id="AI">AirIndia</Carrier>
            <FlightNumber>332</FlightNumber>
            <Source>DEL</Source>
            <Destination>BKK</Destination>
            <DepartureTimeStamp>2018-10-22T1350</DepartureTimeStamp>
            <ArrivalTimeStamp>2018-10-22T1935</ArrivalTimeStamp>
            <Class>G</Class>
            <NumberOfStops>0</NumberOfStops>
            <TicketType>E</TicketType>
          </Flight>
        </Flights>
      </OnwardPricedItinerary>
      <Pricing currency="SGD">
        <ServiceCharges type="SingleAdult" ChargeType="BaseFare">191.00</ServiceCharges>
        <ServiceCharges type="SingleAdult" ChargeType="AirlineTaxes">155.80</ServiceCharges>
        <ServiceCharges type="SingleAdult" ChargeType="TotalAmount">346.80</ServiceCharges>
      </Pricing>
    </Flights>
  </PricedItineraries>
</AirFareSearchResponse>
"#;
