use serde::Deserialize;

// Structures for XML deserialization.
// Required elements are optional here so the parser can report which one
// is missing instead of failing inside serde.
#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlAirFareSearchResponse {
    pub priced_itineraries: XmlPricedItineraries,
}

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlPricedItineraries {
    #[serde(rename = "Flights")]
    pub itineraries: Vec<XmlItinerary>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlItinerary {
    pub onward_priced_itinerary: Option<XmlDirection>,
    pub return_priced_itinerary: Option<XmlDirection>,
    pub pricing: Option<XmlPricing>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlDirection {
    pub flights: XmlFlights,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlFlights {
    #[serde(rename = "Flight")]
    pub flights: Vec<XmlFlight>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlFlight {
    pub carrier: Option<XmlText>,
    pub flight_number: Option<XmlText>,
    pub source: Option<XmlText>,
    pub destination: Option<XmlText>,
    pub class: Option<XmlText>,
    pub ticket_type: Option<XmlText>,
    pub departure_time_stamp: Option<XmlText>,
    pub arrival_time_stamp: Option<XmlText>,
}

// Text content of an element; attributes such as Carrier/@id are ignored
#[derive(Debug, PartialEq, Default, Deserialize, Clone)]
#[serde(default)]
pub struct XmlText {
    #[serde(rename = "$text")]
    pub value: Option<String>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlPricing {
    #[serde(rename = "@currency")]
    pub currency: Option<String>,
    #[serde(rename = "ServiceCharges")]
    pub service_charges: Vec<XmlServiceCharge>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone)]
#[serde(default)]
pub struct XmlServiceCharge {
    #[serde(rename = "@type")]
    pub passenger_type: Option<String>,
    #[serde(rename = "@ChargeType")]
    pub charge_type: Option<String>,
    #[serde(rename = "$text")]
    pub amount: Option<String>,
}
