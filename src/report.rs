// Rendering of comparison results
use crate::differ::DiffRecord;
use crate::orchestrator::FileComparison;
use std::fmt;
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

// Report configuration options
#[derive(Debug, Clone, Default)]
pub struct ReportConfig {
    pub format: ReportFormat,
    /// Append per-category counts after each file (text format only).
    pub show_summary: bool,
}

impl fmt::Display for DiffRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffRecord::Added { route, .. } => write!(f, "Flights added: {}", route),
            DiffRecord::Removed { route, .. } => write!(f, "Flights removed: {}", route),
            DiffRecord::PriceChanged { route, old, new } => write!(
                f,
                "Price changed for flights: {}\n    was: {}\n    now: {}",
                route, old, new
            ),
            DiffRecord::DataChanged { old, new } => {
                write!(f, "Data changed for flights: {}\n    was: {}", new, old)
            }
        }
    }
}

pub fn write_report<W: Write>(
    out: &mut W,
    results: &[FileComparison],
    config: &ReportConfig,
) -> std::io::Result<()> {
    match config.format {
        ReportFormat::Text => write_text(out, results, config.show_summary),
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, results)?;
            writeln!(out)
        }
    }
}

fn write_text<W: Write>(
    out: &mut W,
    results: &[FileComparison],
    show_summary: bool,
) -> std::io::Result<()> {
    for result in results {
        writeln!(out, "{}", result.path.display())?;
        for record in result.comparison.records() {
            writeln!(out, "{}", record)?;
            writeln!(out)?;
        }

        if show_summary {
            let counts = result.comparison.counts();
            writeln!(
                out,
                "added: {}, removed: {}, price changed: {}, data changed: {}",
                counts.added, counts.removed, counts.price_changed, counts.data_changed
            )?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::differ::Comparison;
    use crate::itinerary::tests::{flight_data, flight_id, price};
    use crate::itinerary::{FlightLeg, Route};
    use std::path::PathBuf;

    fn route(class: &str) -> Route {
        Route {
            onward: vec![FlightLeg {
                id: flight_id("AA", "100", "JFK", "LAX"),
                data: flight_data(class, "0800", "1130"),
            }],
            inbound: None,
        }
    }

    fn sample_results() -> Vec<FileComparison> {
        vec![FileComparison {
            path: PathBuf::from("candidate.xml"),
            comparison: Comparison {
                price_changed: vec![DiffRecord::PriceChanged {
                    route: route("Y"),
                    old: price("USD", "250.00"),
                    new: price("USD", "275.00"),
                }],
                data_changed: vec![DiffRecord::DataChanged {
                    old: route("Y"),
                    new: route("J"),
                }],
                ..Comparison::default()
            },
        }]
    }

    fn render(config: &ReportConfig) -> String {
        let mut out = Vec::new();
        write_report(&mut out, &sample_results(), config).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_text_report() {
        let text = render(&ReportConfig::default());
        let expected_leg = "{Carrier: AA, FlightNumber: 100, Source: JFK, Destination: LAX, Class: Y, TicketType: E, DepartureTimeStamp: 0800, ArrivalTimeStamp: 1130}";

        assert!(text.starts_with("candidate.xml\n"));
        assert!(text.contains(&format!("Price changed for flights: [{}]", expected_leg)));
        assert!(text.contains("    was: USD [TotalAmount: 250.00]\n    now: USD [TotalAmount: 275.00]\n\n"));
        assert!(text.contains(&format!("    was: [{}]", expected_leg)));
        assert!(text.contains("Data changed for flights: [{Carrier: AA"));
        assert!(!text.contains("added:"));
    }

    #[test]
    fn test_text_report_summary() {
        let text = render(&ReportConfig {
            format: ReportFormat::Text,
            show_summary: true,
        });
        assert!(text.ends_with("added: 0, removed: 0, price changed: 1, data changed: 1\n"));
    }

    #[test]
    fn test_added_record_display() {
        let record = DiffRecord::Added {
            route: Route {
                inbound: Some(route("Y").onward),
                ..route("Y")
            },
            price: price("USD", "480.00"),
        };
        let text = record.to_string();
        assert!(text.starts_with("Flights added: [{Carrier: AA"));
        assert!(text.contains("] return [{Carrier: AA"));
    }

    #[test]
    fn test_json_report() {
        let json = render(&ReportConfig {
            format: ReportFormat::Json,
            show_summary: false,
        });
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let file = &value[0];
        assert_eq!(file["file"], "candidate.xml");
        assert_eq!(file["added"].as_array().unwrap().len(), 0);
        assert_eq!(file["price_changed"][0]["kind"], "price_changed");
        assert_eq!(file["price_changed"][0]["new"]["charges"][0]["amount"], "275.00");
        assert_eq!(file["data_changed"][0]["new"]["onward"][0]["class"], "J");
        assert_eq!(file["data_changed"][0]["old"]["onward"][0]["carrier"], "AA");
        assert!(file["data_changed"][0]["old"].get("return").is_none());
    }
}
