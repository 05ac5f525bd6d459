// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Run-list feed parser.
//!
//! Expected document shape:
//!
//! ```xml
//! <plusService>
//!   <runList>
//!     <run>
//!       <startTime>2011-05-13T07:42:10-07:00</startTime>
//!       <distance>5.0012</distance>   <!-- km -->
//!       <duration>1523000</duration>  <!-- ms -->
//!       <howFelt>1</howFelt>          <!-- optional -->
//!       <weather>1</weather>          <!-- optional -->
//!       <terrain>1</terrain>          <!-- optional -->
//!     </run>
//!   </runList>
//!   <runListSummary>
//!     <runs>1</runs>
//!     <distance>5.0012</distance>
//!     <duration>1523000</duration>
//!   </runListSummary>
//! </plusService>
//! ```

use roxmltree::{Document, Node};
use std::str::FromStr;

use crate::models::{Run, RunHistory, RunHistorySummary};
use crate::time_utils::parse_feed_timestamp;
use crate::units::{decompose_duration, km_to_miles, ms_to_seconds, DurationMode};

const SUMMARY_SECTION: &str = "runListSummary";
const RUN_LIST_SECTION: &str = "runList";
const RUN_ELEMENT: &str = "run";

/// Parses feed documents into a [`RunHistory`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedParser {
    start_offset: usize,
    duration_mode: DurationMode,
}

impl FeedParser {
    pub fn new(start_offset: usize, duration_mode: DurationMode) -> Self {
        Self {
            start_offset,
            duration_mode,
        }
    }

    /// Parse a raw cached document.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<RunHistory, FeedError> {
        self.parse(std::str::from_utf8(bytes)?)
    }

    /// Parse a feed document.
    pub fn parse(&self, xml: &str) -> Result<RunHistory, FeedError> {
        let doc = Document::parse(xml)?;

        let summary = self.parse_summary(find_section(&doc, SUMMARY_SECTION)?)?;
        let run_list = find_section(&doc, RUN_LIST_SECTION)?;

        let runs = run_list
            .descendants()
            .skip(1)
            .filter(|n| n.has_tag_name(RUN_ELEMENT))
            .enumerate()
            .map(|(index, node)| parse_run(index, node))
            .collect::<Result<Vec<_>, _>>()?;

        if runs.len() as u64 != summary.total_runs {
            tracing::warn!(
                parsed = runs.len(),
                reported = summary.total_runs,
                "Run count differs from feed summary"
            );
        }

        let history = RunHistory::new(summary, runs, self.start_offset);
        tracing::info!(
            parsed = history.parsed_run_count(),
            retained = history.runs().len(),
            start_offset = self.start_offset,
            "Parsed run-list feed"
        );
        Ok(history)
    }

    fn parse_summary(&self, node: Node) -> Result<RunHistorySummary, FeedError> {
        let total_runs: u64 = required(node, "runs", "summary")?;
        let distance_km: f64 = required_distance(node, "summary")?;
        let duration_ms: u64 = required(node, "duration", "summary")?;

        let total_duration_seconds = ms_to_seconds(duration_ms);
        Ok(RunHistorySummary {
            total_runs,
            total_distance_miles: km_to_miles(distance_km),
            total_duration_seconds,
            total_duration: decompose_duration(total_duration_seconds, self.duration_mode),
        })
    }
}

fn parse_run(index: usize, node: Node) -> Result<Run, FeedError> {
    let context = format!("run {}", index);

    let distance_km = required_distance(node, &context)?;
    let duration_ms: u64 = required(node, "duration", &context)?;

    let start_text = field_text(node, "startTime");
    let start_time =
        parse_feed_timestamp(&start_text).map_err(|_| FeedError::InvalidTimestamp {
            index,
            value: start_text.clone(),
        })?;

    Ok(
        Run::new(km_to_miles(distance_km), ms_to_seconds(duration_ms), start_time).with_conditions(
            optional_code(node, "howFelt", index),
            optional_code(node, "weather", index),
            optional_code(node, "terrain", index),
        ),
    )
}

/// First element named `name` anywhere in the document.
fn find_section<'a, 'input>(
    doc: &'a Document<'input>,
    name: &'static str,
) -> Result<Node<'a, 'input>, FeedError> {
    doc.descendants()
        .find(|n| n.has_tag_name(name))
        .ok_or(FeedError::MissingSection(name))
}

/// Concatenated, trimmed text of an element's direct text children.
pub fn element_text(node: Node) -> String {
    node.children()
        .filter(Node::is_text)
        .filter_map(|child| child.text())
        .map(str::trim)
        .collect()
}

/// Text of every element named `name` below `parent`, concatenated.
///
/// Returns an empty string when there is no such element or it has no text.
pub fn field_text(parent: Node, name: &str) -> String {
    parent
        .descendants()
        .skip(1)
        .filter(|n| n.has_tag_name(name))
        .map(element_text)
        .collect()
}

fn required<T: FromStr>(parent: Node, field: &'static str, context: &str) -> Result<T, FeedError> {
    let text = field_text(parent, field);
    text.parse().map_err(|_| FeedError::InvalidField {
        context: context.to_string(),
        field,
        value: text,
    })
}

fn required_distance(parent: Node, context: &str) -> Result<f64, FeedError> {
    let km: f64 = required(parent, "distance", context)?;
    if km.is_finite() {
        Ok(km)
    } else {
        Err(FeedError::InvalidField {
            context: context.to_string(),
            field: "distance",
            value: field_text(parent, "distance"),
        })
    }
}

/// An optional condition code: empty means unset, and so does anything
/// that isn't a small integer (with a warning).
fn optional_code(parent: Node, field: &'static str, index: usize) -> Option<u8> {
    let text = field_text(parent, field);
    if text.is_empty() {
        return None;
    }

    match text.parse() {
        Ok(code) => Some(code),
        Err(_) => {
            tracing::warn!(run = index, field, value = %text, "Ignoring invalid condition code");
            None
        }
    }
}

/// Errors from parsing a feed document. All are fatal for that document.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("Feed is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("Malformed feed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Feed has no <{0}> section (format changed or error payload?)")]
    MissingSection(&'static str),

    #[error("Invalid {field} in {context}: '{value}'")]
    InvalidField {
        context: String,
        field: &'static str,
        value: String,
    },

    #[error("Invalid startTime in run {index}: '{value}'")]
    InvalidTimestamp { index: usize, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HowFelt, Terrain, Weather};
    use chrono::NaiveDate;

    fn run_xml(start: &str, km: &str, ms: &str, extra: &str) -> String {
        format!(
            "<run><startTime>{}</startTime><distance>{}</distance>\
             <duration>{}</duration>{}</run>",
            start, km, ms, extra
        )
    }

    fn feed_xml(runs: &[String], total_runs: usize) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <plusService><status>success</status><runList>{}</runList>\
             <runListSummary><runs>{}</runs><distance>16.09</distance>\
             <duration>5445000</duration></runListSummary></plusService>",
            runs.concat(),
            total_runs
        )
    }

    #[test]
    fn test_parse_single_run() {
        let xml = feed_xml(
            &[run_xml(
                "2011-05-13T07:42:10-07:00",
                "3.218",
                "7200000",
                "<howFelt>1</howFelt><weather>3</weather><terrain>4</terrain>",
            )],
            1,
        );

        let history = FeedParser::default().parse(&xml).expect("should parse");
        assert_eq!(history.runs().len(), 1);

        let run = &history.runs()[0];
        assert!((run.distance() - 2.0).abs() < 1e-9);
        assert_eq!(run.duration_seconds(), 7200);
        assert!((run.pace().unwrap() - 3600.0).abs() < 1e-6);
        assert_eq!(
            run.start_time(),
            NaiveDate::from_ymd_opt(2011, 5, 13)
                .unwrap()
                .and_hms_opt(7, 42, 10)
                .unwrap()
        );
        assert_eq!(run.how_felt(), Some(HowFelt::Awesome));
        assert_eq!(run.weather(), Some(Weather::Cloudy));
        assert_eq!(run.terrain(), Some(Terrain::Track));
    }

    #[test]
    fn test_parse_summary() {
        let xml = feed_xml(&[], 0);
        let history = FeedParser::new(0, DurationMode::Legacy).parse(&xml).unwrap();
        let summary = history.summary();

        assert_eq!(summary.total_runs, 0);
        assert!((summary.total_distance_miles - 10.0).abs() < 1e-9);
        assert_eq!(summary.total_duration_seconds, 5445);
        // Legacy split: 5445 % 30
        assert_eq!(summary.total_duration.to_string(), "1:30:15");

        let history = FeedParser::new(0, DurationMode::Standard)
            .parse(&xml)
            .unwrap();
        assert_eq!(history.summary().total_duration.to_string(), "1:30:45");
    }

    #[test]
    fn test_unit_conversion_one_mile() {
        let xml = feed_xml(
            &[run_xml("2011-05-13T07:42:10-07:00", "1.609", "425000", "")],
            1,
        );
        let history = FeedParser::default().parse(&xml).unwrap();
        let run = &history.runs()[0];

        assert!((run.distance() - 1.0).abs() < 1e-9);
        assert_eq!(run.pace_string().as_deref(), Some("7'05\"/mile"));
    }

    #[test]
    fn test_missing_optional_codes_are_unset() {
        let xml = feed_xml(
            &[run_xml(
                "2011-05-13T07:42:10-07:00",
                "5",
                "1500000",
                "<howFelt></howFelt><weather/><terrain>0</terrain>",
            )],
            1,
        );
        let history = FeedParser::default().parse(&xml).unwrap();
        let run = &history.runs()[0];

        assert_eq!(run.how_felt_code(), None);
        assert_eq!(run.weather_code(), None);
        assert_eq!(run.terrain_code(), Some(0));
    }

    #[test]
    fn test_invalid_optional_code_degrades_to_unset() {
        let xml = feed_xml(
            &[run_xml(
                "2011-05-13T07:42:10-07:00",
                "5",
                "1500000",
                "<howFelt>great</howFelt>",
            )],
            1,
        );
        let history = FeedParser::default().parse(&xml).unwrap();
        assert_eq!(history.runs()[0].how_felt_code(), None);
    }

    #[test]
    fn test_runs_keep_document_order_and_offset() {
        let runs: Vec<String> = (0..60)
            .map(|i| {
                run_xml(
                    &format!("2011-05-{:02}T07:00:00-07:00", 1 + i % 28),
                    &format!("{}", 1 + i),
                    "1800000",
                    "",
                )
            })
            .collect();
        let xml = feed_xml(&runs, 60);

        let all = FeedParser::new(0, DurationMode::Legacy).parse(&xml).unwrap();
        assert_eq!(all.runs().len() as u64, all.summary().total_runs);

        let history = FeedParser::new(49, DurationMode::Legacy).parse(&xml).unwrap();
        assert_eq!(history.parsed_run_count(), 60);
        assert_eq!(history.runs().len(), 11);
        for (i, run) in history.runs().iter().enumerate() {
            let expected_miles = km_to_miles((50 + i) as f64);
            assert!((run.distance() - expected_miles).abs() < 1e-9);
        }
    }

    #[test]
    fn test_missing_summary_section() {
        let xml = "<plusService><runList></runList></plusService>";
        let err = FeedParser::default().parse(xml).unwrap_err();
        assert!(matches!(err, FeedError::MissingSection("runListSummary")));
    }

    #[test]
    fn test_missing_run_list_section() {
        let xml = "<plusService><runListSummary><runs>0</runs><distance>0</distance>\
                   <duration>0</duration></runListSummary></plusService>";
        let err = FeedParser::default().parse(xml).unwrap_err();
        assert!(matches!(err, FeedError::MissingSection("runList")));
    }

    #[test]
    fn test_error_payload_is_missing_section() {
        let xml = "<plusService><status>failure</status>\
                   <serviceErrors><error code=\"1\">Invalid user</error></serviceErrors>\
                   </plusService>";
        let err = FeedParser::default().parse(xml).unwrap_err();
        assert!(matches!(err, FeedError::MissingSection(_)));
    }

    #[test]
    fn test_non_numeric_required_field() {
        let xml = feed_xml(
            &[run_xml("2011-05-13T07:42:10-07:00", "far", "1500000", "")],
            1,
        );
        let err = FeedParser::default().parse(&xml).unwrap_err();
        match err {
            FeedError::InvalidField {
                context,
                field,
                value,
            } => {
                assert_eq!(context, "run 0");
                assert_eq!(field, "distance");
                assert_eq!(value, "far");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_required_field_is_not_zero() {
        let xml = feed_xml(
            &["<run><startTime>2011-05-13T07:42:10-07:00</startTime>\
               <distance>5</distance></run>"
                .to_string()],
            1,
        );
        let err = FeedParser::default().parse(&xml).unwrap_err();
        assert!(matches!(
            err,
            FeedError::InvalidField {
                field: "duration",
                ..
            }
        ));
    }

    #[test]
    fn test_non_finite_distance_rejected() {
        let xml = feed_xml(
            &[run_xml("2011-05-13T07:42:10-07:00", "NaN", "1500000", "")],
            1,
        );
        let err = FeedParser::default().parse(&xml).unwrap_err();
        assert!(matches!(err, FeedError::InvalidField { field: "distance", .. }));
    }

    #[test]
    fn test_bad_timestamp() {
        let xml = feed_xml(&[run_xml("last tuesday", "5", "1500000", "")], 1);
        let err = FeedParser::default().parse(&xml).unwrap_err();
        assert!(matches!(err, FeedError::InvalidTimestamp { index: 0, .. }));
    }

    #[test]
    fn test_malformed_xml() {
        let err = FeedParser::default()
            .parse("<plusService><runList>")
            .unwrap_err();
        assert!(matches!(err, FeedError::Xml(_)));
    }

    #[test]
    fn test_invalid_utf8() {
        let err = FeedParser::default()
            .parse_bytes(&[0x3c, 0xff, 0xfe])
            .unwrap_err();
        assert!(matches!(err, FeedError::Encoding(_)));
    }

    #[test]
    fn test_element_text_trims_and_concatenates() {
        let doc = Document::parse("<a>  12 <b>ignored</b> 34 </a>").unwrap();
        assert_eq!(element_text(doc.root_element()), "1234");

        let doc = Document::parse("<a><b/></a>").unwrap();
        assert_eq!(field_text(doc.root_element(), "b"), "");
        assert_eq!(field_text(doc.root_element(), "missing"), "");
    }
}
