//! Topic color assignment

use std::collections::HashMap;

use itertools::Itertools;

use crate::data::PublicationRecord;

/// Neutral color for records with no topics (and unknown topics)
pub const FALLBACK_COLOR: &str = "#CCCCCC";

/// Source of topic colors: a linearly interpolated gradient or a fixed
/// palette that cycles when there are more topics than entries.
#[derive(Debug, Clone)]
pub enum ColorScheme {
    /// Two or more hex stops, interpolated piecewise-linearly in RGB
    Gradient(Vec<String>),

    /// Fixed palette; topic i gets entry i mod len
    Palette(Vec<String>),
}

impl Default for ColorScheme {
    fn default() -> Self {
        ColorScheme::Gradient(vec!["#0000FF".to_string(), "#800080".to_string()])
    }
}

/// Mapping from topic label to color, derived once per pass
#[derive(Debug, Clone)]
pub struct ColorAssignment {
    /// Distinct topics in assignment order
    pub topics: Vec<String>,

    /// topic -> hex color
    colors: HashMap<String, String>,
}

impl ColorAssignment {
    /// Color for a single topic; fallback for unknown topics
    pub fn color_of_topic(&self, topic: &str) -> &str {
        self.colors
            .get(topic)
            .map(String::as_str)
            .unwrap_or(FALLBACK_COLOR)
    }

    /// Representative color for a record: the color of its first topic,
    /// or the neutral fallback when it has none.
    pub fn color_of_record(&self, record: &PublicationRecord) -> &str {
        match record.topics.first() {
            Some(topic) => self.color_of_topic(topic),
            None => FALLBACK_COLOR,
        }
    }
}

/// Derive the per-topic color mapping for one pass.
///
/// Distinct topics are collected across all records in first-seen order
/// (duplicates within a record count once), optionally sorted lexically.
/// The i-th of N topics sits at position `i / max(N - 1, 1)` along a
/// gradient, or takes palette entry `i % len`.
pub fn assign_colors(
    records: &[PublicationRecord],
    scheme: &ColorScheme,
    sort_topics: bool,
) -> ColorAssignment {
    let mut topics: Vec<String> = records
        .iter()
        .flat_map(|record| record.topics.iter())
        .unique()
        .cloned()
        .collect();

    if sort_topics {
        topics.sort();
    }

    let count = topics.len();
    let colors = topics
        .iter()
        .enumerate()
        .map(|(i, topic)| {
            let color = match scheme {
                ColorScheme::Gradient(stops) => {
                    let position = i as f64 / std::cmp::max(count - 1, 1) as f64;
                    sample_gradient(stops, position)
                }
                ColorScheme::Palette(entries) if !entries.is_empty() => {
                    entries[i % entries.len()].clone()
                }
                ColorScheme::Palette(_) => FALLBACK_COLOR.to_string(),
            };
            (topic.clone(), color)
        })
        .collect();

    ColorAssignment { topics, colors }
}

/// Sample a multi-stop gradient at `position` in [0, 1]
fn sample_gradient(stops: &[String], position: f64) -> String {
    if stops.is_empty() {
        return FALLBACK_COLOR.to_string();
    }
    if stops.len() == 1 {
        return stops[0].clone();
    }

    let position = position.clamp(0.0, 1.0);
    let scaled = position * (stops.len() - 1) as f64;
    let segment = (scaled.floor() as usize).min(stops.len() - 2);
    let fraction = scaled - segment as f64;

    let from = parse_hex(&stops[segment]).unwrap_or(NEUTRAL_RGB);
    let to = parse_hex(&stops[segment + 1]).unwrap_or(NEUTRAL_RGB);

    format_hex(lerp_rgb(from, to, fraction))
}

const NEUTRAL_RGB: (u8, u8, u8) = (0xCC, 0xCC, 0xCC);

fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let digits = color.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}

fn lerp_rgb(from: (u8, u8, u8), to: (u8, u8, u8), fraction: f64) -> (u8, u8, u8) {
    let channel = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * fraction).round() as u8;
    (
        channel(from.0, to.0),
        channel(from.1, to.1),
        channel(from.2, to.2),
    )
}

fn format_hex((r, g, b): (u8, u8, u8)) -> String {
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}
