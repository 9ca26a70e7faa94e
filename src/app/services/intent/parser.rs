//! Regex rule pipeline over a lowercased message

use super::regions;
use crate::app::models::FilterSpec;
use crate::{Error, Result};
use regex::Regex;

const MONTH_NAMES: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Parses free-text questions into query filters
///
/// Compile the parser once and reuse it; every regex is built up front.
pub struct IntentParser {
    lat_band: Regex,
    lon_band: Regex,
    depth_range: Regex,
    temp_range: Regex,
    sal_range: Regex,
    month: Regex,
    year: Regex,
}

impl IntentParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            lat_band: compile(r"lat\s*(-?\d{1,2})\s*(?:to|-)\s*(-?\d{1,2})")?,
            lon_band: compile(r"lon\s*(-?\d{1,3})\s*(?:to|-)\s*(-?\d{1,3})")?,
            depth_range: compile(r"depth\s*(\d+)\s*(?:to|-|below|above)\s*(\d+)")?,
            temp_range: compile(r"temp\s*(-?\d+(?:\.\d+)?)\s*(?:to|-)\s*(-?\d+(?:\.\d+)?)")?,
            sal_range: compile(r"sal\s*(\d+(?:\.\d+)?)\s*(?:to|-)\s*(\d+(?:\.\d+)?)")?,
            month: compile(r"(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)\w*\s*(\d{4})?")?,
            year: compile(r"\b(20\d{2})\b")?,
        })
    }

    /// Extract a filter from a free-text message
    ///
    /// Rules run in a fixed order: region keywords, latitude bands,
    /// explicit coordinate/measurement ranges, then month and year.
    /// Explicit ranges overwrite anything a keyword implied. A message
    /// with nothing recognisable yields an empty filter.
    pub fn parse(&self, message: &str) -> FilterSpec {
        let m = message.to_lowercase();
        let mut filter = FilterSpec::default();

        regions::apply_regions(&m, &mut filter);
        regions::apply_latitude_bands(&m, &mut filter);

        if let Some((a, b)) = self.capture_pair(&self.lat_band, &m) {
            filter.lat_min = Some(a.min(b));
            filter.lat_max = Some(a.max(b));
        }
        if let Some((a, b)) = self.capture_pair(&self.lon_band, &m) {
            filter.lon_min = Some(a.min(b));
            filter.lon_max = Some(a.max(b));
        }

        if let Some((a, b)) = self.capture_pair(&self.depth_range, &m) {
            filter.depth_min = Some(a.min(b));
            filter.depth_max = Some(a.max(b));
        } else if m.contains("deep") || m.contains("below") {
            filter.depth_min = Some(1000.0);
        } else if m.contains("surface") || m.contains("mixed layer") {
            filter.depth_max = Some(100.0);
        }

        if let Some((a, b)) = self.capture_pair(&self.temp_range, &m) {
            filter.temp_min = Some(a.min(b));
            filter.temp_max = Some(a.max(b));
        }
        if let Some((a, b)) = self.capture_pair(&self.sal_range, &m) {
            filter.salinity_min = Some(a.min(b));
            filter.salinity_max = Some(a.max(b));
        }

        if let Some(caps) = self.month.captures(&m) {
            if let Some(name) = caps.get(1) {
                filter.month = month_number(name.as_str());
            }
            if let Some(year) = caps.get(2) {
                filter.year = year.as_str().parse().ok();
            }
        }
        if filter.year.is_none() {
            if let Some(caps) = self.year.captures(&m) {
                filter.year = caps.get(1).and_then(|y| y.as_str().parse().ok());
            }
        }

        filter
    }

    fn capture_pair(&self, regex: &Regex, message: &str) -> Option<(f64, f64)> {
        let caps = regex.captures(message)?;
        let a = caps.get(1)?.as_str().parse().ok()?;
        let b = caps.get(2)?.as_str().parse().ok()?;
        Some((a, b))
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| Error::configuration(format!("Invalid intent pattern '{}': {}", pattern, e)))
}

fn month_number(name: &str) -> Option<i32> {
    MONTH_NAMES
        .iter()
        .position(|&m| m == name)
        .map(|i| i as i32 + 1)
}
