//! TLE catalog parsing
//!
//! A catalog is plain text made of 3-line records: a name line followed by the
//! two standard 69-column element lines. The parser only checks structure;
//! element lines are handed to the propagator untouched.

use serde::Serialize;

use crate::error::CatalogError;

/// One name/line1/line2 triple as it appeared in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TleRecord {
    pub name: String,
    pub line1: String,
    pub line2: String,
}

/// Split catalog text into records.
///
/// Lines may end in `\n` or `\r\n`. A single trailing blank line (the text ends
/// with a newline) is dropped before counting; the remaining line count must be
/// a multiple of 3.
pub fn parse_catalog(raw_text: &str) -> Result<Vec<TleRecord>, CatalogError> {
    let mut lines: Vec<&str> = raw_text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    if lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    if lines.len() % 3 != 0 {
        return Err(CatalogError::MalformedCatalog {
            line_count: lines.len(),
        });
    }

    let records: Vec<TleRecord> = lines
        .chunks_exact(3)
        .map(|chunk| TleRecord {
            name: chunk[0].trim_end().to_string(),
            line1: chunk[1].to_string(),
            line2: chunk[2].to_string(),
        })
        .collect();

    log::debug!("Parsed {} TLE records", records.len());
    Ok(records)
}

/// Classical elements read from the fixed TLE columns
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitalElements {
    /// Two-digit epoch year as written in line 1
    pub epoch_year: u32,
    /// Fractional day of year of the epoch
    pub epoch_day: f64,
    /// Radians
    pub inclination: f64,
    /// Right ascension of the ascending node (radians)
    pub raan: f64,
    pub eccentricity: f64,
    /// Radians
    pub arg_perigee: f64,
    /// Radians
    pub mean_anomaly: f64,
    /// Revolutions per day
    pub mean_motion: f64,
}

impl OrbitalElements {
    /// Extract elements from a record's element lines
    pub fn from_record(record: &TleRecord) -> Result<Self, CatalogError> {
        let line1 = record.line1.as_str();
        let line2 = record.line2.as_str();

        let epoch_year = field(line1, 18, 20, "epoch year")?
            .parse::<u32>()
            .map_err(|_| CatalogError::invalid_orbit("unreadable epoch year"))?;
        let epoch_day = number(line1, 20, 32, "epoch day")?;

        let inclination = number(line2, 8, 16, "inclination")?.to_radians();
        let raan = number(line2, 17, 25, "right ascension")?.to_radians();
        // Decimal point is implied
        let eccentricity = number_with_prefix(line2, 26, 33, "0.", "eccentricity")?;
        let arg_perigee = number(line2, 34, 42, "argument of perigee")?.to_radians();
        let mean_anomaly = number(line2, 43, 51, "mean anomaly")?.to_radians();
        let mean_motion = number(line2, 52, 63, "mean motion")?;

        Ok(Self {
            epoch_year,
            epoch_day,
            inclination,
            raan,
            eccentricity,
            arg_perigee,
            mean_anomaly,
            mean_motion,
        })
    }

    /// Four-digit epoch year using the usual 57 pivot
    pub fn epoch_full_year(&self) -> u32 {
        if self.epoch_year < 57 {
            2000 + self.epoch_year
        } else {
            1900 + self.epoch_year
        }
    }
}

fn field<'a>(line: &'a str, start: usize, end: usize, name: &str) -> Result<&'a str, CatalogError> {
    line.get(start..end)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CatalogError::invalid_orbit(format!("missing {}", name)))
}

fn number(line: &str, start: usize, end: usize, name: &str) -> Result<f64, CatalogError> {
    field(line, start, end, name)?
        .parse::<f64>()
        .map_err(|_| CatalogError::invalid_orbit(format!("unreadable {}", name)))
}

fn number_with_prefix(
    line: &str,
    start: usize,
    end: usize,
    prefix: &str,
    name: &str,
) -> Result<f64, CatalogError> {
    let digits = field(line, start, end, name)?;
    format!("{}{}", prefix, digits)
        .parse::<f64>()
        .map_err(|_| CatalogError::invalid_orbit(format!("unreadable {}", name)))
}
