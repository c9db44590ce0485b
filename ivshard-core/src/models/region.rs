use std::fmt::{self, Display};
use std::str::FromStr;

use crate::errors::RegionError;
use crate::models::span::Span;

///
/// Region struct, representation of one record in a BED-like file
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct Region {
    pub chr: String,
    pub start: u32,
    pub end: u32,

    pub rest: Option<String>,
}

impl Region {
    ///
    /// Parse one tab separated line: `chr start end [rest...]`. Everything past the
    /// third column is kept verbatim in `rest`.
    ///
    pub fn from_bed_line(line: &str) -> Result<Self, RegionError> {
        let mut fields = line.splitn(4, '\t');

        let chr = fields
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| RegionError::MissingField("chromosome", line.to_string()))?;
        let start = fields
            .next()
            .ok_or_else(|| RegionError::MissingField("start", line.to_string()))?;
        let end = fields
            .next()
            .ok_or_else(|| RegionError::MissingField("end", line.to_string()))?;

        let start = parse_coordinate(start)?;
        let end = parse_coordinate(end)?;
        if end < start {
            return Err(RegionError::InvertedBounds(
                start.to_string(),
                end.to_string(),
            ));
        }

        let rest = fields
            .next()
            .map(|s| s.trim_end_matches(['\r', '\n']).to_string())
            .filter(|s| !s.is_empty());

        Ok(Region {
            chr: chr.to_string(),
            start,
            end,
            rest,
        })
    }

    ///
    /// Get width of the region
    ///
    pub fn width(&self) -> u32 {
        self.end - self.start
    }

    /// The region's coordinates as an index key.
    pub fn span(&self) -> Span<u32> {
        Span {
            start: self.start,
            end: self.end,
        }
    }

    ///
    /// Get file string of Region
    ///
    pub fn as_string(&self) -> String {
        format!(
            "{}\t{}\t{}{}",
            self.chr,
            self.start,
            self.end,
            self.rest
                .as_deref()
                .map_or(String::new(), |s| format!("\t{}", s)),
        )
    }
}

fn parse_coordinate(s: &str) -> Result<u32, RegionError> {
    let s = s.trim();
    s.parse::<u32>()
        .map_err(|_| RegionError::InvalidCoordinate(s.to_string()))
}

/// Parses region strings of the form `chr:start-end`.
impl FromStr for Region {
    type Err = RegionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (chr, coords) = s
            .rsplit_once(':')
            .ok_or_else(|| RegionError::RegionParseError(s.to_string()))?;
        let (start, end) = coords
            .split_once('-')
            .ok_or_else(|| RegionError::RegionParseError(s.to_string()))?;

        if chr.is_empty() {
            return Err(RegionError::RegionParseError(s.to_string()));
        }

        let start = parse_coordinate(start)?;
        let end = parse_coordinate(end)?;
        if end < start {
            return Err(RegionError::InvertedBounds(
                start.to_string(),
                end.to_string(),
            ));
        }

        Ok(Region {
            chr: chr.to_string(),
            start,
            end,
            rest: None,
        })
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}
