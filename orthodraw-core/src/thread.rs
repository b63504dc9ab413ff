/// Parser for ISO metric thread designations such as `M10x1.25`
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alphanumeric1, char, multispace0},
    combinator::{all_consuming, opt},
    number::complete::double,
    sequence::preceded,
    IResult,
};

use crate::error::ThreadError;

/// Root depth factor used for drafting: minor = nominal - 1.22 * pitch
pub const MINOR_DIAMETER_FACTOR: f64 = 1.22;

/// A parsed metric thread designation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreadDesignation {
    pub nominal: f64,
    pub pitch: Option<f64>,
}

impl ThreadDesignation {
    /// Parse `M<nominal>[x<pitch>][-<class>]`
    pub fn parse(input: &str) -> Result<Self, ThreadError> {
        match all_consuming(designation)(input) {
            Ok((_, parsed)) if parsed.is_valid() => Ok(parsed),
            _ => Err(ThreadError::Unrecognized(input.to_string())),
        }
    }

    /// Drafting minor diameter, when the pitch is known
    pub fn minor_diameter(&self) -> Option<f64> {
        self.pitch
            .map(|pitch| self.nominal - MINOR_DIAMETER_FACTOR * pitch)
    }

    fn is_valid(&self) -> bool {
        let pitch_ok = self.pitch.map_or(true, |p| p.is_finite() && p > 0.0);
        self.nominal.is_finite() && self.nominal > 0.0 && pitch_ok
    }
}

/// Minor diameter for a thread label, failing when it cannot be derived
pub fn derive_minor_diameter(label: &str) -> Result<f64, ThreadError> {
    ThreadDesignation::parse(label)?
        .minor_diameter()
        .ok_or_else(|| ThreadError::MissingPitch(label.to_string()))
}

fn designation(input: &str) -> IResult<&str, ThreadDesignation> {
    let (input, _) = preceded(multispace0, alt((char('M'), char('m'))))(input)?;
    let (input, nominal) = double(input)?;
    let (input, pitch) = opt(preceded(alt((tag("x"), tag("X"), tag("×"))), double))(input)?;
    // Tolerance class (e.g. "-6g") does not affect the drawing.
    let (input, _) = opt(preceded(char('-'), alphanumeric1))(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, ThreadDesignation { nominal, pitch }))
}
