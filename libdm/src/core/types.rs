//! common types for delta modulation

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::{DmError, DmResult};

// constants

/// seed of both the encoder reference and the decoder reconstruction
pub const INITIAL_REFERENCE: f64 = 0.0;

/// butterworth order used when the caller does not pick one
pub const DEFAULT_FILTER_ORDER: usize = 4;

/// smoothing cutoff used by [`crate::Pipeline`] when none is set
pub const DEFAULT_CUTOFF_HZ: f64 = 10.0;

// types

/// one delta modulation symbol
///
/// | Value | Symbol | Reference update   |
/// |-------|--------|--------------------|
/// | 0     | Down   | `reference -= step`|
/// | 1     | Up     | `reference += step`|
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Bit {
    Down = 0,
    Up = 1,
}

impl Bit {
    /// +1.0 for up, -1.0 for down
    #[inline]
    pub fn direction(self) -> f64 {
        match self {
            Bit::Up => 1.0,
            Bit::Down => -1.0,
        }
    }

    /// '1' or '0'
    #[inline]
    pub fn as_char(self) -> char {
        match self {
            Bit::Up => '1',
            Bit::Down => '0',
        }
    }
}

impl From<bool> for Bit {
    fn from(up: bool) -> Self {
        if up {
            Bit::Up
        } else {
            Bit::Down
        }
    }
}

impl From<Bit> for bool {
    fn from(bit: Bit) -> Self {
        bit == Bit::Up
    }
}

impl From<Bit> for u8 {
    fn from(bit: Bit) -> Self {
        bit as u8
    }
}

impl TryFrom<u8> for Bit {
    type Error = DmError;

    fn try_from(v: u8) -> DmResult<Self> {
        match v {
            0 => Ok(Bit::Down),
            1 => Ok(Bit::Up),
            other => Err(DmError::InvalidBitValue(other)),
        }
    }
}

impl Serialize for Bit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

impl<'de> Deserialize<'de> for Bit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = u8::deserialize(deserializer)?;
        Bit::try_from(v).map_err(serde::de::Error::custom)
    }
}

/// parse a `0`/`1` text bitstream, ignoring ascii whitespace
pub fn parse_bits(text: &str) -> DmResult<Vec<Bit>> {
    text.chars()
        .filter(|c| !c.is_ascii_whitespace())
        .enumerate()
        .map(|(position, c)| match c {
            '0' => Ok(Bit::Down),
            '1' => Ok(Bit::Up),
            symbol => Err(DmError::InvalidSymbol { symbol, position }),
        })
        .collect()
}

/// render a bitstream as a `0`/`1` string
pub fn format_bits(bits: &[Bit]) -> String {
    bits.iter().map(|b| b.as_char()).collect()
}

/// validated step size, shared by encoder and decoder
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct StepSize(f64);

impl StepSize {
    /// step must be finite and strictly positive
    pub fn new(value: f64) -> DmResult<Self> {
        if value.is_finite() && value > 0.0 {
            Ok(StepSize(value))
        } else {
            Err(DmError::InvalidParameter {
                name: "step_size",
                value,
            })
        }
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

/// encoder output: the channel bits plus the encoder's own staircase
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Modulated {
    /// one symbol per input sample
    pub bits: Vec<Bit>,
    /// reference after each update, seed excluded
    pub reference: Vec<f64>,
}

impl Modulated {
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }
}
