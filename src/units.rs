//! Measurement scale selection
//!
//! Maps the `preferred_scale` config token to the unit strings used in the
//! forecast request and in output labeling.

/// The set of unit tokens sent to the forecast provider and echoed in exports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitScale {
    /// Temperature unit ("celsius" or "fahrenheit")
    pub temperature: &'static str,
    /// Wind speed unit ("kmh" or "mph")
    pub wind_speed: &'static str,
    /// Precipitation unit ("mm" or "inch")
    pub precipitation: &'static str,
    /// Distance unit ("km" or "miles"), used for labeling only
    pub distance: &'static str,
}

impl UnitScale {
    /// The imperial configuration (fahrenheit/mph/inch/miles)
    pub const fn imperial() -> Self {
        Self {
            temperature: "fahrenheit",
            wind_speed: "mph",
            precipitation: "inch",
            distance: "miles",
        }
    }

    /// The metric configuration (celsius/kmh/mm/km)
    pub const fn metric() -> Self {
        Self {
            temperature: "celsius",
            wind_speed: "kmh",
            precipitation: "mm",
            distance: "km",
        }
    }

    /// Resolves a preference token to a scale.
    ///
    /// Only the exact token `"imperial"` selects imperial units. Every other
    /// input, including the empty string and unrecognized tokens, silently
    /// resolves to metric; no error is raised for invalid input.
    pub fn from_preference(token: &str) -> Self {
        match token {
            "imperial" => Self::imperial(),
            _ => Self::metric(),
        }
    }
}

impl Default for UnitScale {
    fn default() -> Self {
        Self::metric()
    }
}
