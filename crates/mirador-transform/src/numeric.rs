//! Numeric parsing and formatting for derived values.

use mirador_model::ViralLoadScale;

/// Formats a number with the shortest representation that round-trips,
/// so whole values carry no fractional part (`1000`, `2500`, `3.0004`).
pub fn format_numeric(value: f64) -> String {
    if value.is_finite() {
        format!("{value}")
    } else {
        String::new()
    }
}

/// Parses a finite number from a trimmed cell.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Applies the viral load scale to a raw copies/mL reading.
pub fn scale_viral_load(value: f64, scale: ViralLoadScale) -> f64 {
    match scale {
        ViralLoadScale::Linear => value,
        ViralLoadScale::Log10 => (1.0 + value).log10(),
    }
}

/// Summary of one patient's viral load series, computed on already scaled values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViralLoadStats {
    pub first: f64,
    pub max: f64,
    pub min: f64,
    pub mean: f64,
}

impl ViralLoadStats {
    /// Returns `None` for an empty series.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let (&first, rest) = values.split_first()?;
        let mut stats = Self {
            first,
            max: first,
            min: first,
            mean: first,
        };
        let mut sum = first;
        for &value in rest {
            stats.max = stats.max.max(value);
            stats.min = stats.min.min(value);
            sum += value;
        }
        stats.mean = sum / values.len() as f64;
        Some(stats)
    }
}
