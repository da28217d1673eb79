//! Error types produced while validating configurations, deriving geometry and
//! writing decks.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::Surface;

/// Error returned when a configuration is out of range or physically invalid.
///
/// Every variant is detected before the affected formula is evaluated, so a run
/// that fails here never produces any output.
///
/// # Examples
///
/// ```
/// use vlmdeck::{AircraftConfig, ConfigError, RawAircraftConfig, Surface};
///
/// let mut raw = RawAircraftConfig::reference_transport();
/// raw.wing.aspect_ratio = 0.0;
/// let error = AircraftConfig::new(raw).expect_err("zero aspect ratio is rejected");
/// assert_eq!(
///     error,
///     ConfigError::NonPositiveAspectRatio { surface: Surface::Wing, aspect_ratio: 0.0 }
/// );
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Returned when a numeric input is NaN or infinite.
    #[error("{field} must be finite (received {value})")]
    NotFinite {
        /// Name of the offending field.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Returned when a reference area is zero or negative.
    #[error("{surface} reference area must be positive (received {area})")]
    NonPositiveArea {
        /// Surface carrying the area.
        surface: Surface,
        /// Rejected area in square feet.
        area: f64,
    },
    /// Returned when an aspect ratio is zero or negative.
    #[error("{surface} aspect ratio must be positive (received {aspect_ratio})")]
    NonPositiveAspectRatio {
        /// Surface carrying the aspect ratio.
        surface: Surface,
        /// Rejected aspect ratio.
        aspect_ratio: f64,
    },
    /// Returned when a taper ratio lies outside `(0, 1]`.
    #[error("{surface} taper ratio must lie in (0, 1] (received {taper})")]
    TaperOutOfRange {
        /// Surface carrying the taper ratio.
        surface: Surface,
        /// Rejected taper ratio.
        taper: f64,
    },
    /// Returned when an angle would put a tangent at or beyond its pole.
    #[error("{surface} {field} must lie strictly between -90 and 90 degrees (received {degrees})")]
    AngleOutOfRange {
        /// Surface carrying the angle.
        surface: Surface,
        /// Name of the angle.
        field: &'static str,
        /// Rejected angle in degrees.
        degrees: f64,
    },
    /// Returned when a station span fraction lies outside `[0, 1]`.
    #[error("{surface} station {station} span fraction must lie in [0, 1] (received {fraction})")]
    SpanFractionOutOfRange {
        /// Surface carrying the station.
        surface: Surface,
        /// One-based station number.
        station: usize,
        /// Rejected fraction of the half span.
        fraction: f64,
    },
    /// Returned when station span fractions decrease towards the tip.
    #[error(
        "{surface} station {station} span fraction {fraction} is inboard of station {} ({previous})",
        .station - 1
    )]
    NonMonotonicStations {
        /// Surface carrying the station.
        surface: Surface,
        /// One-based station number.
        station: usize,
        /// Fraction of the preceding station.
        previous: f64,
        /// Rejected fraction.
        fraction: f64,
    },
    /// Returned when a chord-override ratio is zero or negative.
    #[error("{surface} station {station} chord ratio must be positive (received {ratio})")]
    NonPositiveChordRatio {
        /// Surface carrying the station.
        surface: Surface,
        /// One-based station number.
        station: usize,
        /// Rejected ratio.
        ratio: f64,
    },
    /// Returned when a fuselage dimension is not physically meaningful.
    #[error("fuselage {field} is invalid (received {value})")]
    InvalidFuselage {
        /// Name of the dimension.
        field: &'static str,
        /// Rejected value in inches.
        value: f64,
    },
    /// Returned when a feature is requested on a topology that cannot carry it.
    #[error("{feature} is not available on the {topology} topology")]
    UnsupportedForTopology {
        /// Requested feature.
        feature: &'static str,
        /// Topology name.
        topology: &'static str,
    },
    /// Returned when the elevon station range is empty or out of bounds.
    #[error("elevon stations must satisfy 1 <= inboard < outboard <= 6 (received {inboard}..{outboard})")]
    InvalidControlStations {
        /// One-based inboard station.
        inboard: usize,
        /// One-based outboard station.
        outboard: usize,
    },
    /// Returned when the elevon chord-break fraction lies outside `(0, 1)`.
    #[error("elevon chord break fraction must lie in (0, 1) (received {fraction})")]
    InvalidChordBreak {
        /// Rejected fraction of the inboard station chord.
        fraction: f64,
    },
    /// Returned when the propagated hinge line leaves the local chord.
    #[error("elevon hinge line falls outside the chord at station {station} (main chord {main_chord:.3} of {chord:.3})")]
    HingeOutsideChord {
        /// One-based station number.
        station: usize,
        /// Main-surface chord ahead of the hinge.
        main_chord: f64,
        /// Full local chord.
        chord: f64,
    },
    /// Returned when a Mach or angle-of-attack list is empty.
    #[error("at least one {0} is required")]
    EmptyConditionList(&'static str),
}

/// Error returned when a derived quantity cannot be evaluated.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GeometryError {
    /// Returned when a formula produced NaN or infinity.
    #[error("{surface} {quantity} evaluated to a non-finite value ({value})")]
    NonFinite {
        /// Surface whose geometry was being derived.
        surface: Surface,
        /// Name of the derived quantity.
        quantity: &'static str,
        /// Offending value.
        value: f64,
    },
}

/// Error returned when building a [`Deck`](crate::Deck) fails.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DeckError {
    /// Returned when the configuration is rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Returned when a derived quantity is not finite.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Error returned when a configuration file cannot be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Returned when the file cannot be read.
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Returned when JSON parsing fails.
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Returned when YAML parsing fails.
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Returned when the parsed configuration fails validation.
    #[error("invalid aircraft configuration: {0}")]
    Invalid(#[from] ConfigError),
}

/// Error returned when the destination for a deck cannot be resolved or written.
#[derive(Debug, Error)]
pub enum DestinationError {
    /// Returned when the configured directory is blank.
    #[error("destination directory is empty")]
    EmptyPath,
    /// Returned when a side file holds no directory line.
    #[error("side file {} does not name a directory", .0.display())]
    EmptySideFile(PathBuf),
    /// Returned when reading, writing or persisting fails.
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}
