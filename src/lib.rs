#![warn(clippy::all)]
#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod config;
pub mod deck;
pub mod destination;
pub mod echo;
pub mod errors;
pub mod geometry;
pub mod loader;
pub mod metrics;
pub mod panels;
pub mod planform;
pub mod stations;
pub mod writer;

pub use config::{
    AircraftConfig, ControlSurfaceConfig, Deflection, FuselageConfig, HorizontalTailConfig,
    HorizontalTailMode, RawAircraftConfig, RunConditions, StationTable, Surface, Topology,
    VerticalTailConfig, VerticalTailMode, WingConfig, STATION_COUNT,
};
pub use deck::{Deck, RunControl};
pub use destination::{
    read_side_file, resolve_directory, write_deck, Destination, DECK_FILE_NAME,
};
pub use echo::{CommentField, EchoBlock, EchoLine, FieldValue};
pub use errors::{ConfigError, DeckError, DestinationError, GeometryError, LoadError};
pub use geometry::{point, Point, ResolvedPoint};
pub use metrics::{
    expected_panel_count, horizontal_tail_volume, surface_instances, vertical_tail_volume,
    DerivedMetrics, ReferenceQuantities, TailSummary,
};
pub use panels::{Discretization, ElevonSplit, Panel, SurfaceKind};
pub use planform::{Planform, PlanformInput, SpanMode};
pub use stations::{ControlStation, FinLayout};
pub use writer::render_deck;

/// Build and render the deck of a validated configuration.
///
/// The whole text is produced before anything touches a destination.
///
/// # Errors
///
/// Returns the [`DeckError`] of [`Deck::build`].
///
/// # Examples
/// ```
/// use vlmdeck::{generate, AircraftConfig, RawAircraftConfig};
///
/// let config = AircraftConfig::new(RawAircraftConfig::discoidal_demo())?;
/// let (deck, text) = generate(&config)?;
/// assert_eq!(text.matches("COMMENT:").count(), deck.panels.len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn generate(config: &AircraftConfig) -> Result<(Deck, String), DeckError> {
    let deck = Deck::build(config)?;
    let text = render_deck(&deck);
    Ok((deck, text))
}
