//! Whole-aircraft reference quantities and tail sizing metrics.

use serde::Serialize;
use tracing::warn;

use crate::config::{AircraftConfig, HorizontalTailMode, Surface, VerticalTailMode};
use crate::panels::{Panel, SurfaceKind};
use crate::planform::Planform;

/// Horizontal tail volume coefficient, referenced to the wing MAC.
#[must_use]
pub fn horizontal_tail_volume(wing: &Planform, tail: &Planform) -> f64 {
    (tail.mrp_x - wing.mrp_x) * tail.reference_area / (wing.mac * wing.reference_area)
}

/// Vertical tail volume coefficient, referenced to the wing span.
#[must_use]
pub fn vertical_tail_volume(wing: &Planform, tail: &Planform) -> f64 {
    (tail.mrp_x - wing.mrp_x) * tail.reference_area / (wing.span * wing.reference_area)
}

/// Reference quantities passed to the solver with the panel count.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ReferenceQuantities {
    /// Wing reference area in square inches (SREF).
    pub area: f64,
    /// Wing mean aerodynamic chord (CBAR).
    pub chord: f64,
    /// Moment reference point x (XBAR).
    pub mrp_x: f64,
    /// Moment reference point z (ZBAR).
    pub mrp_z: f64,
    /// Wing span (WSPAN).
    pub span: f64,
}

impl From<&Planform> for ReferenceQuantities {
    fn from(wing: &Planform) -> Self {
        Self {
            area: wing.reference_area,
            chord: wing.mac,
            mrp_x: wing.mrp_x,
            mrp_z: wing.mrp_z,
            span: wing.span,
        }
    }
}

/// Derived data of an active tail.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TailSummary {
    /// Trapezoidal planform of the tail.
    pub planform: Planform,
    /// Lateral MAC position for the horizontal tail, height for the fin.
    pub mac_offset: f64,
    /// Tail volume coefficient.
    pub volume_coefficient: f64,
}

impl TailSummary {
    /// Summarise a tail and flag a tail placed at or ahead of the wing MRP.
    #[must_use]
    pub fn new(surface: Surface, planform: Planform, mac_offset: f64, volume_coefficient: f64) -> Self {
        if volume_coefficient <= 0.0 {
            warn!(
                %surface,
                volume_coefficient,
                "tail moment reference point is not aft of the wing"
            );
        }
        Self {
            planform,
            mac_offset,
            volume_coefficient,
        }
    }
}

/// Every quantity derived for one configuration.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DerivedMetrics {
    /// Trapezoidal reference wing.
    pub wing: Planform,
    /// Horizontal tail, when active.
    pub horizontal_tail: Option<TailSummary>,
    /// Vertical tail, when active.
    pub vertical_tail: Option<TailSummary>,
    /// Solver reference quantities.
    pub reference: ReferenceQuantities,
    /// Number of panel records in the deck (NPAN).
    pub panel_count: usize,
}

/// Panel records implied by the surface activation flags.
///
/// Fuselage 2, wing 5, horizontal tail 1 (2 when split), vertical tail 1 and
/// two per elevon segment. Twin fins are still one record.
#[must_use]
pub fn expected_panel_count(config: &AircraftConfig) -> usize {
    let fuselage = if config.fuselage().is_some() { 2 } else { 0 };
    let wing = crate::config::STATION_COUNT - 1;
    let horizontal_tail = match config.horizontal_tail().mode {
        HorizontalTailMode::Off => 0,
        HorizontalTailMode::Symmetric => 1,
        HorizontalTailMode::Split => 2,
    };
    let vertical_tail = usize::from(config.vertical_tail().mode != VerticalTailMode::Off);
    let elevons = config
        .elevons()
        .map_or(0, |elevons| 2 * elevons.segment_count());
    fuselage + wing + horizontal_tail + vertical_tail + elevons
}

/// Surface instances seen by the solver for one group of panels.
///
/// The fin record counts once per image, so a twin fin gives two.
#[must_use]
pub fn surface_instances(panels: &[Panel], kind: SurfaceKind) -> usize {
    panels
        .iter()
        .filter(|panel| panel.kind == kind)
        .map(|panel| match kind {
            SurfaceKind::VerticalTail => panel.quantity as usize,
            _ => 1,
        })
        .sum()
}
