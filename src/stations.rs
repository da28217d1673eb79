//! Spanwise control stations and their resolution to absolute coordinates.
//!
//! Stations are resolved by forward integration from the root: each leading
//! edge point is the previous one plus the spanwise step swept at the angle of
//! the segment between them. The sweep increment of a station therefore
//! describes the segment that *leaves* it, not the station itself.

use nalgebra::Vector3;
use serde::Serialize;

use crate::config::{Surface, VerticalTailConfig, VerticalTailMode};
use crate::errors::ConfigError;
use crate::geometry::{Point, ResolvedPoint};
use crate::planform::{radians, Planform};

/// One spanwise control station of a lifting surface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ControlStation {
    /// Position as a fraction of the semi-span.
    pub span_fraction: f64,
    /// Actual chord over the trapezoidal reference chord.
    pub chord_ratio: f64,
    /// Sweep above the reference sweep for the segment to the next station.
    pub sweep_increment_deg: f64,
    /// Local incidence in degrees.
    pub incidence_deg: f64,
    /// Vertical displacement above the dihedral line.
    pub shear: f64,
}

impl ControlStation {
    /// A station that follows the straight trapezoid exactly.
    #[must_use]
    pub const fn plain(span_fraction: f64, incidence_deg: f64) -> Self {
        Self {
            span_fraction,
            chord_ratio: 1.0,
            sweep_increment_deg: 0.0,
            incidence_deg,
            shear: 0.0,
        }
    }
}

/// Where a surface sits on the airframe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceDatum {
    /// Longitudinal position of the planform apex.
    pub apex_x: f64,
    /// Dihedral in degrees; the dihedral line starts at the first station.
    pub dihedral_deg: f64,
}

/// Resolve control stations into leading-edge points, root to tip.
///
/// Station 1 sits at `apex_x + y₁·tan(Λ)`; every later station adds
/// `(yᵢ − yᵢ₋₁)·tan(Λ + Δᵢ₋₁)`. Heights follow the dihedral line from the first
/// station plus the station shear. Chords are the trapezoidal chord at the
/// station scaled by its override ratio.
///
/// # Errors
///
/// Returns [`ConfigError::SpanFractionOutOfRange`] or
/// [`ConfigError::NonMonotonicStations`] when the fractions are not a
/// non-decreasing sequence in `[0, 1]`. Nothing is corrected.
pub fn resolve_chain(
    surface: Surface,
    planform: &Planform,
    datum: &SurfaceDatum,
    stations: &[ControlStation],
) -> Result<Vec<ResolvedPoint>, ConfigError> {
    check_fractions(surface, stations)?;
    let Some(root) = stations.first() else {
        return Ok(Vec::new());
    };

    let tan_dihedral = radians(datum.dihedral_deg).tan();
    let root_y = root.span_fraction * planform.semi_span;
    let mut leading_edge = Vector3::new(
        datum.apex_x + root_y * radians(planform.sweep_le_deg).tan(),
        root_y,
        root.shear,
    );

    let mut points = Vec::with_capacity(stations.len());
    points.push(resolve_point(planform, root, leading_edge));
    for segment in stations.windows(2) {
        let (inboard, outboard) = (&segment[0], &segment[1]);
        let dy = outboard.span_fraction * planform.semi_span - leading_edge.y;
        let tan_sweep = radians(planform.sweep_le_deg + inboard.sweep_increment_deg).tan();
        leading_edge += Vector3::new(dy * tan_sweep, dy, 0.0);
        leading_edge.z = tan_dihedral * (leading_edge.y - root_y) + outboard.shear;
        points.push(resolve_point(planform, outboard, leading_edge));
    }
    Ok(points)
}

/// Attach chord and incidence to a leading-edge position.
fn resolve_point(
    planform: &Planform,
    station: &ControlStation,
    leading_edge: Vector3<f64>,
) -> ResolvedPoint {
    ResolvedPoint::new(
        Point::from(leading_edge),
        planform.chord_at(station.span_fraction) * station.chord_ratio,
        station.incidence_deg,
    )
}

/// Reject fractions outside `[0, 1]` or decreasing towards the tip.
fn check_fractions(surface: Surface, stations: &[ControlStation]) -> Result<(), ConfigError> {
    let mut previous = 0.0;
    for (idx, station) in stations.iter().enumerate() {
        let fraction = station.span_fraction;
        if !(0.0..=1.0).contains(&fraction) {
            return Err(ConfigError::SpanFractionOutOfRange {
                surface,
                station: idx + 1,
                fraction,
            });
        }
        if fraction < previous {
            return Err(ConfigError::NonMonotonicStations {
                surface,
                station: idx + 1,
                previous,
                fraction,
            });
        }
        previous = fraction;
    }
    Ok(())
}

/// Vertical placement of a fin relative to the reference plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FinLayout {
    /// Height of the fin root.
    pub base_z: f64,
    /// `+1` for a dorsal fin growing upwards, `-1` for a ventral one.
    pub direction: f64,
}

impl FinLayout {
    /// Dorsal fins stand on the fuselage top edge; ventral fins hang from the
    /// reference plane.
    #[must_use]
    pub fn new(mode: VerticalTailMode, fuselage_height: f64) -> Self {
        match mode {
            VerticalTailMode::Ventral => Self {
                base_z: 0.0,
                direction: -1.0,
            },
            VerticalTailMode::Dorsal | VerticalTailMode::Off => Self {
                base_z: fuselage_height,
                direction: 1.0,
            },
        }
    }

    /// Height of a point a given distance along the fin.
    #[must_use]
    pub fn height_at(&self, distance: f64) -> f64 {
        self.base_z + self.direction * distance
    }
}

/// Resolve the root and tip of a fin.
///
/// The fin is a two-station chain in the vertical plane: the tip is displaced
/// aft by the leading-edge sweep and outboard by the tilt.
#[must_use]
pub fn resolve_fin(
    planform: &Planform,
    tail: &VerticalTailConfig,
    layout: &FinLayout,
) -> [ResolvedPoint; 2] {
    let height = planform.span;
    let root = Point::new(tail.base_x_in, tail.base_y_in, layout.base_z);
    let tip = Point::new(
        tail.base_x_in + height * radians(planform.sweep_le_deg).tan(),
        tail.base_y_in + height * radians(tail.tilt_deg).tan(),
        layout.height_at(height),
    );
    [
        ResolvedPoint::new(root, planform.root_chord, 0.0),
        ResolvedPoint::new(tip, planform.tip_chord, 0.0),
    ]
}
