//! Ordered assembly of trapezoidal solver panels.
//!
//! Panels are positional in the deck, so [`assemble`] always emits them in the
//! same precedence: fuselage, wing root to tip, horizontal tail, vertical
//! tail and finally the elevons split off the wing.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::config::{ControlSurfaceConfig, Deflection, FuselageConfig, HorizontalTailMode};
use crate::errors::ConfigError;
use crate::geometry::{Point, ResolvedPoint};
use crate::planform::radians;

/// Labels of the five wing panels, root to tip.
const WING_PANEL_LABELS: [&str; 5] = [
    "INBOARD-MOST WING PANEL",
    "SECOND INBOARD WING PANEL",
    "MIDDLE WING PANEL",
    "SECOND-MOST OUTBOARD WING PANEL",
    "MOST OUTBOARD WING PANEL",
];

/// Group a panel belongs to in the deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceKind {
    /// Fuselage reference panels.
    Fuselage,
    /// Main wing.
    Wing,
    /// Horizontal tail.
    HorizontalTail,
    /// Vertical tail.
    VerticalTail,
    /// Elevons split off the wing trailing edge.
    Elevon,
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SurfaceKind::Fuselage => "fuselage",
            SurfaceKind::Wing => "wing",
            SurfaceKind::HorizontalTail => "horizontal tail",
            SurfaceKind::VerticalTail => "vertical tail",
            SurfaceKind::Elevon => "elevon",
        };
        f.write_str(name)
    }
}

/// Vortex-lattice discretisation of one panel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Discretization {
    /// Chordwise vortex count (NVOR).
    pub vortex_count: u32,
    /// Spanwise vortex count control (RNCV).
    pub spanwise_control: f64,
    /// Spanwise spacing parameter (SPC).
    pub spacing: f64,
    /// Panel leading-edge suction parameter (PDL).
    pub edge_suction: f64,
}

impl Default for Discretization {
    fn default() -> Self {
        Self {
            vortex_count: 10,
            spanwise_control: 15.0,
            spacing: 1.0,
            edge_suction: 0.0,
        }
    }
}

/// One trapezoidal panel between two leading-edge points.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Panel {
    /// Group the panel belongs to.
    pub kind: SurfaceKind,
    /// Comment printed with the first corner.
    pub label: String,
    /// First corner, normally inboard.
    pub inboard: ResolvedPoint,
    /// Second corner, normally outboard.
    pub outboard: ResolvedPoint,
    /// Solver image count (IQUANT): 2 when the solver mirrors the panel.
    pub quantity: u32,
    /// Discretisation parameters.
    pub discretization: Discretization,
}

impl Panel {
    /// Create a panel with the default discretisation.
    #[must_use]
    pub fn new(
        kind: SurfaceKind,
        label: impl Into<String>,
        inboard: ResolvedPoint,
        outboard: ResolvedPoint,
        quantity: u32,
    ) -> Self {
        Self {
            kind,
            label: label.into(),
            inboard,
            outboard,
            quantity,
            discretization: Discretization::default(),
        }
    }
}

/// Fuselage reference panels: the vertical panel, then the horizontal one.
///
/// `half_width` is the span position of the wing root station.
#[must_use]
pub fn fuselage_panels(fuselage: &FuselageConfig, half_width: f64) -> [Panel; 2] {
    let length = fuselage.length_in;
    let height = fuselage.height_in;
    let nose = ResolvedPoint::new(Point::default(), length, 0.0);

    let nose_top = height * radians(fuselage.nose_top_angle_deg).tan();
    let tail_top = height * radians(fuselage.tail_top_angle_deg).tan();
    let top = ResolvedPoint::new(
        Point::new(nose_top, 0.0, height),
        length - nose_top - tail_top,
        0.0,
    );

    let nose_side = half_width * radians(fuselage.nose_side_angle_deg).tan();
    let tail_side = half_width * radians(fuselage.tail_side_angle_deg).tan();
    let side = ResolvedPoint::new(
        Point::new(nose_side, half_width, 0.0),
        length - nose_side - tail_side,
        0.0,
    );

    [
        Panel::new(SurfaceKind::Fuselage, "VERTICAL FUSELAGE PANEL", nose, top, 1),
        Panel::new(SurfaceKind::Fuselage, "HORIZONTAL FUSELAGE PANEL", nose, side, 2),
    ]
}

/// Chordwise split of the wing into a main surface and elevons.
///
/// The hinge line is straight and unswept: it sits at `x_a + f·c_a`, where `a`
/// is the inboard elevon station, so the main chord at a later station `i` is
/// `f·c_a − (x_i − x_a)` and the elevon takes the rest of the local chord.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ElevonSplit {
    /// One-based inboard station.
    pub inboard_station: usize,
    /// One-based outboard station.
    pub outboard_station: usize,
    /// Right-hand deflection in degrees.
    pub deflection_deg: f64,
    /// Left-hand deflection rule.
    pub deflection: Deflection,
    /// Main-surface chord at each station from inboard to outboard.
    main_chords: Vec<f64>,
}

impl ElevonSplit {
    /// Split the resolved wing stations.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidControlStations`] when the station range
    /// does not fit the wing, and [`ConfigError::HingeOutsideChord`] when the
    /// hinge line leaves the local chord at any spanned station.
    pub fn new(config: &ControlSurfaceConfig, wing: &[ResolvedPoint]) -> Result<Self, ConfigError> {
        let (first, last) = (config.inboard_station, config.outboard_station);
        let invalid = ConfigError::InvalidControlStations {
            inboard: first,
            outboard: last,
        };
        if first < 1 || first >= last {
            return Err(invalid);
        }
        let spanned = wing.get(first - 1..last).ok_or(invalid)?;

        let anchor = spanned[0];
        let hinge_x = anchor.position.x + config.chord_break_fraction * anchor.chord;
        let mut main_chords = Vec::with_capacity(spanned.len());
        for (offset, point) in spanned.iter().enumerate() {
            let main_chord = hinge_x - point.position.x;
            if main_chord <= 0.0 || main_chord >= point.chord {
                return Err(ConfigError::HingeOutsideChord {
                    station: first + offset,
                    main_chord,
                    chord: point.chord,
                });
            }
            main_chords.push(main_chord);
        }

        Ok(Self {
            inboard_station: first,
            outboard_station: last,
            deflection_deg: config.deflection_deg,
            deflection: config.deflection,
            main_chords,
        })
    }

    /// Main-surface chord at a one-based station, if the elevon spans it.
    #[must_use]
    pub fn main_chord(&self, station: usize) -> Option<f64> {
        station
            .checked_sub(self.inboard_station)
            .and_then(|offset| self.main_chords.get(offset))
            .copied()
    }

    /// Whether the segment leaving a one-based station carries an elevon.
    #[must_use]
    pub fn covers_segment(&self, station: usize) -> bool {
        (self.inboard_station..self.outboard_station).contains(&station)
    }

    /// Number of segments spanned on each side.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.outboard_station - self.inboard_station
    }

    /// Leading edge of the elevon at a one-based station on the right wing.
    fn hinge_point(&self, wing: &[ResolvedPoint], station: usize) -> Option<ResolvedPoint> {
        let main_chord = self.main_chord(station)?;
        let point = wing.get(station - 1)?;
        let position = Point::new(
            point.position.x + main_chord,
            point.position.y,
            point.position.z,
        );
        Some(ResolvedPoint::new(
            position,
            point.chord - main_chord,
            point.incidence_deg + self.deflection_deg,
        ))
    }
}

/// Wing panels root to tip, one per pair of adjacent stations.
///
/// Segments spanned by elevons carry the main-surface chord only.
#[must_use]
pub fn wing_panels(wing: &[ResolvedPoint], elevons: Option<&ElevonSplit>) -> Vec<Panel> {
    let main_surface = |station: usize, point: ResolvedPoint| match elevons {
        Some(split) => split.main_chord(station).map_or(point, |chord| {
            ResolvedPoint::new(point.position, chord, point.incidence_deg)
        }),
        None => point,
    };

    wing.windows(2)
        .enumerate()
        .map(|(idx, segment)| {
            let station = idx + 1;
            let (mut inboard, mut outboard) = (segment[0], segment[1]);
            if elevons.is_some_and(|split| split.covers_segment(station)) {
                inboard = main_surface(station, inboard);
                outboard = main_surface(station + 1, outboard);
            }
            let label = WING_PANEL_LABELS
                .get(idx)
                .map_or_else(|| format!("WING PANEL {station}"), |label| (*label).to_string());
            Panel::new(SurfaceKind::Wing, label, inboard, outboard, 2)
        })
        .collect()
}

/// Horizontal tail panels for an active tail.
///
/// A symmetric tail is one mirrored panel. A split tail is a right panel and
/// a left panel whose incidence follows the deflection rule, so differential
/// mode deflects the two halves in opposite directions.
#[must_use]
pub fn horizontal_tail_panels(
    mode: HorizontalTailMode,
    deflection: Deflection,
    root: ResolvedPoint,
    tip: ResolvedPoint,
) -> Vec<Panel> {
    match mode {
        HorizontalTailMode::Off => Vec::new(),
        HorizontalTailMode::Symmetric => vec![Panel::new(
            SurfaceKind::HorizontalTail,
            "HORIZONTAL TAIL PANEL",
            root,
            tip,
            2,
        )],
        HorizontalTailMode::Split => {
            let left = |point: ResolvedPoint| {
                point.mirrored_with_incidence(deflection.left_incidence_deg(0.0, point.incidence_deg))
            };
            vec![
                Panel::new(
                    SurfaceKind::HorizontalTail,
                    "RIGHT HORIZONTAL TAIL PANEL",
                    root,
                    tip,
                    1,
                ),
                Panel::new(
                    SurfaceKind::HorizontalTail,
                    "LEFT HORIZONTAL TAIL PANEL",
                    left(root),
                    left(tip),
                    1,
                ),
            ]
        }
    }
}

/// The vertical tail record; `quantity` 2 describes a symmetric twin fin.
#[must_use]
pub fn vertical_tail_panel(root: ResolvedPoint, tip: ResolvedPoint, quantity: u32) -> Panel {
    Panel::new(SurfaceKind::VerticalTail, "VERTICAL TAIL PANEL", root, tip, quantity)
}

/// Elevon panels as right and left pairs, inboard segment first.
#[must_use]
pub fn elevon_panels(wing: &[ResolvedPoint], split: &ElevonSplit) -> Vec<Panel> {
    let left = |point: ResolvedPoint, twist_deg: f64| {
        point.mirrored_with_incidence(split.deflection.left_incidence_deg(twist_deg, split.deflection_deg))
    };

    let mut panels = Vec::with_capacity(2 * split.segment_count());
    for station in split.inboard_station..split.outboard_station {
        let (Some(inboard), Some(outboard)) = (
            split.hinge_point(wing, station),
            split.hinge_point(wing, station + 1),
        ) else {
            continue;
        };
        let stations = format!("STATIONS {}-{}", station, station + 1);
        let twist_inboard = wing[station - 1].incidence_deg;
        let twist_outboard = wing[station].incidence_deg;
        panels.push(Panel::new(
            SurfaceKind::Elevon,
            format!("RIGHT ELEVON PANEL, {stations}"),
            inboard,
            outboard,
            1,
        ));
        panels.push(Panel::new(
            SurfaceKind::Elevon,
            format!("LEFT ELEVON PANEL, {stations}"),
            left(inboard, twist_inboard),
            left(outboard, twist_outboard),
            1,
        ));
    }
    panels
}

/// Resolved geometry of every active surface, ready for assembly.
#[derive(Clone, Copy, Debug)]
pub struct SurfaceLayout<'a> {
    /// Fuselage, if the topology carries one.
    pub fuselage: Option<&'a FuselageConfig>,
    /// Resolved wing stations, root to tip.
    pub wing: &'a [ResolvedPoint],
    /// Elevon split of the wing, if any.
    pub elevons: Option<&'a ElevonSplit>,
    /// Horizontal tail arrangement and its root and tip.
    pub horizontal_tail: Option<(HorizontalTailMode, Deflection, [ResolvedPoint; 2])>,
    /// Vertical tail root, tip and image count.
    pub vertical_tail: Option<([ResolvedPoint; 2], u32)>,
}

/// Assemble every panel in deck order.
#[must_use]
pub fn assemble(layout: &SurfaceLayout<'_>) -> Vec<Panel> {
    let mut panels = Vec::new();
    if let Some(fuselage) = layout.fuselage {
        let half_width = layout.wing.first().map_or(0.0, |root| root.position.y);
        panels.extend(fuselage_panels(fuselage, half_width));
    }
    panels.extend(wing_panels(layout.wing, layout.elevons));
    if let Some((mode, deflection, [root, tip])) = layout.horizontal_tail {
        panels.extend(horizontal_tail_panels(mode, deflection, root, tip));
    }
    if let Some(([root, tip], quantity)) = layout.vertical_tail {
        panels.push(vertical_tail_panel(root, tip, quantity));
    }
    if let Some(split) = layout.elevons {
        panels.extend(elevon_panels(layout.wing, split));
    }
    debug!(count = panels.len(), "assembled panels");
    panels
}
