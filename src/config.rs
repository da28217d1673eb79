//! Aircraft configuration: the serde-facing record and its validated form.
//!
//! Inputs use the units an aircraft designer works in: areas in square feet,
//! lengths in inches and angles in degrees.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::planform::PlanformInput;
use crate::stations::ControlStation;

/// Number of control stations along each wing half span.
pub const STATION_COUNT: usize = 6;

/// Lifting surfaces and bodies that make up the model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    /// Main wing.
    Wing,
    /// Horizontal tail.
    HorizontalTail,
    /// Vertical tail (or twin vertical tails).
    VerticalTail,
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Surface::Wing => "wing",
            Surface::HorizontalTail => "horizontal tail",
            Surface::VerticalTail => "vertical tail",
        };
        f.write_str(name)
    }
}

/// Spanwise control-station table for the wing half span.
///
/// Station 6 is the tip and has no span fraction of its own. Sweep increment
/// `i` applies to the segment from station `i + 1` to station `i + 2`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StationTable {
    /// Fractions of the half span for stations 1 to 5.
    pub span_fractions: [f64; STATION_COUNT - 1],
    /// Actual chord over trapezoidal reference chord at stations 1 to 6.
    pub chord_ratios: [f64; STATION_COUNT],
    /// Sweep above the reference leading-edge sweep for segments 1-2 to 5-6.
    pub sweep_increments_deg: [f64; STATION_COUNT - 1],
    /// Incidence at stations 1 to 6, positive wash-out (trailing edge up).
    pub incidences_deg: [f64; STATION_COUNT],
    /// Vertical displacement above the dihedral line at stations 1 to 6.
    pub shears_in: [f64; STATION_COUNT],
}

impl StationTable {
    /// Expand the table into one record per station, root to tip.
    #[must_use]
    pub fn stations(&self) -> [ControlStation; STATION_COUNT] {
        std::array::from_fn(|idx| ControlStation {
            span_fraction: self.span_fractions.get(idx).copied().unwrap_or(1.0),
            chord_ratio: self.chord_ratios[idx],
            sweep_increment_deg: self.sweep_increments_deg.get(idx).copied().unwrap_or(0.0),
            incidence_deg: self.incidences_deg[idx],
            shear: self.shears_in[idx],
        })
    }
}

/// Main wing definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WingConfig {
    /// Reference area in square feet.
    pub reference_area_ft2: f64,
    /// Aspect ratio.
    pub aspect_ratio: f64,
    /// Tip chord over root chord.
    pub taper_ratio: f64,
    /// Reference leading-edge sweep in degrees.
    pub sweep_le_deg: f64,
    /// Dihedral in degrees.
    pub dihedral_deg: f64,
    /// Longitudinal position of the planform apex in inches.
    pub apex_x_in: f64,
    /// Moment reference point as a percentage of the MAC.
    pub mrp_mac_pct: f64,
    /// Control stations.
    pub stations: StationTable,
}

impl WingConfig {
    /// Planform inputs for the trapezoidal reference wing.
    #[must_use]
    pub fn planform_input(&self) -> PlanformInput {
        PlanformInput::from_square_feet(
            self.reference_area_ft2,
            self.aspect_ratio,
            self.taper_ratio,
            self.sweep_le_deg,
            self.dihedral_deg,
            self.apex_x_in,
            self.mrp_mac_pct,
        )
    }
}

/// Fuselage reference panels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FuselageConfig {
    /// Overall length in inches.
    pub length_in: f64,
    /// Height of the top edge above the reference plane in inches.
    pub height_in: f64,
    /// Nose taper seen from the side, in degrees.
    pub nose_top_angle_deg: f64,
    /// Nose taper seen from above, in degrees.
    pub nose_side_angle_deg: f64,
    /// Tail taper seen from the side, in degrees.
    pub tail_top_angle_deg: f64,
    /// Tail taper seen from above, in degrees.
    pub tail_side_angle_deg: f64,
}

/// How a pair of independently deflectable panels moves together.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Deflection {
    /// Both sides deflect the same way (pitch).
    #[default]
    Collective,
    /// Sides deflect in opposite directions (roll).
    Differential,
}

impl Deflection {
    /// Orientation flag echoed in the deck and used by the left-side sign rule.
    #[must_use]
    pub const fn flag(self) -> i64 {
        match self {
            Deflection::Collective => -1,
            Deflection::Differential => 1,
        }
    }

    /// Incidence of the left-hand panel given the local twist and the
    /// right-hand deflection.
    ///
    /// The left deflection is `-flag * deflection`, so differential mode
    /// produces equal and opposite deflections.
    #[must_use]
    pub fn left_incidence_deg(self, twist_deg: f64, deflection_deg: f64) -> f64 {
        twist_deg - self.flag() as f64 * deflection_deg
    }
}

/// Elevons formed by a chordwise split of the wing between two stations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlSurfaceConfig {
    /// One-based station where the elevon starts.
    pub inboard_station: usize,
    /// One-based station where the elevon ends.
    pub outboard_station: usize,
    /// Hinge position as a fraction of the inboard station chord.
    pub chord_break_fraction: f64,
    /// Right-hand deflection in degrees, positive trailing edge up.
    pub deflection_deg: f64,
    /// How the left-hand elevon follows the right-hand one.
    #[serde(default)]
    pub deflection: Deflection,
}

impl ControlSurfaceConfig {
    /// Number of wing segments spanned by each elevon.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.outboard_station.saturating_sub(self.inboard_station)
    }
}

/// Surface topology of the aircraft.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Topology {
    /// Straight wing with a fuselage and a simple horizontal tail.
    Conventional {
        /// Fuselage reference panels.
        fuselage: FuselageConfig,
    },
    /// Disc-like wing with optional fuselage, split tail and elevons.
    Discoidal {
        /// Fuselage reference panels, if any.
        #[serde(default)]
        fuselage: Option<FuselageConfig>,
        /// Wing elevons, if any.
        #[serde(default)]
        elevons: Option<ControlSurfaceConfig>,
    },
}

impl Topology {
    /// Short name used in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Topology::Conventional { .. } => "conventional",
            Topology::Discoidal { .. } => "discoidal",
        }
    }

    /// Fuselage definition when the topology carries one.
    #[must_use]
    pub fn fuselage(&self) -> Option<&FuselageConfig> {
        match self {
            Topology::Conventional { fuselage } => Some(fuselage),
            Topology::Discoidal { fuselage, .. } => fuselage.as_ref(),
        }
    }

    /// Elevon definition when the topology carries one.
    #[must_use]
    pub fn elevons(&self) -> Option<&ControlSurfaceConfig> {
        match self {
            Topology::Conventional { .. } => None,
            Topology::Discoidal { elevons, .. } => elevons.as_ref(),
        }
    }
}

/// Horizontal tail arrangement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalTailMode {
    /// No horizontal tail.
    Off,
    /// One panel mirrored by the solver.
    Symmetric,
    /// Independent right and left panels.
    Split,
}

/// Horizontal tail definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HorizontalTailConfig {
    /// Arrangement of the tail.
    pub mode: HorizontalTailMode,
    /// Deflection coupling of split panels.
    #[serde(default)]
    pub deflection: Deflection,
    /// Reference area in square feet.
    pub reference_area_ft2: f64,
    /// Aspect ratio.
    pub aspect_ratio: f64,
    /// Tip chord over root chord.
    pub taper_ratio: f64,
    /// Leading-edge sweep in degrees.
    pub sweep_le_deg: f64,
    /// Dihedral in degrees.
    pub dihedral_deg: f64,
    /// Longitudinal position of the planform apex in inches.
    pub apex_x_in: f64,
    /// Incidence in degrees, rotation about the leading edge.
    pub incidence_deg: f64,
    /// Moment reference point as a percentage of the MAC.
    pub mrp_mac_pct: f64,
}

impl HorizontalTailConfig {
    /// Echo flag: 0 when off, 1 when on.
    #[must_use]
    pub fn flag(&self) -> i64 {
        i64::from(self.mode != HorizontalTailMode::Off)
    }

    /// Planform inputs for the trapezoidal tail.
    #[must_use]
    pub fn planform_input(&self) -> PlanformInput {
        PlanformInput::from_square_feet(
            self.reference_area_ft2,
            self.aspect_ratio,
            self.taper_ratio,
            self.sweep_le_deg,
            self.dihedral_deg,
            self.apex_x_in,
            self.mrp_mac_pct,
        )
    }
}

/// Vertical tail arrangement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalTailMode {
    /// No vertical tail.
    Off,
    /// Fin on top of the fuselage.
    Dorsal,
    /// Fin below the reference plane.
    Ventral,
}

/// Vertical tail definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VerticalTailConfig {
    /// Arrangement of the tail.
    pub mode: VerticalTailMode,
    /// Reference area in square feet.
    pub reference_area_ft2: f64,
    /// Aspect ratio.
    pub aspect_ratio: f64,
    /// Tip chord over root chord.
    pub taper_ratio: f64,
    /// Leading-edge sweep in degrees.
    pub sweep_le_deg: f64,
    /// Outboard tilt from vertical in degrees.
    pub tilt_deg: f64,
    /// Spanwise displacement of the fin base in inches.
    pub base_y_in: f64,
    /// Longitudinal position of the fin base leading edge in inches.
    pub base_x_in: f64,
    /// Moment reference point as a percentage of the MAC.
    pub mrp_mac_pct: f64,
}

impl VerticalTailConfig {
    /// Echo flag: 0 when off, 1 dorsal, -1 ventral.
    #[must_use]
    pub const fn flag(&self) -> i64 {
        match self.mode {
            VerticalTailMode::Off => 0,
            VerticalTailMode::Dorsal => 1,
            VerticalTailMode::Ventral => -1,
        }
    }

    /// Solver image count: twin fins when tilted or moved off the centreline.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        if self.tilt_deg != 0.0 || self.base_y_in > 0.0 {
            2
        } else {
            1
        }
    }

    /// Planform inputs for one fin; the tilt takes the place of dihedral.
    #[must_use]
    pub fn planform_input(&self) -> PlanformInput {
        PlanformInput::from_square_feet(
            self.reference_area_ft2,
            self.aspect_ratio,
            self.taper_ratio,
            self.sweep_le_deg,
            self.tilt_deg,
            self.base_x_in,
            self.mrp_mac_pct,
        )
    }
}

/// Flight conditions swept by the solver.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunConditions {
    /// Mach numbers.
    pub mach_numbers: Vec<f64>,
    /// Angles of attack in degrees.
    pub alphas_deg: Vec<f64>,
}

impl Default for RunConditions {
    fn default() -> Self {
        Self {
            mach_numbers: vec![0.2],
            alphas_deg: vec![0.0],
        }
    }
}

fn default_project() -> String {
    "Parametrically Generated Model".to_string()
}

/// Configuration exactly as read from a file, before validation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawAircraftConfig {
    /// Free-form project name used in logs.
    #[serde(default = "default_project")]
    pub project: String,
    /// Main wing.
    pub wing: WingConfig,
    /// Surface topology.
    pub topology: Topology,
    /// Horizontal tail.
    pub horizontal_tail: HorizontalTailConfig,
    /// Vertical tail.
    pub vertical_tail: VerticalTailConfig,
    /// Mach and angle-of-attack sweep.
    #[serde(default)]
    pub conditions: RunConditions,
}

impl RawAircraftConfig {
    /// A swept-wing transport with a conventional tail.
    #[must_use]
    pub fn reference_transport() -> Self {
        Self {
            project: default_project(),
            wing: WingConfig {
                reference_area_ft2: 1341.15,
                aspect_ratio: 9.45,
                taper_ratio: 0.278,
                sweep_le_deg: 27.75,
                dihedral_deg: 2.5,
                apex_x_in: 550.0,
                mrp_mac_pct: 25.0,
                stations: StationTable {
                    span_fractions: [0.109552, 0.3, 0.6, 0.8, 0.97],
                    chord_ratios: [1.3, 1.1, 1.0, 1.0, 1.0, 0.5],
                    sweep_increments_deg: [5.0, 0.0, 0.0, 0.0, 45.0],
                    incidences_deg: [0.0, 0.0, 0.5, 1.0, 2.0, 5.0],
                    shears_in: [0.0, 10.0, 10.0, 10.0, 10.0, 20.0],
                },
            },
            topology: Topology::Conventional {
                fuselage: FuselageConfig {
                    length_in: 1497.0,
                    height_in: 148.0,
                    nose_top_angle_deg: 35.0,
                    nose_side_angle_deg: 45.0,
                    tail_top_angle_deg: 0.0,
                    tail_side_angle_deg: 0.0,
                },
            },
            horizontal_tail: HorizontalTailConfig {
                mode: HorizontalTailMode::Symmetric,
                deflection: Deflection::Collective,
                reference_area_ft2: 348.74,
                aspect_ratio: 5.54,
                taper_ratio: 0.186,
                sweep_le_deg: 35.0,
                dihedral_deg: 15.0,
                apex_x_in: 1330.0,
                incidence_deg: 0.0,
                mrp_mac_pct: 25.0,
            },
            vertical_tail: VerticalTailConfig {
                mode: VerticalTailMode::Dorsal,
                reference_area_ft2: 248.96,
                aspect_ratio: 2.156,
                taper_ratio: 0.31,
                sweep_le_deg: 35.0,
                tilt_deg: 0.0,
                base_y_in: 0.0,
                base_x_in: 1300.0,
                mrp_mac_pct: 25.0,
            },
            conditions: RunConditions::default(),
        }
    }

    /// A disc-like flying wing with elevons, a split tail and twin fins.
    #[must_use]
    pub fn discoidal_demo() -> Self {
        Self {
            project: "Discoidal Demonstrator".to_string(),
            wing: WingConfig {
                reference_area_ft2: 400.0,
                aspect_ratio: 1.6,
                taper_ratio: 0.5,
                sweep_le_deg: 40.0,
                dihedral_deg: 0.0,
                apex_x_in: 100.0,
                mrp_mac_pct: 20.0,
                stations: StationTable {
                    span_fractions: [0.0, 0.3, 0.55, 0.75, 0.9],
                    chord_ratios: [1.0, 1.0, 1.0, 0.95, 0.85, 0.4],
                    sweep_increments_deg: [0.0, 5.0, 10.0, 15.0, 25.0],
                    incidences_deg: [0.0, 0.0, 0.0, 0.5, 1.0, 2.0],
                    shears_in: [0.0; STATION_COUNT],
                },
            },
            topology: Topology::Discoidal {
                fuselage: None,
                elevons: Some(ControlSurfaceConfig {
                    inboard_station: 2,
                    outboard_station: 4,
                    chord_break_fraction: 0.8,
                    deflection_deg: 5.0,
                    deflection: Deflection::Differential,
                }),
            },
            horizontal_tail: HorizontalTailConfig {
                mode: HorizontalTailMode::Split,
                deflection: Deflection::Differential,
                reference_area_ft2: 40.0,
                aspect_ratio: 3.0,
                taper_ratio: 0.5,
                sweep_le_deg: 30.0,
                dihedral_deg: 0.0,
                apex_x_in: 300.0,
                incidence_deg: 3.0,
                mrp_mac_pct: 25.0,
            },
            vertical_tail: VerticalTailConfig {
                mode: VerticalTailMode::Dorsal,
                reference_area_ft2: 20.0,
                aspect_ratio: 1.5,
                taper_ratio: 0.6,
                sweep_le_deg: 35.0,
                tilt_deg: 10.0,
                base_y_in: 40.0,
                base_x_in: 290.0,
                mrp_mac_pct: 25.0,
            },
            conditions: RunConditions {
                mach_numbers: vec![0.3, 0.6],
                alphas_deg: vec![0.0, 4.0, 8.0],
            },
        }
    }
}

/// Immutable, validated aircraft configuration.
///
/// The only way to obtain one is through [`AircraftConfig::new`], so every
/// stage of the pipeline can rely on the invariants checked there.
#[derive(Clone, Debug, PartialEq)]
pub struct AircraftConfig {
    /// Validated inputs.
    raw: RawAircraftConfig,
}

impl AircraftConfig {
    /// Validate a raw configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found, checking the wing, topology,
    /// tails and run conditions in that order.
    pub fn new(raw: RawAircraftConfig) -> Result<Self, ConfigError> {
        validate_wing(&raw.wing)?;
        validate_topology(&raw.topology)?;
        validate_horizontal_tail(&raw.horizontal_tail, &raw.topology)?;
        validate_vertical_tail(&raw.vertical_tail)?;
        validate_conditions(&raw.conditions)?;
        Ok(Self { raw })
    }

    /// Project name.
    #[must_use]
    pub fn project(&self) -> &str {
        &self.raw.project
    }

    /// Main wing.
    #[must_use]
    pub fn wing(&self) -> &WingConfig {
        &self.raw.wing
    }

    /// Surface topology.
    #[must_use]
    pub fn topology(&self) -> &Topology {
        &self.raw.topology
    }

    /// Fuselage, when the topology carries one.
    #[must_use]
    pub fn fuselage(&self) -> Option<&FuselageConfig> {
        self.raw.topology.fuselage()
    }

    /// Elevons, when the topology carries them.
    #[must_use]
    pub fn elevons(&self) -> Option<&ControlSurfaceConfig> {
        self.raw.topology.elevons()
    }

    /// Horizontal tail.
    #[must_use]
    pub fn horizontal_tail(&self) -> &HorizontalTailConfig {
        &self.raw.horizontal_tail
    }

    /// Vertical tail.
    #[must_use]
    pub fn vertical_tail(&self) -> &VerticalTailConfig {
        &self.raw.vertical_tail
    }

    /// Mach and angle-of-attack sweep.
    #[must_use]
    pub fn conditions(&self) -> &RunConditions {
        &self.raw.conditions
    }

    /// Borrow the underlying record, e.g. for serialisation.
    #[must_use]
    pub fn as_raw(&self) -> &RawAircraftConfig {
        &self.raw
    }
}

impl TryFrom<RawAircraftConfig> for AircraftConfig {
    type Error = ConfigError;

    fn try_from(raw: RawAircraftConfig) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

/// Reject NaN and infinite values.
fn ensure_finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

/// Reject angles whose tangent is undefined or flips sign.
fn ensure_angle(surface: Surface, field: &'static str, degrees: f64) -> Result<(), ConfigError> {
    ensure_finite(field, degrees)?;
    if degrees.abs() < 90.0 {
        Ok(())
    } else {
        Err(ConfigError::AngleOutOfRange {
            surface,
            field,
            degrees,
        })
    }
}

/// Shared checks for any trapezoidal surface.
fn validate_trapezoid(surface: Surface, input: &PlanformInput, area_ft2: f64) -> Result<(), ConfigError> {
    ensure_finite("reference area", area_ft2)?;
    ensure_finite("aspect ratio", input.aspect_ratio)?;
    ensure_finite("taper ratio", input.taper_ratio)?;
    ensure_finite("apex position", input.apex_x)?;
    ensure_finite("moment reference percentage", input.mrp_mac_pct)?;
    if area_ft2 <= 0.0 {
        return Err(ConfigError::NonPositiveArea {
            surface,
            area: area_ft2,
        });
    }
    if input.aspect_ratio <= 0.0 {
        return Err(ConfigError::NonPositiveAspectRatio {
            surface,
            aspect_ratio: input.aspect_ratio,
        });
    }
    if input.taper_ratio <= 0.0 || input.taper_ratio > 1.0 {
        return Err(ConfigError::TaperOutOfRange {
            surface,
            taper: input.taper_ratio,
        });
    }
    ensure_angle(surface, "leading-edge sweep", input.sweep_le_deg)?;
    ensure_angle(surface, "dihedral", input.dihedral_deg)
}

fn validate_wing(wing: &WingConfig) -> Result<(), ConfigError> {
    validate_trapezoid(Surface::Wing, &wing.planform_input(), wing.reference_area_ft2)?;
    let mut previous = 0.0;
    for (idx, station) in wing.stations.stations().iter().enumerate() {
        let number = idx + 1;
        ensure_finite("station span fraction", station.span_fraction)?;
        ensure_finite("station chord ratio", station.chord_ratio)?;
        ensure_finite("station incidence", station.incidence_deg)?;
        ensure_finite("station shear", station.shear)?;
        if !(0.0..=1.0).contains(&station.span_fraction) {
            return Err(ConfigError::SpanFractionOutOfRange {
                surface: Surface::Wing,
                station: number,
                fraction: station.span_fraction,
            });
        }
        if station.span_fraction < previous {
            return Err(ConfigError::NonMonotonicStations {
                surface: Surface::Wing,
                station: number,
                previous,
                fraction: station.span_fraction,
            });
        }
        if station.chord_ratio <= 0.0 {
            return Err(ConfigError::NonPositiveChordRatio {
                surface: Surface::Wing,
                station: number,
                ratio: station.chord_ratio,
            });
        }
        ensure_angle(
            Surface::Wing,
            "segment sweep",
            wing.sweep_le_deg + station.sweep_increment_deg,
        )?;
        previous = station.span_fraction;
    }
    Ok(())
}

fn validate_fuselage(fuselage: &FuselageConfig) -> Result<(), ConfigError> {
    ensure_finite("fuselage length", fuselage.length_in)?;
    ensure_finite("fuselage height", fuselage.height_in)?;
    if fuselage.length_in <= 0.0 {
        return Err(ConfigError::InvalidFuselage {
            field: "length",
            value: fuselage.length_in,
        });
    }
    if fuselage.height_in < 0.0 {
        return Err(ConfigError::InvalidFuselage {
            field: "height",
            value: fuselage.height_in,
        });
    }
    for (field, degrees) in [
        ("nose top angle", fuselage.nose_top_angle_deg),
        ("nose side angle", fuselage.nose_side_angle_deg),
        ("tail top angle", fuselage.tail_top_angle_deg),
        ("tail side angle", fuselage.tail_side_angle_deg),
    ] {
        ensure_finite(field, degrees)?;
        if degrees.abs() >= 90.0 {
            return Err(ConfigError::InvalidFuselage {
                field,
                value: degrees,
            });
        }
    }
    Ok(())
}

fn validate_topology(topology: &Topology) -> Result<(), ConfigError> {
    if let Some(fuselage) = topology.fuselage() {
        validate_fuselage(fuselage)?;
    }
    if let Some(elevons) = topology.elevons() {
        if elevons.inboard_station < 1
            || elevons.outboard_station > STATION_COUNT
            || elevons.inboard_station >= elevons.outboard_station
        {
            return Err(ConfigError::InvalidControlStations {
                inboard: elevons.inboard_station,
                outboard: elevons.outboard_station,
            });
        }
        ensure_finite("elevon chord break fraction", elevons.chord_break_fraction)?;
        if elevons.chord_break_fraction <= 0.0 || elevons.chord_break_fraction >= 1.0 {
            return Err(ConfigError::InvalidChordBreak {
                fraction: elevons.chord_break_fraction,
            });
        }
        ensure_angle(Surface::Wing, "elevon deflection", elevons.deflection_deg)?;
    }
    Ok(())
}

fn validate_horizontal_tail(
    tail: &HorizontalTailConfig,
    topology: &Topology,
) -> Result<(), ConfigError> {
    if tail.mode == HorizontalTailMode::Off {
        return Ok(());
    }
    if tail.mode == HorizontalTailMode::Split && matches!(topology, Topology::Conventional { .. })
    {
        return Err(ConfigError::UnsupportedForTopology {
            feature: "split horizontal tail",
            topology: topology.name(),
        });
    }
    validate_trapezoid(
        Surface::HorizontalTail,
        &tail.planform_input(),
        tail.reference_area_ft2,
    )?;
    ensure_angle(Surface::HorizontalTail, "incidence", tail.incidence_deg)
}

fn validate_vertical_tail(tail: &VerticalTailConfig) -> Result<(), ConfigError> {
    if tail.mode == VerticalTailMode::Off {
        return Ok(());
    }
    validate_trapezoid(
        Surface::VerticalTail,
        &tail.planform_input(),
        tail.reference_area_ft2,
    )?;
    ensure_finite("vertical tail base y", tail.base_y_in)
}

fn validate_conditions(conditions: &RunConditions) -> Result<(), ConfigError> {
    if conditions.mach_numbers.is_empty() {
        return Err(ConfigError::EmptyConditionList("Mach number"));
    }
    if conditions.alphas_deg.is_empty() {
        return Err(ConfigError::EmptyConditionList("angle of attack"));
    }
    for &mach in &conditions.mach_numbers {
        ensure_finite("Mach number", mach)?;
    }
    for &alpha in &conditions.alphas_deg {
        ensure_finite("angle of attack", alpha)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_configurations_are_valid() {
        AircraftConfig::new(RawAircraftConfig::reference_transport()).expect("transport valid");
        AircraftConfig::new(RawAircraftConfig::discoidal_demo()).expect("discoidal valid");
    }

    #[test]
    fn station_six_is_the_tip() {
        let stations = RawAircraftConfig::reference_transport()
            .wing
            .stations
            .stations();
        assert_eq!(stations[5].span_fraction, 1.0);
        assert_eq!(stations[5].sweep_increment_deg, 0.0);
        assert_eq!(stations[0].sweep_increment_deg, 5.0);
        assert_eq!(stations[4].sweep_increment_deg, 45.0);
    }

    #[test]
    fn non_monotonic_stations_are_rejected() {
        let mut raw = RawAircraftConfig::reference_transport();
        raw.wing.stations.span_fractions = [0.1, 0.5, 0.4, 0.8, 0.9];
        let error = AircraftConfig::new(raw).expect_err("decreasing fraction rejected");
        assert_eq!(
            error,
            ConfigError::NonMonotonicStations {
                surface: Surface::Wing,
                station: 3,
                previous: 0.5,
                fraction: 0.4,
            }
        );
    }

    #[test]
    fn span_fraction_beyond_tip_is_rejected() {
        let mut raw = RawAircraftConfig::reference_transport();
        raw.wing.stations.span_fractions[4] = 1.2;
        let error = AircraftConfig::new(raw).expect_err("fraction above one rejected");
        assert!(matches!(
            error,
            ConfigError::SpanFractionOutOfRange { station: 5, .. }
        ));
    }

    #[test]
    fn taper_outside_unit_interval_is_rejected() {
        for taper in [0.0, -0.5, 1.5] {
            let mut raw = RawAircraftConfig::reference_transport();
            raw.horizontal_tail.taper_ratio = taper;
            let error = AircraftConfig::new(raw).expect_err("taper rejected");
            assert_eq!(
                error,
                ConfigError::TaperOutOfRange {
                    surface: Surface::HorizontalTail,
                    taper,
                }
            );
        }
    }

    #[test]
    fn disabled_tails_are_not_validated() {
        let mut raw = RawAircraftConfig::reference_transport();
        raw.horizontal_tail.mode = HorizontalTailMode::Off;
        raw.horizontal_tail.reference_area_ft2 = 0.0;
        raw.vertical_tail.mode = VerticalTailMode::Off;
        raw.vertical_tail.aspect_ratio = -1.0;
        AircraftConfig::new(raw).expect("inactive surfaces ignored");
    }

    #[test]
    fn split_tail_requires_discoidal_topology() {
        let mut raw = RawAircraftConfig::reference_transport();
        raw.horizontal_tail.mode = HorizontalTailMode::Split;
        let error = AircraftConfig::new(raw).expect_err("split tail rejected");
        assert_eq!(
            error,
            ConfigError::UnsupportedForTopology {
                feature: "split horizontal tail",
                topology: "conventional",
            }
        );
    }

    #[test]
    fn segment_sweep_at_ninety_degrees_is_rejected() {
        let mut raw = RawAircraftConfig::reference_transport();
        raw.wing.stations.sweep_increments_deg[4] = 62.25;
        let error = AircraftConfig::new(raw).expect_err("pole rejected");
        assert!(matches!(error, ConfigError::AngleOutOfRange { .. }));
    }

    #[test]
    fn elevon_station_range_is_checked() {
        let mut raw = RawAircraftConfig::discoidal_demo();
        if let Topology::Discoidal {
            elevons: Some(elevons),
            ..
        } = &mut raw.topology
        {
            elevons.inboard_station = 4;
            elevons.outboard_station = 4;
        }
        let error = AircraftConfig::new(raw).expect_err("empty range rejected");
        assert_eq!(
            error,
            ConfigError::InvalidControlStations {
                inboard: 4,
                outboard: 4,
            }
        );
    }

    #[test]
    fn empty_mach_list_is_rejected() {
        let mut raw = RawAircraftConfig::reference_transport();
        raw.conditions.mach_numbers.clear();
        let error = AircraftConfig::new(raw).expect_err("empty list rejected");
        assert_eq!(error, ConfigError::EmptyConditionList("Mach number"));
    }

    #[test]
    fn nan_inputs_are_rejected() {
        let mut raw = RawAircraftConfig::reference_transport();
        raw.wing.stations.shears_in[2] = f64::NAN;
        let error = AircraftConfig::new(raw).expect_err("NaN rejected");
        assert!(matches!(
            error,
            ConfigError::NotFinite {
                field: "station shear",
                ..
            }
        ));
    }

    #[test]
    fn twin_fins_follow_tilt_and_offset() {
        let mut tail = RawAircraftConfig::reference_transport().vertical_tail;
        assert_eq!(tail.quantity(), 1);
        tail.tilt_deg = 5.0;
        assert_eq!(tail.quantity(), 2);
        tail.tilt_deg = 0.0;
        tail.base_y_in = 30.0;
        assert_eq!(tail.quantity(), 2);
        tail.base_y_in = -30.0;
        assert_eq!(tail.quantity(), 1);
    }

    #[test]
    fn differential_deflection_mirrors_left_side() {
        assert_eq!(Deflection::Differential.left_incidence_deg(0.0, 3.0), -3.0);
        assert_eq!(Deflection::Collective.left_incidence_deg(0.0, 3.0), 3.0);
        assert_eq!(Deflection::Differential.left_incidence_deg(1.0, 5.0), -4.0);
    }
}
