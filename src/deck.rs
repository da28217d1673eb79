//! The complete deck value, built once per configuration.

use serde::Serialize;
use tracing::debug;

use crate::config::{
    AircraftConfig, HorizontalTailMode, RunConditions, Surface, VerticalTailMode,
};
use crate::echo::EchoBlock;
use crate::errors::DeckError;
use crate::geometry::ResolvedPoint;
use crate::metrics::{
    expected_panel_count, horizontal_tail_volume, vertical_tail_volume, DerivedMetrics,
    ReferenceQuantities, TailSummary,
};
use crate::panels::{assemble, ElevonSplit, Panel, SurfaceLayout};
use crate::planform::{Planform, SpanMode};
use crate::stations::{resolve_chain, resolve_fin, ControlStation, FinLayout, SurfaceDatum};

/// Solver run-control constants.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RunControl {
    /// Solution method (ISOLV).
    pub solver: i32,
    /// Longitudinal axis flag (LAX).
    pub lax: i32,
    /// Lateral axis flag (LAY).
    pub lay: i32,
    /// Expansion parameter (REXPAR).
    pub expansion: f64,
    /// Height above ground (HAG).
    pub height_above_ground: f64,
    /// Wake float in x (FLOATX).
    pub float_x: f64,
    /// Wake float in y (FLOATY).
    pub float_y: f64,
    /// Iteration limit (ITRMAX).
    pub max_iterations: i32,
    /// Lateral solution flag (LATRL).
    pub lateral: i32,
    /// Sideslip angle (PSI).
    pub sideslip: f64,
    /// Pitch rate (PITCHQ).
    pub pitch_rate: f64,
    /// Roll rate (ROLLQ).
    pub roll_rate: f64,
    /// Yaw rate (YAWQ).
    pub yaw_rate: f64,
    /// Free-stream velocity (VINF).
    pub velocity: f64,
}

impl Default for RunControl {
    fn default() -> Self {
        Self {
            solver: 0,
            lax: 0,
            lay: 1,
            expansion: 0.1,
            height_above_ground: 0.0,
            float_x: 0.0,
            float_y: 0.0,
            max_iterations: 99,
            lateral: 0,
            sideslip: 0.0,
            pitch_rate: 0.0,
            roll_rate: 0.0,
            yaw_rate: 0.0,
            velocity: 1.0,
        }
    }
}

/// Ordered panels plus everything printed around them.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Deck {
    /// Title line.
    pub title: String,
    /// Echo of every input parameter.
    pub echo: EchoBlock,
    /// Run-control constants.
    pub run_control: RunControl,
    /// Mach and angle-of-attack sweep.
    pub conditions: RunConditions,
    /// Derived planforms and reference quantities.
    pub metrics: DerivedMetrics,
    /// Panels in deck order.
    pub panels: Vec<Panel>,
}

impl Deck {
    /// Derive every surface and assemble the panels of a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::Config`] when stations or the elevon hinge line do
    /// not fit the derived geometry, and [`DeckError::Geometry`] when a derived
    /// quantity is not finite.
    ///
    /// # Examples
    /// ```
    /// use vlmdeck::{AircraftConfig, Deck, RawAircraftConfig};
    ///
    /// let config = AircraftConfig::new(RawAircraftConfig::reference_transport())?;
    /// let deck = Deck::build(&config)?;
    /// assert_eq!(deck.panels.len(), 9);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn build(config: &AircraftConfig) -> Result<Self, DeckError> {
        let wing_config = config.wing();
        let wing_input = wing_config.planform_input();
        let stations = wing_config.stations.stations();
        let half_width = stations[0].span_fraction * wing_input.span() / 2.0;

        let wing = Planform::compute(Surface::Wing, &wing_input, SpanMode::Mirrored, half_width)?;
        let wing_points = resolve_chain(
            Surface::Wing,
            &wing,
            &SurfaceDatum {
                apex_x: wing_input.apex_x,
                dihedral_deg: wing_input.dihedral_deg,
            },
            &stations,
        )?;
        let elevons = config
            .elevons()
            .map(|elevons| ElevonSplit::new(elevons, &wing_points))
            .transpose()?;

        let horizontal = config.horizontal_tail();
        let mut horizontal_summary = None;
        let mut horizontal_layout = None;
        if horizontal.mode != HorizontalTailMode::Off {
            let input = horizontal.planform_input();
            let planform =
                Planform::compute(Surface::HorizontalTail, &input, SpanMode::Mirrored, half_width)?;
            let incidence = horizontal.incidence_deg;
            let chain = [
                ControlStation::plain(half_width / planform.semi_span, incidence),
                ControlStation::plain(1.0, incidence),
            ];
            let points = resolve_chain(
                Surface::HorizontalTail,
                &planform,
                &SurfaceDatum {
                    apex_x: input.apex_x,
                    dihedral_deg: input.dihedral_deg,
                },
                &chain,
            )?;
            if let [root, tip] = points.as_slice() {
                horizontal_layout = Some((horizontal.mode, horizontal.deflection, [*root, *tip]));
            }
            horizontal_summary = Some(TailSummary::new(
                Surface::HorizontalTail,
                planform,
                planform.mac_station,
                horizontal_tail_volume(&wing, &planform),
            ));
        }

        let vertical = config.vertical_tail();
        let mut vertical_summary = None;
        let mut vertical_layout: Option<([ResolvedPoint; 2], u32)> = None;
        if vertical.mode != VerticalTailMode::Off {
            let planform = Planform::compute(
                Surface::VerticalTail,
                &vertical.planform_input(),
                SpanMode::SingleSided,
                0.0,
            )?;
            let fuselage_height = config.fuselage().map_or(0.0, |fuselage| fuselage.height_in);
            let fin = FinLayout::new(vertical.mode, fuselage_height);
            vertical_layout = Some((resolve_fin(&planform, vertical, &fin), vertical.quantity()));
            vertical_summary = Some(TailSummary::new(
                Surface::VerticalTail,
                planform,
                fin.height_at(planform.mac_station),
                vertical_tail_volume(&wing, &planform),
            ));
        }

        let panels = assemble(&SurfaceLayout {
            fuselage: config.fuselage(),
            wing: &wing_points,
            elevons: elevons.as_ref(),
            horizontal_tail: horizontal_layout,
            vertical_tail: vertical_layout,
        });
        debug_assert_eq!(panels.len(), expected_panel_count(config));
        debug!(
            project = config.project(),
            topology = config.topology().name(),
            panels = panels.len(),
            "built deck"
        );

        Ok(Self {
            title: "Auto Generated VORLAX Case".to_string(),
            echo: EchoBlock::parameters(config),
            run_control: RunControl::default(),
            conditions: config.conditions().clone(),
            metrics: DerivedMetrics {
                wing,
                horizontal_tail: horizontal_summary,
                vertical_tail: vertical_summary,
                reference: ReferenceQuantities::from(&wing),
                panel_count: panels.len(),
            },
            panels,
        })
    }
}
