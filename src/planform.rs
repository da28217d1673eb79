//! Closed-form trapezoidal planform relations.
//!
//! The same formulas serve the wing, the horizontal tail and the vertical
//! tail. A mirrored surface uses half its span as the semi-span; a fin is
//! single sided and uses its whole height.

use serde::Serialize;
use tracing::debug;
use uom::si::angle::{degree, radian};
use uom::si::area::{square_foot, square_inch};
use uom::si::f64::{Angle, Area};

use crate::config::Surface;
use crate::errors::GeometryError;

/// Convert degrees to radians.
#[must_use]
pub fn radians(degrees: f64) -> f64 {
    Angle::new::<degree>(degrees).get::<radian>()
}

/// Convert radians to degrees.
#[must_use]
pub fn degrees(radians: f64) -> f64 {
    Angle::new::<radian>(radians).get::<degree>()
}

/// Convert an area in square feet to square inches.
#[must_use]
pub fn square_inches(square_feet: f64) -> f64 {
    Area::new::<square_foot>(square_feet).get::<square_inch>()
}

/// Whether a surface is mirrored about the plane of symmetry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SpanMode {
    /// Left and right halves; the semi-span is half the span.
    Mirrored,
    /// A single fin; the semi-span is the full span.
    SingleSided,
}

/// Inputs of the trapezoidal planform relations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanformInput {
    /// Reference area in square inches.
    pub reference_area: f64,
    /// Aspect ratio.
    pub aspect_ratio: f64,
    /// Tip chord over root chord.
    pub taper_ratio: f64,
    /// Leading-edge sweep in degrees.
    pub sweep_le_deg: f64,
    /// Dihedral (or fin tilt) in degrees.
    pub dihedral_deg: f64,
    /// Longitudinal apex position in inches.
    pub apex_x: f64,
    /// Moment reference point as a percentage of the MAC.
    pub mrp_mac_pct: f64,
}

impl PlanformInput {
    /// Build inputs from a reference area given in square feet.
    #[must_use]
    pub fn from_square_feet(
        reference_area_ft2: f64,
        aspect_ratio: f64,
        taper_ratio: f64,
        sweep_le_deg: f64,
        dihedral_deg: f64,
        apex_x: f64,
        mrp_mac_pct: f64,
    ) -> Self {
        Self {
            reference_area: square_inches(reference_area_ft2),
            aspect_ratio,
            taper_ratio,
            sweep_le_deg,
            dihedral_deg,
            apex_x,
            mrp_mac_pct,
        }
    }

    /// Tip-to-tip span, `sqrt(S·AR)`.
    #[must_use]
    pub fn span(&self) -> f64 {
        (self.reference_area * self.aspect_ratio).sqrt()
    }
}

/// Derived dimensions of a trapezoidal planform, in inches and degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Planform {
    /// Reference area in square inches.
    pub reference_area: f64,
    /// Tip-to-tip span (fin height for single-sided surfaces).
    pub span: f64,
    /// Root-to-tip distance used by the spanwise relations.
    pub semi_span: f64,
    /// Root chord of the trapezoid.
    pub root_chord: f64,
    /// Tip chord of the trapezoid.
    pub tip_chord: f64,
    /// Mean aerodynamic chord.
    pub mac: f64,
    /// Reference leading-edge sweep.
    pub sweep_le_deg: f64,
    /// Sweep of the quarter-chord line.
    pub quarter_chord_sweep_deg: f64,
    /// Distance of the MAC from the root along the span.
    pub mac_station: f64,
    /// Longitudinal position of the MAC leading edge.
    pub mac_leading_edge_x: f64,
    /// Longitudinal position of the moment reference point.
    pub mrp_x: f64,
    /// Vertical position of the moment reference point above the root.
    pub mrp_z: f64,
}

impl Planform {
    /// Evaluate the planform relations.
    ///
    /// `root_offset` is the spanwise position where the dihedral line starts,
    /// normally the fuselage half width.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonFinite`] when a relation evaluates to NaN or
    /// infinity, which only happens if the inputs escaped validation.
    ///
    /// # Examples
    /// ```
    /// use vlmdeck::{Planform, PlanformInput, SpanMode, Surface};
    ///
    /// let input = PlanformInput::from_square_feet(100.0, 8.0, 1.0, 0.0, 0.0, 0.0, 25.0);
    /// let planform = Planform::compute(Surface::Wing, &input, SpanMode::Mirrored, 0.0)
    ///     .expect("valid planform");
    /// assert!((planform.root_chord - planform.mac).abs() < 1e-9);
    /// ```
    pub fn compute(
        surface: Surface,
        input: &PlanformInput,
        mode: SpanMode,
        root_offset: f64,
    ) -> Result<Self, GeometryError> {
        let taper = input.taper_ratio;
        let span = input.span();
        let semi_span = match mode {
            SpanMode::Mirrored => span / 2.0,
            SpanMode::SingleSided => span,
        };
        let tan_sweep = radians(input.sweep_le_deg).tan();

        let root_chord = 2.0 * input.reference_area / span / (1.0 + taper);
        let tip_chord = root_chord * taper;
        let mac = 2.0 / 3.0 * root_chord * (1.0 + taper + taper * taper) / (1.0 + taper);
        let quarter_chord_sweep_deg = degrees(
            ((semi_span * tan_sweep + tip_chord / 4.0 - root_chord / 4.0) / semi_span).atan(),
        );
        let centroid = (1.0 + 2.0 * taper) / (3.0 * (1.0 + taper));
        let mac_station = semi_span * centroid;
        let mac_leading_edge_x = input.apex_x + semi_span * tan_sweep * centroid;
        let mrp_x = mac_leading_edge_x + mac * input.mrp_mac_pct / 100.0;
        let mrp_z = (mac_station - root_offset) * radians(input.dihedral_deg).tan();

        let planform = Self {
            reference_area: input.reference_area,
            span,
            semi_span,
            root_chord,
            tip_chord,
            mac,
            sweep_le_deg: input.sweep_le_deg,
            quarter_chord_sweep_deg,
            mac_station,
            mac_leading_edge_x,
            mrp_x,
            mrp_z,
        };
        planform.ensure_finite(surface)?;
        debug!(
            %surface,
            span,
            root_chord,
            tip_chord,
            mac,
            mrp_x,
            "derived planform"
        );
        Ok(planform)
    }

    /// Chord of the trapezoid at a fraction of the semi-span.
    #[must_use]
    pub fn chord_at(&self, span_fraction: f64) -> f64 {
        self.root_chord - span_fraction * (self.root_chord - self.tip_chord)
    }

    /// Check every derived quantity for NaN or infinity.
    fn ensure_finite(&self, surface: Surface) -> Result<(), GeometryError> {
        let quantities = [
            ("span", self.span),
            ("root chord", self.root_chord),
            ("tip chord", self.tip_chord),
            ("mean aerodynamic chord", self.mac),
            ("quarter-chord sweep", self.quarter_chord_sweep_deg),
            ("MAC station", self.mac_station),
            ("moment reference x", self.mrp_x),
            ("moment reference z", self.mrp_z),
        ];
        for (quantity, value) in quantities {
            if !value.is_finite() {
                return Err(GeometryError::NonFinite {
                    surface,
                    quantity,
                    value,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::config::RawAircraftConfig;

    fn transport_wing() -> Planform {
        let raw = RawAircraftConfig::reference_transport();
        let input = raw.wing.planform_input();
        let root_offset = raw.wing.stations.span_fractions[0] * input.span() / 2.0;
        Planform::compute(Surface::Wing, &input, SpanMode::Mirrored, root_offset)
            .expect("transport wing is valid")
    }

    #[test]
    fn unit_conversions() {
        assert_relative_eq!(square_inches(1.0), 144.0, epsilon = 1e-9);
        assert_relative_eq!(radians(180.0), std::f64::consts::PI, epsilon = 1e-12);
        assert_relative_eq!(degrees(std::f64::consts::FRAC_PI_2), 90.0, epsilon = 1e-9);
    }

    #[test]
    fn transport_wing_matches_hand_calculation() {
        let wing = transport_wing();
        assert_relative_eq!(wing.reference_area, 193_125.6, epsilon = 1e-6);
        assert_relative_eq!(wing.span, 1350.939, epsilon = 1e-3);
        assert_relative_eq!(wing.root_chord, 223.719, epsilon = 1e-3);
        assert_relative_eq!(wing.tip_chord, 62.194, epsilon = 1e-3);
        assert_relative_eq!(wing.mac, 158.165, epsilon = 1e-3);
        assert_relative_eq!(wing.quarter_chord_sweep_deg, 25.002, epsilon = 1e-3);
        assert_relative_eq!(wing.mac_station, 274.134, epsilon = 1e-3);
        assert_relative_eq!(wing.mrp_x, 733.770, epsilon = 1e-3);
        assert_relative_eq!(wing.mrp_z, 8.738, epsilon = 1e-3);
    }

    #[test]
    fn single_sided_surface_uses_full_height() {
        let raw = RawAircraftConfig::reference_transport();
        let fin = Planform::compute(
            Surface::VerticalTail,
            &raw.vertical_tail.planform_input(),
            SpanMode::SingleSided,
            0.0,
        )
        .expect("fin is valid");
        assert_eq!(fin.semi_span, fin.span);
        assert_relative_eq!(fin.span, 278.016, epsilon = 1e-3);
        assert_relative_eq!(fin.root_chord, 196.870, epsilon = 1e-3);
        assert_relative_eq!(fin.quarter_chord_sweep_deg, 30.030, epsilon = 1e-3);
        assert_relative_eq!(fin.mac_station, 114.602, epsilon = 1e-3);
        assert_relative_eq!(fin.mrp_x, 1415.464, epsilon = 1e-3);
    }

    #[test]
    fn mac_lies_between_tip_and_root() {
        for taper in [0.05, 0.2, 0.278, 0.5, 0.75, 0.99] {
            let input = PlanformInput::from_square_feet(250.0, 6.0, taper, 30.0, 3.0, 0.0, 25.0);
            let planform = Planform::compute(Surface::Wing, &input, SpanMode::Mirrored, 0.0)
                .expect("valid planform");
            assert!(planform.root_chord >= planform.tip_chord);
            assert!(planform.mac > planform.tip_chord);
            assert!(planform.mac < planform.root_chord);
        }
    }

    #[test]
    fn untapered_planform_is_rectangular() {
        let input = PlanformInput::from_square_feet(100.0, 4.0, 1.0, 0.0, 0.0, 10.0, 25.0);
        let planform =
            Planform::compute(Surface::Wing, &input, SpanMode::Mirrored, 0.0).expect("valid");
        assert_relative_eq!(planform.root_chord, planform.tip_chord, epsilon = 1e-9);
        assert_relative_eq!(planform.mac, planform.root_chord, epsilon = 1e-9);
        assert_relative_eq!(planform.quarter_chord_sweep_deg, 0.0, epsilon = 1e-9);
        assert_relative_eq!(planform.mac_station, planform.semi_span / 2.0, epsilon = 1e-9);
        assert_relative_eq!(planform.mrp_x, 10.0 + planform.mac / 4.0, epsilon = 1e-9);
    }

    #[test]
    fn trapezoid_area_is_recovered() {
        let wing = transport_wing();
        let area = wing.span * (wing.root_chord + wing.tip_chord) / 2.0;
        assert_relative_eq!(area, wing.reference_area, epsilon = 1e-6);
    }

    #[test]
    fn chord_interpolates_linearly() {
        let wing = transport_wing();
        assert_relative_eq!(wing.chord_at(0.0), wing.root_chord);
        assert_relative_eq!(wing.chord_at(1.0), wing.tip_chord, epsilon = 1e-9);
        assert_relative_eq!(
            wing.chord_at(0.5),
            (wing.root_chord + wing.tip_chord) / 2.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn degenerate_input_is_reported() {
        let input = PlanformInput {
            reference_area: 0.0,
            aspect_ratio: 0.0,
            taper_ratio: 0.5,
            sweep_le_deg: 0.0,
            dihedral_deg: 0.0,
            apex_x: 0.0,
            mrp_mac_pct: 25.0,
        };
        let error = Planform::compute(Surface::Wing, &input, SpanMode::Mirrored, 0.0)
            .expect_err("zero span rejected");
        assert!(matches!(error, GeometryError::NonFinite { .. }));
    }
}
