//! Fixed-column serialisation of a [`Deck`].
//!
//! The solver reads its input by position, so every width below is part of
//! the file format. Geometry uses three decimals and incidence tangents five.

use std::fmt::{self, Write};

use crate::deck::{Deck, RunControl};
use crate::echo::EchoBlock;
use crate::metrics::ReferenceQuantities;
use crate::panels::{Panel, SurfaceKind};

/// Flags printed with every panel after the incidences: ITS, NAP, ISYNT, NPP.
const PANEL_FLAGS: [u32; 4] = [0, 0, 0, 0];

/// Render a deck as the solver input text.
///
/// # Examples
/// ```
/// use vlmdeck::{render_deck, AircraftConfig, Deck, RawAircraftConfig};
///
/// let config = AircraftConfig::new(RawAircraftConfig::reference_transport())?;
/// let text = render_deck(&Deck::build(&config)?);
/// assert!(text.starts_with("Auto Generated VORLAX Case\n"));
/// assert!(text.ends_with("********* End VORLAX Input Deck *********\n"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[must_use]
pub fn render_deck(deck: &Deck) -> String {
    deck.to_string()
}

/// Negative zero prints as `-0.000`; the solver deck never carries it.
fn unsigned_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

impl fmt::Display for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "*")?;
        writeln!(f, "********* Begin Echo Parametric Inputs *********")?;
        write_block(f, &self.echo)?;
        writeln!(f, "********* End Echo Parametric Inputs *********")?;
        writeln!(f)?;
        writeln!(f)?;

        writeln!(f, "********* Begin VORLAX Input Deck *********")?;
        write_run_control(f, &self.run_control)?;
        writeln!(f, "*NMACH          MACH")?;
        write_sweep(f, &self.conditions.mach_numbers)?;
        writeln!(f, "*NALPHA        ALPHA")?;
        write_sweep(f, &self.conditions.alphas_deg)?;
        write_lateral(f, &self.run_control)?;
        write_reference(f, self.metrics.panel_count, &self.metrics.reference)?;
        writeln!(f, "*")?;

        for group in self.panels.chunk_by(|a, b| a.kind == b.kind) {
            let kind = group[0].kind;
            self.write_section_header(f, kind)?;
            for panel in group {
                write_panel(f, panel)?;
            }
        }

        writeln!(f, "* NXS   NYS   NZS")?;
        writeln!(f, "     0       0      0")?;
        writeln!(f, "* END")?;
        writeln!(f, "********* End VORLAX Input Deck *********")
    }
}

impl Deck {
    /// Section banner, derived data and input caption ahead of a panel group.
    fn write_section_header(&self, f: &mut impl Write, kind: SurfaceKind) -> fmt::Result {
        match kind {
            SurfaceKind::Fuselage => {
                writeln!(f, "*** FUSELAGE PANELS ***")?;
                writeln!(f, "*VORLAX inputs for fuselage:")
            }
            SurfaceKind::Wing => {
                writeln!(f, "*** WING PANELS ***")?;
                write_block(f, &EchoBlock::derived_wing(&self.metrics.wing))?;
                writeln!(f, "*VORLAX inputs for Wing:")
            }
            SurfaceKind::HorizontalTail => {
                writeln!(f, "*** HORIZONTAL TAIL PANEL ***")?;
                if let Some(tail) = &self.metrics.horizontal_tail {
                    write_block(f, &EchoBlock::derived_tail("Horizontal Tail", 'y', tail))?;
                }
                writeln!(f, "*VORLAX inputs for Horizontal Tail:")
            }
            SurfaceKind::VerticalTail => {
                writeln!(f, "*** VERTICAL TAIL PANEL ***")?;
                if let Some(tail) = &self.metrics.vertical_tail {
                    write_block(f, &EchoBlock::derived_tail("Vertical Tail", 'z', tail))?;
                }
                writeln!(f, "*VORLAX inputs for Vertical Tail:")
            }
            SurfaceKind::Elevon => {
                writeln!(f, "*** ELEVON PANELS ***")?;
                writeln!(f, "*VORLAX inputs for elevons:")
            }
        }
    }
}

fn write_block(f: &mut impl Write, block: &EchoBlock) -> fmt::Result {
    for line in &block.lines {
        writeln!(f, "{}", line.render())?;
    }
    Ok(())
}

fn write_run_control(f: &mut impl Write, control: &RunControl) -> fmt::Result {
    writeln!(
        f,
        "*ISOLV       LAX       LAY    REXPAR      HAG    FLOATX    FLOATY    ITRMAX"
    )?;
    writeln!(
        f,
        "{:>6}{:>10}{:>10}{:>10.2}{:>10.2}{:>10.2}{:>10.2}{:>10}",
        control.solver,
        control.lax,
        control.lay,
        control.expansion,
        control.height_above_ground,
        control.float_x,
        control.float_y,
        control.max_iterations
    )
}

fn write_lateral(f: &mut impl Write, control: &RunControl) -> fmt::Result {
    writeln!(
        f,
        "*    LATRL       PSI    PITCHQ     ROLLQ      YAWQ      VINF"
    )?;
    writeln!(
        f,
        "{:>10}{:>10.2}{:>10.2}{:>10.2}{:>10.2}{:>10.1}",
        control.lateral,
        control.sideslip,
        control.pitch_rate,
        control.roll_rate,
        control.yaw_rate,
        control.velocity
    )
}

/// Count, then the first value in a wide field and the rest in ten columns.
fn write_sweep(f: &mut impl Write, values: &[f64]) -> fmt::Result {
    write!(f, "{:>6}", values.len())?;
    for (idx, value) in values.iter().enumerate() {
        let width = if idx == 0 { 14 } else { 10 };
        write!(f, "{:>width$.3}", unsigned_zero(*value))?;
    }
    writeln!(f)
}

fn write_reference(
    f: &mut impl Write,
    panel_count: usize,
    reference: &ReferenceQuantities,
) -> fmt::Result {
    writeln!(
        f,
        "*NPAN           SREF      CBAR      XBAR      ZBAR     WSPAN"
    )?;
    writeln!(
        f,
        "{:2}        {:10.2}{:10.2}{:10.2}{:10.2}{:10.2}",
        panel_count,
        reference.area,
        reference.chord,
        reference.mrp_x,
        unsigned_zero(reference.mrp_z),
        reference.span
    )
}

fn write_panel(f: &mut impl Write, panel: &Panel) -> fmt::Result {
    writeln!(
        f,
        "*       X1        Y1        Z1     CORD1 COMMENT: {}",
        panel.label
    )?;
    write_corner(f, panel, true)?;
    writeln!(f, "*       X2        Y2        Z2     CORD2")?;
    write_corner(f, panel, false)?;

    let grid = &panel.discretization;
    writeln!(f, "*     NVOR      RNCV       SPC       PDL")?;
    writeln!(
        f,
        "{:>10}{:>10.2}{:>10.2}{:>10.2}",
        grid.vortex_count, grid.spanwise_control, grid.spacing, grid.edge_suction
    )?;

    let [its, nap, isynt, npp] = PANEL_FLAGS;
    writeln!(
        f,
        "*    AINC1     AINC2       ITS       NAP    IQUANT     ISYNT       NPP"
    )?;
    writeln!(
        f,
        "{:>10.5}{:>10.5}{:>10}{:>10}{:>10}{:>10}{:>10}",
        unsigned_zero(panel.inboard.incidence_tangent()),
        unsigned_zero(panel.outboard.incidence_tangent()),
        its,
        nap,
        panel.quantity,
        isynt,
        npp
    )?;
    writeln!(f, "*")
}

fn write_corner(f: &mut impl Write, panel: &Panel, inboard: bool) -> fmt::Result {
    let corner = if inboard { &panel.inboard } else { &panel.outboard };
    writeln!(
        f,
        "{:10.3}{:10.3}{:10.3}{:10.3}",
        unsigned_zero(corner.position.x),
        unsigned_zero(corner.position.y),
        unsigned_zero(corner.position.z),
        corner.chord
    )
}
