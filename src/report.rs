use std::fmt;

use vlmdeck::{surface_instances, AircraftConfig, Deck, SurfaceKind};

/// Surface groups in deck order, with their summary captions.
const GROUPS: [(SurfaceKind, &str); 5] = [
    (SurfaceKind::Fuselage, "fuselage"),
    (SurfaceKind::Wing, "wing"),
    (SurfaceKind::HorizontalTail, "horizontal tail"),
    (SurfaceKind::VerticalTail, "vertical tail"),
    (SurfaceKind::Elevon, "elevons"),
];

/// Human-readable run summary.
struct Summary<'a> {
    config: &'a AircraftConfig,
    deck: &'a Deck,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let metrics = &self.deck.metrics;
        let wing = &metrics.wing;

        writeln!(
            f,
            "Vortex-lattice deck for {} ({} topology)",
            self.config.project(),
            self.config.topology().name()
        )?;

        // Reference quantities are what the solver normalises coefficients by,
        // so they are the first thing to check against a drawing.
        writeln!(
            f,
            "Wing: span {:.3} in, root chord {:.3} in, tip chord {:.3} in, MAC {:.3} in",
            wing.span, wing.root_chord, wing.tip_chord, wing.mac
        )?;
        writeln!(
            f,
            "Moment reference point: x = {:.3} in, z = {:.3} in",
            wing.mrp_x, wing.mrp_z
        )?;

        if let Some(tail) = &metrics.horizontal_tail {
            writeln!(
                f,
                "Horizontal tail: span {:.3} in, volume coefficient {:.5}",
                tail.planform.span, tail.volume_coefficient
            )?;
        }
        if let Some(tail) = &metrics.vertical_tail {
            writeln!(
                f,
                "Vertical tail: height {:.3} in, volume coefficient {:.5}",
                tail.planform.span, tail.volume_coefficient
            )?;
        }

        writeln!(f, "Panel records (NPAN): {}", metrics.panel_count)?;
        for (kind, caption) in GROUPS {
            let instances = surface_instances(&self.deck.panels, kind);
            if instances > 0 {
                writeln!(f, "  {caption}: {instances}")?;
            }
        }
        Ok(())
    }
}

/// Render a textual summary of a generated deck.
#[must_use]
pub fn render_summary(config: &AircraftConfig, deck: &Deck) -> String {
    Summary { config, deck }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vlmdeck::RawAircraftConfig;

    #[test]
    fn formats_human_readable_report() {
        let config =
            AircraftConfig::new(RawAircraftConfig::reference_transport()).expect("valid");
        let deck = Deck::build(&config).expect("builds");
        let report = render_summary(&config, &deck);
        assert!(report.contains("conventional topology"));
        assert!(report.contains("span 1350.939 in"));
        assert!(report.contains("volume coefficient 1.14257"));
        assert!(report.contains("Panel records (NPAN): 9"));
        assert!(!report.contains("elevons:"));
    }

    #[test]
    fn twin_fin_reports_two_instances() {
        let config = AircraftConfig::new(RawAircraftConfig::discoidal_demo()).expect("valid");
        let deck = Deck::build(&config).expect("builds");
        let report = render_summary(&config, &deck);
        assert!(report.contains("  vertical tail: 2\n"));
        assert!(report.contains("  elevons: 4\n"));
        assert!(!report.contains("fuselage:"));
    }
}
