#![warn(clippy::pedantic)]

use approx::assert_relative_eq;
use vlmdeck::{
    expected_panel_count, generate, surface_instances, AircraftConfig, Deck, Deflection,
    HorizontalTailMode, RawAircraftConfig, SurfaceKind, Topology, VerticalTailMode,
};

fn build(raw: RawAircraftConfig) -> (AircraftConfig, Deck, String) {
    let config = AircraftConfig::new(raw).expect("valid configuration");
    let (deck, text) = generate(&config).expect("deck builds");
    (config, deck, text)
}

/// NPAN as printed on the reference line.
fn printed_panel_count(text: &str) -> usize {
    let mut lines = text.lines();
    lines
        .find(|line| line.starts_with("*NPAN"))
        .and_then(|_| lines.next())
        .and_then(|line| line.get(..2))
        .and_then(|count| count.trim().parse().ok())
        .expect("NPAN line present")
}

#[test]
fn panel_count_matrix_over_tail_activation() {
    let horizontal_modes = [HorizontalTailMode::Off, HorizontalTailMode::Symmetric];
    let vertical_cases = [
        (VerticalTailMode::Off, 0.0, 0),
        (VerticalTailMode::Dorsal, 0.0, 1),
        (VerticalTailMode::Dorsal, 5.0, 2),
        (VerticalTailMode::Ventral, 0.0, 1),
    ];
    for horizontal in horizontal_modes {
        for (vertical, tilt, fins) in vertical_cases {
            let mut raw = RawAircraftConfig::reference_transport();
            raw.horizontal_tail.mode = horizontal;
            raw.vertical_tail.mode = vertical;
            raw.vertical_tail.tilt_deg = tilt;
            let (config, deck, text) = build(raw);

            let expected = expected_panel_count(&config);
            assert_eq!(deck.panels.len(), expected);
            assert_eq!(printed_panel_count(&text), expected);
            assert_eq!(text.matches("COMMENT:").count(), expected);
            assert_eq!(surface_instances(&deck.panels, SurfaceKind::VerticalTail), fins);
        }
    }
}

#[test]
fn horizontal_tail_off_removes_its_records() {
    let mut raw = RawAircraftConfig::reference_transport();
    raw.horizontal_tail.mode = HorizontalTailMode::Off;
    let (_, deck, text) = build(raw);
    assert_eq!(printed_panel_count(&text), 8);
    assert!(!text.contains("HORIZONTAL TAIL PANEL"));
    assert!(text.contains("* isHTailOn:                   0 # OFF=0; ON=1"));
    assert!(deck.metrics.horizontal_tail.is_none());
}

#[test]
fn tilted_fin_is_one_record_with_two_images() {
    let mut raw = RawAircraftConfig::reference_transport();
    raw.vertical_tail.tilt_deg = 5.0;
    let (_, deck, _) = build(raw);
    let fins: Vec<_> = deck
        .panels
        .iter()
        .filter(|panel| panel.kind == SurfaceKind::VerticalTail)
        .collect();
    assert_eq!(fins.len(), 1);
    assert_eq!(fins[0].quantity, 2);
}

#[test]
fn discoidal_deck_orders_every_group() {
    let (config, deck, text) = build(RawAircraftConfig::discoidal_demo());
    assert_eq!(deck.panels.len(), expected_panel_count(&config));
    assert!(!text.contains("FUSELAGE PANEL"));

    let banners: Vec<_> = text
        .lines()
        .filter(|line| line.starts_with("*** ") && line.ends_with(" ***"))
        .collect();
    assert_eq!(
        banners,
        [
            "*** WING ***",
            "*** HORIZONTAL TAIL ***",
            "*** VERTICAL TAIL ***",
            "*** ELEVONS ***",
            "*** WING PANELS ***",
            "*** HORIZONTAL TAIL PANEL ***",
            "*** VERTICAL TAIL PANEL ***",
            "*** ELEVON PANELS ***",
        ]
    );
}

#[test]
fn split_tail_deflects_differentially() {
    let (_, deck, _) = build(RawAircraftConfig::discoidal_demo());
    let tails: Vec<_> = deck
        .panels
        .iter()
        .filter(|panel| panel.kind == SurfaceKind::HorizontalTail)
        .collect();
    assert_eq!(tails.len(), 2);
    let (right, left) = (tails[0], tails[1]);
    assert!(right.outboard.position.y > 0.0);
    assert_relative_eq!(left.outboard.position.y, -right.outboard.position.y);
    assert_relative_eq!(
        left.outboard.incidence_tangent(),
        -right.outboard.incidence_tangent(),
        epsilon = 1e-12
    );
    assert_eq!(right.quantity, 1);
    assert_eq!(left.quantity, 1);
}

#[test]
fn collective_split_tail_deflects_together() {
    let mut raw = RawAircraftConfig::discoidal_demo();
    raw.horizontal_tail.deflection = Deflection::Collective;
    let (_, deck, _) = build(raw);
    let tails: Vec<_> = deck
        .panels
        .iter()
        .filter(|panel| panel.kind == SurfaceKind::HorizontalTail)
        .collect();
    assert_relative_eq!(tails[0].inboard.incidence_deg, tails[1].inboard.incidence_deg);
}

#[test]
fn elevons_complete_the_wing_chord() {
    let (_, deck, _) = build(RawAircraftConfig::discoidal_demo());
    let wing: Vec<_> = deck
        .panels
        .iter()
        .filter(|panel| panel.kind == SurfaceKind::Wing)
        .collect();
    let elevons: Vec<_> = deck
        .panels
        .iter()
        .filter(|panel| panel.kind == SurfaceKind::Elevon)
        .collect();
    assert_eq!(elevons.len(), 4);
    assert_eq!(elevons[0].label, "RIGHT ELEVON PANEL, STATIONS 2-3");
    assert_eq!(elevons[3].label, "LEFT ELEVON PANEL, STATIONS 3-4");

    // Wing panel 2 spans stations 2-3 and carries the main surface only.
    let main = wing[1];
    let flap = elevons[0];
    assert_relative_eq!(
        main.inboard.position.x + main.inboard.chord,
        flap.inboard.position.x,
        epsilon = 1e-9
    );
    assert_relative_eq!(
        main.outboard.position.x + main.outboard.chord,
        flap.outboard.position.x,
        epsilon = 1e-9
    );
    // The hinge line is unswept.
    assert_relative_eq!(flap.inboard.position.x, flap.outboard.position.x, epsilon = 1e-9);
    // Panels outside the elevon keep the full chord at the shared station.
    assert!(wing[0].outboard.chord > main.inboard.chord);
}

#[test]
fn discoidal_with_fuselage_keeps_fuselage_first() {
    let mut raw = RawAircraftConfig::discoidal_demo();
    let reference = RawAircraftConfig::reference_transport();
    if let (Topology::Discoidal { fuselage, .. }, Some(body)) =
        (&mut raw.topology, reference.topology.fuselage())
    {
        *fuselage = Some(body.clone());
    }
    raw.wing.stations.span_fractions[0] = 0.1;
    let (_, deck, _) = build(raw);
    assert_eq!(deck.panels[0].kind, SurfaceKind::Fuselage);
    assert_eq!(deck.panels[1].kind, SurfaceKind::Fuselage);
    assert_eq!(deck.panels[2].kind, SurfaceKind::Wing);
}
