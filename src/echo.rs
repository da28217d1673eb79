//! Fixed-column comment fields: the parameter echo and derived-data blocks.
//!
//! Every field is a `* label:` prefix followed by a value right-aligned so it
//! ends on a fixed column, and an optional trailing note. Fields can be read
//! back by column with [`CommentField::parse`].

use serde::Serialize;

use crate::config::{
    AircraftConfig, ControlSurfaceConfig, FuselageConfig, HorizontalTailConfig,
    HorizontalTailMode, VerticalTailConfig, WingConfig, STATION_COUNT,
};
use crate::metrics::TailSummary;
use crate::planform::Planform;

/// Value column of the leading wing fields.
const WING_HEAD_COLUMN: usize = 23;
/// Value column of the wing planform fields.
const WING_COLUMN: usize = 31;
/// Value column of the fuselage fields.
const FUSELAGE_COLUMN: usize = 28;
/// Value column of the tail and elevon fields.
const TAIL_COLUMN: usize = 32;
/// Value column of the derived-data fields.
const DERIVED_COLUMN: usize = 27;
/// Value column of the tail volume coefficient.
const VOLUME_COLUMN: usize = 38;

/// Numeric payload of a comment field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum FieldValue {
    /// Fixed-point real with a number of decimals.
    Real {
        /// Value to print.
        value: f64,
        /// Digits after the decimal point.
        decimals: usize,
    },
    /// Integer flag.
    Integer(i64),
}

impl FieldValue {
    /// The value as a float.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match *self {
            FieldValue::Real { value, .. } => value,
            FieldValue::Integer(value) => value as f64,
        }
    }
}

/// One `* label: value` line.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CommentField {
    /// Field label.
    pub label: String,
    /// Field value.
    pub value: FieldValue,
    /// One-based column where the value ends.
    pub end_column: usize,
    /// Trailing note, including its leading separator.
    pub note: Option<String>,
}

impl CommentField {
    /// A real field with three decimals.
    #[must_use]
    pub fn real(label: impl Into<String>, value: f64, end_column: usize) -> Self {
        Self {
            label: label.into(),
            value: FieldValue::Real { value, decimals: 3 },
            end_column,
            note: None,
        }
    }

    /// An integer field.
    #[must_use]
    pub fn integer(label: impl Into<String>, value: i64, end_column: usize) -> Self {
        Self {
            label: label.into(),
            value: FieldValue::Integer(value),
            end_column,
            note: None,
        }
    }

    /// Change the number of decimals of a real field.
    #[must_use]
    pub fn with_decimals(mut self, decimals: usize) -> Self {
        if let FieldValue::Real { value, .. } = self.value {
            self.value = FieldValue::Real { value, decimals };
        }
        self
    }

    /// Append a note after the value.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Render the field as a deck line.
    ///
    /// # Examples
    /// ```
    /// use vlmdeck::CommentField;
    ///
    /// let field = CommentField::real("arWing", 9.45, 23);
    /// assert_eq!(field.render(), "* arWing:         9.450");
    /// ```
    #[must_use]
    pub fn render(&self) -> String {
        let prefix = format!("* {}:", self.label);
        let width = self.end_column.saturating_sub(prefix.len());
        let value = match self.value {
            FieldValue::Real { value, decimals } => format!("{value:>width$.decimals$}"),
            FieldValue::Integer(value) => format!("{value:>width$}"),
        };
        format!("{prefix}{value}{}", self.note.as_deref().unwrap_or_default())
    }

    /// Read a rendered field back by column.
    ///
    /// Returns the label and the value found between the colon and
    /// `end_column`, or `None` when the line is not a field.
    #[must_use]
    pub fn parse(line: &str, end_column: usize) -> Option<(&str, f64)> {
        let body = line.strip_prefix("* ")?;
        let colon = body.find(':')?;
        let label = &body[..colon];
        let start = colon + 3;
        let text = line.get(start..end_column)?.trim();
        text.parse().ok().map(|value| (label, value))
    }
}

/// One line of a comment block.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum EchoLine {
    /// A labelled value.
    Field(CommentField),
    /// A free comment, printed as is.
    Comment(String),
}

impl EchoLine {
    /// Render the line.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            EchoLine::Field(field) => field.render(),
            EchoLine::Comment(text) => text.clone(),
        }
    }
}

/// Ordered comment lines built from a configuration or a derived surface.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EchoBlock {
    /// Lines in output order.
    pub lines: Vec<EchoLine>,
}

impl EchoBlock {
    fn comment(&mut self, text: impl Into<String>) {
        self.lines.push(EchoLine::Comment(text.into()));
    }

    fn field(&mut self, field: CommentField) {
        self.lines.push(EchoLine::Field(field));
    }

    /// Fields of the block, skipping free comments.
    pub fn fields(&self) -> impl Iterator<Item = &CommentField> {
        self.lines.iter().filter_map(|line| match line {
            EchoLine::Field(field) => Some(field),
            EchoLine::Comment(_) => None,
        })
    }

    /// Echo every input parameter of a configuration.
    #[must_use]
    pub fn parameters(config: &AircraftConfig) -> Self {
        let mut block = Self::default();
        block.echo_wing(config.wing());
        if let Some(fuselage) = config.fuselage() {
            block.echo_fuselage(fuselage);
        }
        block.echo_horizontal_tail(config.horizontal_tail());
        block.echo_vertical_tail(config.vertical_tail());
        if let Some(elevons) = config.elevons() {
            block.echo_elevons(elevons);
        }
        block
    }

    fn echo_wing(&mut self, wing: &WingConfig) {
        let stations = &wing.stations;
        self.comment("*** WING ***");
        self.field(CommentField::real("mrpMacPct", wing.mrp_mac_pct, WING_HEAD_COLUMN));
        self.field(CommentField::real("sRefInFt2", wing.reference_area_ft2, WING_HEAD_COLUMN));
        self.field(CommentField::real("arWing", wing.aspect_ratio, WING_HEAD_COLUMN));
        self.field(CommentField::real("taperWingInDecimal", wing.taper_ratio, WING_COLUMN));
        self.field(CommentField::real("sweepLeWingInDeg", wing.sweep_le_deg, WING_COLUMN));
        self.field(CommentField::real("dihedralWingInDeg", wing.dihedral_deg, WING_COLUMN));
        self.field(CommentField::real("xDistWingApexInIn", wing.apex_x_in, WING_COLUMN));
        self.comment("*");

        self.comment("*Spanwise location of control stations:");
        for (idx, fraction) in stations.span_fractions.iter().enumerate() {
            let station = idx + 1;
            let fuselage = if station == 1 { " (fuse)" } else { "" };
            self.field(
                CommentField::real(format!("bSta{station}OverHalfSpan"), *fraction, WING_COLUMN)
                    .with_note(format!(" #Fraction of half span, station {station}{fuselage}")),
            );
        }
        self.comment("*");

        self.comment("*Variation of chord from trapazoidal wing at control stations:");
        for (idx, ratio) in stations.chord_ratios.iter().enumerate() {
            let station = idx + 1;
            self.field(
                CommentField::real(format!("ratioCSta{station}OverCtrap"), *ratio, 33)
                    .with_note(format!(" #Ratio actual to ref chord, station {station}")),
            );
        }
        self.comment("*");

        self.comment("*Variation of sweep from reference value at control stations:");
        for (idx, increment) in stations.sweep_increments_deg.iter().enumerate() {
            let station = idx + 1;
            self.field(
                CommentField::real(format!("sweepIncrDegSta{station}"), *increment, 30).with_note(
                    format!(" #Increment in sweep, station {station} to {}", station + 1),
                ),
            );
        }
        self.comment("*");

        self.comment("*Incidence at control stations - positive = wash-OUT (TE up):");
        for (idx, incidence) in stations.incidences_deg.iter().enumerate() {
            let station = idx + 1;
            self.field(
                CommentField::real(format!("incidenceDegSta{station}"), *incidence, 30)
                    .with_note(format!(" #Incidence at station {station}")),
            );
        }
        self.comment("*");

        self.comment("*Vertical shear at stations, positive = UP from dihedral line:");
        for station in 1..=STATION_COUNT {
            self.field(
                CommentField::real(
                    format!("zShearInInSta{station}"),
                    stations.shears_in[station - 1],
                    FUSELAGE_COLUMN,
                )
                .with_note(format!(" #Vertical displacement at station {station}")),
            );
        }
        self.comment("*");
    }

    fn echo_fuselage(&mut self, fuselage: &FuselageConfig) {
        self.comment("*** FUSELAGE ***");
        for (label, value) in [
            ("heightFuseInIn", fuselage.height_in),
            ("lengthFuseInIn", fuselage.length_in),
            ("noseTopAngle", fuselage.nose_top_angle_deg),
            ("noseSideAngle", fuselage.nose_side_angle_deg),
            ("tailTopAngle", fuselage.tail_top_angle_deg),
            ("tailSideAngle", fuselage.tail_side_angle_deg),
        ] {
            self.field(CommentField::real(label, value, FUSELAGE_COLUMN));
        }
        self.comment("*");
    }

    fn echo_horizontal_tail(&mut self, tail: &HorizontalTailConfig) {
        self.comment("*** HORIZONTAL TAIL ***");
        self.field(CommentField::integer("isHTailOn", tail.flag(), TAIL_COLUMN).with_note(" # OFF=0; ON=1"));
        for (label, value) in [
            ("mrpMacHTailPct", tail.mrp_mac_pct),
            ("sRefHTailInFt2", tail.reference_area_ft2),
            ("arHTail", tail.aspect_ratio),
            ("taperHTailInDecimal", tail.taper_ratio),
            ("sweepLeHTailInDeg", tail.sweep_le_deg),
            ("dihedralHTailInDeg", tail.dihedral_deg),
            ("xDistHTailApexInIn", tail.apex_x_in),
        ] {
            self.field(CommentField::real(label, value, TAIL_COLUMN));
        }
        self.field(
            CommentField::real("hTailIncidenceInDeg", tail.incidence_deg, TAIL_COLUMN)
                .with_note(" # Positive = TE down"),
        );
        if tail.mode == HorizontalTailMode::Split {
            self.field(
                CommentField::integer("hTailDeflection", tail.deflection.flag(), TAIL_COLUMN)
                    .with_note(" # COLLECTIVE=-1; DIFFERENTIAL=1"),
            );
        }
        self.comment("*");
    }

    fn echo_vertical_tail(&mut self, tail: &VerticalTailConfig) {
        self.comment("*** VERTICAL TAIL ***");
        self.field(
            CommentField::integer("isVTailOn", tail.flag(), TAIL_COLUMN)
                .with_note(" # OFF=0; ON,UPPER=1, ON,LOWER=-1"),
        );
        for (label, value) in [
            ("mrpMacVTailPct", tail.mrp_mac_pct),
            ("sRefVTailInFt2", tail.reference_area_ft2),
            ("arVTail", tail.aspect_ratio),
            ("taperVTailInDecimal", tail.taper_ratio),
            ("sweepLeVTailInDeg", tail.sweep_le_deg),
        ] {
            self.field(CommentField::real(label, value, TAIL_COLUMN));
        }
        self.field(
            CommentField::real("tiltVTailInDeg", tail.tilt_deg, TAIL_COLUMN)
                .with_note(" # Vertical=0, Tilt Out=+, Tilt In=-"),
        );
        self.field(
            CommentField::real("yDispVTailBaseInIn", tail.base_y_in, TAIL_COLUMN)
                .with_note(" # Spanwise location base vertical tail"),
        );
        self.field(CommentField::real("xDistVTailBaseInIn", tail.base_x_in, TAIL_COLUMN));
        self.comment("*");
    }

    fn echo_elevons(&mut self, elevons: &ControlSurfaceConfig) {
        self.comment("*** ELEVONS ***");
        self.field(CommentField::integer(
            "elevonInboardSta",
            elevons.inboard_station as i64,
            TAIL_COLUMN,
        ));
        self.field(CommentField::integer(
            "elevonOutboardSta",
            elevons.outboard_station as i64,
            TAIL_COLUMN,
        ));
        self.field(
            CommentField::real("elevonChordBreak", elevons.chord_break_fraction, TAIL_COLUMN)
                .with_note(" # Fraction of inboard station chord"),
        );
        self.field(
            CommentField::real("elevonDeflectionInDeg", elevons.deflection_deg, TAIL_COLUMN)
                .with_note(" # Right side, positive = TE up"),
        );
        self.field(
            CommentField::integer("elevonDeflection", elevons.deflection.flag(), TAIL_COLUMN)
                .with_note(" # COLLECTIVE=-1; DIFFERENTIAL=1"),
        );
        self.comment("*");
    }

    /// Derived data of the reference wing.
    #[must_use]
    pub fn derived_wing(wing: &Planform) -> Self {
        let mut block = Self::default();
        block.comment("*Derived Geometric Data for Reference Wing:");
        for (label, value) in [
            ("Wing Span (in)", wing.span),
            ("Root Chord (in)", wing.root_chord),
            ("Tip Chord (in)", wing.tip_chord),
            ("MAC Chord (in)", wing.mac),
            ("x MRP (in)", wing.mrp_x),
            ("z MRP (in)", wing.mrp_z),
            ("y (in)", wing.mac_station),
            ("Sweep 1/4C (deg)", wing.quarter_chord_sweep_deg),
        ] {
            block.field(CommentField::real(label, value, DERIVED_COLUMN));
        }
        block.comment("*");
        block
    }

    /// Derived data of a tail; `name` is "Horizontal Tail" or "Vertical Tail"
    /// and `mac_axis` the axis of the MAC offset.
    #[must_use]
    pub fn derived_tail(name: &str, mac_axis: char, tail: &TailSummary) -> Self {
        let planform = &tail.planform;
        let mut block = Self::default();
        block.comment(format!("*Derived Geometric Data for {name}:"));
        let mac_label = format!("{mac_axis} MAC (in)");
        for (label, value) in [
            ("Span (in)", planform.span),
            ("Root Chord (in)", planform.root_chord),
            ("Tip Chord (in)", planform.tip_chord),
            ("MAC Chord (in)", planform.mac),
            ("x MRP (in)", planform.mrp_x),
            (mac_label.as_str(), tail.mac_offset),
            ("Sweep 1/4C (deg)", planform.quarter_chord_sweep_deg),
        ] {
            block.field(CommentField::real(label, value, DERIVED_COLUMN));
        }
        block.field(
            CommentField::real("Tail Volume Coefficient", tail.volume_coefficient, VOLUME_COLUMN)
                .with_decimals(5),
        );
        block.comment("*");
        block
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::config::RawAircraftConfig;

    fn transport_echo() -> EchoBlock {
        let config = AircraftConfig::new(RawAircraftConfig::reference_transport()).expect("valid");
        EchoBlock::parameters(&config)
    }

    #[test]
    fn fields_end_on_their_column() {
        let cases = [
            (CommentField::real("mrpMacPct", 25.0, 23), "* mrpMacPct:     25.000"),
            (
                CommentField::real("sweepLeWingInDeg", 27.75, 31),
                "* sweepLeWingInDeg:      27.750",
            ),
            (
                CommentField::integer("isHTailOn", 1, 32).with_note(" # OFF=0; ON=1"),
                "* isHTailOn:                   1 # OFF=0; ON=1",
            ),
            (
                CommentField::real("Tail Volume Coefficient", 1.142_57, 38).with_decimals(5),
                "* Tail Volume Coefficient:     1.14257",
            ),
        ];
        for (field, expected) in cases {
            assert_eq!(field.render(), expected);
        }
    }

    #[test]
    fn wide_values_push_the_column() {
        let field = CommentField::real("x", 123_456_789.0, 8);
        assert_eq!(field.render(), "* x:123456789.000");
    }

    #[test]
    fn every_echoed_field_reads_back_by_column() {
        let echo = transport_echo();
        let mut count = 0;
        for field in echo.fields() {
            let line = field.render();
            let (label, value) =
                CommentField::parse(&line, field.end_column).expect("field parses");
            assert_eq!(label, field.label);
            assert_relative_eq!(value, field.value.as_f64(), epsilon = 5e-4);
            count += 1;
        }
        assert_eq!(count, 7 + 5 + 6 + 5 + 6 + 6 + 6 + 9 + 9);
    }

    #[test]
    fn station_notes_match_reference_deck() {
        let lines: Vec<String> = transport_echo().lines.iter().map(EchoLine::render).collect();
        assert!(lines.contains(
            &"* bSta1OverHalfSpan:      0.110 #Fraction of half span, station 1 (fuse)".to_string()
        ));
        assert!(lines.contains(
            &"* sweepIncrDegSta5:     45.000 #Increment in sweep, station 5 to 6".to_string()
        ));
        assert!(lines.contains(
            &"* zShearInInSta6:     20.000 #Vertical displacement at station 6".to_string()
        ));
        assert!(lines.contains(&"* noseSideAngle:      45.000".to_string()));
    }

    #[test]
    fn discoidal_echo_skips_fuselage_and_adds_elevons() {
        let config = AircraftConfig::new(RawAircraftConfig::discoidal_demo()).expect("valid");
        let lines: Vec<String> = EchoBlock::parameters(&config)
            .lines
            .iter()
            .map(EchoLine::render)
            .collect();
        assert!(!lines.iter().any(|line| line == "*** FUSELAGE ***"));
        assert!(lines.iter().any(|line| line == "*** ELEVONS ***"));
        assert!(lines
            .iter()
            .any(|line| line.starts_with("* hTailDeflection:") && line.contains(" 1 #")));
    }

    #[test]
    fn non_field_lines_do_not_parse() {
        assert_eq!(CommentField::parse("*** WING ***", 23), None);
        assert_eq!(CommentField::parse("*", 23), None);
    }
}
