//! STEP entity writer.
//!
//! One `EntityWriter` is owned by one export call. Every entity is
//! serialized immediately and assigned the next id, so ids are strictly
//! increasing in emission order and references always point backward.
//! Direction vectors and color style chains are memoized on typed keys so
//! repeated axes and colors are emitted once.

use std::collections::HashMap;

use cratewright_core::Rgb;

/// Inches to millimeters, exact.
pub(crate) const INCH_TO_MM: f64 = 25.4;

/// Canonical axis directions; every direction in the file is axis-aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Axis {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Axis {
    pub(crate) fn components(self) -> (f64, f64, f64) {
        match self {
            Axis::PosX => (1.0, 0.0, 0.0),
            Axis::NegX => (-1.0, 0.0, 0.0),
            Axis::PosY => (0.0, 1.0, 0.0),
            Axis::NegY => (0.0, -1.0, 0.0),
            Axis::PosZ => (0.0, 0.0, 1.0),
            Axis::NegZ => (0.0, 0.0, -1.0),
        }
    }
}

/// Serialized entity store with monotonically increasing ids.
pub(crate) struct EntityWriter {
    entities: Vec<String>,
    next_id: u64,
    directions: HashMap<Axis, u64>,
    colors: HashMap<Rgb, u64>,
}

impl EntityWriter {
    pub(crate) fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
            directions: HashMap::new(),
            colors: HashMap::new(),
        }
    }

    /// Append one entity and return its id.
    pub(crate) fn emit(&mut self, body: impl AsRef<str>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entities.push(format!("#{}={};", id, body.as_ref()));
        id
    }

    /// Memoized axis direction.
    pub(crate) fn direction(&mut self, axis: Axis) -> u64 {
        if let Some(&id) = self.directions.get(&axis) {
            return id;
        }
        let (x, y, z) = axis.components();
        let id = self.emit(format!(
            "DIRECTION('',({},{},{}))",
            format_real(x),
            format_real(y),
            format_real(z)
        ));
        self.directions.insert(axis, id);
        id
    }

    pub(crate) fn point(&mut self, x: f64, y: f64, z: f64) -> u64 {
        self.emit(format!(
            "CARTESIAN_POINT('',({},{},{}))",
            format_real(x),
            format_real(y),
            format_real(z)
        ))
    }

    /// Axis placement at a point with the canonical +Z / +X frame.
    pub(crate) fn axis_at(&mut self, x: f64, y: f64, z: f64) -> u64 {
        let point = self.point(x, y, z);
        let dir_z = self.direction(Axis::PosZ);
        let dir_x = self.direction(Axis::PosX);
        self.emit(format!("AXIS2_PLACEMENT_3D('',#{point},#{dir_z},#{dir_x})"))
    }

    /// Axis placement with explicit normal and reference directions.
    pub(crate) fn axis_with_dirs(&mut self, x: f64, y: f64, z: f64, normal: Axis, reference: Axis) -> u64 {
        let point = self.point(x, y, z);
        let dir_n = self.direction(normal);
        let dir_r = self.direction(reference);
        self.emit(format!("AXIS2_PLACEMENT_3D('',#{point},#{dir_n},#{dir_r})"))
    }

    /// Memoized presentation style for a color. Returns the
    /// PRESENTATION_STYLE_ASSIGNMENT id to hang STYLED_ITEMs on.
    pub(crate) fn color_style(&mut self, color: Rgb) -> u64 {
        if let Some(&id) = self.colors.get(&color) {
            return id;
        }
        let (r, g, b) = color.normalized();
        let rgb = self.emit(format!(
            "COLOUR_RGB('',{},{},{})",
            format_real(r),
            format_real(g),
            format_real(b)
        ));
        let fill_colour = self.emit(format!("FILL_AREA_STYLE_COLOUR('',#{rgb})"));
        let fill_style = self.emit(format!("FILL_AREA_STYLE('',(#{fill_colour}))"));
        let surface_fill = self.emit(format!("SURFACE_STYLE_FILL_AREA(#{fill_style})"));
        let side_style = self.emit(format!("SURFACE_SIDE_STYLE('',(#{surface_fill}))"));
        let usage = self.emit(format!("SURFACE_STYLE_USAGE(.BOTH.,#{side_style})"));
        let psa = self.emit(format!("PRESENTATION_STYLE_ASSIGNMENT((#{usage}))"));
        self.colors.insert(color, psa);
        psa
    }

    /// Style one representation item with a (memoized) color.
    pub(crate) fn style_item(&mut self, color: Rgb, item: u64) -> u64 {
        let psa = self.color_style(color);
        self.emit(format!("STYLED_ITEM('color',(#{psa}),#{item})"))
    }

    /// Render the complete ISO-10303-21 file.
    pub(crate) fn finish(
        self,
        description: &str,
        file_name: &str,
        author: &str,
        organization: &str,
        timestamp: &str,
    ) -> String {
        let mut output = String::new();
        output.push_str("ISO-10303-21;\n");
        output.push_str("HEADER;\n");
        output.push_str(&format!(
            "FILE_DESCRIPTION(('{}'),'2;1');\n",
            escape(description)
        ));
        output.push_str(&format!(
            "FILE_NAME('{}','{}',('{}'),('{}'),'cratewright-step','cratewright-step','');\n",
            escape(file_name),
            timestamp,
            escape(author),
            escape(organization)
        ));
        output.push_str(
            "FILE_SCHEMA(('AP242_MANAGED_MODEL_BASED_3D_ENGINEERING_MIM_LATEST'));\n",
        );
        output.push_str("ENDSEC;\n");
        output.push_str("DATA;\n");
        for entity in &self.entities {
            output.push_str(entity);
            output.push('\n');
        }
        output.push_str("ENDSEC;\n");
        output.push_str("END-ISO-10303-21;\n");
        output
    }
}

/// Escape a string literal for STEP.
pub(crate) fn escape(s: &str) -> String {
    s.replace('\'', "''")
}

/// Format a real number for STEP: trailing zeros trimmed, always a decimal
/// point.
pub(crate) fn format_real(value: f64) -> String {
    if value == 0.0 || value.abs() < 1e-10 {
        return "0.".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}.", value as i64);
    }
    let s = format!("{:.6}", value);
    let s = s.trim_end_matches('0');
    if s.ends_with('.') {
        format!("{}0", s)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_real() {
        assert_eq!(format_real(0.0), "0.");
        assert_eq!(format_real(1.0), "1.");
        assert_eq!(format_real(254.0), "254.");
        assert_eq!(format_real(3.14), "3.14");
        assert_eq!(format_real(-2.5), "-2.5");
        assert_eq!(format_real(0.1), "0.1");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("it's"), "it''s");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_ids_increase_in_emission_order() {
        let mut w = EntityWriter::new();
        let a = w.emit("CARTESIAN_POINT('',(0.,0.,0.))");
        let b = w.emit("CARTESIAN_POINT('',(1.,0.,0.))");
        assert_eq!(a, 1);
        assert_eq!(b, 2);
    }

    #[test]
    fn test_directions_memoized() {
        let mut w = EntityWriter::new();
        let a = w.direction(Axis::PosZ);
        let b = w.direction(Axis::PosZ);
        let c = w.direction(Axis::NegZ);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_colors_memoized() {
        let mut w = EntityWriter::new();
        let red = Rgb::new(255, 0, 0);
        let a = w.color_style(red);
        let b = w.color_style(red);
        assert_eq!(a, b);
        let blue = Rgb::new(0, 0, 255);
        assert_ne!(a, w.color_style(blue));
    }

    #[test]
    fn test_finish_frames_sections() {
        let w = EntityWriter::new();
        let text = w.finish("desc", "model.step", "author", "", "2025-01-01T00:00:00");
        assert!(text.starts_with("ISO-10303-21;\n"));
        assert!(text.ends_with("END-ISO-10303-21;\n"));
        assert_eq!(text.matches("ENDSEC;").count(), 2);
    }
}
