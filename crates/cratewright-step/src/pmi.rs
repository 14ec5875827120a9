//! Product manufacturing information: overall bounding-box dimensions and
//! a descriptive note attached to the root product definition.

use cratewright_core::Part;

use crate::writer::{format_real, EntityWriter, INCH_TO_MM};

/// Append length/width/height properties (millimeters) plus one note.
pub(crate) fn append_bounding_box(
    w: &mut EntityWriter,
    active: &[&Part],
    root_pd: u64,
    geom_ctx: u64,
    length_unit: u64,
) {
    if active.is_empty() {
        return;
    }

    let mut min = active[0].min_corner();
    let mut max = active[0].max_corner();
    for part in &active[1..] {
        min = min.min(part.min_corner());
        max = max.max(part.max_corner());
    }
    let size = max - min;

    // X = width, Y = length, Z = height.
    let dims = [
        ("overall length", size.y * INCH_TO_MM),
        ("overall width", size.x * INCH_TO_MM),
        ("overall height", size.z * INCH_TO_MM),
    ];

    for (name, value) in dims {
        let item = w.emit(format!(
            "MEASURE_REPRESENTATION_ITEM('{name}',LENGTH_MEASURE({}),#{length_unit})",
            format_real(value)
        ));
        let representation = w.emit(format!("REPRESENTATION('{name}',(#{item}),#{geom_ctx})"));
        let property = w.emit(format!(
            "PROPERTY_DEFINITION('geometric validation property','{name}',#{root_pd})"
        ));
        w.emit(format!(
            "PROPERTY_DEFINITION_REPRESENTATION(#{property},#{representation})"
        ));
    }

    let note = w.emit(
        "DESCRIPTIVE_REPRESENTATION_ITEM('note','Overall crate bounding box, millimeters')",
    );
    let representation = w.emit(format!("REPRESENTATION('note',(#{note}),#{geom_ctx})"));
    let property = w.emit(format!(
        "PROPERTY_DEFINITION('description','bounding box note',#{root_pd})"
    ));
    w.emit(format!(
        "PROPERTY_DEFINITION_REPRESENTATION(#{property},#{representation})"
    ));
}

#[cfg(test)]
mod tests {
    use cratewright_core::{palette, Part, PartKind};
    use glam::DVec3;

    use crate::{export_step, StepOptions};

    #[test]
    fn test_bounding_box_dimensions_in_millimeters() {
        // 10 x 20 x 4 inches -> 254 x 508 x 101.6 mm
        let p = Part::new(
            "BLOCK",
            PartKind::Skid,
            DVec3::new(-5.0, 0.0, 0.0),
            DVec3::new(5.0, 20.0, 4.0),
            palette::SKID,
        );
        let text = export_step(&[p], &StepOptions::default()).unwrap();
        assert!(text.contains("MEASURE_REPRESENTATION_ITEM('overall length',LENGTH_MEASURE(508.)"));
        assert!(text.contains("MEASURE_REPRESENTATION_ITEM('overall width',LENGTH_MEASURE(254.)"));
        assert!(text.contains("MEASURE_REPRESENTATION_ITEM('overall height',LENGTH_MEASURE(101.6)"));
    }
}
