//! STEP AP242 B-rep exporter for the Cratewright engine.
//!
//! Consumes the flat part list produced by `cratewright-geometry` and
//! emits an ISO-10303-21 file: one deduplicated B-rep solid per distinct
//! part shape, surface colors, and a four-tier assembly hierarchy
//! (root -> SHIPPING_BASE / CRATE_CAP / FASTENERS / STENCILS -> per-panel
//! sub-assemblies -> part occurrences).
//!
//! The exporter is a strictly sequential state machine per call: contexts,
//! cached directions, part groups, assembly, optional PMI, finish. For a
//! fixed input the output is byte-identical across runs; nothing in the
//! file depends on wall-clock time or iteration order of unordered maps.

mod brep;
mod groups;
mod pmi;
mod writer;

use cratewright_core::{ExportError, Panel, Part};
use groups::{PartGroup, TopAssembly};
use writer::{escape, EntityWriter, INCH_TO_MM};

/// Geometry below this extent (inches) is dropped as degenerate.
const DEGENERATE_EPS: f64 = 1e-6;

/// Export options.
#[derive(Debug, Clone)]
pub struct StepOptions {
    /// Root assembly product name.
    pub product_name: String,
    pub file_name: String,
    pub author: String,
    pub organization: String,
    /// Fixed header timestamp; never wall-clock, so output stays
    /// byte-deterministic.
    pub timestamp: String,
    /// Append overall bounding-box properties and a note.
    pub include_pmi: bool,
}

impl Default for StepOptions {
    fn default() -> Self {
        Self {
            product_name: "CRATE_ASSEMBLY".to_string(),
            file_name: "crate.step".to_string(),
            author: "cratewright".to_string(),
            organization: String::new(),
            timestamp: "2025-01-01T00:00:00".to_string(),
            include_pmi: true,
        }
    }
}

/// Export a part list to STEP AP242 text.
///
/// Suppressed and zero-volume parts are skipped silently; an entirely
/// empty model still produces a valid file with a placeholder surface
/// model. Non-finite coordinates are the only error.
pub fn export_step(parts: &[Part], options: &StepOptions) -> Result<String, ExportError> {
    // Reject solver defects before any entity is emitted.
    for part in parts {
        if !part.is_finite() {
            return Err(ExportError::NonFinite { part: part.name.clone() });
        }
    }

    let active: Vec<&Part> = parts
        .iter()
        .filter(|p| !p.suppressed && !p.is_degenerate(DEGENERATE_EPS))
        .collect();

    let mut exporter = Exporter::new(options);
    exporter.emit_contexts();
    exporter.cache_directions();

    let groups = groups::group_parts(&active);
    let built: Vec<BuiltGroup> = groups.iter().map(|g| exporter.build_group(g)).collect();
    exporter.emit_presentation(&built);
    exporter.build_assembly(&groups, &built);
    if options.include_pmi {
        exporter.append_pmi(&active);
    }

    Ok(exporter.finish())
}

/// Product definition + shape representation pair for one node.
#[derive(Debug, Clone, Copy)]
struct ProductNode {
    pd: u64,
    sr: u64,
}

/// A part group realized as entities.
struct BuiltGroup {
    node: ProductNode,
    styled_item: u64,
}

struct Exporter<'a> {
    w: EntityWriter,
    options: &'a StepOptions,
    app_ctx: u64,
    product_ctx: u64,
    pd_ctx: u64,
    geom_ctx: u64,
    length_unit: u64,
    origin_axis: u64,
    nauo_count: u64,
    root: Option<ProductNode>,
}

impl<'a> Exporter<'a> {
    fn new(options: &'a StepOptions) -> Self {
        Self {
            w: EntityWriter::new(),
            options,
            app_ctx: 0,
            product_ctx: 0,
            pd_ctx: 0,
            geom_ctx: 0,
            length_unit: 0,
            origin_axis: 0,
            nauo_count: 0,
            root: None,
        }
    }

    /// Application, product, and geometric representation contexts.
    fn emit_contexts(&mut self) {
        self.app_ctx = self
            .w
            .emit("APPLICATION_CONTEXT('managed model based 3d engineering')");
        self.w.emit(format!(
            "APPLICATION_PROTOCOL_DEFINITION('international standard','ap242_managed_model_based_3d_engineering',2020,#{})",
            self.app_ctx
        ));
        self.product_ctx = self
            .w
            .emit(format!("PRODUCT_CONTEXT('',#{},'mechanical')", self.app_ctx));
        self.pd_ctx = self.w.emit(format!(
            "PRODUCT_DEFINITION_CONTEXT('part definition',#{},'design')",
            self.app_ctx
        ));

        self.length_unit = self
            .w
            .emit("(LENGTH_UNIT()NAMED_UNIT(*)SI_UNIT(.MILLI.,.METRE.))");
        let angle_unit = self
            .w
            .emit("(NAMED_UNIT(*)PLANE_ANGLE_UNIT()SI_UNIT($,.RADIAN.))");
        let solid_angle_unit = self
            .w
            .emit("(NAMED_UNIT(*)SI_UNIT($,.STERADIAN.)SOLID_ANGLE_UNIT())");
        let uncertainty = self.w.emit(format!(
            "UNCERTAINTY_MEASURE_WITH_UNIT(LENGTH_MEASURE(1.E-06),#{},'distance_accuracy_value','confusion accuracy')",
            self.length_unit
        ));
        self.geom_ctx = self.w.emit(format!(
            "(GEOMETRIC_REPRESENTATION_CONTEXT(3)GLOBAL_UNCERTAINTY_ASSIGNED_CONTEXT((#{}))GLOBAL_UNIT_ASSIGNED_CONTEXT((#{},#{},#{}))REPRESENTATION_CONTEXT('3D context',''))",
            uncertainty, self.length_unit, angle_unit, solid_angle_unit
        ));
    }

    /// Pre-emit the six axis directions and the shared origin placement so
    /// every later reference hits the cache.
    fn cache_directions(&mut self) {
        use crate::writer::Axis;
        for axis in [Axis::PosX, Axis::PosY, Axis::PosZ, Axis::NegX, Axis::NegY, Axis::NegZ] {
            self.w.direction(axis);
        }
        self.origin_axis = self.w.axis_at(0.0, 0.0, 0.0);
    }

    /// PRODUCT / PRODUCT_DEFINITION chain plus a shape representation
    /// holding `items` (the origin axis is always included).
    fn emit_product(&mut self, name: &str, extra_items: &[u64]) -> ProductNode {
        let name = escape(name);
        let product = self.w.emit(format!(
            "PRODUCT('{name}','{name}','',(#{}))",
            self.product_ctx
        ));
        let formation = self
            .w
            .emit(format!("PRODUCT_DEFINITION_FORMATION('','',#{product})"));
        let pd = self.w.emit(format!(
            "PRODUCT_DEFINITION('design','',#{formation},#{})",
            self.pd_ctx
        ));
        let pds = self
            .w
            .emit(format!("PRODUCT_DEFINITION_SHAPE('','',#{pd})"));

        let mut items = format!("#{}", self.origin_axis);
        for item in extra_items {
            items.push_str(&format!(",#{item}"));
        }
        let sr = self.w.emit(format!(
            "SHAPE_REPRESENTATION('{name}',({items}),#{})",
            self.geom_ctx
        ));
        self.w
            .emit(format!("SHAPE_DEFINITION_REPRESENTATION(#{pds},#{sr})"));

        ProductNode { pd, sr }
    }

    /// Solid, color style, and product chain for one part group.
    fn build_group(&mut self, group: &PartGroup) -> BuiltGroup {
        let solid = brep::box_solid(
            &mut self.w,
            &group.name,
            group.dims.x * INCH_TO_MM,
            group.dims.y * INCH_TO_MM,
            group.dims.z * INCH_TO_MM,
        );
        let styled_item = self.w.style_item(group.color, solid);
        let node = self.emit_product(&group.name, &[solid]);
        BuiltGroup { node, styled_item }
    }

    /// One presentation representation collecting every styled item.
    fn emit_presentation(&mut self, built: &[BuiltGroup]) {
        if built.is_empty() {
            return;
        }
        let items = built
            .iter()
            .map(|g| format!("#{}", g.styled_item))
            .collect::<Vec<_>>()
            .join(",");
        self.w.emit(format!(
            "MECHANICAL_DESIGN_GEOMETRIC_PRESENTATION_REPRESENTATION('',({items}),#{})",
            self.geom_ctx
        ));
    }

    /// Child occurrence under a parent: transformation, representation
    /// relationship, and assembly usage records.
    fn link(&mut self, parent: ProductNode, child: ProductNode, child_axis: u64, name: &str) {
        let transform = self.w.emit(format!(
            "ITEM_DEFINED_TRANSFORMATION('','',#{},#{child_axis})",
            self.origin_axis
        ));
        let relationship = self.w.emit(format!(
            "(REPRESENTATION_RELATIONSHIP('','',#{},#{})REPRESENTATION_RELATIONSHIP_WITH_TRANSFORMATION(#{transform})SHAPE_REPRESENTATION_RELATIONSHIP())",
            child.sr, parent.sr
        ));
        self.nauo_count += 1;
        let nauo = self.w.emit(format!(
            "NEXT_ASSEMBLY_USAGE_OCCURRENCE('NAUO{}','{}','',#{},#{},$)",
            self.nauo_count,
            escape(name),
            parent.pd,
            child.pd
        ));
        let pds = self
            .w
            .emit(format!("PRODUCT_DEFINITION_SHAPE('Placement','',#{nauo})"));
        self.w.emit(format!(
            "CONTEXT_DEPENDENT_SHAPE_REPRESENTATION(#{relationship},#{pds})"
        ));
    }

    /// The four-tier assembly: root, the four fixed top-level assemblies,
    /// the five fixed panel sub-assemblies under CRATE_CAP, then one
    /// placement per part occurrence. All fixed nodes are emitted even
    /// when empty so the file structure is stable across configurations.
    fn build_assembly(&mut self, groups: &[PartGroup], built: &[BuiltGroup]) {
        // Empty model: a placeholder open-shell surface model keeps the
        // root representation non-trivial.
        let placeholder = if built.is_empty() {
            let point = self.w.point(0.0, 0.0, 0.0);
            self.w.emit(format!("VERTEX_POINT('',#{point})"));
            let shell = self.w.emit("OPEN_SHELL('',())");
            Some(
                self.w
                    .emit(format!("SHELL_BASED_SURFACE_MODEL('placeholder',(#{shell}))")),
            )
        } else {
            None
        };

        let root_name = self.options.product_name.clone();
        let root = match placeholder {
            Some(model) => self.emit_product(&root_name, &[model]),
            None => self.emit_product(&root_name, &[]),
        };
        self.root = Some(root);

        let mut tops = Vec::new();
        for top in TopAssembly::ALL {
            let node = self.emit_product(top.name(), &[]);
            self.link(root, node, self.origin_axis, top.name());
            tops.push((top, node));
        }

        let crate_cap = tops
            .iter()
            .find(|(top, _)| *top == TopAssembly::CrateCap)
            .map(|(_, node)| *node)
            .expect("CRATE_CAP always present");

        let mut panel_nodes = Vec::new();
        for panel in Panel::ALL {
            let node = self.emit_product(panel.assembly_name(), &[]);
            self.link(crate_cap, node, self.origin_axis, panel.assembly_name());
            panel_nodes.push((panel, node));
        }

        for (group, built_group) in groups.iter().zip(built) {
            let parent = match group.sub_panel {
                Some(panel) => {
                    panel_nodes
                        .iter()
                        .find(|(p, _)| *p == panel)
                        .map(|(_, node)| *node)
                        .expect("all panels have sub-assemblies")
                }
                None => {
                    tops.iter()
                        .find(|(top, _)| *top == group.top)
                        .map(|(_, node)| *node)
                        .expect("all top assemblies present")
                }
            };

            for placement in &group.placements {
                let axis = self.w.axis_at(
                    placement.center.x * INCH_TO_MM,
                    placement.center.y * INCH_TO_MM,
                    placement.center.z * INCH_TO_MM,
                );
                self.link(parent, built_group.node, axis, &placement.occurrence_name);
            }
        }
    }

    fn append_pmi(&mut self, active: &[&Part]) {
        let root = self.root.expect("assembly built before PMI");
        pmi::append_bounding_box(
            &mut self.w,
            active,
            root.pd,
            self.geom_ctx,
            self.length_unit,
        );
    }

    fn finish(self) -> String {
        self.w.finish(
            "Cratewright shipping crate",
            &self.options.file_name,
            &self.options.author,
            &self.options.organization,
            &self.options.timestamp,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cratewright_core::{palette, PartKind};
    use glam::DVec3;

    fn part(name: &str, kind: PartKind, p1: DVec3, p2: DVec3) -> Part {
        Part::new(name, kind, p1, p2, palette::SKID)
    }

    /// Structural validation per the STEP exchange contract: framing,
    /// section count, strictly increasing ids, and no dangling
    /// references.
    fn assert_structurally_valid(text: &str) {
        assert!(text.starts_with("ISO-10303-21;"));
        assert!(text.trim_end().ends_with("END-ISO-10303-21;"));
        assert_eq!(text.matches("ENDSEC;").count(), 2);

        let mut defined = std::collections::HashSet::new();
        let mut last_id = 0u64;
        for line in text.lines() {
            if let Some(rest) = line.strip_prefix('#') {
                if let Some(eq) = rest.find('=') {
                    let id: u64 = rest[..eq].parse().expect("numeric id");
                    assert!(id > last_id, "ids must strictly increase: {id} after {last_id}");
                    last_id = id;
                    defined.insert(id);
                }
            }
        }
        assert!(!defined.is_empty());

        let bytes = text.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'#' {
                let mut j = i + 1;
                while j < bytes.len() && bytes[j].is_ascii_digit() {
                    j += 1;
                }
                if j > i + 1 {
                    let id: u64 = text[i + 1..j].parse().unwrap();
                    assert!(defined.contains(&id), "dangling reference #{id}");
                }
                i = j;
            } else {
                i += 1;
            }
        }
    }

    #[test]
    fn test_empty_model_still_valid() {
        let text = export_step(&[], &StepOptions::default()).unwrap();
        assert_structurally_valid(&text);
        assert!(text.contains("SHELL_BASED_SURFACE_MODEL"));
        for name in ["SHIPPING_BASE", "CRATE_CAP", "FASTENERS", "STENCILS"] {
            assert!(text.contains(name), "missing {name}");
        }
        assert!(!text.contains("MANIFOLD_SOLID_BREP"));
    }

    #[test]
    fn test_single_box_brep() {
        let p = part(
            "SKID",
            PartKind::Skid,
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(10.0, 4.0, 4.0),
        );
        let text = export_step(&[p], &StepOptions::default()).unwrap();
        assert_structurally_valid(&text);
        assert_eq!(text.matches("MANIFOLD_SOLID_BREP").count(), 1);
        // 10 inches converts to exactly 254 mm.
        assert!(text.contains("254."));
    }

    #[test]
    fn test_center_converted_to_millimeters() {
        let p = part(
            "CUBE",
            PartKind::Skid,
            DVec3::new(4.0, 4.0, 4.0),
            DVec3::new(6.0, 6.0, 6.0),
        );
        let text = export_step(&[p], &StepOptions::default()).unwrap();
        assert!(text.contains("CARTESIAN_POINT('',(127.,127.,127.))"));
    }

    #[test]
    fn test_identical_parts_instanced_once() {
        let a = part(
            "FLOORBOARD_1",
            PartKind::Floor,
            DVec3::new(-20.0, 0.0, 3.5),
            DVec3::new(20.0, 5.5, 5.0),
        );
        let b = part(
            "FLOORBOARD_2",
            PartKind::Floor,
            DVec3::new(-20.0, 12.0, 3.5),
            DVec3::new(20.0, 17.5, 5.0),
        );
        let text = export_step(&[a, b], &StepOptions::default()).unwrap();
        assert_structurally_valid(&text);
        assert_eq!(text.matches("MANIFOLD_SOLID_BREP").count(), 1);
        assert_eq!(text.matches(",'FLOORBOARD_1',").count(), 1);
        assert_eq!(text.matches(",'FLOORBOARD_2',").count(), 1);
    }

    #[test]
    fn test_suppressed_and_degenerate_skipped() {
        let real = part(
            "SKID",
            PartKind::Skid,
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(10.0, 4.0, 4.0),
        );
        let degenerate = part(
            "FLAT",
            PartKind::Skid,
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(10.0, 4.0, 0.0),
        );
        let suppressed = Part::suppressed("SLOT", PartKind::Floor, palette::FLOORBOARD);
        let text =
            export_step(&[real, degenerate, suppressed], &StepOptions::default()).unwrap();
        assert_eq!(text.matches("MANIFOLD_SOLID_BREP").count(), 1);
        assert!(!text.contains("'FLAT'"));
        assert!(!text.contains("'SLOT'"));
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut p = part(
            "BAD",
            PartKind::Skid,
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(10.0, 4.0, 4.0),
        );
        p.point2.x = f64::NAN;
        let err = export_step(&[p], &StepOptions::default()).unwrap_err();
        assert!(matches!(err, ExportError::NonFinite { ref part } if part == "BAD"));
    }

    #[test]
    fn test_schema_is_ap242() {
        let text = export_step(&[], &StepOptions::default()).unwrap();
        assert!(text
            .contains("FILE_SCHEMA(('AP242_MANAGED_MODEL_BASED_3D_ENGINEERING_MIM_LATEST'));"));
    }

    #[test]
    fn test_colors_memoized_across_groups() {
        let a = part(
            "SKID",
            PartKind::Skid,
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(10.0, 4.0, 4.0),
        );
        let b = part(
            "SKID_LONG",
            PartKind::Skid,
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(20.0, 4.0, 4.0),
        );
        let text = export_step(&[a, b], &StepOptions::default()).unwrap();
        // Two solids, two styled items, one color chain.
        assert_eq!(text.matches("MANIFOLD_SOLID_BREP").count(), 2);
        assert_eq!(text.matches("STYLED_ITEM").count(), 2);
        assert_eq!(text.matches("COLOUR_RGB").count(), 1);
    }

    #[test]
    fn test_pmi_optional() {
        let p = part(
            "SKID",
            PartKind::Skid,
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(10.0, 4.0, 4.0),
        );
        let mut options = StepOptions::default();
        options.include_pmi = false;
        let without = export_step(std::slice::from_ref(&p), &options).unwrap();
        assert!(!without.contains("MEASURE_REPRESENTATION_ITEM"));

        options.include_pmi = true;
        let with = export_step(&[p], &options).unwrap();
        assert!(with.contains("MEASURE_REPRESENTATION_ITEM"));
        assert!(with.contains("DESCRIPTIVE_REPRESENTATION_ITEM"));
    }
}
