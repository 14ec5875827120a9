//! Hand-built B-rep topology for axis-aligned boxes.
//!
//! Each box becomes 8 vertex points, 12 shared edge curves on axis-aligned
//! lines with explicit length vectors, and 6 planar faces whose edge loops
//! orient the face normals outward, closed into one manifold solid. The
//! solid is modeled centered at its local origin; occurrences place it via
//! assembly transforms.

use crate::writer::{escape, format_real, Axis, EntityWriter};

/// Vertex index triples: each entry selects the -/+ half extent per axis.
const VERTICES: [(i8, i8, i8); 8] = [
    (-1, -1, -1),
    (1, -1, -1),
    (1, 1, -1),
    (-1, 1, -1),
    (-1, -1, 1),
    (1, -1, 1),
    (1, 1, 1),
    (-1, 1, 1),
];

/// The 12 box edges: (start vertex, end vertex, direction axis).
const EDGES: [(usize, usize, Axis); 12] = [
    (0, 1, Axis::PosX),
    (3, 2, Axis::PosX),
    (4, 5, Axis::PosX),
    (7, 6, Axis::PosX),
    (0, 3, Axis::PosY),
    (1, 2, Axis::PosY),
    (4, 7, Axis::PosY),
    (5, 6, Axis::PosY),
    (0, 4, Axis::PosZ),
    (1, 5, Axis::PosZ),
    (2, 6, Axis::PosZ),
    (3, 7, Axis::PosZ),
];

struct FaceDef {
    normal: Axis,
    reference: Axis,
    /// Face-plane center as half-extent multipliers.
    center: (i8, i8, i8),
    /// Four (edge index, same-sense) pairs forming an outward CCW loop.
    loop_edges: [(usize, bool); 4],
}

const FACES: [FaceDef; 6] = [
    // bottom (z = -hz)
    FaceDef {
        normal: Axis::NegZ,
        reference: Axis::PosX,
        center: (0, 0, -1),
        loop_edges: [(4, true), (1, true), (5, false), (0, false)],
    },
    // top (z = +hz)
    FaceDef {
        normal: Axis::PosZ,
        reference: Axis::PosX,
        center: (0, 0, 1),
        loop_edges: [(2, true), (7, true), (3, false), (6, false)],
    },
    // front (y = -hy)
    FaceDef {
        normal: Axis::NegY,
        reference: Axis::PosX,
        center: (0, -1, 0),
        loop_edges: [(0, true), (9, true), (2, false), (8, false)],
    },
    // back (y = +hy)
    FaceDef {
        normal: Axis::PosY,
        reference: Axis::PosX,
        center: (0, 1, 0),
        loop_edges: [(11, true), (3, true), (10, false), (1, false)],
    },
    // left (x = -hx)
    FaceDef {
        normal: Axis::NegX,
        reference: Axis::PosY,
        center: (-1, 0, 0),
        loop_edges: [(8, true), (6, true), (11, false), (4, false)],
    },
    // right (x = +hx)
    FaceDef {
        normal: Axis::PosX,
        reference: Axis::PosY,
        center: (1, 0, 0),
        loop_edges: [(5, true), (10, true), (7, false), (9, false)],
    },
];

/// Build one box solid (dimensions in millimeters, centered at the local
/// origin) and return the MANIFOLD_SOLID_BREP id.
pub(crate) fn box_solid(w: &mut EntityWriter, name: &str, dx: f64, dy: f64, dz: f64) -> u64 {
    let half = (dx / 2.0, dy / 2.0, dz / 2.0);
    let coord = |sel: (i8, i8, i8)| {
        (
            sel.0 as f64 * half.0,
            sel.1 as f64 * half.1,
            sel.2 as f64 * half.2,
        )
    };

    let mut point_ids = [0u64; 8];
    let mut vertex_ids = [0u64; 8];
    for (i, &sel) in VERTICES.iter().enumerate() {
        let (x, y, z) = coord(sel);
        point_ids[i] = w.point(x, y, z);
        vertex_ids[i] = w.emit(format!("VERTEX_POINT('',#{})", point_ids[i]));
    }

    let mut edge_ids = [0u64; 12];
    for (i, &(start, end, axis)) in EDGES.iter().enumerate() {
        let length = match axis {
            Axis::PosX => dx,
            Axis::PosY => dy,
            _ => dz,
        };
        let dir = w.direction(axis);
        let vector = w.emit(format!("VECTOR('',#{},{})", dir, format_real(length)));
        let line = w.emit(format!("LINE('',#{},#{})", point_ids[start], vector));
        edge_ids[i] = w.emit(format!(
            "EDGE_CURVE('',#{},#{},#{},.T.)",
            vertex_ids[start], vertex_ids[end], line
        ));
    }

    let mut face_ids = [0u64; 6];
    for (i, face) in FACES.iter().enumerate() {
        let (cx, cy, cz) = coord(face.center);
        let axis = w.axis_with_dirs(cx, cy, cz, face.normal, face.reference);
        let plane = w.emit(format!("PLANE('',#{axis})"));

        let mut oriented = [0u64; 4];
        for (j, &(edge, same_sense)) in face.loop_edges.iter().enumerate() {
            let flag = if same_sense { ".T." } else { ".F." };
            oriented[j] =
                w.emit(format!("ORIENTED_EDGE('',*,*,#{},{})", edge_ids[edge], flag));
        }
        let edge_loop = w.emit(format!(
            "EDGE_LOOP('',(#{},#{},#{},#{}))",
            oriented[0], oriented[1], oriented[2], oriented[3]
        ));
        let bound = w.emit(format!("FACE_OUTER_BOUND('',#{edge_loop},.T.)"));
        face_ids[i] = w.emit(format!("ADVANCED_FACE('',(#{bound}),#{plane},.T.)"));
    }

    let shell = w.emit(format!(
        "CLOSED_SHELL('',(#{},#{},#{},#{},#{},#{}))",
        face_ids[0], face_ids[1], face_ids[2], face_ids[3], face_ids[4], face_ids[5]
    ));
    w.emit(format!("MANIFOLD_SOLID_BREP('{}',#{})", escape(name), shell))
}
