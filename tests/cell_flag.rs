use mesh_kernels::surface_nets::cell_flag::{
    CellFlag, CellFlagFields, Edge, Face, FaceCrossingType, VertexType,
};
use mesh_kernels::surface_nets::label_grid::{LabelGrid, cell_flag_bits};
use proptest::prelude::*;

/// Corner coordinates `(x, y, z)` in canonical corner order.
const CORNER_POSITIONS: [[usize; 3]; 8] = [
    [0, 0, 0],
    [1, 0, 0],
    [1, 1, 0],
    [0, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [1, 1, 1],
    [0, 1, 1],
];

#[test]
fn every_axis_split_is_a_flat_surface() {
    for axis in 0..3 {
        for flip in [false, true] {
            let labels = CORNER_POSITIONS.map(|p| i32::from((p[axis] == 1) != flip));
            let flag = CellFlag::from_labels(&labels);
            assert_eq!(flag.vertex_type(), VertexType::SurfaceVertex, "{labels:?}");
            assert_eq!(flag.num_junctions(), 0);

            let crossed = Face::ALL
                .iter()
                .filter(|&&f| flag.face_crossing_type(f) == FaceCrossingType::SurfaceFaceCrossing)
                .count();
            assert_eq!(crossed, 4);
            let crossing_edges = Edge::ALL
                .iter()
                .filter(|&&e| flag.is_edge_crossing(e))
                .count();
            assert_eq!(crossing_edges, 4);
        }
    }
}

#[test]
fn three_labels_on_one_face() {
    // Bottom face holds 0, 1, 2; top face is uniform.
    let flag = CellFlag::from_labels(&[0, 1, 2, 0, 3, 3, 3, 3]);
    assert_eq!(
        flag.face_crossing_type(Face::Bottom),
        FaceCrossingType::JunctionFaceCrossing
    );
    assert_eq!(
        flag.face_crossing_type(Face::Top),
        FaceCrossingType::NoFaceCrossing
    );
    // Right, Back and Front each mix a bottom pair with the top label.
    assert_eq!(
        flag.face_crossing_type(Face::Right),
        FaceCrossingType::JunctionFaceCrossing
    );
    assert_eq!(
        flag.face_crossing_type(Face::Back),
        FaceCrossingType::JunctionFaceCrossing
    );
    assert_eq!(flag.num_junctions(), 4);
    assert_eq!(flag.vertex_type(), VertexType::CornerVertex);
}

#[test]
fn raw_round_trip_of_reference_flags() {
    for labels in [
        [1; 8],
        [0, 0, 0, 0, 1, 1, 1, 1],
        [0, 1, 0, 1, 0, 1, 0, 1],
        [0, 1, 2, 3, 4, 5, 6, 7],
    ] {
        let flag = CellFlag::from_labels(&labels);
        let back = CellFlag::from_bits(flag.bit_flag());
        assert_eq!(back.fields(), flag.fields());
        assert_eq!(u32::from(back), flag.bit_flag());
    }
}

fn arb_labels() -> impl Strategy<Value = [i32; 8]> {
    prop::array::uniform8(0i32..4)
}

proptest! {
    #[test]
    fn edge_bits_follow_corner_labels(labels in arb_labels()) {
        let flag = CellFlag::from_labels(&labels);
        for edge in Edge::ALL {
            let (a, b) = edge.corners();
            prop_assert_eq!(flag.is_edge_crossing(edge), labels[a] != labels[b]);
        }
    }

    #[test]
    fn fields_are_consistent(labels in arb_labels()) {
        let fields = CellFlagFields::classify(&labels);
        let junctions = fields
            .faces
            .iter()
            .filter(|&&f| f == FaceCrossingType::JunctionFaceCrossing)
            .count();
        prop_assert_eq!(usize::from(fields.num_junctions), junctions);
        prop_assert!(fields.num_junctions <= 6);

        let homogeneous = labels.iter().all(|&l| l == labels[0]);
        prop_assert_eq!(fields.vertex_type == VertexType::NoVertex, homogeneous);
        let expected = match junctions {
            _ if homogeneous => VertexType::NoVertex,
            0 => VertexType::SurfaceVertex,
            1 | 2 => VertexType::EdgeVertex,
            _ => VertexType::CornerVertex,
        };
        prop_assert_eq!(fields.vertex_type, expected);
    }

    #[test]
    fn packed_form_round_trips(labels in arb_labels()) {
        let flag = CellFlag::from_labels(&labels);
        let fields = flag.fields();
        prop_assert_eq!(fields, CellFlagFields::classify(&labels));
        prop_assert_eq!(fields.pack(), flag);
        prop_assert_eq!(CellFlag::from_bits(flag.bit_flag()), flag);
        // Bits 26 to 28 are never set.
        prop_assert_eq!(flag.bit_flag() & (0b111 << 26), 0);
    }

    #[test]
    fn grid_scan_matches_single_cells(
        dims in prop::array::uniform3(1usize..5),
        seed in prop::collection::vec(0i32..3, 64),
    ) {
        let n = dims.iter().product::<usize>();
        let grid = LabelGrid::new(dims, seed[..n].to_vec()).unwrap();
        let flags = grid.cell_flags();
        prop_assert_eq!(flags.len(), grid.num_cells());
        for (flag, [x, y, z]) in flags.iter().zip(grid.cells()) {
            let labels = grid.cell_labels(x, y, z).unwrap();
            prop_assert_eq!(*flag, CellFlag::from_labels(&labels));
        }
        let bits = cell_flag_bits(&flags);
        prop_assert!(bits.iter().zip(&flags).all(|(&b, f)| b == f.bit_flag()));
    }
}
