//! Packed per-cell classification for SurfaceNets.
//!
//! A [`CellFlag`] summarises the eight corner labels of one grid cell:
//! which of its 12 edges join different labels, how each of its 6 faces
//! is crossed, what kind of surface vertex the cell carries and how many
//! junction faces it has. The packed `u32` layout is fixed:
//!
//! | bits  | field                                  |
//! |-------|----------------------------------------|
//! | 0-1   | vertex type                            |
//! | 2-13  | face crossings, 2 bits each, Left..Top |
//! | 14-25 | edge crossings, 1 bit each             |
//! | 26-28 | unused                                 |
//! | 29-31 | junction count                         |
//!
//! Corners are numbered left-back-bottom, right-back-bottom,
//! right-front-bottom, left-front-bottom, then the same four on top.

use bytemuck::{Pod, Zeroable};
use static_assertions::{const_assert, const_assert_eq};

/// Corner labels of one cell in canonical order.
pub type CellLabels = [i32; 8];

/// Kind of surface vertex placed in a cell.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[repr(u32)]
pub enum VertexType {
    #[default]
    NoVertex = 0,
    SurfaceVertex = 1,
    EdgeVertex = 2,
    CornerVertex = 3,
}

/// How labels meet across one cell face.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[repr(u32)]
pub enum FaceCrossingType {
    #[default]
    NoFaceCrossing = 0,
    /// Two labels separated by a simple boundary.
    SurfaceFaceCrossing = 1,
    /// Three or more labels, or two labels on alternating corners.
    JunctionFaceCrossing = 2,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    Left = 0,
    Right,
    Back,
    Front,
    Bottom,
    Top,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Edge {
    LeftBottom = 0,
    RightBottom,
    BackBottom,
    FrontBottom,
    LeftTop,
    RightTop,
    BackTop,
    FrontTop,
    LeftBack,
    RightBack,
    LeftFront,
    RightFront,
}

/// Corner indices of each face, in cyclic order.
pub const FACE_CORNERS: [[usize; 4]; 6] = [
    [0, 3, 7, 4],
    [1, 2, 6, 5],
    [0, 1, 5, 4],
    [3, 2, 6, 7],
    [0, 1, 2, 3],
    [4, 5, 6, 7],
];

/// Corner indices joined by each edge.
pub const EDGE_CORNERS: [(usize, usize); 12] = [
    (0, 3),
    (1, 2),
    (0, 1),
    (2, 3),
    (4, 7),
    (5, 6),
    (4, 5),
    (6, 7),
    (0, 4),
    (1, 5),
    (3, 7),
    (2, 6),
];

const VERTEX_TYPE_SHIFT: u32 = 0;
const FACE_SHIFT: u32 = 2;
const EDGE_SHIFT: u32 = 14;
const NUM_JUNCTIONS_SHIFT: u32 = 29;

const TWO_BITS: u32 = 0b11;
const NUM_JUNCTIONS_MASK: u32 = 0b111;

const VERTEX_TYPE_BITS: u32 = TWO_BITS << VERTEX_TYPE_SHIFT;
const FACE_BITS: u32 = ((1 << (2 * 6)) - 1) << FACE_SHIFT;
const EDGE_BITS: u32 = ((1 << 12) - 1) << EDGE_SHIFT;
const NUM_JUNCTIONS_BITS: u32 = NUM_JUNCTIONS_MASK << NUM_JUNCTIONS_SHIFT;

const_assert_eq!(VERTEX_TYPE_BITS & FACE_BITS, 0);
const_assert_eq!(FACE_BITS & EDGE_BITS, 0);
const_assert_eq!(EDGE_BITS & NUM_JUNCTIONS_BITS, 0);
const_assert_eq!(
    (VERTEX_TYPE_BITS | FACE_BITS | EDGE_BITS | NUM_JUNCTIONS_BITS).count_ones(),
    2 + 12 + 12 + 3
);
// Six faces fit in the junction counter.
const_assert!(6 <= NUM_JUNCTIONS_MASK);
const_assert_eq!(std::mem::size_of::<CellFlag>(), std::mem::size_of::<u32>());

impl VertexType {
    fn from_bits(bits: u32) -> Self {
        match bits & TWO_BITS {
            1 => VertexType::SurfaceVertex,
            2 => VertexType::EdgeVertex,
            3 => VertexType::CornerVertex,
            _ => VertexType::NoVertex,
        }
    }
}

impl FaceCrossingType {
    /// Undefined codes decode to `NoFaceCrossing`.
    fn from_bits(bits: u32) -> Self {
        match bits & TWO_BITS {
            1 => FaceCrossingType::SurfaceFaceCrossing,
            2 => FaceCrossingType::JunctionFaceCrossing,
            _ => FaceCrossingType::NoFaceCrossing,
        }
    }
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Left,
        Face::Right,
        Face::Back,
        Face::Front,
        Face::Bottom,
        Face::Top,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[inline]
    pub fn corners(self) -> [usize; 4] {
        FACE_CORNERS[self as usize]
    }

    #[inline]
    fn shift(self) -> u32 {
        FACE_SHIFT + 2 * self as u32
    }
}

impl Edge {
    pub const ALL: [Edge; 12] = [
        Edge::LeftBottom,
        Edge::RightBottom,
        Edge::BackBottom,
        Edge::FrontBottom,
        Edge::LeftTop,
        Edge::RightTop,
        Edge::BackTop,
        Edge::FrontTop,
        Edge::LeftBack,
        Edge::RightBack,
        Edge::LeftFront,
        Edge::RightFront,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[inline]
    pub fn corners(self) -> (usize, usize) {
        EDGE_CORNERS[self as usize]
    }

    #[inline]
    fn bit(self) -> u32 {
        1 << (EDGE_SHIFT + self as u32)
    }
}

/// Unpacked form of a [`CellFlag`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct CellFlagFields {
    pub vertex_type: VertexType,
    /// Indexed by `Face as usize`.
    pub faces: [FaceCrossingType; 6],
    /// Indexed by `Edge as usize`.
    pub edges: [bool; 12],
    /// 0..=6.
    pub num_junctions: u8,
}

impl CellFlagFields {
    /// Classify a cell from its corner labels.
    pub fn classify(labels: &CellLabels) -> Self {
        let mut fields = Self::default();

        let mut num_edge_crossings = 0;
        for edge in Edge::ALL {
            let (a, b) = edge.corners();
            if labels[a] != labels[b] {
                fields.edges[edge as usize] = true;
                num_edge_crossings += 1;
            }
        }
        if num_edge_crossings == 0 {
            return fields;
        }

        for face in Face::ALL {
            let [a, b, c, d] = face.corners();
            fields.faces[face as usize] =
                classify_face(labels[a], labels[b], labels[c], labels[d]);
        }

        let num_face_crossings = fields
            .faces
            .iter()
            .filter(|&&f| f != FaceCrossingType::NoFaceCrossing)
            .count();
        let num_junctions = fields
            .faces
            .iter()
            .filter(|&&f| f == FaceCrossingType::JunctionFaceCrossing)
            .count();
        if num_face_crossings > 0 {
            fields.vertex_type = match num_junctions {
                0 => VertexType::SurfaceVertex,
                1 | 2 => VertexType::EdgeVertex,
                _ => VertexType::CornerVertex,
            };
        }
        fields.num_junctions = num_junctions as u8;
        fields
    }

    /// Pack into the fixed bit layout.
    pub fn pack(&self) -> CellFlag {
        let mut bits = (self.vertex_type as u32) << VERTEX_TYPE_SHIFT;
        for face in Face::ALL {
            bits |= (self.faces[face as usize] as u32) << face.shift();
        }
        for edge in Edge::ALL {
            if self.edges[edge as usize] {
                bits |= edge.bit();
            }
        }
        bits |= (u32::from(self.num_junctions) & NUM_JUNCTIONS_MASK) << NUM_JUNCTIONS_SHIFT;
        CellFlag(bits)
    }
}

/// Face classification from its four corner labels in cyclic order.
fn classify_face(c0: i32, c1: i32, c2: i32, c3: i32) -> FaceCrossingType {
    let mut unique = [c0; 4];
    let mut num_unique = 1;
    for c in [c1, c2, c3] {
        if !unique[..num_unique].contains(&c) {
            unique[num_unique] = c;
            num_unique += 1;
        }
    }
    match num_unique {
        2 if c0 == c2 && c1 == c3 => FaceCrossingType::JunctionFaceCrossing,
        2 => FaceCrossingType::SurfaceFaceCrossing,
        3 | 4 => FaceCrossingType::JunctionFaceCrossing,
        _ => FaceCrossingType::NoFaceCrossing,
    }
}

/// Packed cell classification.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct CellFlag(u32);

impl CellFlag {
    /// Empty flag: no vertex, no crossings.
    pub const fn new() -> Self {
        CellFlag(0)
    }

    pub fn from_labels(labels: &CellLabels) -> Self {
        CellFlagFields::classify(labels).pack()
    }

    /// Reinterpret a stored bit pattern.
    pub const fn from_bits(bits: u32) -> Self {
        CellFlag(bits)
    }

    /// Recompute from `labels`, discarding the previous contents.
    pub fn set(&mut self, labels: &CellLabels) {
        *self = Self::from_labels(labels);
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    #[inline]
    pub fn bit_flag(&self) -> u32 {
        self.0
    }

    #[inline]
    pub fn vertex_type(&self) -> VertexType {
        VertexType::from_bits(self.0 >> VERTEX_TYPE_SHIFT)
    }

    #[inline]
    pub fn face_crossing_type(&self, face: Face) -> FaceCrossingType {
        FaceCrossingType::from_bits(self.0 >> face.shift())
    }

    /// Face lookup by raw index; out-of-range indices read as no crossing.
    pub fn face_crossing_type_at(&self, index: usize) -> FaceCrossingType {
        Face::from_index(index)
            .map_or(FaceCrossingType::NoFaceCrossing, |face| self.face_crossing_type(face))
    }

    #[inline]
    pub fn is_edge_crossing(&self, edge: Edge) -> bool {
        self.0 & edge.bit() != 0
    }

    /// Edge lookup by raw index; out-of-range indices read as not crossing.
    pub fn is_edge_crossing_at(&self, index: usize) -> bool {
        Edge::from_index(index).is_some_and(|edge| self.is_edge_crossing(edge))
    }

    #[inline]
    pub fn num_junctions(&self) -> u32 {
        (self.0 >> NUM_JUNCTIONS_SHIFT) & NUM_JUNCTIONS_MASK
    }

    /// Decode every field.
    pub fn fields(&self) -> CellFlagFields {
        CellFlagFields {
            vertex_type: self.vertex_type(),
            faces: Face::ALL.map(|face| self.face_crossing_type(face)),
            edges: Edge::ALL.map(|edge| self.is_edge_crossing(edge)),
            num_junctions: self.num_junctions() as u8,
        }
    }
}

impl From<CellFlag> for u32 {
    fn from(flag: CellFlag) -> Self {
        flag.0
    }
}

impl From<u32> for CellFlag {
    fn from(bits: u32) -> Self {
        CellFlag(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn homogeneous_cell_is_empty() {
        let flag = CellFlag::from_labels(&[7; 8]);
        assert_eq!(flag.bit_flag(), 0);
        assert_eq!(flag.vertex_type(), VertexType::NoVertex);
        assert_eq!(flag.num_junctions(), 0);
        assert!(Edge::ALL.iter().all(|&e| !flag.is_edge_crossing(e)));
    }

    #[test]
    fn bottom_top_split_is_a_surface() {
        let flag = CellFlag::from_labels(&[0, 0, 0, 0, 1, 1, 1, 1]);
        assert_eq!(flag.vertex_type(), VertexType::SurfaceVertex);
        assert_eq!(flag.num_junctions(), 0);
        for face in [Face::Left, Face::Right, Face::Back, Face::Front] {
            assert_eq!(
                flag.face_crossing_type(face),
                FaceCrossingType::SurfaceFaceCrossing
            );
        }
        assert_eq!(
            flag.face_crossing_type(Face::Bottom),
            FaceCrossingType::NoFaceCrossing
        );
        let vertical = [Edge::LeftBack, Edge::RightBack, Edge::LeftFront, Edge::RightFront];
        for edge in Edge::ALL {
            assert_eq!(flag.is_edge_crossing(edge), vertical.contains(&edge));
        }
    }

    #[test]
    fn alternating_corners_make_junction_faces() {
        // Bottom and top faces read (0, 1, 0, 1) around their cycle.
        let flag = CellFlag::from_labels(&[0, 1, 0, 1, 0, 1, 0, 1]);
        assert_eq!(
            flag.face_crossing_type(Face::Bottom),
            FaceCrossingType::JunctionFaceCrossing
        );
        assert_eq!(
            flag.face_crossing_type(Face::Top),
            FaceCrossingType::JunctionFaceCrossing
        );
        assert_eq!(
            flag.face_crossing_type(Face::Left),
            FaceCrossingType::SurfaceFaceCrossing
        );
        assert_eq!(flag.num_junctions(), 2);
        assert_eq!(flag.vertex_type(), VertexType::EdgeVertex);
    }

    #[test]
    fn all_distinct_labels_give_a_corner() {
        let flag = CellFlag::from_labels(&[0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(flag.num_junctions(), 6);
        assert_eq!(flag.vertex_type(), VertexType::CornerVertex);
        assert!(Edge::ALL.iter().all(|&e| flag.is_edge_crossing(e)));
    }

    #[test]
    fn bit_positions_match_layout() {
        let flag = CellFlag::from_labels(&[0, 0, 0, 0, 1, 1, 1, 1]);
        // Surface vertex, four surface side faces, four vertical edges.
        let expected: u32 = 1
            | (1 << 2)
            | (1 << 4)
            | (1 << 6)
            | (1 << 8)
            | (1 << 22)
            | (1 << 23)
            | (1 << 24)
            | (1 << 25);
        assert_eq!(flag.bit_flag(), expected);
    }

    #[test]
    fn undefined_codes_and_indices_read_as_none() {
        let flag = CellFlag::from_bits(TWO_BITS << FACE_SHIFT);
        assert_eq!(
            flag.face_crossing_type(Face::Left),
            FaceCrossingType::NoFaceCrossing
        );
        assert_eq!(flag.face_crossing_type_at(6), FaceCrossingType::NoFaceCrossing);
        assert!(!CellFlag::from_bits(u32::MAX).is_edge_crossing_at(12));
        assert!(CellFlag::from_bits(u32::MAX).is_edge_crossing_at(11));
    }

    #[test]
    fn set_overwrites_and_clear_resets() {
        let mut flag = CellFlag::new();
        flag.set(&[0, 1, 2, 3, 4, 5, 6, 7]);
        flag.set(&[0, 0, 0, 0, 1, 1, 1, 1]);
        assert_eq!(flag.num_junctions(), 0);
        flag.clear();
        assert_eq!(flag, CellFlag::default());
    }

    #[test]
    fn fields_repack_to_same_bits() {
        let flag = CellFlag::from_labels(&[3, 3, 5, 5, 3, 9, 5, 5]);
        assert_eq!(flag.fields().pack(), flag);
        assert_eq!(CellFlag::from_bits(flag.bit_flag()).fields(), flag.fields());
    }
}
