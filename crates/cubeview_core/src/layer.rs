//! Resolution of a move into the set of facelets it turns.

use std::f64::consts::FRAC_PI_2;

use cgmath::{Matrix3, Vector3};
use cubeview_notation::{Face, LayerKind, Move};
use smallvec::{SmallVec, smallvec};

use crate::{AmbiguousLayerError, Axis, FaceletId, FaceletSet, LATTICE_COORDS, Sign};

/// Facelets selected by a move, with the rotation that the move applies to
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLayer {
    /// Move that was resolved.
    pub mv: Move,
    /// Facelets that turn, in ascending order.
    pub facelets: Vec<FaceletId>,
    /// Axis of rotation.
    pub axis: Axis,
    /// Number of counterclockwise quarter turns around the positive direction
    /// of `axis`: `-2`, `-1`, `1`, or `2`.
    pub quarter_turns: i8,
}
impl ResolvedLayer {
    /// Returns the unit vector of the rotation axis.
    pub fn axis_vector(&self) -> Vector3<f64> {
        self.axis.unit_vector()
    }
    /// Returns the total rotation angle in radians, counterclockwise around
    /// [`Self::axis_vector()`].
    pub fn angle_radians(&self) -> f64 {
        f64::from(self.quarter_turns) * FRAC_PI_2
    }
    /// Returns the rotation matrix for the whole turn.
    pub fn rotation(&self) -> Matrix3<f64> {
        self.axis.rotation(self.angle_radians())
    }
}

/// Returns the axis and outward direction of an outer face.
fn outer_face_axis(face: Face) -> (Axis, Sign) {
    match face.reference_face() {
        Face::R => (Axis::X, Sign::Pos),
        Face::L => (Axis::X, Sign::Neg),
        Face::U => (Axis::Y, Sign::Pos),
        Face::D => (Axis::Y, Sign::Neg),
        Face::F => (Axis::Z, Sign::Pos),
        _ => (Axis::Z, Sign::Neg),
    }
}

/// Number of facelets expected on each plane perpendicular to an axis: 9 on
/// each outer face plane, and 12 side stickers on each of the other planes.
fn expected_plane_count(plane: i8) -> usize {
    if plane.abs() == 3 { 9 } else { 12 }
}

/// Determines which facelets a move turns and how it turns them.
///
/// Facelets are selected by exact comparison of their lattice coordinate
/// along the move axis against the planes of the layer. Every plane of the
/// layer must hold its expected number of facelets; otherwise the facelet
/// set is not on the lattice and [`AmbiguousLayerError`] is returned.
pub fn resolve(mv: Move, facelets: &FaceletSet) -> Result<ResolvedLayer, AmbiguousLayerError> {
    facelets.occupancy()?;

    let (axis, sign) = outer_face_axis(mv.face);
    let s = sign.to_i8();
    // Clockwise as seen from outside the reference face is clockwise around
    // its outward normal.
    let quarter_turns = -s * mv.modifier.clockwise_quarter_turns();

    let planes: SmallVec<[i8; 5]> = match mv.face.layer_kind() {
        LayerKind::Outer => smallvec![3 * s, 2 * s],
        LayerKind::Slice => smallvec![0],
        LayerKind::Wide => smallvec![3 * s, 2 * s, 0],
        LayerKind::WholeCube => LATTICE_COORDS.into_iter().collect(),
    };

    for &plane in &planes {
        let found = facelets
            .facelets()
            .iter()
            .filter(|f| f.lattice().coord(axis) == plane)
            .count();
        let expected = expected_plane_count(plane);
        if found != expected {
            return Err(AmbiguousLayerError::PlaneCount {
                axis,
                plane,
                expected,
                found,
            });
        }
    }

    let selected: Vec<FaceletId> = facelets
        .facelets()
        .iter()
        .enumerate()
        .filter(|(_, f)| planes.contains(&f.lattice().coord(axis)))
        .map(|(id, _)| id)
        .collect();

    log::debug!(
        "resolved {mv} to {} facelets around {axis} by {quarter_turns} quarter turns",
        selected.len(),
    );

    Ok(ResolvedLayer {
        mv,
        facelets: selected,
        axis,
        quarter_turns,
    })
}
