use std::collections::HashMap;

use cgmath::Matrix3;
use cubeview_notation::Move;
use smallvec::SmallVec;

use crate::{
    AmbiguousLayerError, CubeState, Decoration, DecorationKind, Facelet, LatticeError,
    LatticePoint, MalformedStateError, ResolvedLayer,
};

/// Index of a facelet in a [`FaceletSet`].
pub type FaceletId = usize;
/// Index of a decoration in a [`FaceletSet`].
pub type DecorationId = usize;

/// Live set of facelets and the decorations they own.
///
/// This is the single source of truth for the cube: the renderer reads the
/// presentation transforms, and the layer resolver reads the exact lattice
/// positions.
#[derive(Debug, Default, Clone)]
pub struct FaceletSet {
    facelets: Vec<Facelet>,
    decorations: Vec<Decoration>,
    /// Decorations owned by each facelet. Owned decorations are rotated
    /// together with their facelet and never independently.
    owned: Vec<SmallVec<[DecorationId; 2]>>,
}
impl FaceletSet {
    /// Constructs an empty facelet set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds 54 facelets at their canonical lattice positions, colored
    /// according to `state`.
    pub fn build(state: &CubeState) -> Self {
        let mut ret = Self::new();
        for (color, lattice) in state.0.into_iter().zip(CubeState::positions()) {
            ret.push_facelet(Facelet::new(color, lattice));
        }
        ret
    }
    /// Builds 54 facelets from a 54-character state string.
    pub fn build_from_str(state: &str) -> Result<Self, MalformedStateError> {
        Ok(Self::build(&state.parse()?))
    }
    fn push_facelet(&mut self, facelet: Facelet) {
        let mut owned = SmallVec::new();
        for kind in [DecorationKind::FloatingBack, DecorationKind::Backing] {
            owned.push(self.decorations.len());
            self.decorations.push(Decoration::new(kind, &facelet));
        }
        self.facelets.push(facelet);
        self.owned.push(owned);
    }

    /// Removes all facelets and decorations. Does nothing if the set is
    /// already empty.
    pub fn teardown(&mut self) {
        self.facelets.clear();
        self.decorations.clear();
        self.owned.clear();
    }

    /// Replaces the facelets with a cube built from `state`. If `state` is
    /// malformed, the existing facelets are left unchanged.
    pub fn rebuild(&mut self, state: &str) -> Result<(), MalformedStateError> {
        let new_set = Self::build_from_str(state)?;
        self.teardown();
        *self = new_set;
        Ok(())
    }

    /// Returns the number of facelets.
    pub fn len(&self) -> usize {
        self.facelets.len()
    }
    /// Returns whether there are no facelets.
    pub fn is_empty(&self) -> bool {
        self.facelets.is_empty()
    }

    /// Returns all facelets.
    pub fn facelets(&self) -> &[Facelet] {
        &self.facelets
    }
    /// Returns all facelets, mutably.
    ///
    /// Moving a facelet off the lattice makes every subsequent move fail with
    /// [`AmbiguousLayerError`] until the cube is rebuilt.
    pub fn facelets_mut(&mut self) -> &mut [Facelet] {
        &mut self.facelets
    }
    /// Returns all decorations.
    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }
    /// Returns the decorations owned by a facelet.
    pub fn owned_decorations(&self, facelet: FaceletId) -> &[DecorationId] {
        self.owned.get(facelet).map_or(&[], |owned| owned.as_slice())
    }

    /// Shows or hides the floating back-side decorations.
    pub fn set_back_sides_visible(&mut self, visible: bool) {
        for decoration in &mut self.decorations {
            if decoration.kind == DecorationKind::FloatingBack {
                decoration.visible = visible;
            }
        }
    }

    /// Rotates the presentation transform of some facelets, and every
    /// decoration they own, around an axis through the center of the cube.
    pub fn rotate(&mut self, facelets: &[FaceletId], rotation: &Matrix3<f64>) {
        for &id in facelets {
            let Some(facelet) = self.facelets.get_mut(id) else {
                continue;
            };
            facelet.apply_rotation(rotation);
            for &d in &self.owned[id] {
                self.decorations[d].apply_rotation(rotation);
            }
        }
    }

    /// Snaps the facelets of a completed turn onto the lattice and commits
    /// their new exact positions.
    ///
    /// The exact position is computed from the quarter-turn count of the
    /// layer. If rounding the presentation position disagrees with it, the
    /// exact position wins.
    pub fn settle(&mut self, layer: &ResolvedLayer) {
        for &id in &layer.facelets {
            let Some(facelet) = self.facelets.get_mut(id) else {
                continue;
            };
            let target = facelet.lattice().rotated(layer.axis, layer.quarter_turns);
            let snapped = facelet.snap();
            if snapped != target {
                log::error!(
                    "facelet {id} drifted to {snapped} while turning {}; expected {target}",
                    layer.mv,
                );
                facelet.set_lattice(target);
            }
            for &d in &self.owned[id] {
                self.decorations[d].snap_to(facelet);
            }
        }
    }

    /// Applies a move instantly, with no animation.
    pub fn apply_move(&mut self, mv: Move) -> Result<ResolvedLayer, AmbiguousLayerError> {
        let layer = crate::resolve(mv, self)?;
        self.rotate(&layer.facelets, &layer.rotation());
        self.settle(&layer);
        Ok(layer)
    }

    /// Checks that every facelet is at a distinct valid lattice position and
    /// returns a map from position to facelet.
    pub fn occupancy(&self) -> Result<HashMap<LatticePoint, FaceletId>, LatticeError> {
        let mut ret = HashMap::with_capacity(self.facelets.len());
        for (id, facelet) in self.facelets.iter().enumerate() {
            let point = facelet.lattice();
            if !point.is_facelet_position() {
                return Err(LatticeError::OffLattice { facelet: id, point });
            }
            if let Some(first) = ret.insert(point, id) {
                return Err(LatticeError::Overlapping {
                    first,
                    second: id,
                    point,
                });
            }
        }
        Ok(ret)
    }

    /// Reads the colors of the facelets back in state order.
    pub fn state(&self) -> Result<CubeState, LatticeError> {
        let occupancy = self.occupancy()?;
        let mut ret = CubeState::solved();
        for (color, point) in ret.0.iter_mut().zip(CubeState::positions()) {
            let id = *occupancy
                .get(&point)
                .ok_or(LatticeError::Unoccupied { point })?;
            *color = self.facelets[id].color();
        }
        Ok(ret)
    }
}
