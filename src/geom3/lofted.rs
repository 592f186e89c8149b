//! Ruled solids lofted between two parallel wing sections, and the ruled surfaces which cut them.
//!
//! A `LoftedSolid` keeps its cross-section as a single polygon in chord-normalized section
//! coordinates. Its root and tip faces are that polygon scaled by the local chord and placed at
//! the local leading edge, and its sides are the straight rulings between corresponding vertices.
//! Because every fragment cut from such a solid is again a ruled solid between the same two
//! sections, splitting reduces to a planar polygon split in section coordinates.

use crate::common::points::{dedup_ring, lerp_point, mid_point};
use crate::errors::InvalidGeometry;
use crate::geom2::{split_polygon, Point2};
use crate::geom3::{Iso3, Plane3, Point3, Vector3};
use crate::Result;
use itertools::Itertools;
use parry3d_f64::shape::TriMesh;

/// The placement of a chord-normalized section in the wing frame: the section's leading edge
/// point and its chord length. The section lies in the plane of constant y through the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionFrame {
    pub origin: Point3,
    pub chord: f64,
}

impl SectionFrame {
    pub fn new(origin: Point3, chord: f64) -> Self {
        Self { origin, chord }
    }

    /// Convert a chord-normalized (x, z) section coordinate to a point in the wing frame.
    pub fn to_world(&self, p: &Point2) -> Point3 {
        self.origin + Vector3::new(p.x * self.chord, 0.0, p.y * self.chord)
    }

    /// Convert a point in the wing frame to chord-normalized (x, z) section coordinates, ignoring
    /// its distance from the section plane.
    pub fn to_local(&self, p: &Point3) -> Point2 {
        let d = p - self.origin;
        Point2::new(d.x / self.chord, d.z / self.chord)
    }

    pub fn plane(&self) -> Plane3 {
        Plane3::from_point_and_normal(&self.origin, &Vector3::y_axis())
    }
}

/// A surface made of straight rulings between corresponding points of a root curve and a tip
/// curve.
#[derive(Debug, Clone)]
pub struct RuledSurface {
    root: Vec<Point3>,
    tip: Vec<Point3>,
}

impl RuledSurface {
    pub fn new(root: Vec<Point3>, tip: Vec<Point3>) -> Result<Self> {
        if root.len() != tip.len() {
            return Err(format!(
                "Root and tip curves of a ruled surface must have the same number of points ({} != {})",
                root.len(),
                tip.len()
            )
            .into());
        }
        if root.len() < 2 {
            return Err(Box::new(InvalidGeometry::NotEnoughPoints));
        }

        Ok(Self { root, tip })
    }

    /// Loft a chord-normalized profile curve between two section frames. Each ruling is extended
    /// along its own direction past both sections by a spanwise distance of `overlap`, so the
    /// surface reaches through the section planes and meets them exactly at the profile.
    ///
    /// # Arguments
    ///
    /// * `profile`: the open profile curve in (x, z) section coordinates
    /// * `root`: the frame of the root section
    /// * `tip`: the frame of the tip section
    /// * `overlap`: the spanwise distance to extend the surface beyond each section
    ///
    /// returns: Result<RuledSurface, Box<dyn Error, Global>>
    pub fn from_profile(
        profile: &[Point2],
        root: &SectionFrame,
        tip: &SectionFrame,
        overlap: f64,
    ) -> Result<Self> {
        let length = (tip.origin.y - root.origin.y).abs();
        if length < 1e-12 {
            return Err(Box::new(InvalidGeometry::GeometricOpFailed));
        }

        let f = overlap / length;
        let (root_curve, tip_curve): (Vec<Point3>, Vec<Point3>) = profile
            .iter()
            .map(|p| {
                let a = root.to_world(p);
                let b = tip.to_world(p);
                (a - (b - a) * f, b + (b - a) * f)
            })
            .unzip();
        Self::new(root_curve, tip_curve)
    }

    pub fn root(&self) -> &[Point3] {
        &self.root
    }

    pub fn tip(&self) -> &[Point3] {
        &self.tip
    }

    pub fn rulings(&self) -> impl Iterator<Item = (&Point3, &Point3)> {
        self.root.iter().zip(self.tip.iter())
    }

    pub fn transformed(&self, iso: &Iso3) -> Self {
        Self {
            root: self.root.iter().map(|p| iso * p).collect(),
            tip: self.tip.iter().map(|p| iso * p).collect(),
        }
    }
}

/// A closed solid ruled between a root and a tip section which share one cross-section polygon,
/// carrying a rigid placement which is applied on top of the section frames.
#[derive(Debug, Clone)]
pub struct LoftedSolid {
    root: SectionFrame,
    tip: SectionFrame,
    profile: Vec<Point2>,
    placement: Iso3,
}

impl LoftedSolid {
    /// Create a new lofted solid from two section frames and a closed cross-section polygon in
    /// chord-normalized coordinates. A repeated closing vertex is removed.
    ///
    /// # Arguments
    ///
    /// * `root`: the frame of the root section
    /// * `tip`: the frame of the tip section
    /// * `profile`: the cross-section polygon, in (x, z) section coordinates
    ///
    /// returns: Result<LoftedSolid, Box<dyn Error, Global>>
    pub fn new(root: SectionFrame, tip: SectionFrame, profile: &[Point2]) -> Result<Self> {
        let profile = dedup_ring(profile, 1e-12);
        if profile.len() < 3 {
            return Err(Box::new(InvalidGeometry::NotEnoughPoints));
        }
        if root.chord <= 0.0 || tip.chord <= 0.0 || (tip.origin.y - root.origin.y).abs() < 1e-12 {
            return Err(Box::new(InvalidGeometry::GeometricOpFailed));
        }

        Ok(Self {
            root,
            tip,
            profile,
            placement: Iso3::identity(),
        })
    }

    pub fn root_frame(&self) -> &SectionFrame {
        &self.root
    }

    pub fn tip_frame(&self) -> &SectionFrame {
        &self.tip
    }

    pub fn profile(&self) -> &[Point2] {
        &self.profile
    }

    pub fn placement(&self) -> &Iso3 {
        &self.placement
    }

    /// The vertices of the root face, in the wing frame with the placement applied.
    pub fn root_points(&self) -> Vec<Point3> {
        self.placed_ring(&self.root)
    }

    /// The vertices of the tip face, in the wing frame with the placement applied.
    pub fn tip_points(&self) -> Vec<Point3> {
        self.placed_ring(&self.tip)
    }

    fn placed_ring(&self, frame: &SectionFrame) -> Vec<Point3> {
        self.profile
            .iter()
            .map(|p| self.placement * frame.to_world(p))
            .collect()
    }

    fn vertices(&self) -> Vec<Point3> {
        let mut vertices = self.root_points();
        vertices.extend(self.tip_points());
        vertices
    }

    /// Triangulate the closed boundary: a fan over each end face and two triangles per ruling
    /// strip. All faces are wound the same way, so the triangulation is suitable for the
    /// divergence theorem even when the cross-section is not convex.
    fn faces(&self) -> Vec<[u32; 3]> {
        let n = self.profile.len() as u32;
        let mut faces = Vec::with_capacity(4 * n as usize);
        for i in 1..n - 1 {
            faces.push([0, i + 1, i]);
            faces.push([n, n + i, n + i + 1]);
        }
        for (i, j) in (0..n).circular_tuple_windows() {
            faces.push([i, j, n + j]);
            faces.push([i, n + j, n + i]);
        }
        faces
    }

    /// The enclosed volume, computed by summing signed tetrahedra over the closed triangulation.
    pub fn volume(&self) -> f64 {
        let vertices = self.vertices();
        let reference = vertices[0];
        let signed = self
            .faces()
            .iter()
            .map(|f| {
                let a = vertices[f[0] as usize] - reference;
                let b = vertices[f[1] as usize] - reference;
                let c = vertices[f[2] as usize] - reference;
                a.dot(&b.cross(&c))
            })
            .sum::<f64>();

        signed.abs() / 6.0
    }

    /// Export the boundary of the solid as a `parry3d` triangle mesh.
    pub fn to_trimesh(&self) -> Result<TriMesh> {
        Ok(TriMesh::new(self.vertices(), self.faces())?)
    }

    /// Return a copy of the solid with the isometry applied on top of its current placement.
    pub fn transformed(&self, iso: &Iso3) -> Self {
        let mut result = self.clone();
        result.placement = iso * self.placement;
        result
    }

    /// Split the solid with a ruled surface. Each ruling is intersected with the planes of the
    /// root and tip sections, and every ruling must reach both planes within its own extent.
    /// The traces on the two planes are converted to section coordinates and averaged into a
    /// single cutting polyline, which splits the cross-section polygon.
    ///
    /// Returns every fragment produced, which is a single copy of this solid if the surface does
    /// not pass through it.
    ///
    /// # Arguments
    ///
    /// * `surface`: the dividing surface, in the wing frame
    ///
    /// returns: Result<Vec<LoftedSolid, Global>, Box<dyn Error, Global>>
    pub fn split(&self, surface: &RuledSurface) -> Result<Vec<LoftedSolid>> {
        let local = surface.transformed(&self.placement.inverse());
        let root_plane = self.root.plane();
        let tip_plane = self.tip.plane();

        let mut cut = Vec::with_capacity(local.root().len());
        for (a, b) in local.rulings() {
            let tr = root_plane.intersection_param(a, b);
            let tt = tip_plane.intersection_param(a, b);
            let (tr, tt) = match (tr, tt) {
                (Some(tr), Some(tt)) if (0.0..=1.0).contains(&tr) && (0.0..=1.0).contains(&tt) => {
                    (tr, tt)
                }
                _ => return Err(Box::new(InvalidGeometry::SurfaceDoesNotPenetrate)),
            };

            let at_root = self.root.to_local(&lerp_point(a, b, tr));
            let at_tip = self.tip.to_local(&lerp_point(a, b, tt));
            cut.push(mid_point(&at_root, &at_tip));
        }

        let fragments = split_polygon(&self.profile, &cut)
            .into_iter()
            .map(|ring| -> Result<LoftedSolid> {
                let mut solid = LoftedSolid::new(self.root, self.tip, &ring)?;
                solid.placement = self.placement;
                Ok(solid)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(fragments)
    }
}
