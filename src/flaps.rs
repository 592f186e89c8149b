//! Construction of the three dimensional flap solids of one wing segment. A dividing surface,
//! lofted from a flap style's profile between the root and tip sections of the segment, cuts the
//! segment into the main wing and the flap, and the flap is then deflected about its hinge axis.
//!
//! Each flap style is a `FlapStyle` strategy selected from the `FlapType`.

mod fowler;
mod plain;
mod slotted;

use crate::airfoil::AirfoilSection;
use crate::common::points::mid_point;
use crate::errors::InvalidGeometry;
use crate::geom2::Point2;
use crate::geom3::{
    rotation_about, Iso3, LoftedSolid, Point3, RuledSurface, SectionFrame, UnitVec3, Vector3,
};
use crate::hld::FlapType;
use crate::notify::{Notifier, SizingEvent};
use crate::Result;
use tracing::debug;

pub use self::fowler::FowlerFlap;
pub use self::plain::PlainFlap;
pub use self::slotted::SlottedFlap;

pub trait FlapStyle {
    fn flap_type(&self) -> FlapType;

    /// The point of the section, in chord-normalized coordinates, through which the hinge axis
    /// passes when the hinge is at the chord fraction `hinge`.
    fn hinge_point(&self, airfoil: &AirfoilSection, hinge: f64) -> Point2;

    /// The open profile of the dividing surface in chord-normalized section coordinates. It must
    /// start and end outside of the section so that it cuts all the way through it.
    fn dividing_profile(&self, airfoil: &AirfoilSection, hinge: f64) -> Result<Vec<Point2>>;

    /// The translation applied to the flap after it has been rotated, for styles which slide
    /// out of the wing as they deflect.
    ///
    /// # Arguments
    ///
    /// * `airfoil`: the section of the segment
    /// * `hinge`: the hinge chord fraction
    /// * `mean_chord`: the mean of the root and tip chords of the segment
    /// * `deflection`: the flap deflection in degrees
    ///
    /// returns: Matrix<f64, Const<3>, Const<1>, ArrayStorage<f64, 3, 1>>
    fn displacement(
        &self,
        _airfoil: &AirfoilSection,
        _hinge: f64,
        _mean_chord: f64,
        _deflection: f64,
    ) -> Vector3 {
        Vector3::zeros()
    }

    /// The style whose dividing surface is substituted when this style's surface fails to cut
    /// the segment.
    fn fallback(&self) -> Option<FlapType> {
        None
    }
}

impl FlapType {
    /// The dividing surface and deflection strategy of this flap type.
    pub fn style(&self) -> Box<dyn FlapStyle> {
        match self {
            FlapType::Plain => PlainFlap::make(),
            FlapType::Slotted => SlottedFlap::make(),
            FlapType::Fowler => FowlerFlap::make(),
        }
    }
}

/// The result of cutting a flap from a wing segment.
#[derive(Debug, Clone)]
pub struct FlapSection {
    /// The part of the segment left after the flap is removed
    pub main_wing: LoftedSolid,

    /// The flap in its deflected position
    pub flap: LoftedSolid,

    /// The flap as cut, before deflection
    pub undeflected_flap: LoftedSolid,

    /// The hinge points at the root and tip of the segment
    pub hinge_axis: [Point3; 2],

    /// The rigid transform taking the undeflected flap to its deflected position
    pub transform: Iso3,

    /// The style whose dividing surface was actually used
    pub flap_type: FlapType,

    /// True when the requested style's dividing surface failed and its fallback was used
    pub substituted: bool,
}

/// Cuts and deflects flaps with a common hinge position and deflection.
pub struct FlapSynthesis<'a> {
    airfoil: &'a AirfoilSection,
    hinge: f64,
    deflection: f64,
    overlap_fraction: f64,
}

impl<'a> FlapSynthesis<'a> {
    /// # Arguments
    ///
    /// * `airfoil`: the section shared by the root and tip of every segment
    /// * `hinge`: the hinge position as a chord fraction
    /// * `deflection`: the flap deflection in degrees, positive trailing edge down
    /// * `overlap_fraction`: the dividing surface is extended past each end of a segment by this
    ///   fraction of the segment span
    ///
    /// returns: FlapSynthesis
    pub fn new(
        airfoil: &'a AirfoilSection,
        hinge: f64,
        deflection: f64,
        overlap_fraction: f64,
    ) -> Self {
        Self {
            airfoil,
            hinge,
            deflection,
            overlap_fraction,
        }
    }

    /// Cut a flap of the given type from a wing segment and deflect it. If the style's dividing
    /// surface cannot cut the segment and the style names a fallback, the fallback's surface is
    /// used and the substitution is reported.
    ///
    /// # Arguments
    ///
    /// * `segment`: the name of the segment, used in notifications
    /// * `solid`: the segment solid
    /// * `flap_type`: the requested flap type
    /// * `notifier`: receives the substitution event
    ///
    /// returns: Result<FlapSection, Box<dyn Error, Global>>
    pub fn build(
        &self,
        segment: &'static str,
        solid: &LoftedSolid,
        flap_type: FlapType,
        notifier: &dyn Notifier,
    ) -> Result<FlapSection> {
        self.build_with_style(segment, solid, flap_type.style().as_ref(), notifier)
    }

    fn build_with_style(
        &self,
        segment: &'static str,
        solid: &LoftedSolid,
        style: &dyn FlapStyle,
        notifier: &dyn Notifier,
    ) -> Result<FlapSection> {
        match self.cut(solid, style) {
            Ok((main_wing, flap)) => Ok(self.deflect(solid, style, main_wing, flap, false)),
            Err(e) => {
                let Some(fallback) = style.fallback() else {
                    return Err(e);
                };
                debug!("{} surface failed on the {} segment: {}", style.flap_type(), segment, e);
                notifier.report(SizingEvent::DividingSurfaceSubstituted {
                    segment,
                    requested: style.flap_type(),
                    used: fallback,
                });

                let substitute = fallback.style();
                let (main_wing, flap) = self.cut(solid, substitute.as_ref())?;
                Ok(self.deflect(solid, style, main_wing, flap, true))
            }
        }
    }

    /// Split the segment with the style's dividing surface, returning the main wing and the flap.
    /// Fragments are ranked by volume: the largest is the main wing, the second the flap, and any
    /// others are slivers which are discarded.
    fn cut(&self, solid: &LoftedSolid, style: &dyn FlapStyle) -> Result<(LoftedSolid, LoftedSolid)> {
        let root = solid.root_frame();
        let tip = solid.tip_frame();
        let overlap = self.overlap_fraction * (tip.origin.y - root.origin.y).abs();

        let profile = style.dividing_profile(self.airfoil, self.hinge)?;
        let surface =
            RuledSurface::from_profile(&profile, root, tip, overlap)?.transformed(solid.placement());
        let mut fragments = solid.split(&surface)?;
        if fragments.len() < 2 {
            return Err(Box::new(InvalidGeometry::SplitFailed {
                style: style.flap_type().name(),
                fragments: fragments.len(),
            }));
        }
        if fragments.len() > 2 {
            debug!("Discarding {} sliver(s) from the flap cut", fragments.len() - 2);
        }

        fragments.sort_by(|a, b| b.volume().total_cmp(&a.volume()));
        let mut ranked = fragments.into_iter();
        match (ranked.next(), ranked.next()) {
            (Some(main_wing), Some(flap)) => Ok((main_wing, flap)),
            _ => Err(Box::new(InvalidGeometry::GeometricOpFailed)),
        }
    }

    /// Deflect the flap about the hinge axis of `style`, which keeps the hinge and displacement
    /// of the requested style even when another style's surface was used for the cut.
    fn deflect(
        &self,
        solid: &LoftedSolid,
        style: &dyn FlapStyle,
        main_wing: LoftedSolid,
        flap: LoftedSolid,
        substituted: bool,
    ) -> FlapSection {
        let root = solid.root_frame();
        let tip = solid.tip_frame();
        let hinge_point = style.hinge_point(self.airfoil, self.hinge);
        let root_hinge = root.to_world(&hinge_point);
        let tip_hinge = tip.to_world(&hinge_point);

        let mean_chord = 0.5 * (root.chord + tip.chord);
        let displacement = style.displacement(self.airfoil, self.hinge, mean_chord, self.deflection);
        let local = deflection_transform(
            root,
            tip,
            &root_hinge,
            &tip_hinge,
            self.hinge,
            self.deflection,
            &displacement,
        );

        // The transform is built in the frame of the section definitions and carried over to
        // wherever the segment has been placed
        let placement = solid.placement();
        let transform = placement * local * placement.inverse();

        FlapSection {
            main_wing,
            flap: flap.transformed(&transform),
            undeflected_flap: flap,
            hinge_axis: [placement * root_hinge, placement * tip_hinge],
            transform,
            flap_type: if substituted {
                style.fallback().unwrap_or(style.flap_type())
            } else {
                style.flap_type()
            },
            substituted,
        }
    }
}

/// The rotations about the vertical (z) and chordwise (x) axes, in radians, which keep a
/// displaced flap of a tapered, swept segment aligned with the trailing edge of the wing it was
/// cut from.
///
/// # Arguments
///
/// * `root`: the root section of the segment
/// * `tip`: the tip section of the segment
/// * `hinge`: the hinge chord fraction
/// * `displacement`: the flap displacement
///
/// returns: (f64, f64)
pub fn taper_corrections(
    root: &SectionFrame,
    tip: &SectionFrame,
    hinge: f64,
    displacement: &Vector3,
) -> (f64, f64) {
    let cr = root.chord;
    let ct = tip.chord;
    let mean_chord = 0.5 * (cr + ct);
    let dc = ct - cr;
    let dx_le = tip.origin.x - root.origin.x;
    let dy = tip.origin.y - root.origin.y;

    let z_corr = ((((1.0 - hinge - displacement.x / mean_chord) * dc) + dx_le) / dy).atan()
        - (((1.0 - hinge) * dc + dx_le) / dy).atan();
    let x_corr = -(displacement.z * (0.5 * (cr / ct - 1.0) + 1.0) * (1.0 - ct / cr) / dy).atan();

    (z_corr, x_corr)
}

/// The rigid transform of a flap: rotation by the deflection about the hinge axis (positive
/// trailing edge down), then the taper corrections about the vertical and chordwise axes through
/// the middle of the hinge axis, then the displacement.
fn deflection_transform(
    root: &SectionFrame,
    tip: &SectionFrame,
    root_hinge: &Point3,
    tip_hinge: &Point3,
    hinge: f64,
    deflection: f64,
    displacement: &Vector3,
) -> Iso3 {
    let axis = UnitVec3::new_normalize(tip_hinge - root_hinge);
    let rotate = rotation_about(root_hinge, &axis, deflection.to_radians());

    let (z_corr, x_corr) = taper_corrections(root, tip, hinge, displacement);
    let center = mid_point(root_hinge, tip_hinge);
    let rz = rotation_about(&center, &Vector3::z_axis(), z_corr);
    let rx = rotation_about(&center, &Vector3::x_axis(), x_corr);
    let shift = Iso3::translation(displacement.x, displacement.y, displacement.z);

    shift * rx * rz * rotate
}
