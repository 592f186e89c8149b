//! The three dimensional wing, assembled from five spanwise segments: the center section inside
//! the fuselage, the inboard flap segment out to the kink, the gap between the flaps, the outboard
//! flap segment out to the aileron, and the outer wing. Flaps are cut from the flap segments
//! according to the selected flap count.

use crate::flaps::{FlapSection, FlapSynthesis};
use crate::geom3::{LoftedSolid, SectionFrame};
use crate::hld::FlapType;
use crate::notify::{Notifier, SizingEvent};
use crate::planform::Planform;
use crate::Result;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SegmentKind {
    Center,
    InboardFlap,
    Gap,
    OutboardFlap,
    Outer,
}

impl SegmentKind {
    pub fn name(&self) -> &'static str {
        match self {
            SegmentKind::Center => "center",
            SegmentKind::InboardFlap => "inboard flap",
            SegmentKind::Gap => "flap gap",
            SegmentKind::OutboardFlap => "outboard flap",
            SegmentKind::Outer => "outer",
        }
    }

    /// Whether a flap is cut from this segment when `flap_count` flaps are fitted. A single flap
    /// is always the inboard one.
    pub fn is_flapped(&self, flap_count: usize) -> bool {
        match self {
            SegmentKind::InboardFlap => flap_count >= 1,
            SegmentKind::OutboardFlap => flap_count >= 2,
            _ => false,
        }
    }
}

/// One spanwise piece of the wing between two sections of the planform.
#[derive(Debug, Clone)]
pub struct WingSegment {
    pub kind: SegmentKind,
    pub solid: LoftedSolid,

    /// The flap cut from the segment, or `None` if the segment is unflapped
    pub flap: Option<FlapSection>,
}

impl WingSegment {
    /// Build the unflapped segment between the spanwise positions `y0` and `y1`.
    pub fn new(planform: &Planform, kind: SegmentKind, y0: f64, y1: f64) -> Result<Self> {
        let frame = |y: f64| SectionFrame::new(planform.leading_edge_at(y), planform.chord_at(y));
        let solid = LoftedSolid::new(frame(y0), frame(y1), planform.airfoil.points())?;
        Ok(Self {
            kind,
            solid,
            flap: None,
        })
    }

    /// The solids which make up this segment: the whole segment if it is unflapped, otherwise the
    /// main wing remainder and the deflected flap.
    pub fn solids(&self) -> Vec<&LoftedSolid> {
        match &self.flap {
            Some(f) => vec![&f.main_wing, &f.flap],
            None => vec![&self.solid],
        }
    }
}

/// The flap configuration applied to the wing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlapLayout {
    pub flap_type: FlapType,
    pub hinge: f64,
    pub flap_count: usize,

    /// Deflection in degrees, positive trailing edge down
    pub deflection: f64,
}

#[derive(Debug, Clone)]
pub struct WingAssembly {
    segments: Vec<WingSegment>,
}

impl WingAssembly {
    /// Build the segments of one side of the wing and cut the flaps from them. A segment whose
    /// flap cannot be constructed is reported and left unflapped.
    ///
    /// # Arguments
    ///
    /// * `planform`: the wing planform
    /// * `layout`: the flap configuration, or `None` for a clean wing
    /// * `overlap_fraction`: the spanwise overlap of the dividing surfaces, as a fraction of the
    ///   segment span
    /// * `notifier`: receives the geometry failure and substitution events
    ///
    /// returns: Result<WingAssembly, Box<dyn Error, Global>>
    pub fn build(
        planform: &Planform,
        layout: Option<&FlapLayout>,
        overlap_fraction: f64,
        notifier: &dyn Notifier,
    ) -> Result<Self> {
        let outer_start = planform.kink_position + planform.flap_gap;
        let aileron = planform.outer_flap_limit * planform.span;
        let bounds = [
            (SegmentKind::Center, 0.0, planform.fuselage_radius),
            (SegmentKind::InboardFlap, planform.fuselage_radius, planform.kink_position),
            (SegmentKind::Gap, planform.kink_position, outer_start),
            (SegmentKind::OutboardFlap, outer_start, aileron),
            (SegmentKind::Outer, aileron, planform.span),
        ];

        let mut segments = Vec::with_capacity(bounds.len());
        for (kind, y0, y1) in bounds {
            let mut segment = WingSegment::new(planform, kind, y0, y1)?;
            if let Some(layout) = layout.filter(|l| kind.is_flapped(l.flap_count)) {
                let synthesis = FlapSynthesis::new(
                    &planform.airfoil,
                    layout.hinge,
                    layout.deflection,
                    overlap_fraction,
                );
                match synthesis.build(kind.name(), &segment.solid, layout.flap_type, notifier) {
                    Ok(flap) => segment.flap = Some(flap),
                    Err(e) => notifier.report(SizingEvent::GeometryFailed {
                        segment: kind.name(),
                        message: e.to_string(),
                    }),
                }
            }
            segments.push(segment);
        }

        debug!(
            "Assembled wing with {} segments and {} flap(s)",
            segments.len(),
            segments.iter().filter(|s| s.flap.is_some()).count()
        );
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[WingSegment] {
        &self.segments
    }

    pub fn segment(&self, kind: SegmentKind) -> Option<&WingSegment> {
        self.segments.iter().find(|s| s.kind == kind)
    }

    /// The number of segments with a flap actually cut from them.
    pub fn flap_count(&self) -> usize {
        self.segments.iter().filter(|s| s.flap.is_some()).count()
    }

    /// Every solid of the assembled wing, in spanwise order.
    pub fn solids(&self) -> Vec<&LoftedSolid> {
        self.segments.iter().flat_map(|s| s.solids()).collect()
    }

    /// The total volume of one side of the wing.
    pub fn volume(&self) -> f64 {
        self.solids().iter().map(|s| s.volume()).sum()
    }
}
