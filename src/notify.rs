//! The side channel through which the sizing process reports progress, advisories and recovered
//! failures. Nothing in the core depends on what a notifier does with an event; the sizing
//! results are the same with any implementation.

use crate::hld::FlapType;
use serde::Serialize;
use std::sync::Mutex;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SizingEvent {
    /// One unit of work in a named stage has completed.
    Progress {
        stage: &'static str,
        done: usize,
        total: usize,
    },

    /// A sectional lift value was treated as an outlier and replaced by its neighbor's value.
    OutlierReplaced {
        station: usize,
        original: f64,
        replacement: f64,
    },

    /// The planform failed validation and the default planform is used instead.
    InvalidPlanform { problems: Vec<String> },

    /// No flap configuration meets the target, the wing is built without flaps.
    Infeasible { message: String },

    /// The selected flap chord is very small and only a two segment flap meets the target.
    MarginalFlap { hinge: f64 },

    /// The dividing surface of one flap style could not cut the wing and the surface of another
    /// style was used for the segment.
    DividingSurfaceSubstituted {
        segment: &'static str,
        requested: FlapType,
        used: FlapType,
    },

    /// The flap of a wing segment could not be constructed and the segment was left unflapped.
    GeometryFailed {
        segment: &'static str,
        message: String,
    },

    /// The clean wing already reaches the target, no flap is sized.
    NoFlapRequired { clean_trimmed: f64, target: f64 },
}

pub trait Notifier: Sync {
    fn report(&self, event: SizingEvent);
}

/// Forwards every event to `tracing`: progress at debug level, advisories as warnings and
/// failures as errors.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn report(&self, event: SizingEvent) {
        match event {
            SizingEvent::Progress { stage, done, total } => {
                debug!("{}: {}/{}", stage, done, total);
            }
            SizingEvent::OutlierReplaced {
                station,
                original,
                replacement,
            } => {
                warn!(
                    "Sectional CLmax at station {} ({:.3}) looks like an outlier, replaced with {:.3}",
                    station, original, replacement
                );
            }
            SizingEvent::InvalidPlanform { problems } => {
                for p in problems.iter() {
                    warn!("{}", p);
                }
                error!("One or more planform inputs are invalid, the default planform was used instead");
            }
            SizingEvent::Infeasible { message } => {
                error!("{}", message);
            }
            SizingEvent::MarginalFlap { hinge } => {
                warn!(
                    "The flap with the hinge at {:.2} of the chord is only feasible with two \
                     segments, it may be too small to be practical",
                    hinge
                );
            }
            SizingEvent::DividingSurfaceSubstituted {
                segment,
                requested,
                used,
            } => {
                warn!(
                    "The {} flap could not be cut from the {} segment, a {} flap surface was used instead",
                    requested, segment, used
                );
            }
            SizingEvent::GeometryFailed { segment, message } => {
                error!("{} segment: {}", segment, message);
            }
            SizingEvent::NoFlapRequired {
                clean_trimmed,
                target,
            } => {
                info!(
                    "Trimmed clean CLmax {:.3} already reaches the target {:.3}, no flap required",
                    clean_trimmed, target
                );
            }
        }
    }
}

/// Keeps every event in order of arrival, for callers which present them after a run.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<SizingEvent>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SizingEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Notifier for RecordingNotifier {
    fn report(&self, event: SizingEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}
