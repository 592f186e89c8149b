use crate::aero::{SectionQuery, SectionSolver};
use crate::notify::{Notifier, SizingEvent};
use crate::planform::Planform;
use crate::sizing::SizingParams;
use crate::Result;
use serde::{Deserialize, Serialize};

/// The ratios to a reference value beyond which a sectional lift value counts as an outlier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlierRatios {
    pub high: f64,
    pub low: f64,
}

impl Default for OutlierRatios {
    fn default() -> Self {
        Self {
            high: 1.2,
            low: 0.85,
        }
    }
}

impl OutlierRatios {
    fn deviates(&self, value: f64, reference: f64) -> bool {
        value > self.high * reference || value < self.low * reference
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiftSample {
    pub span_fraction: f64,
    pub cl_max: f64,
}

/// Sectional maximum lift coefficients at stations along the span, ordered from root to tip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionalLiftTable {
    samples: Vec<LiftSample>,
}

impl SectionalLiftTable {
    pub fn new(samples: Vec<LiftSample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[LiftSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn span_fractions(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.span_fraction).collect()
    }

    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().map(|s| s.cl_max).sum::<f64>() / self.samples.len() as f64
    }

    /// Replace single station outliers with the value of their neighbor in one pass from root to
    /// tip. A value is replaced when it deviates from its neighbor and from the table average
    /// by more than the ratios allow. Each station is compared against its already corrected
    /// predecessor, and the average is taken over the table as corrected so far, so the result
    /// depends on the order of the pass. The root station has no predecessor and is compared
    /// against its successor when `include_first` is set.
    ///
    /// # Arguments
    ///
    /// * `ratios`: the outlier ratios
    /// * `include_first`: whether the root station is checked at all
    ///
    /// returns: the replaced stations as (index, original value, replacement value)
    pub fn correct_outliers(
        &mut self,
        ratios: &OutlierRatios,
        include_first: bool,
    ) -> Vec<(usize, f64, f64)> {
        let mut replaced = Vec::new();
        if self.samples.len() < 2 {
            return replaced;
        }

        if include_first {
            let value = self.samples[0].cl_max;
            let neighbor = self.samples[1].cl_max;
            if ratios.deviates(value, neighbor) && ratios.deviates(value, self.average()) {
                self.samples[0].cl_max = neighbor;
                replaced.push((0, value, neighbor));
            }
        }

        for k in 1..self.samples.len() {
            let value = self.samples[k].cl_max;
            let neighbor = self.samples[k - 1].cl_max;
            if ratios.deviates(value, neighbor) && ratios.deviates(value, self.average()) {
                self.samples[k].cl_max = neighbor;
                replaced.push((k, value, neighbor));
            }
        }

        replaced
    }
}

/// Builds the sectional lift table of a planform by querying a section solver at evenly spaced
/// spanwise stations, starting at the root.
pub struct SectionLiftProfile<'a> {
    solver: &'a dyn SectionSolver,
    params: &'a SizingParams,
}

impl<'a> SectionLiftProfile<'a> {
    pub fn new(solver: &'a dyn SectionSolver, params: &'a SizingParams) -> Self {
        Self { solver, params }
    }

    /// Query the solver at each station and smooth the result.
    ///
    /// # Arguments
    ///
    /// * `planform`: the wing planform
    /// * `notifier`: receives a progress event after each query and an event for each outlier
    ///
    /// returns: Result<SectionalLiftTable, Box<dyn Error, Global>>
    pub fn build(&self, planform: &Planform, notifier: &dyn Notifier) -> Result<SectionalLiftTable> {
        let n = self.params.stations;
        let mach = planform.speed / self.params.speed_of_sound;

        let mut samples = Vec::with_capacity(n);
        for j in 0..n {
            let span_fraction = j as f64 / n as f64;
            let chord = planform.chord_at(span_fraction * planform.span);
            let query = SectionQuery {
                span_fraction,
                chord,
                reynolds: planform.speed * chord / self.params.kinematic_viscosity,
                mach,
                airfoil: &planform.airfoil,
            };

            let cl_max = self.solver.cl_max(&query)?;
            samples.push(LiftSample {
                span_fraction,
                cl_max,
            });
            notifier.report(SizingEvent::Progress {
                stage: "sectional lift",
                done: j + 1,
                total: n,
            });
        }

        let mut table = SectionalLiftTable::new(samples);
        let replaced =
            table.correct_outliers(&self.params.outliers, self.params.correct_first_station);
        for (station, original, replacement) in replaced {
            notifier.report(SizingEvent::OutlierReplaced {
                station,
                original,
                replacement,
            });
        }

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use approx::assert_relative_eq;
    use rand::Rng;

    fn table(values: &[f64]) -> SectionalLiftTable {
        SectionalLiftTable::new(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| LiftSample {
                    span_fraction: i as f64 / values.len() as f64,
                    cl_max: *v,
                })
                .collect(),
        )
    }

    fn values(t: &SectionalLiftTable) -> Vec<f64> {
        t.samples().iter().map(|s| s.cl_max).collect()
    }

    #[test]
    fn single_low_outlier_replaced() {
        let mut t = table(&[1.5, 1.5, 0.5, 1.5, 1.5]);
        let replaced = t.correct_outliers(&OutlierRatios::default(), true);
        assert_eq!(values(&t), vec![1.5; 5]);
        assert_eq!(replaced, vec![(2, 0.5, 1.5)]);
    }

    #[test]
    fn first_station_uses_successor() {
        let mut t = table(&[2.0, 1.5, 1.5, 1.5, 1.5, 1.5]);
        t.correct_outliers(&OutlierRatios::default(), true);
        assert_eq!(values(&t), vec![1.5; 6]);

        let mut t = table(&[2.0, 1.5, 1.5, 1.5, 1.5, 1.5]);
        let replaced = t.correct_outliers(&OutlierRatios::default(), false);
        assert!(replaced.is_empty());
        assert_relative_eq!(values(&t)[0], 2.0);
    }

    #[test]
    fn near_average_value_is_kept() {
        // Deviates from its neighbor but not from the average of the table
        let mut t = table(&[1.0, 1.0, 1.25, 1.25, 1.25, 1.25]);
        let before = values(&t);
        t.correct_outliers(&OutlierRatios::default(), true);
        assert_eq!(values(&t), before);
    }

    #[test]
    fn correction_is_order_dependent() {
        // Two consecutive high values: the first is replaced, which makes the second deviate
        // from its corrected predecessor as well
        let mut t = table(&[1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 2.0]);
        let replaced = t.correct_outliers(&OutlierRatios::default(), true);
        assert_eq!(replaced.len(), 2);
        assert_eq!(values(&t), vec![1.0; 8]);
    }

    #[test]
    fn random_single_outliers_are_isolated() {
        let mut rng = rand::rng();
        for _ in 0..200 {
            let phase = rng.random_range(0.0..6.0);
            let base = (0..20)
                .map(|j| 1.4 + 0.1 * (j as f64 * 0.3 + phase).sin())
                .collect::<Vec<_>>();
            let index = rng.random_range(0..20);
            let factor = if rng.random_bool(0.5) { 1.8 } else { 0.5 };

            let mut injected = base.clone();
            injected[index] *= factor;
            let mut t = table(&injected);
            t.correct_outliers(&OutlierRatios::default(), true);
            let corrected = values(&t);

            for (j, v) in corrected.iter().enumerate() {
                if j == index {
                    let neighbor = if j == 0 { base[1] } else { base[j - 1] };
                    assert_relative_eq!(*v, neighbor);
                } else {
                    assert_relative_eq!(*v, base[j]);
                }
            }
        }
    }

    struct Spiky;

    impl SectionSolver for Spiky {
        fn cl_max(&self, query: &SectionQuery) -> Result<f64> {
            if (query.span_fraction - 0.5).abs() < 1e-9 {
                Ok(0.2)
            } else {
                Ok(1.0 + 1e-7 * query.reynolds)
            }
        }
    }

    #[test]
    fn build_queries_every_station() {
        let planform = Planform::default();
        let params = SizingParams::default();
        let notifier = RecordingNotifier::new();
        let t = SectionLiftProfile::new(&Spiky, &params)
            .build(&planform, &notifier)
            .unwrap();

        assert_eq!(t.len(), 20);
        assert_relative_eq!(t.samples()[19].span_fraction, 0.95);
        assert_relative_eq!(t.samples()[10].cl_max, t.samples()[9].cl_max);

        let re_root = 70.0 * 5.0 / 1.5111e-5;
        assert_relative_eq!(t.samples()[0].cl_max, 1.0 + 1e-7 * re_root, epsilon = 1e-9);

        let events = notifier.events();
        let progress = events
            .iter()
            .filter(|e| matches!(e, SizingEvent::Progress { .. }))
            .count();
        assert_eq!(progress, 20);
        assert!(events
            .iter()
            .any(|e| matches!(e, SizingEvent::OutlierReplaced { station: 10, .. })));
    }
}
