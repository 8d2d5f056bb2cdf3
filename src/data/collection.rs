/// In-memory spectrum collection with aggregate and correction operations

use std::collections::HashSet;

use crate::data::curve::{Aggregate, Curve, CurveCollection};
use crate::error::{Result, ViewerError};

#[derive(Debug, Clone)]
pub struct SpectrumCollection {
    name: String,
    measure_type: String,
    curves: Vec<Curve>,
}

impl SpectrumCollection {
    /// Build a collection, rejecting duplicate curve names
    pub fn new(
        name: impl Into<String>,
        measure_type: impl Into<String>,
        curves: Vec<Curve>,
    ) -> Result<Self> {
        let mut seen = HashSet::with_capacity(curves.len());
        for curve in &curves {
            if !seen.insert(curve.name.as_str()) {
                return Err(ViewerError::DuplicateName(curve.name.clone()));
            }
        }
        Ok(Self {
            name: name.into(),
            measure_type: measure_type.into(),
            curves,
        })
    }
}

impl CurveCollection for SpectrumCollection {
    fn name(&self) -> &str {
        &self.name
    }

    fn measure_type(&self) -> &str {
        &self.measure_type
    }

    fn curves(&self) -> &[Curve] {
        &self.curves
    }

    fn aggregate(&self, kind: Aggregate) -> Option<Curve> {
        let grid = self.curves.iter().find(|c| !c.is_empty())?;
        let mut column = Vec::with_capacity(self.curves.len());
        let samples = grid
            .samples
            .iter()
            .map(|&[x, _]| {
                column.clear();
                column.extend(self.curves.iter().filter_map(|c| c.value_at(x)));
                [x, reduce(kind, &mut column)]
            })
            .collect();
        Some(Curve::new(format!("{}_{}", self.name, kind), samples))
    }

    fn stitch(&mut self) {
        for curve in &mut self.curves {
            stitch_curve(curve);
        }
        log::info!("Stitched {} spectra", self.curves.len());
    }

    fn jump_correct(&mut self, splices: &[f64], reference: usize) {
        let mut splices: Vec<f64> = splices.iter().copied().filter(|s| s.is_finite()).collect();
        splices.sort_by(f64::total_cmp);
        if reference > splices.len() {
            log::warn!(
                "Jump correction skipped: reference segment {} of {}",
                reference,
                splices.len() + 1
            );
            return;
        }
        for curve in &mut self.curves {
            jump_correct_curve(curve, &splices, reference);
        }
        log::info!(
            "Jump-corrected {} spectra at {:?} (reference segment {})",
            self.curves.len(),
            splices,
            reference
        );
    }
}

fn reduce(kind: Aggregate, values: &mut [f64]) -> f64 {
    let n = values.len();
    if n == 0 {
        return f64::NAN;
    }
    match kind {
        Aggregate::Mean => values.iter().sum::<f64>() / n as f64,
        Aggregate::Median => {
            values.sort_by(f64::total_cmp);
            if n % 2 == 1 {
                values[n / 2]
            } else {
                (values[n / 2 - 1] + values[n / 2]) / 2.0
            }
        }
        Aggregate::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        Aggregate::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
        Aggregate::Std => {
            if n < 2 {
                return 0.0;
            }
            let mean = values.iter().sum::<f64>() / n as f64;
            let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        }
    }
}

/// Collapse samples sharing an x value (detector overlap) into their mean
fn stitch_curve(curve: &mut Curve) {
    let mut samples = std::mem::take(&mut curve.samples);
    samples.sort_by(|a, b| a[0].total_cmp(&b[0]));

    let mut merged: Vec<[f64; 2]> = Vec::with_capacity(samples.len());
    let mut run = 0usize;
    for [x, y] in samples {
        match merged.last_mut() {
            Some(last) if last[0] == x => {
                // running mean over the duplicates seen so far
                run += 1;
                last[1] += (y - last[1]) / run as f64;
            }
            _ => {
                merged.push([x, y]);
                run = 1;
            }
        }
    }
    curve.samples = merged;
}

/// Additive jump correction.
///
/// Segment `k` spans `[splices[k-1], splices[k])`. Segments right of the
/// reference are shifted onto the last value before them, segments left of
/// it onto the first value after them.
fn jump_correct_curve(curve: &mut Curve, splices: &[f64], reference: usize) {
    let n = curve.samples.len();
    let mut bounds = Vec::with_capacity(splices.len() + 2);
    bounds.push(0);
    bounds.extend(
        splices
            .iter()
            .map(|&s| curve.samples.partition_point(|p| p[0] < s)),
    );
    bounds.push(n);

    let segments = bounds.len() - 1;
    for k in reference + 1..segments {
        let (start, end) = (bounds[k], bounds[k + 1]);
        if start == end || start == 0 {
            continue;
        }
        let offset = curve.samples[start - 1][1] - curve.samples[start][1];
        for p in &mut curve.samples[start..end] {
            p[1] += offset;
        }
    }
    for k in (0..reference).rev() {
        let (start, end) = (bounds[k], bounds[k + 1]);
        if start == end || end == n {
            continue;
        }
        let offset = curve.samples[end][1] - curve.samples[end - 1][1];
        for p in &mut curve.samples[start..end] {
            p[1] += offset;
        }
    }
}
