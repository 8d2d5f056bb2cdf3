/// Curves and the collection interface the viewer consumes

use std::ops::Range;

/// One named measurement: (x, y) samples with x strictly increasing
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub name: String,
    pub samples: Vec<[f64; 2]>,
}

impl Curve {
    pub fn new(name: impl Into<String>, samples: Vec<[f64; 2]>) -> Self {
        Self {
            name: name.into(),
            samples,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Index range of the samples whose x lies in `[lo, hi]`.
    ///
    /// Relies on x being sorted; two binary searches, no scan.
    pub fn x_range(&self, lo: f64, hi: f64) -> Range<usize> {
        let start = self.samples.partition_point(|s| s[0] < lo);
        let end = self.samples.partition_point(|s| s[0] <= hi);
        start..end.max(start)
    }

    /// Linear interpolation of y at `x`, clamped to the end values
    pub fn value_at(&self, x: f64) -> Option<f64> {
        let first = self.samples.first()?;
        let last = self.samples.last()?;
        if x <= first[0] {
            return Some(first[1]);
        }
        if x >= last[0] {
            return Some(last[1]);
        }
        let i = self.samples.partition_point(|s| s[0] < x);
        let [x1, y1] = self.samples[i];
        if x1 == x {
            return Some(y1);
        }
        let [x0, y0] = self.samples[i - 1];
        Some(y0 + (y1 - y0) * (x - x0) / (x1 - x0))
    }
}

/// Aggregate statistics a collection can produce as overlay curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Aggregate {
    Mean,
    Median,
    Max,
    Min,
    Std,
}

impl Aggregate {
    pub const ALL: [Aggregate; 5] = [
        Aggregate::Mean,
        Aggregate::Median,
        Aggregate::Max,
        Aggregate::Min,
        Aggregate::Std,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Aggregate::Mean => "mean",
            Aggregate::Median => "median",
            Aggregate::Max => "max",
            Aggregate::Min => "min",
            Aggregate::Std => "std",
        }
    }
}

impl std::fmt::Display for Aggregate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// An ordered collection of uniquely named curves.
///
/// Membership only changes by replacing the whole collection. `stitch` and
/// `jump_correct` rewrite sample data in place and must keep every name.
pub trait CurveCollection {
    fn name(&self) -> &str;

    /// Label for the y axis
    fn measure_type(&self) -> &str;

    fn curves(&self) -> &[Curve];

    fn len(&self) -> usize {
        self.curves().len()
    }

    fn curve(&self, index: usize) -> Option<&Curve> {
        self.curves().get(index)
    }

    fn member_names(&self) -> Vec<String> {
        self.curves().iter().map(|c| c.name.clone()).collect()
    }

    /// Aggregate curve over all members, `None` for an empty collection
    fn aggregate(&self, kind: Aggregate) -> Option<Curve>;

    fn stitch(&mut self);

    fn jump_correct(&mut self, splices: &[f64], reference: usize);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> Curve {
        Curve::new("ramp", vec![[1.0, 10.0], [2.0, 20.0], [3.0, 30.0], [4.0, 40.0]])
    }

    #[test]
    fn test_x_range_is_inclusive() {
        let c = ramp();
        assert_eq!(c.x_range(2.0, 3.0), 1..3);
        assert_eq!(c.x_range(1.5, 3.5), 1..3);
        assert_eq!(c.x_range(0.0, 10.0), 0..4);
    }

    #[test]
    fn test_x_range_outside_is_empty() {
        let c = ramp();
        assert!(c.x_range(5.0, 6.0).is_empty());
        assert!(c.x_range(-2.0, 0.5).is_empty());
        assert!(c.x_range(2.2, 2.8).is_empty());
    }

    #[test]
    fn test_value_at_interpolates_and_clamps() {
        let c = ramp();
        assert_eq!(c.value_at(2.5), Some(25.0));
        assert_eq!(c.value_at(3.0), Some(30.0));
        assert_eq!(c.value_at(0.0), Some(10.0));
        assert_eq!(c.value_at(9.0), Some(40.0));
        assert_eq!(Curve::new("empty", Vec::new()).value_at(1.0), None);
    }
}
