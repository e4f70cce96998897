//! Visual-encoding scales handed to the map layer.
//!
//! The controller derives these from the current summaries; applying them to
//! pixels is the renderer's job.

/// Radius range while no time filter is active.
pub const UNFILTERED_RADIUS_RANGE: (f64, f64) = (0.0, 25.0);

/// Radius range while a time filter is active. Filtered counts run smaller,
/// so the wider range keeps markers legible.
pub const FILTERED_RADIUS_RANGE: (f64, f64) = (3.0, 50.0);

/// Square-root scale from traffic totals to marker radii, so marker area
/// stays proportional to traffic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusScale {
    domain_max: f64,
    range_min: f64,
    range_max: f64,
}

impl RadiusScale {
    pub fn new(domain_max: u32, range: (f64, f64)) -> Self {
        Self {
            domain_max: domain_max as f64,
            range_min: range.0,
            range_max: range.1,
        }
    }

    /// Radius for one traffic total. A degenerate all-zero domain pins the
    /// output to the range minimum instead of dividing by zero.
    pub fn radius(&self, total: u32) -> f64 {
        if self.domain_max == 0.0 {
            return self.range_min;
        }
        let t = (total as f64 / self.domain_max).clamp(0.0, 1.0).sqrt();
        self.range_min + t * (self.range_max - self.range_min)
    }

    pub fn domain(&self) -> (f64, f64) {
        (0.0, self.domain_max)
    }

    pub fn range(&self) -> (f64, f64) {
        (self.range_min, self.range_max)
    }
}

/// Three-bucket quantize scale over [0, 1] for the departure ratio: the map
/// layer blends its arrival/departure colors by the returned stop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlowScale;

impl FlowScale {
    /// Snaps a ratio to one of the stops 0.0, 0.5, 1.0. Thirds of the
    /// domain map to consecutive stops; out-of-range input is clamped.
    pub fn quantize(&self, ratio: f64) -> f64 {
        let r = ratio.clamp(0.0, 1.0);
        if r < 1.0 / 3.0 {
            0.0
        } else if r < 2.0 / 3.0 {
            0.5
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_endpoints() {
        let scale = RadiusScale::new(100, UNFILTERED_RADIUS_RANGE);

        assert_eq!(scale.radius(0), 0.0);
        assert_eq!(scale.radius(100), 25.0);
    }

    #[test]
    fn test_radius_is_sqrt_shaped() {
        // A quarter of the max traffic draws at half the max radius.
        let scale = RadiusScale::new(100, UNFILTERED_RADIUS_RANGE);

        assert_eq!(scale.radius(25), 12.5);
    }

    #[test]
    fn test_filtered_range_offsets_the_minimum() {
        let scale = RadiusScale::new(100, FILTERED_RADIUS_RANGE);

        assert_eq!(scale.radius(0), 3.0);
        assert_eq!(scale.radius(100), 50.0);
    }

    #[test]
    fn test_zero_width_domain_never_produces_nan() {
        let scale = RadiusScale::new(0, FILTERED_RADIUS_RANGE);

        let r = scale.radius(0);
        assert_eq!(r, 3.0);
        assert!(!scale.radius(7).is_nan());
    }

    #[test]
    fn test_radius_clamps_above_domain() {
        let scale = RadiusScale::new(10, UNFILTERED_RADIUS_RANGE);

        assert_eq!(scale.radius(50), 25.0);
    }

    #[test]
    fn test_quantize_buckets() {
        let scale = FlowScale;

        assert_eq!(scale.quantize(0.0), 0.0);
        assert_eq!(scale.quantize(0.2), 0.0);
        assert_eq!(scale.quantize(1.0 / 3.0), 0.5);
        assert_eq!(scale.quantize(0.5), 0.5);
        assert_eq!(scale.quantize(2.0 / 3.0), 1.0);
        assert_eq!(scale.quantize(0.9), 1.0);
        assert_eq!(scale.quantize(1.0), 1.0);
    }

    #[test]
    fn test_quantize_clamps_out_of_range() {
        let scale = FlowScale;

        assert_eq!(scale.quantize(-0.5), 0.0);
        assert_eq!(scale.quantize(1.5), 1.0);
    }
}
