/// Optional [min, max] bounds on an hourly rate. An absent bound is
/// unbounded on that side, so a free (0-priced) space passes whenever the
/// lower bound is unset or zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PriceRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn accepts(&self, price_per_hour: f64) -> bool {
        if let Some(min) = self.min {
            if price_per_hour < min {
                return false;
            }
        }
        if let Some(max) = self.max {
            if price_per_hour > max {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_within_bounds_passes() {
        assert!(PriceRange::new(Some(5.0), Some(15.0)).accepts(10.0));
    }

    #[test]
    fn price_below_min_is_rejected() {
        assert!(!PriceRange::new(Some(5.0), None).accepts(3.0));
    }

    #[test]
    fn price_above_max_is_rejected() {
        assert!(!PriceRange::new(None, Some(8.0)).accepts(8.5));
    }

    #[test]
    fn free_space_passes_unbounded_and_zero_min() {
        assert!(PriceRange::new(None, None).accepts(0.0));
        assert!(PriceRange::new(Some(0.0), None).accepts(0.0));
    }

    #[test]
    fn bounds_are_inclusive() {
        let range = PriceRange::new(Some(5.0), Some(15.0));
        assert!(range.accepts(5.0));
        assert!(range.accepts(15.0));
    }
}
