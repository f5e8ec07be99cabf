//! Cache key: coordinates, profile, and exclude flags (spec §4.7/§9).

use crate::geo::Coordinate;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    // stored as bit patterns so the key can implement Eq/Hash over f64 data
    points: Vec<(u64, u64)>,
    profile: &'static str,
    exclude_ferries: bool,
}

impl CacheKey {
    pub fn new(from: Coordinate, to: Coordinate, via: &[Coordinate], profile: &'static str, exclude_ferries: bool) -> Self {
        let mut points = Vec::with_capacity(via.len() + 2);
        points.push(bits(from));
        for v in via {
            points.push(bits(*v));
        }
        points.push(bits(to));
        Self {
            points,
            profile,
            exclude_ferries,
        }
    }
}

fn bits(c: Coordinate) -> (u64, u64) {
    (c.lat().to_bits(), c.lon().to_bits())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_inputs_produce_equal_keys() {
        let a = Coordinate::new(62.0, 129.7).unwrap();
        let b = Coordinate::new(61.0, 130.0).unwrap();
        let k1 = CacheKey::new(a, b, &[], "driving", false);
        let k2 = CacheKey::new(a, b, &[], "driving", false);
        assert_eq!(k1, k2);
    }

    #[test]
    fn exclude_flag_changes_key() {
        let a = Coordinate::new(62.0, 129.7).unwrap();
        let b = Coordinate::new(61.0, 130.0).unwrap();
        let k1 = CacheKey::new(a, b, &[], "driving", false);
        let k2 = CacheKey::new(a, b, &[], "driving", true);
        assert_ne!(k1, k2);
    }
}
