use serde::{Deserialize, Serialize};

/// A point in the map's display coordinate space.
///
/// The display space is the lat/lng-like plane the map widget renders in.
/// It is not geographic: one display unit is four game tiles wide, see
/// [`crate::game::GameCoord`] for the mapping.
///
/// Serializes as a `[lat, lng]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Largest absolute component a position may have. Keeps the game
    /// transform well inside `i64` range.
    pub const MAX_ABS: f64 = 1.0e9;

    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Round both components to the nearest integer.
    ///
    /// Halves round toward positive infinity (`-0.5 -> 0`, `0.5 -> 1`) so a
    /// vertex dropped on a tile boundary lands on the same grid line no
    /// matter which side of the origin it is on.
    pub fn snapped(self) -> Self {
        Self {
            lat: round_half_up(self.lat),
            lng: round_half_up(self.lng),
        }
    }

    /// Truncate both components toward negative infinity.
    pub fn floored(self) -> Self {
        Self {
            lat: self.lat.floor(),
            lng: self.lng.floor(),
        }
    }

    pub fn offset(self, dlat: f64, dlng: f64) -> Self {
        Self {
            lat: self.lat + dlat,
            lng: self.lng + dlng,
        }
    }

    /// Finite and no further than [`LatLng::MAX_ABS`] from the origin on either axis.
    pub fn is_within_bounds(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && self.lat.abs() <= Self::MAX_ABS
            && self.lng.abs() <= Self::MAX_ABS
    }

    pub fn is_integral(&self) -> bool {
        self.lat.fract() == 0.0 && self.lng.fract() == 0.0
    }
}

impl From<[f64; 2]> for LatLng {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<LatLng> for [f64; 2] {
    fn from(p: LatLng) -> Self {
        [p.lat, p.lng]
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// A pixel position, either relative to the map container or to the
/// map's layer origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn divide_by(self, factor: f64) -> Self {
        Self {
            x: self.x / factor,
            y: self.y / factor,
        }
    }
}

fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapped_rounds_halves_up() {
        let p = LatLng::new(0.5, -0.5).snapped();
        assert_eq!(p.lat, 1.0);
        assert_eq!(p.lng, 0.0);

        let p = LatLng::new(-2.5, 3.49).snapped();
        assert_eq!(p.lat, -2.0);
        assert_eq!(p.lng, 3.0);
    }

    #[test]
    fn test_floored_truncates_toward_negative_infinity() {
        let p = LatLng::new(1.9, -0.1).floored();
        assert_eq!(p, LatLng::new(1.0, -1.0));
    }

    #[test]
    fn test_latlng_serializes_as_pair() {
        let json = serde_json::to_string(&LatLng::new(1.5, -2.0)).unwrap();
        assert_eq!(json, "[1.5,-2.0]");

        let back: LatLng = serde_json::from_str("[3.0, 4.0]").unwrap();
        assert_eq!(back, LatLng::new(3.0, 4.0));
    }

    #[test]
    fn test_bounds_reject_non_finite_and_huge() {
        assert!(LatLng::new(-50370.0, 12800.0).is_within_bounds());
        assert!(!LatLng::new(f64::NAN, 0.0).is_within_bounds());
        assert!(!LatLng::new(0.0, f64::INFINITY).is_within_bounds());
        assert!(!LatLng::new(0.0, 3.0e18).is_within_bounds());
    }

    #[test]
    fn test_is_integral() {
        assert!(LatLng::new(3.0, -7.0).is_integral());
        assert!(!LatLng::new(3.2, -7.0).is_integral());
    }
}
