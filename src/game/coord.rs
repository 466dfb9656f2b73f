use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::geometry::LatLng;

/// Game tiles per display unit along each axis.
pub const TILES_PER_UNIT: i64 = 4;

/// Horizontal offset of the display origin, in game tiles.
pub const X_ORIGIN: i64 = 4096;

/// Vertical offset of the display origin, in game tiles.
pub const Y_ORIGIN: i64 = 50370;

/// Vertical flip baseline applied after the origin shift.
pub const Y_BASELINE: i64 = 60;

/// Horizontal shift of each plane's tile layer, in game tiles.
pub const PLANE_X_STRIDE: i64 = 13056;

/// Floor/elevation index of the game world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Plane(u8);

impl Plane {
    pub const MIN: Plane = Plane(0);
    pub const MAX: Plane = Plane(3);

    pub fn new(value: i64) -> Result<Self, GameError> {
        if (Self::MIN.0 as i64..=Self::MAX.0 as i64).contains(&value) {
            Ok(Plane(value as u8))
        } else {
            Err(GameError::PlaneOutOfRange(value))
        }
    }

    pub fn index(self) -> i64 {
        self.0 as i64
    }
}

impl TryFrom<i64> for Plane {
    type Error = GameError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Plane::new(value)
    }
}

impl From<Plane> for i64 {
    fn from(plane: Plane) -> Self {
        plane.index()
    }
}

impl std::fmt::Display for Plane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Integer tile address in the game world.
///
/// Serializes as an `[x, y]` pair, the shape the vertex list uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i64; 2]", into = "[i64; 2]")]
pub struct GameCoord {
    pub x: i64,
    pub y: i64,
}

impl GameCoord {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Map a display position to the game tile it covers on `plane`.
    ///
    /// Both components are floored before scaling so every display
    /// position inside a unit cell maps to the same tile:
    /// - x = floor(lng) * 4 - 4096 + 13056 * plane
    /// - y = 60 - (floor(lat) * 4 - 50370)
    pub fn from_display(latlng: LatLng, plane: Plane) -> Self {
        // Float casts saturate; the arithmetic saturates too so positions
        // outside the map clamp instead of overflowing.
        let cell = latlng.floored();
        let x = (cell.lng as i64)
            .saturating_mul(TILES_PER_UNIT)
            .saturating_sub(X_ORIGIN)
            .saturating_add(PLANE_X_STRIDE * plane.index());
        let y = Y_BASELINE.saturating_sub(
            (cell.lat as i64)
                .saturating_mul(TILES_PER_UNIT)
                .saturating_sub(Y_ORIGIN),
        );
        Self { x, y }
    }

    /// Map a display position to a game tile without the plane shift.
    ///
    /// This is the address the click-copy readout shows; the plane is
    /// reported next to it instead of being folded into x.
    pub fn from_display_unshifted(latlng: LatLng) -> Self {
        Self::from_display(latlng, Plane::MIN)
    }

    /// Display position of the corner of the unit cell holding this tile.
    pub fn to_display(self, plane: Plane) -> LatLng {
        let lng = (self.x + X_ORIGIN - PLANE_X_STRIDE * plane.index()) as f64
            / TILES_PER_UNIT as f64;
        let lat = (Y_BASELINE + Y_ORIGIN - self.y) as f64 / TILES_PER_UNIT as f64;
        LatLng::new(lat, lng)
    }
}

impl From<[i64; 2]> for GameCoord {
    fn from([x, y]: [i64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<GameCoord> for [i64; 2] {
    fn from(c: GameCoord) -> Self {
        [c.x, c.y]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_maps_to_known_tile() {
        let c = GameCoord::from_display(LatLng::new(0.0, 0.0), Plane::MIN);
        assert_eq!(c, GameCoord::new(-4096, 50430));
    }

    #[test]
    fn test_plane_shifts_x_only() {
        let p2 = Plane::new(2).unwrap();
        let c = GameCoord::from_display(LatLng::new(0.0, 0.0), p2);
        assert_eq!(c, GameCoord::new(-4096 + 2 * 13056, 50430));
    }

    #[test]
    fn test_floor_not_round() {
        let a = GameCoord::from_display(LatLng::new(10.9, 20.9), Plane::MIN);
        let b = GameCoord::from_display(LatLng::new(10.0, 20.0), Plane::MIN);
        assert_eq!(a, b);

        let neg = GameCoord::from_display(LatLng::new(-0.1, -0.1), Plane::MIN);
        assert_eq!(neg, GameCoord::new(-4100, 50434));
    }

    #[test]
    fn test_far_positions_clamp_instead_of_overflowing() {
        let far = GameCoord::from_display(LatLng::new(0.0, 3.0e18), Plane::MAX);
        assert_eq!(far.x, i64::MAX);
        assert_eq!(far.y, 50430);

        let far = GameCoord::from_display(LatLng::new(-3.0e18, f64::NEG_INFINITY), Plane::MIN);
        assert_eq!(far.x, i64::MIN);
        assert_eq!(far.y, i64::MAX);
    }

    #[test]
    fn test_to_display_inverts_cell_corner() {
        let plane = Plane::new(1).unwrap();
        let corner = LatLng::new(12000.0, 1824.0);
        let tile = GameCoord::from_display(corner, plane);
        assert_eq!(tile.to_display(plane), corner);
    }

    #[test]
    fn test_plane_range() {
        assert!(Plane::new(0).is_ok());
        assert!(Plane::new(3).is_ok());
        assert_eq!(Plane::new(4), Err(GameError::PlaneOutOfRange(4)));
        assert_eq!(Plane::new(-1), Err(GameError::PlaneOutOfRange(-1)));
    }
}
