//! Point-in-polygon primitive.

use geo::{BoundingRect, Contains, Polygon};

use crate::domain::Position;

/// Whether `position` lies strictly inside `polygon`.
///
/// Points on an edge or vertex are outside. Interior rings are holes.
/// A bounding-box test runs first so far-away buildings are rejected
/// without walking their rings.
pub fn ring_contains(polygon: &Polygon<f64>, position: Position) -> bool {
    let Some(rect) = polygon.bounding_rect() else {
        return false;
    };

    let (x, y) = (position.lng(), position.lat());
    if x < rect.min().x || x > rect.max().x || y < rect.min().y || y > rect.max().y {
        return false;
    }

    polygon.contains(&position.to_point())
}
