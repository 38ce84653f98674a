//! Freehand stroke element.

use super::ElementStyle;
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// A freehand stroke: an ordered list of points joined by straight segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Freedraw {
    /// Anchor x (first pointer position).
    pub x: f64,
    /// Anchor y (first pointer position).
    pub y: f64,
    /// Points in stroke order. Never empty in a loaded document.
    #[serde(with = "point_pairs")]
    pub points: Vec<Point>,
    #[serde(flatten)]
    pub style: ElementStyle,
}

impl Freedraw {
    /// Create a stroke whose path starts at `anchor`.
    pub fn new(anchor: Point, style: ElementStyle) -> Self {
        Self {
            x: anchor.x,
            y: anchor.y,
            points: vec![anchor],
            style,
        }
    }

    pub fn anchor(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Append a point to the end of the path.
    pub fn push_point(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Drop every point inside `footprint` (edges inclusive), keeping the
    /// survivors in order. Returns how many points were removed.
    ///
    /// Surviving points are not moved and no points are added across the hole.
    pub fn erase_within(&mut self, footprint: Rect) -> usize {
        let before = self.points.len();
        self.points.retain(|p| {
            !(p.x >= footprint.x0 && p.x <= footprint.x1 && p.y >= footprint.y0 && p.y <= footprint.y1)
        });
        before - self.points.len()
    }

    /// Bounding box of the points, if any.
    pub fn bounds(&self) -> Option<Rect> {
        let first = *self.points.first()?;
        Some(
            self.points
                .iter()
                .fold(Rect::from_points(first, first), |acc, p| acc.union_pt(*p)),
        )
    }

    /// Path through all points: move-to the first, line-to the rest.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();

        let Some((first, rest)) = self.points.split_first() else {
            return path;
        };

        path.move_to(*first);
        for point in rest {
            path.line_to(*point);
        }

        path
    }
}

/// Points travel as `[[x, y], ...]` on the wire. A stroke without points is
/// malformed.
mod point_pairs {
    use kurbo::Point;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(points: &[Point], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(points.iter().map(|p| [p.x, p.y]))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Point>, D::Error> {
        let pairs = Vec::<[f64; 2]>::deserialize(deserializer)?;
        if pairs.is_empty() {
            return Err(D::Error::invalid_length(0, &"at least one point"));
        }
        Ok(pairs.into_iter().map(|[x, y]| Point::new(x, y)).collect())
    }
}
