//! Eraser hit-testing and removal.

use crate::elements::{Element, Font, TextMetrics};
use kurbo::{Point, Rect};

/// Half-width of the eraser footprint.
pub const DEFAULT_ERASER_RADIUS: f64 = 10.0;

/// What one eraser pass removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EraseOutcome {
    /// Elements removed outright (including strokes erased down to nothing).
    pub removed_elements: usize,
    /// Points removed from strokes that survived or were emptied.
    pub removed_points: usize,
}

impl EraseOutcome {
    pub fn changed(&self) -> bool {
        self.removed_elements > 0 || self.removed_points > 0
    }
}

/// Square eraser centred on the pointer.
///
/// Rectangles and text labels are removed whole; freehand strokes lose only
/// the points under the footprint and disappear once no point is left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Eraser {
    pub radius: f64,
}

impl Default for Eraser {
    fn default() -> Self {
        Self::new(DEFAULT_ERASER_RADIUS)
    }
}

impl Eraser {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    /// Square of side `2 * radius` centred on `at`.
    pub fn footprint(&self, at: Point) -> Rect {
        Rect::new(
            at.x - self.radius,
            at.y - self.radius,
            at.x + self.radius,
            at.y + self.radius,
        )
    }

    /// Erase at `at`, filtering `elements` in place. Survivors keep their order.
    pub fn erase(
        &self,
        elements: &mut Vec<Element>,
        at: Point,
        metrics: &impl TextMetrics,
        font: &Font,
    ) -> EraseOutcome {
        let footprint = self.footprint(at);
        let mut outcome = EraseOutcome::default();

        elements.retain_mut(|element| {
            let keep = match element {
                Element::Rectangle(rect) => !rect.overlaps(footprint),
                // Text is hit by the pointer itself, not the whole footprint.
                Element::Text(text) => !text.contains(at, metrics, font),
                Element::Freedraw(freedraw) => {
                    outcome.removed_points += freedraw.erase_within(footprint);
                    !freedraw.is_empty()
                }
                Element::Unknown(_) => true,
            };
            if !keep {
                outcome.removed_elements += 1;
            }
            keep
        });

        if outcome.changed() {
            log::debug!(
                "Eraser at ({}, {}) removed {} elements and {} points",
                at.x,
                at.y,
                outcome.removed_elements,
                outcome.removed_points
            );
        }

        outcome
    }
}
