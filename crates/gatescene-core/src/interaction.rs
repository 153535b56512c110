//! Grab/drag state machine.
//!
//! Transitions are pure: each returns the next state and leaves applying
//! element moves to the scene.

use crate::elements::ElementId;
use kurbo::{Point, Vec2};

/// Current pointer interaction with the scene.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interaction {
    /// No element grabbed.
    #[default]
    Idle,
    /// Pressed on an element, no movement yet.
    Grabbed { id: ElementId, offset: Vec2 },
    /// Grabbed element has followed the pointer at least once.
    Dragging { id: ElementId, offset: Vec2 },
}

impl Interaction {
    /// Press at `point`. `hit` is the picked element and its top-left corner.
    pub fn press(hit: Option<(ElementId, Point)>, point: Point) -> Self {
        match hit {
            Some((id, top_left)) => Interaction::Grabbed {
                id,
                offset: top_left - point,
            },
            None => Interaction::Idle,
        }
    }

    /// Pointer moved to `point`. Returns the next state and, when an element
    /// is grabbed, the element id with its new top-left corner.
    pub fn drag_to(self, point: Point) -> (Self, Option<(ElementId, Point)>) {
        match self {
            Interaction::Idle => (self, None),
            Interaction::Grabbed { id, offset } | Interaction::Dragging { id, offset } => {
                (Interaction::Dragging { id, offset }, Some((id, point + offset)))
            }
        }
    }

    /// Pointer released. Returns `Idle` and whether a drag happened.
    pub fn release(self) -> (Self, bool) {
        (Interaction::Idle, self.has_moved())
    }

    /// Grabbed element, if any.
    pub fn grabbed(&self) -> Option<ElementId> {
        match self {
            Interaction::Idle => None,
            Interaction::Grabbed { id, .. } | Interaction::Dragging { id, .. } => Some(*id),
        }
    }

    pub fn has_moved(&self) -> bool {
        matches!(self, Interaction::Dragging { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_press_on_nothing_stays_idle() {
        let state = Interaction::press(None, Point::new(1.0, 1.0));
        assert_eq!(state, Interaction::Idle);
        assert_eq!(state.grabbed(), None);
    }

    #[test]
    fn test_press_records_offset() {
        let id = Uuid::new_v4();
        let state = Interaction::press(Some((id, Point::new(100.0, 100.0))), Point::new(110.0, 120.0));
        assert_eq!(
            state,
            Interaction::Grabbed {
                id,
                offset: Vec2::new(-10.0, -20.0)
            }
        );
        assert!(!state.has_moved());
    }

    #[test]
    fn test_drag_keeps_offset() {
        let id = Uuid::new_v4();
        let state = Interaction::press(Some((id, Point::new(100.0, 100.0))), Point::new(110.0, 120.0));
        let (state, moved) = state.drag_to(Point::new(210.0, 220.0));
        assert!(state.has_moved());
        assert_eq!(moved, Some((id, Point::new(200.0, 200.0))));

        let (state, dragged) = state.release();
        assert!(dragged);
        assert_eq!(state, Interaction::Idle);
    }

    #[test]
    fn test_idle_move_does_nothing() {
        let (state, moved) = Interaction::Idle.drag_to(Point::new(5.0, 5.0));
        assert_eq!(state, Interaction::Idle);
        assert!(moved.is_none());
    }

    #[test]
    fn test_release_without_move() {
        let id = Uuid::new_v4();
        let state = Interaction::press(Some((id, Point::ZERO)), Point::ZERO);
        let (_, dragged) = state.release();
        assert!(!dragged);
    }
}
