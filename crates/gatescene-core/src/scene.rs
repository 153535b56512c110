//! Scene state: element arena, stacking order, hover/selection/drag and
//! the wiring assistant overlay.

use crate::elements::{Element, ElementId, ElementTrait};
use crate::guideline::Guidelines;
use crate::input::{KeyEvent, MouseButton, PointerEvent, SceneEvent};
use crate::interaction::Interaction;
use crate::selection::SelectionOverlay;
use crate::surface::{Pen, StrokeStyle, Surface};
use kurbo::{Affine, Circle, Point, Rect, Shape as KurboShape, Size};
use peniko::Color;
use std::collections::HashMap;
use thiserror::Error;

/// Increment applied to the stacking counter for every inserted element.
pub const Z_STEP: f64 = 0.001;

/// Key (released) that toggles the wiring assistant.
pub const ASSISTANT_TOGGLE_KEY: &str = "w";

/// Radius of the nearest-point marker.
const MARKER_RADIUS: f64 = 4.0;

/// Scene errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("Unknown element: {0}")]
    UnknownElement(ElementId),
}

/// The canvas scene.
#[derive(Debug, Clone)]
pub struct Scene {
    /// All elements, keyed by ID.
    elements: HashMap<ElementId, Element>,
    /// Element IDs sorted by descending stacking value (front to back).
    order: Vec<ElementId>,
    /// Selected element IDs.
    selection: Vec<ElementId>,
    /// Element currently under the pointer.
    hovered: Option<ElementId>,
    /// Grab/drag state.
    interaction: Interaction,
    /// Last stacking value handed out.
    next_z: f64,
    /// Wiring assistant guidelines.
    guidelines: Guidelines,
    /// Whether the wiring assistant overlay is shown.
    assistant_enabled: bool,
    /// Nearest guideline point to the pointer.
    closest_point: Option<Point>,
    /// Visible area in scene coordinates.
    viewport: Size,
    /// Background fill.
    pub background: Color,
    /// Selection outline painter.
    pub selection_overlay: SelectionOverlay,
    /// Repaint requested and not yet consumed.
    dirty: bool,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Guidelines::default())
    }
}

impl Scene {
    /// Create an empty scene with the given guidelines.
    pub fn new(guidelines: Guidelines) -> Self {
        Self {
            elements: HashMap::new(),
            order: Vec::new(),
            selection: Vec::new(),
            hovered: None,
            interaction: Interaction::Idle,
            next_z: 0.0,
            guidelines,
            assistant_enabled: true,
            closest_point: None,
            viewport: Size::new(640.0, 480.0),
            background: Color::from_rgba8(255, 255, 255, 255),
            selection_overlay: SelectionOverlay::default(),
            dirty: true,
        }
    }

    /// The seeded demo content: one gate, two rows of four squares.
    pub fn demo(viewport: Size) -> Self {
        let mut scene = Self::new(Guidelines::demo());
        scene.set_viewport_size(viewport);
        scene.add_element(Element::gate(Point::new(290.0, 300.0)));
        for row_y in [100.0, 200.0] {
            for i in 0..4 {
                let x = i as f64 * 85.0 + 150.0;
                scene.add_element(Element::square(Point::new(x, row_y)));
            }
        }
        log::debug!("Demo scene seeded with {} elements", scene.len());
        scene
    }

    pub fn set_viewport_size(&mut self, size: Size) {
        self.viewport = size;
        self.request_repaint();
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport
    }

    /// Add an element on top of everything else.
    pub fn add_element(&mut self, mut element: Element) -> ElementId {
        self.next_z += Z_STEP;
        element.set_z_value(self.next_z);
        let id = element.id();
        self.elements.insert(id, element);
        self.order.push(id);
        self.sort_order();
        self.request_repaint();
        log::debug!("Added element {} (z = {:.3})", id, self.next_z);
        id
    }

    /// Remove an element. Returns `None` if it was not in the scene.
    pub fn remove_element(&mut self, id: ElementId) -> Option<Element> {
        let element = self.elements.remove(&id)?;
        self.order.retain(|&other| other != id);
        self.selection.retain(|&other| other != id);
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        if self.interaction.grabbed() == Some(id) {
            self.interaction = Interaction::Idle;
        }
        self.request_repaint();
        log::debug!("Removed element {}", id);
        Some(element)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element IDs front to back (descending stacking value).
    pub fn order(&self) -> &[ElementId] {
        &self.order
    }

    /// Elements back to front (paint order).
    pub fn elements_back_to_front(&self) -> impl Iterator<Item = &Element> {
        self.order.iter().rev().filter_map(|id| self.elements.get(id))
    }

    /// Move an element's top-left corner.
    pub fn set_element_position(&mut self, id: ElementId, position: Point) -> Result<(), SceneError> {
        let element = self.elements.get_mut(&id).ok_or(SceneError::UnknownElement(id))?;
        element.set_position(position);
        self.request_repaint();
        Ok(())
    }

    /// Change an element's stacking value and restore the ordering.
    pub fn set_element_z_value(&mut self, id: ElementId, z_value: f64) -> Result<(), SceneError> {
        let element = self.elements.get_mut(&id).ok_or(SceneError::UnknownElement(id))?;
        element.set_z_value(z_value);
        self.sort_order();
        self.request_repaint();
        Ok(())
    }

    fn sort_order(&mut self) {
        let elements = &self.elements;
        let z = |id: &ElementId| elements.get(id).map(|e| e.z_value()).unwrap_or(f64::MIN);
        self.order.sort_by(|a, b| z(b).total_cmp(&z(a)));
    }

    /// Topmost element whose bounding rectangle contains `point`.
    pub fn pick(&self, point: Point) -> Option<ElementId> {
        self.order
            .iter()
            .copied()
            .find(|id| self.elements.get(id).is_some_and(|e| e.contains(point)))
    }

    pub fn selection(&self) -> &[ElementId] {
        &self.selection
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selection.contains(&id)
    }

    pub fn hovered(&self) -> Option<ElementId> {
        self.hovered
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn grabbed(&self) -> Option<ElementId> {
        self.interaction.grabbed()
    }

    pub fn guidelines(&self) -> &Guidelines {
        &self.guidelines
    }

    pub fn assistant_enabled(&self) -> bool {
        self.assistant_enabled
    }

    pub fn closest_point(&self) -> Option<Point> {
        self.closest_point
    }

    pub fn request_repaint(&mut self) {
        self.dirty = true;
    }

    pub fn needs_repaint(&self) -> bool {
        self.dirty
    }

    /// Consume the pending repaint request.
    pub fn take_repaint(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Dispatch a toolkit-independent event. Returns whether a repaint is needed.
    pub fn handle_event(&mut self, event: &SceneEvent) -> bool {
        match event {
            SceneEvent::Pointer(PointerEvent::Down { position, button: MouseButton::Left }) => {
                self.pointer_pressed(*position)
            }
            SceneEvent::Pointer(PointerEvent::Up { position, button: MouseButton::Left }) => {
                self.pointer_released(*position)
            }
            SceneEvent::Pointer(PointerEvent::Down { .. } | PointerEvent::Up { .. }) => false,
            SceneEvent::Pointer(PointerEvent::Move { position }) => self.pointer_moved(*position),
            SceneEvent::Pointer(PointerEvent::Entered { position }) => self.pointer_entered(*position),
            SceneEvent::Pointer(PointerEvent::Left) => self.pointer_left(),
            SceneEvent::Key(KeyEvent::Released(key)) => self.key_released(key),
            SceneEvent::Key(KeyEvent::Pressed(_)) => false,
        }
    }

    /// Grab the element under the pointer. Selection is untouched.
    pub fn pointer_pressed(&mut self, point: Point) -> bool {
        let hit = self
            .pick(point)
            .and_then(|id| self.elements.get(&id).map(|e| (id, e.position())));
        self.interaction = Interaction::press(hit, point);
        false
    }

    /// Drag the grabbed element or update hover; refresh the assistant marker.
    pub fn pointer_moved(&mut self, point: Point) -> bool {
        let mut repaint = false;

        // Hover is frozen while an element is grabbed.
        let (next, moved) = self.interaction.drag_to(point);
        self.interaction = next;
        match moved {
            Some((id, top_left)) => {
                if let Some(element) = self.elements.get_mut(&id) {
                    element.set_position(top_left);
                }
                repaint = true;
            }
            None => {
                repaint |= self.hover_elements(point);
            }
        }

        if self.assistant_enabled {
            let closest = self.guidelines.closest_point(point);
            if closest.is_some() || closest != self.closest_point {
                repaint = true;
            }
            self.closest_point = closest;
        }

        if repaint {
            self.request_repaint();
        }
        repaint
    }

    /// Finish a press: select on click, keep selection after a drag.
    pub fn pointer_released(&mut self, point: Point) -> bool {
        let (next, dragged) = self.interaction.release();
        self.interaction = next;
        if dragged {
            return false;
        }

        self.selection.clear();
        if let Some(id) = self.pick(point) {
            self.selection.push(id);
        }
        log::debug!("Selection: {:?}", self.selection);
        self.request_repaint();
        true
    }

    /// Recompute the hovered element at `point`, firing leave/enter on change.
    pub fn hover_elements(&mut self, point: Point) -> bool {
        let picked = self.pick(point);
        if picked == self.hovered {
            return false;
        }
        if let Some(element) = self.hovered.take().and_then(|old| self.elements.get_mut(&old)) {
            element.on_leave();
        }
        if let Some(element) = picked.and_then(|new| self.elements.get_mut(&new)) {
            element.on_enter();
        }
        self.hovered = picked;
        self.request_repaint();
        true
    }

    /// Pointer focus left the scene: drop hover.
    pub fn pointer_left(&mut self) -> bool {
        let Some(old) = self.hovered.take() else {
            return false;
        };
        if let Some(element) = self.elements.get_mut(&old) {
            element.on_leave();
        }
        self.request_repaint();
        true
    }

    /// Pointer focus (re-)entered: resync hover with the actual cursor.
    pub fn pointer_entered(&mut self, cursor: Option<Point>) -> bool {
        let viewport = Rect::from_origin_size(Point::ZERO, self.viewport);
        match cursor {
            Some(point) if viewport.contains(point) => self.hover_elements(point),
            _ => self.pointer_left(),
        }
    }

    /// Handle a released key.
    pub fn key_released(&mut self, key: &str) -> bool {
        if key.eq_ignore_ascii_case(ASSISTANT_TOGGLE_KEY) {
            self.toggle_assistant();
            true
        } else if key == "Delete" || key == "Backspace" {
            self.delete_selected()
        } else {
            false
        }
    }

    /// Show or hide the wiring assistant overlay.
    pub fn toggle_assistant(&mut self) {
        self.assistant_enabled = !self.assistant_enabled;
        if !self.assistant_enabled {
            self.closest_point = None;
        }
        log::debug!("Wiring assistant {}", if self.assistant_enabled { "on" } else { "off" });
        self.request_repaint();
    }

    /// Remove every selected element. Returns whether anything was removed.
    pub fn delete_selected(&mut self) -> bool {
        let ids: Vec<ElementId> = self.selection.drain(..).collect();
        let mut removed = false;
        for id in ids {
            removed |= self.remove_element(id).is_some();
        }
        removed
    }

    /// Paint the whole frame: background, elements back to front, selection,
    /// then the assistant overlay.
    pub fn paint(&self, surface: &mut dyn Surface) {
        surface.fill_rect(Rect::from_origin_size(Point::ZERO, self.viewport), self.background);

        for element in self.elements_back_to_front() {
            let transform = Affine::translate(element.position().to_vec2());
            element.paint(surface, transform);
        }

        let selected = self
            .selection
            .iter()
            .filter_map(|id| self.elements.get(id))
            .map(|e| e.bounds());
        self.selection_overlay.paint(surface, selected);

        if self.assistant_enabled {
            self.paint_assistant(surface);
        }
    }

    fn paint_assistant(&self, surface: &mut dyn Surface) {
        let red = Color::from_rgba8(255, 0, 0, 255);
        let dotted = Pen::new(red, 1.0).with_style(StrokeStyle::Dotted);
        for segment in self.guidelines.segments() {
            surface.draw_path(Affine::IDENTITY, &segment.to_path(0.1), &dotted, None);
        }

        if let Some(point) = self.closest_point {
            let marker = Circle::new(point, MARKER_RADIUS).to_path(0.1);
            surface.draw_path(
                Affine::IDENTITY,
                &marker,
                &Pen::new(red, 1.0),
                Some(Color::from_rgba8(255, 128, 0, 255)),
            );
        }
    }
}
