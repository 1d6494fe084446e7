use glam::Vec2;

/// A camera action produced from raw pointer input.
///
/// The controller consumes actions, never raw window events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrbitAction {
    /// Orbit around the center by a pointer delta in pixels.
    Rotate(Vec2),
    /// Slide the center in the view plane by a pointer delta in pixels.
    Pan(Vec2),
    /// Zoom by scroll lines; positive moves closer.
    Zoom(f32),
    /// Pointer moved with no drag in progress.
    Noop,
}

/// Which pointer button started a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragButton {
    Primary,
    Secondary,
}

/// Turns button state and cursor positions into orbit actions.
#[derive(Debug, Default)]
pub struct PointerGesture {
    dragging: Option<DragButton>,
    pan_modifier: bool,
    last: Option<Vec2>,
}

impl PointerGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, button: DragButton) {
        self.dragging = Some(button);
    }

    pub fn release(&mut self, button: DragButton) {
        if self.dragging == Some(button) {
            self.dragging = None;
        }
    }

    /// Shift held: primary drags pan instead of rotating.
    pub fn set_pan_modifier(&mut self, held: bool) {
        self.pan_modifier = held;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    pub fn moved(&mut self, position: Vec2) -> OrbitAction {
        let delta = self.last.map_or(Vec2::ZERO, |last| position - last);
        self.last = Some(position);

        if delta == Vec2::ZERO {
            return OrbitAction::Noop;
        }
        match self.dragging {
            Some(DragButton::Primary) if !self.pan_modifier => OrbitAction::Rotate(delta),
            Some(_) => OrbitAction::Pan(delta),
            None => OrbitAction::Noop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_without_drag_is_noop() {
        let mut gesture = PointerGesture::new();
        assert_eq!(gesture.moved(Vec2::new(10.0, 10.0)), OrbitAction::Noop);
        assert_eq!(gesture.moved(Vec2::new(20.0, 10.0)), OrbitAction::Noop);
    }

    #[test]
    fn primary_drag_rotates() {
        let mut gesture = PointerGesture::new();
        gesture.moved(Vec2::new(10.0, 10.0));
        gesture.press(DragButton::Primary);
        assert_eq!(
            gesture.moved(Vec2::new(15.0, 8.0)),
            OrbitAction::Rotate(Vec2::new(5.0, -2.0))
        );
    }

    #[test]
    fn secondary_drag_pans() {
        let mut gesture = PointerGesture::new();
        gesture.moved(Vec2::ZERO);
        gesture.press(DragButton::Secondary);
        assert_eq!(
            gesture.moved(Vec2::new(3.0, 4.0)),
            OrbitAction::Pan(Vec2::new(3.0, 4.0))
        );
    }

    #[test]
    fn shift_primary_pans() {
        let mut gesture = PointerGesture::new();
        gesture.moved(Vec2::ZERO);
        gesture.set_pan_modifier(true);
        gesture.press(DragButton::Primary);
        assert!(matches!(gesture.moved(Vec2::ONE), OrbitAction::Pan(_)));
    }

    #[test]
    fn release_other_button_keeps_drag() {
        let mut gesture = PointerGesture::new();
        gesture.press(DragButton::Primary);
        gesture.release(DragButton::Secondary);
        assert!(gesture.is_dragging());
        gesture.release(DragButton::Primary);
        assert!(!gesture.is_dragging());
    }

    #[test]
    fn first_move_has_no_delta() {
        let mut gesture = PointerGesture::new();
        gesture.press(DragButton::Primary);
        assert_eq!(gesture.moved(Vec2::new(100.0, 100.0)), OrbitAction::Noop);
    }
}
