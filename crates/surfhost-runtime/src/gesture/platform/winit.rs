use winit::event::{ElementState, MouseButton, Touch, TouchPhase, WindowEvent};

use crate::gesture::{GestureTracker, PointerEvent, PointerEventKind};

/// Pointer id used for the emulated mouse contact.
pub const MOUSE_POINTER_ID: u32 = u32::MAX;

/// Emulates a single primary contact from the left mouse button.
///
/// Desktop windows rarely deliver touch; this keeps camera panning usable there.
#[derive(Debug, Default, Clone)]
pub struct MousePointer {
    pressed: bool,
    position: Option<(f32, f32)>,
}

impl MousePointer {
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Cursor moved to `(x, y)`. Only a held button turns this into a move.
    pub fn moved(&mut self, x: f32, y: f32) -> Option<PointerEvent> {
        self.position = Some((x, y));
        self.pressed
            .then(|| PointerEvent::new(PointerEventKind::Move, MOUSE_POINTER_ID, x, y))
    }

    /// Cursor left the window; its position is no longer known.
    pub fn left(&mut self) {
        self.position = None;
    }

    /// Left button changed state.
    ///
    /// A press before any cursor position is known is dropped, since there
    /// is no baseline to pan from. A release without a tracked press emits
    /// nothing.
    pub fn button(&mut self, state: ElementState) -> Option<PointerEvent> {
        match state {
            ElementState::Pressed => {
                let (x, y) = self.position?;
                self.pressed = true;
                Some(PointerEvent::new(PointerEventKind::PrimaryDown, MOUSE_POINTER_ID, x, y))
            }
            ElementState::Released => {
                if !self.pressed {
                    return None;
                }
                self.pressed = false;
                let (x, y) = self.position.unwrap_or((0.0, 0.0));
                Some(PointerEvent::new(PointerEventKind::PrimaryUp, MOUSE_POINTER_ID, x, y))
            }
        }
    }
}

/// Translates a winit `WindowEvent` into a pointer event.
///
/// Returns `None` for events that carry no pointer information.
pub fn translate_window_event(
    tracker: &GestureTracker,
    mouse: &mut MousePointer,
    event: &WindowEvent,
) -> Option<PointerEvent> {
    match event {
        WindowEvent::Touch(touch) => Some(translate_touch(tracker, touch)),

        WindowEvent::CursorMoved { position, .. } => mouse.moved(position.x as f32, position.y as f32),

        WindowEvent::CursorLeft { .. } => {
            mouse.left();
            None
        }

        WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => mouse.button(*state),

        _ => None,
    }
}

/// Translates a touch report. Coordinates stay in physical surface pixels.
pub fn translate_touch(tracker: &GestureTracker, touch: &Touch) -> PointerEvent {
    let id = touch_pointer_id(touch.id);
    let kind = classify_touch(tracker, touch.phase, id);
    PointerEvent::new(kind, id, touch.location.x as f32, touch.location.y as f32)
}

/// Folds a winit touch id into the tracker's id space.
///
/// The high half is mixed in so ids differing only there stay distinct, and
/// the mouse id is never produced.
pub fn touch_pointer_id(id: u64) -> u32 {
    let folded = (id ^ (id >> 32)) as u32;
    if folded == MOUSE_POINTER_ID {
        MOUSE_POINTER_ID - 1
    } else {
        folded
    }
}

/// Decides whether a touch phase is a primary or secondary transition.
///
/// The first contact while nothing is held becomes primary; a cancelled
/// contact is treated as lifted.
pub fn classify_touch(tracker: &GestureTracker, phase: TouchPhase, id: u32) -> PointerEventKind {
    let primary = tracker.primary_id();
    match phase {
        TouchPhase::Started if primary.is_none() => PointerEventKind::PrimaryDown,
        TouchPhase::Started => PointerEventKind::SecondaryDown,
        TouchPhase::Moved => PointerEventKind::Move,
        TouchPhase::Ended | TouchPhase::Cancelled if primary == Some(id) => PointerEventKind::PrimaryUp,
        TouchPhase::Ended | TouchPhase::Cancelled => PointerEventKind::SecondaryUp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_touch_is_primary() {
        let t = GestureTracker::default();
        assert_eq!(classify_touch(&t, TouchPhase::Started, 3), PointerEventKind::PrimaryDown);
    }

    #[test]
    fn later_touches_are_secondary() {
        let mut t = GestureTracker::default();
        t.on_pointer_event(PointerEvent::new(PointerEventKind::PrimaryDown, 3, 0.0, 0.0));

        assert_eq!(classify_touch(&t, TouchPhase::Started, 4), PointerEventKind::SecondaryDown);
        assert_eq!(classify_touch(&t, TouchPhase::Ended, 4), PointerEventKind::SecondaryUp);
        assert_eq!(classify_touch(&t, TouchPhase::Ended, 3), PointerEventKind::PrimaryUp);
    }

    #[test]
    fn cancel_lifts_primary() {
        let mut t = GestureTracker::default();
        t.on_pointer_event(PointerEvent::new(PointerEventKind::PrimaryDown, 0, 0.0, 0.0));
        assert_eq!(classify_touch(&t, TouchPhase::Cancelled, 0), PointerEventKind::PrimaryUp);
    }

    #[test]
    fn mouse_drag_emulates_primary_contact() {
        let mut mouse = MousePointer::default();
        let kinds = |e: Option<PointerEvent>| e.map(|e| (e.kind, e.pointer_id, e.x, e.y));

        assert_eq!(kinds(mouse.moved(5.0, 5.0)), None);
        assert_eq!(
            kinds(mouse.button(ElementState::Pressed)),
            Some((PointerEventKind::PrimaryDown, MOUSE_POINTER_ID, 5.0, 5.0))
        );
        assert_eq!(
            kinds(mouse.moved(8.0, 2.0)),
            Some((PointerEventKind::Move, MOUSE_POINTER_ID, 8.0, 2.0))
        );
        assert_eq!(
            kinds(mouse.button(ElementState::Released)),
            Some((PointerEventKind::PrimaryUp, MOUSE_POINTER_ID, 8.0, 2.0))
        );

        assert!(!mouse.is_pressed());
        assert_eq!(kinds(mouse.moved(9.0, 9.0)), None);
        assert_eq!(kinds(mouse.button(ElementState::Released)), None);
    }

    #[test]
    fn press_without_known_position_is_dropped() {
        let mut mouse = MousePointer::default();
        assert!(mouse.button(ElementState::Pressed).is_none());
        assert!(!mouse.is_pressed());
        assert!(mouse.moved(40.0, 40.0).is_none());

        mouse.left();
        assert!(mouse.button(ElementState::Pressed).is_none());
    }

    #[test]
    fn touch_ids_fold_high_bits_and_avoid_mouse_id() {
        assert_eq!(touch_pointer_id(3), 3);
        assert_ne!(touch_pointer_id(3), touch_pointer_id((1 << 32) | 3));
        assert_ne!(touch_pointer_id(u64::from(u32::MAX)), MOUSE_POINTER_ID);
    }
}
