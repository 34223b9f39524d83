use super::pointer_table::{InsertOutcome, PointerState, PointerTable};
use super::types::{CameraDelta, GestureConfig, PointerEvent, PointerEventKind};

/// Turns a serial stream of pointer events into camera pan deltas.
///
/// Only the primary contact moves the camera. Secondary contacts are tracked
/// so the pointer count stays correct but never produce a delta.
///
/// The tracker does no I/O and never blocks; it is meant to be called directly
/// on the thread that delivers input.
#[derive(Debug, Default, Clone)]
pub struct GestureTracker {
    config: GestureConfig,
    pointers: PointerTable,
    last_primary: Option<(f32, f32)>,
}

impl GestureTracker {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            pointers: PointerTable::new(),
            last_primary: None,
        }
    }

    pub fn config(&self) -> GestureConfig {
        self.config
    }

    pub fn active_pointer_count(&self) -> usize {
        self.pointers.active_count()
    }

    pub fn pointers(&self) -> &PointerTable {
        &self.pointers
    }

    pub fn primary_id(&self) -> Option<u32> {
        self.pointers.primary().map(|p| p.id)
    }

    /// Last known position of the primary contact, kept after it lifts.
    pub fn last_primary_position(&self) -> Option<(f32, f32)> {
        self.last_primary
    }

    /// Drops every tracked contact, e.g. when the surface goes away mid-gesture.
    pub fn reset(&mut self) {
        self.pointers.clear();
    }

    /// Applies one event and returns the camera delta it produces, if any.
    pub fn on_pointer_event(&mut self, ev: PointerEvent) -> Option<CameraDelta> {
        match ev.kind {
            PointerEventKind::PrimaryDown => {
                self.primary_down(ev);
                None
            }
            PointerEventKind::PrimaryUp => {
                self.primary_up(ev);
                None
            }
            PointerEventKind::SecondaryDown => {
                self.secondary_down(ev);
                None
            }
            PointerEventKind::SecondaryUp => {
                self.secondary_up(ev);
                None
            }
            PointerEventKind::Move => self.moved(ev),
            PointerEventKind::Unknown(_) => {
                log::warn!("unhandled gesture: {} (pointer {})", ev.kind, ev.pointer_id);
                None
            }
        }
    }

    fn primary_down(&mut self, ev: PointerEvent) {
        if let Some(stale) = self.pointers.primary().map(|p| p.id) {
            if stale != ev.pointer_id {
                log::debug!("primary down for {} while {stale} still down; dropping {stale}", ev.pointer_id);
                self.pointers.remove(stale);
            }
        }

        let state = PointerState {
            id: ev.pointer_id,
            last_x: ev.x,
            last_y: ev.y,
            is_primary: true,
        };

        if self.pointers.insert(state) == InsertOutcome::Full {
            log::warn!("pointer table full; ignoring primary down for {}", ev.pointer_id);
            return;
        }
        self.last_primary = Some((ev.x, ev.y));
    }

    fn primary_up(&mut self, ev: PointerEvent) {
        if self.primary_id() != Some(ev.pointer_id) {
            log::debug!(
                "spurious primary up for {} (primary {:?}); pointer count stays {}",
                ev.pointer_id,
                self.primary_id(),
                self.active_pointer_count()
            );
            return;
        }

        self.pointers.remove(ev.pointer_id);
        self.last_primary = Some((ev.x, ev.y));
    }

    fn secondary_down(&mut self, ev: PointerEvent) {
        if let Some(existing) = self.pointers.get_mut(ev.pointer_id) {
            log::debug!("duplicate down for pointer {}", ev.pointer_id);
            existing.last_x = ev.x;
            existing.last_y = ev.y;
            return;
        }

        let state = PointerState {
            id: ev.pointer_id,
            last_x: ev.x,
            last_y: ev.y,
            is_primary: false,
        };

        if self.pointers.insert(state) == InsertOutcome::Full {
            log::warn!("pointer table full; ignoring secondary down for {}", ev.pointer_id);
            return;
        }

        let count = self.active_pointer_count();
        if count > 1 {
            log::info!("additional pointer {} down ({count} active)", ev.pointer_id);
        }
    }

    fn secondary_up(&mut self, ev: PointerEvent) {
        match self.pointers.get(ev.pointer_id) {
            Some(p) if !p.is_primary => {
                self.pointers.remove(ev.pointer_id);
            }
            Some(_) => {
                log::debug!("secondary up names primary pointer {}; ignored", ev.pointer_id);
            }
            None => {
                log::debug!("spurious secondary up for {}; pointer count stays {}", ev.pointer_id, self.active_pointer_count());
            }
        }
    }

    fn moved(&mut self, ev: PointerEvent) -> Option<CameraDelta> {
        let sensitivity = self.config.sensitivity;

        let Some(pointer) = self.pointers.get_mut(ev.pointer_id) else {
            log::debug!("move for untracked pointer {}", ev.pointer_id);
            return None;
        };

        // Horizontal axis is inverted, vertical is direct.
        let dx = pointer.last_x - ev.x;
        let dy = ev.y - pointer.last_y;
        pointer.last_x = ev.x;
        pointer.last_y = ev.y;

        if !pointer.is_primary {
            return None;
        }

        self.last_primary = Some((ev.x, ev.y));
        Some(CameraDelta::new(dx * sensitivity, dy * sensitivity, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(kind: PointerEventKind, id: u32, x: f32, y: f32) -> PointerEvent {
        PointerEvent::new(kind, id, x, y)
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    // ── primary gesture ───────────────────────────────────────────────────

    #[test]
    fn move_delta_sign_convention() {
        let mut t = GestureTracker::default();
        assert!(t.on_pointer_event(ev(PointerEventKind::PrimaryDown, 0, 100.0, 100.0)).is_none());

        let d = t.on_pointer_event(ev(PointerEventKind::Move, 0, 90.0, 120.0)).unwrap();
        assert!(approx(d.dx, 0.05), "dx = {}", d.dx);
        assert!(approx(d.dy, 0.1), "dy = {}", d.dy);
        assert_eq!(d.dz, 0.0);
    }

    #[test]
    fn move_updates_baseline() {
        let mut t = GestureTracker::default();
        t.on_pointer_event(ev(PointerEventKind::PrimaryDown, 0, 0.0, 0.0));
        t.on_pointer_event(ev(PointerEventKind::Move, 0, 10.0, 10.0));

        let d = t.on_pointer_event(ev(PointerEventKind::Move, 0, 10.0, 10.0)).unwrap();
        assert_eq!(d, CameraDelta::new(0.0, 0.0, 0.0));
        assert_eq!(t.last_primary_position(), Some((10.0, 10.0)));
    }

    #[test]
    fn down_moves_up_restores_count() {
        let mut t = GestureTracker::default();
        let before = t.active_pointer_count();

        t.on_pointer_event(ev(PointerEventKind::PrimaryDown, 0, 5.0, 5.0));
        assert_eq!(t.active_pointer_count(), before + 1);
        for i in 0..20 {
            let f = i as f32;
            assert!(t.on_pointer_event(ev(PointerEventKind::Move, 0, f, -f)).is_some());
        }
        t.on_pointer_event(ev(PointerEventKind::PrimaryUp, 0, 19.0, -19.0));

        assert_eq!(t.active_pointer_count(), before);
        assert_eq!(t.last_primary_position(), Some((19.0, -19.0)));
    }

    #[test]
    fn sensitivity_is_configurable() {
        let mut t = GestureTracker::new(GestureConfig { sensitivity: 1.0 });
        t.on_pointer_event(ev(PointerEventKind::PrimaryDown, 1, 0.0, 0.0));
        let d = t.on_pointer_event(ev(PointerEventKind::Move, 1, -3.0, 4.0)).unwrap();
        assert_eq!(d, CameraDelta::new(3.0, 4.0, 0.0));
    }

    #[test]
    fn new_primary_down_replaces_stale_primary() {
        let mut t = GestureTracker::default();
        t.on_pointer_event(ev(PointerEventKind::PrimaryDown, 1, 0.0, 0.0));
        t.on_pointer_event(ev(PointerEventKind::PrimaryDown, 2, 0.0, 0.0));
        assert_eq!(t.active_pointer_count(), 1);
        assert_eq!(t.primary_id(), Some(2));
    }

    // ── spurious input ────────────────────────────────────────────────────

    #[test]
    fn spurious_primary_up_is_clamped() {
        let mut t = GestureTracker::default();
        assert!(t.on_pointer_event(ev(PointerEventKind::PrimaryUp, 0, 1.0, 1.0)).is_none());
        assert_eq!(t.active_pointer_count(), 0);

        t.on_pointer_event(ev(PointerEventKind::PrimaryDown, 0, 1.0, 1.0));
        t.on_pointer_event(ev(PointerEventKind::PrimaryUp, 0, 1.0, 1.0));
        t.on_pointer_event(ev(PointerEventKind::PrimaryUp, 0, 1.0, 1.0));
        assert_eq!(t.active_pointer_count(), 0);
    }

    #[test]
    fn primary_up_from_other_pointer_keeps_primary() {
        let mut t = GestureTracker::default();
        t.on_pointer_event(ev(PointerEventKind::PrimaryDown, 7, 20.0, 20.0));

        assert!(t.on_pointer_event(ev(PointerEventKind::PrimaryUp, u32::MAX, 0.0, 0.0)).is_none());
        assert_eq!(t.primary_id(), Some(7));
        assert_eq!(t.active_pointer_count(), 1);
        assert_eq!(t.last_primary_position(), Some((20.0, 20.0)));

        // The held contact keeps panning from its own baseline.
        let d = t.on_pointer_event(ev(PointerEventKind::Move, 7, 10.0, 40.0)).unwrap();
        assert!(approx(d.dx, 0.05), "dx = {}", d.dx);
        assert!(approx(d.dy, 0.1), "dy = {}", d.dy);
    }

    #[test]
    fn spurious_secondary_up_is_clamped() {
        let mut t = GestureTracker::default();
        t.on_pointer_event(ev(PointerEventKind::SecondaryUp, 4, 0.0, 0.0));
        assert_eq!(t.active_pointer_count(), 0);
    }

    #[test]
    fn move_without_down_emits_nothing() {
        let mut t = GestureTracker::default();
        assert!(t.on_pointer_event(ev(PointerEventKind::Move, 0, 3.0, 3.0)).is_none());
        assert_eq!(t.active_pointer_count(), 0);
    }

    #[test]
    fn unknown_kind_mutates_nothing() {
        let mut t = GestureTracker::default();
        t.on_pointer_event(ev(PointerEventKind::PrimaryDown, 0, 10.0, 10.0));
        let before = t.pointers().clone();

        assert!(t.on_pointer_event(ev(PointerEventKind::Unknown(3), 0, 50.0, 50.0)).is_none());
        assert_eq!(t.pointers().iter().collect::<Vec<_>>(), before.iter().collect::<Vec<_>>());

        // Baseline is untouched, so the next move is measured from (10, 10).
        let d = t.on_pointer_event(ev(PointerEventKind::Move, 0, 10.0, 10.0)).unwrap();
        assert_eq!(d, CameraDelta::new(0.0, 0.0, 0.0));
    }

    // ── secondary pointers ────────────────────────────────────────────────

    #[test]
    fn secondary_events_never_emit_delta() {
        let mut t = GestureTracker::default();
        t.on_pointer_event(ev(PointerEventKind::PrimaryDown, 0, 0.0, 0.0));

        assert!(t.on_pointer_event(ev(PointerEventKind::SecondaryDown, 1, 50.0, 50.0)).is_none());
        assert_eq!(t.active_pointer_count(), 2);
        assert!(t.on_pointer_event(ev(PointerEventKind::Move, 1, 80.0, 10.0)).is_none());
        assert!(t.on_pointer_event(ev(PointerEventKind::SecondaryUp, 1, 80.0, 10.0)).is_none());
        assert_eq!(t.active_pointer_count(), 1);

        // Secondary traffic did not disturb the primary baseline.
        let d = t.on_pointer_event(ev(PointerEventKind::Move, 0, 0.0, 0.0)).unwrap();
        assert_eq!(d, CameraDelta::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn secondary_up_cannot_lift_primary() {
        let mut t = GestureTracker::default();
        t.on_pointer_event(ev(PointerEventKind::PrimaryDown, 0, 0.0, 0.0));
        t.on_pointer_event(ev(PointerEventKind::SecondaryUp, 0, 0.0, 0.0));
        assert_eq!(t.primary_id(), Some(0));
    }

    #[test]
    fn reset_clears_contacts() {
        let mut t = GestureTracker::default();
        t.on_pointer_event(ev(PointerEventKind::PrimaryDown, 0, 0.0, 0.0));
        t.on_pointer_event(ev(PointerEventKind::SecondaryDown, 1, 0.0, 0.0));
        t.reset();
        assert_eq!(t.active_pointer_count(), 0);
        assert!(t.on_pointer_event(ev(PointerEventKind::Move, 0, 1.0, 1.0)).is_none());
    }
}
