/// Maximum number of simultaneous contacts tracked.
pub const POINTER_CAPACITY: usize = 10;

/// One active contact point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerState {
    pub id: u32,
    pub last_x: f32,
    pub last_y: f32,
    pub is_primary: bool,
}

/// Result of [`PointerTable::insert`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum InsertOutcome {
    /// A free slot was claimed.
    Inserted,
    /// A slot already held this id and was overwritten.
    Replaced,
    /// Every slot is taken; the table is unchanged.
    Full,
}

/// Fixed-capacity table of live contacts, keyed by pointer id.
///
/// Slots are reused as contacts come and go; nothing is allocated per gesture.
/// The active pointer count is always the number of occupied slots, so it can
/// never drift from the table contents or go below zero.
#[derive(Debug, Default, Clone)]
pub struct PointerTable {
    slots: [Option<PointerState>; POINTER_CAPACITY],
}

impl PointerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live contacts.
    pub fn active_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn get(&self, id: u32) -> Option<&PointerState> {
        self.slots.iter().flatten().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut PointerState> {
        self.slots.iter_mut().flatten().find(|p| p.id == id)
    }

    /// The contact currently flagged primary, if any.
    pub fn primary(&self) -> Option<&PointerState> {
        self.slots.iter().flatten().find(|p| p.is_primary)
    }

    pub fn primary_mut(&mut self) -> Option<&mut PointerState> {
        self.slots.iter_mut().flatten().find(|p| p.is_primary)
    }

    /// Stores `state`, overwriting any slot that already holds the same id.
    pub fn insert(&mut self, state: PointerState) -> InsertOutcome {
        if let Some(existing) = self.get_mut(state.id) {
            *existing = state;
            return InsertOutcome::Replaced;
        }

        match self.slots.iter_mut().find(|s| s.is_none()) {
            Some(slot) => {
                *slot = Some(state);
                InsertOutcome::Inserted
            }
            None => InsertOutcome::Full,
        }
    }

    /// Frees the slot holding `id`.
    pub fn remove(&mut self, id: u32) -> Option<PointerState> {
        self.slots
            .iter_mut()
            .find(|s| matches!(s, Some(p) if p.id == id))
            .and_then(Option::take)
    }

    pub fn clear(&mut self) {
        self.slots = Default::default();
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointerState> {
        self.slots.iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(id: u32, primary: bool) -> PointerState {
        PointerState { id, last_x: 0.0, last_y: 0.0, is_primary: primary }
    }

    #[test]
    fn insert_and_remove_track_count() {
        let mut t = PointerTable::new();
        assert_eq!(t.insert(p(0, true)), InsertOutcome::Inserted);
        assert_eq!(t.insert(p(3, false)), InsertOutcome::Inserted);
        assert_eq!(t.active_count(), 2);

        assert_eq!(t.remove(0).map(|s| s.id), Some(0));
        assert_eq!(t.active_count(), 1);
        assert!(t.primary().is_none());
    }

    #[test]
    fn insert_same_id_replaces() {
        let mut t = PointerTable::new();
        t.insert(p(7, true));
        let mut moved = p(7, true);
        moved.last_x = 42.0;
        assert_eq!(t.insert(moved), InsertOutcome::Replaced);
        assert_eq!(t.active_count(), 1);
        assert_eq!(t.get(7).map(|s| s.last_x), Some(42.0));
    }

    #[test]
    fn remove_unknown_id_is_none() {
        let mut t = PointerTable::new();
        assert!(t.remove(5).is_none());
        assert_eq!(t.active_count(), 0);
    }

    #[test]
    fn full_table_rejects_new_ids() {
        let mut t = PointerTable::new();
        for id in 0..POINTER_CAPACITY as u32 {
            assert_eq!(t.insert(p(id, id == 0)), InsertOutcome::Inserted);
        }
        assert_eq!(t.insert(p(99, false)), InsertOutcome::Full);
        assert_eq!(t.active_count(), POINTER_CAPACITY);
        assert!(t.get(99).is_none());
    }

    #[test]
    fn freed_slot_is_reused() {
        let mut t = PointerTable::new();
        for id in 0..POINTER_CAPACITY as u32 {
            t.insert(p(id, false));
        }
        t.remove(4);
        assert_eq!(t.insert(p(100, false)), InsertOutcome::Inserted);
        assert!(t.get(100).is_some());
    }
}
