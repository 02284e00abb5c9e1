//! Rolling buffer of points being combined into a primitive.

/// Maximum number of armed points any construction needs.
pub const MAX_ARMED: usize = 3;

/// Up to three armed point indices, oldest first.
///
/// Also remembers which armed points were synthesised by the construction
/// itself (circle centre and rim), so an abandoned construction can erase
/// exactly those.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArmedIndices {
    slots: Vec<usize>,
    placeholders: Vec<usize>,
}

impl ArmedIndices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles `index`: disarms it if already armed, appends it otherwise.
    ///
    /// Returns whether `index` is armed afterwards. A full buffer ignores new
    /// indices.
    pub fn arm(&mut self, index: usize) -> bool {
        if let Some(slot) = self.slots.iter().position(|armed| *armed == index) {
            self.slots.remove(slot);
            return false;
        }
        if self.slots.len() >= MAX_ARMED {
            return false;
        }
        self.slots.push(index);
        true
    }

    /// Arms a point created by the current construction.
    pub fn arm_placeholder(&mut self, index: usize) -> bool {
        let armed = self.arm(index);
        if armed {
            self.placeholders.push(index);
        }
        armed
    }

    pub fn count(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, slot: usize) -> Option<usize> {
        self.slots.get(slot).copied()
    }

    pub fn first(&self) -> Option<usize> {
        self.get(0)
    }

    pub fn second(&self) -> Option<usize> {
        self.get(1)
    }

    pub fn third(&self) -> Option<usize> {
        self.get(2)
    }

    pub fn last(&self) -> Option<usize> {
        self.slots.last().copied()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.slots.contains(&index)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.slots
    }

    /// Commits the construction: empties the buffer and forgets placeholders.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.placeholders.clear();
    }

    /// Abandons the construction, returning the placeholder points to erase.
    pub fn abandon(&mut self) -> Vec<usize> {
        self.slots.clear();
        std::mem::take(&mut self.placeholders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arming_twice_disarms_and_shifts_left() {
        let mut armed = ArmedIndices::new();
        assert!(armed.arm(4));
        assert!(armed.arm(7));
        assert!(armed.arm(9));
        assert_eq!(armed.count(), 3);

        assert!(!armed.arm(4));
        assert_eq!(armed.as_slice(), &[7, 9]);
        assert_eq!(armed.first(), Some(7));
        assert_eq!(armed.third(), None);
    }

    #[test]
    fn full_buffer_ignores_new_indices() {
        let mut armed = ArmedIndices::new();
        for index in [1, 2, 3] {
            armed.arm(index);
        }
        assert!(!armed.arm(4));
        assert_eq!(armed.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn abandon_returns_only_placeholders() {
        let mut armed = ArmedIndices::new();
        armed.arm(1);
        armed.arm_placeholder(2);
        assert_eq!(armed.abandon(), vec![2]);
        assert!(armed.is_empty());
        assert!(armed.abandon().is_empty());
    }

    #[test]
    fn commit_forgets_placeholders() {
        let mut armed = ArmedIndices::new();
        armed.arm_placeholder(1);
        armed.arm_placeholder(2);
        armed.clear();
        assert!(armed.abandon().is_empty());
    }
}
