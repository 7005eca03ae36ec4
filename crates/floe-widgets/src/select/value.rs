//! Controlled vs. uncontrolled selection state.
//!
//! A controlled select mirrors a value owned by its parent: committing only
//! forwards a change intent, and the shown selection moves when the parent
//! pushes the new value back with [`MergedValue::sync`]. An uncontrolled
//! select owns its value and updates it on commit.

/// Who owns the selected index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    /// The parent owns the value.
    Controlled(usize),
    /// The component owns the value, starting at the given index.
    Uncontrolled(usize),
}

impl Default for ValueSource {
    fn default() -> Self {
        ValueSource::Uncontrolled(0)
    }
}

/// Merge policy over a [`ValueSource`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergedValue {
    source: ValueSource,
}

impl MergedValue {
    pub fn new(source: ValueSource) -> Self {
        Self { source }
    }

    pub fn controlled(value: usize) -> Self {
        Self::new(ValueSource::Controlled(value))
    }

    pub fn uncontrolled(initial: usize) -> Self {
        Self::new(ValueSource::Uncontrolled(initial))
    }

    /// The index currently shown as selected.
    pub fn current(&self) -> usize {
        match self.source {
            ValueSource::Controlled(v) | ValueSource::Uncontrolled(v) => v,
        }
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self.source, ValueSource::Controlled(_))
    }

    /// Record a change intent. Only an uncontrolled value moves.
    pub fn set(&mut self, index: usize) {
        if let ValueSource::Uncontrolled(v) = &mut self.source {
            *v = index;
        }
    }

    /// Adopt a value pushed in from outside, whoever owns it.
    pub fn sync(&mut self, index: usize) {
        match &mut self.source {
            ValueSource::Controlled(v) | ValueSource::Uncontrolled(v) => *v = index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncontrolled_defaults_to_zero() {
        let v = MergedValue::default();
        assert_eq!(v.current(), 0);
        assert!(!v.is_controlled());
    }

    #[test]
    fn uncontrolled_moves_on_set() {
        let mut v = MergedValue::uncontrolled(1);
        v.set(2);
        assert_eq!(v.current(), 2);
    }

    #[test]
    fn controlled_only_moves_on_sync() {
        let mut v = MergedValue::controlled(1);
        v.set(2);
        assert_eq!(v.current(), 1);
        v.sync(2);
        assert_eq!(v.current(), 2);
    }
}
