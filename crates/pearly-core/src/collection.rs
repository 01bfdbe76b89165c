// Rust guideline compliant 2026-10-18

//! Ordered collections of value objects.

use crate::vo::Mode;
use crate::{Result, Value, ValueObject};

/// Field used as the key when iterating a collection by key.
pub const DEFAULT_KEY_FIELD: &str = "id";

/// An ordered list of value objects, typically one query's result rows.
#[derive(Debug, Clone, Default)]
pub struct VoCollection {
    items: Vec<ValueObject>,
}

impl VoCollection {
    /// Wraps a list of value objects.
    #[must_use]
    pub fn new(items: Vec<ValueObject>) -> Self {
        Self { items }
    }

    /// Returns the number of value objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends a value object.
    pub fn push(&mut self, vo: ValueObject) {
        self.items.push(vo);
    }

    /// Iterates the value objects in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ValueObject> {
        self.items.iter()
    }

    /// Iterates the value objects mutably in order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, ValueObject> {
        self.items.iter_mut()
    }

    /// Sets the mode of every member.
    pub fn set_mode(&mut self, mode: Mode) {
        for vo in &mut self.items {
            vo.set_mode(mode);
        }
    }

    /// Iterates `(key, value object)` pairs, reading `field` through each
    /// member's active mode.
    pub fn keyed<'a>(
        &'a self,
        field: &'a str,
    ) -> impl Iterator<Item = Result<(Value, &'a ValueObject)>> + 'a {
        self.items
            .iter()
            .map(move |vo| vo.get(field).map(|key| (key, vo)))
    }

    /// Iterates `(id, value object)` pairs.
    pub fn by_id(&self) -> impl Iterator<Item = Result<(Value, &ValueObject)>> + '_ {
        self.keyed(DEFAULT_KEY_FIELD)
    }

    /// Consumes the collection and returns its members.
    #[must_use]
    pub fn into_inner(self) -> Vec<ValueObject> {
        self.items
    }
}

impl From<Vec<ValueObject>> for VoCollection {
    fn from(items: Vec<ValueObject>) -> Self {
        Self::new(items)
    }
}

impl FromIterator<ValueObject> for VoCollection {
    fn from_iter<I: IntoIterator<Item = ValueObject>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a VoCollection {
    type Item = &'a ValueObject;
    type IntoIter = std::slice::Iter<'a, ValueObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for VoCollection {
    type Item = ValueObject;
    type IntoIter = std::vec::IntoIter<ValueObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
