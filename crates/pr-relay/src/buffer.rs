//! The eight bounded category buffers.
//!
//! Each slot holds a comma-joined sequence of JSON object bodies behind its
//! own lock. Slots are only ever mutated under that lock; a drain takes all
//! eight locks in category order (the single fixed global order, so
//! competing drains cannot deadlock) and resets every slot to empty while
//! keeping its allocation.

use std::sync::Mutex;

use pr_common::{Category, PREFIX_JSON};

use crate::error::RelayError;

pub(crate) struct CategoryBuffers {
    capacity: usize,
    slots: [Mutex<String>; Category::COUNT],
}

impl CategoryBuffers {
    pub(crate) fn new(capacity: usize) -> Self {
        CategoryBuffers {
            capacity,
            slots: std::array::from_fn(|_| Mutex::new(String::with_capacity(capacity))),
        }
    }

    /// Append under the slot's own lock.
    ///
    /// Returns false when the fragment (plus its separating comma) does not
    /// fit the remaining capacity; the slot is left untouched in that case.
    pub(crate) fn try_append(&self, category: Category, fragment: &str) -> bool {
        let mut slot = self.slots[category.index()].lock().unwrap();
        let separator = usize::from(!slot.is_empty());
        if slot.len() + separator + fragment.len() > self.capacity {
            return false;
        }
        if separator == 1 {
            slot.push(',');
        }
        slot.push_str(fragment);
        true
    }

    /// Drain every non-empty buffer into one document.
    ///
    /// Returns `None` when all eight buffers are empty. The document buffer
    /// is reserved up front; allocation failure is surfaced rather than
    /// aborting mid-drain.
    pub(crate) fn drain_all(&self) -> Result<Option<String>, RelayError> {
        let mut guards: Vec<_> = self.slots.iter().map(|slot| slot.lock().unwrap()).collect();
        if guards.iter().all(|guard| guard.is_empty()) {
            return Ok(None);
        }

        // {"prefix":{...} ... }} plus one }, "<section>":{ per non-empty slot
        let mut needed = 11 + PREFIX_JSON.len() + 2;
        for (category, guard) in Category::all().iter().zip(guards.iter()) {
            if !guard.is_empty() {
                needed += 7 + category.section().len() + guard.len();
            }
        }
        let mut json = String::new();
        json.try_reserve_exact(needed)?;

        json.push_str("{\"prefix\":{");
        json.push_str(PREFIX_JSON);
        for (category, guard) in Category::all().iter().zip(guards.iter_mut()) {
            if guard.is_empty() {
                continue;
            }
            json.push_str("}, \"");
            json.push_str(category.section());
            json.push_str("\":{");
            json.push_str(guard.as_str());
            guard.clear();
        }
        json.push_str("}}");
        Ok(Some(json))
    }

    #[cfg(test)]
    pub(crate) fn content_len(&self, category: Category) -> usize {
        self.slots[category.index()].lock().unwrap().len()
    }
}
