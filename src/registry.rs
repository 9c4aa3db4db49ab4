//! Fixed-capacity, open-addressed table of builtin commands.
//!
//! Slots are probed linearly from `hash(name) % capacity`, wrapping around the whole
//! table. The table never grows and entries are never removed, so the first empty slot
//! met during a lookup proves the name is absent.

use crate::command::BuiltinHandler;
use crate::error::{Result, ShellError};

/// Number of slots in a default registry.
pub const DEFAULT_CAPACITY: usize = 32;

/// 32-bit polynomial rolling hash with multiplier 31 over the bytes of `name`.
pub fn hash(name: &str) -> u32 {
    name.bytes()
        .fold(0u32, |h, b| h.wrapping_mul(31).wrapping_add(u32::from(b)))
}

struct Entry {
    name: String,
    handler: Box<dyn BuiltinHandler>,
}

pub struct BuiltinRegistry {
    slots: Vec<Option<Entry>>,
}

impl BuiltinRegistry {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty table with exactly `capacity` slots.
    ///
    /// # Panics
    /// If `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "builtin registry needs at least one slot");
        Self {
            slots: (0..capacity).map(|_| None).collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert `handler` under `name` into the first free slot of its probe sequence.
    ///
    /// Names are expected to be unique. Registering a name twice stores a second entry
    /// further along the probe sequence that `lookup` never reaches.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        handler: Box<dyn BuiltinHandler>,
    ) -> Result<()> {
        let name = name.into();
        let Some(idx) = self.probe(&name).find(|&idx| self.slots[idx].is_none()) else {
            log::error!("builtin table full, dropping `{name}`");
            return Err(ShellError::RegistryFull(name));
        };
        log::debug!("registered builtin `{name}` in slot {idx}");
        self.slots[idx] = Some(Entry { name, handler });
        Ok(())
    }

    /// Find the handler registered under `name`.
    pub fn lookup(&self, name: &str) -> Option<&dyn BuiltinHandler> {
        for idx in self.probe(name) {
            let entry = self.slots[idx].as_ref()?;
            if entry.name == name {
                return Some(entry.handler.as_ref());
            }
        }
        None
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Registered names in slot order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots
            .iter()
            .flatten()
            .map(|entry| entry.name.as_str())
    }

    fn probe(&self, name: &str) -> impl Iterator<Item = usize> + use<> {
        let capacity = self.slots.len();
        let start = hash(name) as usize % capacity;
        (0..capacity).map(move |i| (start + i) % capacity)
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}
