//! Specialized collection types

pub use slotmap::{Key, KeyData, SlotMap};

slotmap::new_key_type! {
    /// Generational key of a resource slot
    ///
    /// Removing a slot bumps its version, so a key held across a destroy
    /// never matches the slot's next occupant.
    pub struct ResourceKey;
}

/// Slot storage addressed by [`ResourceKey`]
pub type ResourceSlots<T> = SlotMap<ResourceKey, T>;
