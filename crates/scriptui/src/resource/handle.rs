//! Opaque handle encoding
//!
//! Script callers only ever see a number. That number packs the resource's
//! slot index, the slot generation and a small tag:
//!
//! ```text
//!  52                      24 23                 4 3     0
//! +--------------------------+--------------------+-------+
//! |   generation (29 bits)   |  slot index (20)   |  tag  |
//! +--------------------------+--------------------+-------+
//! ```
//!
//! The whole value stays below 2^53 so hosts that carry every number as an
//! IEEE double can pass handles around without losing bits.
//!
//! Direct resources use tag 0. Proxy handles are derived from a direct handle
//! by XOR-ing a proxy tag into the tag field; decoding XORs the same tag back
//! and only yields a direct handle when the field returns to zero.

use crate::foundation::collections::{Key, KeyData, ResourceKey};
use std::fmt;

const TAG_BITS: u32 = 4;
const INDEX_BITS: u32 = 20;
const GENERATION_BITS: u32 = 29;

const TAG_MASK: u64 = (1 << TAG_BITS) - 1;
const INDEX_SHIFT: u32 = TAG_BITS;
const GENERATION_SHIFT: u32 = TAG_BITS + INDEX_BITS;

/// Largest slot index a handle can address
pub const MAX_INDEX: u64 = (1 << INDEX_BITS) - 1;

/// Largest slot generation a handle can carry
pub const MAX_GENERATION: u64 = (1 << GENERATION_BITS) - 1;

/// Upper bound of every encoded handle (exactly representable as `f64`)
pub const MAX_SAFE_HANDLE: u64 = 1 << (TAG_BITS + INDEX_BITS + GENERATION_BITS);

/// Small constant selecting which accessor resolves a proxy handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag(u8);

impl Tag {
    /// Tag carried by handles of directly owned resources
    pub const DIRECT: Tag = Tag(0);

    /// Create a proxy tag.
    ///
    /// Panics (at compile time when used in a `const`) unless
    /// `1 <= bits <= 15`.
    pub const fn new(bits: u8) -> Self {
        assert!(bits != 0, "tag 0 is reserved for direct handles");
        assert!((bits as u64) <= TAG_MASK, "tag does not fit in the tag field");
        Self(bits)
    }

    /// Raw tag bits
    pub const fn bits(self) -> u8 {
        self.0
    }
}

/// Opaque value handed to script callers in place of a reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Handle(u64);

impl Handle {
    /// The null handle; never refers to anything
    pub const NULL: Handle = Handle(0);

    /// Wrap a raw value received from a caller
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Whether this is the null handle
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Tag bits currently stored in the handle
    pub const fn tag_bits(self) -> u8 {
        (self.0 & TAG_MASK) as u8
    }

    /// Whether the tag field is clear (a direct resource handle)
    pub const fn is_direct(self) -> bool {
        self.tag_bits() == 0
    }

    /// Derive the proxy handle of `tag` from a direct handle
    pub fn encode(self, tag: Tag) -> Handle {
        let out = Handle(self.0 ^ u64::from(tag.0));
        debug_assert!(
            out.0 <= MAX_SAFE_HANDLE,
            "encoded handle {out} exceeds the double-safe range"
        );
        out
    }

    /// Candidate direct handle for `tag`; the inverse of [`Handle::encode`]
    pub fn decode(self, tag: Tag) -> Handle {
        Handle(self.0 ^ u64::from(tag.0))
    }

    /// Encode a slot key as a direct handle.
    ///
    /// Returns `None` when the slot index or generation does not fit the
    /// 53-bit layout.
    pub(crate) fn from_key(key: ResourceKey) -> Option<Handle> {
        let ffi = key.data().as_ffi();
        let index = ffi & 0xFFFF_FFFF;
        let generation = ffi >> 32;
        if index > MAX_INDEX || generation > MAX_GENERATION {
            return None;
        }
        Some(Handle(
            (generation << GENERATION_SHIFT) | (index << INDEX_SHIFT),
        ))
    }

    /// Slot key of a direct handle.
    ///
    /// Rejects null, tagged and even-generation values; occupied slots only
    /// ever carry odd generations, so an even one was never issued.
    pub(crate) fn key(self) -> Option<ResourceKey> {
        if self.is_null() || !self.is_direct() || self.0 > MAX_SAFE_HANDLE {
            return None;
        }
        let index = (self.0 >> INDEX_SHIFT) & MAX_INDEX;
        let generation = self.0 >> GENERATION_SHIFT;
        if generation & 1 == 0 {
            return None;
        }
        Some(KeyData::from_ffi((generation << 32) | index).into())
    }

    /// Slot index and generation, for diagnostics
    pub fn parts(self) -> (u64, u64) {
        (
            (self.0 >> INDEX_SHIFT) & MAX_INDEX,
            self.0 >> GENERATION_SHIFT,
        )
    }

    /// Represent the handle as a double for hosts without 64-bit integers
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(self) -> f64 {
        self.0 as f64
    }
}

impl TryFrom<f64> for Handle {
    type Error = f64;

    /// Accept a double only if it is an exact integer inside the handle range
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= MAX_SAFE_HANDLE as f64 {
            Ok(Handle(value as u64))
        } else {
            Err(value)
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::collections::ResourceSlots;

    const MAIN: Tag = Tag::new(1);
    const WINDOW: Tag = Tag::new(2);

    #[test]
    fn test_null_handle() {
        assert!(Handle::NULL.is_null());
        assert!(Handle::NULL.key().is_none());
        assert_eq!(Handle::default(), Handle::NULL);
    }

    #[test]
    fn test_key_round_trip() {
        let mut slots: ResourceSlots<()> = ResourceSlots::with_key();
        let key = slots.insert(());
        let handle = Handle::from_key(key).unwrap();

        assert!(!handle.is_null());
        assert!(handle.is_direct());
        assert_eq!(handle.key(), Some(key));
        assert!(handle.raw() <= MAX_SAFE_HANDLE);
    }

    #[test]
    fn test_tagged_handle_has_no_key() {
        let mut slots: ResourceSlots<()> = ResourceSlots::with_key();
        let handle = Handle::from_key(slots.insert(())).unwrap();
        let proxy = handle.encode(MAIN);

        assert_ne!(proxy, handle);
        assert!(!proxy.is_direct());
        assert!(proxy.key().is_none());
        assert_eq!(proxy.decode(MAIN), handle);
        assert!(!proxy.decode(WINDOW).is_direct());
    }

    #[test]
    fn test_even_generation_rejected() {
        // slot 0, generation 2: never issued by the arena
        let forged = Handle::from_raw(2 << GENERATION_SHIFT);
        assert!(forged.key().is_none());
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(Handle::from_raw(MAX_SAFE_HANDLE + 16).key().is_none());
    }

    #[test]
    fn test_f64_round_trip() {
        let mut slots: ResourceSlots<()> = ResourceSlots::with_key();
        let handle = Handle::from_key(slots.insert(())).unwrap().encode(WINDOW);
        let value = handle.to_f64();

        assert_eq!(Handle::try_from(value), Ok(handle));
    }

    #[test]
    fn test_f64_rejects_non_integers() {
        assert!(Handle::try_from(1.5).is_err());
        assert!(Handle::try_from(-16.0).is_err());
        assert!(Handle::try_from(f64::NAN).is_err());
        assert!(Handle::try_from(2f64.powi(60)).is_err());
    }

    #[test]
    fn test_display_is_hex() {
        assert_eq!(Handle::from_raw(0x1f0).to_string(), "0x1f0");
    }
}
