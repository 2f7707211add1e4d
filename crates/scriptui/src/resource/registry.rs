//! Resource registry
//!
//! Owns every live resource in a generational arena and implements the
//! validate / resolve / collect cycle. The registry is an explicit value:
//! the engine owns one, tests create their own.

use super::error::ResourceError;
use super::handle::{Handle, Tag, MAX_GENERATION, MAX_INDEX};
use super::proxy::ResourceProxy;
use super::timer::LivenessTimer;
use super::{AnyResource, Resource, ResourceKind};
use crate::core::config::ResourceConfig;
use crate::foundation::collections::{Key, ResourceKey, ResourceSlots};
use std::any::{Any, TypeId};
use std::cell::Cell;

/// Registry bookkeeping for one resource
struct Entry {
    resource: Box<dyn Resource>,
    type_id: TypeId,
    type_name: &'static str,
    timer: LivenessTimer,
    owner: Option<ResourceKey>,
    children: Vec<ResourceKey>,
    /// Latched result of a failed [`Resource::is_valid`]
    invalidated: Cell<bool>,
}

/// Occupant of a slot whose generation ran out
struct Retired;

impl Resource for Retired {}

impl Entry {
    fn new<T: Resource + ResourceKind>(resource: T, keep_alive_frames: u32) -> Self {
        Self {
            resource: Box::new(resource),
            type_id: TypeId::of::<T>(),
            type_name: T::TYPE_NAME,
            timer: LivenessTimer::new(keep_alive_frames),
            owner: None,
            children: Vec::new(),
            invalidated: Cell::new(false),
        }
    }

    /// Never live, never collected; pins its slot so it is not reused
    fn retired() -> Self {
        let mut timer = LivenessTimer::new(1);
        timer.destroy();
        Self {
            resource: Box::new(Retired),
            type_id: TypeId::of::<Retired>(),
            type_name: "Retired",
            timer,
            owner: None,
            children: Vec::new(),
            invalidated: Cell::new(true),
        }
    }

    fn is_retired(&self) -> bool {
        self.type_id == TypeId::of::<Retired>()
    }

    fn resource(&self) -> &dyn Resource {
        self.resource.as_ref()
    }

    fn resource_mut(&mut self) -> &mut dyn Resource {
        self.resource.as_mut()
    }

    /// Exact-type fast path first; ancestors only when that misses
    fn is_kind(&self, kind: TypeId) -> bool {
        self.type_id == kind
            || kind == TypeId::of::<AnyResource>()
            || self.resource().ancestor(kind).is_some()
    }

    fn downcast_ref<T: Any>(&self) -> Option<&T> {
        if self.type_id == TypeId::of::<T>() {
            self.resource().as_any().downcast_ref::<T>()
        } else {
            self.resource().ancestor(TypeId::of::<T>())?.downcast_ref::<T>()
        }
    }

    fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        if self.type_id == TypeId::of::<T>() {
            self.resource_mut().as_any_mut().downcast_mut::<T>()
        } else {
            self.resource_mut()
                .ancestor_mut(TypeId::of::<T>())?
                .downcast_mut::<T>()
        }
    }
}

/// Outcome of one [`Resources::heartbeat`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeartbeatReport {
    /// Heartbeat number (1 for the first heartbeat)
    pub frame: u64,
    /// Resources whose idle window ran out
    pub expired: usize,
    /// Resources whose own validity predicate failed
    pub invalidated: usize,
    /// Total destroyed, including attached resources torn down with them
    pub destroyed: usize,
    /// Resources still alive afterwards
    pub live: usize,
}

/// Registry of every resource exposed to script callers
pub struct Resources {
    slots: ResourceSlots<Entry>,
    config: ResourceConfig,
    frame: u64,
    /// Slots pinned by [`Entry::retired`]
    retired: usize,
    generation_limit: u64,
}

impl Default for Resources {
    fn default() -> Self {
        Self::new(ResourceConfig::default())
    }
}

impl Resources {
    /// Create an empty registry
    pub fn new(config: ResourceConfig) -> Self {
        log::debug!("Creating resource registry with config: {:?}", config);
        Self {
            slots: ResourceSlots::with_key(),
            config,
            frame: 0,
            retired: 0,
            generation_limit: MAX_GENERATION,
        }
    }

    /// Lower the generation at which slots are retired
    #[cfg(test)]
    fn with_generation_limit(mut self, limit: u64) -> Self {
        self.generation_limit = limit;
        self
    }

    /// Registry configuration
    pub fn config(&self) -> &ResourceConfig {
        &self.config
    }

    /// Number of heartbeats so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Number of live resources
    pub fn len(&self) -> usize {
        self.slots.len() - self.retired
    }

    /// Whether no resource is alive
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn handle_for(&self, key: ResourceKey) -> Option<Handle> {
        if key.data().as_ffi() >> 32 > self.generation_limit {
            return None;
        }
        Handle::from_key(key)
    }

    /// Take ownership of a new resource and return its handle.
    ///
    /// The resource starts armed, as if it had just been used. A slot whose
    /// generation no longer fits a handle is retired and the insert moves on
    /// to another slot.
    pub fn insert<T: Resource + ResourceKind>(&mut self, resource: T) -> Result<Handle, ResourceError> {
        let limit = self.config.max_resources;
        if limit > 0 && self.len() >= limit {
            log::warn!("Refusing to create {}: {} resources alive", T::TYPE_NAME, limit);
            return Err(ResourceError::LimitReached { limit });
        }

        let mut entry = Entry::new(resource, self.config.keep_alive_frames);
        loop {
            let key = self.slots.insert(entry);
            if let Some(handle) = self.handle_for(key) {
                log::debug!("Created {} {}", T::TYPE_NAME, handle);
                return Ok(handle);
            }

            let ffi = key.data().as_ffi();
            let (index, generation) = (ffi & 0xFFFF_FFFF, ffi >> 32);
            if index > MAX_INDEX {
                self.slots.remove(key);
                log::error!(
                    "Handle space exhausted creating {} (slot {}, generation {})",
                    T::TYPE_NAME,
                    index,
                    generation
                );
                debug_assert!(index <= MAX_INDEX, "slot {index} does not fit a 53-bit handle");
                return Err(ResourceError::HandleSpaceExhausted { index, generation });
            }

            log::warn!("Retiring slot {} at generation {}", index, generation);
            let Some(slot) = self.slots.get_mut(key) else {
                return Err(ResourceError::HandleSpaceExhausted { index, generation });
            };
            entry = std::mem::replace(slot, Entry::retired());
            self.retired += 1;
        }
    }

    fn live_entry(&self, handle: Handle) -> Option<(ResourceKey, &Entry)> {
        let key = handle.key()?;
        let entry = self.slots.get(key)?;
        if entry.invalidated.get() || !entry.timer.is_armed() {
            return None;
        }
        Some((key, entry))
    }

    /// Whether `handle` refers to a live resource of kind `T` (or a kind
    /// embedding `T`). Never panics; null is always invalid.
    pub fn is_valid<T: ResourceKind>(&self, handle: Handle) -> bool {
        let Some((_, entry)) = self.live_entry(handle) else {
            return false;
        };
        if !entry.is_kind(TypeId::of::<T>()) {
            return false;
        }
        if !entry.resource().is_valid(self) {
            log::debug!("{} {} reported itself invalid", entry.type_name, handle);
            entry.invalidated.set(true);
            return false;
        }
        true
    }

    /// Caller-facing kind name of a live resource
    pub fn type_name(&self, handle: Handle) -> Option<&'static str> {
        self.live_entry(handle).map(|(_, entry)| entry.type_name)
    }

    /// Re-arm the idle timer of a resource
    pub fn keep_alive(&mut self, handle: Handle) -> bool {
        if !self.is_valid::<AnyResource>(handle) {
            return false;
        }
        match handle.key().and_then(|key| self.slots.get_mut(key)) {
            Some(entry) => {
                entry.timer.keep_alive();
                true
            }
            None => false,
        }
    }

    /// Borrow a resource without counting it as used
    pub fn peek<T: ResourceKind>(&self, handle: Handle) -> Option<&T> {
        if !self.is_valid::<T>(handle) {
            return None;
        }
        self.slots.get(handle.key()?)?.downcast_ref::<T>()
    }

    /// Validate, keep alive, and borrow a resource
    pub fn get<T: ResourceKind>(&mut self, handle: Handle) -> Result<&T, ResourceError> {
        self.get_mut::<T>(handle).map(|resource| &*resource)
    }

    /// Validate, keep alive, and mutably borrow a resource
    pub fn get_mut<T: ResourceKind>(&mut self, handle: Handle) -> Result<&mut T, ResourceError> {
        let invalid = || ResourceError::invalid(T::TYPE_NAME, handle);
        if !self.is_valid::<T>(handle) {
            return Err(invalid());
        }
        let entry = handle
            .key()
            .and_then(|key| self.slots.get_mut(key))
            .ok_or_else(invalid)?;
        entry.timer.keep_alive();
        entry.downcast_mut::<T>().ok_or_else(invalid)
    }

    /// Destroy a resource and everything attached to it.
    ///
    /// Returns `false` if the handle was not live.
    pub fn destroy(&mut self, handle: Handle) -> bool {
        let Some(key) = handle.key() else {
            return false;
        };
        if !self.slots.get(key).is_some_and(|entry| !entry.is_retired()) {
            return false;
        }
        let count = self.destroy_key(key);
        log::debug!("Destroyed {} ({} resources)", handle, count);
        true
    }

    fn destroy_key(&mut self, key: ResourceKey) -> usize {
        match self.slots.get(key) {
            Some(entry) if !entry.is_retired() => {}
            _ => return 0,
        }
        let Some(mut entry) = self.slots.remove(key) else {
            return 0;
        };
        entry.timer.destroy();

        if let Some(owner) = entry.owner {
            if let Some(parent) = self.slots.get_mut(owner) {
                parent.children.retain(|&child| child != key);
            }
        }

        let mut count = 1;
        for child in std::mem::take(&mut entry.children) {
            count += self.destroy_key(child);
        }
        log::trace!("Dropping {}", entry.type_name);
        count
    }

    /// Destroy every live resource. Safe to call repeatedly.
    pub fn destroy_all(&mut self) -> usize {
        let keys: Vec<ResourceKey> = self
            .slots
            .iter()
            .filter(|(_, entry)| !entry.is_retired())
            .map(|(key, _)| key)
            .collect();
        let count: usize = keys.into_iter().map(|key| self.destroy_key(key)).sum();
        if count > 0 {
            log::info!("Destroyed all {} outstanding resources", count);
        }
        count
    }

    /// Tie `child`'s lifetime to `owner`.
    ///
    /// An attached resource is not idle-collected; it is destroyed together
    /// with its owner.
    pub fn attach<O: ResourceKind, C: ResourceKind>(&mut self, owner: Handle, child: Handle) -> Result<(), ResourceError> {
        if !self.is_valid::<O>(owner) {
            return Err(ResourceError::invalid(O::TYPE_NAME, owner));
        }
        if !self.is_valid::<C>(child) {
            return Err(ResourceError::invalid(C::TYPE_NAME, child));
        }
        let (owner_key, child_key) = match (owner.key(), child.key()) {
            (Some(owner_key), Some(child_key)) => (owner_key, child_key),
            _ => return Err(ResourceError::invalid(C::TYPE_NAME, child)),
        };

        let (owner_entry, child_entry) = match (self.slots.get(owner_key), self.slots.get(child_key)) {
            (Some(owner_entry), Some(child_entry)) => (owner_entry, child_entry),
            _ => return Err(ResourceError::invalid(C::TYPE_NAME, child)),
        };
        if owner_key == child_key || !child_entry.resource().attachable(owner_entry.resource()) {
            return Err(ResourceError::NotAttachable {
                kind: child_entry.type_name,
                owner: owner_entry.type_name,
            });
        }
        match child_entry.owner {
            Some(existing) if existing == owner_key => return Ok(()),
            Some(_) => {
                return Err(ResourceError::AlreadyAttached {
                    kind: child_entry.type_name,
                })
            }
            None => {}
        }

        if let Some(entry) = self.slots.get_mut(child_key) {
            entry.owner = Some(owner_key);
            entry.timer.keep_alive();
        }
        if let Some(entry) = self.slots.get_mut(owner_key) {
            entry.children.push(child_key);
            entry.timer.keep_alive();
        }
        log::debug!("Attached {} to {}", child, owner);
        Ok(())
    }

    /// Undo [`Resources::attach`]; the child becomes idle-collectable again
    pub fn detach<O: ResourceKind, C: ResourceKind>(&mut self, owner: Handle, child: Handle) -> Result<(), ResourceError> {
        if !self.is_valid::<O>(owner) {
            return Err(ResourceError::invalid(O::TYPE_NAME, owner));
        }
        if !self.is_valid::<C>(child) {
            return Err(ResourceError::invalid(C::TYPE_NAME, child));
        }
        let (Some(owner_key), Some(child_key)) = (owner.key(), child.key()) else {
            return Err(ResourceError::invalid(C::TYPE_NAME, child));
        };
        let attached_here = self
            .slots
            .get(child_key)
            .is_some_and(|entry| entry.owner == Some(owner_key));
        if !attached_here {
            return Err(ResourceError::InvalidArgument(format!(
                "{child} is not attached to {owner}"
            )));
        }

        if let Some(entry) = self.slots.get_mut(owner_key) {
            entry.children.retain(|&key| key != child_key);
        }
        if let Some(entry) = self.slots.get_mut(child_key) {
            entry.owner = None;
            entry.timer.keep_alive();
        }
        log::debug!("Detached {} from {}", child, owner);
        Ok(())
    }

    /// Owner a resource is attached to, if any
    pub fn owner_of(&self, handle: Handle) -> Option<Handle> {
        let (_, entry) = self.live_entry(handle)?;
        entry.owner.and_then(Handle::from_key)
    }

    /// Run `f` on every live resource of exactly kind `T`
    pub fn for_each_mut<T: ResourceKind>(&mut self, mut f: impl FnMut(Handle, &mut T)) {
        let type_id = TypeId::of::<T>();
        for (key, entry) in &mut self.slots {
            if entry.type_id != type_id || entry.invalidated.get() {
                continue;
            }
            if let (Some(handle), Some(resource)) = (Handle::from_key(key), entry.downcast_mut::<T>()) {
                f(handle, resource);
            }
        }
    }

    /// Advance one frame and collect idle or invalid resources.
    ///
    /// Attached resources do not count down; they share their owner's fate.
    pub fn heartbeat(&mut self) -> HeartbeatReport {
        self.frame += 1;
        let mut report = HeartbeatReport {
            frame: self.frame,
            ..HeartbeatReport::default()
        };

        let mut doomed: Vec<ResourceKey> = Vec::new();
        for (key, entry) in &self.slots {
            if entry.is_retired() {
                continue;
            }
            if entry.invalidated.get() || !entry.resource().is_valid(self) {
                entry.invalidated.set(true);
                report.invalidated += 1;
                doomed.push(key);
            }
        }

        for (key, entry) in &mut self.slots {
            if entry.owner.is_some() || entry.invalidated.get() {
                continue;
            }
            if entry.timer.tick() {
                log::debug!("{} idle for {} frames, collecting", entry.type_name, entry.timer.window());
                report.expired += 1;
                doomed.push(key);
            }
        }

        for key in doomed {
            report.destroyed += self.destroy_key(key);
        }
        report.live = self.len();

        if report.destroyed > 0 {
            log::trace!("Heartbeat {}: {:?}", self.frame, report);
        }
        report
    }

    /// Derive a proxy handle from a live base resource
    pub fn encode<P: ResourceProxy>(&self, base: Handle, tag: Tag) -> Result<Handle, ResourceError> {
        let Some(accessor) = P::accessor(tag) else {
            return Err(ResourceError::UnknownTag {
                proxy: P::TYPE_NAME,
                tag: tag.bits(),
            });
        };
        if !base.is_direct() || !self.is_valid::<P::Base>(base) {
            return Err(ResourceError::invalid(<P::Base as ResourceKind>::TYPE_NAME, base));
        }
        let handle = base.encode(tag);
        log::trace!("{} {} derived via {}", P::TYPE_NAME, handle, accessor.name);
        Ok(handle)
    }

    /// Whether `handle` resolves through any of `P`'s accessors
    pub fn proxy_is_valid<P: ResourceProxy>(&self, handle: Handle) -> bool {
        !handle.is_null()
            && P::ACCESSORS
                .iter()
                .any(|accessor| self.is_valid::<P::Base>(handle.decode(accessor.tag)))
    }

    /// Resolve a proxy handle to its base handle and concrete sub-object.
    ///
    /// Accessors are tried in declared order and the first whose decoded
    /// base is live wins; later accessors are not consulted. The base is
    /// kept alive.
    pub fn resolve<P: ResourceProxy>(&mut self, handle: Handle) -> Result<(Handle, &mut P::Target), ResourceError> {
        let invalid = || ResourceError::invalid(P::TYPE_NAME, handle);
        if handle.is_null() {
            return Err(invalid());
        }
        for accessor in P::ACCESSORS {
            let base = handle.decode(accessor.tag);
            if self.is_valid::<P::Base>(base) {
                let resource = self.get_mut::<P::Base>(base).map_err(|_| invalid())?;
                log::trace!("{} {} resolved via {}", P::TYPE_NAME, handle, accessor.name);
                return Ok((base, (accessor.get)(resource)));
            }
        }
        Err(invalid())
    }
}

impl Drop for Resources {
    fn drop(&mut self) {
        self.destroy_all();
    }
}
