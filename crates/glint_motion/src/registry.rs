//! Motion registry
//!
//! Owns the spring bundle of every tracked element and threads navigable
//! elements into a doubly linked traversal order. Nodes live in a slotmap
//! arena; the chain links are arena keys, so the registry stays the single
//! owner of every node.

use glint_core::{ElementId, ElementRole, MotionError, Rect, Result};
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use tracing::{debug, warn};

use crate::channels::{apply, Channel, Field, MotionConfig, MotionOverrides};
use crate::spring::Spring;

new_key_type! {
    /// Arena key for a registered node
    struct NodeKey;
}

/// One tracked element: its handle, role, springs, and chain links
#[derive(Debug)]
struct MotionNode {
    element: ElementId,
    role: ElementRole,
    motion: MotionConfig,
    prev: Option<NodeKey>,
    next: Option<NodeKey>,
}

/// Registry of every element participating in motion.
///
/// Registration is idempotent; removal only happens wholesale via
/// [`MotionRegistry::clear`] when the owning widget closes.
#[derive(Debug, Default)]
pub struct MotionRegistry {
    nodes: SlotMap<NodeKey, MotionNode>,
    lookup: FxHashMap<ElementId, NodeKey>,
    head: Option<NodeKey>,
    tail: Option<NodeKey>,
}

impl MotionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tracked elements
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Track an element at its natural rest geometry.
    ///
    /// No-op if the element is already tracked. Navigable elements are
    /// appended to the chain tail in registration order.
    pub fn register(
        &mut self,
        element: ElementId,
        role: ElementRole,
        bounds: Rect,
        overrides: &MotionOverrides,
    ) {
        if self.lookup.contains_key(&element) {
            debug!(?element, "already tracked, ignoring re-registration");
            return;
        }

        let motion = MotionConfig::at_rest(bounds.size(), overrides);
        let prev = if role.is_navigable() { self.tail } else { None };
        let key = self.nodes.insert(MotionNode {
            element,
            role,
            motion,
            prev,
            next: None,
        });

        if role.is_navigable() {
            if let Some(tail) = self.tail {
                self.nodes[tail].next = Some(key);
            }
            self.tail = Some(key);
            if self.head.is_none() {
                self.head = Some(key);
            }
        }

        self.lookup.insert(element, key);
    }

    fn node(&self, element: ElementId) -> Result<&MotionNode> {
        self.lookup
            .get(&element)
            .map(|key| &self.nodes[*key])
            .ok_or(MotionError::Untracked(element))
    }

    fn node_mut(&mut self, element: ElementId) -> Result<&mut MotionNode> {
        let key = self
            .lookup
            .get(&element)
            .copied()
            .ok_or(MotionError::Untracked(element))?;
        Ok(&mut self.nodes[key])
    }

    /// Spring bundle of a tracked element
    pub fn motion(&self, element: ElementId) -> Option<&MotionConfig> {
        self.node(element).ok().map(|node| &node.motion)
    }

    /// Role the element was registered with
    pub fn role(&self, element: ElementId) -> Option<ElementRole> {
        self.node(element).ok().map(|node| node.role)
    }

    pub(crate) fn try_set(
        &mut self,
        element: ElementId,
        channel: Channel,
        field: Field,
        value: f32,
        immediate: bool,
    ) -> Result<()> {
        let node = self.node_mut(element)?;
        apply(node.motion.channel_mut(channel), field, value, immediate);
        Ok(())
    }

    /// Write one field of one channel; the change takes effect on the next
    /// frame.
    pub fn set(&mut self, element: ElementId, channel: Channel, field: Field, value: f32) {
        if let Err(err) = self.try_set(element, channel, field, value, false) {
            warn!(%err, "set dropped");
        }
    }

    /// Like [`set`](Self::set), but also snaps the channel to rest at its
    /// destination — no frame callback involved.
    pub fn set_immediate(&mut self, element: ElementId, channel: Channel, field: Field, value: f32) {
        if let Err(err) = self.try_set(element, channel, field, value, true) {
            warn!(%err, "set_immediate dropped");
        }
    }

    /// Animate every channel of the element back to its registration-time
    /// value
    pub fn reset_to_initial(&mut self, element: ElementId) {
        match self.node_mut(element) {
            Ok(node) => node.motion.retract(),
            Err(err) => warn!(%err, "reset_to_initial dropped"),
        }
    }

    /// First navigable element in registration order
    pub fn first(&self) -> Option<ElementId> {
        self.head.map(|key| self.nodes[key].element)
    }

    /// Last navigable element in registration order
    pub fn last(&self) -> Option<ElementId> {
        self.tail.map(|key| self.nodes[key].element)
    }

    /// Successor in the chain, wrapping from tail to head
    pub fn next(&self, element: ElementId) -> Option<ElementId> {
        match self.node(element) {
            Ok(node) => node
                .next
                .or(self.head)
                .map(|key| self.nodes[key].element),
            Err(err) => {
                warn!(%err, "next dropped");
                None
            }
        }
    }

    /// Predecessor in the chain, wrapping from head to tail
    pub fn previous(&self, element: ElementId) -> Option<ElementId> {
        match self.node(element) {
            Ok(node) => node
                .prev
                .or(self.tail)
                .map(|key| self.nodes[key].element),
            Err(err) => {
                warn!(%err, "previous dropped");
                None
            }
        }
    }

    /// Visit every spring of every tracked element
    pub fn for_each_spring_mut(&mut self, mut f: impl FnMut(&mut Spring)) {
        for (_, node) in self.nodes.iter_mut() {
            node.motion.for_each_spring_mut(&mut f);
        }
    }

    /// Visit every tracked element with its spring bundle
    pub fn for_each(&self, mut f: impl FnMut(ElementId, &MotionConfig)) {
        for (_, node) in self.nodes.iter() {
            f(node.element, &node.motion);
        }
    }

    /// Drop every node and reset the chain
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.lookup.clear();
        self.head = None;
        self.tail = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::Size;

    fn item_rect() -> Rect {
        Rect::new(0.0, 0.0, 100.0, 30.0)
    }

    fn registry_with_items(n: u64) -> (MotionRegistry, Vec<ElementId>) {
        let mut registry = MotionRegistry::new();
        let items: Vec<ElementId> = (1..=n).map(ElementId::new).collect();
        for (i, item) in items.iter().enumerate() {
            let rect = Rect::new(0.0, 30.0 * i as f32, 100.0, 30.0);
            registry.register(*item, ElementRole::Item, rect, &MotionOverrides::default());
        }
        (registry, items)
    }

    #[test]
    fn test_registration_is_idempotent() {
        let (mut registry, items) = registry_with_items(3);
        assert_eq!(registry.len(), 3);

        registry.register(
            items[0],
            ElementRole::Item,
            item_rect(),
            &MotionOverrides::default(),
        );
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.first(), Some(items[0]));
        assert_eq!(registry.last(), Some(items[2]));
        assert_eq!(registry.next(items[0]), Some(items[1]));
    }

    #[test]
    fn test_chain_wraps_around() {
        let (registry, items) = registry_with_items(3);
        assert_eq!(registry.next(items[0]), Some(items[1]));
        assert_eq!(registry.next(items[2]), Some(items[0]));
        assert_eq!(registry.previous(items[0]), Some(items[2]));
        assert_eq!(registry.previous(items[1]), Some(items[0]));
    }

    #[test]
    fn test_empty_chain_returns_absence() {
        let registry = MotionRegistry::new();
        assert_eq!(registry.first(), None);
        assert_eq!(registry.last(), None);
        assert_eq!(registry.next(ElementId::new(9)), None);
        assert_eq!(registry.previous(ElementId::new(9)), None);
    }

    #[test]
    fn test_non_navigable_elements_stay_off_chain() {
        let mut registry = MotionRegistry::new();
        let highlight = ElementId::new(100);
        registry.register(
            highlight,
            ElementRole::Highlight,
            item_rect(),
            &MotionOverrides::default(),
        );
        let item = ElementId::new(1);
        registry.register(
            item,
            ElementRole::Item,
            item_rect(),
            &MotionOverrides::default(),
        );

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.first(), Some(item));
        assert_eq!(registry.last(), Some(item));
    }

    #[test]
    fn test_set_on_untracked_is_noop() {
        let mut registry = MotionRegistry::new();
        registry.set(ElementId::new(5), Channel::Opacity, Field::Dest, 0.0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_set_immediate_snaps_synchronously() {
        let (mut registry, items) = registry_with_items(1);
        registry.set_immediate(items[0], Channel::Opacity, Field::Dest, 0.0);

        let motion = registry.motion(items[0]).unwrap();
        assert_eq!(motion.opacity.current, 0.0);
        assert_eq!(motion.opacity.velocity, 0.0);
    }

    #[test]
    fn test_reset_to_initial_retracts_all_channels() {
        let (mut registry, items) = registry_with_items(1);
        registry.set(items[0], Channel::ScaleX, Field::Dest, 1.1);
        registry.set(items[0], Channel::Width, Field::Dest, 110.0);

        registry.reset_to_initial(items[0]);
        let motion = registry.motion(items[0]).unwrap();
        assert_eq!(motion.scale_x.dest, 1.0);
        assert_eq!(motion.w.dest, 100.0);
    }

    #[test]
    fn test_clear_resets_to_empty() {
        let (mut registry, items) = registry_with_items(3);
        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.first(), None);
        assert_eq!(registry.last(), None);
        assert!(registry.motion(items[0]).is_none());
    }

    #[test]
    fn test_registered_size_is_initial() {
        let mut registry = MotionRegistry::new();
        let item = ElementId::new(1);
        registry.register(
            item,
            ElementRole::Item,
            Rect::from_origin_size(glint_core::Point::new(4.0, 8.0), Size::new(64.0, 20.0)),
            &MotionOverrides::default(),
        );
        let motion = registry.motion(item).unwrap();
        assert_eq!(motion.w.initial, 64.0);
        assert_eq!(motion.h.initial, 20.0);
        assert_eq!(motion.x.initial, 0.0);
        assert_eq!(motion.y.initial, 0.0);
    }
}
