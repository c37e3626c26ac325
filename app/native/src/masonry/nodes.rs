//! Item identity to view node registry.
//!
//! The renderer owns the nodes and reports them here as they mount and
//! unmount. The engine only reads the registry; an item without a node is a
//! normal state (not rendered yet) and never an error.

use std::collections::HashMap;

use serde::Serialize;

use super::effects::Layer;
use super::state::ItemId;

/// Opaque identifier of a host view node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub u64);

/// Nodes rendered for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemNodes {
    /// The absolutely positioned wrapper.
    pub item: NodeId,
    /// Optional color overlay inside the wrapper.
    pub overlay: Option<NodeId>,
}

impl ItemNodes {
    /// Every node of the item.
    pub fn all(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::once(self.item).chain(self.overlay)
    }
}

#[derive(Debug, Default)]
pub struct NodeRegistry {
    nodes: HashMap<ItemId, ItemNodes>,
}

impl NodeRegistry {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Records the nodes of an item, returning the ones they replace.
    pub fn register(&mut self, item: ItemId, nodes: ItemNodes) -> Option<ItemNodes> {
        self.nodes.insert(item, nodes)
    }

    /// Forgets an item's nodes.
    pub fn unregister(&mut self, item: &ItemId) -> Option<ItemNodes> { self.nodes.remove(item) }

    /// Node of an item for a layer, if rendered.
    #[must_use]
    pub fn resolve(&self, item: &ItemId, layer: Layer) -> Option<NodeId> {
        let nodes = self.nodes.get(item)?;
        match layer {
            Layer::Item => Some(nodes.item),
            Layer::Overlay => nodes.overlay,
        }
    }

    #[must_use]
    pub fn get(&self, item: &ItemId) -> Option<&ItemNodes> { self.nodes.get(item) }

    #[must_use]
    pub fn contains(&self, item: &ItemId) -> bool { self.nodes.contains_key(item) }

    #[must_use]
    pub fn len(&self) -> usize { self.nodes.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    pub fn clear(&mut self) { self.nodes.clear(); }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_layers() {
        let mut registry = NodeRegistry::new();
        registry.register(ItemId::from("a"), ItemNodes { item: NodeId(1), overlay: Some(NodeId(2)) });
        registry.register(ItemId::from("b"), ItemNodes { item: NodeId(3), overlay: None });

        assert_eq!(registry.resolve(&ItemId::from("a"), Layer::Overlay), Some(NodeId(2)));
        assert_eq!(registry.resolve(&ItemId::from("b"), Layer::Item), Some(NodeId(3)));
        assert_eq!(registry.resolve(&ItemId::from("b"), Layer::Overlay), None);
        assert_eq!(registry.resolve(&ItemId::from("c"), Layer::Item), None);
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = NodeRegistry::new();
        let id = ItemId::from("a");
        assert!(registry.register(id.clone(), ItemNodes { item: NodeId(1), overlay: None }).is_none());
        let old = registry.register(id.clone(), ItemNodes { item: NodeId(9), overlay: None });
        assert_eq!(old.map(|n| n.item), Some(NodeId(1)));
        assert_eq!(registry.len(), 1);

        let removed = registry.unregister(&id).unwrap();
        assert_eq!(removed.all().collect::<Vec<_>>(), vec![NodeId(9)]);
        assert!(registry.is_empty());
    }
}
