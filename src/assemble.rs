/* crate use */
use rustc_hash::FxHashMap;

/* private use */
use crate::store::HandleGraphStore;
use crate::trie::TrieDuplicator;

/// Assemble a complement component's final node/edge set (section 4.5): for every synthesized
/// prefix/suffix/crossing edge, both its endpoints (a duplicate id resolved back to the original
/// node's sequence via `M`, or — at a walk's unduplicated ends — the border node itself) and the
/// edge between them. Interior original nodes that a walk duplicated are not also emitted under
/// their own id: they have no edge of their own left in the result, only their duplicate does.
pub fn assemble_component(component: &HandleGraphStore, duplicator: &TrieDuplicator) -> HandleGraphStore {
    let mut out = HandleGraphStore::new();
    let origin_of: FxHashMap<u64, u64> = duplicator
        .duplicate_origins()
        .into_iter()
        .map(|(dup, orig_id)| (dup.id(), orig_id))
        .collect();

    for e in duplicator.edges() {
        for h in [e.0, e.1] {
            if !out.has_node(h.id()) {
                let original_id = origin_of.get(&h.id()).copied().unwrap_or_else(|| h.id());
                out.add_node(h.id(), &component.sequence_of(original_id));
            }
        }
        out.add_edge(e);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::{Edge, Handle};
    use crate::mapping::IdentifierMap;

    #[test]
    fn duplicate_nodes_inherit_original_sequence() {
        let mut component = HandleGraphStore::new();
        component.add_node(1, b"A");
        component.add_node(2, b"C");
        component.add_node(3, b"G");

        let mut mapping = IdentifierMap::new(100);
        let mut dup = TrieDuplicator::new(&mut mapping);
        dup.insert_walk(vec![Handle::pack(1, false), Handle::pack(2, false), Handle::pack(3, false)])
            .unwrap();

        let assembled = assemble_component(&component, &dup);
        assert_eq!(assembled.sequence_of(100), b"C");
        assert!(assembled.has_edge(Edge(Handle::pack(1, false), Handle::pack(100, false))));
        assert!(assembled.has_edge(Edge(Handle::pack(100, false), Handle::pack(3, false))));
    }

    #[test]
    fn duplicated_interior_originals_are_not_emitted_under_their_own_id() {
        // bubble: component has nodes {1,2,3,4}, but only 1 and 3 are border nodes (present in
        // G); 2 and 4 are each duplicated by one of the two walks through the bubble.
        let mut component = HandleGraphStore::new();
        component.add_node(1, b"A");
        component.add_node(2, b"C");
        component.add_node(3, b"G");
        component.add_node(4, b"T");

        let mut mapping = IdentifierMap::new(100);
        let mut dup = TrieDuplicator::new(&mut mapping);
        dup.insert_walk(vec![Handle::pack(1, false), Handle::pack(2, false), Handle::pack(3, false)])
            .unwrap();
        dup.insert_walk(vec![Handle::pack(1, false), Handle::pack(4, false), Handle::pack(3, false)])
            .unwrap();

        let assembled = assemble_component(&component, &dup);
        assert!(!assembled.has_node(2));
        assert!(!assembled.has_node(4));
        assert_eq!(assembled.node_ids().len(), 4); // 1, 3, dup(2), dup(4)
    }
}
