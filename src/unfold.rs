/* crate use */
use rustc_hash::FxHashSet;

/* private use */
use crate::assemble::assemble_component;
use crate::complement::complement_components;
use crate::enumerate::{enumerate_haplotype_walks, enumerate_reference_walks};
use crate::error::Result;
use crate::haplotype::ThreadIndex;
use crate::mapping::IdentifierMap;
use crate::refpath::ReferencePathIndex;
use crate::store::HandleGraphStore;
use crate::trie::TrieDuplicator;

/// Phase-unfold `g` against reference paths `x` and haplotype threads `h` (section 2). For each
/// complement component: compute its border nodes (ids present in both the component and `g`),
/// enumerate every border-to-border walk witnessed by either evidence source, fold each into the
/// prefix/suffix tries, assemble the resulting nodes and edges, and merge the assembled component
/// back onto `g`. `mapping` accumulates every duplicate id allocated; callers that want ids to
/// stay stable across runs should load it before and save it after.
pub fn unfold(g: &mut HandleGraphStore, x: &ReferencePathIndex, h: &ThreadIndex, mapping: &mut IdentifierMap) -> Result<()> {
    let components = complement_components(g, x, h);
    log::info!("unfolding {} complement component(s)", components.len());

    for component in components {
        let border: FxHashSet<u64> = component
            .node_ids()
            .into_iter()
            .filter(|&id| g.has_node(id))
            .collect();

        let mut duplicator = TrieDuplicator::new(mapping);
        for &id in &border {
            for walk in enumerate_reference_walks(&component, id, &border, x) {
                duplicator.insert_walk(walk)?;
            }
            for walk in enumerate_haplotype_walks(&component, id, &border, h) {
                duplicator.insert_walk(walk)?;
            }
        }

        let assembled = assemble_component(&component, &duplicator);
        g.extend(&assembled);
    }
    Ok(())
}
