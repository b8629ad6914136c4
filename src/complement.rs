/* private use */
use crate::handle::{Edge, Handle};
use crate::haplotype::ThreadIndex;
use crate::refpath::ReferencePathIndex;
use crate::store::HandleGraphStore;

/// Build the complement graph scratch(X, H, G) and split it into weakly connected components
/// (section 4.1). An edge from either evidence source that G does not already have contributes
/// both its endpoints (with sequences fetched from X) and itself to the scratch graph. An edge
/// whose endpoint X cannot resolve a sequence for is logged and skipped — inconsistent evidence
/// (section 7), not a fatal condition.
pub fn complement_components(
    g: &HandleGraphStore,
    x: &ReferencePathIndex,
    h: &ThreadIndex,
) -> Vec<HandleGraphStore> {
    let mut scratch = HandleGraphStore::new();

    for path_index in 0..x.path_count() {
        for w in x.path_handles(path_index).windows(2) {
            add_if_absent(&mut scratch, g, x, w[0], w[1]);
        }
    }
    for Edge(u, v) in h.edges() {
        add_if_absent(&mut scratch, g, x, u, v);
    }

    let components = scratch.weakly_connected_components();
    log::info!(
        "complement graph: {} node(s) split into {} component(s)",
        scratch.node_ids().len(),
        components.len()
    );
    components
}

fn add_if_absent(scratch: &mut HandleGraphStore, g: &HandleGraphStore, x: &ReferencePathIndex, u: Handle, v: Handle) {
    let e = Edge(u, v);
    if g.has_edge(e) {
        return;
    }
    if !x.has_node(u.id()) || !x.has_node(v.id()) {
        log::warn!(
            "complement edge {} references a node absent from the reference index; skipping",
            e
        );
        return;
    }
    scratch.add_node(u.id(), &x.sequence_of(u.id()));
    scratch.add_node(v.id(), &x.sequence_of(v.id()));
    scratch.add_edge(e);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_reference_index() -> ReferencePathIndex {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("graphfold-complement-test-{}.gfa", std::process::id()));
        std::fs::write(
            &path,
            "H\tVN:Z:1.0\nS\t1\tA\nS\t2\tC\nS\t3\tG\nL\t1\t+\t2\t+\t0M\nL\t2\t+\t3\t+\t0M\nP\tx\t1+,2+,3+\t*\n",
        )
        .unwrap();
        let x = ReferencePathIndex::load(path.to_str().unwrap()).unwrap();
        let _ = std::fs::remove_file(&path);
        x
    }

    #[test]
    fn edges_already_in_g_are_not_duplicated_into_scratch() {
        let x = fixture_reference_index();
        let h = ThreadIndex::load_for_test(vec![]);

        let mut g = HandleGraphStore::new();
        g.add_edge(Edge(Handle::pack(1, false), Handle::pack(2, false)));
        g.add_edge(Edge(Handle::pack(2, false), Handle::pack(3, false)));

        let components = complement_components(&g, &x, &h);
        assert!(components.is_empty());
    }

    #[test]
    fn missing_edges_form_a_single_component() {
        let x = fixture_reference_index();
        let h = ThreadIndex::load_for_test(vec![]);
        let g = HandleGraphStore::new();

        let components = complement_components(&g, &x, &h);
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].node_ids().len(), 3);
    }
}
