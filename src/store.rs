/* standard use */
use std::io::{self, Write};

/* crate use */
use gfa::{gfa::GFA, parser::GFAParser};
use handlegraph::{handle::Edge as HgEdge, handlegraph::*, hashgraph::HashGraph};
use petgraph::{graphmap::DiGraphMap, unionfind::UnionFind};
use rustc_hash::{FxHashMap, FxHashSet};

/* private use */
use crate::error::Result;
use crate::handle::{Edge, Handle};

/// Parse a GFA1 file into a `handlegraph::hashgraph::HashGraph`, exactly the way the teacher's
/// binaries do (`GFAParser::new().parse_file(..)` then `HashGraph::from_gfa`).
pub(crate) fn load_hashgraph(path: &str) -> Result<HashGraph> {
    let parser = GFAParser::new();
    let gfa: GFA<usize, ()> = parser
        .parse_file(path)
        .expect("failed to parse GFA1 file");
    Ok(HashGraph::from_gfa(&gfa))
}

/// The mutable variation graph collaborator (G, section 1/4.8).
///
/// A minimal, self-contained handle graph: node sequences, directed oriented-handle edges
/// stored under the bidirected canonical-flip convention (section 3 — recording `(u, v)` also
/// records `(v.flip(), u.flip())`), and undirected node adjacency for weak-component search
/// (section 4.1).
#[derive(Clone, Default, Debug)]
pub struct HandleGraphStore {
    sequences: FxHashMap<u64, Vec<u8>>,
    out_edges: FxHashMap<u64, FxHashSet<u64>>,
    node_adjacency: FxHashMap<u64, FxHashSet<u64>>,
}

impl HandleGraphStore {
    pub fn new() -> HandleGraphStore {
        HandleGraphStore::default()
    }

    /// Load a graph store from a GFA1 file (section 6's "path to graph G").
    pub fn load_gfa(path: &str) -> Result<HandleGraphStore> {
        let g = load_hashgraph(path)?;
        let mut store = HandleGraphStore::new();
        for v in g.handles() {
            let id = v.unpack_number() as u64;
            let seq = g.sequence_vec(v);
            store.add_node(id, &seq);
        }
        for HgEdge(u, v) in g.edges() {
            store.add_edge(Edge(
                Handle::pack(u.unpack_number() as u64, u.is_reverse()),
                Handle::pack(v.unpack_number() as u64, v.is_reverse()),
            ));
        }
        log::info!(
            "loaded graph {} ({} nodes, {} edges)",
            path,
            store.sequences.len(),
            store.out_edges.values().map(|s| s.len()).sum::<usize>()
        );
        Ok(store)
    }

    pub fn has_node(&self, id: u64) -> bool {
        self.sequences.contains_key(&id)
    }

    pub fn has_edge(&self, e: Edge) -> bool {
        self.out_edges
            .get(&e.0.as_integer())
            .map_or(false, |s| s.contains(&e.1.as_integer()))
    }

    /// Add a node with the given original id and sequence. No-op if already present (the
    /// Assembler and Complement Builder may both try to add the same border node).
    pub fn add_node(&mut self, id: u64, seq: &[u8]) {
        self.sequences.entry(id).or_insert_with(|| seq.to_vec());
        self.out_edges.entry(Handle::pack(id, false).as_integer()).or_default();
        self.out_edges.entry(Handle::pack(id, true).as_integer()).or_default();
        self.node_adjacency.entry(id).or_default();
    }

    /// Record `e` and, per the bidirected canonical-flip convention, its reverse complement.
    pub fn add_edge(&mut self, e: Edge) {
        self.add_node_if_absent(e.0.id());
        self.add_node_if_absent(e.1.id());

        self.out_edges
            .entry(e.0.as_integer())
            .or_default()
            .insert(e.1.as_integer());
        let rc = e.flip();
        self.out_edges
            .entry(rc.0.as_integer())
            .or_default()
            .insert(rc.1.as_integer());

        self.node_adjacency.entry(e.0.id()).or_default().insert(e.1.id());
        self.node_adjacency.entry(e.1.id()).or_default().insert(e.0.id());
    }

    fn add_node_if_absent(&mut self, id: u64) {
        if !self.has_node(id) {
            self.add_node(id, b"");
        }
    }

    pub fn node_ids(&self) -> Vec<u64> {
        self.sequences.keys().copied().collect()
    }

    pub fn sequence_of(&self, id: u64) -> Vec<u8> {
        self.sequences.get(&id).cloned().unwrap_or_default()
    }

    /// All handles directly reachable from `h` via a recorded edge.
    pub fn successors(&self, h: Handle) -> Vec<Handle> {
        match self.out_edges.get(&h.as_integer()) {
            Some(s) => s.iter().map(|&x| Handle::from_integer(x)).collect(),
            None => Vec::new(),
        }
    }

    /// Merge `other` into `self` (G.extend(unfolded), section 4.5). Border nodes present in
    /// both are unified by id: re-adding an existing node/edge is a no-op.
    pub fn extend(&mut self, other: &HandleGraphStore) {
        for (&id, seq) in other.sequences.iter() {
            self.sequences.entry(id).or_insert_with(|| seq.clone());
        }
        for (&from, tos) in other.out_edges.iter() {
            let entry = self.out_edges.entry(from).or_default();
            for &to in tos {
                entry.insert(to);
            }
        }
        for (&id, neighbors) in other.node_adjacency.iter() {
            let entry = self.node_adjacency.entry(id).or_default();
            for &n in neighbors {
                entry.insert(n);
            }
        }
    }

    /// Split into weakly connected components (section 4.1). Each component is itself a
    /// `HandleGraphStore` containing only the nodes and edges of that component.
    ///
    /// Weak connectivity is computed with `petgraph`'s union-find over a `DiGraphMap` scratch
    /// graph, in the same spirit as the teacher's own `DiGraphMap`-backed scratch graphs for
    /// structural analysis.
    pub fn weakly_connected_components(&self) -> Vec<HandleGraphStore> {
        let mut graph: DiGraphMap<u64, ()> = DiGraphMap::new();
        for &id in self.sequences.keys() {
            graph.add_node(id);
        }
        for (&from, neighbors) in self.node_adjacency.iter() {
            for &to in neighbors {
                graph.add_edge(from, to, ());
            }
        }

        let index_of: FxHashMap<u64, usize> = graph.nodes().enumerate().map(|(i, n)| (n, i)).collect();
        let mut uf = UnionFind::new(graph.node_count());
        for (a, b, _) in graph.all_edges() {
            uf.union(index_of[&a], index_of[&b]);
        }

        let mut groups: FxHashMap<usize, FxHashSet<u64>> = FxHashMap::default();
        for n in graph.nodes() {
            groups.entry(uf.find(index_of[&n])).or_default().insert(n);
        }

        let mut components = Vec::new();
        for members in groups.into_values() {
            let mut comp = HandleGraphStore::new();
            for &id in &members {
                comp.add_node(id, &self.sequence_of(id));
            }
            for &id in &members {
                for orientation in [false, true] {
                    let h = Handle::pack(id, orientation);
                    for to in self.successors(h) {
                        if members.contains(&to.id()) {
                            comp.add_edge(Edge(h, to));
                        }
                    }
                }
            }
            components.push(comp);
        }
        components
    }

    /// Write this graph store out as a GFA1 text file (no `P` lines: path data is owned by the
    /// `ReferenceIndex`, not the graph store, in this design — section 4.8).
    pub fn write_gfa<W: Write>(&self, out: &mut io::BufWriter<W>) -> io::Result<()> {
        writeln!(out, "H\tVN:Z:1.0")?;
        let mut ids: Vec<u64> = self.sequences.keys().copied().collect();
        ids.sort_unstable();
        for id in &ids {
            writeln!(
                out,
                "S\t{}\t{}",
                id,
                String::from_utf8_lossy(&self.sequences[id])
            )?;
        }
        let mut seen: FxHashSet<(u64, u64)> = FxHashSet::default();
        for &id in &ids {
            for orientation in [false, true] {
                let h = Handle::pack(id, orientation);
                for to in self.successors(h) {
                    let canon = if h.as_integer() <= to.flip().as_integer() {
                        (h, to)
                    } else {
                        (to.flip(), h.flip())
                    };
                    if seen.insert((canon.0.as_integer(), canon.1.as_integer())) {
                        writeln!(
                            out,
                            "L\t{}\t{}\t{}\t{}\t0M",
                            canon.0.id(),
                            if canon.0.is_reverse() { '-' } else { '+' },
                            canon.1.id(),
                            if canon.1.is_reverse() { '-' } else { '+' }
                        )?;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_edge_records_reverse_complement() {
        let mut g = HandleGraphStore::new();
        g.add_node(1, b"A");
        g.add_node(2, b"C");
        let e = Edge(Handle::pack(1, false), Handle::pack(2, false));
        g.add_edge(e);
        assert!(g.has_edge(e));
        assert!(g.has_edge(e.flip()));
        assert!(!g.has_edge(Edge(Handle::pack(2, false), Handle::pack(1, false))));
    }

    #[test]
    fn weakly_connected_components_splits_disjoint_subgraphs() {
        let mut g = HandleGraphStore::new();
        g.add_edge(Edge(Handle::pack(1, false), Handle::pack(2, false)));
        g.add_edge(Edge(Handle::pack(10, false), Handle::pack(11, false)));
        let comps = g.weakly_connected_components();
        assert_eq!(comps.len(), 2);
        let mut sizes: Vec<usize> = comps.iter().map(|c| c.node_ids().len()).collect();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![2, 2]);
    }

    #[test]
    fn extend_is_idempotent_for_shared_border_nodes() {
        let mut g = HandleGraphStore::new();
        g.add_node(1, b"A");
        let mut unfolded = HandleGraphStore::new();
        unfolded.add_node(1, b"A");
        unfolded.add_node(2, b"C");
        unfolded.add_edge(Edge(Handle::pack(1, false), Handle::pack(2, false)));
        g.extend(&unfolded);
        assert!(g.has_node(1));
        assert!(g.has_node(2));
        assert!(g.has_edge(Edge(Handle::pack(1, false), Handle::pack(2, false))));
    }
}
