/* crate use */
use rustc_hash::FxHashMap;

/* private use */
use crate::error::Result;
use crate::handle::Handle;
use crate::store::load_hashgraph;

/// Immutable index of named reference paths over the *original*, pre-pruning graph (X, section
/// 1/4.8). Built once from a GFA1 file — typically the graph as it existed before pruning, since
/// G (the argument to `unfold`) may already be missing nodes X must still supply sequence data
/// for (section 4.1: "add both endpoint nodes (with original sequences fetched from X)").
pub struct ReferencePathIndex {
    sequences: FxHashMap<u64, Vec<u8>>,
    names: Vec<String>,
    paths: Vec<Vec<Handle>>,
    occurrences: FxHashMap<u64, Vec<(usize, usize)>>,
}

impl ReferencePathIndex {
    pub fn load(path: &str) -> Result<ReferencePathIndex> {
        let g = load_hashgraph(path)?;

        let mut sequences = FxHashMap::default();
        for v in g.handles() {
            sequences.insert(v.unpack_number() as u64, g.sequence_vec(v));
        }

        let mut names = Vec::new();
        let mut paths = Vec::new();
        let mut occurrences: FxHashMap<u64, Vec<(usize, usize)>> = FxHashMap::default();
        for (_path_id, path) in g.paths.iter() {
            let handles: Vec<Handle> = path
                .nodes
                .iter()
                .map(|h| Handle::pack(h.unpack_number() as u64, h.is_reverse()))
                .collect();
            let path_index = paths.len();
            for (rank, h) in handles.iter().enumerate() {
                occurrences.entry(h.id()).or_default().push((path_index, rank));
            }
            names.push(String::from_utf8_lossy(&path.name).to_string());
            paths.push(handles);
        }
        for occs in occurrences.values_mut() {
            occs.sort_unstable();
        }

        log::info!(
            "loaded reference-path index {} ({} paths, {} nodes)",
            path,
            paths.len(),
            sequences.len()
        );
        Ok(ReferencePathIndex {
            sequences,
            names,
            paths,
            occurrences,
        })
    }

    pub fn has_node(&self, id: u64) -> bool {
        self.sequences.contains_key(&id)
    }

    pub fn sequence_of(&self, id: u64) -> Vec<u8> {
        self.sequences.get(&id).cloned().unwrap_or_default()
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    pub fn path_name(&self, path_index: usize) -> &str {
        &self.names[path_index]
    }

    pub fn path_handles(&self, path_index: usize) -> &[Handle] {
        &self.paths[path_index]
    }

    /// Sorted `(path_index, rank)` pairs at which `id` occurs across all reference paths.
    pub fn occurrences(&self, id: u64) -> &[(usize, usize)] {
        self.occurrences.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }
}
