/* standard use */
use std::io::{self, BufWriter, Write};

/* private use */
use crate::handle::{Edge, Handle};
use crate::haplotype::ThreadIndex;
use crate::refpath::ReferencePathIndex;
use crate::store::HandleGraphStore;

/// Restore reference (and, when given, haplotype) evidence directly into `g` using original ids
/// (section 4.6): the same absent-edge scan as `complement_components`, but with no scratch
/// graph, no component split, and no duplication — an edge X or H witnesses that `g` is missing
/// is simply added to `g` with its original endpoint ids.
pub fn restore_paths(g: &mut HandleGraphStore, x: &ReferencePathIndex, h: Option<&ThreadIndex>) {
    for path_index in 0..x.path_count() {
        for w in x.path_handles(path_index).windows(2) {
            add_if_absent(g, x, w[0], w[1]);
        }
    }
    if let Some(h) = h {
        for Edge(u, v) in h.edges() {
            add_if_absent(g, x, u, v);
        }
    }
}

fn add_if_absent(g: &mut HandleGraphStore, x: &ReferencePathIndex, u: Handle, v: Handle) {
    let e = Edge(u, v);
    if g.has_edge(e) {
        return;
    }
    if !x.has_node(u.id()) || !x.has_node(v.id()) {
        log::warn!(
            "restoration edge {} references a node absent from the reference index; skipping",
            e
        );
        return;
    }
    g.add_node(u.id(), &x.sequence_of(u.id()));
    g.add_node(v.id(), &x.sequence_of(v.id()));
    g.add_edge(e);
}

/// Write `g` as GFA1 with every reference path from `x` projected back onto it as a `P` line
/// (section 4.6). Callers that want the edges those paths traverse to actually exist in `g`
/// should run `restore_paths` first — this function only serializes, it does not restore.
pub fn write_gfa_with_paths<W: Write>(
    g: &HandleGraphStore,
    x: &ReferencePathIndex,
    out: &mut BufWriter<W>,
) -> io::Result<()> {
    g.write_gfa(out)?;
    for path_index in 0..x.path_count() {
        write_path_line(out, x.path_name(path_index), x.path_handles(path_index))?;
    }
    Ok(())
}

fn write_path_line<W: Write>(out: &mut BufWriter<W>, name: &str, handles: &[Handle]) -> io::Result<()> {
    write!(out, "P\t{}\t", name)?;
    for (i, h) in handles.iter().enumerate() {
        if i > 0 {
            write!(out, ",")?;
        }
        write!(out, "{}{}", h.id(), if h.is_reverse() { '-' } else { '+' })?;
    }
    writeln!(out, "\t*")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_reference_index() -> ReferencePathIndex {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("graphfold-restore-test-{}.gfa", std::process::id()));
        std::fs::write(
            &path,
            "H\tVN:Z:1.0\nS\t1\tA\nS\t2\tC\nL\t1\t+\t2\t+\t0M\nP\tx\t1+,2+\t*\n",
        )
        .unwrap();
        let x = ReferencePathIndex::load(path.to_str().unwrap()).unwrap();
        let _ = std::fs::remove_file(&path);
        x
    }

    #[test]
    fn restore_paths_adds_edges_missing_from_a_pruned_graph() {
        let x = fixture_reference_index();
        let mut g = HandleGraphStore::new();
        g.add_node(1, b"A");
        g.add_node(2, b"C");
        // g has no edge between 1 and 2: a pruned graph, exactly what restore is meant to fix.

        restore_paths(&mut g, &x, None);
        assert!(g.has_edge(Edge(Handle::pack(1, false), Handle::pack(2, false))));
    }

    #[test]
    fn restore_paths_is_a_no_op_when_edges_already_present() {
        let x = fixture_reference_index();
        let mut g = HandleGraphStore::new();
        g.add_edge(Edge(Handle::pack(1, false), Handle::pack(2, false)));

        restore_paths(&mut g, &x, None);
        assert_eq!(g.node_ids().len(), 2);
    }

    #[test]
    fn writes_header_segments_links_and_paths() {
        let x = fixture_reference_index();
        let mut g = HandleGraphStore::new();
        restore_paths(&mut g, &x, None);

        let mut buf = BufWriter::new(Vec::new());
        write_gfa_with_paths(&g, &x, &mut buf).unwrap();
        let text = String::from_utf8(buf.into_inner().unwrap()).unwrap();
        assert!(text.contains("P\tx\t1+,2+\t*\n"));
        assert!(text.contains("L\t1\t+\t2\t+\t0M\n"));
    }
}
