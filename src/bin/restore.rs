/* standard use */
use std::io;

/* crate use */
use clap::Parser;

/* private use */
use graphfold::restore::{restore_paths, write_gfa_with_paths};
use graphfold::{HandleGraphStore, ReferencePathIndex, ThreadIndex};

#[derive(clap::Parser, Debug)]
#[clap(
    version = "0.1",
    author = "Daniel Doerr <daniel.doerr@hhu.de>",
    about = "Restore reference (and, optionally, haplotype) evidence into a pruned graph with original ids, no duplication"
)]
pub struct Command {
    #[clap(index = 1, help = "pruned graph in GFA1 format", required = true)]
    pub graph: String,
    #[clap(index = 2, help = "reference graph (carries the X paths) in GFA1 format", required = true)]
    pub reference: String,

    #[clap(long = "threads", help = "haplotype thread file (H), if evidence from H should be restored too")]
    pub threads: Option<String>,

    #[clap(short = 'o', long = "output", help = "output GFA1 file", required = true)]
    pub output: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let params = Command::parse();

    log::info!("loading graph {}", params.graph);
    let mut g = HandleGraphStore::load_gfa(&params.graph)?;
    log::info!("loading reference-path index {}", params.reference);
    let x = ReferencePathIndex::load(&params.reference)?;
    let h = match &params.threads {
        Some(path) => {
            log::info!("loading haplotype index {}", path);
            Some(ThreadIndex::load(path)?)
        }
        None => None,
    };

    restore_paths(&mut g, &x, h.as_ref());

    let mut out = io::BufWriter::new(std::fs::File::create(&params.output)?);
    write_gfa_with_paths(&g, &x, &mut out)?;

    log::info!("done");
    Ok(())
}
