/* standard use */
use std::io;

/* crate use */
use clap::Parser;

/* private use */
use graphfold::mapping::{load_or_new, save_or_log};
use graphfold::{unfold, HandleGraphStore, ReferencePathIndex, ThreadIndex};

#[derive(clap::Parser, Debug)]
#[clap(
    version = "0.1",
    author = "Daniel Doerr <daniel.doerr@hhu.de>",
    about = "Phase-unfold a variation graph against a set of reference paths and haplotype threads"
)]
pub struct Command {
    #[clap(index = 1, help = "pruned graph in GFA1 format", required = true)]
    pub graph: String,
    #[clap(index = 2, help = "reference graph (carries the X paths) in GFA1 format", required = true)]
    pub reference: String,
    #[clap(index = 3, help = "haplotype thread file", required = true)]
    pub threads: String,

    #[clap(short = 'o', long = "output", help = "output GFA1 file", required = true)]
    pub output: String,

    #[clap(long = "mapping-in", help = "identifier map to load before unfolding")]
    pub mapping_in: Option<String>,
    #[clap(long = "mapping-out", help = "identifier map to save after unfolding")]
    pub mapping_out: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let params = Command::parse();

    log::info!("loading graph {}", params.graph);
    let mut g = HandleGraphStore::load_gfa(&params.graph)?;
    log::info!("loading reference-path index {}", params.reference);
    let x = ReferencePathIndex::load(&params.reference)?;
    log::info!("loading haplotype index {}", params.threads);
    let h = ThreadIndex::load(&params.threads)?;

    let first_node = g.node_ids().into_iter().max().unwrap_or(0) + 1;
    let mut mapping = match &params.mapping_in {
        Some(path) => load_or_new(path, first_node),
        None => graphfold::IdentifierMap::new(first_node),
    };

    unfold(&mut g, &x, &h, &mut mapping)?;

    let mut out = io::BufWriter::new(std::fs::File::create(&params.output)?);
    g.write_gfa(&mut out)?;

    if let Some(path) = &params.mapping_out {
        save_or_log(&mapping, path);
    }

    log::info!("done ({} duplicate id(s) allocated)", mapping.len());
    Ok(())
}
