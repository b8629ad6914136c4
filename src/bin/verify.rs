/* crate use */
use clap::Parser;

/* private use */
use graphfold::mapping::load_or_new;
use graphfold::verify::verify;
use graphfold::{HandleGraphStore, ReferencePathIndex, ThreadIndex};

#[derive(clap::Parser, Debug)]
#[clap(
    version = "0.1",
    author = "Daniel Doerr <daniel.doerr@hhu.de>",
    about = "Verify that every reference path and haplotype thread is still realizable in an unfolded graph"
)]
pub struct Command {
    #[clap(index = 1, help = "unfolded graph in GFA1 format", required = true)]
    pub graph: String,
    #[clap(index = 2, help = "reference graph (carries the X paths) in GFA1 format", required = true)]
    pub reference: String,
    #[clap(index = 3, help = "haplotype thread file", required = true)]
    pub threads: String,
    #[clap(index = 4, help = "identifier map produced by unfold", required = true)]
    pub mapping: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let params = Command::parse();

    log::info!("loading graph {}", params.graph);
    let g = HandleGraphStore::load_gfa(&params.graph)?;
    log::info!("loading reference-path index {}", params.reference);
    let x = ReferencePathIndex::load(&params.reference)?;
    log::info!("loading haplotype index {}", params.threads);
    let h = ThreadIndex::load(&params.threads)?;
    let mapping = load_or_new(&params.mapping, 0);

    let failures = verify(&g, &mapping, &x, &h);
    if failures == 0 {
        log::info!("verification passed: every walk is realizable");
    } else {
        log::error!("verification failed: {} walk(s) could not be realized", failures);
        std::process::exit(1);
    }
    Ok(())
}
