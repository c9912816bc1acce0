use std::time::Instant;

use log::info;

use planar_builder::prelude::*;
use succinct_planar::prelude::build_succinct_graph;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli::AppArgs {
        graph,
        tree,
        order,
    } = cli::create()?;

    info!(
        "Reading graph from {:?}, tree from {:?}, order from {:?}",
        graph, tree, order
    );

    let mut plane_graph = read_plane_graph(&graph)?;
    let spanning_tree = read_spanning_tree(&tree)?;
    let canonical_order = read_canonical_order(&order)?;

    plane_graph.assign_order(&canonical_order)?;
    check_consistent(&plane_graph, &spanning_tree)?;

    let start = Instant::now();
    let succinct = build_succinct_graph(&plane_graph, &spanning_tree);
    let elapsed = start.elapsed().as_secs_f64();

    info!(
        "Bitstring lengths: |S1| = {}, |S2| = {}, |S3| = {}",
        succinct.s1().len(),
        succinct.s2().len(),
        succinct.s3().len()
    );

    println!(
        "{},{},{},{:.6}",
        rayon::current_num_threads(),
        graph.display(),
        succinct.node_count(),
        elapsed
    );

    Ok(())
}

mod cli {
    use pico_args::Arguments;
    use std::{convert::Infallible, ffi::OsStr, path::PathBuf};

    #[derive(Debug)]
    pub(crate) struct AppArgs {
        pub(crate) graph: PathBuf,
        pub(crate) tree: PathBuf,
        pub(crate) order: PathBuf,
    }

    const USAGE: &str = "Usage: construct <graph_file> <tree_file> <order_file>";

    pub(crate) fn create() -> Result<AppArgs, Box<dyn std::error::Error>> {
        let mut pargs = Arguments::from_env();

        if pargs.contains(["-h", "--help"]) {
            println!("{USAGE}");
            std::process::exit(0);
        }

        fn as_path_buf(arg: &OsStr) -> Result<PathBuf, Infallible> {
            Ok(arg.into())
        }

        let args = AppArgs {
            graph: pargs.free_from_os_str(as_path_buf).map_err(usage)?,
            tree: pargs.free_from_os_str(as_path_buf).map_err(usage)?,
            order: pargs.free_from_os_str(as_path_buf).map_err(usage)?,
        };

        let remaining = pargs.finish();
        if !remaining.is_empty() {
            return Err(usage(pico_args::Error::ArgumentParsingFailed {
                cause: format!("unexpected arguments: {:?}", remaining),
            }));
        }

        Ok(args)
    }

    fn usage(error: pico_args::Error) -> Box<dyn std::error::Error> {
        format!("{error}\n{USAGE}").into()
    }
}
