use std::collections::BTreeMap;
use structopt::StructOpt;
use log::{info, warn};

use crc_ring::{
    config::{self, Configuration},
    opt::Opt,
    HashRing,
};

fn run(conf: &Configuration) -> Result<(), Box<dyn std::error::Error>> {
    let ring = HashRing::with_config(&conf.ring)?;

    for node in conf.driver.sample_nodes() {
        if !ring.add(&node) {
            warn!("node {} skipped: id already on the ring or zero weight", node);
        }
    }
    info!("ring holds {} nodes on {} positions", ring.node_count(), ring.len());

    if conf.dump {
        println!("{}", serde_json::to_string_pretty(&ring.nodes())?);
    }

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for i in 0..conf.driver.key_count {
        let node = ring.get(format!("key{}", i))?;
        *counts.entry(node.address).or_insert(0) += 1;
    }

    for (address, count) in &counts {
        println!("Node IP: {} count: {}", address, count);
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let opt = Opt::from_args();
    let result = match config::load(&opt) {
        Ok(conf) => run(&conf),
        Err(err) => Err(err.into()),
    };

    if let Err(err) = result {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
