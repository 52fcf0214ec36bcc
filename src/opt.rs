use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt, Debug, Default)]
#[structopt(name = "crc-ring")]
pub struct Opt {
    /// virtual nodes per unit of node weight
    #[structopt(short, long)]
    pub replicas: Option<usize>,

    /// number of sample nodes to place on the ring
    #[structopt(short, long)]
    pub nodes: Option<usize>,

    /// number of sample keys to route
    #[structopt(short, long)]
    pub keys: Option<usize>,

    /// route with the wrap-at-last-position lookup of the earlier CRC ring
    #[structopt(long)]
    pub legacy_lookup: bool,

    /// print the position -> node mapping as JSON
    #[structopt(long)]
    pub dump: bool,

    /// application configuration
    #[structopt(long = "config", parse(from_os_str))]
    pub configuration_path:  Option<PathBuf>
}
