use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(
    author,
    version,
    about = "Tool to parse and store ranking metrics from the Rappelz website"
)]
pub struct Cli {
    /// Hostname of the InfluxDB HTTP API
    #[arg(long, default_value = "localhost")]
    pub host: String,

    /// Port of the InfluxDB HTTP API
    #[arg(long, default_value_t = 8086)]
    pub port: u16,

    /// Config file
    #[arg(long, default_value = "rappelz-ranking.cfg")]
    pub configfile: PathBuf,
}
