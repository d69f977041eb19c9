use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Turn-based hex-grid naval battles", long_about = None)]
pub struct Args {
    /// Seed for dice and fleet deployment (random if omitted)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// JSON match configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Let the scripted opponent play both sides
    #[arg(long)]
    pub autoplay: bool,

    /// Stop after this many rounds
    #[arg(long, default_value_t = 50)]
    pub max_rounds: u32,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
