use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use broadside::cli::{Args, Session, SessionEnd};
use broadside::config::MatchConfig;
use broadside::game_engine::{Control, TurnEngine};
use broadside::io::TerminalIO;
use broadside::models::ship::Side;

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let mut config = match &args.config {
        Some(path) => MatchConfig::load(path)
            .with_context(|| format!("loading match config {}", path.display()))?,
        None => MatchConfig::default(),
    };
    if args.autoplay {
        config.player_control = Control::Scripted;
        config.enemy_control = Control::Scripted;
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    println!("*** BROADSIDE ***");
    println!("SEED {}", seed);
    println!();

    let engine = TurnEngine::from_config(&config, seed).context("setting up the match")?;
    let mut session = Session::new(engine, args.max_rounds);
    let mut input = TerminalIO;
    let mut output = TerminalIO;

    match session.run(&mut input, &mut output)? {
        SessionEnd::MatchOver(Side::Player) => println!("THE SEAS ARE YOURS, ADMIRAL."),
        SessionEnd::MatchOver(Side::Enemy) => println!("YOUR FLEET LIES ON THE SEABED."),
        SessionEnd::RoundLimit => println!("BOTH FLEETS WITHDRAW."),
        SessionEnd::Quit | SessionEnd::InputClosed => println!("GOODBYE, ADMIRAL."),
    }
    Ok(())
}
