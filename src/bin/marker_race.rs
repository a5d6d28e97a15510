use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use marker_race::{
    Color, GameConfig, GameEvent, HumanChannel, HumanHandle, HumanRequest, Notifier,
    PersonalityChoice, Standings, TracingNotifier, TurnOrchestrator,
};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Number of participants including you (2-7)
    #[arg(short, long, default_value_t = 4)]
    participants: usize,

    /// Personality of each computer participant, in seat order
    /// ("attacker", "safe", "chaos", "bluffer", "logic", "opportunist" or "random")
    #[arg(long = "personality")]
    personalities: Vec<PersonalityChoice>,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Laps the marker must complete
    #[arg(long, default_value_t = marker_race::core::DEFAULT_LAPS_TO_WIN)]
    laps: u32,

    /// Delay between marker steps and computer decisions, in milliseconds
    #[arg(long, default_value_t = 0)]
    pacing_ms: u64,

    /// Load the game configuration from a JSON file instead of flags
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print events as JSON lines
    #[arg(long, default_value_t = false)]
    json: bool,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "warn")]
    log_level: LevelFilter,
}

impl Args {
    fn game_config(&self) -> anyhow::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
            }
            None => GameConfig::new(self.participants)
                .with_personalities(self.personalities.iter().copied())
                .with_laps_to_win(self.laps)
                .with_pacing_ms(self.pacing_ms)
                .with_seed(rand::random()),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        Ok(config)
    }
}

/// Prints events for a person at a terminal.
struct Console {
    json: bool,
    /// Mirrors events into the log when `--log-level` is info or finer.
    trace: Option<TracingNotifier>,
}

impl Notifier for Console {
    fn notify(&mut self, event: GameEvent) {
        if let Some(trace) = &mut self.trace {
            trace.notify(event.clone());
        }
        if self.json {
            if let Ok(line) = serde_json::to_string(&event) {
                println!("{}", line);
            }
            return;
        }
        match event {
            GameEvent::TurnStarted { turn } => println!("\n=== Turn {} ===", turn),
            GameEvent::CardsRevealed { cards, .. } => {
                for c in cards {
                    println!("  {:>6}: {}", c.participant.to_string(), c.card);
                }
            }
            GameEvent::SpecialResolved { phase } => println!("  {}", phase),
            GameEvent::PiecesSwapped { first, second } => {
                println!("  {}", first.describe("SWAP"));
                println!("  {}", second.describe("SWAP"));
            }
            GameEvent::OwnershipReshuffled { changed } => {
                println!("  colors redealt ({} changed hands)", changed)
            }
            GameEvent::MarkerMoved { .. } => {}
            GameEvent::CellEffectApplied { effect, change } => println!("  {}", change.describe(effect)),
            GameEvent::IdentityRevealed { participant, color } => {
                println!("  {} revealed as {}", participant, color)
            }
            GameEvent::TurnEnded { record } => {
                if let Some(min) = record.min_value {
                    println!("  moved by {} ({} mover(s))", min, record.movers.len());
                }
            }
            GameEvent::GameEnded { summary } => {
                println!("\n=== GAME OVER: {} ({}) ===", summary.winner, summary.outcome);
                for id in &summary.identities {
                    println!("  {:>6}: {} [{}]", id.participant.to_string(), id.color, id.controller);
                }
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let config = args.game_config()?;
    info!(seed = config.seed, participants = config.participant_count, "starting");

    let mut orchestrator = TurnOrchestrator::new(config)?;
    println!(
        "You own {}. Standings: {}",
        orchestrator.state().human().color,
        orchestrator.state().standings()
    );

    let (mut human, handle) = HumanChannel::new();
    let prompter = tokio::spawn(answer_from_stdin(handle));

    let mut console = Console {
        json: args.json,
        trace: (args.log_level >= LevelFilter::INFO).then_some(TracingNotifier),
    };
    let result = orchestrator.run(&mut human, &mut console).await;
    drop(human);
    prompter.abort();

    let summary = result?;
    info!(winner = %summary.winner, turns = summary.turns, "finished");
    Ok(())
}

async fn answer_from_stdin(mut handle: HumanHandle) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(request) = handle.next_request().await {
        let answered = match request {
            HumanRequest::Card { hand, reply } => {
                let listing: Vec<String> = hand.iter().enumerate().map(|(i, c)| format!("{}) {}", i + 1, c)).collect();
                println!("Your hand: {}", listing.join("  "));
                let Some(n) = ask_number(&mut lines, "Play which card? ").await else {
                    return;
                };
                reply.send(n.checked_sub(1).unwrap_or(usize::MAX)).is_ok()
            }
            HumanRequest::Target { effect, standings, reply } => {
                let Some(color) = ask_color(&mut lines, &standings, &format!("Target for {}? ", effect)).await else {
                    return;
                };
                reply.send(color).is_ok()
            }
            HumanRequest::SwapPair { standings, reply } => {
                let Some(a) = ask_color(&mut lines, &standings, "Swap which piece? ").await else {
                    return;
                };
                let Some(b) = ask_color(&mut lines, &standings, "...with which piece? ").await else {
                    return;
                };
                reply.send((a, b)).is_ok()
            }
        };
        if !answered {
            return;
        }
    }
}

async fn ask_number(lines: &mut Lines<BufReader<Stdin>>, prompt: &str) -> Option<usize> {
    loop {
        println!("{}", prompt);
        let line = lines.next_line().await.ok()??;
        match line.trim().parse() {
            Ok(n) => return Some(n),
            Err(_) => println!("Enter a number."),
        }
    }
}

async fn ask_color(lines: &mut Lines<BufReader<Stdin>>, standings: &Standings, prompt: &str) -> Option<Color> {
    println!("Standings: {}", standings);
    loop {
        println!("{}", prompt);
        let line = lines.next_line().await.ok()??;
        let line = line.trim();
        // a rank number or a color name
        let color = match line.parse::<usize>() {
            Ok(rank) => rank.checked_sub(1).and_then(|r| standings.at(r)),
            Err(_) => Color::from_name(line),
        };
        match color {
            Some(c) => return Some(c),
            None => println!("Enter a color name or a rank (1-{}).", Color::COUNT),
        }
    }
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
