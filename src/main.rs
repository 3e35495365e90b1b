use anyhow::Context;
use clap::Parser;
use shounen_vs::utils::logger::{self, LogFormat};
use shounen_vs::utils::validation::Validate;
use shounen_vs::{
    CharacterSource, CliArgs, JikanClient, Matchup, MatchupSelector, RandomSource,
    RecentSelectionCache, StdRandom, VoteTally,
};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    VoteLeft,
    VoteRight,
    Retry,
    ClearCache,
    Status,
    Quit,
}

fn parse_command(input: &str) -> Option<Command> {
    match input.trim().to_ascii_lowercase().as_str() {
        "1" => Some(Command::VoteLeft),
        "2" => Some(Command::VoteRight),
        "r" | "retry" => Some(Command::Retry),
        "c" | "clear" => Some(Command::ClearCache),
        "s" | "status" => Some(Command::Status),
        "q" | "quit" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

type Input = Lines<BufReader<Stdin>>;

/// 讀取一個合法指令；stdin 關閉時視為離開
async fn read_command(input: &mut Input, prompt: &str) -> anyhow::Result<Command> {
    loop {
        eprint!("{}", prompt);
        let Some(line) = input.next_line().await? else {
            return Ok(Command::Quit);
        };
        match parse_command(&line) {
            Some(command) => return Ok(command),
            None => eprintln!("Unknown choice: {:?}", line.trim()),
        }
    }
}

fn print_matchup(matchup: &Matchup, tally: &VoteTally) {
    println!();
    for (slot, character) in [(1, &matchup.left), (2, &matchup.right)] {
        println!(
            "  [{}] {} ({}) - wins: {}",
            slot,
            character.name(),
            character.anime(),
            tally.wins(character.id())
        );
        println!("      {}", character.image_url());
        if slot == 1 {
            println!("        ⚔️  VS");
        }
    }
    println!();
}

fn print_standings(tally: &VoteTally) {
    if tally.is_empty() {
        return;
    }
    println!("\n🏆 Standings");
    for (rank, entry) in tally.standings().iter().enumerate() {
        println!(
            "  {:>2}. {} ({}) - {} wins",
            rank + 1,
            entry.character.name(),
            entry.character.anime(),
            entry.wins
        );
    }
}

async fn run_session<S, R>(
    selector: &MatchupSelector<S, R>,
    rounds: Option<u32>,
) -> anyhow::Result<()>
where
    S: CharacterSource,
    R: RandomSource,
{
    let mut tally = VoteTally::new();
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut votes = 0u32;

    'session: while rounds.map_or(true, |limit| votes < limit) {
        eprintln!("⏳ Loading battle...");
        let matchup = match selector.get_random_matchup().await {
            Ok(matchup) => matchup,
            Err(e) => {
                if e.is_retryable() {
                    tracing::warn!("⚠️ Matchup failed: {} (Category: {:?})", e, e.category());
                } else {
                    tracing::error!(
                        "❌ Matchup failed: {} (Category: {:?}, Severity: {:?})",
                        e,
                        e.category(),
                        e.severity()
                    );
                }
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());

                // 任何錯誤都只影響這一輪，交給使用者決定是否重試
                loop {
                    match read_command(&mut input, "[r]etry, [c]lear cache and retry, [q]uit > ")
                        .await?
                    {
                        Command::Retry => continue 'session,
                        Command::ClearCache => {
                            selector.clear_cache();
                            continue 'session;
                        }
                        Command::Quit => break 'session,
                        _ => eprintln!("Pick r, c or q"),
                    }
                }
            }
        };

        tally.register_matchup(&matchup);
        print_matchup(&matchup, &tally);

        let winner = loop {
            match read_command(&mut input, "Vote [1/2], [c]lear cache, [s]tatus, [q]uit > ").await? {
                Command::VoteLeft => break &matchup.left,
                Command::VoteRight => break &matchup.right,
                Command::ClearCache => selector.clear_cache(),
                Command::Status => {
                    println!("{}", serde_json::to_string_pretty(&selector.cache_status())?);
                }
                Command::Quit => break 'session,
                Command::Retry => eprintln!("Vote first, a new battle follows"),
            }
        };

        let wins = tally.record_vote(winner);
        votes += 1;
        println!("🏆 {} wins! ({} total)", winner.name(), wins);
    }

    print_standings(&tally);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 載入並驗證配置
    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    logger::init_logger(args.verbose, config.log_format().unwrap_or(LogFormat::Compact));
    tracing::info!("🚀 Starting shounen-vs");
    if args.verbose {
        tracing::debug!("Resolved config: {:?}", config);
    }

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - printing configuration only");
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let source = JikanClient::new(config.jikan_options()).context("failed to build HTTP client")?;
    let rng = match config.selection.seed {
        Some(seed) => StdRandom::with_seed(seed),
        None => StdRandom::new(),
    };
    let selector = MatchupSelector::new(
        source,
        config.anime.clone(),
        RecentSelectionCache::with_capacity(config.selection.cache_capacity),
        rng,
    )?
    .with_max_attempts(config.selection.max_attempts);

    tracing::info!(
        "🎯 {} titles loaded, up to {} attempts per matchup",
        selector.catalog().len(),
        selector.max_attempts()
    );

    run_session(&selector, args.rounds).await
}
