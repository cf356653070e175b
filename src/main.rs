//! Headless negotiation simulator.
//!
//! Auto-plays encounters without a UI, for balance checks and smoke
//! testing the engine end to end.
//!
//! Usage:
//!   cargo run -- [OPTIONS]
//!
//! Examples:
//!   cargo run                      # one encounter in Grocery Row
//!   cargo run -- -n 20            # twenty encounters back to back
//!   cargo run -- --seed 42        # reproducible run
//!   cargo run -- -l business     # fight in a specific location

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use haggle::combat::CombatOutcome;
use haggle::locations::get_location;
use haggle::skills::get_all_skills;
use haggle::GameSession;

struct SimConfig {
    encounters: u32,
    location: String,
    seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            encounters: 1,
            location: "products".to_string(),
            seed: None,
        }
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let config = parse_args(&args);

    if get_location(&config.location).is_none() {
        eprintln!("Unknown location: {}", config.location);
        std::process::exit(1);
    }

    println!("=== HAGGLE NEGOTIATION SIMULATOR ===");
    println!("Encounters: {}", config.encounters);
    println!("Location:   {}", config.location);
    if let Some(seed) = config.seed {
        println!("Seed:       {seed}");
    }
    println!();

    let mut rng: StdRng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut session = GameSession::new("Simulated Seller".to_string(), chrono::Utc::now().timestamp());
    let mut clock = 0.0f64;

    for encounter in 1..=config.encounters {
        session.character.restore_stats();
        session.reset_combat();

        let opponent = match session.begin_random_encounter(&config.location, &mut rng) {
            Ok(opponent) => opponent,
            Err(err) => {
                eprintln!("Could not start encounter: {err:?}");
                break;
            }
        };
        println!(
            "[{encounter}] vs {} (resolve {}, offers ${})",
            opponent.name, opponent.max_health, opponent.money
        );

        let outcome = run_encounter(&mut session, &mut clock, &mut rng);
        report_outcome(&session, &outcome);
    }

    println!();
    println!("=== FINAL STATE ===");
    println!(
        "Level {} | {} XP | ${}",
        session.character.level, session.character.experience, session.character.money
    );
    println!(
        "Battles: {} won / {} lost | skills used: {}",
        session.character.battles_won, session.character.battles_lost, session.character.skills_used
    );
    let stock: Vec<String> = session
        .inventory
        .iter()
        .map(|(id, qty)| format!("{id} x{qty}"))
        .collect();
    if !stock.is_empty() {
        println!("Stock: {}", stock.join(", "));
    }
}

/// Plays turns until the negotiation ends, picking the strongest usable
/// skill each time the clock allows one.
fn run_encounter(session: &mut GameSession, clock: &mut f64, rng: &mut StdRng) -> CombatOutcome {
    let mut skills = get_all_skills();
    skills.sort_by(|a, b| b.power.cmp(&a.power));

    // Hard turn cap so a stalemate cannot spin forever.
    for _ in 0..400 {
        *clock += 0.5;

        let ready: Vec<u32> = skills
            .iter()
            .filter(|def| session.skill_available(def))
            .filter(|def| session.cooldown_state(def.id, *clock).can_use)
            .map(|def| def.id)
            .collect();

        for skill_id in ready {
            match session.use_skill(skill_id, *clock, rng) {
                Ok(result) => {
                    if result.hit {
                        println!(
                            "    t={:>6.1}s  skill {} lands for {} ({} resolve left)",
                            clock, skill_id, result.damage, result.opponent_health
                        );
                    } else {
                        println!(
                            "    t={:>6.1}s  skill {} misses ({} resolve left)",
                            clock, skill_id, result.opponent_health
                        );
                    }
                    session.end_turn();
                    break;
                }
                Err(_) => continue,
            }
        }

        let outcome = session.resolve_outcome(rng);
        if outcome.is_terminal() {
            return outcome;
        }

        // Occasionally sip an energy drink when running on fumes.
        if session.character.endurance < 15
            && session.inventory.has_item("energy_drink")
            && rng.gen_bool(0.5)
        {
            let _ = session.use_item("energy_drink");
        }
    }
    session.reset_combat();
    CombatOutcome::Continue
}

fn report_outcome(session: &GameSession, outcome: &CombatOutcome) {
    match outcome {
        CombatOutcome::Victory { rewards } => {
            println!(
                "    WON: +${} +{} XP, {} item(s) | now ${}",
                rewards.money,
                rewards.experience,
                rewards.items.len(),
                session.character.money
            );
        }
        CombatOutcome::DefeatEndurance => println!("    LOST: ran out of endurance"),
        CombatOutcome::DefeatStress => println!("    LOST: nerves gave out"),
        CombatOutcome::DefeatOpponentStrong => {
            println!("    LOST: the customer talked circles around the seller")
        }
        CombatOutcome::Continue => println!("    stalled out; walked away"),
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--encounters" => {
                if i + 1 < args.len() {
                    config.encounters = args[i + 1].parse().unwrap_or(1);
                    i += 1;
                }
            }
            "-l" | "--location" => {
                if i + 1 < args.len() {
                    config.location = args[i + 1].clone();
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-h" | "--help" => {
                println!("Usage: haggle [-n ENCOUNTERS] [-l LOCATION] [-s SEED]");
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }
    config
}
