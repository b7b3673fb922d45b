//! Command line front end for managing tournaments.
//!
//! Every invocation loads the registry snapshot, runs one command and saves
//! the snapshot again if the command changed anything.

mod config;
mod logging;
mod report;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Error, bail};
use chrono::NaiveDate;
use log::info;
use pico_args::Arguments;
use tourney::{
    MatchId, Registry, TeamId, TournamentFormat, TournamentId, fixtures,
    registry::NewPlayer,
    results, standings,
    store::JsonStore,
};

use config::CliConfig;

const HELP: &str = "\
Manage sports tournaments: teams, fixtures, results and standings

USAGE:
  tourney [OPTIONS] <COMMAND> [ARGS]

COMMANDS:
  team add NAME COACH CONTACT                  Register a team
  team list                                    List teams with overall records
  player add TEAM_ID NAME AGE POSITION JERSEY CONTACT
                                               Add a player to a team
  tournament create NAME FORMAT                Create a tournament (round_robin | knockout)
  tournament list                              List tournaments
  tournament register TOURNAMENT_ID TEAM_ID    Register a team in a tournament
  tournament withdraw TOURNAMENT_ID TEAM_ID    Withdraw a team before fixtures exist
  fixtures generate TOURNAMENT_ID              Generate fixtures
  fixtures regenerate TOURNAMENT_ID            Void all fixtures and results, then generate
  fixtures list TOURNAMENT_ID                  Show fixtures
  schedule MATCH_ID YYYY-MM-DD VENUE           Set date and venue of a match
  result MATCH_ID HOME_GOALS AWAY_GOALS        Record a result
  standings TOURNAMENT_ID                      Show the standings table
  backup                                       Copy the data file into the backup directory
  restore BACKUP_FILE                          Replace the data file with a backup

OPTIONS:
  --data        FILE    Data file          [default: env TOURNEY_DATA_FILE or tourney.json]
  --backup-dir  DIR     Backup directory   [default: env TOURNEY_BACKUP_DIR or backups]

FLAGS:
  --csv                 Print tables as CSV
  -h, --help            Print help information

ENVIRONMENT:
  TOURNEY_DATA_FILE     Data file path
  TOURNEY_BACKUP_DIR    Backup directory
  TOURNEY_LOG           Log filter when RUST_LOG is unset [default: info]
";

fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let csv = pargs.contains("--csv");
    let data_file: Option<PathBuf> = pargs.opt_value_from_str("--data")?;
    let backup_dir: Option<PathBuf> = pargs.opt_value_from_str("--backup-dir")?;

    let config = CliConfig::from_env(data_file, backup_dir)?;
    logging::init(&config.log_filter);

    let store = JsonStore::new(&config.data_file);
    let started = Instant::now();

    let Some(command) = pargs.subcommand()? else {
        print!("{HELP}");
        return Ok(());
    };

    let mutated = match command.as_str() {
        "backup" => {
            if !store.exists() {
                bail!("nothing to back up: {} does not exist", store.path().display());
            }
            let target = store.backup(&config.backup_dir)?;
            println!("Backup written to {}", target.display());
            false
        }
        "restore" => {
            let backup: PathBuf = pargs.free_from_str()?;
            let registry = store.restore(&backup)?;
            println!(
                "Restored {} teams and {} tournaments",
                registry.teams().count(),
                registry.tournaments().count()
            );
            false
        }
        _ => {
            let mut registry = store
                .load()
                .with_context(|| format!("loading {}", store.path().display()))?;
            let mutated = run(&mut registry, &command, &mut pargs, csv)?;
            if mutated {
                store.save(&registry)?;
            }
            mutated
        }
    };

    let leftover = pargs.finish();
    if !leftover.is_empty() {
        log::warn!("Ignored extra arguments: {:?}", leftover);
    }

    logging::log_command(&command, started.elapsed().as_millis() as u64, mutated);
    Ok(())
}

/// Run a registry command, returning whether it changed anything
fn run(
    registry: &mut Registry,
    command: &str,
    pargs: &mut Arguments,
    csv: bool,
) -> Result<bool, Error> {
    match command {
        "team" => team_command(registry, pargs),
        "player" => player_command(registry, pargs),
        "tournament" => tournament_command(registry, pargs),
        "fixtures" => fixtures_command(registry, pargs, csv),
        "schedule" => {
            let match_id: String = pargs.free_from_str()?;
            let date: NaiveDate = pargs
                .free_from_str()
                .context("date must be formatted YYYY-MM-DD")?;
            let venue: String = pargs.free_from_str()?;
            registry.schedule_match(&MatchId::new(match_id), date, &venue)?;
            println!("Scheduled for {date} at {venue}");
            Ok(true)
        }
        "result" => {
            let match_id: String = pargs.free_from_str()?;
            let home: i64 = pargs.free_from_str()?;
            let away: i64 = pargs.free_from_str()?;
            let m = results::record_result(registry, &MatchId::new(match_id), home, away)?;
            match m.winner() {
                Some(winner) => println!("Result recorded; winner: {}", registry.team(winner)?.name),
                None => println!("Result recorded; draw"),
            }
            Ok(true)
        }
        "standings" => {
            let tournament_id: String = pargs.free_from_str()?;
            let table = standings::compute_standings(registry, &TournamentId::new(tournament_id))?;
            if csv {
                print!("{}", report::standings_csv(&table));
            } else {
                print!("{}", report::standings_table(&table));
            }
            Ok(false)
        }
        other => bail!("unknown command: {other} (see --help)"),
    }
}

fn team_command(registry: &mut Registry, pargs: &mut Arguments) -> Result<bool, Error> {
    let action: String = pargs.free_from_str()?;
    match action.as_str() {
        "add" => {
            let name: String = pargs.free_from_str()?;
            let coach: String = pargs.free_from_str()?;
            let contact: String = pargs.free_from_str()?;
            if registry.find_team_by_name(&name).is_some() {
                bail!("a team named {name} already exists");
            }
            let id = registry.create_team(&name, &coach, &contact);
            println!("{id}");
            Ok(true)
        }
        "list" => {
            for team in registry.teams() {
                println!(
                    "{}  {}  (coach {}, {} players)  P{} W{} D{} L{} Pts{}",
                    team.id,
                    team.name,
                    team.coach,
                    team.players.len(),
                    team.stats.matches_played,
                    team.stats.wins,
                    team.stats.draws,
                    team.stats.losses,
                    team.stats.points
                );
            }
            Ok(false)
        }
        other => bail!("unknown team action: {other}"),
    }
}

fn player_command(registry: &mut Registry, pargs: &mut Arguments) -> Result<bool, Error> {
    let action: String = pargs.free_from_str()?;
    if action != "add" {
        bail!("unknown player action: {action}");
    }

    let team_id: String = pargs.free_from_str()?;
    let player = NewPlayer {
        name: pargs.free_from_str()?,
        age: pargs.free_from_str()?,
        position: pargs.free_from_str()?,
        jersey_number: pargs.free_from_str()?,
        contact: pargs.free_from_str()?,
    };
    let id = registry.add_player(&TeamId::new(team_id), player)?;
    println!("{id}");
    Ok(true)
}

fn tournament_command(registry: &mut Registry, pargs: &mut Arguments) -> Result<bool, Error> {
    let action: String = pargs.free_from_str()?;
    match action.as_str() {
        "create" => {
            let name: String = pargs.free_from_str()?;
            let format: String = pargs.free_from_str()?;
            let format: TournamentFormat = format.parse().map_err(Error::msg)?;
            let id = registry.create_tournament(&name, format);
            println!("{id}");
            Ok(true)
        }
        "list" => {
            for t in registry.tournaments() {
                println!(
                    "{}  {}  [{}]  {} teams, {} matches",
                    t.id,
                    t.name,
                    t.format,
                    t.team_ids.len(),
                    t.match_ids.len()
                );
            }
            Ok(false)
        }
        "register" | "withdraw" => {
            let tournament_id = TournamentId::new(pargs.free_from_str::<String>()?);
            let team_id = TeamId::new(pargs.free_from_str::<String>()?);
            if action == "register" {
                registry.register_team(&tournament_id, &team_id)?;
            } else {
                registry.unregister_team(&tournament_id, &team_id)?;
            }
            Ok(true)
        }
        other => bail!("unknown tournament action: {other}"),
    }
}

fn fixtures_command(registry: &mut Registry, pargs: &mut Arguments, csv: bool) -> Result<bool, Error> {
    let action: String = pargs.free_from_str()?;
    let tournament_id = TournamentId::new(pargs.free_from_str::<String>()?);

    let mutated = match action.as_str() {
        "generate" => {
            let matches = fixtures::generate(registry, &tournament_id)?;
            info!("{} fixtures generated", matches.len());
            true
        }
        "regenerate" => {
            let matches = fixtures::regenerate(registry, &tournament_id)?;
            info!("{} fixtures regenerated", matches.len());
            true
        }
        "list" => false,
        other => bail!("unknown fixtures action: {other}"),
    };

    let matches = registry.matches_for(&tournament_id)?;
    if csv {
        print!("{}", report::fixtures_csv(registry, &matches));
    } else {
        print!("{}", report::fixtures_table(registry, &matches));
    }
    Ok(mutated)
}
