//! Snapshots of a game between hands and the save-file directory that holds
//! them.
//!
//! A snapshot captures seating, stacks, blinds, the variant and the CPU
//! profiles, plus the position in the random stream. It never captures a hand
//! in progress: cards, pot and phase are not saved, and a restored game is
//! always at [`Phase::HandOver`], ready to deal.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::deck::Deck;
use crate::errors::{GameError, SaveError};
use crate::game::{Game, Phase};
use crate::player::{Player, PlayerStatus};
use crate::profile::AiProfile;
use crate::rules::GameRules;

pub const SAVE_FORMAT_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub game_metadata: SnapshotMetadata,
    pub players: Vec<PlayerSnapshot>,
    pub game_rules: GameRules,
    pub rng: RngState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    pub hand_count: u32,
    pub dealer_pos: usize,
    pub small_blind: u32,
    pub big_blind: u32,
    pub blind_up_interval: u32,
    pub total_initial_chips: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub name: String,
    pub chips: u32,
    pub is_cpu: bool,
    pub position: usize,
    pub eliminated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<AiProfile>,
}

/// Where the game's ChaCha stream stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: [u8; 32],
    pub word_pos: u64,
}

impl GameSnapshot {
    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SaveError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Game {
    /// Captures the game between hands.
    ///
    /// # Errors
    ///
    /// [`GameError::SnapshotMidHand`] unless the phase is `HandOver`.
    pub fn snapshot(&self) -> Result<GameSnapshot, GameError> {
        if self.phase != Phase::HandOver {
            return Err(GameError::SnapshotMidHand);
        }
        let word_pos = u64::try_from(self.rng.get_word_pos()).map_err(|_| {
            GameError::InvariantViolation("random stream position does not fit in 64 bits".into())
        })?;
        Ok(GameSnapshot {
            version: SAVE_FORMAT_VERSION.to_string(),
            timestamp: Utc::now(),
            game_metadata: SnapshotMetadata {
                hand_count: self.hand_count,
                dealer_pos: self.dealer_pos,
                small_blind: self.small_blind,
                big_blind: self.big_blind,
                blind_up_interval: self.blind_up_interval,
                total_initial_chips: self.total_initial_chips,
            },
            players: self
                .players
                .iter()
                .map(|p| PlayerSnapshot {
                    name: p.name.clone(),
                    chips: p.chips,
                    is_cpu: p.is_cpu,
                    position: p.position,
                    eliminated: p.is_eliminated(),
                    profile: p.profile.clone(),
                })
                .collect(),
            game_rules: self.rules.clone(),
            rng: RngState {
                seed: self.rng.get_seed(),
                word_pos,
            },
        })
    }

    /// Rebuilds a game from a snapshot. The result is at `HandOver` and
    /// continues the saved random stream.
    pub fn restore(snapshot: GameSnapshot) -> Result<Game, SaveError> {
        if snapshot.version != SAVE_FORMAT_VERSION {
            return Err(SaveError::UnsupportedVersion(snapshot.version));
        }
        snapshot.game_rules.validate()?;
        let meta = &snapshot.game_metadata;
        let n = snapshot.players.len();
        if n < 2 {
            return Err(SaveError::Invalid(format!("{} players saved, need at least 2", n)));
        }
        if meta.dealer_pos >= n {
            return Err(SaveError::Invalid(format!(
                "dealer position {} is outside the table",
                meta.dealer_pos
            )));
        }
        if meta.small_blind == 0 || meta.big_blind < meta.small_blind {
            return Err(SaveError::Invalid(format!(
                "blinds {}/{} are invalid",
                meta.small_blind, meta.big_blind
            )));
        }
        let chips: u64 = snapshot.players.iter().map(|p| u64::from(p.chips)).sum();
        if chips != u64::from(meta.total_initial_chips) {
            return Err(SaveError::Invalid(format!(
                "stacks add up to {} but the game started with {}",
                chips, meta.total_initial_chips
            )));
        }

        let mut players = Vec::with_capacity(n);
        for (seat, ps) in snapshot.players.into_iter().enumerate() {
            let mut player = match (ps.is_cpu, ps.profile) {
                (true, Some(profile)) => {
                    profile.validate()?;
                    Player::cpu(ps.name, ps.chips, seat, profile)
                }
                (true, None) => {
                    return Err(SaveError::Invalid(format!(
                        "CPU player '{}' has no profile",
                        ps.name
                    )))
                }
                (false, _) => Player::new(ps.name, ps.chips, seat),
            };
            if ps.eliminated || player.chips == 0 {
                player.status = PlayerStatus::Eliminated;
            }
            players.push(player);
        }

        let mut rng = ChaCha20Rng::from_seed(snapshot.rng.seed);
        rng.set_word_pos(u128::from(snapshot.rng.word_pos));

        Ok(Game {
            players,
            deck: Deck::new(),
            community_cards: Vec::with_capacity(5),
            pot: 0,
            dealer_pos: meta.dealer_pos,
            big_blind_pos: 0,
            current_turn_pos: 0,
            phase: Phase::HandOver,
            bet_to_call: 0,
            last_raise_amount: 0,
            hand_count: meta.hand_count,
            small_blind: meta.small_blind,
            big_blind: meta.big_blind,
            blind_up_interval: meta.blind_up_interval,
            actions_taken_this_round: 0,
            action_closer_pos: 0,
            round_closed: false,
            total_initial_chips: meta.total_initial_chips,
            rules: snapshot.game_rules,
            rng,
        })
    }
}

/// Reads and restores a save file from an explicit path.
pub fn load_game_file(path: &Path) -> Result<Game, SaveError> {
    if !path.exists() {
        return Err(SaveError::NotFound(path.display().to_string()));
    }
    let json = fs::read_to_string(path)?;
    let game = Game::restore(GameSnapshot::from_json(&json)?)?;
    info!(path = %path.display(), "game loaded");
    Ok(game)
}

/// A save file found in the save directory.
#[derive(Debug, Clone)]
pub struct SaveFileInfo {
    pub filename: String,
    pub full_path: PathBuf,
    pub modified: DateTime<Local>,
    pub size: u64,
    /// `None` when the file could not be parsed
    pub metadata: Option<SnapshotMetadata>,
}

/// File operations on a directory of `.json` save files.
#[derive(Debug, Clone)]
pub struct SaveManager {
    save_dir: PathBuf,
}

impl SaveManager {
    /// Opens the save directory, creating it if needed.
    pub fn new(save_dir: impl Into<PathBuf>) -> Result<Self, SaveError> {
        let save_dir = save_dir.into();
        fs::create_dir_all(&save_dir)?;
        Ok(Self { save_dir })
    }

    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    /// Writes a snapshot of `game`. An empty `filename` becomes
    /// `save_YYYYMMDD_HHMMSS`. Returns the path written.
    pub fn save_game(&self, game: &Game, filename: &str) -> Result<PathBuf, SaveError> {
        let name = if filename.trim().is_empty() {
            format!("save_{}", Local::now().format("%Y%m%d_%H%M%S"))
        } else {
            sanitize_filename(filename)
        };
        let path = self.resolve(&name);
        let json = game.snapshot()?.to_json()?;
        fs::write(&path, json)?;
        info!(path = %path.display(), hand = game.hand_count(), "game saved");
        Ok(path)
    }

    /// Loads `filename`, or the newest save when it is empty.
    pub fn load_game(&self, filename: &str) -> Result<Game, SaveError> {
        let path = if filename.trim().is_empty() {
            let newest = self.list_saves()?.into_iter().next().ok_or_else(|| {
                SaveError::NotFound(format!("no save files in {}", self.save_dir.display()))
            })?;
            info!(file = %newest.filename, "loading most recent save");
            newest.full_path
        } else {
            self.resolve(filename)
        };
        load_game_file(&path)
    }

    /// All `.json` files in the directory, newest first.
    pub fn list_saves(&self) -> Result<Vec<SaveFileInfo>, SaveError> {
        let mut saves = Vec::new();
        for entry in fs::read_dir(&self.save_dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let meta = match entry.metadata() {
                Ok(meta) => meta,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "cannot stat save file");
                    continue;
                }
            };
            let metadata = match read_metadata(&path) {
                Ok(m) => Some(m),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "cannot read save metadata");
                    None
                }
            };
            let modified = meta
                .modified()
                .map(DateTime::<Local>::from)
                .unwrap_or_else(|_| Local::now());
            saves.push(SaveFileInfo {
                filename: entry.file_name().to_string_lossy().into_owned(),
                full_path: path,
                modified,
                size: meta.len(),
                metadata,
            });
        }
        saves.sort_by(|a, b| b.modified.cmp(&a.modified));
        Ok(saves)
    }

    pub fn delete_save(&self, filename: &str) -> Result<PathBuf, SaveError> {
        let path = self.resolve(filename);
        if !path.exists() {
            return Err(SaveError::NotFound(path.display().to_string()));
        }
        fs::remove_file(&path)?;
        info!(path = %path.display(), "save deleted");
        Ok(path)
    }

    /// Checks that the file exists, parses, and names players and rules.
    pub fn validate_save_file(&self, filename: &str) -> Result<(), SaveError> {
        let path = self.resolve(filename);
        if !path.exists() {
            return Err(SaveError::NotFound(path.display().to_string()));
        }
        let snapshot = GameSnapshot::from_json(&fs::read_to_string(&path)?)?;
        if snapshot.players.is_empty() {
            return Err(SaveError::Invalid(format!("{} contains no players", path.display())));
        }
        if snapshot.game_rules.name.is_empty() {
            return Err(SaveError::Invalid(format!("{} has no game rules", path.display())));
        }
        Ok(())
    }

    /// Maps a save name onto a `.json` file inside the save directory; path
    /// separators in the name never reach the filesystem.
    fn resolve(&self, filename: &str) -> PathBuf {
        let mut name = sanitize_filename(filename);
        if !name.ends_with(".json") {
            name.push_str(".json");
        }
        self.save_dir.join(name)
    }
}

fn read_metadata(path: &Path) -> Result<SnapshotMetadata, SaveError> {
    let snapshot = GameSnapshot::from_json(&fs::read_to_string(path)?)?;
    Ok(snapshot.game_metadata)
}

/// Replaces path separators and other characters that are invalid in file
/// names, and trims surrounding spaces and dots. Never returns an empty name.
pub fn sanitize_filename(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect();
    let trimmed = replaced.trim().trim_matches('.');
    if trimmed.is_empty() {
        "save".to_string()
    } else {
        trimmed.to_string()
    }
}
