use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const SAVE_FILE: &str = ".numbers_game.json";

/// Everything that outlives a session. Persistence is best-effort: any
/// read or write failure degrades to defaults and the game plays on.
#[derive(Debug, Serialize, Deserialize)]
struct SavedData {
    #[serde(default)]
    high_score: i64,
    #[serde(default = "default_audio")]
    audio_enabled: bool,
}

fn default_audio() -> bool {
    true
}

impl Default for SavedData {
    fn default() -> Self {
        Self {
            high_score: 0,
            audio_enabled: true,
        }
    }
}

fn save_path() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_default()
        .join(SAVE_FILE)
}

fn load() -> SavedData {
    fs::read_to_string(save_path())
        .ok()
        .and_then(|text| serde_json::from_str(&text).ok())
        .unwrap_or_default()
}

fn store(data: &SavedData) {
    if let Ok(text) = serde_json::to_string_pretty(data) {
        let _ = fs::write(save_path(), text);
    }
}

pub fn load_high_score() -> i64 {
    load().high_score
}

/// Persisted high score is monotonically non-decreasing.
pub fn save_high_score(score: i64) {
    let mut data = load();
    if score > data.high_score {
        data.high_score = score;
        store(&data);
    }
}

pub fn load_audio_preference() -> bool {
    load().audio_enabled
}

pub fn save_audio_preference(enabled: bool) {
    let mut data = load();
    data.audio_enabled = enabled;
    store(&data);
}
