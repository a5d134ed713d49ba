/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub display: DisplayConfig,
    pub assets: AssetConfig,
    pub gamepad: GamepadConfig,
    pub log: LogConfig,
    /// The `config.toml` that was read, if any.
    pub source: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct DisplayConfig {
    /// Vertical-sync pacing.
    pub frame_ms: u64,
    /// Terminal backend samples every Nth canvas pixel.
    pub pixel_step: usize,
}

#[derive(Clone, Debug)]
pub struct AssetConfig {
    pub palette: PathBuf,
    pub player: SpriteSource,
    pub guard: SpriteSource,
    pub loot: SpriteSource,
}

/// Where a sprite comes from. `path == None` disables the sprite.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpriteSource {
    pub path: Option<PathBuf>,
    pub width: usize,
    pub height: usize,
}

#[derive(Clone, Debug)]
pub struct GamepadConfig {
    pub quit: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct LogConfig {
    pub level: String,
    /// `None` logs to stderr.
    pub file: Option<PathBuf>,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    display: TomlDisplay,
    #[serde(default)]
    assets: TomlAssets,
    #[serde(default)]
    gamepad: TomlGamepad,
    #[serde(default)]
    log: TomlLog,
}

#[derive(Deserialize, Debug)]
struct TomlDisplay {
    #[serde(default = "default_frame_ms")]
    frame_ms: u64,
    #[serde(default = "default_pixel_step")]
    pixel_step: usize,
}

#[derive(Deserialize, Debug)]
struct TomlAssets {
    #[serde(default = "default_assets_dir")]
    dir: String,
    #[serde(default = "default_palette")]
    palette: String,
    #[serde(default = "default_player")]
    player: String,
    #[serde(default = "default_actor_w")]
    player_width: usize,
    #[serde(default = "default_actor_h")]
    player_height: usize,
    #[serde(default = "default_guard")]
    guard: String,
    #[serde(default = "default_actor_w")]
    guard_width: usize,
    #[serde(default = "default_actor_h")]
    guard_height: usize,
    #[serde(default = "default_loot")]
    loot: String,
    #[serde(default = "default_loot_size")]
    loot_width: usize,
    #[serde(default = "default_loot_size")]
    loot_height: usize,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_quit")]
    quit: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct TomlLog {
    #[serde(default = "default_log_level")]
    level: String,
    #[serde(default)]
    file: String,
}

// ── Defaults ──

fn default_frame_ms() -> u64 { 14 }     // ~70 Hz, mode 13h refresh
fn default_pixel_step() -> usize { 2 }  // 160x50 terminal cells
fn default_assets_dir() -> String { "assets".into() }
fn default_palette() -> String { "cybervga.pal".into() }
fn default_player() -> String { "player.raw".into() }
fn default_guard() -> String { "guard.raw".into() }
fn default_loot() -> String { "loot.raw".into() }
fn default_actor_w() -> usize { 16 }
fn default_actor_h() -> usize { 32 }
fn default_loot_size() -> usize { 16 }
fn default_quit() -> Vec<String> { vec!["Select".into()] }
fn default_log_level() -> String { "warn".into() }

impl Default for TomlDisplay {
    fn default() -> Self {
        TomlDisplay {
            frame_ms: default_frame_ms(),
            pixel_step: default_pixel_step(),
        }
    }
}

impl Default for TomlAssets {
    fn default() -> Self {
        TomlAssets {
            dir: default_assets_dir(),
            palette: default_palette(),
            player: default_player(),
            player_width: default_actor_w(),
            player_height: default_actor_h(),
            guard: default_guard(),
            guard_width: default_actor_w(),
            guard_height: default_actor_h(),
            loot: default_loot(),
            loot_width: default_loot_size(),
            loot_height: default_loot_size(),
        }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad { quit: default_quit() }
    }
}

impl Default for TomlLog {
    fn default() -> Self {
        TomlLog { level: default_log_level(), file: String::new() }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory,
    /// (3) XDG data home, (4) system data directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let search_dirs = candidate_dirs();
        let (toml_cfg, source) = load_toml(&search_dirs);
        let mut cfg = Self::resolve(toml_cfg, &search_dirs);
        cfg.source = source;
        cfg
    }

    fn resolve(toml_cfg: TomlConfig, search_dirs: &[PathBuf]) -> Self {
        // Resolve assets directory
        let dir_str = &toml_cfg.assets.dir;
        let assets_dir = if Path::new(dir_str).is_absolute() {
            PathBuf::from(dir_str)
        } else {
            search_dirs.iter()
                .map(|d| d.join(dir_str))
                .find(|p| p.is_dir())
                .unwrap_or_else(|| PathBuf::from(dir_str))
        };

        let a = &toml_cfg.assets;
        let sprite = |file: &str, width: usize, height: usize| SpriteSource {
            path: if file.is_empty() { None } else { Some(assets_dir.join(file)) },
            width,
            height,
        };

        GameConfig {
            display: DisplayConfig {
                frame_ms: toml_cfg.display.frame_ms,
                pixel_step: toml_cfg.display.pixel_step.max(1),
            },
            assets: AssetConfig {
                palette: assets_dir.join(&a.palette),
                player: sprite(&a.player, a.player_width, a.player_height),
                guard: sprite(&a.guard, a.guard_width, a.guard_height),
                loot: sprite(&a.loot, a.loot_width, a.loot_height),
            },
            gamepad: GamepadConfig {
                quit: toml_cfg.gamepad.quit,
            },
            log: LogConfig {
                level: toml_cfg.log.level,
                file: if toml_cfg.log.file.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(toml_cfg.log.file))
                },
            },
            source: None,
        }
    }
}

/// Candidate directories to search: exe dir + CWD + data dirs (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    // 3. XDG data home (~/.local/share/cybervga)
    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/cybervga");
        if xdg.is_dir() && !dirs.iter().any(|d| d == &xdg) {
            dirs.push(xdg);
        }
    }

    // 4. System data directory (/usr/share/cybervga)
    let sys = PathBuf::from("/usr/share/cybervga");
    if sys.is_dir() && !dirs.iter().any(|d| d == &sys) {
        dirs.push(sys);
    }

    // 5. Fallback
    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
///
/// Runs before the logger exists, so problems go straight to stderr.
fn load_toml(search_dirs: &[PathBuf]) -> (TomlConfig, Option<PathBuf>) {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return (cfg, Some(path)),
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return (TomlConfig::default(), None);
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    (TomlConfig::default(), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> GameConfig {
        let cfg: TomlConfig = toml::from_str(text).unwrap();
        GameConfig::resolve(cfg, &[PathBuf::from("/nonexistent")])
    }

    #[test]
    fn empty_file_gives_defaults() {
        let c = parse("");
        assert_eq!(c.display.frame_ms, 14);
        assert_eq!(c.display.pixel_step, 2);
        assert_eq!(c.assets.palette, PathBuf::from("assets/cybervga.pal"));
        assert_eq!(
            c.assets.player,
            SpriteSource { path: Some(PathBuf::from("assets/player.raw")), width: 16, height: 32 }
        );
        assert_eq!(c.assets.loot.width, 16);
        assert_eq!(c.assets.loot.height, 16);
        assert_eq!(c.gamepad.quit, vec!["Select".to_string()]);
        assert_eq!(c.log.level, "warn");
        assert!(c.log.file.is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let c = parse(
            r#"
            [display]
            frame_ms = 20

            [assets]
            dir = "/opt/cv"
            guard = ""
            loot_width = 8
            "#,
        );
        assert_eq!(c.display.frame_ms, 20);
        assert_eq!(c.display.pixel_step, 2);
        assert_eq!(c.assets.palette, PathBuf::from("/opt/cv/cybervga.pal"));
        assert!(c.assets.guard.path.is_none());
        assert_eq!(c.assets.loot.width, 8);
        assert_eq!(c.assets.loot.height, 16);
    }

    #[test]
    fn zero_pixel_step_is_raised_to_one() {
        let c = parse("[display]\npixel_step = 0\n");
        assert_eq!(c.display.pixel_step, 1);
    }

    #[test]
    fn log_file_is_optional() {
        let c = parse("[log]\nlevel = \"debug\"\nfile = \"cv.log\"\n");
        assert_eq!(c.log.level, "debug");
        assert_eq!(c.log.file, Some(PathBuf::from("cv.log")));
    }
}
