/// Asset loading: palette description files and raw sprite images.
///
/// ## Palette format
///
/// Text, one `r g b` triple per line (0-255 each). An optional JASC-PAL
/// header (`JASC-PAL`, version, count) is skipped. Lines that don't parse
/// are skipped; a short palette is padded with its last valid entry.
///
/// ## Sprite format
///
/// Raw bytes, one palette index per pixel, row-major, no header. Width and
/// height come from config.

use std::fs;
use std::path::Path;

use crate::config::{AssetConfig, SpriteSource};
use crate::domain::palette::{Palette, Rgb, PALETTE_SIZE};
use crate::domain::sprite::Sprite;
use crate::error::StartupError;
use super::session::SpriteSet;

// ══════════════════════════════════════════════════════════════
// Palette
// ══════════════════════════════════════════════════════════════

pub fn load_palette(path: &Path) -> Result<Palette, StartupError> {
    let text = fs::read_to_string(path).map_err(|source| StartupError::PaletteRead {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = parse_palette(&text);
    if entries.len() < PALETTE_SIZE {
        log::warn!(
            "palette {} has {} valid entries, padding to {}",
            path.display(), entries.len(), PALETTE_SIZE
        );
    } else {
        log::info!("palette {} loaded", path.display());
    }
    Ok(Palette::from_entries(&entries))
}

/// Valid color entries in file order, at most `PALETTE_SIZE`.
pub fn parse_palette(text: &str) -> Vec<Rgb> {
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty()).peekable();

    if lines.peek().map_or(false, |l| l.eq_ignore_ascii_case("JASC-PAL")) {
        // header, version, declared count
        lines.next();
        lines.next();
        lines.next();
    }

    let mut entries = Vec::with_capacity(PALETTE_SIZE);
    for (n, line) in lines.enumerate() {
        if entries.len() == PALETTE_SIZE {
            break;
        }
        match parse_rgb(line) {
            Some(rgb) => entries.push(rgb),
            None => log::debug!("palette line {} skipped: {:?}", n + 1, line),
        }
    }
    entries
}

fn parse_rgb(line: &str) -> Option<Rgb> {
    let mut parts = line.split_whitespace().map(|p| p.parse::<u8>().ok());
    let r = parts.next()??;
    let g = parts.next()??;
    let b = parts.next()??;
    if parts.next().is_some() {
        return None;
    }
    Some(Rgb::new(r, g, b))
}

// ══════════════════════════════════════════════════════════════
// Sprites
// ══════════════════════════════════════════════════════════════

pub fn load_sprite(src: &SpriteSource) -> Result<Sprite, StartupError> {
    let path = match &src.path {
        Some(p) => p,
        None => return Ok(Sprite::disabled()),
    };
    let mut bytes = fs::read(path).map_err(|source| StartupError::SpriteRead {
        path: path.clone(),
        source,
    })?;

    let expected = src.width * src.height;
    if bytes.len() < expected {
        return Err(StartupError::SpriteTooSmall {
            path: path.clone(),
            width: src.width,
            height: src.height,
            expected,
            found: bytes.len(),
        });
    }
    if bytes.len() > expected {
        log::warn!(
            "sprite {} has {} trailing bytes, ignored",
            path.display(), bytes.len() - expected
        );
        bytes.truncate(expected);
    }

    log::info!("sprite {} loaded ({}x{})", path.display(), src.width, src.height);
    // Length was just checked against width * height.
    Ok(Sprite::new(src.width, src.height, bytes).unwrap_or_else(Sprite::disabled))
}

pub fn load_sprites(cfg: &AssetConfig) -> Result<SpriteSet, StartupError> {
    Ok(SpriteSet {
        player: load_sprite(&cfg.player)?,
        guard: load_sprite(&cfg.guard)?,
        loot: load_sprite(&cfg.loot)?,
    })
}
