/// 256-entry color palettes.
///
/// `Palette` holds 8-bit channels as read from disk. The display hardware
/// takes 6-bit channels, so `to_vga()` rescales to `VgaPalette`.

pub const PALETTE_SIZE: usize = 256;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }
}

/// 8-bit-per-channel palette.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Palette {
    entries: [Rgb; PALETTE_SIZE],
}

/// 6-bit-per-channel palette (each channel 0..=63).
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct VgaPalette {
    entries: [Rgb; PALETTE_SIZE],
}

impl Palette {
    /// Build a full palette from up to 256 entries. Missing slots repeat the
    /// last given entry, or black when none were given. Extra entries are
    /// ignored.
    pub fn from_entries(entries: &[Rgb]) -> Self {
        let fill = entries.iter().take(PALETTE_SIZE).last().copied().unwrap_or(Rgb::BLACK);
        let mut out = [fill; PALETTE_SIZE];
        for (slot, e) in out.iter_mut().zip(entries) {
            *slot = *e;
        }
        Palette { entries: out }
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[Rgb; PALETTE_SIZE] {
        &self.entries
    }

    pub fn to_vga(&self) -> VgaPalette {
        let scale = |v: u8| (v as u16 * 63 / 255) as u8;
        let mut entries = [Rgb::BLACK; PALETTE_SIZE];
        for (dst, src) in entries.iter_mut().zip(self.entries.iter()) {
            *dst = Rgb::new(scale(src.r), scale(src.g), scale(src.b));
        }
        VgaPalette { entries }
    }
}

impl VgaPalette {
    #[cfg(test)]
    pub fn entries(&self) -> &[Rgb; PALETTE_SIZE] {
        &self.entries
    }

    /// Expand slot `index` back to 8-bit channels for true-color output.
    pub fn rgb8(&self, index: u8) -> Rgb {
        let expand = |v: u8| {
            let v = v.min(63);
            (v << 2) | (v >> 4)
        };
        let e = self.entries[index as usize];
        Rgb::new(expand(e.r), expand(e.g), expand(e.b))
    }
}
