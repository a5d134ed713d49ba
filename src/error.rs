/// Fatal startup errors. Anything that fails here aborts the program after
/// the console is restored; nothing inside the frame loop produces these.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("cannot read palette {}: {source}", path.display())]
    PaletteRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read sprite {}: {source}", path.display())]
    SpriteRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("sprite {} is too small: need {expected} bytes for {width}x{height}, found {found}", path.display())]
    SpriteTooSmall {
        path: PathBuf,
        width: usize,
        height: usize,
        expected: usize,
        found: usize,
    },

    #[error("not enough screen memory for a {bytes} byte frame buffer")]
    FrameBuffer { bytes: usize },

    #[error("display error: {0}")]
    Display(#[from] io::Error),
}
