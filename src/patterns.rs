//! Pattern generators: fill the LED buffer and flush it to the board.
//!
//! ## Patterns
//! - **Diamond**: a fixed, vertically symmetric gradient, sent once
//! - **Random**: every display row gets fresh random bytes each frame,
//!   forever or until the running flag is cleared

use crate::board::{Board, LedBuffer, Transport};
use crate::{BoardError, DISPLAY_ROWS, is_running};
use rand::Rng;
use std::sync::atomic::AtomicBool;
use std::thread;
use std::time::Duration;

/// Which pattern the binary should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Pattern {
    Diamond,
    Random,
    /// Diamond once, then random until stopped.
    Demo,
}

/// Row bytes for the diamond, top to bottom.
pub const DIAMOND: [[u8; 3]; DISPLAY_ROWS] = [
    [0xff, 0xfe, 0xff],
    [0xff, 0xfd, 0x7f],
    [0xff, 0xfb, 0xbf],
    [0xff, 0xf7, 0xdf],
    [0xff, 0xfb, 0xbf],
    [0xff, 0xfd, 0x7f],
    [0xff, 0xfe, 0xff],
];

/// Random bytes are drawn from `0..RANDOM_BYTE_END`, so 255 never shows up.
pub const RANDOM_BYTE_END: u8 = 255;

// Failures logged per run before the loop goes quiet.
const LOGGED_FAILURES: u64 = 5;

pub fn fill_diamond(buffer: &mut LedBuffer) -> Result<(), BoardError> {
    for (row, bytes) in DIAMOND.iter().enumerate() {
        buffer.set_row(row, *bytes)?;
    }
    Ok(())
}

/// Draw the diamond and flush it once.
pub fn show_diamond<T: Transport>(board: &mut Board<T>) -> Result<(), BoardError> {
    fill_diamond(board.leds_mut())?;
    board.write_screen()
}

pub fn fill_random<R: Rng>(buffer: &mut LedBuffer, rng: &mut R) -> Result<(), BoardError> {
    for row in 0..DISPLAY_ROWS {
        let bytes: [u8; 3] = std::array::from_fn(|_| rng.gen_range(0..RANDOM_BYTE_END));
        buffer.set_row(row, bytes)?;
    }
    Ok(())
}

/// Options for the random render loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RandomOptions {
    /// Pause between frames. Zero spins as fast as the bus allows.
    pub frame_delay: Duration,
    /// Stop after this many frames.
    pub frame_limit: Option<u64>,
    /// Return the first transfer error instead of carrying on.
    pub stop_on_error: bool,
}

/// Fill with random bytes and flush, frame after frame, while `running` is set.
///
/// Transfer failures don't stop the loop unless `stop_on_error` is set;
/// the next frame goes out to the same handle. Returns the number of
/// frames drawn.
pub fn run_random<T, R>(
    board: &mut Board<T>,
    rng: &mut R,
    running: &AtomicBool,
    options: RandomOptions,
) -> Result<u64, BoardError>
where
    T: Transport,
    R: Rng,
{
    let mut frames: u64 = 0;
    let mut failed_frames: u64 = 0;

    tracing::info!("Running random pattern");

    while is_running(running) {
        if options.frame_limit.is_some_and(|limit| frames >= limit) {
            break;
        }

        fill_random(board.leds_mut(), rng)?;

        if let Err(e) = board.write_screen() {
            if options.stop_on_error {
                return Err(e);
            }
            failed_frames += 1;
            if failed_frames <= LOGGED_FAILURES {
                tracing::warn!("Frame {} not fully sent: {}", frames, e);
            }
        }

        frames += 1;

        if !options.frame_delay.is_zero() {
            thread::sleep(options.frame_delay);
        }
    }

    if failed_frames > 0 {
        tracing::warn!(
            "Random pattern stopped with {} failed frames out of {}",
            failed_frames,
            frames
        );
    }
    tracing::info!("Random pattern stopped after {} frames", frames);

    Ok(frames)
}
