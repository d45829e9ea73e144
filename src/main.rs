//! DC LED Board Driver
//!
//! Finds the DC USB LED board and drives it with one of the built-in
//! patterns. By default it shows the diamond, then flickers random
//! colors until Ctrl+C.
//!
//! ## Usage
//! ```sh
//! sudo ./target/release/dc-board-rs --pattern random --frame-delay-ms 50
//! ```

#[cfg(not(feature = "hardware"))]
fn main() {
    eprintln!("This binary requires the 'hardware' feature (rusb).");
    eprintln!("Build with: cargo build --release");
    eprintln!("Tests can run without it: cargo test --no-default-features");
    std::process::exit(1);
}

#[cfg(feature = "hardware")]
fn main() {
    use clap::Parser;
    use dc_board_rs::patterns::Pattern;
    use tracing_subscriber::EnvFilter;

    /// DC LED board driver
    #[derive(Parser)]
    #[command(name = "dc-board-rs")]
    #[command(about = "Drive the DC USB LED matrix board")]
    #[command(version)]
    struct Args {
        /// Pattern to show
        #[arg(long, value_enum, default_value = "demo")]
        pattern: Pattern,

        /// Brightness byte sent at the head of every packet
        #[arg(long, default_value = "0")]
        brightness: u8,

        /// Pause between random frames, in milliseconds (0 = busy loop)
        #[arg(long, default_value = "0")]
        frame_delay_ms: u64,

        /// Stop the random pattern after this many frames
        #[arg(long)]
        frames: Option<u64>,

        /// Exit when a transfer fails instead of carrying on
        #[arg(long)]
        stop_on_error: bool,
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_ansi(false)
        .compact()
        .init();

    let args = Args::parse();

    tracing::info!("DC board driver v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Pattern: {:?}", args.pattern);

    let options = dc_board_rs::patterns::RandomOptions {
        frame_delay: std::time::Duration::from_millis(args.frame_delay_ms),
        frame_limit: args.frames,
        stop_on_error: args.stop_on_error,
    };

    // `run` owns every USB resource, so they're all closed by the time we exit.
    if let Err(e) = run(args.pattern, args.brightness, options) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "hardware")]
fn run(
    pattern: dc_board_rs::patterns::Pattern,
    brightness: u8,
    options: dc_board_rs::patterns::RandomOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    use dc_board_rs::patterns::{Pattern, run_random, show_diamond};
    use dc_board_rs::{Board, BoardConfig, setup_signal_handler, usb};

    let context = rusb::Context::new()
        .map_err(|e| dc_board_rs::BoardError::Enumeration(Box::new(e)))?;
    let transport = usb::open_board(&context, &BoardConfig::default())?;
    let mut board = Board::new(transport).with_brightness(brightness);

    if matches!(pattern, Pattern::Diamond | Pattern::Demo) {
        // Diamond transfer failures only matter when asked to stop on them.
        if let Err(e) = show_diamond(&mut board) {
            if options.stop_on_error {
                return Err(e.into());
            }
        }
    }

    if matches!(pattern, Pattern::Random | Pattern::Demo) {
        let running = setup_signal_handler()?;
        let mut rng = rand::thread_rng();
        run_random(&mut board, &mut rng, &running, options)?;
    }

    tracing::info!("Shutting down cleanly.");
    Ok(())
}
