use clap::{Parser, Subcommand};
use platform_services::VibrationType;

#[derive(Parser)]
#[command(
    name = "psa",
    about = "Clipboard, haptics and battery on the current platform"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Copy text to the clipboard
    Copy {
        /// Text to copy
        text: String,
    },

    /// Print the clipboard text
    Paste,

    /// Request haptic feedback
    Vibrate {
        /// Intensity: none, light, medium or heavy
        #[arg(default_value = "light")]
        kind: VibrationType,
    },

    /// Print battery level and charging state
    Battery {
        /// Print JSON instead of a status line
        #[arg(long)]
        json: bool,

        /// Cancel a query that takes longer than this
        #[arg(long, default_value_t = 2000)]
        timeout_ms: u64,

        /// Keep polling until interrupted
        #[arg(long)]
        watch: bool,

        /// Poll interval for --watch
        #[arg(long, default_value_t = 5000)]
        interval_ms: u64,
    },

    /// Print the platform the backend was selected for
    Info,
}

impl Command {
    /// Subcommand name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Copy { .. } => "copy",
            Self::Paste => "paste",
            Self::Vibrate { .. } => "vibrate",
            Self::Battery { .. } => "battery",
            Self::Info => "info",
        }
    }
}
