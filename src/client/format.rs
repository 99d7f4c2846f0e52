//! Output formatting for CLI commands.
//!
//! Status lines go to stdout. `paste` writes the clipboard text with no
//! decoration other than a trailing newline when the text lacks one, so
//! piping works naturally (`psa paste | less`).

use std::borrow::Cow;
use std::io::{self, Write};

use platform_services::{BatteryInfo, Platform, VibrationType};

/// Print copy confirmation.
pub fn print_copied(text: &str) {
    println!("Copied {} bytes to clipboard", text.len());
}

/// Write clipboard text to stdout, adding a trailing newline if the
/// text lacks one. Empty text prints nothing.
pub fn print_clipboard(text: &str) -> Result<(), io::Error> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(clipboard_output(text).as_bytes())?;
    stdout.flush()
}

/// Print vibration request.
pub fn print_vibrated(kind: VibrationType) {
    match kind.pattern() {
        Some(pattern) => println!(
            "Requested {kind} vibration ({} ms, amplitude {})",
            pattern.duration.as_millis(),
            pattern.amplitude
        ),
        None => println!("No vibration requested"),
    }
}

/// Print one battery reading.
pub fn print_battery(info: BatteryInfo, json: bool) -> Result<(), serde_json::Error> {
    println!("{}", battery_line(info, json)?);
    Ok(())
}

/// Print the selected platform.
pub fn print_info(platform: Platform) {
    println!("Platform: {platform}");
}

fn clipboard_output(text: &str) -> Cow<'_, str> {
    if text.is_empty() || text.ends_with('\n') {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(format!("{text}\n"))
    }
}

fn battery_line(info: BatteryInfo, json: bool) -> Result<String, serde_json::Error> {
    if json {
        serde_json::to_string(&info)
    } else {
        Ok(format!("Battery: {info}"))
    }
}
