//! Human or JSON rendering of command results.

use serde::Serialize;

/// A command result printable as text or JSON.
pub trait CommandOutput: Serialize {
    /// Plain text printed when `--json` is off.
    fn to_human(&self) -> String;

    /// JSON form; the serde representation by default.
    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// The stdout form of `result`. JSON is a single line so scripts can parse it.
pub fn render<T: CommandOutput>(result: &T, json_mode: bool) -> String {
    if json_mode {
        result.to_json().to_string()
    } else {
        result.to_human()
    }
}

/// Print `result` to stdout.
pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    println!("{}", render(result, json_mode));
}
