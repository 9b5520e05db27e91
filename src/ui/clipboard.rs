//! Terminal clipboard access through the OSC 52 escape sequence.
//!
//! The terminal emulator, not the process, owns the clipboard, so this works
//! over SSH and inside tmux (with `set-clipboard on`). Terminals without OSC 52
//! support silently ignore the sequence.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::io::{self, Write};

/// Payloads above this size are refused by most terminals.
pub const MAX_OSC52_BYTES: usize = 100_000;

#[must_use]
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

pub fn copy_to<W: Write>(writer: &mut W, text: &str) -> io::Result<()> {
    if text.len() > MAX_OSC52_BYTES {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "text is {} bytes, clipboard limit is {MAX_OSC52_BYTES}",
                text.len()
            ),
        ));
    }

    writer.write_all(osc52_sequence(text).as_bytes())?;
    writer.flush()
}
