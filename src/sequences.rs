//! Control sequence constants for terminal mode switching.
//!
//! These are DEC private mode sequences (ECMA-48 CSI with the `?` prefix).
//! Terminals match them literally, so every constant must be emitted
//! byte-for-byte with nothing added.

/// Disable every common mouse reporting mode in one burst: click tracking
/// (1000), button-event tracking (1002), any-event tracking (1003), UTF-8
/// extended coordinates (1005), SGR extended coordinates (1006), and urxvt
/// extended coordinates (1015).
///
/// Disabling a mode that was never enabled is a no-op at the terminal, so
/// the full burst is always safe.
pub const MOUSE_DISABLE: &str =
    "\x1b[?1000l\x1b[?1002l\x1b[?1003l\x1b[?1005l\x1b[?1006l\x1b[?1015l";

/// Leave the alternate screen buffer, restoring the primary scrollback.
pub const EXIT_ALT_SCREEN: &str = "\x1b[?1049l";

/// Make the cursor visible again.
pub const SHOW_CURSOR: &str = "\x1b[?25h";

/// Bracketed paste mode: the terminal wraps pasted text in markers so the
/// application can tell a paste from typed input.
pub const BRACKETED_PASTE_ENABLE: &str = "\x1b[?2004h";
pub const BRACKETED_PASTE_DISABLE: &str = "\x1b[?2004l";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_disable_covers_all_variants() {
        assert_eq!(
            MOUSE_DISABLE,
            "\u{1b}[?1000l\u{1b}[?1002l\u{1b}[?1003l\u{1b}[?1005l\u{1b}[?1006l\u{1b}[?1015l"
        );
    }

    #[test]
    fn test_screen_and_cursor_sequences() {
        assert_eq!(EXIT_ALT_SCREEN, "\u{1b}[?1049l");
        assert_eq!(SHOW_CURSOR, "\u{1b}[?25h");
    }

    #[test]
    fn test_bracketed_paste_sequences() {
        assert_eq!(BRACKETED_PASTE_ENABLE, "\u{1b}[?2004h");
        assert_eq!(BRACKETED_PASTE_DISABLE, "\u{1b}[?2004l");
    }

    #[test]
    fn test_sequences_are_pure_ascii_after_escape() {
        for seq in [
            MOUSE_DISABLE,
            EXIT_ALT_SCREEN,
            SHOW_CURSOR,
            BRACKETED_PASTE_ENABLE,
            BRACKETED_PASTE_DISABLE,
        ] {
            assert!(seq.starts_with('\u{1b}'));
            assert!(seq.bytes().all(|b| b == 0x1b || b.is_ascii_graphic()));
        }
    }
}
