//! Sanitizing server-supplied text for terminal display
//!
//! Chat prompts and AI responses come from the backend and are drawn straight into
//! the terminal. Escape sequences embedded in them could move the cursor, recolor
//! the screen or ring the bell, so they are stripped before rendering.

/// Removes ANSI CSI sequences (`ESC [ ... letter`), bare escapes and other control
/// characters, keeping tabs and line breaks.
///
/// # Examples
///
/// ```
/// use travel_mate_client::utils::terminal::sanitize_for_terminal;
///
/// assert_eq!(sanitize_for_terminal("\x1b[1mBeirut\x1b[0m"), "Beirut");
/// ```
pub fn sanitize_for_terminal(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            if chars.peek() == Some(&'[') {
                chars.next();
                for next_ch in chars.by_ref() {
                    if next_ch.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
            continue;
        }

        if ch.is_control() && !matches!(ch, '\t' | '\n' | '\r') {
            continue;
        }

        result.push(ch);
    }

    result
}
