//! Splitting long text into Telegram-sized parts.

/// Telegram caps messages at 4096 characters; this leaves room for the
/// `Part i/N:` header.
pub const MAX_MESSAGE_CHARS: usize = 4000;

/// Splits `message` into the texts to send, in order.
///
/// Messages of at most `max_chars` characters are returned unchanged as a
/// single element. Longer messages are cut every `max_chars` characters and
/// each piece is prefixed with `Part i/N:\n`.
pub fn split_message(message: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let total_chars = message.chars().count();

    if total_chars <= max_chars {
        return vec![message.to_string()];
    }

    let pieces: Vec<&str> = char_chunks(message, max_chars).collect();
    let n = pieces.len();

    pieces
        .into_iter()
        .enumerate()
        .map(|(i, piece)| format!("Part {}/{}:\n{}", i + 1, n, piece))
        .collect()
}

/// Yields consecutive slices of `text` holding `size` characters each
/// (the last may be shorter). Never splits inside a UTF-8 sequence.
fn char_chunks(text: &str, size: usize) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let cut = rest
            .char_indices()
            .nth(size)
            .map(|(idx, _)| idx)
            .unwrap_or(rest.len());
        let (head, tail) = rest.split_at(cut);
        rest = tail;
        Some(head)
    })
}
