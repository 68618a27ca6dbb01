//! Word-safe chunking for the bounded-input entity model.

/// Split `text` into chunks of at most `max_len` characters without ever
/// splitting inside a word.
///
/// Words are whitespace-delimited and rejoined with single spaces. Before a
/// word is appended, the joined length is checked; on overflow the current
/// chunk is closed and the word starts a new one. A single word longer than
/// `max_len` becomes its own over-long chunk; words are never split.
pub fn split_into_chunks(text: &str, max_len: usize) -> Vec<String> {
    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        // Joined length if we append: current + space + word.
        let joined = if current.is_empty() {
            word_len
        } else {
            current_len + 1 + word_len
        };

        if joined > max_len && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_len = joined;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
