use once_cell::sync::Lazy;
use regex::Regex;

static BARE_NUMBERING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[0-9]+[a-z]*(?:\^[0-9a-z]+)?\.(?:\s|$)").unwrap());

/// Guesses whether unit titles precede the unit numbers in `text`.
///
/// `text` is split into chunks at blank lines. When the first line of the second chunk
/// starts with bare numbering (`12.`) and the first chunk's does not, the first chunk reads
/// as a title: returns true. When the first chunk starts with numbering, returns false.
///
/// When neither of the first two chunks starts with numbering, titles may sit directly
/// above their numbers. Chunks shaped `title / 12. text` are then weighed against chunks
/// that open with a number, and titles win only with a clear majority (more than 1.25 to 1).
/// Empty input returns false.
///
/// Callers strip level-0 keywords before asking, so `Art. 1. foo` is seen as `1. foo`.
pub fn guess_section_number_after_title(text: &str) -> bool {
    let chunks = chunks(text);
    let numbered = |chunk: Option<&Vec<&str>>| {
        chunk
            .and_then(|lines| lines.first())
            .is_some_and(|line| BARE_NUMBERING.is_match(line))
    };
    let first = numbered(chunks.first());
    let second = numbered(chunks.get(1));
    if first || second {
        return !first && second;
    }

    let titled = chunks
        .iter()
        .filter(|lines| {
            lines.len() > 1
                && !BARE_NUMBERING.is_match(lines[0])
                && BARE_NUMBERING.is_match(lines[1])
        })
        .count();
    let bare = chunks.iter().filter(|lines| numbered(Some(*lines))).count();
    titled > 0 && titled * 4 > bare * 5
}

/// Runs of non-blank lines.
fn chunks(text: &str) -> Vec<Vec<&str>> {
    let mut chunks = Vec::new();
    let mut current = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
