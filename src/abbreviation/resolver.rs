// WHY: Long form reconstruction by matching short form letters against the
// words immediately preceding it, both walked from the end

/// Words that are skipped while walking backwards. The empty word appears
/// when the text contains repeated spaces.
const SKIPPABLE_WORDS: &[&str] = &["", "(", ")", ".", ",", ";"];

/// Letters of the short form that must be matched, with a trailing plural
/// `s` dropped (`URLs` -> `URL`).
fn letter_sequence(short: &str) -> Vec<char> {
    let mut letters: Vec<char> = short.chars().collect();
    if letters.last() == Some(&'s') {
        letters.pop();
    }
    letters
}

/// Text that may contain the long form: the previous line followed by the
/// part of the current line before the short form. Lines arrive without
/// their terminators, so a space stands in for the line break.
fn search_text(previous_line: &str, before_short: &str) -> String {
    if previous_line.is_empty() {
        before_short.to_string()
    } else {
        format!("{previous_line} {before_short}")
    }
}

/// A word matches a letter if it starts with the letter as written or with
/// its lowercase form.
fn starts_with_letter(word: &str, letter: char) -> bool {
    word.starts_with(letter) || word.starts_with(letter.to_ascii_lowercase())
}

/// Try to reconstruct the long form of `short` as used on `line`.
///
/// `previous_line` is the line before `line`, or `""` for the first line of a
/// file. Returns `None` when any letter fails to match or the words run out
/// before every letter is consumed; a partial expansion is never returned.
///
/// A hyphenated word consumes one letter per hyphen-separated part, each part
/// matched against its own letter, so `North-Atlantic` covers `N` and `A`.
/// The word cursor moves back by the same part count, so the word right
/// before a two-part compound is never consulted.
/// Matched words are emitted in reading order, each followed by one space.
pub fn resolve_long_form(line: &str, previous_line: &str, short: &str) -> Option<String> {
    let offset = line.find(short)?;
    let letters = letter_sequence(short);
    if letters.is_empty() {
        return None;
    }

    let text = search_text(previous_line, &line[..offset]);
    let words: Vec<&str> = text.split(' ').collect();

    let mut letters_left = letters.len();
    let mut words_left = words.len();
    let mut matched: Vec<&str> = Vec::with_capacity(letters.len());

    while letters_left > 0 && words_left > 0 {
        while words_left > 1 && SKIPPABLE_WORDS.contains(&words[words_left - 1]) {
            words_left -= 1;
        }

        let word = words[words_left - 1];
        let parts: Vec<&str> = word.split('-').collect();
        if parts.len() > letters_left {
            return None;
        }

        let expected = &letters[letters_left - parts.len()..letters_left];
        let all_match = parts
            .iter()
            .zip(expected)
            .all(|(part, &letter)| starts_with_letter(part, letter));
        if !all_match {
            return None;
        }

        matched.push(word);
        letters_left -= parts.len();
        // Compound words step the word cursor by their part count as well
        words_left = words_left.saturating_sub(parts.len());
    }

    if letters_left > 0 {
        return None;
    }

    Some(matched.iter().rev().map(|word| format!("{word} ")).collect())
}
