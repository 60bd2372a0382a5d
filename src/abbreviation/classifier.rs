// WHY: Heuristic filter separating abbreviations from ordinary parentheticals

/// Prefixes of explanatory parentheticals, matched case-sensitively
const EXPLANATORY_PREFIXES: &[&str] = &["i.e.", "e.g."];

/// Minimum number of uppercase letters for a candidate to count as an abbreviation
const MIN_CAPITAL_LETTERS: usize = 2;

/// Count uppercase ASCII letters anywhere in `text`
pub fn count_capital_letters(text: &str) -> usize {
    text.chars().filter(|c| c.is_ascii_uppercase()).count()
}

/// Decide whether a bracketed substring is plausibly an abbreviation.
///
/// Rejects explanatory text (`i.e.`, `e.g.` after trimming) and anything with
/// fewer than two capital letters. False positives are expected.
pub fn is_abbreviation(candidate: &str) -> bool {
    let trimmed = candidate.trim();
    if EXPLANATORY_PREFIXES
        .iter()
        .any(|prefix| trimmed.starts_with(prefix))
    {
        return false;
    }

    count_capital_letters(candidate) >= MIN_CAPITAL_LETTERS
}
