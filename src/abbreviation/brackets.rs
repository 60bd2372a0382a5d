// WHY: Lexical extraction of `(token)` candidates without a regex engine
// Equivalent to matching `\(([A-Za-z0-9_]+)\)` left to right, non-overlapping

/// Cheap pre-filter: a line can only define an abbreviation if it has both
/// an opening and a closing round bracket somewhere.
pub fn has_round_brackets(line: &str) -> bool {
    line.contains('(') && line.contains(')')
}

fn is_token_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Iterator over substrings enclosed in `(` `)` whose content is only ASCII
/// letters, digits and underscores. Brackets are not balanced: nesting is not
/// recognised, only `(` immediately followed by a token and then `)`.
#[derive(Debug, Clone)]
pub struct BracketedSubstrings<'a> {
    line: &'a str,
    pos: usize,
}

impl<'a> Iterator for BracketedSubstrings<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.line.as_bytes();

        while let Some(found) = self.line[self.pos..].find('(') {
            let start = self.pos + found + 1;
            let mut end = start;
            while end < bytes.len() && is_token_byte(bytes[end]) {
                end += 1;
            }

            if end > start && end < bytes.len() && bytes[end] == b')' {
                self.pos = end + 1;
                // All scanned bytes are ASCII, so both ends sit on char boundaries
                return Some(&self.line[start..end]);
            }

            // Retry from the byte after this `(`, like a regex scan would
            self.pos = start;
        }

        self.pos = self.line.len();
        None
    }
}

/// All bracketed token candidates of `line`, in order of appearance.
pub fn bracketed_substrings(line: &str) -> BracketedSubstrings<'_> {
    BracketedSubstrings { line, pos: 0 }
}
