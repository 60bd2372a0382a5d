// Test fixtures with known LaTeX-style documents and expected abbreviations
// WHY: Golden testing requires deterministic input/output pairs for validation

/// Paper introduction defining several abbreviations
pub const INTRO_TEX: &str = r#"\section{Introduction}
The British Broadcasting Corporation (BBC) reported it.
Our work follows the
Natural Language Processing (NLP) tradition and
uses Uniform Resource Locators (URLs) throughout.
An unrelated remark (see Fig. 3) and an example (e.g. NASA).
...see the North-Atlantic Treaty Organization (NATO) charter.
Some text (XYZ) without a definition.
"#;

/// Expected (short, long, line) triples for INTRO_TEX, in registry order
pub const INTRO_EXPECTED: &[(&str, Option<&str>, usize)] = &[
    ("BBC", Some("British Broadcasting Corporation "), 2),
    ("NLP", Some("Natural Language Processing "), 4),
    ("URLs", Some("Uniform Resource Locators "), 5),
    ("NATO", Some("North-Atlantic Treaty Organization "), 7),
    ("XYZ", None, 8),
];

/// Second chapter: redefines BBC (ignored) and adds WHO
pub const CHAPTER_TEX: &str = r#"\chapter{Results}
Again the British Broadcasting Corporation (BBC) is cited.
The World Health Organization (WHO) agreed.
"#;
