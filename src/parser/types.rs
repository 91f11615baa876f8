use super::markers::Marker;

/// One line of captured compiler output, terminator included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    /// One-based position in the captured output.
    pub number: usize,
}

impl Line {
    /// Text without the trailing `\n` / `\r\n`, used for marker matching.
    pub fn content(&self) -> &str {
        self.text.trim_end_matches(['\r', '\n'])
    }
}

/// What the splitter does with a line after the zone transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Discard,
    Boundary(Marker),
    Declaration,
    Statement,
}
