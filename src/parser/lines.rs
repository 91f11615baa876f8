use super::types::Line;

/// Split captured output into lines without touching a single byte.
///
/// A final line lacking a terminator is kept as is.
pub fn split_lines(source: &str) -> Vec<Line> {
    source
        .split_inclusive('\n')
        .enumerate()
        .map(|(i, text)| Line {
            text: text.to_string(),
            number: i + 1,
        })
        .collect()
}
