//! Byte-offset <-> line/column bookkeeping shared by every language's
//! structured strategy. spec.md §3 wants 1-indexed `line`/`column` fields
//! relative to the original file; tree-sitter hands back 0-indexed
//! `(row, column)` pairs, so every conversion point goes through here to
//! avoid an off-by-one creeping into one language and not another.

pub struct LineIndex {
    /// Byte offset of the start of each line (line 0's start is always 0).
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &[u8]) -> Self {
        let mut line_starts = vec![0usize];
        for (i, &b) in source.iter().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// 1-indexed line number containing `offset`.
    pub fn line_of(&self, offset: usize) -> u32 {
        match self.line_starts.binary_search(&offset) {
            Ok(idx) => (idx + 1) as u32,
            Err(idx) => idx as u32, // idx-1+1 == idx
        }
    }

    pub fn line_start_byte(&self, one_indexed_line: u32) -> usize {
        self.line_starts
            .get((one_indexed_line.saturating_sub(1)) as usize)
            .copied()
            .unwrap_or(0)
    }

    /// The whitespace-only prefix of the line containing `offset`.
    pub fn indent_prefix(&self, source: &[u8], offset: usize) -> String {
        let line = self.line_of(offset);
        let start = self.line_start_byte(line);
        let mut end = start;
        while end < source.len() && (source[end] == b' ' || source[end] == b'\t') {
            end += 1;
        }
        String::from_utf8_lossy(&source[start..end]).into_owned()
    }
}

/// Convert a tree-sitter `Point` (0-indexed row, 0-indexed UTF-8 byte
/// column within the row) into spec.md's 1-indexed `(line, column)`.
pub fn point_to_line_col(point: tree_sitter::Point) -> (u32, u32) {
    (point.row as u32 + 1, point.column as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_of_finds_correct_line() {
        let src = b"abc\ndef\nghi";
        let idx = LineIndex::new(src);
        assert_eq!(idx.line_of(0), 1);
        assert_eq!(idx.line_of(4), 2);
        assert_eq!(idx.line_of(8), 3);
    }

    #[test]
    fn indent_prefix_extracts_leading_whitespace() {
        let src = b"def f():\n    return 1\n";
        let idx = LineIndex::new(src);
        assert_eq!(idx.indent_prefix(src, 13), "    ");
    }
}
