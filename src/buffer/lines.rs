//! Line queries.
//!
//! A line's length includes its terminating newline, if it has one. A buffer
//! that ends in a newline therefore has an empty last line starting at
//! [`size`](TextBuffer::size).

use super::{BufferError, BufferResult, TextBuffer};

impl TextBuffer {
    /// Absolute index of the first character of line `line`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::LineOutOfRange`] if `line >= lines()`.
    pub fn line_start(&self, line: usize) -> BufferResult<usize> {
        self.check_line("line_start", line)?;
        self.start_of(line, "line_start")
    }

    /// Number of characters in line `line`, terminator included.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::LineOutOfRange`] if `line >= lines()`.
    pub fn line_length(&self, line: usize) -> BufferResult<usize> {
        self.check_line("line_length", line)?;
        let start = self.start_of(line, "line_length")?;
        let end = if line + 1 == self.lines {
            self.len
        } else {
            self.start_of(line + 1, "line_length")?
        };
        Ok(end - start)
    }

    /// Line containing the character at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::IndexOutOfRange`] if `index >= size()`.
    pub fn char_to_line(&self, index: usize) -> BufferResult<usize> {
        self.check_index("char_to_line", index)?;
        self.newlines_before(index + 1)
            .ok_or_else(|| self.index_error("char_to_line", index))
    }

    fn start_of(&self, line: usize, op: &'static str) -> BufferResult<usize> {
        if line == 0 {
            return Ok(0);
        }
        self.find_line_boundary(line)
            .ok_or(BufferError::LineOutOfRange {
                op,
                line,
                lines: self.lines,
            })
    }
}

#[cfg(test)]
mod tests {
    use crate::buffer::{BufferError, TextBuffer};

    #[test]
    fn test_single_line() {
        let buf = TextBuffer::new("asdfasdfasdf");
        assert_eq!(buf.line_start(0), Ok(0));
        assert_eq!(buf.line_length(0), Ok(12));
        assert!((0..12).all(|i| buf.char_to_line(i) == Ok(0)));
    }

    #[test]
    fn test_empty_buffer_line_zero() {
        let buf = TextBuffer::default();
        assert_eq!(buf.line_start(0), Ok(0));
        assert_eq!(buf.line_length(0), Ok(0));
        assert!(buf.char_to_line(0).is_err());
    }

    #[test]
    fn test_line_length_counts_terminator() {
        let buf = TextBuffer::new("ab\n\ncd");
        assert_eq!(buf.line_length(0), Ok(3));
        assert_eq!(buf.line_length(1), Ok(1));
        assert_eq!(buf.line_length(2), Ok(2));
    }

    #[test]
    fn test_line_out_of_range() {
        let buf = TextBuffer::new("a\nb");
        assert_eq!(
            buf.line_start(2),
            Err(BufferError::LineOutOfRange {
                op: "line_start",
                line: 2,
                lines: 2
            })
        );
        assert!(matches!(
            buf.line_length(5),
            Err(BufferError::LineOutOfRange { op: "line_length", .. })
        ));
    }

    #[test]
    fn test_char_to_line_out_of_range() {
        let buf = TextBuffer::new("a\nb");
        assert!(matches!(
            buf.char_to_line(3),
            Err(BufferError::IndexOutOfRange { op: "char_to_line", .. })
        ));
    }

    #[test]
    fn test_lines_track_edits() {
        let mut buf = TextBuffer::new("one two three");
        buf.edit(3, '\n').unwrap();
        buf.edit(7, '\n').unwrap();
        assert_eq!(buf.lines(), 3);
        assert_eq!(buf.line_start(1), Ok(4));
        assert_eq!(buf.line_start(2), Ok(8));
        assert_eq!(buf.line_length(2), Ok(5));
        assert_eq!(buf.char_to_line(12), Ok(2));
    }
}
