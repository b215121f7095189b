//! Line scanning
//!
//! Splits a text into physical lines. Each line keeps its terminator (`\n` or `\r\n`) and the
//! absolute byte offset where it starts, so concatenating the lines gives back the text. The
//! last line may have no terminator.

/// One physical line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub offset: usize,
    pub text: &'a str,
}

impl<'a> Line<'a> {
    /// The line without its terminator.
    pub fn body(&self) -> &'a str {
        let text = self.text;
        let text = text.strip_suffix('\n').unwrap_or(text);
        text.strip_suffix('\r').unwrap_or(text)
    }

    /// The terminator: `"\n"`, `"\r\n"` or `""` for an unterminated last line.
    pub fn terminator(&self) -> &'a str {
        &self.text[self.body().len()..]
    }

    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }
}

/// Iterator over the physical lines of a text.
#[derive(Debug, Clone)]
pub struct LineScanner<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> LineScanner<'a> {
    pub fn new(source: &'a str) -> Self {
        LineScanner { source, pos: 0 }
    }
}

impl<'a> Iterator for LineScanner<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.source.len() {
            return None;
        }
        let rest = &self.source[self.pos..];
        let len = rest.find('\n').map_or(rest.len(), |idx| idx + 1);
        let line = Line {
            offset: self.pos,
            text: &rest[..len],
        };
        self.pos += len;
        Some(line)
    }
}
