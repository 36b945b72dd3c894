//! Provenance metadata for loaded values.

use std::fmt;
use std::rc::Rc;

/// Where a compound value was loaded from, rendered as `file:line` in
/// diagnostics. Cheap to clone; the file name is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInfo {
    file: Rc<str>,
    line: u32,
}

impl SourceInfo {
    pub fn new(file: impl Into<Rc<str>>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for SourceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_file_and_line() {
        let info = SourceInfo::new("objects/frog.cfg", 12);
        assert_eq!(info.to_string(), "objects/frog.cfg:12");
    }
}
