//! Indentation-aware output buffer.

/// Line-oriented text sink. One per emitted file; never shared across threads.
#[derive(Debug, Clone)]
pub struct LanguageWriter {
    output: String,
    indent: usize,
    unit: &'static str,
}

impl Default for LanguageWriter {
    fn default() -> Self {
        Self::new("    ")
    }
}

impl LanguageWriter {
    pub fn new(unit: &'static str) -> Self {
        Self {
            output: String::new(),
            indent: 0,
            unit,
        }
    }

    pub fn increase_indent(&mut self) {
        self.indent += 1;
    }

    pub fn decrease_indent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    pub fn indent_level(&self) -> usize {
        self.indent
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.output.push_str(self.unit);
        }
    }

    /// Write one indented line. Empty lines carry no trailing whitespace.
    pub fn write_line(&mut self, line: impl AsRef<str>) {
        let line = line.as_ref();
        if !line.is_empty() {
            self.write_indent();
            self.output.push_str(line);
        }
        self.output.push('\n');
    }

    pub fn write_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.write_line(line);
        }
    }

    pub fn blank_line(&mut self) {
        self.output.push('\n');
    }

    /// Write `header`, indent `body`, then write `footer`.
    pub fn block(&mut self, header: impl AsRef<str>, footer: &str, body: impl FnOnce(&mut Self)) {
        self.write_line(header);
        self.increase_indent();
        body(self);
        self.decrease_indent();
        self.write_line(footer);
    }

    pub fn as_str(&self) -> &str {
        &self.output
    }

    pub fn into_string(self) -> String {
        self.output
    }
}
