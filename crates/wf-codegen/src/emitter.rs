/// Line-oriented output buffer with brace-driven indentation.
#[derive(Debug, Default)]
pub struct Emitter {
    code: String,
    indent: usize,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&mut self, line: &str) {
        for _ in 0..self.indent {
            self.code.push_str("    ");
        }
        self.code.push_str(line);
        self.code.push('\n');
    }

    /// Push a fragment of target code on its own line. A leading `}` closes
    /// one level of indentation and a trailing `{` opens one.
    pub fn push_code(&mut self, code: &str) {
        let code = code.trim();
        if code.starts_with('}') {
            self.indent = self.indent.saturating_sub(1);
        }
        self.push_line(code);
        if code.ends_with('{') {
            self.indent += 1;
        }
    }

    pub fn finish(self) -> String {
        self.code
    }
}

/// `raw` as a Rust string literal.
pub fn string_literal(raw: &str) -> String {
    format!("\"{}\"", raw.escape_default())
}
