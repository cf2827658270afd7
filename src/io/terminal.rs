/// Text sink for everything the machine prints. Write-only.
pub trait Terminal {
    fn print(&mut self, text: &str);

    fn println(&mut self, text: &str) {
        self.print(text);
        self.print("\n");
    }

    /// Error reports; front ends may style these.
    fn error(&mut self, text: &str) {
        self.println(text);
    }

    fn clear(&mut self) {}
}

/// Collects output in memory.
#[derive(Debug, Default, Clone)]
pub struct Transcript {
    buffer: String,
}

impl Transcript {
    pub fn new() -> Transcript {
        Transcript::default()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Returns everything printed since the last take.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }
}

impl Terminal for Transcript {
    fn print(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn clear(&mut self) {
        self.buffer.clear();
    }
}
