use std::fmt::Write as _;

/// Collects conformance results and renders them as TAP version 14.
#[derive(Default)]
pub struct Tap {
    results: Vec<Outcome>,
}

struct Outcome {
    name: String,
    failure: Option<String>,
}

impl Tap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ok(&mut self, name: impl Into<String>) {
        self.results.push(Outcome {
            name: name.into(),
            failure: None,
        });
    }

    pub fn not_ok(&mut self, name: impl Into<String>, reason: impl Into<String>) {
        self.results.push(Outcome {
            name: name.into(),
            failure: Some(reason.into()),
        });
    }

    pub fn failure_count(&self) -> usize {
        self.results.iter().filter(|r| r.failure.is_some()).count()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "TAP version 14");
        let _ = writeln!(out, "1..{}", self.results.len());
        for (i, result) in self.results.iter().enumerate() {
            match &result.failure {
                None => {
                    let _ = writeln!(out, "ok {} - {}", i + 1, result.name);
                }
                Some(reason) => {
                    let _ = writeln!(out, "not ok {} - {}", i + 1, result.name);
                    for line in reason.lines() {
                        let _ = writeln!(out, "  # {}", line);
                    }
                }
            }
        }
        let failed = self.failure_count();
        let _ = writeln!(out, "# tests {}", self.results.len());
        let _ = writeln!(out, "# pass  {}", self.results.len() - failed);
        let _ = write!(out, "# fail  {}", failed);
        out
    }

    /// Print to stdout.
    pub fn finish(self) {
        println!("{}", self.render());
    }
}
