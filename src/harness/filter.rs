//! gtest-style test name filter: `POSITIVE[-NEGATIVE]`, each side a
//! `:`-separated list of globs matched against the full `Suite.Name`.

use regex::Regex;

#[derive(Debug, Clone, Default)]
pub struct TestFilter {
    positive: Vec<Regex>,
    negative: Vec<Regex>,
    source: Option<String>,
}

impl TestFilter {
    /// Parses a filter expression. An empty positive side matches everything.
    pub fn parse(expr: &str) -> Self {
        let (positive, negative) = match expr.split_once('-') {
            Some((pos, neg)) => (pos, neg),
            None => (expr, ""),
        };
        Self {
            positive: compile_patterns(positive),
            negative: compile_patterns(negative),
            source: Some(expr.to_string()),
        }
    }

    pub fn matches(&self, full_name: &str) -> bool {
        let included =
            self.positive.is_empty() || self.positive.iter().any(|re| re.is_match(full_name));
        included && !self.negative.iter().any(|re| re.is_match(full_name))
    }

    /// The expression this filter was parsed from.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

fn compile_patterns(list: &str) -> Vec<Regex> {
    list.split(':')
        .filter(|p| !p.is_empty())
        .filter_map(|p| Regex::new(&glob_to_regex(p)).ok())
        .collect()
}

/// Anchored regex for a glob with `*` and `?`.
fn glob_to_regex(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len() + 8);
    out.push('^');
    for c in glob.chars() {
        match c {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            _ => out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }
    out.push('$');
    out
}
