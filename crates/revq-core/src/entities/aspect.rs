use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One Likert-style evaluation question.
///
/// `label` names the results column (`<reviewer>/<label>`), `prompt` is the
/// question shown to the reviewer.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Aspect {
    pub label: String,
    pub prompt: String,
    pub options: Vec<String>,
}

impl Aspect {
    #[must_use]
    pub fn new(label: &str, prompt: &str, options: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            prompt: prompt.to_string(),
            options: options.iter().map(|o| (*o).to_string()).collect(),
        }
    }

    /// Position of `value` in the option list.
    #[must_use]
    pub fn option_index(&self, value: &str) -> Option<usize> {
        self.options.iter().position(|o| o == value)
    }

    /// Resolve user input to an option: a 1-based index or the exact option text.
    #[must_use]
    pub fn resolve(&self, raw: &str) -> Option<&str> {
        let raw = raw.trim();
        if let Some(idx) = self.option_index(raw) {
            return Some(&self.options[idx]);
        }
        raw.parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|idx| self.options.get(idx))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relevance() -> Aspect {
        Aspect::new(
            "Aspect 1",
            "How relevant is the research problem?",
            &["1 - Very low", "2 - Low", "3 - Neutral", "4 - High", "5 - Very high"],
        )
    }

    #[test]
    fn resolves_by_index_and_text() {
        let aspect = relevance();
        assert_eq!(aspect.resolve("1"), Some("1 - Very low"));
        assert_eq!(aspect.resolve(" 5 "), Some("5 - Very high"));
        assert_eq!(aspect.resolve("3 - Neutral"), Some("3 - Neutral"));
    }

    #[test]
    fn rejects_out_of_range_and_unknown() {
        let aspect = relevance();
        assert_eq!(aspect.resolve("0"), None);
        assert_eq!(aspect.resolve("6"), None);
        assert_eq!(aspect.resolve("excellent"), None);
    }
}
