//! Question descriptors, collected answers and default derivation
#![allow(clippy::must_use_candidate)]

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

/// Value of a single answer or choice
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Bool(bool),
    Text(String),
    List(Vec<String>),
    #[default]
    Null,
}

impl AnswerValue {
    pub fn text(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Plain rendering used by title/body templates
impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(true) => f.write_str("yes"),
            Self::Bool(false) => f.write_str("no"),
            Self::Text(text) => f.write_str(text),
            Self::List(items) => f.write_str(&items.join(", ")),
            Self::Null => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    /// yes/no toggle
    Toggle,
    Select,
    #[serde(alias = "multi-select")]
    MultiSelect,
    Text,
    /// Single choice with type-to-filter
    Autocomplete,
}

impl QuestionKind {
    pub const fn has_choices(self) -> bool {
        matches!(self, Self::Select | Self::MultiSelect | Self::Autocomplete)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Choice {
    pub label: String,
    #[serde(default)]
    pub value: AnswerValue,
}

impl Choice {
    pub fn new(label: &str, value: AnswerValue) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

/// One interactive question
///
/// `default` is a value, not an index. For select kinds it must be one of
/// the choice values; for multi-select it may be a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuestionDescriptor {
    pub kind: QuestionKind,
    pub key: String,
    pub message: String,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub default: Option<AnswerValue>,
}

impl QuestionDescriptor {
    pub fn toggle(key: &str, message: &str, default: bool) -> Self {
        Self::new(QuestionKind::Toggle, key, message, Vec::new())
            .with_default(AnswerValue::Bool(default))
    }

    pub fn text(key: &str, message: &str) -> Self {
        Self::new(QuestionKind::Text, key, message, Vec::new())
    }

    pub fn select(key: &str, message: &str, choices: Vec<Choice>) -> Self {
        Self::new(QuestionKind::Select, key, message, choices)
    }

    pub fn multi_select(key: &str, message: &str, choices: Vec<Choice>) -> Self {
        Self::new(QuestionKind::MultiSelect, key, message, choices)
    }

    pub fn autocomplete(key: &str, message: &str, choices: Vec<Choice>) -> Self {
        Self::new(QuestionKind::Autocomplete, key, message, choices)
    }

    fn new(kind: QuestionKind, key: &str, message: &str, choices: Vec<Choice>) -> Self {
        Self {
            kind,
            key: key.to_string(),
            message: message.to_string(),
            choices,
            default: None,
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: AnswerValue) -> Self {
        self.default = Some(default);
        self
    }

    /// Position of `value` among this question's choices
    pub fn choice_index(&self, value: &AnswerValue) -> Option<usize> {
        self.choices.iter().position(|choice| &choice.value == value)
    }

    /// Whether the default refers to an existing choice (always true for
    /// kinds without choices)
    pub fn default_is_valid(&self) -> bool {
        let Some(default) = &self.default else {
            return true;
        };

        match (self.kind, default) {
            (QuestionKind::MultiSelect, AnswerValue::List(values)) => values
                .iter()
                .all(|value| self.choice_index(&AnswerValue::text(value)).is_some()),
            (kind, value) if kind.has_choices() => self.choice_index(value).is_some(),
            (QuestionKind::Toggle, value) => matches!(value, AnswerValue::Bool(_)),
            (_, value) => matches!(value, AnswerValue::Text(_)),
        }
    }
}

/// Answers keyed by question key
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnswerRecord {
    values: BTreeMap<String, AnswerValue>,
}

impl AnswerRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, value: AnswerValue) {
        self.values.insert(key.to_string(), value);
    }

    #[must_use]
    pub fn with(mut self, key: &str, value: AnswerValue) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&AnswerValue> {
        self.values.get(key)
    }

    /// Text answer, empty when absent or not text
    pub fn text(&self, key: &str) -> &str {
        match self.get(key) {
            Some(AnswerValue::Text(text)) => text,
            _ => "",
        }
    }

    /// Toggle answer; `None` for null or absent
    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.get(key) {
            Some(AnswerValue::Bool(flag)) => Some(*flag),
            _ => None,
        }
    }

    /// Multi-select answer, empty when absent
    pub fn list(&self, key: &str) -> &[String] {
        match self.get(key) {
            Some(AnswerValue::List(items)) => items,
            _ => &[],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }
}

/// PR categories offered for multi-selection, in display order
pub const PR_TYPES: [(&str, &str); 11] = [
    ("🍕 Feature", "feature"),
    ("🐛 Hotfix", "hotfix"),
    ("📝 Readme update", "readme"),
    ("🎨 Style", "style"),
    ("🧑‍💻 Code Refactor", "refactor"),
    ("🔥 Performance Improvements", "perf"),
    ("✅ Test", "test"),
    ("🤖 Build", "build"),
    ("🔁 CI", "ci"),
    ("📦 Chore (Release)", "chore"),
    ("⏩ Revert", "revert"),
];

pub fn pr_type_choices() -> Vec<Choice> {
    PR_TYPES
        .iter()
        .map(|(label, value)| Choice::new(label, AnswerValue::text(value)))
        .collect()
}

/// Part of a branch name before the first `/`, or the whole name
///
/// `feature/login` is in category `feature`. The result is only a lookup
/// key and is not checked against any vocabulary.
pub fn branch_category(branch: &str) -> &str {
    branch.split_once('/').map_or(branch, |(category, _)| category)
}

/// Position of `key` among the choice values of `vocabulary`
pub fn default_choice_index(vocabulary: &[Choice], key: &str) -> Option<usize> {
    vocabulary
        .iter()
        .position(|choice| matches!(&choice.value, AnswerValue::Text(value) if value == key))
}
