#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
use anyhow::{Context, Result};
use dialoguer::theme::{ColorfulTheme, SimpleTheme, Theme};
use dialoguer::{Confirm, FuzzySelect, Input, MultiSelect, Select};

use crate::domain::question::{AnswerRecord, AnswerValue, QuestionDescriptor, QuestionKind};

/// Interactive question collector
pub trait Prompter {
    /// Ask every question in order and return all answers at once
    ///
    /// Returns `Ok(None)` when the user cancels a toggle or select question.
    /// Free-text questions cannot be cancelled; Ctrl-C ends the process.
    fn collect(&self, questions: &[QuestionDescriptor]) -> Result<Option<AnswerRecord>>;
}

/// Terminal prompts backed by dialoguer
#[derive(Debug)]
pub struct DialoguerPrompter {
    colorful: bool,
}

impl DialoguerPrompter {
    pub const fn new(colorful: bool) -> Self {
        Self { colorful }
    }
}

impl Prompter for DialoguerPrompter {
    fn collect(&self, questions: &[QuestionDescriptor]) -> Result<Option<AnswerRecord>> {
        let colorful = ColorfulTheme::default();
        let simple = SimpleTheme;
        let theme: &dyn Theme = if self.colorful { &colorful } else { &simple };

        let mut answers = AnswerRecord::new();
        for question in questions {
            let Some(value) = ask(theme, question)
                .with_context(|| format!("Failed to read answer for '{}'", question.key))?
            else {
                return Ok(None);
            };
            answers.insert(&question.key, value);
        }

        Ok(Some(answers))
    }
}

fn ask(theme: &dyn Theme, question: &QuestionDescriptor) -> Result<Option<AnswerValue>> {
    let labels: Vec<&str> = question
        .choices
        .iter()
        .map(|choice| choice.label.as_str())
        .collect();

    let answer = match question.kind {
        QuestionKind::Toggle => Confirm::with_theme(theme)
            .with_prompt(&question.message)
            .default(matches!(question.default, Some(AnswerValue::Bool(true))))
            .interact_opt()?
            .map(AnswerValue::Bool),
        QuestionKind::Select => {
            let mut select = Select::with_theme(theme)
                .with_prompt(&question.message)
                .items(&labels);
            if let Some(index) = default_index(question) {
                select = select.default(index);
            }
            select.interact_opt()?.map(|index| chosen(question, index))
        }
        QuestionKind::Autocomplete => {
            let mut select = FuzzySelect::with_theme(theme)
                .with_prompt(&question.message)
                .items(&labels);
            if let Some(index) = default_index(question) {
                select = select.default(index);
            }
            select.interact_opt()?.map(|index| chosen(question, index))
        }
        QuestionKind::MultiSelect => MultiSelect::with_theme(theme)
            .with_prompt(&question.message)
            .items(&labels)
            .defaults(&multi_select_defaults(question))
            .interact_opt()?
            .map(|indices| chosen_list(question, &indices)),
        // No interact_opt for Input
        QuestionKind::Text => {
            let mut input = Input::<String>::with_theme(theme)
                .with_prompt(&question.message)
                .allow_empty(true);
            if let Some(AnswerValue::Text(default)) = &question.default {
                input = input.default(default.clone());
            }
            Some(AnswerValue::Text(input.interact_text()?))
        }
    };

    Ok(answer)
}

/// Cursor position for single-choice questions
pub fn default_index(question: &QuestionDescriptor) -> Option<usize> {
    question
        .default
        .as_ref()
        .and_then(|default| question.choice_index(default))
}

/// Pre-checked items for multi-choice questions
pub fn multi_select_defaults(question: &QuestionDescriptor) -> Vec<bool> {
    let selected: Vec<String> = match &question.default {
        Some(AnswerValue::List(values)) => values.clone(),
        Some(AnswerValue::Text(value)) => vec![value.clone()],
        _ => Vec::new(),
    };

    question
        .choices
        .iter()
        .map(|choice| selected.contains(&choice.value.to_string()))
        .collect()
}

fn chosen(question: &QuestionDescriptor, index: usize) -> AnswerValue {
    question.choices[index].value.clone()
}

fn chosen_list(question: &QuestionDescriptor, indices: &[usize]) -> AnswerValue {
    AnswerValue::List(
        indices
            .iter()
            .map(|&index| question.choices[index].value.to_string())
            .collect(),
    )
}
