//! Ordered question list for one pull request
//!
//! Everything a question shows (choices, defaults) is computed from the
//! branch inventory before prompting starts. No question depends on an
//! earlier answer.

use std::collections::HashSet;

use anyhow::Result;

use super::branch::{BranchInventory, BranchName};
use super::question::{
    branch_category, default_choice_index, pr_type_choices, AnswerValue, Choice,
    QuestionDescriptor,
};
use crate::error::PiarError;

pub const DRAFT: &str = "draft";
pub const BASE: &str = "base";
pub const COMPARE: &str = "compare";
pub const TYPE: &str = "type";
pub const DESCRIPTION: &str = "description";
pub const TICKET: &str = "ticket";
pub const TESTS: &str = "tests";
pub const DOCUMENTATION: &str = "documentation";
pub const POST_DEPLOYMENT: &str = "postDeployment";

/// Keys owned by the branch/draft questions; configured questions cannot reuse them
pub const RESERVED_KEYS: [&str; 3] = [DRAFT, BASE, COMPARE];

/// Build the full pipeline: draft, base and compare questions followed by
/// `extra` (configured questions) or the built-in PR questions
///
/// # Errors
/// - [`PiarError::NoCurrentBranch`] if the inventory has no HEAD marker
/// - [`PiarError::EmptyInventory`] if there is no branch to use as base
/// - keys are not unique, or a default is not one of its choices
pub fn build_pipeline(
    inventory: &BranchInventory,
    extra: Option<&[QuestionDescriptor]>,
) -> Result<Vec<QuestionDescriptor>> {
    let current = inventory.current()?;
    let base_branches = inventory.selectable();
    if base_branches.is_empty() {
        return Err(PiarError::EmptyInventory.into());
    }
    let compare_branches = inventory.compare_candidates()?;

    let mut questions = vec![
        QuestionDescriptor::toggle(DRAFT, "Is this a draft?", false),
        QuestionDescriptor::autocomplete(
            BASE,
            "Choose your base branch",
            branch_choices(&base_branches),
        ),
        QuestionDescriptor::autocomplete(
            COMPARE,
            "Choose your compare branch",
            branch_choices(&compare_branches),
        )
        .with_default(AnswerValue::text(current.as_str())),
    ];

    match extra {
        Some(extra) => questions.extend_from_slice(extra),
        None => questions.extend(default_questions(current)),
    }

    validate(&questions)?;
    Ok(questions)
}

/// Built-in questions asked after the branch questions
pub fn default_questions(current: &BranchName) -> Vec<QuestionDescriptor> {
    let types = pr_type_choices();
    let initial_type = default_choice_index(&types, branch_category(current.as_str()))
        .map(|index| AnswerValue::List(vec![types[index].value.to_string()]));

    let mut type_question = QuestionDescriptor::multi_select(
        TYPE,
        "What type of PR is this? (check all applicable)",
        types,
    );
    type_question.default = initial_type;

    vec![
        type_question,
        QuestionDescriptor::text(DESCRIPTION, "Description"),
        QuestionDescriptor::text(TICKET, "Related Tickets & Documents"),
        QuestionDescriptor::select(
            TESTS,
            "Added tests?",
            vec![
                Choice::new("👍 yes", AnswerValue::Bool(true)),
                Choice::new("🙋 no, because I need help", AnswerValue::Bool(false)),
                Choice::new("🙅 no, because they are not needed", AnswerValue::Null),
            ],
        )
        .with_default(AnswerValue::Null),
        QuestionDescriptor::select(
            DOCUMENTATION,
            "Added to documentation?",
            vec![
                Choice::new("📜 README.md", AnswerValue::text("readme")),
                Choice::new("📓 notion docs", AnswerValue::text("notion")),
                Choice::new("🙅 no documentation needed", AnswerValue::text("nodoc")),
            ],
        )
        .with_default(AnswerValue::text("nodoc")),
        QuestionDescriptor::text(
            POST_DEPLOYMENT,
            "[optional] Are there any post-deployment tasks we need to perform?",
        ),
    ]
}

/// Check that keys are unique and every default refers to a choice
///
/// # Errors
/// Returns an error naming the first offending key
pub fn validate(questions: &[QuestionDescriptor]) -> Result<()> {
    let mut seen = HashSet::new();
    for question in questions {
        if !seen.insert(question.key.as_str()) {
            anyhow::bail!("Duplicate question key: {}", question.key);
        }
        if question.kind.has_choices() && question.choices.is_empty() {
            anyhow::bail!("Question '{}' has no choices", question.key);
        }
        if !question.default_is_valid() {
            anyhow::bail!(
                "Default of question '{}' is not one of its choices",
                question.key
            );
        }
    }
    Ok(())
}

/// Validate questions supplied by configuration
///
/// # Errors
/// Same as [`validate`], plus reuse of a key in [`RESERVED_KEYS`]
pub fn validate_extra(questions: &[QuestionDescriptor]) -> Result<()> {
    if let Some(question) = questions
        .iter()
        .find(|question| RESERVED_KEYS.contains(&question.key.as_str()))
    {
        anyhow::bail!("Question key '{}' is reserved", question.key);
    }
    validate(questions)
}

fn branch_choices(branches: &[BranchName]) -> Vec<Choice> {
    branches
        .iter()
        .map(|branch| Choice::new(branch.as_str(), AnswerValue::text(branch.as_str())))
        .collect()
}
