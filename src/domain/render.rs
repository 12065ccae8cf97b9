//! Pull request title and body rendering

use std::fmt::Write as _;

use super::pipeline::{DESCRIPTION, DOCUMENTATION, POST_DEPLOYMENT, TESTS, TICKET, TYPE};
use super::question::{AnswerRecord, PR_TYPES};

/// Turns collected answers into the PR title and body
pub trait PrRenderer {
    fn render_title(&self, answers: &AnswerRecord) -> String;
    fn render_body(&self, answers: &AnswerRecord) -> String;
}

/// Default ticket link; `{ticket}` is replaced by the ticket identifier
pub const DEFAULT_TICKET_URL: &str = "https://youtrack.example.com/issue/{ticket}";

/// Markdown checklist body built from the built-in questions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistRenderer {
    ticket_url: String,
}

impl Default for ChecklistRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_TICKET_URL)
    }
}

impl ChecklistRenderer {
    #[must_use]
    pub fn new(ticket_url: &str) -> Self {
        Self {
            ticket_url: ticket_url.to_string(),
        }
    }

    fn ticket_link(&self, ticket: &str) -> String {
        if ticket.is_empty() {
            return String::new();
        }
        format!("[{ticket}]({})", self.ticket_url.replace("{ticket}", ticket))
    }
}

const fn check(checked: bool) -> char {
    if checked {
        'x'
    } else {
        ' '
    }
}

impl PrRenderer for ChecklistRenderer {
    fn render_title(&self, answers: &AnswerRecord) -> String {
        let description = answers.text(DESCRIPTION);
        match answers.text(TICKET) {
            "" => description.to_string(),
            ticket => format!("[{ticket}] {description}"),
        }
    }

    fn render_body(&self, answers: &AnswerRecord) -> String {
        let selected = answers.list(TYPE);

        let mut body = String::from("\n# What type of PR is this? (check all applicable)\n");
        for (label, value) in PR_TYPES {
            let checked = selected.iter().any(|item| item == value);
            let _ = writeln!(body, "- [{}] {label}", check(checked));
        }

        // Some(true) added, Some(false) need help, None not needed
        let tests = answers.flag(TESTS);
        let documentation = answers.text(DOCUMENTATION);

        let _ = write!(
            body,
            "
## Description

{description}

## Related Tickets & Documents

{ticket}

## Mobile & Desktop Screenshots/Recordings

Add images or videos

## Added tests?

- [{tests_added}] 👍 yes
- [{tests_not_needed}] 🙅 no, because they aren't needed
- [{tests_need_help}] 🙋 no, because I need help

## Added to documentation?

- [{doc_readme}] 📜 README.md
- [{doc_notion}] 📓 notion docs
- [{doc_none}] 🙅 no documentation needed

## [optional] Are there any post-deployment tasks we need to perform?
{post_deployment}
",
            description = answers.text(DESCRIPTION),
            ticket = self.ticket_link(answers.text(TICKET)),
            tests_added = check(tests == Some(true)),
            tests_not_needed = check(tests.is_none()),
            tests_need_help = check(tests == Some(false)),
            doc_readme = check(documentation == "readme"),
            doc_notion = check(documentation == "notion"),
            doc_none = check(documentation == "nodoc"),
            post_deployment = answers.text(POST_DEPLOYMENT),
        );

        body
    }
}

/// Title/body templates from configuration
///
/// `{key}` is replaced by the answer stored under `key`. Placeholders that
/// name no answer are left as they are. When a template is not configured
/// the fallback renderer is used for that part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRenderer<R> {
    title: Option<String>,
    body: Option<String>,
    fallback: R,
}

impl<R: PrRenderer> TemplateRenderer<R> {
    pub const fn new(title: Option<String>, body: Option<String>, fallback: R) -> Self {
        Self {
            title,
            body,
            fallback,
        }
    }
}

impl<R: PrRenderer> PrRenderer for TemplateRenderer<R> {
    fn render_title(&self, answers: &AnswerRecord) -> String {
        self.title.as_deref().map_or_else(
            || self.fallback.render_title(answers),
            |template| expand(template, answers),
        )
    }

    fn render_body(&self, answers: &AnswerRecord) -> String {
        self.body.as_deref().map_or_else(
            || self.fallback.render_body(answers),
            |template| expand(template, answers),
        )
    }
}

/// Replace `{key}` placeholders with answers
pub fn expand(template: &str, answers: &AnswerRecord) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        output.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let replaced = after.find('}').and_then(|close| {
            let key = &after[..close];
            answers.get(key).map(|value| (value.to_string(), close))
        });

        if let Some((value, close)) = replaced {
            output.push_str(&value);
            rest = &after[close + 1..];
        } else {
            output.push('{');
            rest = after;
        }
    }

    output.push_str(rest);
    output
}
