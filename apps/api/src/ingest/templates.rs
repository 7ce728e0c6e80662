//! Prompt template store: one template and one rule per outreach use case.
//!
//! Built-in texts live in `prompts.rs`. A saved prompt in the prompt library
//! whose `name` equals a use-case name overrides the built-in text.

use mongodb::bson;
use tracing::{debug, warn};

use crate::ingest::prompts::{
    AI_RESEARCH_PROMPT, AI_RESEARCH_RULE, COLD_CALLS_PROMPT, COLD_CALLS_RULE,
    QUESTION_EMAIL_PROMPT, QUESTION_EMAIL_RULE,
};
use crate::models::prompt::PromptTextView;
use crate::repository::{Field, Filter, Repository, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UseCase {
    AiResearch,
    ColdCalls,
    QuestionBasedEmail,
}

impl UseCase {
    /// Research first: the other two templates embed its output.
    pub const GENERATION_ORDER: [UseCase; 3] = [
        UseCase::AiResearch,
        UseCase::ColdCalls,
        UseCase::QuestionBasedEmail,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            UseCase::AiResearch => "AI Research",
            UseCase::ColdCalls => "Cold Calls",
            UseCase::QuestionBasedEmail => "Question Based Email",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    pub template: String,
    pub rule: String,
}

impl PromptTemplate {
    fn new(template: &str, rule: &str) -> Self {
        Self {
            template: template.to_string(),
            rule: rule.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptCatalog {
    ai_research: PromptTemplate,
    cold_calls: PromptTemplate,
    question_based_email: PromptTemplate,
}

impl Default for PromptCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PromptCatalog {
    pub fn builtin() -> Self {
        Self {
            ai_research: PromptTemplate::new(AI_RESEARCH_PROMPT, AI_RESEARCH_RULE),
            cold_calls: PromptTemplate::new(COLD_CALLS_PROMPT, COLD_CALLS_RULE),
            question_based_email: PromptTemplate::new(QUESTION_EMAIL_PROMPT, QUESTION_EMAIL_RULE),
        }
    }

    pub fn get(&self, use_case: UseCase) -> &PromptTemplate {
        match use_case {
            UseCase::AiResearch => &self.ai_research,
            UseCase::ColdCalls => &self.cold_calls,
            UseCase::QuestionBasedEmail => &self.question_based_email,
        }
    }

    fn get_mut(&mut self, use_case: UseCase) -> &mut PromptTemplate {
        match use_case {
            UseCase::AiResearch => &mut self.ai_research,
            UseCase::ColdCalls => &mut self.cold_calls,
            UseCase::QuestionBasedEmail => &mut self.question_based_email,
        }
    }

    /// Replaces the template (and the rule, when non-empty). An empty
    /// template leaves the entry untouched.
    pub fn with_override(mut self, use_case: UseCase, template: &str, rule: &str) -> Self {
        if template.trim().is_empty() {
            return self;
        }
        let entry = self.get_mut(use_case);
        entry.template = template.to_string();
        if !rule.trim().is_empty() {
            entry.rule = rule.to_string();
        }
        self
    }

    /// Built-ins overlaid with any same-named prompts from the prompt library.
    /// A stored prompt that cannot be decoded is skipped; a store failure is not.
    pub async fn load(prompts: &dyn Repository) -> Result<Self, StoreError> {
        let mut catalog = Self::builtin();
        for use_case in UseCase::GENERATION_ORDER {
            let Some(doc) = prompts.find_one(Filter::eq(Field::Name, use_case.name())).await? else {
                continue;
            };
            match bson::from_document::<PromptTextView>(doc) {
                Ok(view) => {
                    debug!("Using stored prompt for '{}'", use_case.name());
                    catalog = catalog.with_override(use_case, &view.prompt, &view.prompt_rule);
                }
                Err(e) => warn!("Ignoring undecodable stored prompt '{}': {e}", use_case.name()),
            }
        }
        Ok(catalog)
    }
}
