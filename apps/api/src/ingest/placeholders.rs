//! Placeholder substitution for prompt templates.
//!
//! The token set is closed: every token is a [`Placeholder`] variant and
//! [`value_for`] matches exhaustively, so adding a token without giving it a
//! value does not compile. Tokens are pairwise disjoint (the `**` delimiters
//! guarantee no token contains another), so at any position at most one token
//! matches and the outcome does not depend on token order;
//! `test_tokens_are_pairwise_disjoint` keeps it that way.

use crate::models::record::UserRecord;

/// Substituted when the prospect's role has no stored value proposition.
pub const DEFAULT_VALUE_PROPOSITION: &str = "At Initializ.ai, we provide a unified platform designed to streamline and simplify the entire lifecycle of cloud-native and AI applications. Our solutions address the complexity of managing modern application infrastructure while enhancing security, deployment efficiency, and developer productivity. Whether you're looking to build, secure, deploy, or optimize your applications, Initializ.ai offers an all-in-one platform that reduces operational overhead and accelerates innovation.";

pub const LANGUAGE: &str = "English";
pub const TONE: &str = "Conversational";

/// Who the generated outreach is signed by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderIdentity {
    pub company: String,
    pub first_name: String,
}

impl Default for SenderIdentity {
    fn default() -> Self {
        Self {
            company: "initializ.ai".to_string(),
            first_name: "Yash".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    FirstName,
    Title,
    FullName,
    Experience,
    Location,
    Company,
    LinkedinProfile,
    CompanyWebsiteData,
    ValuePropositions,
    AiResearch,
    Language,
    Tone,
    SenderCompany,
    SenderFirstName,
}

impl Placeholder {
    pub const ALL: [Placeholder; 14] = [
        Placeholder::FirstName,
        Placeholder::Title,
        Placeholder::FullName,
        Placeholder::Experience,
        Placeholder::Location,
        Placeholder::Company,
        Placeholder::LinkedinProfile,
        Placeholder::CompanyWebsiteData,
        Placeholder::ValuePropositions,
        Placeholder::AiResearch,
        Placeholder::Language,
        Placeholder::Tone,
        Placeholder::SenderCompany,
        Placeholder::SenderFirstName,
    ];

    pub const fn token(self) -> &'static str {
        match self {
            Placeholder::FirstName => "**first_name**",
            Placeholder::Title => "**title**",
            Placeholder::FullName => "**Name**",
            Placeholder::Experience => "**Experience**",
            Placeholder::Location => "**Location**",
            Placeholder::Company => "**company**",
            Placeholder::LinkedinProfile => "**linkedin_profile**",
            Placeholder::CompanyWebsiteData => "**company_website_data**",
            Placeholder::ValuePropositions => "**sender_value_propositions**",
            Placeholder::AiResearch => "**AI Research**",
            Placeholder::Language => "**language**",
            Placeholder::Tone => "**tone**",
            Placeholder::SenderCompany => "**sender_company**",
            Placeholder::SenderFirstName => "**sender_first_name**",
        }
    }
}

/// First whitespace-delimited token of the full name, or `""`.
pub fn first_name(full_name: &str) -> &str {
    full_name.split_whitespace().next().unwrap_or("")
}

fn value_for<'a>(
    placeholder: Placeholder,
    record: &'a UserRecord,
    value_proposition: Option<&'a str>,
    sender: &'a SenderIdentity,
) -> &'a str {
    match placeholder {
        Placeholder::FirstName => first_name(&record.name),
        Placeholder::Title => &record.designation,
        Placeholder::FullName => &record.name,
        Placeholder::Experience => &record.experience,
        Placeholder::Location => &record.location,
        Placeholder::Company => &record.company,
        Placeholder::LinkedinProfile => {
            if record.linkedin_data.is_empty() {
                &record.linkedin_url
            } else {
                &record.linkedin_data
            }
        }
        Placeholder::CompanyWebsiteData => &record.company_data,
        Placeholder::ValuePropositions => value_proposition.unwrap_or(DEFAULT_VALUE_PROPOSITION),
        Placeholder::AiResearch => &record.ai_output.ai_research.text,
        Placeholder::Language => LANGUAGE,
        Placeholder::Tone => TONE,
        Placeholder::SenderCompany => &sender.company,
        Placeholder::SenderFirstName => &sender.first_name,
    }
}

/// Replaces every occurrence of every placeholder token in `template`.
///
/// Single left-to-right pass: inserted values are never rescanned, so record
/// data or model output that happens to contain a token stays literal.
/// `value_proposition` is `None` when the role lookup found nothing; the
/// default blurb is used then.
pub fn substitute(
    template: &str,
    record: &UserRecord,
    value_proposition: Option<&str>,
    sender: &SenderIdentity,
) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find("**") {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match Placeholder::ALL.iter().find(|p| tail.starts_with(p.token())) {
            Some(&placeholder) => {
                out.push_str(value_for(placeholder, record, value_proposition, sender));
                rest = &tail[placeholder.token().len()..];
            }
            None => {
                // Step one `*` so a token preceded by a stray `*` still matches.
                out.push('*');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
