use serde::{Deserialize, Serialize};

const EXACT_WEIGHT: f64 = 1.0;
const PARTIAL_WEIGHT: f64 = 0.6;

/// Controls how skills and tags are normalized before comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    pub case_sensitive: bool,
}

/// A required tag satisfied by containment rather than equality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartialMatch {
    pub required: String,
    pub matched_skill: String,
}

/// Outcome of comparing one candidate's skills to a job's required tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub score: f64,
    pub percentage: f64,
    pub exact_matches: Vec<String>,
    pub partial_matches: Vec<PartialMatch>,
    pub missing_skills: Vec<String>,
    pub total_required: usize,
    pub matched_count: usize,
}

impl SkillMatch {
    fn unmatched(required: Vec<String>) -> Self {
        Self {
            score: 0.0,
            percentage: 0.0,
            exact_matches: Vec::new(),
            partial_matches: Vec::new(),
            total_required: required.len(),
            missing_skills: required,
            matched_count: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagMatch {
    Exact,
    Partial(usize),
}

/// Classifies every required tag as exact, partial, or missing, preserving tag order.
pub fn match_skills<S, T>(
    candidate_skills: &[S],
    required_tags: &[T],
    options: &MatchOptions,
) -> SkillMatch
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    let required: Vec<&str> = required_tags
        .iter()
        .map(|tag| tag.as_ref().trim())
        .filter(|tag| !tag.is_empty())
        .collect();

    let skills: Vec<(&str, String)> = candidate_skills
        .iter()
        .map(|skill| skill.as_ref().trim())
        .filter(|skill| !skill.is_empty())
        .map(|skill| (skill, fold(skill, options)))
        .collect();

    if required.is_empty() || skills.is_empty() {
        return SkillMatch::unmatched(required.into_iter().map(str::to_string).collect());
    }

    let folded: Vec<&str> = skills.iter().map(|(_, folded)| folded.as_str()).collect();
    let mut exact_matches = Vec::new();
    let mut partial_matches = Vec::new();
    let mut missing_skills = Vec::new();
    let mut score = 0.0;

    for tag in &required {
        match classify(&fold(tag, options), &folded) {
            Some(TagMatch::Exact) => {
                score += EXACT_WEIGHT;
                exact_matches.push(tag.to_string());
            }
            Some(TagMatch::Partial(index)) => {
                score += PARTIAL_WEIGHT;
                partial_matches.push(PartialMatch {
                    required: tag.to_string(),
                    matched_skill: skills[index].0.to_string(),
                });
            }
            None => missing_skills.push(tag.to_string()),
        }
    }

    let total_required = required.len();
    let percentage = round_to_hundredths(score / (total_required as f64 * EXACT_WEIGHT) * 100.0);

    SkillMatch {
        score,
        percentage,
        matched_count: exact_matches.len() + partial_matches.len(),
        exact_matches,
        partial_matches,
        missing_skills,
        total_required,
    }
}

/// True when any of `skills` matches `tag` exactly or by containment.
pub fn tag_matches<S: AsRef<str>>(skills: &[S], tag: &str, options: &MatchOptions) -> bool {
    let tag = tag.trim();
    if tag.is_empty() {
        return false;
    }

    let folded: Vec<String> = skills
        .iter()
        .map(|skill| skill.as_ref().trim())
        .filter(|skill| !skill.is_empty())
        .map(|skill| fold(skill, options))
        .collect();
    let folded: Vec<&str> = folded.iter().map(String::as_str).collect();

    classify(&fold(tag, options), &folded).is_some()
}

fn classify(tag: &str, skills: &[&str]) -> Option<TagMatch> {
    if skills.iter().any(|skill| *skill == tag) {
        return Some(TagMatch::Exact);
    }

    skills
        .iter()
        .position(|skill| skill.contains(tag) || tag.contains(skill))
        .map(TagMatch::Partial)
}

fn fold(value: &str, options: &MatchOptions) -> String {
    if options.case_sensitive {
        value.to_string()
    } else {
        value.to_lowercase()
    }
}

pub(crate) fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
