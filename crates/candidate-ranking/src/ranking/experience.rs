use regex::Regex;
use std::sync::LazyLock;

static RE_YEARS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)([0-9]+)\s*\+?\s*(?:years?|yrs?)").ok());

const CATEGORY_BONUS: u32 = 30;
const TAG_BONUS: u32 = 10;
const TAG_BONUS_CAP: u32 = 30;

/// Scores free-text experience against the job's category and tags (0-100).
pub fn score_experience<T: AsRef<str>>(
    experience: &str,
    required_tags: &[T],
    category: Option<&str>,
) -> u8 {
    if experience.trim().is_empty() {
        return 0;
    }

    let text = experience.to_lowercase();
    let mut score = base_score(years_of_experience(experience));

    if let Some(category) = category.map(str::trim).filter(|value| !value.is_empty()) {
        if text.contains(&category.to_lowercase()) {
            score += CATEGORY_BONUS;
        }
    }

    let matched_tags = required_tags
        .iter()
        .map(|tag| tag.as_ref().trim())
        .filter(|tag| !tag.is_empty())
        .filter(|tag| text.contains(&tag.to_lowercase()))
        .count() as u32;
    score += (TAG_BONUS * matched_tags).min(TAG_BONUS_CAP);

    score.min(100) as u8
}

/// Years stated directly before "year(s)" or "yr(s)"; zero when absent.
pub fn years_of_experience(experience: &str) -> u32 {
    RE_YEARS
        .as_ref()
        .and_then(|re| re.captures(experience))
        .and_then(|captures| captures.get(1))
        // The capture is ASCII digits only, so a parse failure means overflow.
        .map(|years| years.as_str().parse().unwrap_or(u32::MAX))
        .unwrap_or(0)
}

fn base_score(years: u32) -> u32 {
    match years {
        5.. => 40,
        3..=4 => 30,
        1..=2 => 20,
        0 => 10,
    }
}
