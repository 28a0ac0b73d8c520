use chrono::{DateTime, Utc};

/// Keyword ladders are evaluated top to bottom; the first rung with a matching pattern wins.
type Ladder = &'static [(&'static [&'static str], u8)];

const EDUCATION_LADDER: Ladder = &[
    (&["phd", "doctorate"], 100),
    (&["master", "masters"], 90),
    (&["bachelor", "bachelors", "degree"], 80),
    (&["+2", "intermediate"], 60),
    (&["slc", "school", "high school"], 40),
];
const EDUCATION_FALLBACK: u8 = 30;

const AVAILABILITY_LADDER: Ladder = &[
    (&["immediate"], 100),
    (&["within 1 week"], 90),
    (&["within 2 weeks"], 80),
    (&["within 1 month"], 70),
    (&["within 2 months"], 60),
    (&["within 3 months"], 50),
];
const AVAILABILITY_FALLBACK: u8 = 40;

/// Upper bound in whole days paired with the score awarded inside it.
const RECENCY_BUCKETS: &[(i64, u8)] = &[(1, 100), (3, 90), (7, 80), (14, 70), (30, 60)];
const RECENCY_FALLBACK: u8 = 50;

pub fn score_education(education: &str) -> u8 {
    climb(EDUCATION_LADDER, education).unwrap_or(EDUCATION_FALLBACK)
}

pub fn score_availability(availability: &str) -> u8 {
    climb(AVAILABILITY_LADDER, availability).unwrap_or(AVAILABILITY_FALLBACK)
}

/// Scores how recently the application arrived relative to `now`. Missing timestamps score zero.
pub fn score_recency(applied_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> u8 {
    let Some(applied_at) = applied_at else {
        return 0;
    };

    let days = (now - applied_at).num_days();
    RECENCY_BUCKETS
        .iter()
        .find(|(max_days, _)| days <= *max_days)
        .map(|(_, score)| *score)
        .unwrap_or(RECENCY_FALLBACK)
}

fn climb(ladder: Ladder, text: &str) -> Option<u8> {
    let text = text.to_lowercase();
    ladder
        .iter()
        .find(|(patterns, _)| patterns.iter().any(|pattern| text.contains(pattern)))
        .map(|(_, score)| *score)
}
