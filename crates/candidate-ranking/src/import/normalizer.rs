pub(crate) fn normalize_name(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits a skills cell on `;`, `|` or `,`, dropping blanks but keeping order and duplicates.
pub(crate) fn split_skills(value: &str) -> Vec<String> {
    value
        .split([';', '|', ','])
        .map(normalize_name)
        .filter(|skill| !skill.is_empty())
        .collect()
}
