use super::normalizer::{normalize_name, split_skills};
use super::CandidateImportError;
use crate::ranking::{Candidate, CandidateId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) fn parse_candidates<R: Read>(reader: R) -> Result<Vec<Candidate>, CandidateImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut candidates = Vec::new();

    for (index, record) in csv_reader.deserialize::<CandidateRow>().enumerate() {
        let row_number = index + 1;
        let row = record?;
        candidates.push(row.into_candidate(row_number)?);
    }

    Ok(candidates)
}

#[derive(Debug, Deserialize)]
struct CandidateRow {
    #[serde(rename = "ID", default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(rename = "Skills", default)]
    skills: String,
    #[serde(rename = "Experience", default)]
    experience: String,
    #[serde(rename = "Education", default)]
    education: String,
    #[serde(rename = "Availability", default)]
    availability: String,
    #[serde(
        rename = "Applied At",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    applied_at: Option<String>,
}

impl CandidateRow {
    fn into_candidate(self, row_number: usize) -> Result<Candidate, CandidateImportError> {
        let applied_at = match self.applied_at.as_deref() {
            Some(raw) => Some(parse_timestamp(raw).ok_or_else(|| {
                CandidateImportError::InvalidTimestamp {
                    row: row_number,
                    value: raw.to_string(),
                }
            })?),
            None => None,
        };

        let id = self
            .id
            .unwrap_or_else(|| format!("row-{row_number}"));

        Ok(Candidate {
            id: CandidateId(id),
            name: normalize_name(&self.name),
            skills: split_skills(&self.skills),
            experience: self.experience,
            education: self.education,
            availability: self.availability,
            applied_at,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Parses an RFC 3339 timestamp or a `YYYY-MM-DD` date (midnight UTC).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
