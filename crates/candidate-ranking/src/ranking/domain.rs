use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for applicants in a ranking pool.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub String);

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Applicant snapshot as materialized by the portal. Free-text fields default to empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub availability: String,
    #[serde(default)]
    pub applied_at: Option<DateTime<Utc>>,
}

impl Candidate {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: CandidateId(id.into()),
            name: name.into(),
            skills: Vec::new(),
            experience: String::new(),
            education: String::new(),
            availability: String::new(),
            applied_at: None,
        }
    }
}

/// Job posting with the required-skill tags candidates are ranked against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: JobId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl JobPosting {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: JobId(id.into()),
            title: title.into(),
            tags: Vec::new(),
            category: None,
        }
    }
}
