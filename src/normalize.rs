use crate::models::job::{JobRecord, NOT_AVAILABLE, RawCandidate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Salary,
    Location,
    CompanyName,
    CompanyLogo,
    Link,
}

/// When a candidate is dropped instead of being filled with sentinels.
#[derive(Debug, Clone, Copy)]
pub enum DiscardPolicy {
    Keep,
    /// Drop the candidate when every one of these fields is unresolved.
    /// Used by sources whose container selector also matches non-job nodes.
    AllEmpty(&'static [Field]),
}

impl RawCandidate {
    fn field(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::Title => &self.title,
            Field::Salary => &self.salary,
            Field::Location => &self.location,
            Field::CompanyName => &self.company_name,
            Field::CompanyLogo => &self.company_logo,
            Field::Link => &self.link,
        };
        value.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }
}

pub fn normalize(candidate: RawCandidate, policy: DiscardPolicy) -> Option<JobRecord> {
    if let DiscardPolicy::AllEmpty(fields) = policy
        && fields.iter().all(|f| candidate.field(*f).is_none())
    {
        return None;
    }

    Some(JobRecord {
        title: fill(candidate.title),
        salary: fill(candidate.salary),
        location: fill(candidate.location),
        company_name: fill(candidate.company_name),
        company_logo: fill(candidate.company_logo),
        link: fill(candidate.link),
        source_id: candidate
            .source_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty()),
    })
}

fn fill(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
