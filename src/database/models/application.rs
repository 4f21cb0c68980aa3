use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;

/// Application status, stored as text exactly as rendered to clients.
///
/// Lifecycle: every application starts as `Applied`; recruiters move it to
/// `Selected` or `Not Selected`; a student settles a `Selected` application
/// as `Accepted` or `Not Selected`. Only the student accept path checks the
/// transition table - recruiter status changes and student rejects write
/// unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Applied,
    Selected,
    #[serde(rename = "Not Selected")]
    NotSelected,
    Accepted,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::Applied,
        ApplicationStatus::NotSelected,
        ApplicationStatus::Selected,
        ApplicationStatus::Accepted,
    ];

    /// Statuses reachable from `self` in the student-facing state machine.
    pub fn successors(self) -> &'static [ApplicationStatus] {
        match self {
            ApplicationStatus::Applied => {
                &[ApplicationStatus::Selected, ApplicationStatus::NotSelected]
            }
            ApplicationStatus::Selected => {
                &[ApplicationStatus::Accepted, ApplicationStatus::NotSelected]
            }
            // Terminal
            ApplicationStatus::NotSelected | ApplicationStatus::Accepted => &[],
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown application status: {0}")]
pub struct ParseStatusError(String);

impl FromStr for ApplicationStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Applied" => Ok(ApplicationStatus::Applied),
            "Selected" => Ok(ApplicationStatus::Selected),
            "Not Selected" => Ok(ApplicationStatus::NotSelected),
            "Accepted" => Ok(ApplicationStatus::Accepted),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

impl TryFrom<String> for ApplicationStatus {
    type Error = ParseStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Selected => "Selected",
            ApplicationStatus::NotSelected => "Not Selected",
            ApplicationStatus::Accepted => "Accepted",
        };
        write!(f, "{}", s)
    }
}

/// One student's application to one profile. The (profile_code, entry_number)
/// pair is the row identity; rows are created once and never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub profile_code: i32,
    pub entry_number: String,
    #[sqlx(try_from = "String")]
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

/// Flat join row produced by the application listing query.
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationWithProfile {
    pub profile_code: i32,
    pub entry_number: String,
    #[sqlx(try_from = "String")]
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub company_name: String,
    pub designation: String,
    pub recruiter_email: String,
}

/// Response shape for listings: application fields plus a nested `profile`
/// object with the posting's descriptive fields.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationView {
    pub profile_code: i32,
    pub entry_number: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub profile: ProfileSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummary {
    pub profile_code: i32,
    pub company_name: String,
    pub designation: String,
    pub recruiter_email: String,
}

impl From<ApplicationWithProfile> for ApplicationView {
    fn from(row: ApplicationWithProfile) -> Self {
        Self {
            profile_code: row.profile_code,
            entry_number: row.entry_number,
            status: row.status,
            applied_at: row.applied_at,
            profile: ProfileSummary {
                profile_code: row.profile_code,
                company_name: row.company_name,
                designation: row.designation,
                recruiter_email: row.recruiter_email,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_strings() {
        for status in ApplicationStatus::ALL {
            let rendered = status.to_string();
            assert_eq!(rendered.parse::<ApplicationStatus>().unwrap(), status);
        }
        assert_eq!(
            "Not Selected".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::NotSelected
        );
    }

    #[test]
    fn rejects_unknown_status() {
        assert!("Pending".parse::<ApplicationStatus>().is_err());
        assert!("applied".parse::<ApplicationStatus>().is_err());
        assert!("NotSelected".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn serializes_with_space_in_not_selected() {
        let json = serde_json::to_value(ApplicationStatus::NotSelected).unwrap();
        assert_eq!(json, "Not Selected");
    }

    #[test]
    fn accept_is_reachable_only_from_selected() {
        for status in ApplicationStatus::ALL {
            let can_accept = status.successors().contains(&ApplicationStatus::Accepted);
            assert_eq!(can_accept, status == ApplicationStatus::Selected);
        }
    }

    #[test]
    fn accepted_and_not_selected_are_terminal() {
        assert!(ApplicationStatus::Accepted.successors().is_empty());
        assert!(ApplicationStatus::NotSelected.successors().is_empty());
        assert!(!ApplicationStatus::Applied.successors().is_empty());
    }

    #[test]
    fn view_nests_profile_fields() {
        let row = ApplicationWithProfile {
            profile_code: 10,
            entry_number: "2021CS001".to_string(),
            status: ApplicationStatus::Applied,
            applied_at: chrono::Utc::now(),
            company_name: "Acme".to_string(),
            designation: "SDE".to_string(),
            recruiter_email: "hr@acme.example".to_string(),
        };
        let view = ApplicationView::from(row);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["profile_code"], 10);
        assert_eq!(json["status"], "Applied");
        assert_eq!(json["profile"]["company_name"], "Acme");
        assert_eq!(json["profile"]["profile_code"], 10);
    }
}
