use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Account-level metadata from `/users/{username}`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct Profile {
    #[serde(default)]
    pub login: String,
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: String,
    pub bio: Option<String>,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    pub html_url: Option<String>,
    pub public_repos: Option<u64>,
}

impl Profile {
    /// Name to show for the account; accounts without a display name fall back to the login.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.login,
        }
    }
}

/// One entry of `/users/{username}/repos`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub html_url: String,
    pub language: Option<String>,
    /// Repository size as reported by GitHub (KB).
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Repository {
    /// The declared primary language, ignoring empty labels.
    pub fn primary_language(&self) -> Option<&str> {
        self.language.as_deref().filter(|l| !l.is_empty())
    }
}

/// Accepts RFC 3339 timestamps as well as bare `YYYY-MM-DD` dates (midnight UTC).
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("invalid timestamp: {:?}", raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_profile_deserialize_github_payload() {
        let json = r#"{
            "login": "ada",
            "id": 1,
            "name": "Ada",
            "avatar_url": "a.png",
            "bio": "x",
            "followers": 3,
            "following": 1,
            "html_url": "https://github.com/ada",
            "public_repos": 2,
            "site_admin": false
        }"#;

        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.login, "ada");
        assert_eq!(profile.name.as_deref(), Some("Ada"));
        assert_eq!(profile.avatar_url, "a.png");
        assert_eq!(profile.bio.as_deref(), Some("x"));
        assert_eq!(profile.followers, 3);
        assert_eq!(profile.following, 1);
        assert_eq!(profile.public_repos, Some(2));
    }

    #[test]
    fn test_profile_null_fields() {
        let json = r#"{"login": "ghost", "name": null, "bio": null, "avatar_url": "g.png", "followers": 0, "following": 0}"#;

        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.name, None);
        assert_eq!(profile.bio, None);
        assert_eq!(profile.display_name(), "ghost");
    }

    #[test]
    fn test_display_name_prefers_name() {
        let profile = Profile {
            login: "ada".into(),
            name: Some("Ada Lovelace".into()),
            ..Default::default()
        };
        assert_eq!(profile.display_name(), "Ada Lovelace");
    }

    #[test]
    fn test_repository_deserialize_rfc3339() {
        let json = r#"{
            "id": 7,
            "name": "engine",
            "full_name": "ada/engine",
            "html_url": "https://github.com/ada/engine",
            "language": "Rust",
            "size": 1024,
            "stargazers_count": 12,
            "forks_count": 3,
            "updated_at": "2024-03-05T10:20:30Z"
        }"#;

        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.id, 7);
        assert_eq!(repo.primary_language(), Some("Rust"));
        assert_eq!(repo.size, 1024);
        assert_eq!(
            repo.updated_at,
            Utc.with_ymd_and_hms(2024, 3, 5, 10, 20, 30).unwrap()
        );
    }

    #[test]
    fn test_repository_without_language() {
        let json = r#"{"id": 1, "name": "r", "html_url": "u", "language": null, "size": 1,
            "stargazers_count": 0, "forks_count": 0, "updated_at": "2023-01-01"}"#;

        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.primary_language(), None);
        assert_eq!(
            repo.updated_at,
            Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_empty_language_is_not_a_language() {
        let json = r#"{"id": 1, "name": "r", "html_url": "u", "language": "", "size": 1,
            "stargazers_count": 0, "forks_count": 0, "updated_at": "2023-01-01T00:00:00Z"}"#;

        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.primary_language(), None);
    }

    #[test]
    fn test_parse_timestamp_with_offset() {
        let ts = parse_timestamp("2024-01-01T02:00:00+02:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_err());
    }
}
