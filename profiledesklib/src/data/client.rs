//! Client profile records as listed on the admin dashboard.

use std::path::Path;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::record::Record;
use super::value::Value;
use crate::error::ProfileDeskError;
use crate::Result;

/// The account a client profile belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// A registered client profile.
///
/// Serialized in camelCase so files exported from the web dashboard load
/// unchanged. `age` is derived, never stored: see [`Client::with_age`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub user: ClientUser,
    pub date_of_birth: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(default)]
    pub gender: Option<String>,
    pub religion: String,
    #[serde(default)]
    pub caste: Option<String>,
    #[serde(default)]
    pub mother_tongue: Option<String>,
    pub diet: String,
    #[serde(default)]
    pub height: Option<String>,
    #[serde(default)]
    pub weight: Option<i64>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub employed_in: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Client {
    /// Age in whole years on `today`.
    ///
    /// One year is subtracted while the birthday is still ahead in `today`'s year.
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        let dob = self.date_of_birth;
        let mut age = today.year() - dob.year();
        if (today.month(), today.day()) < (dob.month(), dob.day()) {
            age -= 1;
        }
        age
    }

    /// Return a copy with `age` filled in for `today`.
    pub fn with_age(mut self, today: NaiveDate) -> Self {
        self.age = Some(self.age_on(today));
        self
    }

    /// Height and weight as one display line; `None` when both are missing.
    pub fn height_weight(&self) -> Option<String> {
        let parts: Vec<String> = self
            .height
            .iter()
            .cloned()
            .chain(self.weight.map(|w| format!("{} kg", w)))
            .collect();
        (!parts.is_empty()).then(|| parts.join(", "))
    }

    /// Employment and organization as one display line; `None` when both are missing.
    pub fn job(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.employed_in, &self.organization]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .collect();
        (!parts.is_empty()).then(|| parts.join(", "))
    }
}

impl Record for Client {
    fn field(&self, key: &str) -> Value {
        match key {
            "id" => Value::from(&self.id),
            "name" => Value::from(&self.user.name),
            "email" => Value::from(&self.user.email),
            "createdAt" => Value::from(self.user.created_at.to_rfc3339()),
            "dateOfBirth" => Value::from(self.date_of_birth.to_string()),
            "age" => Value::from(self.age),
            "gender" => Value::from(self.gender.as_deref()),
            "religion" => Value::from(&self.religion),
            "caste" => Value::from(self.caste.as_deref()),
            "motherTongue" => Value::from(self.mother_tongue.as_deref()),
            "diet" => Value::from(&self.diet),
            "height" => Value::from(self.height.as_deref()),
            "weight" => Value::from(self.weight),
            "education" => Value::from(self.education.as_deref()),
            "employedIn" => Value::from(self.employed_in.as_deref()),
            "organization" => Value::from(self.organization.as_deref()),
            "city" => Value::from(self.city.as_deref()),
            "imageUrl" => Value::from(self.image_url.as_deref()),
            _ => Value::Null,
        }
    }
}

/// Load a JSON array of client profiles from a file.
pub fn load_clients(path: impl AsRef<Path>) -> Result<Vec<Client>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| ProfileDeskError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let clients: Vec<Client> = serde_json::from_str(&contents)?;
    tracing::debug!(path = %path.display(), count = clients.len(), "loaded client profiles");
    Ok(clients)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_client(id: &str, name: &str, dob: &str) -> Client {
        Client {
            id: id.to_string(),
            user: ClientUser {
                id: format!("user-{}", id),
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                created_at: DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
                    .unwrap()
                    .with_timezone(&Utc),
            },
            date_of_birth: NaiveDate::parse_from_str(dob, "%Y-%m-%d").unwrap(),
            age: None,
            gender: None,
            religion: "Hindu".to_string(),
            caste: None,
            mother_tongue: None,
            diet: "Vegetarian".to_string(),
            height: None,
            weight: None,
            education: None,
            employed_in: None,
            organization: None,
            city: None,
            image_url: None,
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        let client = sample_client("1", "Amy", "1995-06-15");
        assert_eq!(client.age_on(date("2025-06-14")), 29);
        assert_eq!(client.age_on(date("2025-06-15")), 30);
        assert_eq!(client.age_on(date("2025-12-31")), 30);
    }

    #[test]
    fn test_with_age_fills_field() {
        let client = sample_client("1", "Amy", "2000-01-01").with_age(date("2024-05-01"));
        assert_eq!(client.age, Some(24));
        assert_eq!(client.field("age"), Value::from(24));
    }

    #[test]
    fn test_record_fields() {
        let mut client = sample_client("7", "Bob", "1990-02-03");
        client.caste = Some("Iyer".to_string());
        assert_eq!(client.field("name"), Value::from("Bob"));
        assert_eq!(client.field("email"), Value::from("bob@example.com"));
        assert_eq!(client.field("caste"), Value::from("Iyer"));
        assert_eq!(client.field("dateOfBirth"), Value::from("1990-02-03"));
        assert!(client.field("age").is_null());
        assert!(client.field("nonexistent").is_null());
    }

    #[test]
    fn test_display_helpers() {
        let mut client = sample_client("1", "Amy", "1995-06-15");
        assert_eq!(client.height_weight(), None);
        assert_eq!(client.job(), None);
        client.height = Some("5'4\"".to_string());
        client.weight = Some(55);
        client.organization = Some("Acme".to_string());
        assert_eq!(client.height_weight().as_deref(), Some("5'4\", 55 kg"));
        assert_eq!(client.job().as_deref(), Some("Acme"));
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "id": "c1",
            "user": {"id": "u1", "name": "Amy", "email": "amy@example.com", "createdAt": "2024-03-01T10:00:00Z"},
            "dateOfBirth": "1996-08-20",
            "religion": "Hindu",
            "motherTongue": "Tamil",
            "diet": "Vegetarian",
            "weight": 52
        }"#;
        let client: Client = serde_json::from_str(json).unwrap();
        assert_eq!(client.user.name, "Amy");
        assert_eq!(client.mother_tongue.as_deref(), Some("Tamil"));
        assert_eq!(client.weight, Some(52));
        assert!(client.caste.is_none());
    }

    #[test]
    fn test_load_clients_missing_file() {
        let err = load_clients("/nonexistent/clients.json").unwrap_err();
        assert!(matches!(err, ProfileDeskError::FileRead { .. }));
    }
}
