use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// The singleton profile record shown at the top of the public view.
///
/// Missing keys decode to blank values, so a partial payload from the backend
/// lands on the same defaults the admin form starts from.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ProfileSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(deserialize_with = "null_as_default")]
    pub headline: String,
    #[serde(deserialize_with = "null_as_default")]
    pub about: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", deserialize_with = "null_as_default")]
    pub socials: BTreeMap<String, String>,
}

impl ProfileSettings {
    pub fn location(&self) -> Option<&str> {
        non_blank(&self.location)
    }

    pub fn avatar_url(&self) -> Option<&str> {
        non_blank(&self.avatar_url)
    }

    pub fn email(&self) -> Option<&str> {
        non_blank(&self.email)
    }
}

// The admin form writes empty strings into optional fields; treat them as unset.
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

// An explicit null reads the same as a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_payload_fills_blank_defaults() {
        let settings: ProfileSettings =
            serde_json::from_str(r#"{"id":"1","name":"Ada","socials":{"github":"https://github.com/ada"}}"#)
                .unwrap();

        assert_eq!(settings.id.as_deref(), Some("1"));
        assert_eq!(settings.name, "Ada");
        assert_eq!(settings.role, "");
        assert_eq!(settings.email, None);
        assert_eq!(settings.socials.get("github").map(String::as_str), Some("https://github.com/ada"));
    }

    #[test]
    fn null_fields_decode_as_blanks() {
        let settings: ProfileSettings = serde_json::from_str(
            r#"{"id":"s1","name":"Grace","role":"Admiral","headline":null,"about":null,"socials":null,"email":null}"#,
        )
        .unwrap();

        assert_eq!(settings.name, "Grace");
        assert_eq!(settings.role, "Admiral");
        assert_eq!(settings.about, "");
        assert!(settings.socials.is_empty());
        assert_eq!(settings.email(), None);
    }

    #[test]
    fn unsaved_record_omits_id() {
        let settings = ProfileSettings {
            name: "Ada".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&settings).unwrap();

        assert!(json.get("id").is_none());
        assert_eq!(json["name"], "Ada");
    }

    #[test]
    fn blank_optionals_read_as_unset() {
        let settings = ProfileSettings {
            location: Some("  ".to_string()),
            email: Some("ada@example.com".to_string()),
            ..Default::default()
        };

        assert_eq!(settings.location(), None);
        assert_eq!(settings.email(), Some("ada@example.com"));
    }
}
