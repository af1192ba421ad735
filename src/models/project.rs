use serde::{Deserialize, Serialize};

use super::settings::{non_blank, null_as_default};

/// One portfolio entry as the backend returns it.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Project {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
}

impl Project {
    pub fn image_url(&self) -> Option<&str> {
        non_blank(&self.image_url)
    }

    pub fn live_url(&self) -> Option<&str> {
        non_blank(&self.live_url)
    }

    pub fn repo_url(&self) -> Option<&str> {
        non_blank(&self.repo_url)
    }
}

/// Body of a create call. Carries no `id`; the backend assigns one.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
}

impl ProjectDraft {
    /// Title and description are the only fields the backend requires.
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty() && !self.description.trim().is_empty()
    }
}

/// Body of a partial update; only the fields that are set go over the wire.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
}

/// Reply to a delete call. A missing flag counts as "not deleted".
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(default)]
pub struct DeleteConfirmation {
    pub deleted: bool,
}

/// Splits a comma-separated tag field, trimming entries and dropping empty ones.
pub fn normalize_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("react, node , , ui", &["react", "node", "ui"])]
    #[case("", &[])]
    #[case(" , ,", &[])]
    #[case("rust", &["rust"])]
    #[case("ui,ui", &["ui", "ui"])]
    fn normalizes_comma_separated_tags(#[case] input: &str, #[case] expected: &[&str]) {
        assert_eq!(normalize_tags(input), expected);
    }

    #[test]
    fn null_fields_decode_as_empty() {
        let project: Project = serde_json::from_str(
            r#"{"id":"1","title":"Ok","description":null,"tags":null,"image_url":null}"#,
        )
        .unwrap();

        assert_eq!(project.id.as_deref(), Some("1"));
        assert_eq!(project.title, "Ok");
        assert_eq!(project.description, "");
        assert!(project.tags.is_empty());
        assert_eq!(project.image_url(), None);
    }

    #[test]
    fn patch_serializes_only_set_fields() {
        let patch = ProjectPatch {
            title: Some("New title".to_string()),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({ "title": "New title" })
        );
    }

    #[test]
    fn draft_never_carries_an_id() {
        let draft = ProjectDraft {
            title: "Foo".to_string(),
            description: "Bar".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&draft).unwrap();

        assert!(json.get("id").is_none());
        assert_eq!(json["tags"], serde_json::json!([]));
    }

    #[test]
    fn draft_requires_title_and_description() {
        let mut draft = ProjectDraft {
            title: "Foo".to_string(),
            ..Default::default()
        };
        assert!(!draft.is_valid());

        draft.description = "Bar".to_string();
        assert!(draft.is_valid());
    }

    #[test]
    fn missing_delete_flag_is_not_a_confirmation() {
        let confirmation: DeleteConfirmation = serde_json::from_str("{}").unwrap();
        assert!(!confirmation.deleted);

        let confirmation: DeleteConfirmation = serde_json::from_str(r#"{"deleted":true}"#).unwrap();
        assert!(confirmation.deleted);
    }
}
