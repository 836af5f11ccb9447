use serde::{Deserialize, Deserializer, Serialize};

/// A backlog item as returned by the Aha! features endpoint. Only the fields
/// we read are modeled; everything else in the payload is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_status: Option<WorkflowStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowStatus {
    #[serde(default)]
    pub name: String,
}

/// Ids arrive as strings, but accept bare JSON numbers too, normalized to
/// their text form.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
    })
}

impl Feature {
    /// Description text, with a missing description read as empty.
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Workflow status display name, or empty if the service sent none.
    pub fn status_name(&self) -> &str {
        self.workflow_status
            .as_ref()
            .map(|s| s.name.as_str())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_feature() {
        let json = r##"{
            "id": "FEAT-1",
            "name": "Add login",
            "description": "SSO support",
            "workflow_status": {"name": "In development", "color": "#ccc"}
        }"##;
        let feature: Feature = serde_json::from_str(json).unwrap();
        assert_eq!(feature.id, "FEAT-1");
        assert_eq!(feature.name, "Add login");
        assert_eq!(feature.description_text(), "SSO support");
        assert_eq!(feature.status_name(), "In development");
    }

    #[test]
    fn numeric_id_is_accepted_as_text() {
        let json = r#"{"id": 6776757454995854320, "name": "Numbered"}"#;
        let feature: Feature = serde_json::from_str(json).unwrap();
        assert_eq!(feature.id, "6776757454995854320");
    }

    #[test]
    fn status_without_name_reads_as_empty() {
        let json = r#"{"id": "F-1", "name": "x", "workflow_status": {"id": "st-9"}}"#;
        let feature: Feature = serde_json::from_str(json).unwrap();
        assert_eq!(feature.status_name(), "");
    }

    #[test]
    fn missing_optional_fields_read_as_empty() {
        let json = r#"{"id": "FEAT-2", "name": "Bare item"}"#;
        let feature: Feature = serde_json::from_str(json).unwrap();
        assert_eq!(feature.description_text(), "");
        assert_eq!(feature.status_name(), "");
    }

    #[test]
    fn null_description_reads_as_empty() {
        let json = r#"{"id": "FEAT-3", "name": "Nulled", "description": null}"#;
        let feature: Feature = serde_json::from_str(json).unwrap();
        assert_eq!(feature.description, None);
        assert_eq!(feature.description_text(), "");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let json = r#"{
            "id": "FEAT-4",
            "name": "Extra",
            "reference_num": "PRJ-4",
            "created_at": "2024-01-01T00:00:00Z",
            "assigned_to_user": {"name": "someone"}
        }"#;
        let feature: Feature = serde_json::from_str(json).unwrap();
        assert_eq!(feature.id, "FEAT-4");
    }
}
