//! DTOs for the v2 permission target API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::json_display;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionTargetDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// A permission target covering repositories and builds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionTarget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<PermissionSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<PermissionSection>,
}

/// Actions here are words: read, write, annotate, delete, manage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PermissionSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_patterns: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_patterns: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repositories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Actions>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<BTreeMap<String, Vec<String>>>,
}

json_display!(PermissionTargetDetails, PermissionTarget, PermissionSection, Actions);

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn sections_use_kebab_case() {
        let section = PermissionSection {
            include_patterns: Some(vec!["**".to_string()]),
            repositories: Some(vec!["ANY LOCAL".to_string()]),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&section).unwrap(),
            json!({"include-patterns": ["**"], "repositories": ["ANY LOCAL"]})
        );
    }

    #[test]
    fn full_target_roundtrips() {
        let raw = json!({
            "name": "java-developers",
            "repo": {
                "include-patterns": ["**"],
                "exclude-patterns": [""],
                "repositories": ["libs-release-local"],
                "actions": {
                    "users": {"bob": ["read", "write", "manage"]},
                    "groups": {"dev": ["read"]}
                }
            },
            "build": {
                "repositories": ["artifactory-build-info"],
                "actions": {"groups": {"ci": ["read", "write"]}}
            }
        });
        let target: PermissionTarget = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(
            target.build.as_ref().unwrap().actions.as_ref().unwrap().users,
            None
        );
        assert_eq!(serde_json::to_value(&target).unwrap(), raw);
    }
}
