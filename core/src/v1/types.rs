//! DTOs for the legacy REST API (`api/...`).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::json_display;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,
}

/// `application/vnd.org.jfrog.artifactory.security.User+json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Mandatory on create/replace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Mandatory on create/replace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_updatable: Option<bool>,
    #[serde(
        rename = "disableUIAccess",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub disable_ui_access: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_password_disabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_logged_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// `application/vnd.org.jfrog.artifactory.security.Group+json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Must be false when `admin_privileges` is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_join: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_privileges: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm_attributes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_names: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionTargetDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// `application/vnd.org.jfrog.artifactory.security.PermissionTarget+json`
///
/// Patterns are comma separated Ant-style globs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionTarget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub includes_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excludes_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repositories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principals: Option<Principals>,
}

/// Principal name to permission letters (m, d, w, n, r).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principals {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<BTreeMap<String, Vec<String>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_type: Option<String>,
}

/// Filter for the repository list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryKind {
    Local,
    Remote,
    Virtual,
    Federated,
    Distribution,
}

impl RepositoryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RepositoryKind::Local => "local",
            RepositoryKind::Remote => "remote",
            RepositoryKind::Virtual => "virtual",
            RepositoryKind::Federated => "federated",
            RepositoryKind::Distribution => "distribution",
        }
    }
}

impl fmt::Display for RepositoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Versions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addons: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

json_display!(
    UserDetails,
    User,
    GroupDetails,
    Group,
    PermissionTargetDetails,
    PermissionTarget,
    Principals,
    RepositorySummary,
    Versions,
);

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn permission_target_principals_are_maps() {
        let raw = json!({
            "name": "release-deployers",
            "includesPattern": "**",
            "repositories": ["libs-release-local"],
            "principals": {
                "users": {"jane": ["r", "w"]},
                "groups": {"readers": ["r"]}
            }
        });
        let target: PermissionTarget = serde_json::from_value(raw.clone()).unwrap();
        let principals = target.principals.as_ref().unwrap();
        assert_eq!(principals.users.as_ref().unwrap()["jane"], vec!["r", "w"]);
        assert!(target.excludes_pattern.is_none());
        assert_eq!(serde_json::to_value(&target).unwrap(), raw);
    }

    #[test]
    fn repository_summary_reads_type_field() {
        let repo: RepositorySummary = serde_json::from_value(json!({
            "key": "npm-remote",
            "type": "REMOTE",
            "url": "https://repo.example.com/artifactory/npm-remote",
            "packageType": "Npm"
        }))
        .unwrap();
        assert_eq!(repo.kind.as_deref(), Some("REMOTE"));
        assert_eq!(repo.package_type.as_deref(), Some("Npm"));
        assert!(repo.description.is_none());
    }

    #[test]
    fn empty_group_serializes_to_empty_object() {
        assert_eq!(serde_json::to_string(&Group::default()).unwrap(), "{}");
    }

    #[test]
    fn repository_kind_query_values() {
        assert_eq!(RepositoryKind::Federated.to_string(), "federated");
        assert_eq!(RepositoryKind::Local.as_str(), "local");
    }
}
