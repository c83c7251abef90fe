//! DTOs for the UI-internal endpoints (`ui/...`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::json_display;

/// Entry of the user list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,
}

/// Write shape accepted by user creation.
///
/// `email`, `password` and `retype_password` are mandatory for the server;
/// the remaining flags fall back to server defaults when omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retype_password: Option<String>,
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
    /// Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,
    /// Each group needs `group_name` and `realm` set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<Group>>,
}

/// Full user record, as returned by lookups and accepted by updates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
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
    /// Read-only; ignored by the server on write.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_logged_in: Option<String>,
    /// Read-only; ignored by the server on write.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<String>>,
}

/// A security group.
///
/// The server rejects `auto_join = true` together with
/// `admin_privileges = true`; the client sends whatever it is given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_join: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_privileges: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users_in_group: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_user_default: Option<bool>,
}

/// Entry of the permission target list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionTargetDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repos: Option<Vec<RepositoryDetails>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<String>>,
}

/// A permission target with its per-user and per-group grants.
///
/// Actions are permission letters, see [`PermissionAction`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionTarget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_keys: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_patterns: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_patterns: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_permission_actions: Option<Vec<PrincipalActions>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_permission_actions: Option<Vec<PrincipalActions>>,
}

/// A user or group name paired with the actions granted to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalActions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal: Option<String>,
    #[serde(default, deserialize_with = "crate::types::null_as_empty")]
    pub actions: Vec<String>,
}

impl PrincipalActions {
    pub fn new<I>(principal: &str, actions: I) -> Self
    where
        I: IntoIterator<Item = PermissionAction>,
    {
        Self {
            principal: Some(principal.to_string()),
            actions: actions
                .into_iter()
                .map(|action| action.letter().to_string())
                .collect(),
        }
    }

    /// The recognised actions; unknown letters are skipped.
    pub fn permission_actions(&self) -> Vec<PermissionAction> {
        self.actions
            .iter()
            .filter_map(|action| action.parse().ok())
            .collect()
    }
}

/// Permission letters: m=admin, d=delete, w=deploy, n=annotate, r=read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionAction {
    Admin,
    Delete,
    Deploy,
    Annotate,
    Read,
}

impl PermissionAction {
    pub const ALL: [PermissionAction; 5] = [
        PermissionAction::Admin,
        PermissionAction::Delete,
        PermissionAction::Deploy,
        PermissionAction::Annotate,
        PermissionAction::Read,
    ];

    pub fn letter(self) -> char {
        match self {
            PermissionAction::Admin => 'm',
            PermissionAction::Delete => 'd',
            PermissionAction::Deploy => 'w',
            PermissionAction::Annotate => 'n',
            PermissionAction::Read => 'r',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.letter() == letter)
    }
}

impl fmt::Display for PermissionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for PermissionAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => {
                Self::from_letter(letter).ok_or_else(|| format!("unknown permission letter {s:?}"))
            }
            _ => Err(format!("unknown permission letter {s:?}")),
        }
    }
}

/// Repository summary as shown by the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_key: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_local: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_remote: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_virtual: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_type: Option<String>,
}

json_display!(
    UserDetails,
    NewUser,
    User,
    Group,
    PermissionTargetDetails,
    PermissionTarget,
    PrincipalActions,
    RepositoryDetails,
);
