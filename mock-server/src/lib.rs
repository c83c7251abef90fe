//! In-memory stand-in for the parts of Artifactory the client talks to.
//!
//! Routes live under `/artifactory`, like a default installation, so the
//! client's base-path handling is exercised. Records are defined here
//! independently from the client DTOs; integration tests catch drift.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

const PERMISSION_LETTERS: &str = "mdwnr";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub name: String,
    pub email: Option<String>,
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    #[serde(default, skip_serializing)]
    pub retype_password: Option<String>,
    #[serde(default)]
    pub admin: bool,
    #[serde(default = "internal_realm")]
    pub realm: String,
    #[serde(default)]
    pub groups: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub password: Option<String>,
    pub admin: Option<bool>,
    pub groups: Option<Vec<String>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub auto_join: bool,
    #[serde(default)]
    pub admin_privileges: bool,
    #[serde(default = "internal_realm")]
    pub realm: String,
    #[serde(default)]
    pub users_in_group: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupUpdate {
    pub description: Option<String>,
    pub auto_join: Option<bool>,
    pub admin_privileges: Option<bool>,
    pub users_in_group: Option<Vec<String>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PrincipalActions {
    pub principal: String,
    #[serde(default)]
    pub actions: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionTarget {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub repo_keys: Vec<String>,
    #[serde(default)]
    pub include_patterns: Vec<String>,
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
    #[serde(default)]
    pub user_permission_actions: Vec<PrincipalActions>,
    #[serde(default)]
    pub group_permission_actions: Vec<PrincipalActions>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Repository {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "packageType")]
    pub package_type: String,
}

fn internal_realm() -> String {
    "internal".to_string()
}

#[derive(Debug)]
pub struct Store {
    pub users: BTreeMap<String, User>,
    pub groups: BTreeMap<String, Group>,
    pub permission_targets: BTreeMap<String, PermissionTarget>,
    pub permission_targets_v2: BTreeMap<String, Value>,
    pub repositories: BTreeMap<String, Repository>,
}

impl Default for Store {
    fn default() -> Self {
        let repositories = [
            ("libs-release-local", "LOCAL", "Maven"),
            ("npm-remote", "REMOTE", "Npm"),
            ("libs-release", "VIRTUAL", "Maven"),
        ]
        .into_iter()
        .map(|(key, kind, package_type)| {
            let repo = Repository {
                key: key.to_string(),
                kind: kind.to_string(),
                package_type: package_type.to_string(),
            };
            (repo.key.clone(), repo)
        })
        .collect();

        Self {
            users: BTreeMap::new(),
            groups: BTreeMap::new(),
            permission_targets: BTreeMap::new(),
            permission_targets_v2: BTreeMap::new(),
            repositories,
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    let routes = Router::new()
        .route("/ui/users", get(list_users).post(create_user))
        .route(
            "/ui/users/{name}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route(
            "/ui/groups/{name}",
            get(get_group)
                .put(create_or_replace_group)
                .post(update_group)
                .delete(delete_group),
        )
        .route("/ui/permissiontargets", get(list_permission_targets))
        .route(
            "/ui/permissiontargets/{name}",
            get(get_permission_target)
                .put(create_or_replace_permission_target)
                .delete(delete_permission_target),
        )
        .route("/ui/repodata", get(ui_repositories))
        .route("/api/repositories", get(list_repositories))
        .route("/api/repositories/{key}", axum::routing::delete(delete_repository))
        .route("/api/system/ping", get(ping))
        .route("/api/system/version", get(version))
        .route("/api/v2/security/permissions", get(list_permissions_v2))
        .route(
            "/api/v2/security/permissions/{name}",
            get(get_permission_v2)
                .post(create_permission_v2)
                .put(replace_permission_v2)
                .delete(delete_permission_v2),
        )
        .with_state(db);
    Router::new().nest("/artifactory", routes)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!("mock artifactory serving http://{addr}/artifactory/");
    }
    axum::serve(listener, app()).await
}

/// Artifactory's JSON error envelope.
fn error(status: StatusCode, message: impl Into<String>) -> Response {
    let body = json!({
        "errors": [{"status": status.as_u16(), "message": message.into()}]
    });
    (status, Json(body)).into_response()
}

fn invalid_actions(grants: &[PrincipalActions]) -> Option<String> {
    grants
        .iter()
        .flat_map(|grant| grant.actions.iter())
        .find(|action| action.len() != 1 || !PERMISSION_LETTERS.contains(action.as_str()))
        .cloned()
}

// --- users ---

async fn list_users(State(db): State<Db>) -> Json<Vec<Value>> {
    let store = db.read().await;
    Json(
        store
            .users
            .values()
            .map(|user| {
                json!({
                    "name": user.name,
                    "uri": format!("ui/users/{}", user.name),
                    "realm": user.realm,
                })
            })
            .collect(),
    )
}

async fn create_user(State(db): State<Db>, Json(user): Json<User>) -> Response {
    if user.name.is_empty() {
        return error(StatusCode::BAD_REQUEST, "Username is required");
    }
    if user.retype_password.is_some() && user.retype_password != user.password {
        return error(StatusCode::BAD_REQUEST, "Passwords do not match");
    }
    let mut store = db.write().await;
    if store.users.contains_key(&user.name) {
        return error(
            StatusCode::CONFLICT,
            format!("User '{}' already exists", user.name),
        );
    }
    store.users.insert(user.name.clone(), user);
    StatusCode::CREATED.into_response()
}

async fn get_user(State(db): State<Db>, Path(name): Path<String>) -> Response {
    match db.read().await.users.get(&name) {
        Some(user) => Json(user.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, format!("User '{name}' not found")),
    }
}

async fn update_user(
    State(db): State<Db>,
    Path(name): Path<String>,
    Json(update): Json<UserUpdate>,
) -> Response {
    let mut store = db.write().await;
    let Some(user) = store.users.get_mut(&name) else {
        return error(StatusCode::NOT_FOUND, format!("User '{name}' not found"));
    };
    if let Some(email) = update.email {
        user.email = Some(email);
    }
    if let Some(password) = update.password {
        user.password = Some(password);
    }
    if let Some(admin) = update.admin {
        user.admin = admin;
    }
    if let Some(groups) = update.groups {
        user.groups = groups;
    }
    StatusCode::OK.into_response()
}

async fn delete_user(State(db): State<Db>, Path(name): Path<String>) -> Response {
    match db.write().await.users.remove(&name) {
        Some(_) => format!("The user: '{name}' has been removed successfully.").into_response(),
        None => (StatusCode::NOT_FOUND, format!("User '{name}' does not exist")).into_response(),
    }
}

// --- groups ---

async fn get_group(State(db): State<Db>, Path(name): Path<String>) -> Response {
    match db.read().await.groups.get(&name) {
        Some(group) => Json(group.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, format!("Group '{name}' not found")),
    }
}

async fn create_or_replace_group(
    State(db): State<Db>,
    Path(name): Path<String>,
    Json(mut group): Json<Group>,
) -> Response {
    if group.auto_join && group.admin_privileges {
        return error(
            StatusCode::BAD_REQUEST,
            "autoJoin cannot be true when adminPrivileges is true",
        );
    }
    group.name = name.clone();
    let replaced = db.write().await.groups.insert(name, group).is_some();
    if replaced {
        StatusCode::OK.into_response()
    } else {
        StatusCode::CREATED.into_response()
    }
}

async fn update_group(
    State(db): State<Db>,
    Path(name): Path<String>,
    Json(update): Json<GroupUpdate>,
) -> Response {
    let mut store = db.write().await;
    let Some(group) = store.groups.get_mut(&name) else {
        return error(StatusCode::NOT_FOUND, format!("Group '{name}' not found"));
    };
    let auto_join = update.auto_join.unwrap_or(group.auto_join);
    let admin_privileges = update.admin_privileges.unwrap_or(group.admin_privileges);
    if auto_join && admin_privileges {
        return error(
            StatusCode::BAD_REQUEST,
            "autoJoin cannot be true when adminPrivileges is true",
        );
    }
    group.auto_join = auto_join;
    group.admin_privileges = admin_privileges;
    if let Some(description) = update.description {
        group.description = Some(description);
    }
    if let Some(users) = update.users_in_group {
        group.users_in_group = users;
    }
    StatusCode::OK.into_response()
}

async fn delete_group(State(db): State<Db>, Path(name): Path<String>) -> Response {
    match db.write().await.groups.remove(&name) {
        Some(_) => format!("Group '{name}' has been removed successfully.").into_response(),
        None => (StatusCode::NOT_FOUND, format!("Group '{name}' does not exist")).into_response(),
    }
}

// --- permission targets ---

async fn list_permission_targets(State(db): State<Db>) -> Json<Vec<Value>> {
    let store = db.read().await;
    Json(
        store
            .permission_targets
            .values()
            .map(|target| {
                let repos: Vec<Value> = target
                    .repo_keys
                    .iter()
                    .map(|key| json!({"repoKey": key}))
                    .collect();
                let principals = |grants: &[PrincipalActions]| -> Vec<String> {
                    grants.iter().map(|grant| grant.principal.clone()).collect()
                };
                json!({
                    "name": target.name,
                    "repos": repos,
                    "users": principals(&target.user_permission_actions),
                    "groups": principals(&target.group_permission_actions),
                })
            })
            .collect(),
    )
}

async fn get_permission_target(State(db): State<Db>, Path(name): Path<String>) -> Response {
    match db.read().await.permission_targets.get(&name) {
        Some(target) => Json(target.clone()).into_response(),
        None => error(
            StatusCode::NOT_FOUND,
            format!("Permission target '{name}' not found"),
        ),
    }
}

async fn create_or_replace_permission_target(
    State(db): State<Db>,
    Path(name): Path<String>,
    Json(mut target): Json<PermissionTarget>,
) -> Response {
    let bad = invalid_actions(&target.user_permission_actions)
        .or_else(|| invalid_actions(&target.group_permission_actions));
    if let Some(action) = bad {
        return error(
            StatusCode::BAD_REQUEST,
            format!("Unknown permission action '{action}'"),
        );
    }
    target.name = name.clone();
    db.write().await.permission_targets.insert(name, target);
    StatusCode::OK.into_response()
}

async fn delete_permission_target(State(db): State<Db>, Path(name): Path<String>) -> Response {
    match db.write().await.permission_targets.remove(&name) {
        Some(_) => {
            format!("Permission Target '{name}' has been removed successfully.").into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            format!("Permission Target '{name}' does not exist"),
        )
            .into_response(),
    }
}

// --- repositories ---

async fn ui_repositories(State(db): State<Db>) -> Json<Vec<Value>> {
    let store = db.read().await;
    Json(
        store
            .repositories
            .values()
            .map(|repo| {
                json!({
                    "repoKey": repo.key,
                    "type": repo.kind.to_lowercase(),
                    "isLocal": repo.kind == "LOCAL",
                    "isRemote": repo.kind == "REMOTE",
                    "isVirtual": repo.kind == "VIRTUAL",
                    "distribution": false,
                    "repoType": repo.package_type,
                })
            })
            .collect(),
    )
}

async fn list_repositories(
    State(db): State<Db>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<Repository>> {
    let store = db.read().await;
    let kind = params.get("type").map(|kind| kind.to_uppercase());
    Json(
        store
            .repositories
            .values()
            .filter(|repo| kind.as_ref().map_or(true, |kind| &repo.kind == kind))
            .cloned()
            .collect(),
    )
}

async fn delete_repository(State(db): State<Db>, Path(key): Path<String>) -> Response {
    match db.write().await.repositories.remove(&key) {
        Some(_) => format!("Repository '{key}' and all its content have been removed successfully.")
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            format!("Repository '{key}' does not exist"),
        )
            .into_response(),
    }
}

// --- system ---

async fn ping() -> &'static str {
    "OK"
}

async fn version() -> Json<Value> {
    Json(json!({
        "version": "7.77.0",
        "revision": "77700900",
        "addons": ["rest", "ldap"],
        "license": "mock"
    }))
}

// --- permission targets v2 ---

async fn list_permissions_v2(State(db): State<Db>) -> Json<Vec<Value>> {
    let store = db.read().await;
    Json(
        store
            .permission_targets_v2
            .keys()
            .map(|name| json!({"name": name, "uri": format!("api/v2/security/permissions/{name}")}))
            .collect(),
    )
}

async fn get_permission_v2(State(db): State<Db>, Path(name): Path<String>) -> Response {
    match db.read().await.permission_targets_v2.get(&name) {
        Some(target) => Json(target.clone()).into_response(),
        None => error(
            StatusCode::NOT_FOUND,
            format!("Permission target '{name}' not found"),
        ),
    }
}

async fn create_permission_v2(
    State(db): State<Db>,
    Path(name): Path<String>,
    Json(mut target): Json<Value>,
) -> Response {
    if !target.is_object() {
        return error(StatusCode::BAD_REQUEST, "Permission target must be a JSON object");
    }
    let mut store = db.write().await;
    if store.permission_targets_v2.contains_key(&name) {
        return error(
            StatusCode::CONFLICT,
            format!("Permission target '{name}' already exists"),
        );
    }
    target["name"] = Value::String(name.clone());
    store.permission_targets_v2.insert(name, target);
    StatusCode::CREATED.into_response()
}

async fn replace_permission_v2(
    State(db): State<Db>,
    Path(name): Path<String>,
    Json(mut target): Json<Value>,
) -> Response {
    if !target.is_object() {
        return error(StatusCode::BAD_REQUEST, "Permission target must be a JSON object");
    }
    let mut store = db.write().await;
    let Some(existing) = store.permission_targets_v2.get_mut(&name) else {
        return error(
            StatusCode::NOT_FOUND,
            format!("Permission target '{name}' not found"),
        );
    };
    target["name"] = Value::String(name);
    *existing = target;
    StatusCode::OK.into_response()
}

async fn delete_permission_v2(State(db): State<Db>, Path(name): Path<String>) -> Response {
    match db.write().await.permission_targets_v2.remove(&name) {
        Some(_) => format!("Permission Target '{name}' has been removed successfully.")
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            format!("Permission Target '{name}' does not exist"),
        )
            .into_response(),
    }
}
