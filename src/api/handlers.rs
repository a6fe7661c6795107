//! Handlers for the six management operations.
//!
//! Each handler gets the full inbound request plus the parameter map the
//! router extracted from the path, and owns response construction and status
//! selection entirely.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::api::registry::{Environment, Instance, PowerState};
use crate::http::server::AppState;
use crate::routing::{Operation, PathParams, API_VERSION};

#[derive(Serialize)]
pub struct VersionInfo {
    pub version: &'static str,
    pub api_version: &'static str,
}

#[derive(Serialize)]
pub struct RefreshReceipt {
    pub refresh_id: Uuid,
    pub environments: usize,
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct EnvironmentSummary {
    pub id: String,
    pub name: String,
    pub instances: usize,
    pub running: usize,
}

#[derive(Serialize)]
pub struct EnvPowerChange {
    pub id: String,
    pub state: PowerState,
    pub instances_affected: usize,
}

#[derive(Serialize)]
pub struct InstancePowerChange {
    pub id: String,
    pub state: PowerState,
}

/// Invoke the handler bound to the matched operation.
pub async fn invoke(
    operation: Operation,
    state: &AppState,
    _request: Request<Body>,
    params: PathParams,
) -> Response {
    match operation {
        Operation::Version => version(),
        Operation::Refresh => refresh(state),
        Operation::EnvAll => env_all(state, &params),
        Operation::EnvSingle => env_single(state, &params),
        Operation::EnvPowerToggle => env_power_toggle(state, &params),
        Operation::InstancePowerToggle => instance_power_toggle(state, &params),
    }
}

fn version() -> Response {
    Json(VersionInfo {
        version: env!("CARGO_PKG_VERSION"),
        api_version: API_VERSION,
    })
    .into_response()
}

fn refresh(state: &AppState) -> Response {
    let environments = state.registry.refresh();
    let receipt = RefreshReceipt {
        refresh_id: Uuid::new_v4(),
        environments,
        status: "refreshed",
    };
    tracing::info!(refresh_id = %receipt.refresh_id, environments, "Inventory refreshed");
    Json(receipt).into_response()
}

fn env_all(state: &AppState, params: &PathParams) -> Response {
    let envs = state.registry.all();
    match params.get("group").map(String::as_str) {
        Some("details") => Json(envs).into_response(),
        _ => Json(envs.iter().map(summarize).collect::<Vec<_>>()).into_response(),
    }
}

fn env_single(state: &AppState, params: &PathParams) -> Response {
    let env_id = params.get("env-id").map(String::as_str).unwrap_or_default();
    let Some(env) = state.registry.get(env_id) else {
        return not_found("environment not found");
    };
    match params.get("group").map(String::as_str) {
        Some("details") => Json(env).into_response(),
        _ => Json(summarize(&env)).into_response(),
    }
}

fn env_power_toggle(state: &AppState, params: &PathParams) -> Response {
    let env_id = params.get("env-id").map(String::as_str).unwrap_or_default();
    let Some(power) = target_state(params) else {
        return not_found("unknown power action");
    };
    match state.registry.set_env_power(env_id, power) {
        Some(instances_affected) => {
            tracing::info!(env_id, state = ?power, instances_affected, "Environment power toggled");
            Json(EnvPowerChange {
                id: env_id.to_string(),
                state: power,
                instances_affected,
            })
            .into_response()
        }
        None => not_found("environment not found"),
    }
}

fn instance_power_toggle(state: &AppState, params: &PathParams) -> Response {
    let instance_id = params
        .get("instance-id")
        .map(String::as_str)
        .unwrap_or_default();
    let Some(power) = target_state(params) else {
        return not_found("unknown power action");
    };
    match state.registry.set_instance_power(instance_id, power) {
        Some(instance) => {
            tracing::info!(instance_id, state = ?power, "Instance power toggled");
            Json(InstancePowerChange {
                id: instance.id,
                state: instance.power,
            })
            .into_response()
        }
        None => not_found("instance not found"),
    }
}

fn summarize(env: &Environment) -> EnvironmentSummary {
    EnvironmentSummary {
        id: env.id.clone(),
        name: env.name.clone(),
        instances: env.instances.len(),
        running: running_count(&env.instances),
    }
}

fn running_count(instances: &[Instance]) -> usize {
    instances
        .iter()
        .filter(|i| i.power == PowerState::Running)
        .count()
}

// The router only admits start|stop here; anything else would be a table bug.
fn target_state(params: &PathParams) -> Option<PowerState> {
    params
        .get("state")
        .and_then(|action| PowerState::from_action(action))
}

fn not_found(message: &'static str) -> Response {
    (StatusCode::NOT_FOUND, message).into_response()
}
