//! REST surface of the Gwirian API.
//!
//! Each function describes exactly one call as a [`Request`]; sessions hand
//! requests to a [`Transport`](crate::transport::Transport). Domain records
//! stay opaque JSON.

use crate::transport::{Method, Outcome, Transport};
use serde::Serialize;
use serde_json::{json, Value};

/// One API call: verb, path under `/api/v1`, optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl Request {
    fn get(path: String) -> Self {
        Self {
            method: Method::Get,
            path,
            body: None,
        }
    }

    fn delete(path: String) -> Self {
        Self {
            method: Method::Delete,
            path,
            body: None,
        }
    }

    /// `{ <key>: <payload> }`
    fn wrapped(method: Method, path: String, key: &str, payload: &impl Serialize) -> Self {
        let payload = serde_json::to_value(payload).unwrap_or(Value::Null);
        Self {
            method,
            path,
            body: Some(json!({ key: payload })),
        }
    }

    pub async fn send(&self, transport: &dyn Transport) -> Outcome {
        transport
            .send(self.method, &self.path, self.body.as_ref())
            .await
    }
}

/// Fields accepted when creating or updating a feature.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeatureBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_list: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScenarioBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub then: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScenarioExecutionBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executed_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_list: Option<String>,
}

fn project_path(project_id: &str) -> String {
    format!("/projects/{}", project_id)
}

fn features_path(project_id: &str) -> String {
    format!("/projects/{}/features", project_id)
}

fn feature_path(project_id: &str, feature_id: &str) -> String {
    format!("{}/{}", features_path(project_id), feature_id)
}

fn scenarios_path(project_id: &str, feature_id: &str) -> String {
    format!("{}/scenarios", feature_path(project_id, feature_id))
}

fn scenario_path(project_id: &str, feature_id: &str, scenario_id: &str) -> String {
    format!("{}/{}", scenarios_path(project_id, feature_id), scenario_id)
}

fn executions_path(project_id: &str, feature_id: &str, scenario_id: &str) -> String {
    format!(
        "{}/scenario_executions",
        scenario_path(project_id, feature_id, scenario_id)
    )
}

fn execution_path(
    project_id: &str,
    feature_id: &str,
    scenario_id: &str,
    execution_id: &str,
) -> String {
    format!(
        "{}/{}",
        executions_path(project_id, feature_id, scenario_id),
        execution_id
    )
}

// Projects

pub fn list_projects() -> Request {
    Request::get("/projects".to_string())
}

pub fn get_project(project_id: &str) -> Request {
    Request::get(project_path(project_id))
}

pub fn search_project(project_id: &str, query: &str, limit: Option<u32>) -> Request {
    let mut path = format!(
        "{}/search?q={}",
        project_path(project_id),
        urlencoding::encode(query)
    );
    if let Some(limit) = limit {
        path.push_str(&format!("&limit={}", limit));
    }
    Request::get(path)
}

// Features

pub fn list_features(project_id: &str) -> Request {
    Request::get(features_path(project_id))
}

pub fn get_feature(project_id: &str, feature_id: &str) -> Request {
    Request::get(feature_path(project_id, feature_id))
}

pub fn create_feature(project_id: &str, body: &FeatureBody) -> Request {
    Request::wrapped(Method::Post, features_path(project_id), "feature", body)
}

pub fn update_feature(project_id: &str, feature_id: &str, body: &FeatureBody) -> Request {
    Request::wrapped(
        Method::Patch,
        feature_path(project_id, feature_id),
        "feature",
        body,
    )
}

pub fn delete_feature(project_id: &str, feature_id: &str) -> Request {
    Request::delete(feature_path(project_id, feature_id))
}

// Scenarios

pub fn list_scenarios(project_id: &str, feature_id: &str) -> Request {
    Request::get(scenarios_path(project_id, feature_id))
}

pub fn get_scenario(project_id: &str, feature_id: &str, scenario_id: &str) -> Request {
    Request::get(scenario_path(project_id, feature_id, scenario_id))
}

pub fn create_scenario(project_id: &str, feature_id: &str, body: &ScenarioBody) -> Request {
    Request::wrapped(
        Method::Post,
        scenarios_path(project_id, feature_id),
        "scenario",
        body,
    )
}

pub fn update_scenario(
    project_id: &str,
    feature_id: &str,
    scenario_id: &str,
    body: &ScenarioBody,
) -> Request {
    Request::wrapped(
        Method::Patch,
        scenario_path(project_id, feature_id, scenario_id),
        "scenario",
        body,
    )
}

pub fn delete_scenario(project_id: &str, feature_id: &str, scenario_id: &str) -> Request {
    Request::delete(scenario_path(project_id, feature_id, scenario_id))
}

// Scenario executions

pub fn list_scenario_executions(project_id: &str, feature_id: &str, scenario_id: &str) -> Request {
    Request::get(executions_path(project_id, feature_id, scenario_id))
}

pub fn get_scenario_execution(
    project_id: &str,
    feature_id: &str,
    scenario_id: &str,
    execution_id: &str,
) -> Request {
    Request::get(execution_path(project_id, feature_id, scenario_id, execution_id))
}

pub fn create_scenario_execution(
    project_id: &str,
    feature_id: &str,
    scenario_id: &str,
    body: &ScenarioExecutionBody,
) -> Request {
    Request::wrapped(
        Method::Post,
        executions_path(project_id, feature_id, scenario_id),
        "scenario_execution",
        body,
    )
}

pub fn update_scenario_execution(
    project_id: &str,
    feature_id: &str,
    scenario_id: &str,
    execution_id: &str,
    body: &ScenarioExecutionBody,
) -> Request {
    Request::wrapped(
        Method::Patch,
        execution_path(project_id, feature_id, scenario_id, execution_id),
        "scenario_execution",
        body,
    )
}

pub fn delete_scenario_execution(
    project_id: &str,
    feature_id: &str,
    scenario_id: &str,
    execution_id: &str,
) -> Request {
    Request::delete(execution_path(project_id, feature_id, scenario_id, execution_id))
}
