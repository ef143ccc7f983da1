//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each CRUD operation is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The async wrappers (`list_all`, `create`, ...) glue the two halves together
//! through a caller-supplied `Transport`, one attempt per call.

use serde::de::DeserializeOwned;

use crate::error::FetchFailure;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{NewTodo, TodoId, TodoItem, TodoPatch};

/// Stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/todos", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_todo(&self, id: TodoId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/todos/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_todo(&self, input: &NewTodo) -> Result<HttpRequest, FetchFailure> {
        let body = serde_json::to_string(input).map_err(|e| FetchFailure::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/todos", self.base_url),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_update_todo(&self, id: TodoId, input: &TodoPatch) -> Result<HttpRequest, FetchFailure> {
        let body = serde_json::to_string(input).map_err(|e| FetchFailure::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/todos/{id}", self.base_url),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_delete_todo(&self, id: TodoId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/todos/{id}", self.base_url),
            headers: json_headers(),
            body: None,
        }
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<TodoItem>, FetchFailure> {
        check_status(&response)?;
        parse_body(&response.body)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<TodoItem, FetchFailure> {
        check_status(&response)?;
        parse_body(&response.body)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<TodoItem, FetchFailure> {
        check_status(&response)?;
        parse_body(&response.body)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<TodoItem, FetchFailure> {
        check_status(&response)?;
        parse_body(&response.body)
    }

    /// Backends may answer a delete with the removed record or with nothing.
    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<Option<TodoItem>, FetchFailure> {
        check_status(&response)?;
        let body = response.body.trim();
        if body.is_empty() || body == "null" {
            return Ok(None);
        }
        parse_body(body).map(Some)
    }

    pub async fn list_all<T>(&self, transport: &T) -> Result<Vec<TodoItem>, FetchFailure>
    where
        T: Transport + ?Sized,
    {
        let response = transport.execute(self.build_list_todos()).await?;
        self.parse_list_todos(response)
    }

    pub async fn get<T>(&self, transport: &T, id: TodoId) -> Result<TodoItem, FetchFailure>
    where
        T: Transport + ?Sized,
    {
        let response = transport.execute(self.build_get_todo(id)).await?;
        self.parse_get_todo(response)
    }

    pub async fn create<T>(&self, transport: &T, input: &NewTodo) -> Result<TodoItem, FetchFailure>
    where
        T: Transport + ?Sized,
    {
        let response = transport.execute(self.build_create_todo(input)?).await?;
        self.parse_create_todo(response)
    }

    pub async fn update<T>(&self, transport: &T, id: TodoId, input: &TodoPatch) -> Result<TodoItem, FetchFailure>
    where
        T: Transport + ?Sized,
    {
        let response = transport.execute(self.build_update_todo(id, input)?).await?;
        self.parse_update_todo(response)
    }

    pub async fn delete<T>(&self, transport: &T, id: TodoId) -> Result<Option<TodoItem>, FetchFailure>
    where
        T: Transport + ?Sized,
    {
        let response = transport.execute(self.build_delete_todo(id)).await?;
        self.parse_delete_todo(response)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, FetchFailure> {
    serde_json::from_str(body).map_err(|e| FetchFailure::Deserialization(e.to_string()))
}

/// Map non-2xx status codes to the appropriate `FetchFailure` variant.
fn check_status(response: &HttpResponse) -> Result<(), FetchFailure> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(FetchFailure::NotFound);
    }
    Err(FetchFailure::Status {
        status: response.status,
        body: response.body.clone(),
    })
}
