//! Stateless HTTP request builder and response parser for the vehicle API.
//!
//! # Design
//! `VehicleClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. `VehicleService` glues the two halves together over a
//! `Transport`.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Vehicle, VehicleStatus};

/// Local development endpoint of the vehicle backend.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

const JSON_HEADERS: [(&str, &str); 1] = [("content-type", "application/json")];

#[derive(Debug, Clone)]
pub struct VehicleClient {
    base_url: String,
}

impl Default for VehicleClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl VehicleClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection(&self) -> String {
        format!("{}/vehicles", self.base_url)
    }

    fn item(&self, id: i64) -> String {
        format!("{}/vehicles/{id}", self.base_url)
    }

    fn lookup(&self, by: &str, value: &str) -> String {
        format!("{}/vehicles/{by}/{}", self.base_url, urlencoding::encode(value))
    }

    pub fn build_list_vehicles(&self) -> HttpRequest {
        get(self.collection())
    }

    pub fn build_get_vehicle(&self, id: i64) -> HttpRequest {
        get(self.item(id))
    }

    pub fn build_get_vehicle_by_vin(&self, vin: &str) -> HttpRequest {
        get(self.lookup("vin", vin))
    }

    pub fn build_list_by_make(&self, make: &str) -> HttpRequest {
        get(self.lookup("make", make))
    }

    pub fn build_list_by_model(&self, model: &str) -> HttpRequest {
        get(self.lookup("model", model))
    }

    pub fn build_list_by_status(&self, status: VehicleStatus) -> HttpRequest {
        get(self.lookup("status", status.as_str()))
    }

    pub fn build_create_vehicle(&self, draft: &Vehicle) -> Result<HttpRequest, ApiError> {
        with_json_body(HttpMethod::Post, self.collection(), draft)
    }

    /// The whole record is sent; the server replaces every mutable field.
    pub fn build_update_vehicle(&self, id: i64, record: &Vehicle) -> Result<HttpRequest, ApiError> {
        with_json_body(HttpMethod::Put, self.item(id), record)
    }

    pub fn build_delete_vehicle(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.item(id),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Status travels in the query string; the body is empty.
    pub fn build_update_status(&self, id: i64, status: VehicleStatus) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Patch,
            path: format!(
                "{}/status?status={}",
                self.item(id),
                urlencoding::encode(status.as_str())
            ),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_vehicles(&self, response: HttpResponse) -> Result<Vec<Vehicle>, ApiError> {
        check_status(&response, &[200])?;
        decode(&response)
    }

    pub fn parse_get_vehicle(&self, response: HttpResponse) -> Result<Vehicle, ApiError> {
        check_status(&response, &[200])?;
        decode(&response)
    }

    pub fn parse_create_vehicle(&self, response: HttpResponse) -> Result<Vehicle, ApiError> {
        check_status(&response, &[201, 200])?;
        decode(&response)
    }

    pub fn parse_update_vehicle(&self, response: HttpResponse) -> Result<Vehicle, ApiError> {
        check_status(&response, &[200])?;
        decode(&response)
    }

    pub fn parse_delete_vehicle(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, &[204, 200])
    }

    pub fn parse_update_status(&self, response: HttpResponse) -> Result<Vehicle, ApiError> {
        check_status(&response, &[200])?;
        decode(&response)
    }
}

fn get(path: String) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        path,
        headers: Vec::new(),
        body: None,
    }
}

fn with_json_body(method: HttpMethod, path: String, vehicle: &Vehicle) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(vehicle).map_err(|e| ApiError::SerializationError(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: JSON_HEADERS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        body: Some(body),
    })
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: &[u16]) -> Result<(), ApiError> {
    if expected.contains(&response.status) {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
