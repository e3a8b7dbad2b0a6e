//! API client core and admin-screen state for the vehicle service.
//!
//! # Overview
//! `VehicleClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network. `VehicleService` runs them through a
//! `Transport` and exposes one async call per REST operation.
//! `VehiclesController` holds the admin screen's state and reloads the list
//! after every successful mutation.
//!
//! # Design
//! - `VehicleClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit and the request shapes are testable offline.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod controller;
pub mod error;
pub mod http;
pub mod service;
pub mod transport;
pub mod types;

pub use client::{VehicleClient, DEFAULT_API_URL};
pub use controller::{Confirm, VehiclesController, DELETE_PROMPT};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use service::VehicleService;
pub use transport::{ReqwestTransport, Transport};
pub use types::{UnknownStatus, Vehicle, VehicleStatus, DEFAULT_STATUS};
