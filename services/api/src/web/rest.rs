//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use healthtrack_core::{
    emergency_contacts, filter_facilities,
    links::{directions_url, format_distance, tel_link},
    template_for, total_available_beds, AvailabilityLevel, Coordinate, CoreError,
    EmergencyContact, FacilityQuery, FacilityRecord, IntentCategory, PortError, RankedFacility,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::{IntoParams, OpenApi, ToSchema};

/// Facilities returned by `/facilities/nearest` when no limit is given.
const DEFAULT_NEAREST_LIMIT: usize = 5;
const MAX_NEAREST_LIMIT: usize = 10;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        list_facilities_handler,
        get_facility_handler,
        nearest_facilities_handler,
        classify_handler,
        emergency_contacts_handler,
    ),
    components(
        schemas(
            FacilityResponse,
            BedResponse,
            RankedFacilityResponse,
            ClassifyRequest,
            ClassifyResponse,
            EmergencyContactResponse
        )
    ),
    tags(
        (
            name = "HealthTrack API",
            description = "Facility search, nearest-hospital ranking and chat triage."
        )
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

#[derive(Serialize, ToSchema)]
pub struct BedResponse {
    category: String,
    available: u32,
    total: u32,
    /// One of `plenty`, `limited` or `scarce`.
    #[schema(value_type = String)]
    level: AvailabilityLevel,
}

/// A facility as shown on a hospital card.
#[derive(Serialize, ToSchema)]
pub struct FacilityResponse {
    id: String,
    name: String,
    address: String,
    phone: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    city: Option<String>,
    facility_type: Option<String>,
    specialties: Vec<String>,
    beds: Vec<BedResponse>,
    rating: Option<f32>,
    total_available_beds: u32,
    call_link: String,
    directions_url: String,
}

impl From<FacilityRecord> for FacilityResponse {
    fn from(facility: FacilityRecord) -> Self {
        let total_available_beds = total_available_beds(&facility);
        let call_link = tel_link(&facility.phone);
        let directions_url = directions_url(&facility);
        Self {
            beds: facility
                .beds
                .into_iter()
                .map(|b| BedResponse {
                    level: AvailabilityLevel::from_available(b.available),
                    category: b.category,
                    available: b.available,
                    total: b.total,
                })
                .collect(),
            id: facility.id,
            name: facility.name,
            address: facility.address,
            phone: facility.phone,
            latitude: facility.latitude,
            longitude: facility.longitude,
            city: facility.city,
            facility_type: facility.facility_type,
            specialties: facility.specialties,
            rating: facility.rating,
            total_available_beds,
            call_link,
            directions_url,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct RankedFacilityResponse {
    #[serde(flatten)]
    facility: FacilityResponse,
    distance_km: f64,
    /// e.g. "850m" or "3.2km".
    distance_label: String,
    eta_minutes: u32,
}

impl From<RankedFacility> for RankedFacilityResponse {
    fn from(ranked: RankedFacility) -> Self {
        Self {
            distance_label: format_distance(ranked.distance_km),
            distance_km: ranked.distance_km,
            eta_minutes: ranked.eta_minutes,
            facility: ranked.facility.into(),
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct ClassifyRequest {
    text: String,
}

#[derive(Serialize, ToSchema)]
pub struct ClassifyResponse {
    #[schema(value_type = String)]
    category: IntentCategory,
    text: String,
    show_nearest_facilities: bool,
    show_emergency_contacts: bool,
    is_emergency: bool,
}

#[derive(Serialize, ToSchema)]
pub struct EmergencyContactResponse {
    id: String,
    name: String,
    phone: String,
    description: String,
    call_link: String,
}

impl From<&EmergencyContact> for EmergencyContactResponse {
    fn from(contact: &EmergencyContact) -> Self {
        Self {
            id: contact.id.to_string(),
            name: contact.name.to_string(),
            phone: contact.phone.to_string(),
            description: contact.description.to_string(),
            call_link: tel_link(contact.phone),
        }
    }
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Substring of the facility name or city.
    q: Option<String>,
    specialty: Option<String>,
    /// Bed category that must have a free bed, e.g. "ICU".
    bed_type: Option<String>,
    facility_type: Option<String>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NearestParams {
    lat: f64,
    lng: f64,
    /// Between 1 and 10; defaults to 5.
    limit: Option<usize>,
}

//=========================================================================================
// Error Mapping
//=========================================================================================

fn port_failure(e: PortError) -> (StatusCode, String) {
    match e {
        PortError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{} not found", what)),
        other => {
            error!("Facility source failed: {:?}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to load facilities".to_string(),
            )
        }
    }
}

fn bad_request(e: CoreError) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, e.to_string())
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Browse and filter facilities.
#[utoipa::path(
    get,
    path = "/facilities",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching facilities", body = [FacilityResponse]),
        (status = 500, description = "Facility source unavailable")
    )
)]
pub async fn list_facilities_handler(
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let facilities = app_state
        .facilities
        .list_facilities()
        .await
        .map_err(port_failure)?;

    let query = FacilityQuery {
        text: params.q,
        specialty: params.specialty,
        bed_category: params.bed_type,
        facility_type: params.facility_type,
    };
    let body: Vec<FacilityResponse> = filter_facilities(&facilities, &query)
        .into_iter()
        .map(FacilityResponse::from)
        .collect();
    Ok(Json(body))
}

/// Fetch one facility by id.
#[utoipa::path(
    get,
    path = "/facilities/{id}",
    params(("id" = String, Path, description = "Facility identifier")),
    responses(
        (status = 200, description = "The facility", body = FacilityResponse),
        (status = 404, description = "No facility with that id")
    )
)]
pub async fn get_facility_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let facility = app_state
        .facilities
        .get_facility(&id)
        .await
        .map_err(port_failure)?;
    Ok(Json(FacilityResponse::from(facility)))
}

/// Rank facilities by distance from a coordinate.
#[utoipa::path(
    get,
    path = "/facilities/nearest",
    params(NearestParams),
    responses(
        (
            status = 200,
            description = "Facilities ordered nearest first",
            body = [RankedFacilityResponse]
        ),
        (status = 400, description = "Coordinate or limit out of range")
    )
)]
pub async fn nearest_facilities_handler(
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<NearestParams>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let origin = Coordinate::new(params.lat, params.lng).map_err(bad_request)?;
    let limit = params
        .limit
        .unwrap_or(DEFAULT_NEAREST_LIMIT)
        .min(MAX_NEAREST_LIMIT);

    let facilities = app_state
        .facilities
        .list_facilities()
        .await
        .map_err(port_failure)?;
    let ranked = app_state
        .assistant
        .ranker()
        .rank(origin, &facilities, limit)
        .map_err(bad_request)?;

    let body: Vec<RankedFacilityResponse> = ranked.into_iter().map(Into::into).collect();
    Ok(Json(body))
}

/// Classify free text and return the canned reply for its category.
#[utoipa::path(
    post,
    path = "/classify",
    request_body = ClassifyRequest,
    responses(
        (status = 200, description = "Classification result", body = ClassifyResponse)
    )
)]
pub async fn classify_handler(
    State(app_state): State<Arc<AppState>>,
    Json(req): Json<ClassifyRequest>,
) -> impl IntoResponse {
    let template = template_for(app_state.assistant.classifier().classify(&req.text));
    Json(ClassifyResponse {
        category: template.category,
        text: template.text.to_string(),
        show_nearest_facilities: template.show_nearest_facilities,
        show_emergency_contacts: template.show_emergency_contacts,
        is_emergency: template.is_emergency,
    })
}

/// The public emergency numbers.
#[utoipa::path(
    get,
    path = "/emergency-contacts",
    responses(
        (status = 200, description = "Emergency numbers", body = [EmergencyContactResponse])
    )
)]
pub async fn emergency_contacts_handler() -> impl IntoResponse {
    let body: Vec<EmergencyContactResponse> = emergency_contacts()
        .iter()
        .map(EmergencyContactResponse::from)
        .collect();
    Json(body)
}
