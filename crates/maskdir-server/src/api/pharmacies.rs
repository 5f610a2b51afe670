use axum::{extract::Query, extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use maskdir_core::{
    filter_indices, haversine_km, paginate, sort_indices_by_distance, total_pages,
    FilterCondition, Pharmacy, Point, MARKER_CAP,
};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, ResponseMeta};
use crate::state::AppState;

/// One pharmacy as served to the list view.
#[derive(Debug, Serialize)]
pub(super) struct PharmacyItem {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub mask_adult: i64,
    pub mask_child: i64,
    pub updated: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl PharmacyItem {
    fn from_record(ph: &Pharmacy) -> Self {
        let point = ph.point();
        Self {
            id: ph.properties.id,
            name: ph.properties.name.clone(),
            address: ph.properties.address.clone(),
            phone: ph.properties.phone.clone(),
            mask_adult: ph.properties.mask_adult,
            mask_child: ph.properties.mask_child,
            updated: ph.properties.updated.clone(),
            latitude: point.map(|p| p.lat),
            longitude: point.map(|p| p.lng),
        }
    }
}

/// A nearby pin: the list item plus its distance from the reference.
#[derive(Debug, Serialize)]
pub(super) struct NearbyItem {
    #[serde(flatten)]
    pub pharmacy: PharmacyItem,
    pub distance_km: f64,
}

#[derive(Debug, Serialize)]
pub(super) struct PageMeta {
    pub total_matching: usize,
    pub total_pages: usize,
    pub page: usize,
    pub page_size: usize,
}

/// List responses carry the pagination block next to the data envelope so
/// clients can render controls without a second request.
#[derive(Debug, Serialize)]
pub(super) struct PagedResponse<T: Serialize> {
    pub data: T,
    pub pagination: PageMeta,
    pub meta: ResponseMeta,
}

#[derive(Debug, Deserialize)]
pub(super) struct ListParams {
    /// Substring matched against name or address (case-sensitive, raw).
    q: Option<String>,
    #[serde(default)]
    adult: bool,
    #[serde(default)]
    child: bool,
    page: Option<usize>,
    page_size: Option<usize>,
    /// `sort=distance` enables proximity ordering when lat/lng are usable.
    sort: Option<String>,
    lat: Option<f64>,
    lng: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(super) struct NearbyParams {
    lat: Option<f64>,
    lng: Option<f64>,
    limit: Option<usize>,
}

pub(super) async fn list_pharmacies(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<ListParams>,
) -> Result<Json<PagedResponse<Vec<PharmacyItem>>>, ApiError> {
    let directory = state.directory.read().await;
    if !directory.has_snapshot() {
        return Err(ApiError::new(
            req_id.0,
            "feed_loading",
            "feed snapshot not yet available",
        ));
    }
    let snapshot = &directory.snapshot;

    let condition = FilterCondition::new(params.q.as_deref(), params.adult, params.child);
    let mut display = filter_indices(snapshot, &condition);

    // Proximity sort is best-effort: no/partial reference means the feed
    // order stands, mirroring a denied geolocation prompt.
    if params.sort.as_deref() == Some("distance") {
        if let (Some(lat), Some(lng)) = (params.lat, params.lng) {
            display = sort_indices_by_distance(snapshot, &display, Point { lat, lng });
        }
    }

    let page = params.page.unwrap_or(1).max(1);
    let page_size = normalize_page_size(params.page_size);
    let data: Vec<PharmacyItem> = paginate(&display, page, page_size)
        .iter()
        .filter_map(|&idx| snapshot.get(idx).map(PharmacyItem::from_record))
        .collect();

    Ok(Json(PagedResponse {
        data,
        pagination: PageMeta {
            total_matching: display.len(),
            total_pages: total_pages(display.len(), page_size),
            page,
            page_size,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn list_nearby_pharmacies(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<NearbyParams>,
) -> Result<Json<ApiResponse<Vec<NearbyItem>>>, ApiError> {
    let (Some(lat), Some(lng)) = (params.lat, params.lng) else {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "lat and lng query parameters are required",
        ));
    };
    let reference = Point { lat, lng };

    let directory = state.directory.read().await;
    if !directory.has_snapshot() {
        return Err(ApiError::new(
            req_id.0,
            "feed_loading",
            "feed snapshot not yet available",
        ));
    }
    let snapshot = &directory.snapshot;

    // The map view ignores the list filter: pins come from all records.
    let all: Vec<usize> = (0..snapshot.len()).collect();
    let ordered = sort_indices_by_distance(snapshot, &all, reference);
    let limit = params.limit.unwrap_or(MARKER_CAP).clamp(1, MARKER_CAP);

    let data: Vec<NearbyItem> = ordered
        .into_iter()
        .filter_map(|idx| {
            let ph = snapshot.get(idx)?;
            // Pins need a location; records with malformed geometry are
            // list-only.
            let point = ph.point()?;
            Some(NearbyItem {
                pharmacy: PharmacyItem::from_record(ph),
                distance_km: haversine_km(reference, point),
            })
        })
        .take(limit)
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Unknown sizes fall back to the default, same as the pipeline.
fn normalize_page_size(requested: Option<usize>) -> usize {
    match requested {
        Some(size) if maskdir_core::PAGE_SIZE_CHOICES.contains(&size) => size,
        _ => maskdir_core::DEFAULT_PAGE_SIZE,
    }
}
