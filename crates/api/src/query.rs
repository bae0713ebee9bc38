//! Query parameter types for API handlers.

use hookforge_core::gallery::ListGenerationsRequest;
use hookforge_core::types::DbId;
use serde::Deserialize;

/// Gallery listing parameters (`?category=&sort=&page=&page_size=`).
///
/// Missing values fall through to the service, which applies the configured
/// defaults and caps.
#[derive(Debug, Default, Deserialize)]
pub struct GalleryParams {
    pub category: Option<DbId>,
    pub sort: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl From<GalleryParams> for ListGenerationsRequest {
    fn from(params: GalleryParams) -> Self {
        Self {
            category_id: params.category,
            sort: params.sort.unwrap_or_default(),
            page: params.page.unwrap_or(1),
            page_size: params.page_size.unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_params_defer_to_service_defaults() {
        let request = ListGenerationsRequest::from(GalleryParams::default());
        assert_eq!(request.category_id, None);
        assert_eq!(request.sort, "");
        assert_eq!(request.page, 1);
        assert_eq!(request.page_size, 0);
    }

    #[test]
    fn category_param_maps_to_category_id() {
        let request = ListGenerationsRequest::from(GalleryParams {
            category: Some(3),
            sort: Some("most_viewed".into()),
            page: Some(2),
            page_size: Some(5),
        });
        assert_eq!(request.category_id, Some(3));
        assert_eq!(request.sort, "most_viewed");
        assert_eq!(request.page, 2);
        assert_eq!(request.page_size, 5);
    }
}
