use sea_orm::QuerySelect;
use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use utoipa::{IntoParams, ToSchema};

/// Page metadata carried by paged queries and echoed back in `X-Pagination`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PaginationData {
    pub page_number: i32,
    pub page_size: i32,
}

impl PaginationData {
    pub fn new(page_number: i32, page_size: i32) -> Self {
        Self {
            page_number,
            page_size,
        }
    }

    /// Paging applies once either value is positive
    pub fn is_active(&self) -> bool {
        self.page_number > 0 || self.page_size > 0
    }

    pub fn skip(&self) -> u64 {
        let skip = (i64::from(self.page_number) - 1) * i64::from(self.page_size);
        skip.max(0) as u64
    }

    pub fn take(&self) -> u64 {
        i64::from(self.page_size).max(0) as u64
    }

    /// Adds OFFSET/LIMIT when paging is active, leaves the query untouched otherwise
    pub fn apply<Q: QuerySelect>(&self, query: Q) -> Q {
        if self.is_active() {
            query.offset(self.skip()).limit(self.take())
        } else {
            query
        }
    }
}

/// Query string of list endpoints: `?pageNumber=&pageSize=`
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[cfg_attr(feature = "server", derive(IntoParams))]
#[cfg_attr(feature = "server", into_params(parameter_in = Query))]
#[serde(rename_all = "camelCase")]
pub struct RequestParams {
    pub page_number: Option<i32>,
    pub page_size: Option<i32>,
}

impl RequestParams {
    /// Paging is requested when at least one parameter is present and non-zero
    pub fn use_paging(&self) -> bool {
        self.page_number.unwrap_or_default() != 0 || self.page_size.unwrap_or_default() != 0
    }

    pub fn pagination(&self) -> PaginationData {
        PaginationData::new(
            self.page_number.unwrap_or_default(),
            self.page_size.unwrap_or_default(),
        )
    }
}

/// Result of a paged list query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub pagination: PaginationData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_take_arithmetic() {
        let page = PaginationData::new(2, 2);
        assert_eq!((page.skip(), page.take()), (2, 2));

        let page = PaginationData::new(3, 999);
        assert_eq!((page.skip(), page.take()), (1998, 999));
    }

    #[test]
    fn test_non_positive_values_clamp_to_zero() {
        let page = PaginationData::new(0, 5);
        assert!(page.is_active());
        assert_eq!((page.skip(), page.take()), (0, 5));

        let page = PaginationData::new(-3, -1);
        assert!(!page.is_active());
        assert_eq!((page.skip(), page.take()), (4, 0));
    }

    #[test]
    fn test_request_params() {
        assert!(!RequestParams::default().use_paging());

        let params = RequestParams {
            page_number: Some(2),
            page_size: None,
        };
        assert!(params.use_paging());
        assert_eq!(params.pagination(), PaginationData::new(2, 0));
    }

    #[test]
    fn test_pagination_header_shape() {
        let json = serde_json::to_string(&PaginationData::new(2, 10)).unwrap();
        assert_eq!(json, r#"{"pageNumber":2,"pageSize":10}"#);
    }
}
