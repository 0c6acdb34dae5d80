use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct Meta {
    pub total: Option<i64>,
}

impl Meta {
    pub fn total(total: usize) -> Self {
        Self {
            total: Some(total as i64),
        }
    }

    pub fn empty() -> Self {
        Self { total: None }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    /// Envelope for a list, with `meta.total` set to its length.
    pub fn list(message: impl Into<String>, items: Vec<T>) -> Self {
        let meta = Meta::total(items.len());
        Self::success(message, items, Some(meta))
    }
}
