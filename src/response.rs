use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct List<T> {
    items: Vec<T>,
    count: usize,
}

impl<T> List<T> {
    pub fn new(items: Vec<T>) -> Self {
        let count = items.len();
        List { items, count }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateResponse {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub id: i64,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct ApplyResponse {
    pub participation_id: i64,
}
