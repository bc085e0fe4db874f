use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::StudentStorage;
use crate::handlers::students::{list_students, submit_student_form};

#[derive(Clone)]
pub struct RecordsState {
    pub storage: StudentStorage,
    /// Display-only region label.
    pub region: Option<Arc<str>>,
}

impl RecordsState {
    pub fn new(storage: StudentStorage, region: Option<&str>) -> Self {
        Self {
            storage,
            region: region.map(Arc::from),
        }
    }

    pub fn from_config(storage: StudentStorage, cfg: &Config) -> Self {
        Self::new(storage, cfg.aws_region.as_deref())
    }
}

pub fn records_router(state: RecordsState) -> Router {
    Router::new()
        .route("/", get(list_students).post(submit_student_form))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
