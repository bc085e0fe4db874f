use axum::{
    Form,
    extract::{OriginalUri, State, rejection::FormRejection},
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::Utc;
use headers::HeaderMapExt;
use tracing::{debug, info, warn};

use crate::db::{Student, StudentStorage};
use crate::forms::{FormAction, StudentForm};
use crate::region::{RegionBanner, XOriginRegion};
use crate::render::{StudentsPage, students_page};
use crate::router::RecordsState;

const FETCH_ERROR: &str = "Error fetching students: ";
const ADD_ERROR: &str = "Error adding student: ";
const DELETE_ERROR: &str = "Error deleting student: ";

/// GET / -> the form and the full listing, newest first.
pub async fn list_students(State(state): State<RecordsState>, headers: HeaderMap) -> Html<String> {
    let (students, error) = fetch_students(&state.storage).await;
    render(&state, &headers, &students, error.as_deref())
}

/// POST / -> add or delete, then redirect back to GET on success.
///
/// The listing is read before the mutation; a failed mutation re-renders
/// that listing with an inline error.
pub async fn submit_student_form(
    State(state): State<RecordsState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    form: Result<Form<StudentForm>, FormRejection>,
) -> Response {
    // An undecodable body is treated like a submission with no action.
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            debug!(error = %rejection, "unreadable form body");
            StudentForm::default()
        }
    };
    let (students, mut error) = fetch_students(&state.storage).await;

    match form.action() {
        Ok(FormAction::Add(new_student)) => match state.storage.insert(&new_student).await {
            Ok(id) => {
                info!(id, name = %new_student.name, "student added");
                return Redirect::to(uri.path()).into_response();
            }
            Err(e) => {
                warn!(error = %e, "failed to add student");
                error = Some(e.inline_message(ADD_ERROR));
            }
        },
        Ok(FormAction::Delete(Some(id))) => match state.storage.delete(id).await {
            Ok(rows) => {
                info!(id, rows, "student delete executed");
                return Redirect::to(uri.path()).into_response();
            }
            Err(e) => {
                warn!(id, error = %e, "failed to delete student");
                error = Some(e.inline_message(DELETE_ERROR));
            }
        },
        Ok(FormAction::Delete(None)) => {
            debug!(id = ?form.id, "delete id is not a row id; nothing to remove");
            return Redirect::to(uri.path()).into_response();
        }
        Ok(FormAction::Ignored) => {
            debug!(action = ?form.action, "form submission ignored");
        }
        Err(e) => {
            debug!(error = %e, "student form rejected");
            error = Some(e.inline_message(ADD_ERROR));
        }
    }

    render(&state, &headers, &students, error.as_deref()).into_response()
}

/// Current listing, or an empty one plus the inline message on failure.
async fn fetch_students(storage: &StudentStorage) -> (Vec<Student>, Option<String>) {
    match storage.list_recent().await {
        Ok(students) => (students, None),
        Err(e) => {
            warn!(error = %e, "failed to fetch students");
            (Vec::new(), Some(e.inline_message(FETCH_ERROR)))
        }
    }
}

fn render(
    state: &RecordsState,
    headers: &HeaderMap,
    students: &[Student],
    error: Option<&str>,
) -> Html<String> {
    let origin = headers.typed_get::<XOriginRegion>();
    let region = RegionBanner::from_parts(
        state.region.as_deref(),
        origin.as_ref().map(|o| o.0.as_str()),
    );
    Html(students_page(&StudentsPage {
        region: &region,
        students,
        error,
        rendered_at: Utc::now(),
    }))
}
