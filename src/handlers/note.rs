use crate::app_state::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{CreateNoteRequest, Note, NoteForm, NoteIdQuery};
use crate::services::note::parse_note_id;
use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{Html, Json, Redirect},
    Form,
};
use minijinja::context;
use std::sync::Arc;

pub async fn list_notes(State(state): State<Arc<AppState>>) -> Json<Vec<Note>> {
    Json(state.note_service.list_notes())
}

pub async fn create_note(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Note>)> {
    let Json(request) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let note = state.note_service.create_note(request)?;
    Ok((StatusCode::CREATED, Json(note)))
}

pub async fn get_note_by_query(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NoteIdQuery>,
) -> AppResult<Json<Note>> {
    let note_id = parse_note_id(&query)?;
    Ok(Json(state.note_service.get_note(note_id)?))
}

pub async fn delete_note_by_query(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NoteIdQuery>,
) -> AppResult<Json<Note>> {
    let note_id = parse_note_id(&query)?;
    Ok(Json(state.note_service.delete_note(note_id)?))
}

pub async fn get_note(
    State(state): State<Arc<AppState>>,
    Path(note_id): Path<String>,
) -> AppResult<Json<Note>> {
    let note_id = parse_note_id(&NoteIdQuery { id: Some(note_id) })?;
    Ok(Json(state.note_service.get_note(note_id)?))
}

pub async fn delete_note(
    State(state): State<Arc<AppState>>,
    Path(note_id): Path<String>,
) -> AppResult<Json<Note>> {
    let note_id = parse_note_id(&NoteIdQuery { id: Some(note_id) })?;
    Ok(Json(state.note_service.delete_note(note_id)?))
}

// HTML notes page
pub async fn notes_page(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let notes = state.note_service.list_notes();
    let html = state.templates.render("notes.html", context! { notes => notes })?;
    Ok(Html(html))
}

// Form post from the notes page; redirects back on success
pub async fn create_note_from_form(
    State(state): State<Arc<AppState>>,
    form: Result<Form<NoteForm>, FormRejection>,
) -> AppResult<Redirect> {
    let Form(form) = form.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    state.note_service.create_note(form.into())?;
    Ok(Redirect::to("/notes"))
}
