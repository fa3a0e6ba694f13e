use crate::models::{DateInputs, ReportResponse, StateResponse};
use crate::state::AppState;
use crate::ui::{button_label, render_index, render_results};
use axum::{
    extract::State,
    response::{Html, Redirect},
    Form, Json,
};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let (inputs, request) = state.view.snapshot().await;
    Html(render_index(&inputs, &request))
}

pub async fn get_state(State(state): State<AppState>) -> Json<StateResponse> {
    let (inputs, state) = state.view.snapshot().await;
    Json(StateResponse { inputs, state })
}

pub async fn submit_form(
    State(state): State<AppState>,
    Form(inputs): Form<DateInputs>,
) -> Redirect {
    state.view.request_report(inputs).await;
    Redirect::to("/")
}

pub async fn request_report(
    State(state): State<AppState>,
    Json(inputs): Json<DateInputs>,
) -> Json<ReportResponse> {
    let state = state.view.request_report(inputs).await;
    Json(ReportResponse {
        results_html: render_results(&state),
        button_label: button_label(&state).to_string(),
        state,
    })
}
