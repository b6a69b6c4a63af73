use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use std::path::PathBuf;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use e2s_api_shared::{
    AddAmenityReq, EditAmenityReq, HealthRes, HealthService, MainSectionRes, MutationRes,
    OrganizeReq, OrganizeRes, RemoveAmenityReq, SubSectionRes, SuggestionRes, SuggestionsReq,
    SuggestionsRes,
};
use e2s_core::{AmenityService, CoreConfig, MutationOutcome, OrganizedView, Suggestion};
use e2s_taxonomy::{MainCategory, SubKey};
use e2s_wire::{Profile, ProfileWire};

/// Application state shared across REST API handlers
///
/// Holds the amenity service, which carries the validated catalogues
/// resolved at startup.
#[derive(Clone)]
struct AppState {
    amenity_service: AmenityService,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, organize, add_amenity, edit_amenity, remove_amenity, suggestions),
    components(schemas(
        HealthRes,
        OrganizeReq,
        OrganizeRes,
        MainSectionRes,
        SubSectionRes,
        AddAmenityReq,
        EditAmenityReq,
        RemoveAmenityReq,
        MutationRes,
        SuggestionsReq,
        SuggestionRes,
        SuggestionsRes
    ))
)]
struct ApiDoc;

/// Main entry point for the E2S amenity engine
///
/// Starts the REST server with the amenity endpoints and a Swagger UI.
///
/// # Environment Variables
/// - `E2S_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `E2S_TAXONOMY_FILE`: taxonomy catalogue YAML override (default: built-in catalogue)
/// - `E2S_SUGGESTIONS_FILE`: suggestion tables YAML override (default: built-in tables)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If catalogue loading or server startup fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("e2s=info".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("E2S_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let taxonomy_file = std::env::var("E2S_TAXONOMY_FILE").ok().map(PathBuf::from);
    let suggestions_file = std::env::var("E2S_SUGGESTIONS_FILE").ok().map(PathBuf::from);

    let config = CoreConfig::resolve(taxonomy_file, suggestions_file)?;
    let amenity_service = AmenityService::new(config);

    tracing::info!("++ Starting E2S REST on {}", rest_addr);

    let rest_app = Router::new()
        .route("/health", get(health))
        .route("/amenities/organize", post(organize))
        .route("/amenities/add", post(add_amenity))
        .route("/amenities/edit", post(edit_amenity))
        .route("/amenities/remove", post(remove_amenity))
        .route("/amenities/suggestions", post(suggestions))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(AppState { amenity_service });

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, rest_app).await?;

    Ok(())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Returns the current health status of the amenity engine.
/// This endpoint is used for monitoring and load balancer health checks.
///
/// # Returns
/// * `Json<HealthRes>` - Health status response containing service status
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/amenities/organize",
    request_body = OrganizeReq,
    responses(
        (status = 200, description = "Organised amenity view", body = OrganizeRes),
        (status = 400, description = "Malformed profile document")
    )
)]
/// Organise a profile's amenity lists into the category scheme
///
/// Classifies every entry of the four amenity lists and returns the
/// two-level view. Every catalogue bucket is present in the response,
/// empty or not.
///
/// # Returns
/// * `Ok(Json<OrganizeRes>)` - The organised view
/// * `Err((StatusCode, String))` - Bad request when the profile does not parse
async fn organize(
    State(state): State<AppState>,
    Json(req): Json<OrganizeReq>,
) -> Result<Json<OrganizeRes>, (StatusCode, String)> {
    let profile = parse_profile(req.profile)?;
    let view = state.amenity_service.organize(&profile);
    Ok(Json(view_response(&view)))
}

#[utoipa::path(
    post,
    path = "/amenities/add",
    request_body = AddAmenityReq,
    responses(
        (status = 200, description = "Amenity added", body = MutationRes),
        (status = 400, description = "Malformed profile document"),
        (status = 422, description = "Mutation not applied", body = MutationRes)
    )
)]
/// Add an amenity to a profile
///
/// Appends the amenity under the given sub-category and returns the
/// rewritten profile. A blank text or an unknown sub-category yields a 422
/// response carrying the outcome, with the profile untouched.
async fn add_amenity(
    State(state): State<AppState>,
    Json(req): Json<AddAmenityReq>,
) -> Result<(StatusCode, Json<MutationRes>), (StatusCode, String)> {
    let sub = parse_sub(&req.sub_category)?;
    check_main_category(&state, &sub, req.main_category.as_deref())?;
    let mut profile = parse_profile(req.profile)?;

    let outcome = state.amenity_service.add(&mut profile, &sub, &req.text);
    mutation_response(&profile, outcome)
}

#[utoipa::path(
    post,
    path = "/amenities/edit",
    request_body = EditAmenityReq,
    responses(
        (status = 200, description = "Amenity rewritten", body = MutationRes),
        (status = 400, description = "Malformed profile document"),
        (status = 422, description = "Mutation not applied", body = MutationRes)
    )
)]
/// Rewrite an existing amenity
///
/// Replaces the text of the amenity matching the sub-category and old label,
/// keeping its position. A missing target or blank text yields a 422
/// response carrying the outcome, with the profile untouched.
async fn edit_amenity(
    State(state): State<AppState>,
    Json(req): Json<EditAmenityReq>,
) -> Result<(StatusCode, Json<MutationRes>), (StatusCode, String)> {
    let sub = parse_sub(&req.sub_category)?;
    let mut profile = parse_profile(req.profile)?;

    let outcome = state
        .amenity_service
        .edit(&mut profile, &sub, &req.old_label, &req.new_text);
    mutation_response(&profile, outcome)
}

#[utoipa::path(
    post,
    path = "/amenities/remove",
    request_body = RemoveAmenityReq,
    responses(
        (status = 200, description = "Amenity removed", body = MutationRes),
        (status = 400, description = "Malformed profile document"),
        (status = 422, description = "Mutation not applied", body = MutationRes)
    )
)]
/// Remove an amenity from a profile
///
/// Removes the amenity matching the sub-category and label. A missing target
/// yields a 422 response carrying the outcome, with the profile untouched.
async fn remove_amenity(
    State(state): State<AppState>,
    Json(req): Json<RemoveAmenityReq>,
) -> Result<(StatusCode, Json<MutationRes>), (StatusCode, String)> {
    let sub = parse_sub(&req.sub_category)?;
    let mut profile = parse_profile(req.profile)?;

    let outcome = state
        .amenity_service
        .remove(&mut profile, &sub, &req.label);
    mutation_response(&profile, outcome)
}

#[utoipa::path(
    post,
    path = "/amenities/suggestions",
    request_body = SuggestionsReq,
    responses(
        (status = 200, description = "Suggested amenities", body = SuggestionsRes),
        (status = 400, description = "Malformed profile document")
    )
)]
/// Suggest amenities the profile does not have yet
///
/// Returns the suggestion table for the establishment kind, minus amenities
/// already present. An unknown kind yields an empty list rather than an
/// error.
async fn suggestions(
    State(state): State<AppState>,
    Json(req): Json<SuggestionsReq>,
) -> Result<Json<SuggestionsRes>, (StatusCode, String)> {
    let profile = parse_profile(req.profile)?;
    let suggestions = state.amenity_service.suggest(&profile, req.kind.as_deref());
    Ok(Json(SuggestionsRes {
        suggestions: suggestions.iter().map(suggestion_response).collect(),
    }))
}

/// Parse the profile document out of a request, mapping failures to 400.
fn parse_profile(value: serde_json::Value) -> Result<ProfileWire, (StatusCode, String)> {
    Profile::from_value(value).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))
}

/// Parse a sub-category key out of a request, mapping failures to 422.
fn parse_sub(key: &str) -> Result<SubKey, (StatusCode, String)> {
    SubKey::new(key).map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))
}

/// Reject a stated main category that does not match the sub-category's
/// rubric. The check is advisory; placement always comes from the catalogue.
fn check_main_category(
    state: &AppState,
    sub: &SubKey,
    main: Option<&str>,
) -> Result<(), (StatusCode, String)> {
    let main = match main {
        Some(main) => main,
        None => return Ok(()),
    };
    let category = MainCategory::from_key(main).ok_or_else(|| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("unknown main category '{main}'"),
        )
    })?;

    let taxonomy = state.amenity_service.config().taxonomy();
    if let Some(placement) = taxonomy.placement_of(sub) {
        if placement.main != category {
            return Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                format!(
                    "sub-category '{sub}' belongs to '{}', not '{category}'",
                    placement.main
                ),
            ));
        }
    }
    Ok(())
}

/// Build the mutation response, with 200 for applied changes and 422 for
/// outcomes that left the profile untouched.
fn mutation_response(
    profile: &ProfileWire,
    outcome: MutationOutcome,
) -> Result<(StatusCode, Json<MutationRes>), (StatusCode, String)> {
    let document = Profile::to_value(profile)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let status = if outcome.changed() {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    let (label, sub_category) = match &outcome {
        MutationOutcome::Applied(record) | MutationOutcome::Removed(record) => {
            (Some(record.text.to_string()), Some(record.sub().to_string()))
        }
        MutationOutcome::UnknownSubCategory(sub) => (None, Some(sub.to_string())),
        MutationOutcome::NotFound | MutationOutcome::EmptyText => (None, None),
    };

    Ok((
        status,
        Json(MutationRes {
            outcome: outcome.kind().to_owned(),
            label,
            sub_category,
            profile: document,
        }),
    ))
}

/// Convert the organised view into its response form.
fn view_response(view: &OrganizedView) -> OrganizeRes {
    OrganizeRes {
        sections: view
            .sections()
            .iter()
            .map(|section| MainSectionRes {
                key: section.category.to_string(),
                title: section.title.clone(),
                icon: section.icon.clone(),
                sub_categories: section
                    .subs
                    .iter()
                    .map(|sub| SubSectionRes {
                        key: sub.key.to_string(),
                        title: sub.title.clone(),
                        icon: sub.icon.clone(),
                        labels: sub.labels.clone(),
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// Convert one suggestion into its response form.
fn suggestion_response(suggestion: &Suggestion) -> SuggestionRes {
    SuggestionRes {
        label: suggestion.label.clone(),
        main_category: suggestion.main.to_string(),
        sub_category: suggestion.sub.to_string(),
    }
}
