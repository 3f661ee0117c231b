use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the quote game backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::quote::random_quote,
        crate::routes::game::create_quote_game,
        crate::routes::game::submit_answers,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::health::HealthStatus,
            crate::dto::quote::QuoteResponse,
            crate::dto::quote::QuoteWithoutAuthorResponse,
            crate::dto::game::QuoteGameResponse,
            crate::dto::game::QuoteGameAnswerInput,
            crate::dto::game::SubmitAnswersRequest,
            crate::dto::game::QuoteGameAnswerResult,
            crate::dto::game::QuoteGameResultResponse,
            crate::error::ErrorBody,
            crate::error::FieldError,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "quote", description = "Random quotes"),
        (name = "quote-game", description = "Match quotes with their authors"),
    )
)]
pub struct ApiDoc;
