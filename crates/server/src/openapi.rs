use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::reviews::list,
        crate::routes::reviews::get_one,
        crate::routes::reviews::create,
        crate::routes::reviews::update,
        crate::routes::reviews::remove,
        crate::routes::reviews::filter,
        crate::routes::reviews::approve,
    ),
    components(
        schemas(
            HealthResponse,
            crate::dtos::ReviewDto,
            crate::errors::ErrorBody,
            crate::validation::FieldViolation,
        )
    ),
    tags(
        (name = "health"),
        (name = "reviews", description = "Reviews of points of sale")
    )
)]
pub struct ApiDoc;
