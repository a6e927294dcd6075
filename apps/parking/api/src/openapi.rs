use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Parking API",
        version = "0.1.0",
        description = "Parking lot pricing, discounts and recommendations"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/parking", api = domain_parking::ApiDoc)
    )
)]
pub struct ApiDoc;
