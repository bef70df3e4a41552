use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ItemDoc {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
}

#[derive(ToSchema)]
pub struct ItemInputDoc { pub name: String, pub description: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::items::create,
        crate::routes::items::list,
        crate::routes::items::get,
        crate::routes::items::update,
        crate::routes::items::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ItemDoc,
            ItemInputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "items", description = "Item CRUD"),
    )
)]
pub struct ApiDoc;
