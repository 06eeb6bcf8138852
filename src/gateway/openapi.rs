//! OpenAPI documentation
//!
//! Not served over HTTP; the `export_openapi` binary writes it out:
//!
//!   cargo run --bin export_openapi -- --output docs/openapi.json

use utoipa::OpenApi;

use crate::gateway::types::{ErrorResponse, HashResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "loadtest",
        version = "0.1.0",
        description = "Memory-pressure demo: every request hashes a freshly allocated 10 MiB random buffer.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::do_work,
    ),
    components(
        schemas(
            HashResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Workload", description = "Random buffer hashing")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_documents_root_route() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/"));
        assert_eq!(doc.paths.paths.len(), 1);
    }

    #[test]
    fn test_openapi_registers_schemas() {
        let json = ApiDoc::openapi().to_json().unwrap();
        assert!(json.contains("HashResponse"));
        assert!(json.contains("ErrorResponse"));
    }
}
