// Route path constants - single source of truth for all API paths

pub const ROOT: &str = "/";
pub const HEALTH: &str = "/health";
pub const MEDIA: &str = "/media";
pub const API_MEDIA: &str = "/api/media";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
pub const SWAGGER_UI: &str = "/docs";

/// Header carrying the shared write secret
pub const SECRET_HEADER: &str = "x-secret-key";
