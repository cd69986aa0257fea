//! OpenAPI document and the Swagger UI that renders it.

use std::path::Path;

use anyhow::Context;
use serde_json::Value;
use utoipa_swagger_ui::SwaggerUi;

/// Mount point of the Swagger UI.
pub const SWAGGER_PATH: &str = "/swagger";

/// Path the Swagger UI loads the document from.
pub const OPENAPI_PATH: &str = "/swagger/openapi.json";

const BUNDLED_DOCUMENT: &str = include_str!("../openapi/swagger.json");

#[derive(Debug, Clone)]
pub struct ApiDocs {
    document: Value,
}

impl ApiDocs {
    pub fn new(document: Value) -> Self {
        Self { document }
    }

    /// The document shipped inside the binary.
    pub fn bundled() -> anyhow::Result<Self> {
        let document =
            serde_json::from_str(BUNDLED_DOCUMENT).context("bundled swagger.json is not valid JSON")?;
        Ok(Self::new(document))
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let document = serde_json::from_str(&raw)
            .with_context(|| format!("{} is not valid JSON", path.display()))?;
        Ok(Self::new(document))
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Swagger UI under [`SWAGGER_PATH`], UI assets embedded in the binary,
    /// serving this document at [`OPENAPI_PATH`].
    pub fn swagger_ui(&self) -> SwaggerUi {
        SwaggerUi::new(SWAGGER_PATH).external_url_unchecked(OPENAPI_PATH, self.document.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_document_describes_every_route() {
        let docs = ApiDocs::bundled().unwrap();
        let paths = docs.document()["paths"].as_object().unwrap();
        for route in ["/api/greeting", "/health", "/readiness", "/devsecops-info", "/metrics"] {
            assert!(paths.contains_key(route), "missing {route}");
        }
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = ApiDocs::from_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn invalid_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("status-service-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();

        let err = ApiDocs::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));

        std::fs::remove_file(&path).unwrap();
    }
}
