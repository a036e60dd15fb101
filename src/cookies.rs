use std::path::Path;

use serde::Deserialize;

use crate::error::AppError;

/// One entry of a browser cookie export. Other export fields are ignored.
#[derive(Debug, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
}

/// Load a JSON cookie export and render it as a `Cookie` header value.
pub async fn load(path: &Path) -> Result<String, AppError> {
    let fail = |cause: String| {
        AppError::Credentials(format!(
            "Failed to load cookies from {}: {cause}",
            path.display()
        ))
    };

    let raw = tokio::fs::read_to_string(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => fail(format!("Cookie file not found: {}", path.display())),
        _ => fail(e.to_string()),
    })?;

    let cookies: Vec<Cookie> = serde_json::from_str(&raw).map_err(|e| fail(e.to_string()))?;

    Ok(header_value(&cookies))
}

pub fn header_value(cookies: &[Cookie]) -> String {
    cookies
        .iter()
        .map(|c| format!("{}={}", c.name, c.value))
        .collect::<Vec<_>>()
        .join("; ")
}
