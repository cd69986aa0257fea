/// Links shown on the status page. Every path must be routed.
pub const ENDPOINTS: &[(&str, &str)] = &[
    ("/api/greeting", "Greeting Endpoint"),
    ("/health", "Health Check"),
    ("/readiness", "Readiness Check"),
    ("/devsecops-info", "DevSecOps Info"),
    ("/metrics", "Prometheus Metrics"),
    ("/swagger", "API Docs (Swagger)"),
];

const STYLE: &str = r#"
    body { font-family: system-ui, sans-serif; margin: 0; background: #f5f7fa; color: #1f2933; }
    .app { max-width: 960px; margin: 0 auto; padding: 48px 24px; text-align: center; }
    .endpoint-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 16px; margin-top: 32px; }
    .endpoint-box { display: block; padding: 24px; border-radius: 8px; background: #fff; color: #0b69a3; text-decoration: none; box-shadow: 0 1px 3px rgba(0, 0, 0, 0.12); }
    .endpoint-box:hover { background: #e6f2fa; }
"#;

pub fn render() -> String {
    let links: String = ENDPOINTS
        .iter()
        .map(|(path, label)| {
            format!(
                "      <a href=\"{}\" target=\"_blank\" rel=\"noreferrer\" class=\"endpoint-box\">{}</a>\n",
                escape_html(path),
                escape_html(label)
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Status Service</title>
  <style>{STYLE}</style>
</head>
<body>
  <div class="app">
    <h1>Status Service</h1>
    <p>A small backend exposing health, build and metrics endpoints for DevSecOps pipelines.</p>
    <div class="endpoint-grid">
{links}    </div>
  </div>
</body>
</html>
"#
    )
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_link_per_endpoint() {
        let html = render();
        assert_eq!(html.matches("class=\"endpoint-box\"").count(), ENDPOINTS.len());
        for (path, label) in ENDPOINTS {
            assert!(html.contains(&format!("href=\"{path}\"")));
            assert!(html.contains(&escape_html(label)));
        }
    }
}
