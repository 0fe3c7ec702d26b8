//! Single-page tester: payload textarea, threshold slider, result badge.

use crate::verdict::{Detection, Label};

const HEAD: &str = r#"<!doctype html>
<html lang="en" data-bs-theme="dark">
  <head>
    <meta charset="utf-8">
    <title>SQL Injection Detection - ML Tester</title>
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css" rel="stylesheet">
    <style>
      body {
        min-height: 100vh;
        background: radial-gradient(circle at top, #111827, #020617);
        color: #e5e7eb;
        display: flex;
        align-items: center;
        justify-content: center;
        padding: 20px;
      }
      .card {
        border-radius: 1.5rem;
        box-shadow: 0 20px 40px rgba(0,0,0,0.4);
        border: 1px solid rgba(148, 163, 184, 0.25);
        max-width: 900px;
        width: 100%;
      }
      textarea {
        resize: vertical;
        min-height: 80px;
        max-height: 260px;
        font-family: Consolas, monospace;
        font-size: 0.9rem;
      }
      .badge-sqli { background: linear-gradient(135deg, #f97373, #b91c1c); }
      .badge-benign { background: linear-gradient(135deg, #4ade80, #15803d); }
      .slider-value { font-variant-numeric: tabular-nums; }
    </style>
  </head>
  <body>
    <div class="card bg-dark text-light p-4 p-md-5">
      <div class="mb-3 text-center">
        <h2 class="fw-bold mb-1">SQL Injection Payload Tester (ML-based)</h2>
        <p class="text-secondary mb-0">
          Enter a SQL query or parameter value below and hit <span class="fw-semibold">Predict</span>.<br>
          Backend: TF-IDF + linear classifier trained on a labeled SQL injection dataset.
        </p>
      </div>
"#;

const TAIL: &str = r#"    </div>
    <script src="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/js/bootstrap.bundle.min.js"></script>
  </body>
</html>
"#;

/// Everything the page shows for one request.
#[derive(Debug, Clone)]
pub struct PageView {
    pub payload: String,
    pub threshold: f64,
    pub min_threshold: f64,
    pub max_threshold: f64,
    pub result: Option<Detection>,
    pub error: Option<String>,
}

pub fn render(view: &PageView) -> String {
    let mut html = String::with_capacity(HEAD.len() + TAIL.len() + 2048);
    html.push_str(HEAD);

    let threshold = format!("{:.2}", view.threshold);
    html.push_str(&format!(
        r#"      <form method="POST" novalidate>
        <div class="mb-3">
          <label for="payload" class="form-label fw-semibold">Payload / Query</label>
          <textarea class="form-control bg-dark border-secondary text-light" id="payload" name="payload" placeholder="Example: ' OR 1=1 --">{payload}</textarea>
        </div>
        <div class="row align-items-center mb-4">
          <div class="col-md-6 mb-3 mb-md-0">
            <label for="threshold" class="form-label fw-semibold">
              SQLi Threshold: <span class="slider-value" id="thresholdValue">{threshold}</span>
            </label>
            <input type="range" class="form-range" min="{min:.2}" max="{max:.2}" step="0.01" id="threshold" name="threshold" value="{threshold}"
              oninput="document.getElementById('thresholdValue').innerText = this.value">
            <small class="text-secondary">
              Higher threshold = stricter detection. Below the threshold is treated as <strong>Benign</strong>.
            </small>
          </div>
          <div class="col-md-6 text-md-end">
            <button type="submit" class="btn btn-primary btn-lg px-4 me-2">Predict</button>
            <a href="/" class="btn btn-outline-secondary btn-lg px-4">Clear</a>
          </div>
        </div>
      </form>
"#,
        payload = escape_html(&view.payload),
        threshold = threshold,
        min = view.min_threshold,
        max = view.max_threshold,
    ));

    if let Some(err) = &view.error {
        html.push_str(&format!(
            "      <div class=\"alert alert-warning mt-3\">{}</div>\n",
            escape_html(err)
        ));
    } else if let Some(result) = &view.result {
        let badge = match result.label {
            Label::SqlInjection => "badge-sqli",
            Label::Benign => "badge-benign",
        };
        html.push_str(&format!(
            r#"      <hr class="border-secondary">
      <div class="mt-3 d-flex align-items-center justify-content-between flex-wrap gap-2">
        <div>
          <span class="fw-semibold me-2">Result:</span>
          <span class="badge {badge} rounded-pill px-3 py-2">{label}</span>
        </div>
        <div class="text-secondary">
          SQLi probability: <span class="fw-semibold">{probability:.3}</span>
        </div>
      </div>
"#,
            label = result.label,
            probability = result.probability,
        ));
    } else {
        html.push_str("      <div class=\"mt-3 text-secondary\">Waiting for input...</div>\n");
    }

    html.push_str(TAIL);
    html
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
