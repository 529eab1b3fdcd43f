use axum::{
    body::Bytes,
    extract::{Multipart, Query, State},
    response::Html,
    Json,
};
use serde::Deserialize;

use super::AppState;
use crate::error::ServiceError;
use crate::output::OutputView;
use crate::peak_hours::parse_peak_hours;
use crate::pipeline::{run_report, Report};

const FORM_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8" />
    <title>Peak Usage Report</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 40px; background: #f7f9fc; }
        .container { max-width: 800px; margin: auto; padding: 20px; background: white; border-radius: 10px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        h1 { color: #2c3e50; text-align: center; }
        label { display: block; margin-top: 15px; font-weight: bold; }
        input[type="text"], input[type="file"], select { width: 100%; padding: 8px; margin-top: 5px; border: 1px solid #ccc; border-radius: 4px; }
        button { background: #3498db; color: white; padding: 10px 20px; border: none; border-radius: 4px; cursor: pointer; font-size: 16px; margin-top: 20px; }
        button:hover { background: #2980b9; }
    </style>
</head>
<body>
    <div class="container">
        <h1>Peak / Non-Peak Usage Report</h1>
        <form method="POST" action="/process" enctype="multipart/form-data">
            <label for="peak_hours">Peak hours (e.g. [7,8,9,17,18,19]):</label>
            <input type="text" id="peak_hours" name="peak_hours" placeholder="[7,8,9,17,18,19]" required />

            <label for="csv_file">Meter usage export (CSV):</label>
            <input type="file" id="csv_file" name="csv_file" accept=".csv" required />

            <button type="submit">Process Data</button>
        </form>
    </div>
</body>
</html>
"#;

pub async fn index() -> Html<&'static str> {
    Html(FORM_HTML)
}

pub async fn health_check() -> &'static str {
    "ok"
}

#[derive(Debug, Default, Deserialize)]
pub struct ProcessParams {
    pub view: Option<String>,
}

impl ProcessParams {
    fn resolve_view(&self, default: OutputView) -> Result<OutputView, ServiceError> {
        match self.view.as_deref() {
            Some(v) => v.parse().map_err(ServiceError::input),
            None => Ok(default),
        }
    }
}

#[derive(Debug, Default)]
struct UploadForm {
    peak_hours: Option<String>,
    /// Client file name and contents.
    file: Option<(String, Bytes)>,
}

async fn read_form(multipart: &mut Multipart) -> Result<UploadForm, ServiceError> {
    let bad_body = |e: axum::extract::multipart::MultipartError| {
        ServiceError::input(format!("Invalid multipart body: {e}"))
    };

    let mut form = UploadForm::default();
    while let Some(field) = multipart.next_field().await.map_err(bad_body)? {
        let name = field.name().map(str::to_owned);
        let file_name = field.file_name().map(str::to_owned);

        match (name.as_deref(), file_name) {
            (Some("peak_hours"), _) => {
                form.peak_hours = Some(field.text().await.map_err(bad_body)?);
            }
            (Some("csv_file"), file_name) => {
                let contents = field.bytes().await.map_err(bad_body)?;
                form.file = Some((file_name.unwrap_or_default(), contents));
            }
            _ => {}
        }
    }

    Ok(form)
}

/// `POST /process`: multipart form with `peak_hours` and `csv_file`.
pub async fn process(
    State(state): State<AppState>,
    Query(params): Query<ProcessParams>,
    mut multipart: Multipart,
) -> Result<Json<Report>, ServiceError> {
    metrics::counter!("peak_requests_total").increment(1);

    let view = params.resolve_view(state.default_view)?;
    let form = read_form(&mut multipart).await?;

    let peak_hours = parse_peak_hours(form.peak_hours.as_deref())?;

    let (file_name, contents) = form
        .file
        .ok_or_else(|| ServiceError::input("No file uploaded"))?;
    if file_name.is_empty() {
        return Err(ServiceError::input("No file selected"));
    }
    if !state.uploads.allowed_file(&file_name) {
        return Err(ServiceError::input(
            "File type not allowed. Only CSV files are accepted.",
        ));
    }

    let guard = state.uploads.save(&file_name, &contents).await?;

    tracing::info!(
        file = %file_name,
        bytes = contents.len(),
        peak_hours = peak_hours.len(),
        ?view,
        "processing upload"
    );

    // The guard moves into the blocking task so the file is removed on every exit path.
    let report = tokio::task::spawn_blocking(move || {
        let result = run_report(guard.path(), &peak_hours, view);
        drop(guard);
        result
    })
    .await
    .map_err(|e| ServiceError::internal(format!("report task failed: {e}")))??;

    Ok(Json(report))
}
