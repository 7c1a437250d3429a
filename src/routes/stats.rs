// GET /stats

use axum::{
    http::header,
    response::{IntoResponse, Response},
};

use crate::sampler::StatsSampler;
use crate::version::SERVER_NAME;

/// Always 200 text/plain; failed sources show up as error lines in the body.
pub(super) async fn stats_response(sampler: &StatsSampler) -> Response {
    let report = sampler.report().await;
    (
        [
            (header::CONTENT_TYPE, "text/plain"),
            (header::SERVER, SERVER_NAME),
        ],
        report,
    )
        .into_response()
}
