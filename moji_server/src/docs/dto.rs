use crate::{info, summarize};
use moji_core::summarize::dto::{SummarizeRequest, SummarizeResponse};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(info::handler::info, summarize::handler::summarize),
    components(schemas(info::dto::Info, SummarizeRequest, SummarizeResponse))
)]
pub struct ApiDoc;
