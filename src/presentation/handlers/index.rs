use axum::response::Html;

const INDEX_PAGE: &str = include_str!("../../../static/index.html");

/// The single page: upload control, generate button, and the three labeled
/// text blocks.
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_PAGE)
}
