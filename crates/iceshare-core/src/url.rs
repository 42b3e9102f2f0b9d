//! Share-link binding: place a token in a `preview?data=` URL and read it back.

use ::url::{form_urlencoded, Url};

/// Query parameter that carries the token.
pub const DATA_PARAM: &str = "data";

/// Path segment of the preview page, relative to the share base.
pub const PREVIEW_PATH: &str = "preview";

/// Where a share link is rooted.
#[derive(Debug, Clone, Copy)]
pub enum ShareBase<'a> {
    /// Configured base, used verbatim.
    Explicit(&'a str),
    /// The page the share was created from; its directory becomes the base.
    Page(&'a Url),
}

/// Build `{base}/preview?data={token}`.
///
/// `token` must already be URL-safe; it is inserted without further escaping.
pub fn build_share_url(token: &str, base: ShareBase<'_>) -> String {
    match base {
        ShareBase::Explicit(base) => format!("{base}/{PREVIEW_PATH}?{DATA_PARAM}={token}"),
        ShareBase::Page(page) => {
            format!("{}{PREVIEW_PATH}?{DATA_PARAM}={token}", base_from_page_url(page))
        }
    }
}

/// Origin plus the page path up to and including its final `/`.
///
/// `/app/form` and `/app/` both give `{origin}/app/`.
pub fn base_from_page_url(page: &Url) -> String {
    let path = page.path();
    let dir = match path.rfind('/') {
        Some(idx) => &path[..=idx],
        None => "/",
    };
    format!("{}{}", page.origin().ascii_serialization(), dir)
}

/// Read the `data` parameter from a query string (leading `?` optional).
///
/// A missing or empty parameter is `None`; most page loads carry no token.
pub fn extract_token(query: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == DATA_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// [`extract_token`] applied to a full URL.
pub fn token_from_url(url: &Url) -> Option<String> {
    url.query().and_then(extract_token)
}

/// Drop the `data` parameter, keeping every other parameter in order.
pub fn strip_token(url: &Url) -> Url {
    let mut stripped = url.clone();
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != DATA_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    if kept.is_empty() {
        stripped.set_query(None);
    } else {
        stripped.query_pairs_mut().clear().extend_pairs(kept);
    }
    stripped
}
