//! Page-number pagination for list endpoints.

use serde::Serialize;

use crate::app::errors::ApiError;
use crate::app::services::Limits;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PageNumber {
    Number(usize),
    Last,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: PageNumber,
    pub page_size: usize,
}

impl PageRequest {
    /// Build from raw query values.
    ///
    /// A malformed `page` is an error; a malformed `page_size` falls back to
    /// the default. The size is capped at `limits.max_page_size`.
    pub fn from_query(page: Option<&str>, page_size: Option<&str>, limits: Limits) -> Result<Self, ApiError> {
        let page = match page.map(str::trim).filter(|p| !p.is_empty()) {
            None => PageNumber::Number(1),
            Some("last") => PageNumber::Last,
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n >= 1 => PageNumber::Number(n),
                _ => return Err(invalid_page(raw)),
            },
        };

        let page_size = page_size
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|size| *size > 0)
            .unwrap_or(limits.page_size)
            .min(limits.max_page_size)
            .max(1);

        Ok(Self { page, page_size })
    }
}

fn invalid_page(raw: &str) -> ApiError {
    ApiError::not_found_with("invalid_page", format!("invalid page '{raw}'"))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub count: usize,
    pub num_pages: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Slice `items` according to `req`; `link` renders the URL of a page number.
pub fn paginate<T>(
    items: Vec<T>,
    req: &PageRequest,
    link: impl Fn(usize) -> String,
) -> Result<Page<T>, ApiError> {
    let count = items.len();
    let num_pages = count.div_ceil(req.page_size).max(1);

    let number = match req.page {
        PageNumber::Last => num_pages,
        PageNumber::Number(n) if n <= num_pages => n,
        PageNumber::Number(n) => return Err(invalid_page(&n.to_string())),
    };

    let results = items
        .into_iter()
        .skip((number - 1) * req.page_size)
        .take(req.page_size)
        .collect();

    Ok(Page {
        count,
        num_pages,
        next: (number < num_pages).then(|| link(number + 1)),
        previous: (number > 1).then(|| link(number - 1)),
        results,
    })
}

/// Render `base?page=N` keeping the other query parameters that shape the list.
pub fn page_link(base: &str, page: usize, preserved: &[(&str, Option<&str>)]) -> String {
    let mut query = preserved
        .iter()
        .filter_map(|(name, value)| value.map(|v| format!("{name}={}", urlencoding::encode(v))))
        .collect::<Vec<_>>();
    query.push(format!("page={page}"));
    format!("{base}?{}", query.join("&"))
}
