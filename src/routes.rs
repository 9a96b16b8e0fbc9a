/// Client-side pages. Every one of them is served the same shell document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRoute {
    Landing,
    Search,
    Create,
    Edit(i64),
    Detail(i64),
    OpenApiDetail(i64),
}

impl PageRoute {
    /// Match a request path. `None` means the path should redirect to `/`.
    pub fn resolve(path: &str) -> Option<PageRoute> {
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();
        match segments.as_slice() {
            [] => Some(PageRoute::Landing),
            ["search"] => Some(PageRoute::Search),
            ["create"] => Some(PageRoute::Create),
            ["edit", id] => id.parse().ok().map(PageRoute::Edit),
            ["detail", id] => id.parse().ok().map(PageRoute::Detail),
            ["openapi-detail", id] => id.parse().ok().map(PageRoute::OpenApiDetail),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            PageRoute::Landing => "/".to_string(),
            PageRoute::Search => "/search".to_string(),
            PageRoute::Create => "/create".to_string(),
            PageRoute::Edit(id) => format!("/edit/{id}"),
            PageRoute::Detail(id) => format!("/detail/{id}"),
            PageRoute::OpenApiDetail(id) => format!("/openapi-detail/{id}"),
        }
    }
}

#[test]
fn test_resolve_page_routes() {
    assert_eq!(PageRoute::resolve("/"), Some(PageRoute::Landing));
    assert_eq!(PageRoute::resolve(""), Some(PageRoute::Landing));
    assert_eq!(PageRoute::resolve("/search"), Some(PageRoute::Search));
    assert_eq!(PageRoute::resolve("/search/"), Some(PageRoute::Search));
    assert_eq!(PageRoute::resolve("/create"), Some(PageRoute::Create));
    assert_eq!(PageRoute::resolve("/edit/12"), Some(PageRoute::Edit(12)));
    assert_eq!(PageRoute::resolve("/detail/7"), Some(PageRoute::Detail(7)));
    assert_eq!(
        PageRoute::resolve("/openapi-detail/3"),
        Some(PageRoute::OpenApiDetail(3))
    );

    assert_eq!(PageRoute::resolve("/detail/abc"), None);
    assert_eq!(PageRoute::resolve("/detail"), None);
    assert_eq!(PageRoute::resolve("/nowhere"), None);
}

#[test]
fn test_path_round_trips() {
    for route in [
        PageRoute::Landing,
        PageRoute::Search,
        PageRoute::Create,
        PageRoute::Edit(1),
        PageRoute::Detail(2),
        PageRoute::OpenApiDetail(3),
    ] {
        assert_eq!(PageRoute::resolve(&route.path()), Some(route));
    }
}
