//! Page routes.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Blog(String),
    Calendar,
    Settings,
    Help,
    AskAi,
    NotFound(String),
}

impl Route {
    /// Resolve a path such as `/blog/my-post`. Query strings and trailing
    /// slashes are ignored.
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["blog", id] => Route::Blog((*id).to_string()),
            ["calendar"] => Route::Calendar,
            ["settings"] => Route::Settings,
            ["help"] => Route::Help,
            ["ask-ai"] => Route::AskAi,
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Blog(id) => format!("/blog/{id}"),
            Route::Calendar => "/calendar".to_string(),
            Route::Settings => "/settings".to_string(),
            Route::Help => "/help".to_string(),
            Route::AskAi => "/ask-ai".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_routes() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/blog/hello-world/"), Route::Blog("hello-world".into()));
        assert_eq!(Route::parse("/calendar?view=week"), Route::Calendar);
        assert_eq!(Route::parse("/ask-ai"), Route::AskAi);
    }

    #[test]
    fn test_unknown_route() {
        assert_eq!(Route::parse("/blog"), Route::NotFound("/blog".into()));
        assert_eq!(Route::parse("/admin/users"), Route::NotFound("/admin/users".into()));
    }

    #[test]
    fn test_path_round_trip() {
        let route = Route::Blog("rust".into());
        assert_eq!(Route::parse(&route.path()), route);
    }
}
