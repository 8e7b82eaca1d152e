//! Navigation surface: the three pages and the paths that reach them.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Blog,
    Article { id: String },
    /// Any path that matches none of the above.
    NotFound,
}

impl Route {
    /// Map a path (query string and fragment ignored) to a route.
    pub fn parse(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["blog"] => Route::Blog,
            ["article", id] => Route::Article { id: (*id).to_string() },
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Blog => "/blog".to_string(),
            Route::Article { id } => format!("/article/{id}"),
            Route::NotFound => "/404".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
