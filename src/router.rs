//! Dashboard routes and the navigation guard

use serde::Serialize;

/// Who may open a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Access {
    /// Only with a stored token
    RequiresAuth,
    /// Only without a stored token (login, registration)
    RequiresGuest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Route {
    pub path: &'static str,
    pub name: Option<&'static str>,
    pub access: Access,
}

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

pub const ROUTES: &[Route] = &[
    Route { path: LOGIN_PATH, name: None, access: Access::RequiresGuest },
    Route { path: "/register", name: None, access: Access::RequiresGuest },
    Route { path: HOME_PATH, name: Some("home"), access: Access::RequiresAuth },
    Route { path: "/profile", name: Some("profile"), access: Access::RequiresAuth },
];

/// Outcome of a navigation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Navigation {
    Proceed,
    Redirect(&'static str),
}

pub fn resolve(path: &str) -> Option<&'static Route> {
    let path = match path.trim_end_matches('/') {
        "" => HOME_PATH,
        trimmed => trimmed,
    };
    ROUTES.iter().find(|route| route.path == path)
}

pub fn is_logged_in(token: Option<&str>) -> bool {
    token.is_some_and(|token| !token.is_empty())
}

/// Decide whether navigating to `path` may go ahead.
///
/// Unknown paths are not guarded.
pub fn guard(path: &str, logged_in: bool) -> Navigation {
    match resolve(path).map(|route| route.access) {
        Some(Access::RequiresAuth) if !logged_in => Navigation::Redirect(LOGIN_PATH),
        Some(Access::RequiresGuest) if logged_in => Navigation::Redirect(HOME_PATH),
        _ => Navigation::Proceed,
    }
}
