//! Application route table and navigation resolution.

use purplepaw_auth::{DASHBOARD_PATH, GuardDecision, LOGIN_PATH, Role, RouteGuard, Session};

/// Every view the shell can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Login,
    Register,
    Dashboard,
    Profile,
    MyPets,
    PetHistory,
    Appointments,
    MyAppointments,
    Clients,
    Inventory,
    UserManagement,
}

#[derive(Debug, Clone)]
pub struct RouteDef {
    /// Path pattern; `:name` segments match any single segment.
    pub pattern: &'static str,
    pub page: Page,
    pub guard: RouteGuard,
}

impl RouteDef {
    fn new(pattern: &'static str, page: Page, guard: RouteGuard) -> Self {
        Self {
            pattern,
            page,
            guard,
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        let mut expected = self.pattern.split('/').filter(|s| !s.is_empty());
        let mut actual = path.split('/').filter(|s| !s.is_empty());
        loop {
            match (expected.next(), actual.next()) {
                (None, None) => return true,
                (Some(p), Some(a)) if p.starts_with(':') || p == a => continue,
                _ => return false,
            }
        }
    }

    /// Value of the `:name` segment in `path`, when `path` matches.
    pub fn param<'a>(&self, path: &'a str, name: &str) -> Option<&'a str> {
        if !self.matches(path) {
            return None;
        }
        self.pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .zip(path.split('/').filter(|s| !s.is_empty()))
            .find(|(p, _)| p.strip_prefix(':') == Some(name))
            .map(|(_, a)| a)
    }
}

pub fn route_table() -> Vec<RouteDef> {
    let staff = || RouteGuard::roles([Role::VETERINARIAN, Role::RECEPTIONIST]);
    vec![
        RouteDef::new(LOGIN_PATH, Page::Login, RouteGuard::guest_only()),
        RouteDef::new("/register", Page::Register, RouteGuard::guest_only()),
        RouteDef::new(DASHBOARD_PATH, Page::Dashboard, RouteGuard::authenticated()),
        RouteDef::new("/profile", Page::Profile, RouteGuard::authenticated()),
        RouteDef::new("/my-pets", Page::MyPets, RouteGuard::authenticated()),
        RouteDef::new("/pets/:petId/history", Page::PetHistory, RouteGuard::authenticated()),
        RouteDef::new("/appointments", Page::Appointments, staff()),
        RouteDef::new("/my-appointments", Page::MyAppointments, RouteGuard::roles([Role::CLIENT])),
        RouteDef::new("/clients", Page::Clients, staff()),
        RouteDef::new("/inventory", Page::Inventory, staff()),
        RouteDef::new("/user-management", Page::UserManagement, RouteGuard::roles([Role::VETERINARIAN])),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Session still initializing; render nothing.
    Pending,
    /// Show `page`. `path` differs from the requested one after a redirect.
    Show { page: Page, path: String },
}

#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<RouteDef>,
}

impl Default for Router {
    fn default() -> Self {
        Self {
            routes: route_table(),
        }
    }
}

// login -> dashboard -> login cannot loop; this bounds misconfigured tables.
const MAX_REDIRECTS: usize = 4;

impl Router {
    pub fn route(&self, path: &str) -> Option<&RouteDef> {
        self.routes.iter().find(|r| r.matches(path))
    }

    /// Follow guards and redirects from `path` to the page that renders.
    ///
    /// `/` and unknown paths go to the dashboard, which in turn sends
    /// anonymous users to login.
    pub fn resolve(&self, path: &str, session: &Session) -> Navigation {
        let mut current = path.to_string();
        for _ in 0..MAX_REDIRECTS {
            let Some(route) = self.route(&current) else {
                tracing::debug!(route = %current, "no route; redirecting to dashboard");
                current = DASHBOARD_PATH.to_string();
                continue;
            };
            match route.guard.evaluate(session) {
                GuardDecision::Pending => return Navigation::Pending,
                GuardDecision::Render => {
                    return Navigation::Show {
                        page: route.page,
                        path: current,
                    };
                }
                GuardDecision::Redirect(to) => {
                    tracing::debug!(from = %current, to, "guard redirect");
                    current = to.to_string();
                }
            }
        }

        tracing::warn!(path, "redirect loop; showing login");
        Navigation::Show {
            page: Page::Login,
            path: LOGIN_PATH.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use purplepaw_auth::{Identity, MemoryStorage, SessionStore, Token};

    use super::*;

    fn anonymous() -> Session {
        let store = SessionStore::new(MemoryStorage::arc());
        store.initialize();
        store.snapshot()
    }

    fn signed_in(role: Role) -> Session {
        let store = SessionStore::new(MemoryStorage::arc());
        store.initialize();
        store
            .login(Identity::new(3u64, "u@purplepaw.test", vec![role]), Token::new("t"))
            .unwrap();
        store.snapshot()
    }

    fn shown(nav: Navigation) -> (Page, String) {
        match nav {
            Navigation::Show { page, path } => (page, path),
            Navigation::Pending => panic!("expected a page"),
        }
    }

    #[test]
    fn pattern_segments_match() {
        let router = Router::default();
        assert_eq!(router.route("/pets/42/history").map(|r| r.page), Some(Page::PetHistory));
        assert!(router.route("/pets/42").is_none());
        assert!(router.route("/").is_none());
    }

    #[test]
    fn path_params_are_extracted() {
        let router = Router::default();
        let route = router.route("/pets/42/history").unwrap();
        assert_eq!(route.param("/pets/42/history", "petId"), Some("42"));
        assert_eq!(route.param("/pets/42/history", "clientId"), None);
        assert_eq!(route.param("/pets/42", "petId"), None);
    }

    #[test]
    fn anonymous_users_land_on_login() {
        let router = Router::default();
        for path in ["/dashboard", "/inventory", "/", "/nowhere"] {
            assert_eq!(shown(router.resolve(path, &anonymous())).0, Page::Login, "{path}");
        }
        assert_eq!(shown(router.resolve("/register", &anonymous())).0, Page::Register);
    }

    #[test]
    fn wrong_role_lands_on_dashboard() {
        let router = Router::default();
        let (page, path) = shown(router.resolve("/user-management", &signed_in(Role::RECEPTIONIST)));
        assert_eq!(page, Page::Dashboard);
        assert_eq!(path, DASHBOARD_PATH);

        let (page, _) = shown(router.resolve("/my-appointments", &signed_in(Role::VETERINARIAN)));
        assert_eq!(page, Page::Dashboard);
    }

    #[test]
    fn allowed_role_renders() {
        let router = Router::default();
        let (page, path) = shown(router.resolve("/user-management", &signed_in(Role::VETERINARIAN)));
        assert_eq!(page, Page::UserManagement);
        assert_eq!(path, "/user-management");
        assert_eq!(shown(router.resolve("/clients", &signed_in(Role::RECEPTIONIST))).0, Page::Clients);
    }

    #[test]
    fn signed_in_users_skip_login() {
        let router = Router::default();
        assert_eq!(shown(router.resolve(LOGIN_PATH, &signed_in(Role::CLIENT))).0, Page::Dashboard);
    }

    #[test]
    fn uninitialized_session_is_pending() {
        let store = SessionStore::new(MemoryStorage::arc());
        assert_eq!(Router::default().resolve("/dashboard", &store.snapshot()), Navigation::Pending);
    }
}
