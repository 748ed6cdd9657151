use clubdesk_core::Role;

/// Navigation targets. The path strings are the ones the club has always
/// bookmarked, so deep links keep working across the console rewrite.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Route {
    Dashboard,
    Registry,
    Attendance,
    Finance,
    Calendar,
}

impl Route {
    pub fn all() -> [Route; 5] {
        [
            Route::Dashboard,
            Route::Registry,
            Route::Attendance,
            Route::Finance,
            Route::Calendar,
        ]
    }

    /// Unknown paths land on the root, same as the old router.
    pub fn from_path(path: &str) -> Route {
        match path.trim().trim_end_matches('/') {
            "/socios" => Route::Registry,
            "/asistencia" => Route::Attendance,
            "/pagos" => Route::Finance,
            "/entrenamientos" => Route::Calendar,
            _ => Route::Dashboard,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Dashboard => "/",
            Route::Registry => "/socios",
            Route::Attendance => "/asistencia",
            Route::Finance => "/pagos",
            Route::Calendar => "/entrenamientos",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Registry => "Players",
            Route::Attendance => "Attendance",
            Route::Finance => "Finance",
            Route::Calendar => "Training Log",
        }
    }

    pub fn allowed_for(&self, role: Role) -> bool {
        match self {
            Route::Dashboard | Route::Finance => role == Role::Owner,
            _ => true,
        }
    }

    /// Sidebar entries for a role, in display order.
    pub fn nav_items(role: Role) -> Vec<Route> {
        Route::all()
            .into_iter()
            .filter(|r| r.allowed_for(role))
            .collect()
    }
}

/// The one guard every navigation goes through: a route the role may not
/// reach resolves to the attendance view, which both roles can always see.
pub fn resolve(requested: Route, role: Role) -> Route {
    if requested.allowed_for(role) {
        requested
    } else {
        Route::Attendance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_is_redirected_from_dashboard_and_finance() {
        assert_eq!(resolve(Route::Dashboard, Role::Staff), Route::Attendance);
        assert_eq!(resolve(Route::Finance, Role::Staff), Route::Attendance);
        assert_eq!(resolve(Route::Registry, Role::Staff), Route::Registry);
        assert_eq!(resolve(Route::Calendar, Role::Staff), Route::Calendar);
    }

    #[test]
    fn owner_is_never_redirected() {
        for route in Route::all() {
            assert_eq!(resolve(route, Role::Owner), route);
        }
    }

    #[test]
    fn unknown_paths_fall_back_to_root() {
        assert_eq!(Route::from_path("/socios"), Route::Registry);
        assert_eq!(Route::from_path("/pagos/"), Route::Finance);
        assert_eq!(Route::from_path("/nope"), Route::Dashboard);
        assert_eq!(Route::from_path(""), Route::Dashboard);
    }

    #[test]
    fn staff_sidebar_hides_owner_views() {
        let items = Route::nav_items(Role::Staff);
        assert_eq!(
            items,
            vec![Route::Registry, Route::Attendance, Route::Calendar]
        );
        assert_eq!(Route::nav_items(Role::Owner).len(), 5);
    }
}
