//! Header navigation model, computed from the current session.

use crate::services::client::Session;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavItem {
    Home,
    Login,
    Register,
    /// Greeting for the signed-in user
    Account(String),
    /// Only shown to the elevated role
    Settings,
    Logout,
}

impl NavItem {
    pub fn label(&self) -> String {
        match self {
            NavItem::Home => "Home".to_string(),
            NavItem::Login => "Login".to_string(),
            NavItem::Register => "Register".to_string(),
            NavItem::Account(name) => format!("Hi, {}", name),
            NavItem::Settings => "Settings".to_string(),
            NavItem::Logout => "Logout".to_string(),
        }
    }

    /// Route the entry links to; `None` for entries that are not links.
    pub fn href(&self) -> Option<&'static str> {
        match self {
            NavItem::Home => Some("/"),
            NavItem::Login => Some("/login"),
            NavItem::Register => Some("/register"),
            NavItem::Settings => Some("/admin/settings"),
            NavItem::Account(_) | NavItem::Logout => None,
        }
    }
}

pub fn nav_items(session: Option<&Session>) -> Vec<NavItem> {
    let mut items = vec![NavItem::Home];
    match session {
        None => {
            items.push(NavItem::Login);
            items.push(NavItem::Register);
        }
        Some(session) => {
            items.push(NavItem::Account(session.user.name.clone()));
            if session.is_admin() {
                items.push(NavItem::Settings);
            }
            items.push(NavItem::Logout);
        }
    }
    items
}

/// Whether the header should render in its condensed form.
pub fn is_condensed(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::client::{User, UserRole};

    fn session(role: UserRole) -> Session {
        Session {
            token: "t".to_string(),
            user: User {
                id: 3,
                name: "Lin".to_string(),
                email: "lin@example.com".to_string(),
                role,
            },
        }
    }

    #[test]
    fn test_logged_out_navigation() {
        assert_eq!(
            nav_items(None),
            vec![NavItem::Home, NavItem::Login, NavItem::Register]
        );
    }

    #[test]
    fn test_only_admin_sees_settings() {
        let admin = nav_items(Some(&session(UserRole::Admin)));
        let user = nav_items(Some(&session(UserRole::User)));

        assert!(admin.contains(&NavItem::Settings));
        assert!(!user.contains(&NavItem::Settings));
        assert_eq!(admin.len(), user.len() + 1);
        assert_eq!(user.last(), Some(&NavItem::Logout));
        assert_eq!(user[1].label(), "Hi, Lin");
    }

    #[test]
    fn test_condensed_threshold() {
        assert!(!is_condensed(0.0, 50.0));
        assert!(!is_condensed(50.0, 50.0));
        assert!(is_condensed(50.5, 50.0));
    }
}
