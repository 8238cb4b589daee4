use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewVenues,
    BookCourts,
    ManageOwnBookings,
    ManageVenues,
    ManageCourts,
    ViewVenueAnalytics,
    ManageUsers,
    ManagePlatform,
}

impl Permission {
    pub fn as_str(self) -> &'static str {
        match self {
            Permission::ViewVenues => "view_venues",
            Permission::BookCourts => "book_courts",
            Permission::ManageOwnBookings => "manage_own_bookings",
            Permission::ManageVenues => "manage_venues",
            Permission::ManageCourts => "manage_courts",
            Permission::ViewVenueAnalytics => "view_venue_analytics",
            Permission::ManageUsers => "manage_users",
            Permission::ManagePlatform => "manage_platform",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "view_venues" => Some(Permission::ViewVenues),
            "book_courts" => Some(Permission::BookCourts),
            "manage_own_bookings" => Some(Permission::ManageOwnBookings),
            "manage_venues" => Some(Permission::ManageVenues),
            "manage_courts" => Some(Permission::ManageCourts),
            "view_venue_analytics" => Some(Permission::ViewVenueAnalytics),
            "manage_users" => Some(Permission::ManageUsers),
            "manage_platform" => Some(Permission::ManagePlatform),
            _ => None,
        }
    }
}

const USER_PERMISSIONS: &[Permission] = &[
    Permission::ViewVenues,
    Permission::BookCourts,
    Permission::ManageOwnBookings,
];
const OWNER_PERMISSIONS: &[Permission] = &[
    Permission::ViewVenues,
    Permission::ManageVenues,
    Permission::ManageCourts,
    Permission::ViewVenueAnalytics,
];
const ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::ViewVenues,
    Permission::ViewVenueAnalytics,
    Permission::ManageUsers,
    Permission::ManagePlatform,
];

/// Role of an account: players book courts, owners manage venues, admins
/// manage the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Owner,
    Admin,
}

impl UserRole {
    pub fn permissions(&self) -> &'static [Permission] {
        match self {
            UserRole::User => USER_PERMISSIONS,
            UserRole::Owner => OWNER_PERMISSIONS,
            UserRole::Admin => ADMIN_PERMISSIONS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Owner => "owner",
            UserRole::Admin => "admin",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user" => Some(UserRole::User),
            "owner" => Some(UserRole::Owner),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_role_permissions() {
        let perms = UserRole::User.permissions();

        assert_eq!(perms.len(), 3);
        assert!(perms.contains(&Permission::ViewVenues));
        assert!(perms.contains(&Permission::BookCourts));
        assert!(perms.contains(&Permission::ManageOwnBookings));

        assert!(!perms.contains(&Permission::ManageVenues));
        assert!(!perms.contains(&Permission::ManageUsers));
    }

    #[test]
    fn owner_role_permissions() {
        let perms = UserRole::Owner.permissions();

        assert!(perms.contains(&Permission::ManageVenues));
        assert!(perms.contains(&Permission::ManageCourts));
        assert!(perms.contains(&Permission::ViewVenueAnalytics));

        assert!(!perms.contains(&Permission::BookCourts));
        assert!(!perms.contains(&Permission::ManagePlatform));
    }

    #[test]
    fn admin_role_permissions() {
        let perms = UserRole::Admin.permissions();

        assert!(perms.contains(&Permission::ManageUsers));
        assert!(perms.contains(&Permission::ManagePlatform));

        assert!(!perms.contains(&Permission::BookCourts));
        assert!(!perms.contains(&Permission::ManageVenues));
    }

    #[test]
    fn user_role_from_str_case_insensitive() {
        assert_eq!(UserRole::from_str("user"), Some(UserRole::User));
        assert_eq!(UserRole::from_str("OWNER"), Some(UserRole::Owner));
        assert_eq!(UserRole::from_str("Admin"), Some(UserRole::Admin));
    }

    #[test]
    fn user_role_from_str_invalid() {
        assert_eq!(UserRole::from_str(""), None);
        assert_eq!(UserRole::from_str("superadmin"), None);
        assert_eq!(UserRole::from_str("guest"), None);
    }

    #[test]
    fn user_role_roundtrip() {
        for role in [UserRole::User, UserRole::Owner, UserRole::Admin] {
            assert_eq!(UserRole::from_str(role.as_str()), Some(role));
        }
    }

    #[test]
    fn permission_roundtrip() {
        let permissions = [
            Permission::ViewVenues,
            Permission::BookCourts,
            Permission::ManageOwnBookings,
            Permission::ManageVenues,
            Permission::ManageCourts,
            Permission::ViewVenueAnalytics,
            Permission::ManageUsers,
            Permission::ManagePlatform,
        ];

        for permission in &permissions {
            assert_eq!(Permission::from_str(permission.as_str()), Some(*permission));
        }
        assert_eq!(Permission::from_str("not_a_permission"), None);
    }
}
