//! Static role → permission table.

use serde::{Deserialize, Serialize};

/// An operation class an admin may be allowed to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    #[serde(rename = "dashboard:view")]
    ViewDashboard,
    #[serde(rename = "destinations:manage")]
    ManageDestinations,
    #[serde(rename = "trips:manage")]
    ManageTrips,
    #[serde(rename = "hotels:manage")]
    ManageHotels,
    #[serde(rename = "transfers:manage")]
    ManageTransfers,
    #[serde(rename = "activities:manage")]
    ManageActivities,
    #[serde(rename = "blogs:manage")]
    ManageBlogs,
    #[serde(rename = "reviews:moderate")]
    ModerateReviews,
    #[serde(rename = "leads:manage")]
    ManageLeads,
    #[serde(rename = "custom_requests:manage")]
    ManageCustomRequests,
    #[serde(rename = "collaborators:manage")]
    ManageCollaborators,
    #[serde(rename = "distribution:manage")]
    ManageDistribution,
    #[serde(rename = "listings:approve")]
    ApproveListings,
    #[serde(rename = "users:manage")]
    ManageUsers,
}

impl Permission {
    pub const ALL: [Permission; 14] = [
        Permission::ViewDashboard,
        Permission::ManageDestinations,
        Permission::ManageTrips,
        Permission::ManageHotels,
        Permission::ManageTransfers,
        Permission::ManageActivities,
        Permission::ManageBlogs,
        Permission::ModerateReviews,
        Permission::ManageLeads,
        Permission::ManageCustomRequests,
        Permission::ManageCollaborators,
        Permission::ManageDistribution,
        Permission::ApproveListings,
        Permission::ManageUsers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewDashboard => "dashboard:view",
            Permission::ManageDestinations => "destinations:manage",
            Permission::ManageTrips => "trips:manage",
            Permission::ManageHotels => "hotels:manage",
            Permission::ManageTransfers => "transfers:manage",
            Permission::ManageActivities => "activities:manage",
            Permission::ManageBlogs => "blogs:manage",
            Permission::ModerateReviews => "reviews:moderate",
            Permission::ManageLeads => "leads:manage",
            Permission::ManageCustomRequests => "custom_requests:manage",
            Permission::ManageCollaborators => "collaborators:manage",
            Permission::ManageDistribution => "distribution:manage",
            Permission::ApproveListings => "listings:approve",
            Permission::ManageUsers => "users:manage",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        Permission::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("Unknown permission: {}", s))
    }
}

const ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::ViewDashboard,
    Permission::ManageDestinations,
    Permission::ManageTrips,
    Permission::ManageHotels,
    Permission::ManageTransfers,
    Permission::ManageActivities,
    Permission::ManageBlogs,
    Permission::ModerateReviews,
    Permission::ManageLeads,
    Permission::ManageCustomRequests,
    Permission::ManageCollaborators,
    Permission::ManageDistribution,
    Permission::ApproveListings,
];

const EDITOR_PERMISSIONS: &[Permission] = &[
    Permission::ViewDashboard,
    Permission::ManageDestinations,
    Permission::ManageTrips,
    Permission::ManageHotels,
    Permission::ManageTransfers,
    Permission::ManageActivities,
    Permission::ManageBlogs,
    Permission::ModerateReviews,
];

const SALES_PERMISSIONS: &[Permission] = &[
    Permission::ViewDashboard,
    Permission::ManageLeads,
    Permission::ManageCustomRequests,
    Permission::ManageCollaborators,
    Permission::ManageDistribution,
];

/// Back-office role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Admin,
    Editor,
    Sales,
}

impl Role {
    /// Convert from database string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "super_admin" => Ok(Role::SuperAdmin),
            "admin" => Ok(Role::Admin),
            "editor" => Ok(Role::Editor),
            "sales" => Ok(Role::Sales),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }

    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Sales => "sales",
        }
    }

    pub fn permissions(&self) -> &'static [Permission] {
        match self {
            Role::SuperAdmin => &Permission::ALL,
            Role::Admin => ADMIN_PERMISSIONS,
            Role::Editor => EDITOR_PERMISSIONS,
            Role::Sales => SALES_PERMISSIONS,
        }
    }

    pub fn has(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }

    pub fn permission_names(&self) -> Vec<String> {
        self.permissions().iter().map(|p| p.as_str().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_super_admin_has_everything() {
        for permission in Permission::ALL {
            assert!(Role::SuperAdmin.has(permission));
        }
    }

    #[test]
    fn test_admin_cannot_manage_users() {
        assert!(!Role::Admin.has(Permission::ManageUsers));
        assert!(Role::Admin.has(Permission::ApproveListings));
    }

    #[test]
    fn test_editor_and_sales_are_disjoint_on_business_areas() {
        assert!(Role::Editor.has(Permission::ManageTrips));
        assert!(!Role::Editor.has(Permission::ManageLeads));
        assert!(!Role::Editor.has(Permission::ApproveListings));

        assert!(Role::Sales.has(Permission::ManageLeads));
        assert!(!Role::Sales.has(Permission::ManageTrips));
        assert!(Role::Sales.has(Permission::ViewDashboard));
    }

    #[test]
    fn test_permission_strings_round_trip_serde() {
        for permission in Permission::ALL {
            let json = serde_json::to_value(permission).unwrap();
            assert_eq!(json, permission.as_str());
            assert_eq!(Permission::from_str(permission.as_str()).unwrap(), permission);
        }
        assert!(Permission::from_str("trips:delete").is_err());
    }

    #[test]
    fn test_role_conversion() {
        assert_eq!(Role::from_str("SUPER_ADMIN").unwrap(), Role::SuperAdmin);
        assert_eq!(Role::Sales.as_str(), "sales");
        assert!(Role::from_str("guest").is_err());
    }
}
