use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Staff,
    Customer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    TrackPackages,
    ViewDashboard,
    ManagePackages,
    ManageCustomers,
    ManageDeliveries,
    ViewReports,
    ManageUsers,
}

const ADMIN_CAPABILITIES: &[Capability] = &[
    Capability::TrackPackages,
    Capability::ViewDashboard,
    Capability::ManagePackages,
    Capability::ManageCustomers,
    Capability::ManageDeliveries,
    Capability::ViewReports,
    Capability::ManageUsers,
];

const STAFF_CAPABILITIES: &[Capability] = &[
    Capability::TrackPackages,
    Capability::ViewDashboard,
    Capability::ManagePackages,
    Capability::ManageCustomers,
    Capability::ManageDeliveries,
    Capability::ViewReports,
];

const CUSTOMER_CAPABILITIES: &[Capability] = &[Capability::TrackPackages];

impl Role {
    pub const ALL: [Self; 3] = [Self::Admin, Self::Staff, Self::Customer];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Staff => "staff",
            Self::Customer => "customer",
        }
    }

    #[must_use]
    pub const fn capabilities(self) -> &'static [Capability] {
        match self {
            Self::Admin => ADMIN_CAPABILITIES,
            Self::Staff => STAFF_CAPABILITIES,
            Self::Customer => CUSTOMER_CAPABILITIES,
        }
    }

    #[must_use]
    pub fn allows(self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

impl Capability {
    pub const ALL: [Self; 7] = [
        Self::TrackPackages,
        Self::ViewDashboard,
        Self::ManagePackages,
        Self::ManageCustomers,
        Self::ManageDeliveries,
        Self::ViewReports,
        Self::ManageUsers,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TrackPackages => "track_packages",
            Self::ViewDashboard => "view_dashboard",
            Self::ManagePackages => "manage_packages",
            Self::ManageCustomers => "manage_customers",
            Self::ManageDeliveries => "manage_deliveries",
            Self::ViewReports => "view_reports",
            Self::ManageUsers => "manage_users",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AccessError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == normalized)
            .ok_or_else(|| AccessError::UnknownRole {
                value: value.to_owned(),
            })
    }
}

impl FromStr for Capability {
    type Err = AccessError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|capability| capability.as_str() == normalized)
            .ok_or_else(|| AccessError::UnknownCapability {
                value: value.to_owned(),
            })
    }
}

/// Signed-in profile as resolved by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub role: Role,
}

impl User {
    #[must_use]
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }
}

#[must_use]
pub fn has_capability(user: &User, capability: Capability) -> bool {
    user.role.allows(capability)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("unknown role `{value}`")]
    UnknownRole { value: String },

    #[error("unknown capability `{value}`")]
    UnknownCapability { value: String },
}
