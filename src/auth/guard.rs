//! Authorization predicates over a fully-materialized identity.
//!
//! `CurrentUser` owns its role and instructor data outright, so a predicate
//! can never observe an unloaded relation; the pipeline loads everything
//! before handlers run.

use uuid::Uuid;

use crate::entity::user;

/// Closed set of grantable roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Accountant,
    CardHolder,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Accountant => "accountant",
            Self::CardHolder => "card_holder",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "accountant" => Some(Self::Accountant),
            "card_holder" => Some(Self::CardHolder),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The authenticated identity handed to handlers, with role grants and
/// instructor assignments already loaded.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: user::Model,
    pub roles: Vec<Role>,
    pub instructor_station_ids: Vec<Uuid>,
}

impl CurrentUser {
    pub fn id(&self) -> Uuid {
        self.user.id
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    /// True when the caller is the target user or an admin.
    pub fn is_self_or_admin(&self, target: Uuid) -> bool {
        self.user.id == target || self.is_admin()
    }

    /// True when the caller instructs at the given station.
    pub fn is_instructor_for(&self, station_id: Uuid) -> bool {
        self.instructor_station_ids.contains(&station_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn current_user(roles: Vec<Role>, stations: Vec<Uuid>) -> CurrentUser {
        let now = Utc::now();
        CurrentUser {
            user: user::Model {
                id: Uuid::new_v4(),
                first_name: "Sam".to_string(),
                last_name: "Maker".to_string(),
                email: "sam@example.com".to_string(),
                phone: None,
                email_visible: None,
                phone_visible: None,
                postal_code: None,
                created_at: now,
                updated_at: now,
                deleted_at: None,
            },
            roles,
            instructor_station_ids: stations,
        }
    }

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Admin, Role::Accountant, Role::CardHolder] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("janitor"), None);
    }

    #[test]
    fn test_is_admin() {
        assert!(current_user(vec![Role::Admin], vec![]).is_admin());
        assert!(!current_user(vec![Role::Accountant], vec![]).is_admin());
        assert!(!current_user(vec![], vec![]).is_admin());
    }

    #[test]
    fn test_is_self_or_admin() {
        let me = current_user(vec![], vec![]);
        assert!(me.is_self_or_admin(me.id()));
        assert!(!me.is_self_or_admin(Uuid::new_v4()));

        let admin = current_user(vec![Role::Admin], vec![]);
        assert!(admin.is_self_or_admin(Uuid::new_v4()));
    }

    #[test]
    fn test_is_instructor_for() {
        let station = Uuid::new_v4();
        let teacher = current_user(vec![], vec![station]);
        assert!(teacher.is_instructor_for(station));
        assert!(!teacher.is_instructor_for(Uuid::new_v4()));

        // Admin role does not imply instructorship.
        let admin = current_user(vec![Role::Admin], vec![]);
        assert!(!admin.is_instructor_for(station));
    }
}
