//! Access scoping
//!
//! One visibility policy for every query and write path. A CLIENT linked to
//! a company only ever sees and touches rows of that company; everyone else
//! sees everything.

use sqlx::{Postgres, QueryBuilder};

use crate::models::user::UserRole;

/// Rows visible to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// No restriction
    All,
    /// Restricted to one company id
    Company(i64),
}

impl Scope {
    /// Scope for a profile. A CLIENT without a company is unrestricted.
    pub fn for_profile(role: UserRole, company_id: Option<i64>) -> Self {
        match (role, company_id) {
            (UserRole::Client, Some(id)) => Scope::Company(id),
            _ => Scope::All,
        }
    }

    pub fn company_id(&self) -> Option<i64> {
        match self {
            Scope::All => None,
            Scope::Company(id) => Some(*id),
        }
    }

    /// Whether a row owned by `company_id` is visible
    pub fn permits(&self, company_id: i64) -> bool {
        match self {
            Scope::All => true,
            Scope::Company(id) => *id == company_id,
        }
    }

    /// Company a created or updated row must belong to: the scoped company
    /// always wins over whatever the request asked for.
    pub fn assign_company(&self, requested: Option<i64>) -> Option<i64> {
        self.company_id().or(requested)
    }

    /// Append ` AND <column> = $n` when restricted. The builder must already
    /// contain a `WHERE` clause.
    pub fn push_filter(&self, builder: &mut QueryBuilder<'_, Postgres>, column: &str) {
        if let Scope::Company(id) = self {
            builder.push(" AND ");
            builder.push(column);
            builder.push(" = ");
            builder.push_bind(*id);
        }
    }
}

/// Company create, update and delete are closed to CLIENT users
pub fn can_manage_companies(role: UserRole) -> bool {
    role != UserRole::Client
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_for_profile() {
        assert_eq!(Scope::for_profile(UserRole::Client, Some(5)), Scope::Company(5));
        assert_eq!(Scope::for_profile(UserRole::Client, None), Scope::All);
        assert_eq!(Scope::for_profile(UserRole::Admin, Some(5)), Scope::All);
        assert_eq!(Scope::for_profile(UserRole::Admin, None), Scope::All);
    }

    #[test]
    fn test_permits() {
        assert!(Scope::All.permits(3));
        assert!(Scope::Company(5).permits(5));
        assert!(!Scope::Company(5).permits(3));
    }

    #[test]
    fn test_assign_company_forces_scoped_company() {
        assert_eq!(Scope::Company(5).assign_company(Some(9)), Some(5));
        assert_eq!(Scope::Company(5).assign_company(None), Some(5));
        assert_eq!(Scope::All.assign_company(Some(9)), Some(9));
        assert_eq!(Scope::All.assign_company(None), None);
    }

    #[test]
    fn test_push_filter() {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT id FROM workers w WHERE TRUE");
        Scope::Company(5).push_filter(&mut builder, "w.company_id");
        assert_eq!(builder.sql(), "SELECT id FROM workers w WHERE TRUE AND w.company_id = $1");

        let mut builder = QueryBuilder::<Postgres>::new("SELECT id FROM workers w WHERE TRUE");
        Scope::All.push_filter(&mut builder, "w.company_id");
        assert_eq!(builder.sql(), "SELECT id FROM workers w WHERE TRUE");
    }

    #[test]
    fn test_client_cannot_manage_companies() {
        assert!(can_manage_companies(UserRole::Admin));
        assert!(!can_manage_companies(UserRole::Client));
    }
}
