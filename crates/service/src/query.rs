//! Enumerated list-query contract for `GET /users`.
//!
//! Callers pass `filter=<field>:<op>:<value>` triples,
//! `sort=<field>:<asc|desc>`, and `page`/`per_page`. Fields and
//! operators come from a fixed allow-list; anything else is rejected
//! before a query is built, so no caller-supplied structure ever
//! reaches the storage layer.

use models::user;
use sea_orm::sea_query::SimpleExpr;
use sea_orm::{ColumnTrait, Order, QueryFilter, QueryOrder, Select};

use crate::errors::ServiceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserField {
    FirstName,
    LastName,
    City,
    State,
    Nationality,
    PrimaryEmailAddress,
    IsActive,
    Gender,
}

impl UserField {
    fn parse(raw: &str) -> Result<Self, ServiceError> {
        Ok(match raw {
            "first_name" => Self::FirstName,
            "last_name" => Self::LastName,
            "city" => Self::City,
            "state" => Self::State,
            "nationality" => Self::Nationality,
            "primary_email_address" => Self::PrimaryEmailAddress,
            "is_active" => Self::IsActive,
            "gender" => Self::Gender,
            other => {
                return Err(ServiceError::Validation(format!(
                    "unknown query field: {other}"
                )))
            }
        })
    }

    fn column(self) -> user::Column {
        match self {
            Self::FirstName => user::Column::FirstName,
            Self::LastName => user::Column::LastName,
            Self::City => user::Column::City,
            Self::State => user::Column::State,
            Self::Nationality => user::Column::Nationality,
            Self::PrimaryEmailAddress => user::Column::PrimaryEmailAddress,
            Self::IsActive => user::Column::IsActive,
            Self::Gender => user::Column::Gender,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Ne,
    Contains,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl FilterOp {
    fn parse(raw: &str) -> Result<Self, ServiceError> {
        Ok(match raw {
            "eq" => Self::Eq,
            "ne" => Self::Ne,
            "contains" => Self::Contains,
            "gt" => Self::Gt,
            "gte" => Self::Gte,
            "lt" => Self::Lt,
            "lte" => Self::Lte,
            other => {
                return Err(ServiceError::Validation(format!(
                    "unknown filter operator: {other}"
                )))
            }
        })
    }
}

#[derive(Clone, Debug)]
pub struct Filter {
    pub field: UserField,
    pub op: FilterOp,
    pub value: String,
}

impl Filter {
    /// Parse a `field:op:value` triple.
    pub fn parse(raw: &str) -> Result<Self, ServiceError> {
        let mut parts = raw.splitn(3, ':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(field), Some(op), Some(value)) => Ok(Self {
                field: UserField::parse(field)?,
                op: FilterOp::parse(op)?,
                value: value.to_string(),
            }),
            _ => Err(ServiceError::Validation(format!(
                "malformed filter `{raw}`; expected field:op:value"
            ))),
        }
    }

    fn expr(&self) -> Result<SimpleExpr, ServiceError> {
        let col = self.field.column();
        // The boolean column compares as a boolean; everything else as text.
        if self.field == UserField::IsActive {
            let flag: bool = self.value.parse().map_err(|_| {
                ServiceError::Validation(format!("is_active expects true/false, got `{}`", self.value))
            })?;
            return match self.op {
                FilterOp::Eq => Ok(col.eq(flag)),
                FilterOp::Ne => Ok(col.ne(flag)),
                _ => Err(ServiceError::Validation(
                    "is_active supports only eq and ne".into(),
                )),
            };
        }
        let value = self.value.as_str();
        Ok(match self.op {
            FilterOp::Eq => col.eq(value),
            FilterOp::Ne => col.ne(value),
            FilterOp::Contains => col.contains(value),
            FilterOp::Gt => col.gt(value),
            FilterOp::Gte => col.gte(value),
            FilterOp::Lt => col.lt(value),
            FilterOp::Lte => col.lte(value),
        })
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Sort {
    pub field: UserField,
    pub descending: bool,
}

impl Sort {
    /// Parse a `field:asc` / `field:desc` pair; the direction defaults
    /// to ascending when omitted.
    pub fn parse(raw: &str) -> Result<Self, ServiceError> {
        let mut parts = raw.splitn(2, ':');
        let field = UserField::parse(parts.next().unwrap_or_default())?;
        let descending = match parts.next() {
            None | Some("asc") => false,
            Some("desc") => true,
            Some(other) => {
                return Err(ServiceError::Validation(format!(
                    "unknown sort direction: {other}"
                )))
            }
        };
        Ok(Self { field, descending })
    }
}

/// Pagination parameters, 1-based page index.
#[derive(Clone, Copy, Debug)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, per_page: 20 }
    }
}

impl Pagination {
    /// Clamp to sane bounds and convert to the 0-based index / page
    /// size pair the paginator expects.
    pub fn normalize(self) -> (u64, u64) {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = self.per_page.clamp(1, 100);
        ((page - 1) as u64, per_page as u64)
    }
}

#[derive(Clone, Debug, Default)]
pub struct ListOptions {
    pub filters: Vec<Filter>,
    pub sort: Option<Sort>,
    pub page: Pagination,
}

impl ListOptions {
    /// Build options from the raw query pairs arriving at the HTTP
    /// boundary. Unknown keys are rejected.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, ServiceError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut opts = Self::default();
        for (key, value) in pairs {
            match key {
                "filter" => opts.filters.push(Filter::parse(value)?),
                "sort" => opts.sort = Some(Sort::parse(value)?),
                "page" => {
                    opts.page.page = value.parse().map_err(|_| {
                        ServiceError::Validation(format!("page expects a positive integer, got `{value}`"))
                    })?
                }
                "per_page" => {
                    opts.page.per_page = value.parse().map_err(|_| {
                        ServiceError::Validation(format!("per_page expects a positive integer, got `{value}`"))
                    })?
                }
                other => {
                    return Err(ServiceError::Validation(format!(
                        "unknown query parameter: {other}"
                    )))
                }
            }
        }
        Ok(opts)
    }

    /// Apply filters and ordering to a user select.
    pub fn apply(&self, mut select: Select<user::Entity>) -> Result<Select<user::Entity>, ServiceError> {
        for filter in &self.filters {
            select = select.filter(filter.expr()?);
        }
        if let Some(sort) = &self.sort {
            let order = if sort.descending { Order::Desc } else { Order::Asc };
            select = select.order_by(sort.field.column(), order);
        }
        Ok(select)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_option_set() {
        let opts = ListOptions::from_pairs([
            ("filter", "city:eq:Boston"),
            ("filter", "last_name:contains:son"),
            ("sort", "last_name:desc"),
            ("page", "2"),
            ("per_page", "50"),
        ])
        .unwrap();
        assert_eq!(opts.filters.len(), 2);
        assert_eq!(opts.filters[0].field, UserField::City);
        assert_eq!(opts.filters[1].op, FilterOp::Contains);
        assert!(opts.sort.unwrap().descending);
        assert_eq!(opts.page.normalize(), (1, 50));
    }

    #[test]
    fn rejects_unknown_field() {
        let err = Filter::parse("password_hash:eq:x").unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn rejects_unknown_operator() {
        assert!(Filter::parse("city:regex:^B").is_err());
    }

    #[test]
    fn rejects_malformed_triple() {
        assert!(Filter::parse("city:eq").is_err());
    }

    #[test]
    fn rejects_unknown_query_key() {
        assert!(ListOptions::from_pairs([("find-options", "{}")]).is_err());
    }

    #[test]
    fn boolean_filter_requires_boolean_value() {
        assert!(Filter::parse("is_active:eq:yes").unwrap_err().to_string().contains("true/false"));
        assert!(Filter::parse("is_active:gt:true").is_err());
    }

    #[test]
    fn value_may_contain_separators() {
        let f = Filter::parse("primary_email_address:eq:a@b.com:8080").unwrap();
        assert_eq!(f.value, "a@b.com:8080");
    }

    #[test]
    fn pagination_clamps() {
        assert_eq!(Pagination { page: 0, per_page: 0 }.normalize(), (0, 1));
        assert_eq!(Pagination { page: 5, per_page: 1000 }.normalize(), (4, 100));
        let d = Pagination::default();
        assert_eq!((d.page, d.per_page), (1, 20));
    }

    #[test]
    fn sort_defaults_to_ascending() {
        let s = Sort::parse("last_name").unwrap();
        assert!(!s.descending);
        assert!(Sort::parse("last_name:sideways").is_err());
    }
}
