use serde::{Deserialize, Serialize};
use shared::errors::ServiceError;
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Id,
    Name,
    DisplayName,
    Price,
    Stock,
    CategoryId,
    UserId,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    /// Column name in the `products` table. Only these names ever reach an
    /// ORDER BY clause.
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "product_id",
            SortField::Name => "name",
            SortField::DisplayName => "display_name",
            SortField::Price => "price",
            SortField::Stock => "stock",
            SortField::CategoryId => "category_id",
            SortField::UserId => "user_id",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
        }
    }
}

impl FromStr for SortField {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // accepts snake_case, camelCase and PascalCase spellings
        let key: String = s
            .chars()
            .filter(|c| *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "id" | "productid" => Ok(SortField::Id),
            "name" => Ok(SortField::Name),
            "displayname" => Ok(SortField::DisplayName),
            "price" => Ok(SortField::Price),
            "stock" => Ok(SortField::Stock),
            "categoryid" => Ok(SortField::CategoryId),
            "userid" => Ok(SortField::UserId),
            "createdat" => Ok(SortField::CreatedAt),
            "updatedat" => Ok(SortField::UpdatedAt),
            _ => Err(ServiceError::Validation(vec![format!(
                "Unknown sort field '{s}'"
            )])),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortField::Id => "id",
            other => other.column(),
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// NULL placement mirrors `Option` ordering so every store sorts alike.
    pub fn sql(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC NULLS FIRST",
            SortDirection::Descending => "DESC NULLS LAST",
        }
    }
}

impl FromStr for SortDirection {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(ServiceError::Validation(vec![format!(
                "Unknown sort direction '{s}'"
            )])),
        }
    }
}

/// Field plus direction, written as `"price"`, `"price desc"` or `"name asc"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }
}

impl FromStr for SortSpec {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();

        let field = parts
            .next()
            .ok_or_else(|| ServiceError::Validation(vec!["Sort field is required".to_string()]))?
            .parse::<SortField>()?;

        let direction = match parts.next() {
            Some(dir) => dir.parse::<SortDirection>()?,
            None => SortDirection::Ascending,
        };

        if let Some(extra) = parts.next() {
            return Err(ServiceError::Validation(vec![format!(
                "Unexpected token '{extra}' in sort expression"
            )]));
        }

        Ok(Self { field, direction })
    }
}

impl TryFrom<String> for SortSpec {
    type Error = ServiceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SortSpec> for String {
    fn from(value: SortSpec) -> Self {
        value.to_string()
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            SortDirection::Ascending => write!(f, "{}", self.field),
            SortDirection::Descending => write!(f, "{} desc", self.field),
        }
    }
}
