use serde::Deserialize;
use strum::{Display, EnumString};
use surrealdb::sql::Thing;
use validator::Validate;

pub enum IdentIdName {
    Id(Thing),
    ColumnIdent { column: String, val: String },
}

impl IdentIdName {
    /// WHERE clause; the value is bound as `$ident`.
    pub fn to_where_clause(&self) -> String {
        match self {
            IdentIdName::Id(_) => "id = $ident".to_string(),
            IdentIdName::ColumnIdent { column, .. } => format!("{column} = $ident"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Deserialize)]
pub enum QryOrder {
    DESC,
    ASC,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Pagination {
    #[serde(default)]
    #[validate(range(min = 0))]
    pub skip: i64,
    #[serde(default = "default_page_limit")]
    #[validate(range(min = 1, max = 1000))]
    pub limit: i64,
}

fn default_page_limit() -> i64 {
    20
}

impl Pagination {
    pub fn new(skip: i64, limit: i64) -> Self {
        Pagination { skip, limit }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            skip: 0,
            limit: default_page_limit(),
        }
    }
}

pub trait ViewFieldSelector {
    // select query fields to fill the View object
    fn get_select_query_fields() -> String;
}
