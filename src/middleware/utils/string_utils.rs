use surrealdb::sql::Thing;

use crate::middleware::error::{AppError, AppResult};

/// Accepts a bare record key or the full `table:key` form.
pub fn get_table_thing(table: &str, value: &str) -> AppResult<Thing> {
    let value = value.trim();
    let key = match value.split_once(':') {
        Some((tb, key)) if tb == table => key,
        Some(_) => {
            return Err(AppError::Generic {
                description: format!("Id {value} does not belong to {table}"),
            })
        }
        None => value,
    };
    if key.is_empty() {
        return Err(AppError::Generic {
            description: "Id is empty".to_string(),
        });
    }
    Ok(Thing::from((table, key)))
}

/// Public id of a record: its key without the table prefix.
pub fn thing_key(thing: &Thing) -> String {
    thing.id.to_raw()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_and_prefixed_ids_match() {
        let bare = get_table_thing("photo", "abc123").unwrap();
        let prefixed = get_table_thing("photo", "photo:abc123").unwrap();
        assert_eq!(bare, prefixed);
        assert_eq!(thing_key(&bare), "abc123");
    }

    #[test]
    fn other_table_is_rejected() {
        assert!(get_table_thing("photo", "local_user:abc").is_err());
        assert!(get_table_thing("photo", "").is_err());
    }
}
