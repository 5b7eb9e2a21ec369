use surrealdb::sql::Thing;
use uuid::Uuid;

pub const USER_TABLE: &str = "user";
pub const PLAYLIST_TABLE: &str = "playlist";

/// Key part of an id given either as `table:<key>` or as a bare `<key>`.
pub fn parse_id_part(id: &str) -> &str {
    match id.split_once(':') {
        Some((_, id_part)) => id_part,
        None => id,
    }
}

/// Raw key of a record id, without table prefix or escaping brackets.
pub fn record_key(thing: &Thing) -> String {
    thing.id.to_raw()
}

pub fn new_record_key() -> String {
    Uuid::new_v4().to_string()
}

/// A structurally valid identity is a bare hyphenated UUID. Table prefixes,
/// braces and urn forms are refused so the id can be used as a file name as is.
pub fn is_valid_id(id: &str) -> bool {
    id.len() == 36 && Uuid::parse_str(id).is_ok()
}

pub fn create_user_thing(user_id: &str) -> Thing {
    let clean_id = parse_id_part(user_id);
    Thing::from((USER_TABLE.to_string(), clean_id.to_string()))
}

pub fn create_playlist_thing(playlist_id: &str) -> Thing {
    let clean_id = parse_id_part(playlist_id);
    Thing::from((PLAYLIST_TABLE.to_string(), clean_id.to_string()))
}
