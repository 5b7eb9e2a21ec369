use lazy_regex::regex_is_match;

use super::{CatalogListRule, CatalogRule, ListRule, Rule};
use crate::{
    catalog::{genres::is_genre, CatalogType},
    helpers::thing_helpers::is_valid_id,
};

pub const TITLE: Rule = Rule::new(
    "Title must be between 1 and 30 characters long and can contain letters, numbers, spaces, apostrophes, and hyphens",
    is_title,
);

pub const DESCRIPTION: Rule =
    Rule::new("Description must be at most 500 characters long", is_description);

pub const TAG: Rule = Rule::new("Tag must be a valid genre", is_genre);
pub const TAGS: ListRule = ListRule::new("Tags must be an array of valid genres", &TAG);

pub const SONG: CatalogRule =
    CatalogRule::new("Song must be a valid Spotify track IDs", CatalogType::Track);
pub const SONGS: CatalogListRule =
    CatalogListRule::new("Songs must be an array of valid Spotify track IDs", &SONG);

pub const OWNER: Rule = Rule::new("Owner must be a valid user ID", is_valid_id);

fn is_title(value: &str) -> bool {
    regex_is_match!(r"^[a-zA-Z0-9\s'-]{1,30}$", value)
}

fn is_description(value: &str) -> bool {
    value.chars().count() <= 500
}
