use lazy_regex::regex_is_match;

use super::{CatalogListRule, CatalogRule, ListRule, Rule};
use crate::{
    catalog::{genres::is_genre, CatalogType},
    helpers::thing_helpers::is_valid_id,
    models::user::{UserRole, UserStatus},
};

pub const EMAIL: Rule = Rule::new("Please use a valid email address", is_email);

pub const USERNAME: Rule = Rule::new(
    "Username must be between 3 and 30 characters long and can contain letters, numbers, dots, underscores, and hyphens",
    is_username,
);

pub const PASSWORD: Rule = Rule::new(
    "Password must contain at least 8 characters, including an uppercase letter, a lowercase letter, a number, and one or more of the following special characters: @$!%*?&#",
    is_password,
);

pub const STATUS: Rule = Rule::new(
    r#"Status must be either "active", "inactive", or "banned""#,
    is_status,
);

pub const ROLE: Rule = Rule::new(
    r#"Role must be either "user", "admin", or "superadmin""#,
    is_role,
);

pub const FIRST_NAME: Rule = Rule::new(
    "First name must be between 1 and 50 characters long and can contain letters (including accentuated ones like é, è, à), spaces, apostrophes, hyphens, periods, and numbers.",
    is_name,
);

pub const LAST_NAME: Rule = Rule::new(
    "Last name must be between 1 and 50 characters long and can contain letters (including accentuated ones like é, è, à), spaces, apostrophes, hyphens, periods, and numbers.",
    is_name,
);

pub const INFO: Rule = Rule::new("Info must be at most 500 characters long", is_info);

pub const USER_ID: Rule = Rule::new("Invalid user Id format", is_valid_id);

// -- Preferences, single element.
pub const GENRE: Rule = Rule::new("Genre must be a valid genre", is_genre);
pub const ARTIST: CatalogRule = CatalogRule::new("Artist must be a valid id", CatalogType::Artist);
pub const FOLLOW: Rule = Rule::new("Follow must be a valid user id", is_valid_id);
pub const PLAYLIST: Rule = Rule::new("Playlist must be a valid playlist id", is_valid_id);

// -- Preferences, whole lists.
pub const GENRES: ListRule = ListRule::new("Genres must be a valid array of genre", &GENRE);
pub const ARTISTS: CatalogListRule =
    CatalogListRule::new("Artists must be a valid array of artist id", &ARTIST);
pub const FOLLOWING: ListRule = ListRule::new("Following must be an array of User IDs", &FOLLOW);
pub const PLAYLISTS: ListRule =
    ListRule::new("Playlists must be a valid array of playlist id", &PLAYLIST);

const PASSWORD_SYMBOLS: &str = "@$!%*?&#";

fn is_email(value: &str) -> bool {
    regex_is_match!(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$", value)
}

fn is_username(value: &str) -> bool {
    regex_is_match!(r"^[a-zA-Z0-9._-]{3,30}$", value)
}

/// At least 8 characters from the allowed set, with one of each class.
fn is_password(value: &str) -> bool {
    regex_is_match!(r"^[A-Za-z0-9@$!%*?&#]{8,}$", value)
        && value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
}

fn is_status(value: &str) -> bool {
    value.parse::<UserStatus>().is_ok()
}

fn is_role(value: &str) -> bool {
    value.parse::<UserRole>().is_ok()
}

fn is_name(value: &str) -> bool {
    regex_is_match!(r"^[\p{L}\s.'0-9-]{1,50}$", value)
}

fn is_info(value: &str) -> bool {
    value.chars().count() <= 500
}
