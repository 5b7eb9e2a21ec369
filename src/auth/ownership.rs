use crate::{Error, Result};

/// Resources with a single owning user.
pub trait Owned {
    fn owner_id(&self) -> &str;
}

pub fn can_mutate<R: Owned>(resource: &R, user_id: &str) -> bool {
    resource.owner_id() == user_id
}

/// Denies with `message` when `user_id` is not the owner.
pub fn ensure_owner<R: Owned>(resource: &R, user_id: &str, message: &'static str) -> Result<()> {
    if can_mutate(resource, user_id) {
        Ok(())
    } else {
        Err(Error::Forbidden { message })
    }
}

pub fn can_view<R: Owned>(resource: &R, is_public: bool, user_id: &str) -> bool {
    is_public || can_mutate(resource, user_id)
}
