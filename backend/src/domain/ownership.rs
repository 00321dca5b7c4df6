//! Ownership checks shared by categories and items.
//!
//! Every mutable catalog record names exactly one owning user. Only that
//! user may rename, edit or delete it.

use super::UserId;

/// Records that carry an owning user.
pub trait Owned {
    /// Identifier of the user who created the record.
    fn owner(&self) -> UserId;
}

/// Return `true` when `acting` owns `record`.
///
/// # Examples
/// ```
/// use catalog_backend::domain::{is_owner, Owned, UserId};
///
/// struct Note(UserId);
/// impl Owned for Note {
///     fn owner(&self) -> UserId {
///         self.0
///     }
/// }
///
/// assert!(is_owner(&Note(UserId::new(1)), UserId::new(1)));
/// assert!(!is_owner(&Note(UserId::new(1)), UserId::new(2)));
/// ```
pub fn is_owner<R: Owned + ?Sized>(record: &R, acting: UserId) -> bool {
    record.owner() == acting
}

#[cfg(test)]
mod tests {
    //! Behavioural coverage for the ownership predicate.
    use super::*;
    use crate::domain::{Category, CategoryId, CategoryName};
    use rstest::rstest;
    use rstest_bdd_macros::{given, then, when};

    #[given("a category owned by user 1")]
    fn a_category_owned_by_user_one() -> Category {
        Category::new(
            CategoryId::new(10),
            CategoryName::new("Soccer").expect("valid name"),
            UserId::new(1),
        )
    }

    #[when("user {actor} asks to modify it")]
    fn user_asks_to_modify(category: &Category, actor: i32) -> bool {
        is_owner(category, UserId::new(actor))
    }

    #[then("the request is permitted")]
    fn the_request_is_permitted(permitted: bool) {
        assert!(permitted, "owner should be permitted");
    }

    #[then("the request is refused")]
    fn the_request_is_refused(permitted: bool) {
        assert!(!permitted, "non-owner should be refused");
    }

    #[rstest]
    fn owner_may_modify() {
        let category = a_category_owned_by_user_one();
        let permitted = user_asks_to_modify(&category, 1);
        the_request_is_permitted(permitted);
    }

    #[rstest]
    #[case(2)]
    #[case(0)]
    #[case(-1)]
    fn other_users_may_not_modify(#[case] actor: i32) {
        let category = a_category_owned_by_user_one();
        let permitted = user_asks_to_modify(&category, actor);
        the_request_is_refused(permitted);
    }
}
