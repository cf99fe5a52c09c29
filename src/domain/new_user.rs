use crate::domain::user_email::UserEmail;
use crate::domain::user_full_name::UserFullName;

/// A signup candidate whose fields have already been through domain parsing.
/// The raw password never travels with it; only its hash reaches the store.
pub struct NewUser {
    pub email: UserEmail,
    pub full_name: UserFullName,
}
