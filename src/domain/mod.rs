mod credential_store;
mod new_user;
mod user_email;
mod user_full_name;
mod user_password;

pub use credential_store::{CredentialStore, StoreError, UserRecord};
pub use new_user::NewUser;
pub use user_email::UserEmail;
pub use user_full_name::UserFullName;
pub use user_password::UserPassword;
