pub use super::server::Entity as Server;
pub use super::server_group::Entity as ServerGroup;
pub use super::user::Entity as User;
pub use super::user_mfa::Entity as UserMfa;
pub use super::user_preference::Entity as UserPreference;
