pub mod hashmap_account_store;
pub mod hashmap_invite_store;
pub mod hashmap_session_store;
pub mod invite_usage;
pub mod postgres_invite_store;

pub use hashmap_account_store::HashMapAccountStore;
pub use hashmap_invite_store::HashMapInviteStore;
pub use hashmap_session_store::HashMapSessionStore;
pub use invite_usage::InviteUsage;
pub use postgres_invite_store::PostgresInviteStore;
