//! gRPC clients for calling the user-service.

mod user_client;

pub use user_client::UserClient;
