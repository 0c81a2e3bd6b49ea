//! gRPC client for user-service.

use std::future::Future;
use std::time::Duration;

use tonic::transport::{Channel, Endpoint};
use tonic::{Response, Status};
use tracing::debug;

use common::{AppError, AppResult, GrpcClientConfig};
use domain::{DeletedUserResponse, UserResponse};
use proto::user::{
    user_service_client::UserServiceClient as ProtoUserServiceClient, CreateUserRequest,
    DeleteUserRequest, GetUserRequest, UpdateUserRequest,
};

/// gRPC client wrapper for user-service.
///
/// Built once at startup and shared by all requests; cloning the inner
/// client only clones a channel handle.
#[derive(Clone)]
pub struct UserClient {
    client: ProtoUserServiceClient<Channel>,
    request_timeout: Duration,
}

impl UserClient {
    /// Create a client whose channel connects on first use.
    pub fn connect_lazy(config: &GrpcClientConfig) -> Result<Self, tonic::transport::Error> {
        debug!("Configuring user-service client for {}", config.endpoint);
        let channel = Endpoint::from_shared(config.endpoint.clone())?
            .connect_timeout(config.connect_timeout())
            .connect_lazy();

        Ok(Self {
            client: ProtoUserServiceClient::new(channel),
            request_timeout: config.request_timeout(),
        })
    }

    /// Wrap a message with the fixed deadline, propagated as `grpc-timeout`.
    fn request<T>(&self, message: T) -> tonic::Request<T> {
        let mut request = tonic::Request::new(message);
        request.set_timeout(self.request_timeout);
        request
    }

    /// Await a call, failing with a timeout once the deadline passes.
    ///
    /// Dropping the call resets the stream, which cancels the handler on the
    /// server side.
    async fn call<T>(
        &self,
        call: impl Future<Output = Result<Response<T>, Status>>,
    ) -> AppResult<T> {
        match tokio::time::timeout(self.request_timeout, call).await {
            Ok(reply) => Ok(reply.map_err(AppError::from)?.into_inner()),
            Err(_) => Err(AppError::Timeout(format!(
                "no reply from user-service within {:?}",
                self.request_timeout
            ))),
        }
    }

    /// Create user.
    pub async fn create_user(&self, name: String, email: String) -> AppResult<UserResponse> {
        let request = self.request(CreateUserRequest { name, email });

        let mut client = self.client.clone();
        let proto = self.call(client.create_user(request)).await?;

        Ok(UserResponse {
            id: proto.id,
            name: proto.name,
            email: proto.email,
        })
    }

    /// Get user by ID.
    pub async fn get_user(&self, id: String) -> AppResult<UserResponse> {
        let request = self.request(GetUserRequest { id });

        let mut client = self.client.clone();
        let proto = self.call(client.get_user(request)).await?;

        Ok(UserResponse {
            id: proto.id,
            name: proto.name,
            email: proto.email,
        })
    }

    /// Update user.
    pub async fn update_user(
        &self,
        id: String,
        name: String,
        email: String,
    ) -> AppResult<UserResponse> {
        let request = self.request(UpdateUserRequest { id, name, email });

        let mut client = self.client.clone();
        let proto = self.call(client.update_user(request)).await?;

        Ok(UserResponse {
            id: proto.id,
            name: proto.name,
            email: proto.email,
        })
    }

    /// Delete user.
    pub async fn delete_user(&self, id: String) -> AppResult<DeletedUserResponse> {
        let request = self.request(DeleteUserRequest { id });

        let mut client = self.client.clone();
        let proto = self.call(client.delete_user(request)).await?;

        Ok(DeletedUserResponse { id: proto.id })
    }
}
