//! gRPC implementation for UserService.

use std::sync::Arc;

use tonic::{Request, Response, Status};
use tracing::debug;

use crate::service::UserService;
use proto::user::{
    user_service_server::UserService as UserServiceProto, CreateUserRequest,
    CreateUserResponse, DeleteUserRequest, DeleteUserResponse, GetUserRequest, GetUserResponse,
    UpdateUserRequest, UpdateUserResponse,
};

/// gRPC service wrapper for UserService.
pub struct UserGrpcService {
    service: Arc<dyn UserService>,
}

impl UserGrpcService {
    /// Create a new gRPC service wrapper.
    pub fn new(service: Arc<dyn UserService>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl UserServiceProto for UserGrpcService {
    async fn create_user(
        &self,
        request: Request<CreateUserRequest>,
    ) -> Result<Response<CreateUserResponse>, Status> {
        let req = request.into_inner();

        let user = self
            .service
            .create_user(req.name, req.email)
            .await
            .map_err(Status::from)?;
        Ok(Response::new(CreateUserResponse {
            id: user.id_string(),
            name: user.name,
            email: user.email,
        }))
    }

    async fn get_user(
        &self,
        request: Request<GetUserRequest>,
    ) -> Result<Response<GetUserResponse>, Status> {
        let req = request.into_inner();
        debug!(id = %req.id, "GetUser");

        let user = self.service.get_user(&req.id).await.map_err(Status::from)?;
        Ok(Response::new(GetUserResponse {
            id: user.id_string(),
            name: user.name,
            email: user.email,
        }))
    }

    async fn update_user(
        &self,
        request: Request<UpdateUserRequest>,
    ) -> Result<Response<UpdateUserResponse>, Status> {
        let req = request.into_inner();

        let user = self
            .service
            .update_user(&req.id, req.name, req.email)
            .await
            .map_err(Status::from)?;
        Ok(Response::new(UpdateUserResponse {
            id: user.id_string(),
            name: user.name,
            email: user.email,
        }))
    }

    async fn delete_user(
        &self,
        request: Request<DeleteUserRequest>,
    ) -> Result<Response<DeleteUserResponse>, Status> {
        let req = request.into_inner();

        let id = self
            .service
            .delete_user(&req.id)
            .await
            .map_err(Status::from)?;
        Ok(Response::new(DeleteUserResponse { id: id.to_string() }))
    }
}
