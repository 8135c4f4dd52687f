//! Users against `/slurmdb/v0.0.41/user*`.

use super::base;
use crate::convert::{UserConverter, user_create, user_update};
use crate::wire::UserRec;
use async_trait::async_trait;
use serde_json::json;
use slurmrest_core::{
    AdapterBase, ApiRequest, Capability, Converter, RequestContext, Resource, Result, Transport,
    UserManager, WriteOp,
};
use slurmrest_types::{
    CreateResponse, ListFilter, ListResult, User, UserCreate, UserListOptions, UserUpdate,
};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct UserAdapter {
    base: AdapterBase,
}

impl UserAdapter {
    pub fn new(transport: Option<Arc<dyn Transport>>) -> Self {
        Self {
            base: base("user", transport),
        }
    }

    fn check_name(&self, operation: &str, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(self.base.invalid(operation, "name", "user name is required"));
        }
        self.base.check_segment(operation, "name", name)
    }

    fn user_path(&self, name: &str) -> String {
        self.base.slurmdb_entity_path("user", name)
    }

    async fn post_users(
        &self,
        ctx: &RequestContext,
        operation: &str,
        record: &UserRec,
    ) -> Result<Vec<String>> {
        let record = self.base.encode(operation, record)?;
        self.base
            .execute(
                ctx,
                operation,
                ApiRequest::post(self.base.slurmdb_path("users"), json!({ "users": [record] })),
            )
            .await
    }
}

#[async_trait]
impl UserManager for UserAdapter {
    async fn list(
        &self,
        ctx: &RequestContext,
        opts: &UserListOptions,
    ) -> Result<ListResult<User>> {
        let op = "ListUsers";
        self.base
            .begin(ctx, op, Some(Capability::Resource(Resource::Users)))?;
        let mut request = ApiRequest::get(self.base.slurmdb_path("users"));
        if opts.with_deleted {
            request = request.with_query("DELETED", "true");
        }
        if opts.with_associations {
            request = request.with_query("WithAssociations", "true");
        }
        let users = self
            .base
            .fetch_records(ctx, op, request, "users", |w: &UserRec| {
                UserConverter.to_common(w)
            })
            .await?;
        Ok(opts.apply(users))
    }

    async fn get(&self, ctx: &RequestContext, name: &str) -> Result<User> {
        let op = "GetUser";
        self.base
            .begin(ctx, op, Some(Capability::Resource(Resource::Users)))?;
        self.check_name(op, name)?;
        self.base
            .fetch_record(
                ctx,
                op,
                ApiRequest::get(self.user_path(name)),
                "users",
                name,
                |w: &UserRec| UserConverter.to_common(w),
            )
            .await
    }

    async fn create(&self, ctx: &RequestContext, user: &UserCreate) -> Result<CreateResponse> {
        let op = "CreateUser";
        self.base.begin(
            ctx,
            op,
            Some(Capability::Write(Resource::Users, WriteOp::Create)),
        )?;
        self.check_name(op, &user.name)?;
        let warnings = self.post_users(ctx, op, &user_create(user)).await?;
        Ok(CreateResponse {
            id: user.name.clone(),
            warnings,
        })
    }

    async fn update(&self, ctx: &RequestContext, name: &str, update: &UserUpdate) -> Result<()> {
        let op = "UpdateUser";
        self.base.begin(
            ctx,
            op,
            Some(Capability::Write(Resource::Users, WriteOp::Update)),
        )?;
        self.check_name(op, name)?;
        if *update == UserUpdate::default() {
            return Err(self.base.invalid(op, "update", "no fields to update"));
        }
        self.post_users(ctx, op, &user_update(name, update)).await?;
        Ok(())
    }

    async fn delete(&self, ctx: &RequestContext, name: &str) -> Result<()> {
        let op = "DeleteUser";
        self.base.begin(
            ctx,
            op,
            Some(Capability::Write(Resource::Users, WriteOp::Delete)),
        )?;
        self.check_name(op, name)?;
        self.base
            .execute(ctx, op, ApiRequest::delete(self.user_path(name)))
            .await?;
        Ok(())
    }
}
