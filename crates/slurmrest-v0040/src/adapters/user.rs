//! Users against `/slurmdb/v0.0.40/user*`.

use super::base;
use crate::convert::{UserConverter, user_create};
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

    async fn update(&self, ctx: &RequestContext, _name: &str, _update: &UserUpdate) -> Result<()> {
        self.base.refuse(
            ctx,
            "UpdateUser",
            Capability::Write(Resource::Users, WriteOp::Update),
        )
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

#[cfg(test)]
mod tests {
    use super::*;
    use slurmrest_core::mock::MockTransport;
    use slurmrest_core::{ErrorKind, Method};
    use slurmrest_types::AdminLevel;

    #[tokio::test]
    async fn test_list_by_admin_level() {
        let mock = MockTransport::new()
            .on(
                Method::Get,
                "/slurmdb/v0.0.40/users",
                200,
                json!({"users": [
                    {"name": "alice", "administrator_level": ["Operator"]},
                    {"name": "bob", "administrator_level": ["None"]}
                ]}),
            )
            .shared();
        let opts = UserListOptions {
            admin_levels: vec![AdminLevel::Operator],
            ..Default::default()
        };
        let users = UserAdapter::new(Some(mock))
            .list(&RequestContext::new(), &opts)
            .await
            .unwrap();
        assert_eq!(users.items.len(), 1);
        assert_eq!(users.items[0].name, "alice");
    }

    #[tokio::test]
    async fn test_update_unsupported() {
        let mock = MockTransport::new().shared();
        let err = UserAdapter::new(Some(mock.clone()))
            .update(
                &RequestContext::new(),
                "alice",
                &UserUpdate {
                    default_account: Some("physics".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
        assert_eq!(mock.request_count(), 0);
    }
}
