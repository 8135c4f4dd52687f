//! Accounts against `/slurmdb/v0.0.43/account*`.

use super::base;
use crate::convert::{AccountConverter, account_create, account_update};
use crate::wire::AccountRec;
use async_trait::async_trait;
use serde_json::json;
use slurmrest_core::{
    AccountManager, AdapterBase, ApiRequest, Capability, Converter, RequestContext, Resource,
    Result, Transport, WriteOp,
};
use slurmrest_types::{
    Account, AccountCreate, AccountListOptions, AccountUpdate, CreateResponse, ListFilter,
    ListResult,
};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AccountAdapter {
    base: AdapterBase,
}

impl AccountAdapter {
    pub fn new(transport: Option<Arc<dyn Transport>>) -> Self {
        Self {
            base: base("account", transport),
        }
    }

    fn check_name(&self, operation: &str, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(self.base.invalid(operation, "name", "account name is required"));
        }
        self.base.check_segment(operation, "name", name)
    }

    fn account_path(&self, name: &str) -> String {
        self.base.slurmdb_entity_path("account", name)
    }

    async fn post_accounts(
        &self,
        ctx: &RequestContext,
        operation: &str,
        record: &AccountRec,
    ) -> Result<Vec<String>> {
        let record = self.base.encode(operation, record)?;
        self.base
            .execute(
                ctx,
                operation,
                ApiRequest::post(
                    self.base.slurmdb_path("accounts"),
                    json!({ "accounts": [record] }),
                ),
            )
            .await
    }
}

#[async_trait]
impl AccountManager for AccountAdapter {
    async fn list(
        &self,
        ctx: &RequestContext,
        opts: &AccountListOptions,
    ) -> Result<ListResult<Account>> {
        let op = "ListAccounts";
        self.base
            .begin(ctx, op, Some(Capability::Resource(Resource::Accounts)))?;
        let mut request = ApiRequest::get(self.base.slurmdb_path("accounts"));
        if opts.with_deleted {
            request = request.with_query("DELETED", "true");
        }
        if opts.with_associations {
            request = request.with_query("WithAssociations", "true");
        }
        let accounts = self
            .base
            .fetch_records(ctx, op, request, "accounts", |w: &AccountRec| {
                AccountConverter.to_common(w)
            })
            .await?;
        Ok(opts.apply(accounts))
    }

    async fn get(&self, ctx: &RequestContext, name: &str) -> Result<Account> {
        let op = "GetAccount";
        self.base
            .begin(ctx, op, Some(Capability::Resource(Resource::Accounts)))?;
        self.check_name(op, name)?;
        self.base
            .fetch_record(
                ctx,
                op,
                ApiRequest::get(self.account_path(name)),
                "accounts",
                name,
                |w: &AccountRec| AccountConverter.to_common(w),
            )
            .await
    }

    async fn create(
        &self,
        ctx: &RequestContext,
        account: &AccountCreate,
    ) -> Result<CreateResponse> {
        let op = "CreateAccount";
        self.base.begin(
            ctx,
            op,
            Some(Capability::Write(Resource::Accounts, WriteOp::Create)),
        )?;
        self.check_name(op, &account.name)?;
        let warnings = self
            .post_accounts(ctx, op, &account_create(account))
            .await?;
        Ok(CreateResponse {
            id: account.name.clone(),
            warnings,
        })
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        name: &str,
        update: &AccountUpdate,
    ) -> Result<()> {
        let op = "UpdateAccount";
        self.base.begin(
            ctx,
            op,
            Some(Capability::Write(Resource::Accounts, WriteOp::Update)),
        )?;
        self.check_name(op, name)?;
        if *update == AccountUpdate::default() {
            return Err(self.base.invalid(op, "update", "no fields to update"));
        }
        self.post_accounts(ctx, op, &account_update(name, update))
            .await?;
        Ok(())
    }

    async fn delete(&self, ctx: &RequestContext, name: &str) -> Result<()> {
        let op = "DeleteAccount";
        self.base.begin(
            ctx,
            op,
            Some(Capability::Write(Resource::Accounts, WriteOp::Delete)),
        )?;
        self.check_name(op, name)?;
        self.base
            .execute(ctx, op, ApiRequest::delete(self.account_path(name)))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slurmrest_core::mock::MockTransport;
    use slurmrest_core::{ErrorKind, Method};

    const ACCOUNTS: &str = "/slurmdb/v0.0.43/accounts";

    #[tokio::test]
    async fn test_list_filters_by_name_client_side() {
        let mock = MockTransport::new()
            .on(
                Method::Get,
                ACCOUNTS,
                200,
                json!({"accounts": [
                    {"name": "acct1", "organization": "lab"},
                    {"name": "acct2", "organization": "lab"},
                    {"organization": "orphan"}
                ]}),
            )
            .shared();
        let opts = AccountListOptions {
            names: vec!["acct1".to_string()],
            ..Default::default()
        };
        let result = AccountAdapter::new(Some(mock.clone()))
            .list(&RequestContext::new(), &opts)
            .await
            .unwrap();
        assert_eq!(result.total, 1);
        assert_eq!(result.items[0].name, "acct1");
        assert!(mock.last_request().unwrap().query_value("name").is_none());
    }

    #[tokio::test]
    async fn test_list_with_associations_query() {
        let mock = MockTransport::new()
            .on(Method::Get, ACCOUNTS, 200, json!({"accounts": []}))
            .shared();
        let opts = AccountListOptions {
            with_associations: true,
            ..Default::default()
        };
        AccountAdapter::new(Some(mock.clone()))
            .list(&RequestContext::new(), &opts)
            .await
            .unwrap();
        assert_eq!(
            mock.last_request().unwrap().query_value("WithAssociations"),
            Some("true")
        );
    }

    #[tokio::test]
    async fn test_create_wraps_record() {
        let mock = MockTransport::new()
            .on(
                Method::Post,
                ACCOUNTS,
                200,
                json!({"warnings": [{"description": "account already has parent"}]}),
            )
            .shared();
        let created = AccountAdapter::new(Some(mock.clone()))
            .create(
                &RequestContext::new(),
                &AccountCreate {
                    name: "physics".to_string(),
                    description: Some("Physics dept".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(created.id, "physics");
        assert_eq!(created.warnings, vec!["account already has parent"]);
        let body = mock.last_request().unwrap().body.unwrap();
        assert_eq!(body["accounts"][0]["name"], "physics");
        assert_eq!(body["accounts"][0]["description"], "Physics dept");
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let mock = MockTransport::new().shared();
        let err = AccountAdapter::new(Some(mock.clone()))
            .create(&RequestContext::new(), &AccountCreate::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_delete() {
        let mock = MockTransport::new()
            .on(Method::Delete, "/slurmdb/v0.0.43/account/physics", 200, json!({}))
            .shared();
        AccountAdapter::new(Some(mock.clone()))
            .delete(&RequestContext::new(), "physics")
            .await
            .unwrap();
        assert_eq!(mock.request_count(), 1);
    }
}
