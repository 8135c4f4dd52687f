//! Ping, diagnostics, licenses, shares and TRES. The database ping,
//! instances, TRES creation and reconfigure arrived in later APIs.

use super::base;
use crate::convert::{
    LicenseConverter, PingConverter, ShareConverter, TresConverter, db_diagnostics, diagnostics,
};
use crate::wire::{
    ControllerPingWire, DbDiagResp, DiagResp, LicenseWire, SharesResp, ShareWire, TresWire,
};
use async_trait::async_trait;
use slurmrest_core::{
    AdapterBase, ApiRequest, Capability, Converter, Feature, RequestContext, Result,
    StandaloneManager, Transport, convert_records,
};
use slurmrest_parsers::join_csv;
use slurmrest_types::{
    DbDiagnostics, Diagnostics, Instance, InstanceListOptions, License, ListFilter, ListResult,
    PingReport, ReconfigureResponse, ShareListOptions, ShareRecord, Tres,
};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct StandaloneAdapter {
    base: AdapterBase,
}

impl StandaloneAdapter {
    pub fn new(transport: Option<Arc<dyn Transport>>) -> Self {
        Self {
            base: base("standalone", transport),
        }
    }

    async fn pings(
        &self,
        ctx: &RequestContext,
        operation: &str,
        path: String,
    ) -> Result<PingReport> {
        let controllers = self
            .base
            .fetch_records(
                ctx,
                operation,
                ApiRequest::get(path),
                "pings",
                |w: &ControllerPingWire| PingConverter.to_common(w),
            )
            .await?;
        Ok(PingReport { controllers })
    }
}

#[async_trait]
impl StandaloneManager for StandaloneAdapter {
    async fn ping(&self, ctx: &RequestContext) -> Result<PingReport> {
        let op = "Ping";
        self.base.begin(ctx, op, None)?;
        self.pings(ctx, op, self.base.slurm_path("ping")).await
    }

    async fn ping_database(&self, ctx: &RequestContext) -> Result<PingReport> {
        self.base
            .refuse(ctx, "PingDatabase", Capability::Feature(Feature::PingDatabase))
    }

    async fn diagnostics(&self, ctx: &RequestContext) -> Result<Diagnostics> {
        let op = "Diagnostics";
        self.base
            .begin(ctx, op, Some(Capability::Feature(Feature::Diagnostics)))?;
        let resp: DiagResp = self
            .base
            .fetch(ctx, op, ApiRequest::get(self.base.slurm_path("diag")))
            .await?;
        Ok(diagnostics(&resp.statistics))
    }

    async fn db_diagnostics(&self, ctx: &RequestContext) -> Result<DbDiagnostics> {
        let op = "DbDiagnostics";
        self.base
            .begin(ctx, op, Some(Capability::Feature(Feature::DbDiagnostics)))?;
        let resp: DbDiagResp = self
            .base
            .fetch(ctx, op, ApiRequest::get(self.base.slurmdb_path("diag")))
            .await?;
        Ok(db_diagnostics(&resp.statistics))
    }

    async fn licenses(&self, ctx: &RequestContext) -> Result<Vec<License>> {
        let op = "Licenses";
        self.base
            .begin(ctx, op, Some(Capability::Feature(Feature::Licenses)))?;
        self.base
            .fetch_records(
                ctx,
                op,
                ApiRequest::get(self.base.slurm_path("licenses")),
                "licenses",
                |w: &LicenseWire| LicenseConverter.to_common(w),
            )
            .await
    }

    async fn shares(
        &self,
        ctx: &RequestContext,
        opts: &ShareListOptions,
    ) -> Result<ListResult<ShareRecord>> {
        let op = "Shares";
        self.base
            .begin(ctx, op, Some(Capability::Feature(Feature::Shares)))?;
        let request = ApiRequest::get(self.base.slurm_path("shares"))
            .with_optional_query("accounts", join_csv(&opts.accounts))
            .with_optional_query("users", join_csv(&opts.users));
        let resp: SharesResp = self.base.fetch(ctx, op, request).await?;
        let shares = convert_records(
            resp.shares.shares,
            "share",
            self.base.version(),
            |w: &ShareWire| ShareConverter.to_common(w),
        );
        Ok(opts.apply(shares))
    }

    async fn tres(&self, ctx: &RequestContext) -> Result<Vec<Tres>> {
        let op = "Tres";
        self.base
            .begin(ctx, op, Some(Capability::Feature(Feature::Tres)))?;
        self.base
            .fetch_records(
                ctx,
                op,
                ApiRequest::get(self.base.slurmdb_path("tres")),
                "TRES",
                |w: &TresWire| TresConverter.to_common(w),
            )
            .await
    }

    async fn create_tres(&self, ctx: &RequestContext, _tres: &[Tres]) -> Result<()> {
        self.base
            .refuse(ctx, "CreateTres", Capability::Feature(Feature::TresCreate))
    }

    async fn instances(
        &self,
        ctx: &RequestContext,
        _opts: &InstanceListOptions,
    ) -> Result<ListResult<Instance>> {
        self.base
            .refuse(ctx, "Instances", Capability::Feature(Feature::Instances))
    }

    async fn reconfigure(&self, ctx: &RequestContext) -> Result<ReconfigureResponse> {
        self.base
            .refuse(ctx, "Reconfigure", Capability::Feature(Feature::Reconfigure))
    }
}
