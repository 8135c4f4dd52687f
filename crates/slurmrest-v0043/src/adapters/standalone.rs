//! Ping, diagnostics, licenses, shares, TRES, instances and reconfigure.

use super::base;
use crate::convert::{
    InstanceConverter, LicenseConverter, PingConverter, ShareConverter, TresConverter,
    db_diagnostics, diagnostics,
};
use crate::wire::{
    ControllerPingWire, DbDiagResp, DiagResp, InstanceWire, LicenseWire, SharesResp, ShareWire,
    TresWire,
};
use async_trait::async_trait;
use serde_json::json;
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
        let op = "PingDatabase";
        self.base
            .begin(ctx, op, Some(Capability::Feature(Feature::PingDatabase)))?;
        self.pings(ctx, op, self.base.slurmdb_path("ping")).await
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

    async fn create_tres(&self, ctx: &RequestContext, tres: &[Tres]) -> Result<()> {
        let op = "CreateTres";
        self.base
            .begin(ctx, op, Some(Capability::Feature(Feature::TresCreate)))?;
        if tres.is_empty() {
            return Err(self.base.invalid(op, "tres", "at least one TRES is required"));
        }
        if tres.iter().any(|t| t.kind.trim().is_empty()) {
            return Err(self.base.invalid(op, "tres.type", "TRES type is required"));
        }
        let records: Vec<TresWire> = tres.iter().map(|t| TresConverter.to_wire(t)).collect();
        let records = self.base.encode(op, &records)?;
        self.base
            .execute(
                ctx,
                op,
                ApiRequest::post(self.base.slurmdb_path("tres"), json!({ "TRES": records })),
            )
            .await?;
        Ok(())
    }

    async fn instances(
        &self,
        ctx: &RequestContext,
        opts: &InstanceListOptions,
    ) -> Result<ListResult<Instance>> {
        let op = "Instances";
        self.base
            .begin(ctx, op, Some(Capability::Feature(Feature::Instances)))?;
        let request = ApiRequest::get(self.base.slurmdb_path("instances"))
            .with_optional_query("cluster", join_csv(&opts.clusters))
            .with_optional_query("node_list", join_csv(&opts.node_names))
            .with_optional_query("instance_type", join_csv(&opts.instance_types));
        let instances = self
            .base
            .fetch_records(ctx, op, request, "instances", |w: &InstanceWire| {
                InstanceConverter.to_common(w)
            })
            .await?;
        Ok(opts.apply(instances))
    }

    async fn reconfigure(&self, ctx: &RequestContext) -> Result<ReconfigureResponse> {
        let op = "Reconfigure";
        self.base
            .begin(ctx, op, Some(Capability::Feature(Feature::Reconfigure)))?;
        let warnings = self
            .base
            .execute(ctx, op, ApiRequest::get(self.base.slurm_path("reconfigure")))
            .await?;
        Ok(ReconfigureResponse { warnings })
    }
}
