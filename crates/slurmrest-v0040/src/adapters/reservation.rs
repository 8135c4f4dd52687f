//! Reservations against `/slurm/v0.0.40/reservation*`. Read-only; writes are not exposed by this API.

use super::base;
use crate::convert::ReservationConverter;
use crate::wire::ReservationInfo;
use async_trait::async_trait;
use slurmrest_core::{
    AdapterBase, ApiRequest, Capability, Converter, RequestContext, ReservationManager, Resource,
    Result, Transport, WriteOp,
};
use slurmrest_types::{
    CreateResponse, ListFilter, ListResult, Reservation, ReservationCreate,
    ReservationListOptions, ReservationUpdate,
};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ReservationAdapter {
    base: AdapterBase,
}

impl ReservationAdapter {
    pub fn new(transport: Option<Arc<dyn Transport>>) -> Self {
        Self {
            base: base("reservation", transport),
        }
    }

    fn check_name(&self, operation: &str, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(self
                .base
                .invalid(operation, "name", "reservation name is required"));
        }
        self.base.check_segment(operation, "name", name)
    }

    fn reservation_path(&self, name: &str) -> String {
        self.base.slurm_entity_path("reservation", name)
    }

    fn refuse_write<T>(&self, ctx: &RequestContext, operation: &str, op: WriteOp) -> Result<T> {
        self.base
            .refuse(ctx, operation, Capability::Write(Resource::Reservations, op))
    }
}

#[async_trait]
impl ReservationManager for ReservationAdapter {
    async fn list(
        &self,
        ctx: &RequestContext,
        opts: &ReservationListOptions,
    ) -> Result<ListResult<Reservation>> {
        let op = "ListReservations";
        self.base
            .begin(ctx, op, Some(Capability::Resource(Resource::Reservations)))?;
        let reservations = self
            .base
            .fetch_records(
                ctx,
                op,
                ApiRequest::get(self.base.slurm_path("reservations")),
                "reservations",
                |w: &ReservationInfo| ReservationConverter.to_common(w),
            )
            .await?;
        Ok(opts.apply(reservations))
    }

    async fn get(&self, ctx: &RequestContext, name: &str) -> Result<Reservation> {
        let op = "GetReservation";
        self.base
            .begin(ctx, op, Some(Capability::Resource(Resource::Reservations)))?;
        self.check_name(op, name)?;
        self.base
            .fetch_record(
                ctx,
                op,
                ApiRequest::get(self.reservation_path(name)),
                "reservations",
                name,
                |w: &ReservationInfo| ReservationConverter.to_common(w),
            )
            .await
    }

    async fn create(
        &self,
        ctx: &RequestContext,
        _reservation: &ReservationCreate,
    ) -> Result<CreateResponse> {
        self.refuse_write(ctx, "CreateReservation", WriteOp::Create)
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        _name: &str,
        _update: &ReservationUpdate,
    ) -> Result<()> {
        self.refuse_write(ctx, "UpdateReservation", WriteOp::Update)
    }

    async fn delete(&self, ctx: &RequestContext, _name: &str) -> Result<()> {
        self.refuse_write(ctx, "DeleteReservation", WriteOp::Delete)
    }
}
