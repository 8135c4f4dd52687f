//! Reservations against `/slurm/v0.0.43/reservation*`.

use super::base;
use crate::convert::{ReservationConverter, reservation_create, reservation_update};
use crate::wire::{ReservationDescMsg, ReservationInfo};
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

    async fn post_desc(
        &self,
        ctx: &RequestContext,
        operation: &str,
        desc: &ReservationDescMsg,
    ) -> Result<Vec<String>> {
        let body = self.base.encode(operation, desc)?;
        self.base
            .execute(
                ctx,
                operation,
                ApiRequest::post(self.base.slurm_path("reservation"), body),
            )
            .await
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
        reservation: &ReservationCreate,
    ) -> Result<CreateResponse> {
        let op = "CreateReservation";
        self.base.begin(
            ctx,
            op,
            Some(Capability::Write(Resource::Reservations, WriteOp::Create)),
        )?;
        self.check_name(op, &reservation.name)?;
        if reservation.partition.is_none()
            && reservation.node_list.is_none()
            && reservation.node_count.is_none()
        {
            return Err(self.base.invalid(
                op,
                "node_list",
                "a partition, node list or node count is required",
            ));
        }
        let warnings = self
            .post_desc(ctx, op, &reservation_create(reservation))
            .await?;
        Ok(CreateResponse {
            id: reservation.name.clone(),
            warnings,
        })
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        name: &str,
        update: &ReservationUpdate,
    ) -> Result<()> {
        let op = "UpdateReservation";
        self.base.begin(
            ctx,
            op,
            Some(Capability::Write(Resource::Reservations, WriteOp::Update)),
        )?;
        self.check_name(op, name)?;
        if *update == ReservationUpdate::default() {
            return Err(self.base.invalid(op, "update", "no fields to update"));
        }
        self.post_desc(ctx, op, &reservation_update(name, update))
            .await?;
        Ok(())
    }

    async fn delete(&self, ctx: &RequestContext, name: &str) -> Result<()> {
        let op = "DeleteReservation";
        self.base.begin(
            ctx,
            op,
            Some(Capability::Write(Resource::Reservations, WriteOp::Delete)),
        )?;
        self.check_name(op, name)?;
        self.base
            .execute(ctx, op, ApiRequest::delete(self.reservation_path(name)))
            .await?;
        Ok(())
    }
}
