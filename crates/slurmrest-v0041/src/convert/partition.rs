//! Partitions. Read-only on every version; only the read shape converts.

use super::{nonzero, text};
use crate::wire::{
    PartitionAccounts, PartitionCpus, PartitionDefaults, PartitionGroups, PartitionInfo,
    PartitionMaximums, PartitionMinimums, PartitionNodes, PartitionPriority, PartitionQos,
    PartitionStatus,
};
use slurmrest_core::{ConversionError, Converter, require_name};
use slurmrest_parsers::{NoVal, clean_list, join_csv, noval_or_zero, present, present_list, split_csv};
use slurmrest_types::{Partition, PartitionState};

pub struct PartitionConverter;

fn csv(value: Option<&String>) -> Vec<String> {
    value.map(|v| split_csv(v)).unwrap_or_default()
}

impl Converter for PartitionConverter {
    type Wire = PartitionInfo;
    type Domain = Partition;

    fn to_common(&self, w: &PartitionInfo) -> Result<Partition, ConversionError> {
        let name = require_name("partition", "name", w.name.as_ref())?;
        let state_flags = clean_list(w.partition.as_ref().and_then(|p| p.state.as_ref()));
        let nodes = w.nodes.clone().unwrap_or_default();
        let max = w.maximums.clone().unwrap_or_default();
        let defaults = w.defaults.clone().unwrap_or_default();
        let priority = w.priority.clone().unwrap_or_default();
        let qos = w.qos.clone().unwrap_or_default();
        let accounts = w.accounts.clone().unwrap_or_default();

        Ok(Partition {
            name,
            state: PartitionState::from_wire(&state_flags),
            state_flags,
            total_nodes: nodes.total.unwrap_or_default(),
            node_list: text(nodes.configured.as_ref()),
            total_cpus: w.cpus.as_ref().and_then(|c| c.total).unwrap_or_default(),
            max_nodes: noval_or_zero(max.nodes.as_ref()),
            min_nodes: w
                .minimums
                .as_ref()
                .and_then(|m| m.nodes)
                .unwrap_or_default(),
            max_cpus_per_node: noval_or_zero(max.cpus_per_node.as_ref()),
            max_memory_per_node: noval_or_zero(max.partition_memory_per_node.as_ref()),
            max_memory_per_cpu: noval_or_zero(max.partition_memory_per_cpu.as_ref()),
            default_memory_per_cpu: noval_or_zero(defaults.partition_memory_per_cpu.as_ref()),
            default_memory_per_node: noval_or_zero(defaults.partition_memory_per_node.as_ref()),
            default_time: noval_or_zero(defaults.time.as_ref()),
            max_time: noval_or_zero(max.time.as_ref()),
            priority_tier: priority.tier.unwrap_or_default(),
            priority_job_factor: priority.job_factor.unwrap_or_default(),
            qos: text(qos.assigned.as_ref()),
            allowed_qos: csv(qos.allowed.as_ref()),
            denied_qos: csv(qos.deny.as_ref()),
            allowed_accounts: csv(accounts.allowed.as_ref()),
            denied_accounts: csv(accounts.deny.as_ref()),
            allowed_groups: csv(w.groups.as_ref().and_then(|g| g.allowed.as_ref())),
        })
    }

    fn to_wire(&self, p: &Partition) -> PartitionInfo {
        PartitionInfo {
            name: present(&p.name),
            partition: Some(PartitionStatus {
                state: present_list(&p.state_flags),
            }),
            nodes: Some(PartitionNodes {
                configured: present(&p.node_list),
                total: nonzero(p.total_nodes),
            }),
            cpus: Some(PartitionCpus {
                total: nonzero(p.total_cpus),
            }),
            maximums: Some(PartitionMaximums {
                nodes: NoVal::present(p.max_nodes),
                cpus_per_node: NoVal::present(p.max_cpus_per_node),
                partition_memory_per_node: NoVal::present(p.max_memory_per_node),
                partition_memory_per_cpu: NoVal::present(p.max_memory_per_cpu),
                time: NoVal::present(p.max_time),
            }),
            minimums: Some(PartitionMinimums {
                nodes: nonzero(p.min_nodes),
            }),
            defaults: Some(PartitionDefaults {
                partition_memory_per_cpu: NoVal::present(p.default_memory_per_cpu),
                partition_memory_per_node: NoVal::present(p.default_memory_per_node),
                time: NoVal::present(p.default_time),
            }),
            priority: Some(PartitionPriority {
                tier: nonzero(p.priority_tier),
                job_factor: nonzero(p.priority_job_factor),
            }),
            qos: Some(PartitionQos {
                allowed: join_csv(&p.allowed_qos),
                deny: join_csv(&p.denied_qos),
                assigned: present(&p.qos),
            }),
            accounts: Some(PartitionAccounts {
                allowed: join_csv(&p.allowed_accounts),
                deny: join_csv(&p.denied_accounts),
            }),
            groups: Some(PartitionGroups {
                allowed: join_csv(&p.allowed_groups),
            }),
        }
    }
}
