//! Nodes. Feature lists travel as comma-joined strings in this API.

use super::{nonzero, text, timestamp, timestamp_to_wire};
use crate::wire::{NodeInfo, UpdateNodeMsg};
use slurmrest_core::{ConversionError, Converter, require_name};
use slurmrest_parsers::{
    NoVal, clean_list, join_csv, noval_or_zero, present, present_list, split_csv,
};
use slurmrest_types::{Node, NodeState, NodeUpdate};

pub struct NodeConverter;

fn csv(value: Option<&String>) -> Vec<String> {
    value.map(|v| split_csv(v)).unwrap_or_default()
}

impl Converter for NodeConverter {
    type Wire = NodeInfo;
    type Domain = Node;

    fn to_common(&self, w: &NodeInfo) -> Result<Node, ConversionError> {
        let name = require_name("node", "name", w.name.as_ref())?;
        let state_flags = clean_list(w.state.as_ref());

        Ok(Node {
            name,
            hostname: text(w.hostname.as_ref()),
            address: text(w.address.as_ref()),
            architecture: text(w.architecture.as_ref()),
            operating_system: text(w.operating_system.as_ref()),
            state: NodeState::from_wire(&state_flags),
            state_flags,
            reason: text(w.reason.as_ref()),
            cpus: w.cpus.unwrap_or_default(),
            alloc_cpus: w.alloc_cpus.unwrap_or_default(),
            real_memory: w.real_memory.unwrap_or_default(),
            alloc_memory: w.alloc_memory.unwrap_or_default(),
            free_memory: noval_or_zero(w.free_mem.as_ref()),
            weight: w.weight.unwrap_or_default(),
            features: csv(w.features.as_ref()),
            active_features: csv(w.active_features.as_ref()),
            gres: text(w.gres.as_ref()),
            gres_used: text(w.gres_used.as_ref()),
            partitions: clean_list(w.partitions.as_ref()),
            comment: text(w.comment.as_ref()),
            boot_time: timestamp(w.boot_time.as_ref()),
            last_busy: timestamp(w.last_busy.as_ref()),
        })
    }

    fn to_wire(&self, node: &Node) -> NodeInfo {
        NodeInfo {
            name: present(&node.name),
            hostname: present(&node.hostname),
            address: present(&node.address),
            architecture: present(&node.architecture),
            operating_system: present(&node.operating_system),
            state: present_list(&node.state_flags),
            reason: present(&node.reason),
            cpus: nonzero(node.cpus),
            alloc_cpus: nonzero(node.alloc_cpus),
            real_memory: nonzero(node.real_memory),
            alloc_memory: nonzero(node.alloc_memory),
            free_mem: NoVal::present(node.free_memory),
            weight: nonzero(node.weight),
            features: join_csv(&node.features),
            active_features: join_csv(&node.active_features),
            gres: present(&node.gres),
            gres_used: present(&node.gres_used),
            partitions: present_list(&node.partitions),
            comment: present(&node.comment),
            boot_time: timestamp_to_wire(node.boot_time),
            last_busy: timestamp_to_wire(node.last_busy),
        }
    }
}

pub fn node_update(update: &NodeUpdate) -> UpdateNodeMsg {
    UpdateNodeMsg {
        state: update.state.clone(),
        reason: update.reason.clone(),
        features: update.features.as_deref().and_then(join_csv),
        features_act: update.active_features.as_deref().and_then(join_csv),
        weight: NoVal::from_option(update.weight),
        comment: update.comment.clone(),
    }
}
