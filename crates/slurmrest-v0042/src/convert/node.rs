//! Nodes.

use super::{nonzero, text, timestamp, timestamp_to_wire};
use crate::wire::{NodeInfo, UpdateNodeMsg};
use slurmrest_core::{ConversionError, Converter, require_name};
use slurmrest_parsers::{NoVal, clean_list, noval_or_zero, present, present_list};
use slurmrest_types::{Node, NodeState, NodeUpdate};

pub struct NodeConverter;

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
            features: clean_list(w.features.as_ref()),
            active_features: clean_list(w.active_features.as_ref()),
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
            features: present_list(&node.features),
            active_features: present_list(&node.active_features),
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
        features: update.features.clone(),
        features_act: update.active_features.clone(),
        weight: NoVal::from_option(update.weight),
        comment: update.comment.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> NodeInfo {
        serde_json::from_value(json!({
            "name": "cn01",
            "hostname": "cn01.cluster",
            "address": "10.0.0.1",
            "architecture": "x86_64",
            "state": ["IDLE", "DRAIN"],
            "reason": "bad dimm",
            "cpus": 64,
            "alloc_cpus": 0,
            "real_memory": 256000,
            "free_mem": {"set": true, "infinite": false, "number": 250000},
            "features": ["avx512", "ib"],
            "active_features": ["avx512"],
            "gres": "gpu:a100:4",
            "partitions": ["compute", "gpu"],
            "boot_time": {"set": true, "infinite": false, "number": 1690000000}
        }))
        .unwrap()
    }

    #[test]
    fn test_to_common() {
        let node = NodeConverter.to_common(&sample()).unwrap();
        assert_eq!(node.state, NodeState::Idle);
        assert!(node.is_drained());
        assert_eq!(node.free_memory, 250_000);
        assert_eq!(node.features, vec!["avx512", "ib"]);
        assert_eq!(node.gres, "gpu:a100:4");
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut wire = sample();
        wire.name = Some(String::new());
        assert!(NodeConverter.to_common(&wire).is_err());
    }

    #[test]
    fn test_round_trip() {
        let node = NodeConverter.to_common(&sample()).unwrap();
        let wire = NodeConverter.to_wire(&node);
        assert_eq!(wire.state, Some(vec!["IDLE".to_string(), "DRAIN".to_string()]));
        assert_eq!(wire.alloc_cpus, None);
        assert_eq!(NodeConverter.to_common(&wire).unwrap(), node);
    }

    #[test]
    fn test_node_update_body() {
        let body = serde_json::to_value(node_update(&NodeUpdate::drain("maintenance"))).unwrap();
        assert_eq!(body, json!({"state": ["DRAIN"], "reason": "maintenance"}));
    }
}
