//! Clusters.

use super::account::{association_ref, association_ref_to_wire};
use super::standalone::TresConverter;
use super::{nonzero, text};
use crate::wire::{ClusterAssociations, ClusterController, ClusterRec};
use slurmrest_core::{ConversionError, Converter, require_name};
use slurmrest_parsers::{clean_list, present, present_list};
use slurmrest_types::{Cluster, ClusterCreate};

pub struct ClusterConverter;

impl Converter for ClusterConverter {
    type Wire = ClusterRec;
    type Domain = Cluster;

    fn to_common(&self, w: &ClusterRec) -> Result<Cluster, ConversionError> {
        let controller = w.controller.clone().unwrap_or_default();
        Ok(Cluster {
            name: require_name("cluster", "name", w.name.as_ref())?,
            controller_host: text(controller.host.as_ref()),
            controller_port: controller.port.unwrap_or_default(),
            nodes: text(w.nodes.as_ref()),
            rpc_version: w.rpc_version.unwrap_or_default(),
            select_plugin: text(w.select_plugin.as_ref()),
            tres: w
                .tres
                .as_ref()
                .map(|l| l.iter().filter_map(|t| TresConverter.to_common(t).ok()).collect())
                .unwrap_or_default(),
            root_association: w
                .associations
                .as_ref()
                .and_then(|a| a.root.as_ref())
                .map(association_ref),
            flags: clean_list(w.flags.as_ref()),
        })
    }

    fn to_wire(&self, c: &Cluster) -> ClusterRec {
        let controller = ClusterController {
            host: present(&c.controller_host),
            port: nonzero(c.controller_port),
        };
        ClusterRec {
            name: present(&c.name),
            controller: Some(controller),
            nodes: present(&c.nodes),
            rpc_version: nonzero(c.rpc_version),
            select_plugin: present(&c.select_plugin),
            tres: if c.tres.is_empty() {
                None
            } else {
                Some(c.tres.iter().map(|t| TresConverter.to_wire(t)).collect())
            },
            associations: c.root_association.as_ref().map(|root| ClusterAssociations {
                root: Some(association_ref_to_wire(root)),
            }),
            flags: present_list(&c.flags),
        }
    }
}

pub fn cluster_create(c: &ClusterCreate) -> ClusterRec {
    ClusterRec {
        name: Some(c.name.clone()),
        controller: if c.controller_host.is_none() && c.controller_port.is_none() {
            None
        } else {
            Some(ClusterController {
                host: c.controller_host.clone(),
                port: c.controller_port,
            })
        },
        rpc_version: c.rpc_version,
        select_plugin: c.select_plugin.clone(),
        flags: c.flags.clone(),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ClusterRec {
        serde_json::from_value(json!({
            "name": "alpha",
            "controller": {"host": "ctl1", "port": 6817},
            "nodes": "cn[001-128]",
            "rpc_version": 10752,
            "select_plugin": "select/cons_tres",
            "tres": [{"type": "cpu", "id": 1, "count": 8192}, {"type": "mem", "id": 2, "count": 1048576}],
            "associations": {"root": {"account": "root", "cluster": "alpha", "id": 1}},
            "flags": ["REGISTERED"]
        }))
        .unwrap()
    }

    #[test]
    fn test_to_common() {
        let c = ClusterConverter.to_common(&sample()).unwrap();
        assert_eq!(c.controller_host, "ctl1");
        assert_eq!(c.controller_port, 6817);
        assert_eq!(c.tres.len(), 2);
        assert_eq!(c.root_association.as_ref().map(|r| r.id), Some(1));
    }

    #[test]
    fn test_round_trip() {
        let c = ClusterConverter.to_common(&sample()).unwrap();
        let wire = ClusterConverter.to_wire(&c);
        assert_eq!(wire.tres.as_ref().map(|t| t[0].kind.as_str()), Some("cpu"));
        assert_eq!(ClusterConverter.to_common(&wire).unwrap(), c);
    }
}
