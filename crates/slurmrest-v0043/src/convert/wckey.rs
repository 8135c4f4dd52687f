//! WCKeys.

use super::{nonzero, text};
use crate::wire::WcKeyRec;
use slurmrest_core::{ConversionError, Converter, require_name};
use slurmrest_parsers::{clean_list, present, present_list};
use slurmrest_types::{WcKey, WcKeyCreate};

pub struct WcKeyConverter;

impl Converter for WcKeyConverter {
    type Wire = WcKeyRec;
    type Domain = WcKey;

    fn to_common(&self, w: &WcKeyRec) -> Result<WcKey, ConversionError> {
        Ok(WcKey {
            id: w.id.unwrap_or_default(),
            name: require_name("wckey", "name", w.name.as_ref())?,
            user: text(w.user.as_ref()),
            cluster: text(w.cluster.as_ref()),
            flags: clean_list(w.flags.as_ref()),
        })
    }

    fn to_wire(&self, k: &WcKey) -> WcKeyRec {
        WcKeyRec {
            id: nonzero(k.id),
            name: present(&k.name),
            user: present(&k.user),
            cluster: present(&k.cluster),
            flags: present_list(&k.flags),
        }
    }
}

pub fn wckey_create(k: &WcKeyCreate) -> WcKeyRec {
    WcKeyRec {
        name: Some(k.name.clone()),
        user: Some(k.user.clone()),
        cluster: Some(k.cluster.clone()),
        ..Default::default()
    }
}
