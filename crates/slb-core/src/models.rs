use crate::nullable::Nullable;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

// Models that travel back in an edit keep unknown fields in `extra` and use
// `Nullable` for modeled ones, so a fetched snapshot is submitted back with
// the same keys and the same nulls it arrived with.

/// Local load balancer (a virtual IP address on the application delivery controller)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadBalancer {
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub id: Nullable<i64>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub name: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub connection_limit: Nullable<i64>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub ip_address_id: Nullable<i64>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub ip_address: Nullable<IpAddress>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub load_balancer_hardware: Nullable<Vec<Hardware>>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub virtual_servers: Nullable<Vec<VirtualServer>>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl LoadBalancer {
    pub fn virtual_servers(&self) -> &[VirtualServer] {
        self.virtual_servers.get().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn virtual_servers_mut(&mut self) -> &mut Vec<VirtualServer> {
        self.virtual_servers.get_or_insert_with(Vec::new)
    }

    /// Virtual server with the given id, if the fetched tree contains one.
    pub fn virtual_server_mut(&mut self, id: i64) -> Option<&mut VirtualServer> {
        self.virtual_servers
            .get_mut()?
            .iter_mut()
            .find(|vs| vs.id.copied() == Some(id))
    }

    /// Datacenter of the first hardware entry backing this load balancer
    pub fn datacenter(&self) -> Option<&Datacenter> {
        self.load_balancer_hardware
            .get()?
            .iter()
            .find_map(|hw| hw.datacenter.get())
    }
}

/// Load balancer listener: a port plus the share of connections it receives
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualServer {
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub id: Nullable<i64>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub port: Nullable<i64>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub allocation: Nullable<i64>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub service_groups: Nullable<Vec<ServiceGroup>>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl VirtualServer {
    /// New listener carrying a single service group with the given routing policy.
    pub fn template(port: i64, allocation: i64, routing_type: i64, routing_method: i64) -> Self {
        Self {
            port: port.into(),
            allocation: allocation.into(),
            service_groups: vec![ServiceGroup {
                routing_type_id: routing_type.into(),
                routing_method_id: routing_method.into(),
                ..Default::default()
            }]
            .into(),
            ..Default::default()
        }
    }

    pub fn service_groups(&self) -> &[ServiceGroup] {
        self.service_groups.get().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn first_service_group(&self) -> Option<&ServiceGroup> {
        self.service_groups.get()?.first()
    }

    pub fn first_service_group_mut(&mut self) -> Option<&mut ServiceGroup> {
        self.service_groups.get_mut()?.first_mut()
    }
}

/// Routing policy grouping backend services
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceGroup {
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub id: Nullable<i64>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub routing_method_id: Nullable<i64>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub routing_type_id: Nullable<i64>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub services: Nullable<Vec<Service>>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl ServiceGroup {
    pub fn services(&self) -> &[Service] {
        self.services.get().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn services_mut(&mut self) -> &mut Vec<Service> {
        self.services.get_or_insert_with(Vec::new)
    }

    pub fn service_mut(&mut self, id: i64) -> Option<&mut Service> {
        self.services
            .get_mut()?
            .iter_mut()
            .find(|service| service.id.copied() == Some(id))
    }
}

/// One backend endpoint inside a service group
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub id: Nullable<i64>,
    /// 1 when enabled, 0 when disabled
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub enabled: Nullable<i64>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub port: Nullable<i64>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub ip_address_id: Nullable<i64>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub health_checks: Nullable<Vec<HealthCheck>>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub group_references: Nullable<Vec<GroupReference>>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl Service {
    /// New service with a single health check and a single weighted group reference.
    pub fn template(
        ip_address_id: i64,
        port: i64,
        enabled: i64,
        health_check_type: i64,
        weight: i64,
    ) -> Self {
        Self {
            enabled: enabled.into(),
            port: port.into(),
            ip_address_id: ip_address_id.into(),
            health_checks: vec![HealthCheck {
                health_check_type_id: health_check_type.into(),
                ..Default::default()
            }]
            .into(),
            group_references: vec![GroupReference {
                weight: weight.into(),
                ..Default::default()
            }]
            .into(),
            ..Default::default()
        }
    }

    pub fn first_health_check_mut(&mut self) -> Option<&mut HealthCheck> {
        self.health_checks.get_mut()?.first_mut()
    }

    pub fn first_group_reference_mut(&mut self) -> Option<&mut GroupReference> {
        self.group_references.get_mut()?.first_mut()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheck {
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub id: Nullable<i64>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub health_check_type_id: Nullable<i64>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Link between a service and its group, carrying the service weight
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupReference {
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub weight: Nullable<i64>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hardware {
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub id: Nullable<i64>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub hostname: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub datacenter: Nullable<Datacenter>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Datacenter {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub name: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub long_name: Nullable<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl Datacenter {
    pub fn name(&self) -> Option<&str> {
        self.name.get().map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IpAddress {
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub id: Nullable<i64>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub ip_address: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub subnet_id: Nullable<i64>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingItem {
    pub id: i64,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Catalog item from a product package
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prices: Option<Vec<Value>>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl PackageItem {
    /// Global load balancers are ordered elsewhere; only local ones are
    /// offered by this package listing.
    pub fn is_global(&self) -> bool {
        self.description
            .as_deref()
            .is_some_and(|description| description.contains("Global"))
    }
}

/// Entry from a static lookup table (health check types, routing methods, routing types)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyname: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}
