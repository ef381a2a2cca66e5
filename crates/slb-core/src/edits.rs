//! Caller-supplied changes to services and service groups.
//!
//! Every field is optional: `None` leaves the fetched value untouched.

use crate::models::{Service, VirtualServer};

pub const DEFAULT_SERVICE_PORT: i64 = 80;
pub const DEFAULT_HEALTH_CHECK_TYPE: i64 = 21;
pub const DEFAULT_WEIGHT: i64 = 1;
pub const DEFAULT_ALLOCATION: i64 = 100;
pub const DEFAULT_ROUTING_TYPE: i64 = 2;
pub const DEFAULT_ROUTING_METHOD: i64 = 10;

/// Changes to an existing service
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceEdit {
    pub ip_address_id: Option<i64>,
    pub port: Option<i64>,
    pub enabled: Option<bool>,
    pub health_check_type: Option<i64>,
    pub weight: Option<i64>,
}

impl ServiceEdit {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the set fields to `service`.
    ///
    /// Weight and health check type live on the first group reference and the
    /// first health check; a service fetched without those relations keeps
    /// them unset. Returns the names of the fields that could not be applied.
    pub fn apply(&self, service: &mut Service) -> Vec<&'static str> {
        let mut skipped = Vec::new();

        if let Some(enabled) = self.enabled {
            service.enabled.set(i64::from(enabled));
        }
        if let Some(port) = self.port {
            service.port.set(port);
        }
        if let Some(weight) = self.weight {
            match service.first_group_reference_mut() {
                Some(reference) => reference.weight.set(weight),
                None => skipped.push("weight"),
            }
        }
        if let Some(hc_type) = self.health_check_type {
            match service.first_health_check_mut() {
                Some(check) => check.health_check_type_id.set(hc_type),
                None => skipped.push("health_check_type"),
            }
        }
        if let Some(ip_address_id) = self.ip_address_id {
            service.ip_address_id.set(ip_address_id);
        }

        skipped
    }
}

/// A service to append to a service group
#[derive(Debug, Clone, PartialEq)]
pub struct NewService {
    pub ip_address_id: i64,
    pub port: i64,
    pub enabled: bool,
    pub health_check_type: i64,
    pub weight: i64,
}

impl NewService {
    /// Enabled service on port 80 with the default health check and weight 1
    pub fn new(ip_address_id: i64) -> Self {
        Self {
            ip_address_id,
            port: DEFAULT_SERVICE_PORT,
            enabled: true,
            health_check_type: DEFAULT_HEALTH_CHECK_TYPE,
            weight: DEFAULT_WEIGHT,
        }
    }

    pub fn to_service(&self) -> Service {
        Service::template(
            self.ip_address_id,
            self.port,
            i64::from(self.enabled),
            self.health_check_type,
            self.weight,
        )
    }
}

/// A virtual server with one service group, to append to a load balancer
#[derive(Debug, Clone, PartialEq)]
pub struct NewServiceGroup {
    pub allocation: i64,
    pub port: i64,
    pub routing_type: i64,
    pub routing_method: i64,
}

impl Default for NewServiceGroup {
    fn default() -> Self {
        Self {
            allocation: DEFAULT_ALLOCATION,
            port: DEFAULT_SERVICE_PORT,
            routing_type: DEFAULT_ROUTING_TYPE,
            routing_method: DEFAULT_ROUTING_METHOD,
        }
    }
}

impl NewServiceGroup {
    pub fn to_virtual_server(&self) -> VirtualServer {
        VirtualServer::template(
            self.port,
            self.allocation,
            self.routing_type,
            self.routing_method,
        )
    }
}

/// Changes to a virtual server and its first service group
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceGroupEdit {
    pub allocation: Option<i64>,
    pub port: Option<i64>,
    pub routing_type: Option<i64>,
    pub routing_method: Option<i64>,
}

impl ServiceGroupEdit {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the set fields. Routing changes need a service group on the
    /// virtual server; returns the names of fields that could not be applied.
    pub fn apply(&self, virtual_server: &mut VirtualServer) -> Vec<&'static str> {
        let mut skipped = Vec::new();

        if let Some(allocation) = self.allocation {
            virtual_server.allocation.set(allocation);
        }
        if let Some(port) = self.port {
            virtual_server.port.set(port);
        }

        let routing = [
            ("routing_type", self.routing_type),
            ("routing_method", self.routing_method),
        ];
        match virtual_server.first_service_group_mut() {
            Some(group) => {
                if let Some(routing_type) = self.routing_type {
                    group.routing_type_id.set(routing_type);
                }
                if let Some(routing_method) = self.routing_method {
                    group.routing_method_id.set(routing_method);
                }
            }
            None => skipped.extend(
                routing
                    .iter()
                    .filter(|(_, value)| value.is_some())
                    .map(|(name, _)| *name),
            ),
        }

        skipped
    }
}
