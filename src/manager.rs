use crate::config::Config;
use crate::errors::{LbError, Result};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;
use slb_api::{CallRequest, RestTransport, Transport};
use slb_core::{
    BillingItem, CatalogEntry, Datacenter, FilterOp, IpAddress, LoadBalancer, LocationId,
    NewService, NewServiceGroup, ObjectFilter, ObjectMask, PackageItem, ProductOrder,
    RemoteService, ServiceEdit, ServiceGroupEdit, VirtualServer,
};
use std::sync::Arc;

const LOAD_BALANCER_ITEMS: &str = "*Load Balancer*";

/// Manages local load balancers.
///
/// Every method is a short request/response translation against the remote
/// API. Edits fetch the parent load balancer, change the in-memory copy and
/// submit the whole snapshot back with `editObject`; there is no locking, so
/// concurrent editors of the same load balancer overwrite each other.
pub struct LoadBalancerManager {
    transport: Arc<dyn Transport>,
}

impl LoadBalancerManager {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Build a manager backed by the REST transport
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = RestTransport::from_config(config)?;
        Ok(Self::new(Arc::new(transport)))
    }

    async fn call_raw(&self, request: CallRequest) -> Result<Value> {
        debug!(
            "Calling {}::{} (id: {:?})",
            request.service, request.method, request.id
        );
        if let Some(ref mask) = request.mask {
            debug!("  mask: {}", mask);
        }
        Ok(self.transport.call(request).await?)
    }

    async fn call<T: DeserializeOwned>(&self, request: CallRequest) -> Result<T> {
        let value = self.call_raw(request).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Local load balancer items from the product catalog, without global offerings
    pub async fn get_lb_pkgs(&self) -> Result<Vec<PackageItem>> {
        let filter = ObjectFilter::new().with(
            &["items", "description"],
            FilterOp::parse(LOAD_BALANCER_ITEMS),
        )?;
        let request = CallRequest::new(RemoteService::ProductPackage, "getItems")
            .with_id(slb_core::order::LOAD_BALANCER_PACKAGE_ID)
            .with_filter(filter);

        let mut packages: Vec<PackageItem> = self.call(request).await?;
        packages.retain(|package| !package.is_global());

        info!("Found {} local load balancer packages", packages.len());
        Ok(packages)
    }

    /// Look up an IP address object by its literal address
    pub async fn get_ip_address(&self, ip_address: &str) -> Result<IpAddress> {
        let request = CallRequest::new(RemoteService::SubnetIpAddress, "getByIpAddress")
            .with_parameter(Value::String(ip_address.to_string()));
        self.call(request).await
    }

    pub async fn get_hc_types(&self) -> Result<Vec<CatalogEntry>> {
        self.call(CallRequest::new(
            RemoteService::HealthCheckType,
            "getAllObjects",
        ))
        .await
    }

    pub async fn get_routing_methods(&self) -> Result<Vec<CatalogEntry>> {
        self.call(CallRequest::new(RemoteService::RoutingMethod, "getAllObjects"))
            .await
    }

    pub async fn get_routing_types(&self) -> Result<Vec<CatalogEntry>> {
        self.call(CallRequest::new(RemoteService::RoutingType, "getAllObjects"))
            .await
    }

    /// Location id of the named datacenter.
    ///
    /// An unknown name yields [`LocationId::FirstAvailable`], which lets the
    /// provider pick any location.
    pub async fn get_location(&self, datacenter: &str) -> Result<LocationId> {
        let datacenters: Vec<Datacenter> = self
            .call(CallRequest::new(RemoteService::Location, "getDataCenters"))
            .await?;

        match datacenters.iter().find(|dc| dc.name() == Some(datacenter)) {
            Some(dc) => Ok(LocationId::Id(dc.id)),
            None => {
                debug!(
                    "Datacenter '{}' not found, ordering in first available location",
                    datacenter
                );
                Ok(LocationId::FirstAvailable)
            }
        }
    }

    /// Cancel a load balancer through its billing item
    pub async fn cancel_lb(&self, loadbal_id: i64) -> Result<Value> {
        let billing: BillingItem = self
            .call(
                CallRequest::new(RemoteService::VirtualIpAddress, "getBillingItem")
                    .with_id(loadbal_id),
            )
            .await?;

        let result = self
            .call_raw(CallRequest::new(RemoteService::BillingItem, "cancelService").with_id(billing.id))
            .await?;

        info!(
            "Cancelled load balancer {} (billing item {})",
            loadbal_id, billing.id
        );
        Ok(result)
    }

    /// Order a local load balancer in the given datacenter
    pub async fn add_local_lb(&self, price_item_id: i64, datacenter: &str) -> Result<Value> {
        let location = self.get_location(datacenter).await?;
        let order = ProductOrder::local_load_balancer(price_item_id, location);

        let result = self
            .call_raw(
                CallRequest::new(RemoteService::ProductOrder, "placeOrder")
                    .with_parameter(serde_json::to_value(&order)?),
            )
            .await?;

        info!(
            "Placed load balancer order for price {} in {}",
            price_item_id, location
        );
        Ok(result)
    }

    /// All local load balancers on the account
    pub async fn get_local_lbs(&self) -> Result<Vec<LoadBalancer>> {
        let request = CallRequest::new(RemoteService::Account, "getAdcLoadBalancers")
            .with_mask(ObjectMask::local_lbs());
        self.call(request).await
    }

    /// A single load balancer; `mask` defaults to the full virtual server tree
    pub async fn get_local_lb(
        &self,
        loadbal_id: i64,
        mask: Option<ObjectMask>,
    ) -> Result<LoadBalancer> {
        let request = CallRequest::new(RemoteService::VirtualIpAddress, "getObject")
            .with_id(loadbal_id)
            .with_mask(mask.unwrap_or_else(ObjectMask::local_lb_detail));
        self.call(request).await
    }

    /// Delete a service. `loadbal_id` is not needed by the remote call.
    pub async fn delete_service(&self, loadbal_id: i64, service_id: i64) -> Result<Value> {
        debug!("Deleting service {} of load balancer {}", service_id, loadbal_id);
        self.call_raw(CallRequest::new(RemoteService::Service, "deleteObject").with_id(service_id))
            .await
    }

    /// Delete a service group (a virtual server). `loadbal_id` is not needed by the remote call.
    pub async fn delete_service_group(&self, loadbal_id: i64, group_id: i64) -> Result<Value> {
        debug!(
            "Deleting service group {} of load balancer {}",
            group_id, loadbal_id
        );
        self.call_raw(
            CallRequest::new(RemoteService::VirtualServer, "deleteObject").with_id(group_id),
        )
        .await
    }

    pub async fn toggle_service_status(&self, loadbal_id: i64, service_id: i64) -> Result<Value> {
        debug!(
            "Toggling service {} of load balancer {}",
            service_id, loadbal_id
        );
        self.call_raw(CallRequest::new(RemoteService::Service, "toggleStatus").with_id(service_id))
            .await
    }

    /// Edit an existing service, changing only the fields set in `edit`.
    ///
    /// A service id that is not in the fetched tree leaves it unchanged; the
    /// tree is still submitted.
    pub async fn edit_service(
        &self,
        loadbal_id: i64,
        service_id: i64,
        edit: &ServiceEdit,
    ) -> Result<Value> {
        let filter = ObjectFilter::new().with(
            &["virtualServers", "serviceGroups", "services", "id"],
            FilterOp::Value(service_id),
        )?;
        let request = CallRequest::new(RemoteService::VirtualIpAddress, "getVirtualServers")
            .with_id(loadbal_id)
            .with_filter(filter)
            .with_mask(ObjectMask::service_detail());
        let mut virtual_servers: Vec<VirtualServer> = self.call(request).await?;

        let service = virtual_servers
            .first_mut()
            .and_then(|vs| vs.first_service_group_mut())
            .and_then(|group| group.service_mut(service_id));

        match service {
            Some(service) => {
                for field in edit.apply(service) {
                    warn!(
                        "Service {} has no relation to hold {}, leaving it unset",
                        service_id, field
                    );
                }
            }
            None => warn!(
                "Service {} not found on load balancer {}, submitting unchanged",
                service_id, loadbal_id
            ),
        }

        let mut template = serde_json::Map::new();
        template.insert(
            "virtualServers".to_string(),
            serde_json::to_value(&virtual_servers)?,
        );
        let result = self
            .edit_load_balancer(loadbal_id, Value::Object(template))
            .await?;

        info!("Edited service {} on load balancer {}", service_id, loadbal_id);
        Ok(result)
    }

    /// Append a service to the first service group of virtual server `service_group_id`
    pub async fn add_service(
        &self,
        loadbal_id: i64,
        service_group_id: i64,
        service: &NewService,
    ) -> Result<Value> {
        let mut load_balancer = self.get_virtual_server_tree(loadbal_id).await?;

        match load_balancer
            .virtual_server_mut(service_group_id)
            .and_then(|vs| vs.first_service_group_mut())
        {
            Some(group) => group.services_mut().push(service.to_service()),
            None => warn!(
                "Service group {} not found on load balancer {}, submitting unchanged",
                service_group_id, loadbal_id
            ),
        }

        let result = self
            .edit_load_balancer(loadbal_id, serde_json::to_value(&load_balancer)?)
            .await?;

        info!(
            "Added service on port {} to service group {}",
            service.port, service_group_id
        );
        Ok(result)
    }

    /// Append a new virtual server with one service group
    pub async fn add_service_group(
        &self,
        loadbal_id: i64,
        group: &NewServiceGroup,
    ) -> Result<Value> {
        let mut load_balancer = self.get_virtual_server_tree(loadbal_id).await?;
        load_balancer
            .virtual_servers_mut()
            .push(group.to_virtual_server());

        let result = self
            .edit_load_balancer(loadbal_id, serde_json::to_value(&load_balancer)?)
            .await?;

        info!(
            "Added service group on port {} to load balancer {}",
            group.port, loadbal_id
        );
        Ok(result)
    }

    /// Edit a virtual server and the routing of its first service group
    pub async fn edit_service_group(
        &self,
        loadbal_id: i64,
        group_id: i64,
        edit: &ServiceGroupEdit,
    ) -> Result<Value> {
        let mut load_balancer = self.get_virtual_server_tree(loadbal_id).await?;

        match load_balancer.virtual_server_mut(group_id) {
            Some(virtual_server) => {
                for field in edit.apply(virtual_server) {
                    warn!(
                        "Service group {} has no nested group to hold {}, leaving it unset",
                        group_id, field
                    );
                }
            }
            None => warn!(
                "Service group {} not found on load balancer {}, submitting unchanged",
                group_id, loadbal_id
            ),
        }

        let result = self
            .edit_load_balancer(loadbal_id, serde_json::to_value(&load_balancer)?)
            .await?;

        info!(
            "Edited service group {} on load balancer {}",
            group_id, loadbal_id
        );
        Ok(result)
    }

    /// Kick all connections on a service group.
    ///
    /// `group_id` names the virtual server; the id of its nested service group
    /// is looked up first and that id is reset.
    pub async fn reset_service_group(&self, loadbal_id: i64, group_id: i64) -> Result<Value> {
        let filter =
            ObjectFilter::new().with(&["virtualServers", "id"], FilterOp::Value(group_id))?;
        let request = CallRequest::new(RemoteService::VirtualIpAddress, "getVirtualServers")
            .with_id(loadbal_id)
            .with_filter(filter)
            .with_mask(ObjectMask::service_groups());
        let virtual_servers: Vec<VirtualServer> = self.call(request).await?;

        let actual_id = virtual_servers
            .first()
            .and_then(|vs| vs.first_service_group())
            .and_then(|group| group.id.copied())
            .ok_or_else(|| {
                LbError::NotFound(format!(
                    "service group for virtual server {} on load balancer {}",
                    group_id, loadbal_id
                ))
            })?;

        debug!(
            "Resolved virtual server {} to service group {}",
            group_id, actual_id
        );

        let result = self
            .call_raw(
                CallRequest::new(RemoteService::ServiceGroup, "kickAllConnections")
                    .with_id(actual_id),
            )
            .await?;

        info!("Reset connections on service group {}", actual_id);
        Ok(result)
    }

    async fn get_virtual_server_tree(&self, loadbal_id: i64) -> Result<LoadBalancer> {
        self.get_local_lb(loadbal_id, Some(ObjectMask::virtual_server_tree()))
            .await
    }

    /// Submit a replacement snapshot of the load balancer
    async fn edit_load_balancer(&self, loadbal_id: i64, template: Value) -> Result<Value> {
        self.call_raw(
            CallRequest::new(RemoteService::VirtualIpAddress, "editObject")
                .with_id(loadbal_id)
                .with_parameter(template),
        )
        .await
    }
}
