use std::fmt;

/// Remote services the load balancer manager talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteService {
    Account,
    ProductPackage,
    ProductOrder,
    BillingItem,
    Location,
    SubnetIpAddress,
    VirtualIpAddress,
    VirtualServer,
    ServiceGroup,
    Service,
    HealthCheckType,
    RoutingMethod,
    RoutingType,
}

impl RemoteService {
    /// Name of the service as used by the remote API
    pub fn as_str(&self) -> &'static str {
        match self {
            RemoteService::Account => "SoftLayer_Account",
            RemoteService::ProductPackage => "SoftLayer_Product_Package",
            RemoteService::ProductOrder => "SoftLayer_Product_Order",
            RemoteService::BillingItem => "SoftLayer_Billing_Item",
            RemoteService::Location => "SoftLayer_Location",
            RemoteService::SubnetIpAddress => "SoftLayer_Network_Subnet_IpAddress",
            RemoteService::VirtualIpAddress => {
                "SoftLayer_Network_Application_Delivery_Controller_LoadBalancer_VirtualIpAddress"
            }
            RemoteService::VirtualServer => {
                "SoftLayer_Network_Application_Delivery_Controller_LoadBalancer_VirtualServer"
            }
            RemoteService::ServiceGroup => {
                "SoftLayer_Network_Application_Delivery_Controller_LoadBalancer_Service_Group"
            }
            RemoteService::Service => {
                "SoftLayer_Network_Application_Delivery_Controller_LoadBalancer_Service"
            }
            RemoteService::HealthCheckType => {
                "SoftLayer_Network_Application_Delivery_Controller_LoadBalancer_Health_Check_Type"
            }
            RemoteService::RoutingMethod => {
                "SoftLayer_Network_Application_Delivery_Controller_LoadBalancer_Routing_Method"
            }
            RemoteService::RoutingType => {
                "SoftLayer_Network_Application_Delivery_Controller_LoadBalancer_Routing_Type"
            }
        }
    }
}

impl fmt::Display for RemoteService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
