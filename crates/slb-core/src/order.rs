use serde::{Serialize, Serializer};
use std::fmt;

pub const LOAD_BALANCER_ORDER_TYPE: &str = "SoftLayer_Container_Product_Order_Network_LoadBalancer";

/// Package that carries the local load balancer price items.
pub const LOAD_BALANCER_PACKAGE_ID: i64 = 0;

const FIRST_AVAILABLE: &str = "FIRST_AVAILABLE";

/// Location an order is placed in.
///
/// `FirstAvailable` is not an identified datacenter: it tells the provider
/// that any location is acceptable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationId {
    Id(i64),
    FirstAvailable,
}

impl LocationId {
    pub fn id(&self) -> Option<i64> {
        match self {
            LocationId::Id(id) => Some(*id),
            LocationId::FirstAvailable => None,
        }
    }
}

impl Serialize for LocationId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            LocationId::Id(id) => serializer.serialize_i64(*id),
            LocationId::FirstAvailable => serializer.serialize_str(FIRST_AVAILABLE),
        }
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationId::Id(id) => write!(f, "{}", id),
            LocationId::FirstAvailable => f.write_str(FIRST_AVAILABLE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRef {
    pub id: i64,
}

/// Order container submitted to `placeOrder`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOrder {
    pub complex_type: String,
    pub quantity: u32,
    pub package_id: i64,
    pub location: LocationId,
    pub prices: Vec<PriceRef>,
}

impl ProductOrder {
    /// Order for a single local load balancer at the given price item.
    pub fn local_load_balancer(price_item_id: i64, location: LocationId) -> Self {
        Self {
            complex_type: LOAD_BALANCER_ORDER_TYPE.to_string(),
            quantity: 1,
            package_id: LOAD_BALANCER_PACKAGE_ID,
            location,
            prices: vec![PriceRef { id: price_item_id }],
        }
    }
}
