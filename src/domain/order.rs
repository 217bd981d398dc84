//! Order domain entity and fulfillment lifecycle.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::AppError;

/// Order lifecycle states.
///
/// Orders move `Processing` -> `Shipped` -> `Delivered`; `Delivered` is
/// terminal and rejects any further transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum OrderStatus {
    Processing,
    Shipped,
    Delivered,
}

impl OrderStatus {
    /// Terminal states accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered)
    }

    /// States whose entry consumes stock for the ordered items.
    pub fn consumes_stock(&self) -> bool {
        matches!(self, OrderStatus::Shipped | OrderStatus::Delivered)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for OrderStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Processing" => Ok(OrderStatus::Processing),
            "Shipped" => Ok(OrderStatus::Shipped),
            "Delivered" => Ok(OrderStatus::Delivered),
            other => Err(AppError::validation(format!(
                "Unknown order status: {}",
                other
            ))),
        }
    }
}

/// Delivery address snapshot taken at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ShippingInfo {
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub pin_code: String,
    pub phone_no: String,
}

/// Purchased line item snapshot; `product` links back to the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub product: Uuid,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    pub image: String,
}

/// Upstream payment reference recorded with the order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentInfo {
    pub id: String,
    pub status: String,
}

/// Order domain entity.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    #[serde(rename = "_id")]
    #[schema(value_type = Uuid)]
    pub id: Uuid,
    pub shipping_info: ShippingInfo,
    pub order_items: Vec<OrderItem>,
    /// Purchasing user
    pub user: Uuid,
    pub payment_info: PaymentInfo,
    pub paid_at: DateTime<Utc>,
    pub items_price: f64,
    pub tax_price: f64,
    pub shipping_price: f64,
    pub total_price: f64,
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Create a freshly paid order in the `Processing` state.
    pub fn new(user: Uuid, input: CreateOrder) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            shipping_info: input.shipping_info,
            order_items: input.order_items,
            user,
            payment_info: input.payment_info,
            paid_at: now,
            items_price: input.items_price,
            tax_price: input.tax_price,
            shipping_price: input.shipping_price,
            total_price: input.total_price,
            status: OrderStatus::Processing,
            delivered_at: None,
            created_at: now,
        }
    }

    pub fn is_delivered(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Order creation data captured at checkout
#[derive(Debug, Clone)]
pub struct CreateOrder {
    pub shipping_info: ShippingInfo,
    pub order_items: Vec<OrderItem>,
    pub payment_info: PaymentInfo,
    pub items_price: f64,
    pub tax_price: f64,
    pub shipping_price: f64,
    pub total_price: f64,
}
