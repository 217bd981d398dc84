//! Order service - checkout, fulfillment lifecycle and stock effects.

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{CreateOrder, Order, OrderStatus};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::repositories::{OrderRepository, ProductRepository, UserRepository};

/// Customer snapshot attached to a single-order lookup.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderCustomer {
    pub name: String,
    pub email: String,
}

/// One order with its purchaser resolved.
///
/// `customer` is absent when the account was deleted after checkout.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderDetail {
    pub order: Order,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<OrderCustomer>,
}

/// Every order in the shop plus the revenue they add up to.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrdersSummary {
    pub orders: Vec<Order>,
    pub total_amount: f64,
}

/// Order service trait for dependency injection.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Record a paid checkout as a new `Processing` order.
    async fn create_order(&self, user: Uuid, input: CreateOrder) -> AppResult<Order>;

    /// Load one order with its customer resolved (admin).
    async fn get_order(&self, id: Uuid) -> AppResult<OrderDetail>;

    /// Orders placed by the calling user.
    async fn my_orders(&self, user: Uuid) -> AppResult<Vec<Order>>;

    /// Every order plus the summed revenue (admin).
    async fn list_orders(&self) -> AppResult<OrdersSummary>;

    /// Advance the fulfillment state (admin).
    async fn update_status(&self, id: Uuid, status: OrderStatus) -> AppResult<Order>;

    /// Remove an order (admin).
    async fn delete_order(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of OrderService.
pub struct OrderManager {
    orders: Arc<dyn OrderRepository>,
    products: Arc<dyn ProductRepository>,
    users: Arc<dyn UserRepository>,
}

impl OrderManager {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        products: Arc<dyn ProductRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            orders,
            products,
            users,
        }
    }
}

#[async_trait]
impl OrderService for OrderManager {
    async fn create_order(&self, user: Uuid, input: CreateOrder) -> AppResult<Order> {
        let order = Order::new(user, input);
        self.orders.insert(&order).await?;
        tracing::info!(order_id = %order.id, user_id = %user, "Order placed");
        Ok(order)
    }

    async fn get_order(&self, id: Uuid) -> AppResult<OrderDetail> {
        let order = self.orders.find_by_id(id).await?.ok_or_not_found()?;

        let customer = self
            .users
            .find_by_id(order.user)
            .await?
            .map(|user| OrderCustomer {
                name: user.name,
                email: user.email,
            });

        Ok(OrderDetail { order, customer })
    }

    async fn my_orders(&self, user: Uuid) -> AppResult<Vec<Order>> {
        self.orders.find_by_user(user).await
    }

    async fn list_orders(&self) -> AppResult<OrdersSummary> {
        let orders = self.orders.find_all().await?;
        let total_amount = orders.iter().map(|order| order.total_price).sum();
        Ok(OrdersSummary {
            orders,
            total_amount,
        })
    }

    async fn update_status(&self, id: Uuid, status: OrderStatus) -> AppResult<Order> {
        let mut order = self.orders.find_by_id(id).await?.ok_or_not_found()?;

        // Delivered is terminal. Rejecting here also guarantees the stock
        // decrement below cannot run twice for the same delivery.
        if order.is_delivered() {
            return Err(AppError::invalid_state("Order has already been delivered"));
        }

        if status.consumes_stock() {
            for item in &order.order_items {
                self.products
                    .decrement_stock(item.product, item.quantity)
                    .await?;
            }
        }

        let delivered_at = match status {
            OrderStatus::Delivered => Some(Utc::now()),
            _ => None,
        };
        self.orders.set_status(id, status, delivered_at).await?;

        order.status = status;
        order.delivered_at = delivered_at;
        tracing::info!(order_id = %id, status = %status, "Order status updated");
        Ok(order)
    }

    async fn delete_order(&self, id: Uuid) -> AppResult<()> {
        if !self.orders.delete(id).await? {
            return Err(AppError::NotFound);
        }
        tracing::info!(order_id = %id, "Order deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OrderItem, PaymentInfo, ShippingInfo, StoredImage, User};
    use crate::infra::repositories::{
        MockOrderRepository, MockProductRepository, MockUserRepository,
    };
    use mockall::predicate::eq;

    fn checkout(items: Vec<OrderItem>) -> CreateOrder {
        CreateOrder {
            shipping_info: ShippingInfo {
                address: "221B Baker St".to_string(),
                city: "London".to_string(),
                state: "London".to_string(),
                country: "UK".to_string(),
                pin_code: "NW16XE".to_string(),
                phone_no: "02079460000".to_string(),
            },
            order_items: items,
            payment_info: PaymentInfo {
                id: "pay_123".to_string(),
                status: "succeeded".to_string(),
            },
            items_price: 100.0,
            tax_price: 20.0,
            shipping_price: 5.0,
            total_price: 125.0,
        }
    }

    fn line_item(product: Uuid, quantity: i64) -> OrderItem {
        OrderItem {
            product,
            name: "Standing Desk".to_string(),
            price: 449.0,
            quantity,
            image: "https://res.example.com/products/desk.png".to_string(),
        }
    }

    fn service(
        orders: MockOrderRepository,
        products: MockProductRepository,
        users: MockUserRepository,
    ) -> OrderManager {
        OrderManager::new(Arc::new(orders), Arc::new(products), Arc::new(users))
    }

    #[tokio::test]
    async fn new_order_is_processing_and_persisted() {
        let mut orders = MockOrderRepository::new();
        orders
            .expect_insert()
            .withf(|order| order.status == OrderStatus::Processing)
            .times(1)
            .returning(|_| Ok(()));

        let svc = service(orders, MockProductRepository::new(), MockUserRepository::new());
        let order = svc
            .create_order(Uuid::new_v4(), checkout(vec![]))
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Processing);
    }

    #[tokio::test]
    async fn shipping_decrements_stock_for_every_line_item() {
        let user = Uuid::new_v4();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let order = Order::new(user, checkout(vec![line_item(first, 2), line_item(second, 5)]));
        let order_id = order.id;

        let mut orders = MockOrderRepository::new();
        orders
            .expect_find_by_id()
            .with(eq(order_id))
            .returning(move |_| Ok(Some(order.clone())));
        orders
            .expect_set_status()
            .withf(|_, status, delivered_at| {
                *status == OrderStatus::Shipped && delivered_at.is_none()
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let mut products = MockProductRepository::new();
        products
            .expect_decrement_stock()
            .with(eq(first), eq(2))
            .times(1)
            .returning(|_, _| Ok(()));
        products
            .expect_decrement_stock()
            .with(eq(second), eq(5))
            .times(1)
            .returning(|_, _| Ok(()));

        let svc = service(orders, products, MockUserRepository::new());
        let updated = svc.update_status(order_id, OrderStatus::Shipped).await.unwrap();
        assert_eq!(updated.status, OrderStatus::Shipped);
        assert!(updated.delivered_at.is_none());
    }

    #[tokio::test]
    async fn delivering_decrements_again_and_stamps_the_time() {
        let product = Uuid::new_v4();
        let mut order = Order::new(Uuid::new_v4(), checkout(vec![line_item(product, 3)]));
        order.status = OrderStatus::Shipped;
        let order_id = order.id;

        let mut orders = MockOrderRepository::new();
        orders
            .expect_find_by_id()
            .returning(move |_| Ok(Some(order.clone())));
        orders
            .expect_set_status()
            .withf(|_, status, delivered_at| {
                *status == OrderStatus::Delivered && delivered_at.is_some()
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let mut products = MockProductRepository::new();
        products
            .expect_decrement_stock()
            .with(eq(product), eq(3))
            .times(1)
            .returning(|_, _| Ok(()));

        let svc = service(orders, products, MockUserRepository::new());
        let updated = svc
            .update_status(order_id, OrderStatus::Delivered)
            .await
            .unwrap();
        assert!(updated.is_delivered());
        assert!(updated.delivered_at.is_some());
    }

    #[tokio::test]
    async fn delivered_order_rejects_any_further_update() {
        let mut order = Order::new(Uuid::new_v4(), checkout(vec![line_item(Uuid::new_v4(), 1)]));
        order.status = OrderStatus::Delivered;
        let order_id = order.id;

        let mut orders = MockOrderRepository::new();
        orders
            .expect_find_by_id()
            .returning(move |_| Ok(Some(order.clone())));
        orders.expect_set_status().times(0);

        let mut products = MockProductRepository::new();
        products.expect_decrement_stock().times(0);

        let svc = service(orders, products, MockUserRepository::new());
        let result = svc.update_status(order_id, OrderStatus::Delivered).await;
        assert!(matches!(result, Err(AppError::InvalidState(_))));
    }

    #[tokio::test]
    async fn moving_back_to_processing_consumes_no_stock() {
        let order = Order::new(Uuid::new_v4(), checkout(vec![line_item(Uuid::new_v4(), 4)]));
        let order_id = order.id;

        let mut orders = MockOrderRepository::new();
        orders
            .expect_find_by_id()
            .returning(move |_| Ok(Some(order.clone())));
        orders
            .expect_set_status()
            .times(1)
            .returning(|_, _, _| Ok(()));

        let mut products = MockProductRepository::new();
        products.expect_decrement_stock().times(0);

        let svc = service(orders, products, MockUserRepository::new());
        svc.update_status(order_id, OrderStatus::Processing)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn single_order_lookup_resolves_the_customer() {
        let user = User::new(
            "Ada Lovelace".to_string(),
            "ada@example.com".to_string(),
            "$argon2id$stub".to_string(),
            StoredImage::new("avatars/ada", "https://res.example.com/avatars/ada.png"),
        );
        let order = Order::new(user.id, checkout(vec![]));
        let order_id = order.id;
        let user_id = user.id;

        let mut orders = MockOrderRepository::new();
        orders
            .expect_find_by_id()
            .returning(move |_| Ok(Some(order.clone())));

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .with(eq(user_id))
            .returning(move |_| Ok(Some(user.clone())));

        let svc = service(orders, MockProductRepository::new(), users);
        let detail = svc.get_order(order_id).await.unwrap();
        let customer = detail.customer.unwrap();
        assert_eq!(customer.name, "Ada Lovelace");
        assert_eq!(customer.email, "ada@example.com");
    }

    #[tokio::test]
    async fn deleted_customer_leaves_the_order_readable() {
        let order = Order::new(Uuid::new_v4(), checkout(vec![]));
        let order_id = order.id;

        let mut orders = MockOrderRepository::new();
        orders
            .expect_find_by_id()
            .returning(move |_| Ok(Some(order.clone())));

        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));

        let svc = service(orders, MockProductRepository::new(), users);
        let detail = svc.get_order(order_id).await.unwrap();
        assert!(detail.customer.is_none());
    }

    #[tokio::test]
    async fn order_listing_sums_revenue() {
        let mut cheap = Order::new(Uuid::new_v4(), checkout(vec![]));
        cheap.total_price = 25.0;
        let mut dear = Order::new(Uuid::new_v4(), checkout(vec![]));
        dear.total_price = 975.0;

        let mut orders = MockOrderRepository::new();
        orders
            .expect_find_all()
            .returning(move || Ok(vec![cheap.clone(), dear.clone()]));

        let svc = service(orders, MockProductRepository::new(), MockUserRepository::new());
        let summary = svc.list_orders().await.unwrap();
        assert_eq!(summary.orders.len(), 2);
        assert_eq!(summary.total_amount, 1000.0);
    }

    #[tokio::test]
    async fn deleting_unknown_order_is_not_found() {
        let mut orders = MockOrderRepository::new();
        orders.expect_delete().returning(|_| Ok(false));

        let svc = service(orders, MockProductRepository::new(), MockUserRepository::new());
        let result = svc.delete_order(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }
}
