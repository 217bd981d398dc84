//! Integration tests for API endpoints.
//!
//! These tests drive the real router with hand-mocked services, so routing,
//! extractors, middleware and serialization are exercised without a running
//! MongoDB. The `Database` handle is lazy and never touched as long as the
//! health endpoint stays out of the picture.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mongodb::Client;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use trugoods_api::api::{create_router, AppState};
use trugoods_api::domain::{
    CreateOrder, CreateProduct, CreateUser, Order, OrderStatus, Product, Review, StoredImage,
    UpdateProduct, UpdateUser, User, UserRole,
};
use trugoods_api::errors::{AppError, AppResult};
use trugoods_api::infra::Database;
use trugoods_api::query::RawParams;
use trugoods_api::services::{
    AuthService, OrderCustomer, OrderDetail, OrderService, OrdersSummary, ProductListing,
    ProductService, SessionToken, UserService,
};

/// Session cookie values the stub auth service accepts.
const USER_SESSION: &str = "user-session-token";
const ADMIN_SESSION: &str = "admin-session-token";

const PASSWORD: &str = "SecurePass123!";

// =============================================================================
// Mock Services
// =============================================================================

fn session() -> SessionToken {
    SessionToken {
        token: "fresh-session-token".to_string(),
        expires_in: 86400,
    }
}

fn avatar() -> StoredImage {
    StoredImage::new("avatars/test", "https://res.example.com/avatars/test.png")
}

/// Auth service recognizing two fixed session tokens.
struct StubAuth {
    user: User,
    admin: User,
}

#[async_trait]
impl AuthService for StubAuth {
    async fn register(&self, input: CreateUser) -> AppResult<(User, SessionToken)> {
        if input.email == self.user.email {
            return Err(AppError::conflict("Email"));
        }
        let user = User::new(input.name, input.email, "hashed".to_string(), avatar());
        Ok((user, session()))
    }

    async fn login(&self, email: String, password: String) -> AppResult<(User, SessionToken)> {
        if email == self.user.email && password == PASSWORD {
            Ok((self.user.clone(), session()))
        } else {
            Err(AppError::InvalidCredentials)
        }
    }

    async fn authenticate(&self, token: &str) -> AppResult<User> {
        match token {
            USER_SESSION => Ok(self.user.clone()),
            ADMIN_SESSION => Ok(self.admin.clone()),
            _ => Err(AppError::Unauthorized),
        }
    }

    fn verify_session(&self, token: &str) -> AppResult<Uuid> {
        match token {
            USER_SESSION => Ok(self.user.id),
            ADMIN_SESSION => Ok(self.admin.id),
            _ => Err(AppError::Unauthorized),
        }
    }

    async fn forgot_password(&self, email: String) -> AppResult<String> {
        if email == self.user.email {
            Ok(email)
        } else {
            Err(AppError::NotFound)
        }
    }

    async fn reset_password(
        &self,
        token: String,
        _password: String,
        _confirm: String,
    ) -> AppResult<(User, SessionToken)> {
        if token == "good-reset-token" {
            Ok((self.user.clone(), session()))
        } else {
            Err(AppError::BadRequest(
                "Reset password token is invalid or has expired".to_string(),
            ))
        }
    }

    async fn update_password(
        &self,
        _user_id: Uuid,
        old_password: String,
        _new_password: String,
        _confirm: String,
    ) -> AppResult<(User, SessionToken)> {
        if old_password == PASSWORD {
            Ok((self.user.clone(), session()))
        } else {
            Err(AppError::BadRequest("Old password is incorrect".to_string()))
        }
    }
}

struct StubUsers {
    user: User,
    admin: User,
}

#[async_trait]
impl UserService for StubUsers {
    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        if id == self.user.id {
            Ok(self.user.clone())
        } else if id == self.admin.id {
            Ok(self.admin.clone())
        } else {
            Err(AppError::NotFound)
        }
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        Ok(vec![self.user.clone(), self.admin.clone()])
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<String>,
        email: Option<String>,
    ) -> AppResult<User> {
        let mut user = self.get_user(id).await?;
        if let Some(name) = name {
            user.name = name;
        }
        if let Some(email) = email {
            user.email = email;
        }
        Ok(user)
    }

    async fn update_user(&self, id: Uuid, input: UpdateUser) -> AppResult<User> {
        let mut user = self.get_user(id).await?;
        if let Some(name) = input.name {
            user.name = name;
        }
        if let Some(role) = input.role {
            user.role = role;
        }
        Ok(user)
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        self.get_user(id).await.map(|_| ())
    }
}

struct StubProducts {
    product: Product,
}

#[async_trait]
impl ProductService for StubProducts {
    async fn list_products(&self, _params: RawParams) -> AppResult<ProductListing> {
        Ok(ProductListing {
            products: vec![self.product.clone()],
            product_count: 1,
            filtered_count: 1,
            results_per_page: 9,
        })
    }

    async fn get_product(&self, id: Uuid) -> AppResult<Product> {
        if id == self.product.id {
            Ok(self.product.clone())
        } else {
            Err(AppError::NotFound)
        }
    }

    async fn create_product(&self, input: CreateProduct, created_by: Uuid) -> AppResult<Product> {
        Ok(Product::new(input, created_by))
    }

    async fn update_product(&self, id: Uuid, changes: UpdateProduct) -> AppResult<Product> {
        let mut product = self.get_product(id).await?;
        if let Some(price) = changes.price {
            product.price = price;
        }
        Ok(product)
    }

    async fn delete_product(&self, id: Uuid) -> AppResult<()> {
        self.get_product(id).await.map(|_| ())
    }

    async fn submit_review(
        &self,
        product_id: Uuid,
        _user_id: Uuid,
        _user_name: String,
        _rating: f64,
        _comment: String,
    ) -> AppResult<()> {
        self.get_product(product_id).await.map(|_| ())
    }

    async fn get_reviews(&self, product_id: Uuid) -> AppResult<Vec<Review>> {
        Ok(self.get_product(product_id).await?.reviews)
    }

    async fn delete_review(&self, product_id: Uuid, _review_id: Uuid) -> AppResult<()> {
        self.get_product(product_id).await.map(|_| ())
    }
}

struct StubOrders {
    order: Order,
    customer: OrderCustomer,
}

#[async_trait]
impl OrderService for StubOrders {
    async fn create_order(&self, user: Uuid, input: CreateOrder) -> AppResult<Order> {
        Ok(Order::new(user, input))
    }

    async fn get_order(&self, id: Uuid) -> AppResult<OrderDetail> {
        if id == self.order.id {
            Ok(OrderDetail {
                order: self.order.clone(),
                customer: Some(OrderCustomer {
                    name: self.customer.name.clone(),
                    email: self.customer.email.clone(),
                }),
            })
        } else {
            Err(AppError::NotFound)
        }
    }

    async fn my_orders(&self, user: Uuid) -> AppResult<Vec<Order>> {
        if user == self.order.user {
            Ok(vec![self.order.clone()])
        } else {
            Ok(vec![])
        }
    }

    async fn list_orders(&self) -> AppResult<OrdersSummary> {
        Ok(OrdersSummary {
            orders: vec![self.order.clone()],
            total_amount: self.order.total_price,
        })
    }

    async fn update_status(&self, id: Uuid, status: OrderStatus) -> AppResult<Order> {
        let mut order = self.get_order(id).await?.order;
        order.status = status;
        Ok(order)
    }

    async fn delete_order(&self, id: Uuid) -> AppResult<()> {
        self.get_order(id).await.map(|_| ())
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

struct TestApp {
    router: Router,
    user: User,
    admin: User,
    product: Product,
    order: Order,
}

async fn test_app() -> TestApp {
    let user = User::new(
        "Jane Customer".to_string(),
        "jane@example.com".to_string(),
        "hashed".to_string(),
        avatar(),
    );
    let mut admin = User::new(
        "Sam Admin".to_string(),
        "sam@example.com".to_string(),
        "hashed".to_string(),
        avatar(),
    );
    admin.role = UserRole::Admin;

    let product = Product::new(
        CreateProduct {
            name: "Walnut Desk".to_string(),
            description: "Solid walnut standing desk".to_string(),
            price: 650.0,
            category: "Furniture".to_string(),
            stock: 4,
            images: vec![],
        },
        admin.id,
    );

    let order = Order::new(
        user.id,
        CreateOrder {
            shipping_info: shipping_info(),
            order_items: vec![],
            payment_info: payment_info(),
            items_price: 650.0,
            tax_price: 130.0,
            shipping_price: 0.0,
            total_price: 780.0,
        },
    );

    let auth = StubAuth {
        user: user.clone(),
        admin: admin.clone(),
    };
    let users = StubUsers {
        user: user.clone(),
        admin: admin.clone(),
    };
    let products = StubProducts {
        product: product.clone(),
    };
    let orders = StubOrders {
        order: order.clone(),
        customer: OrderCustomer {
            name: user.name.clone(),
            email: user.email.clone(),
        },
    };

    // Lazy client: parses the URI but opens no connection
    let client = Client::with_uri_str("mongodb://127.0.0.1:27017")
        .await
        .expect("client options");
    let database = Arc::new(Database::from_client(client, "trugoods_test"));

    let state = AppState::new(
        Arc::new(auth),
        Arc::new(users),
        Arc::new(products),
        Arc::new(orders),
        database,
    );

    TestApp {
        router: create_router(state),
        user,
        admin,
        product,
        order,
    }
}

fn shipping_info() -> trugoods_api::domain::ShippingInfo {
    trugoods_api::domain::ShippingInfo {
        address: "221B Baker St".to_string(),
        city: "London".to_string(),
        state: "London".to_string(),
        country: "UK".to_string(),
        pin_code: "NW16XE".to_string(),
        phone_no: "02079460000".to_string(),
    }
}

fn payment_info() -> trugoods_api::domain::PaymentInfo {
    trugoods_api::domain::PaymentInfo {
        id: "pay_123".to_string(),
        status: "succeeded".to_string(),
    }
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn get_with_session(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, format!("token={}", token))
        .body(Body::empty())
        .expect("request")
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn json_with_session(method: Method, uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, format!("token={}", token))
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

// =============================================================================
// Public Surface
// =============================================================================

#[tokio::test]
async fn test_root_returns_welcome_message() {
    let app = test_app().await;
    let response = app.router.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"Welcome to the TruGoods API");
}

#[tokio::test]
async fn test_product_listing_is_public() {
    let app = test_app().await;
    let response = app
        .router
        .oneshot(get("/api/v1/products?keyword=desk&page=1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["product_count"], 1);
    assert_eq!(body["filtered_count"], 1);
    assert_eq!(body["results_per_page"], 9);
    assert_eq!(body["products"][0]["name"], "Walnut Desk");
}

#[tokio::test]
async fn test_unknown_product_maps_to_not_found() {
    let app = test_app().await;
    let uri = format!("/api/v1/product/{}", Uuid::new_v4());
    let response = app.router.oneshot(get(&uri)).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_product_reviews_are_public() {
    let app = test_app().await;
    let uri = format!("/api/v1/reviews?id={}", app.product.id);
    let response = app.router.oneshot(get(&uri)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body.as_array().unwrap().is_empty());
}

// =============================================================================
// Registration & Login
// =============================================================================

#[tokio::test]
async fn test_register_opens_session_with_cookie() {
    let app = test_app().await;
    let response = app
        .router
        .oneshot(json_request(
            Method::POST,
            "/api/v1/register",
            json!({
                "name": "New Shopper",
                "email": "new@example.com",
                "password": PASSWORD,
                "avatar": "data:image/png;base64,iVBORw0KGgo",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("HttpOnly"));

    let body = body_json(response).await;
    assert_eq!(body["user"]["email"], "new@example.com");
    assert_eq!(body["token"], "fresh-session-token");
    assert!(body["user"]["password_hash"].is_null());
}

#[tokio::test]
async fn test_register_rejects_short_name() {
    let app = test_app().await;
    let response = app
        .router
        .oneshot(json_request(
            Method::POST,
            "/api/v1/register",
            json!({
                "name": "Al",
                "email": "al@example.com",
                "password": PASSWORD,
                "avatar": "data:image/png;base64,iVBORw0KGgo",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Name must be between 4 and 30 characters"));
}

#[tokio::test]
async fn test_duplicate_email_registration_conflicts() {
    let app = test_app().await;
    let email = app.user.email.clone();
    let response = app
        .router
        .oneshot(json_request(
            Method::POST,
            "/api/v1/register",
            json!({
                "name": "Jane Again",
                "email": email,
                "password": PASSWORD,
                "avatar": "data:image/png;base64,iVBORw0KGgo",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_login_sets_http_only_session_cookie() {
    let app = test_app().await;
    let email = app.user.email.clone();
    let response = app
        .router
        .oneshot(json_request(
            Method::POST,
            "/api/v1/login",
            json!({ "email": email, "password": PASSWORD }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("token=fresh-session-token"));
    assert!(cookie.contains("HttpOnly"));

    let body = body_json(response).await;
    assert_eq!(body["user"]["email"], app.user.email);
    assert_eq!(body["expires_in"], 86400);
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let app = test_app().await;
    let email = app.user.email.clone();
    let response = app
        .router
        .oneshot(json_request(
            Method::POST,
            "/api/v1/login",
            json!({ "email": email, "password": "not-the-password" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_logout_clears_the_session_cookie() {
    let app = test_app().await;
    let response = app.router.oneshot(get("/api/v1/logout")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("clearing cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("token=;"));
    assert!(cookie.contains("Max-Age=0"));

    let body = body_json(response).await;
    assert_eq!(body["message"], "Logged out");
}

#[tokio::test]
async fn test_forgot_password_reports_recipient() {
    let app = test_app().await;
    let email = app.user.email.clone();
    let response = app
        .router
        .oneshot(json_request(
            Method::POST,
            "/api/v1/password/forgot",
            json!({ "email": email }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        format!("Email sent to {} successfully", app.user.email)
    );
}

#[tokio::test]
async fn test_reset_password_rejects_bad_token() {
    let app = test_app().await;
    let response = app
        .router
        .oneshot(json_request(
            Method::PUT,
            "/api/v1/password/reset/stale-token",
            json!({ "password": PASSWORD, "confirm_password": PASSWORD }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(
        body["error"]["message"],
        "Reset password token is invalid or has expired"
    );
}

// =============================================================================
// Session Guard
// =============================================================================

#[tokio::test]
async fn test_profile_requires_a_session() {
    let app = test_app().await;
    let response = app.router.oneshot(get("/api/v1/profile")).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_rejects_an_invalid_token() {
    let app = test_app().await;
    let response = app
        .router
        .oneshot(get_with_session("/api/v1/profile", "forged-token"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_returns_the_logged_in_account() {
    let app = test_app().await;
    let response = app
        .router
        .oneshot(get_with_session("/api/v1/profile", USER_SESSION))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["email"], app.user.email);
    assert_eq!(body["role"], "user");
}

#[tokio::test]
async fn test_review_submission_requires_a_session() {
    let app = test_app().await;
    let response = app
        .router
        .oneshot(json_request(
            Method::PUT,
            "/api/v1/review",
            json!({ "product_id": app.product.id, "rating": 5.0, "comment": "great" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_order_creation_with_session_returns_created() {
    let app = test_app().await;
    let response = app
        .router
        .oneshot(json_with_session(
            Method::POST,
            "/api/v1/order/new",
            USER_SESSION,
            json!({
                "shipping_info": {
                    "address": "221B Baker St",
                    "city": "London",
                    "state": "London",
                    "country": "UK",
                    "pin_code": "NW16XE",
                    "phone_no": "02079460000",
                },
                "order_items": [{
                    "product": app.product.id,
                    "name": app.product.name,
                    "price": app.product.price,
                    "quantity": 1,
                    "image": "https://res.example.com/products/desk.png",
                }],
                "payment_info": { "id": "pay_789", "status": "succeeded" },
                "items_price": 650.0,
                "tax_price": 130.0,
                "shipping_price": 0.0,
                "total_price": 780.0,
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["status"], "Processing");
    assert_eq!(body["total_price"], 780.0);
}

#[tokio::test]
async fn test_empty_order_is_rejected() {
    let app = test_app().await;
    let response = app
        .router
        .oneshot(json_with_session(
            Method::POST,
            "/api/v1/order/new",
            USER_SESSION,
            json!({
                "shipping_info": {
                    "address": "221B Baker St",
                    "city": "London",
                    "state": "London",
                    "country": "UK",
                    "pin_code": "NW16XE",
                    "phone_no": "02079460000",
                },
                "order_items": [],
                "payment_info": { "id": "pay_789", "status": "succeeded" },
                "items_price": 0.0,
                "tax_price": 0.0,
                "shipping_price": 0.0,
                "total_price": 0.0,
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Order must contain at least one item"));
}

#[tokio::test]
async fn test_my_orders_lists_only_own_orders() {
    let app = test_app().await;
    let response = app
        .router
        .oneshot(get_with_session("/api/v1/orders/me", USER_SESSION))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let orders = body.as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["_id"], app.order.id.to_string());
}

// =============================================================================
// Admin Guard
// =============================================================================

#[tokio::test]
async fn test_admin_routes_require_a_session() {
    let app = test_app().await;
    let response = app
        .router
        .oneshot(get("/api/v1/admin/users"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_routes_reject_non_admins() {
    let app = test_app().await;
    let response = app
        .router
        .oneshot(get_with_session("/api/v1/admin/users", USER_SESSION))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_admin_can_list_users() {
    let app = test_app().await;
    let response = app
        .router
        .oneshot(get_with_session("/api/v1/admin/users", ADMIN_SESSION))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[1]["email"], app.admin.email);
}

#[tokio::test]
async fn test_admin_order_listing_includes_revenue() {
    let app = test_app().await;
    let response = app
        .router
        .oneshot(get_with_session("/api/v1/admin/orders", ADMIN_SESSION))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total_amount"], 780.0);
    assert_eq!(body["orders"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_order_status_update_accepts_exact_labels() {
    let app = test_app().await;
    let uri = format!("/api/v1/admin/order/{}", app.order.id);
    let response = app
        .router
        .oneshot(json_with_session(
            Method::PUT,
            &uri,
            ADMIN_SESSION,
            json!({ "status": "Shipped" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "Shipped");
}

#[tokio::test]
async fn test_order_status_update_rejects_unknown_labels() {
    let app = test_app().await;
    let uri = format!("/api/v1/admin/order/{}", app.order.id);
    let response = app
        .router
        .oneshot(json_with_session(
            Method::PUT,
            &uri,
            ADMIN_SESSION,
            json!({ "status": "Cancelled" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Unknown order status"));
}

#[tokio::test]
async fn test_admin_product_creation_records_creator() {
    let app = test_app().await;
    let response = app
        .router
        .oneshot(json_with_session(
            Method::POST,
            "/api/v1/admin/product/new",
            ADMIN_SESSION,
            json!({
                "name": "Oak Shelf",
                "description": "Three tier oak shelf",
                "price": 120.0,
                "category": "Furniture",
                "stock": 10,
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Oak Shelf");
    assert_eq!(body["user"], app.admin.id.to_string());
}
