use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        analytics::{OrderAnalytics, ProductStat, StatusCount},
        auth::{AuthResponse, LoginRequest, RegisterRequest},
        orders::{
            CreateOrderRequest, OrderList, OrderWithProduct, UpdateOrderRequest,
            UpdateOrderStatusRequest,
        },
        products::{CreateProductRequest, ProductList, UpdateProductRequest},
        vendors::{UpdateVendorRequest, VendorList},
    },
    models::{OpeningHours, Order, OrderStatus, Product, ProductCategory, Vendor},
    response::{ApiResponse, Meta},
    routes::{health, orders, products, vendors},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        vendors::register,
        vendors::login,
        vendors::me,
        vendors::list_vendors,
        vendors::get_vendor,
        vendors::update_vendor,
        vendors::toggle_availability,
        vendors::delete_vendor,
        products::list_products,
        products::feed,
        products::my_products,
        products::list_by_vendor,
        products::get_product,
        products::create_product,
        products::update_product,
        products::toggle_availability,
        products::delete_product,
        orders::create_order,
        orders::my_orders,
        orders::order_analytics,
        orders::get_order,
        orders::update_status,
        orders::update_order,
        orders::delete_order,
    ),
    components(
        schemas(
            Vendor,
            Product,
            Order,
            OpeningHours,
            OrderStatus,
            ProductCategory,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            UpdateVendorRequest,
            VendorList,
            CreateProductRequest,
            UpdateProductRequest,
            ProductList,
            CreateOrderRequest,
            UpdateOrderRequest,
            UpdateOrderStatusRequest,
            OrderWithProduct,
            OrderList,
            OrderAnalytics,
            ProductStat,
            StatusCount,
            Meta,
            ApiResponse<Vendor>,
            ApiResponse<Product>,
            ApiResponse<Order>,
            ApiResponse<OrderAnalytics>,
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Vendors", description = "Vendor accounts and profiles"),
        (name = "Products", description = "Product catalog"),
        (name = "Orders", description = "Orders and analytics"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
