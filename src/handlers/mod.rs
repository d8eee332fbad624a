pub mod common;
pub mod customers;
pub mod financial;
pub mod health;
pub mod orders;
pub mod products;
pub mod stock;

use std::sync::Arc;

use crate::clients::DolibarrClient;
use crate::db::DbPool;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub products: Arc<crate::services::ProductService>,
    pub stock: Arc<crate::services::StockService>,
    pub orders: Arc<crate::services::OrderService>,
    pub customers: Arc<crate::services::CustomerService>,
    pub financial: Arc<crate::services::FinancialService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>, erp: Arc<DolibarrClient>) -> Self {
        let products = Arc::new(crate::services::ProductService::new(
            db_pool.clone(),
            erp.clone(),
        ));
        let stock = Arc::new(crate::services::StockService::new(db_pool.clone()));
        let orders = Arc::new(crate::services::OrderService::new(
            db_pool.clone(),
            erp.clone(),
        ));
        let customers = Arc::new(crate::services::CustomerService::new(db_pool.clone(), erp));
        let financial = Arc::new(crate::services::FinancialService::new(db_pool));

        Self {
            products,
            stock,
            orders,
            customers,
            financial,
        }
    }
}
