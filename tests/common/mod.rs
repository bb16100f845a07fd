#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bikolpo::api::CatalogSource;
use bikolpo::error::SourceError;
use bikolpo::models::{Origin, Product, RelatedRef};

/// In-memory catalog source that counts calls and can be switched to fail.
#[derive(Clone, Default)]
pub struct FakeSource {
    pub products: Arc<std::sync::Mutex<Vec<Product>>>,
    pub calls: Arc<AtomicUsize>,
    pub failing: Arc<AtomicBool>,
    pub latency: Duration,
}

impl FakeSource {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(std::sync::Mutex::new(products)),
            ..Default::default()
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn replace(&self, products: Vec<Product>) {
        *self.products.lock().unwrap() = products;
    }
}

impl CatalogSource for FakeSource {
    async fn fetch_all(&self) -> Result<Vec<Product>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(SourceError::Network("connection refused".into()));
        }
        Ok(self.products.lock().unwrap().clone())
    }
}

pub fn dairy_catalog() -> Vec<Product> {
    vec![
        Product::new(1, "Milk Powder", Origin::India, "Dairy"),
        Product::new(2, "Local Milk", Origin::Bangladesh, "Dairy"),
    ]
}

pub fn mixed_catalog() -> Vec<Product> {
    vec![
        Product::new(1, "Milk Powder", Origin::India, "Dairy")
            .with_barcode("8901058000290")
            .with_related(vec![RelatedRef::Reference(2.into()), RelatedRef::Reference(5.into())]),
        Product::new(2, "Local Milk", Origin::Bangladesh, "Dairy").with_details("Fresh cow milk"),
        Product::new(3, "Toothpaste", Origin::India, "Care"),
        Product::new(4, "Neem Soap", Origin::Bangladesh, "Care").with_approved(false),
        Product::new(5, "Mango Juice", Origin::Bangladesh, "Drinks").with_approved(true),
        Product::new(6, "Ghee", Origin::Bangladesh, "Dairy"),
    ]
}
