//! Order draft (the cart)
//!
//! Collects line items on the waiter or customer screen and produces an
//! [`OrderCreate`] whose subtotal always equals Σ price × quantity.

use super::{OrderCreate, OrderItem, OrderStatus, ServiceType, items_subtotal};
use crate::error::{AppError, ErrorCode};
use crate::models::Product;
use crate::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_price,
    validate_quantity,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderDraft {
    service: ServiceType,
    table_number: Option<u32>,
    items: Vec<OrderItem>,
    note: Option<String>,
    customer_name: Option<String>,
    customer_phone: Option<String>,
}

impl OrderDraft {
    pub fn dine_in(table_number: u32) -> Self {
        Self {
            service: ServiceType::DineIn,
            table_number: Some(table_number),
            ..Default::default()
        }
    }

    pub fn takeout() -> Self {
        Self {
            service: ServiceType::Takeout,
            ..Default::default()
        }
    }

    pub fn service(&self) -> ServiceType {
        self.service
    }

    pub fn table_number(&self) -> Option<u32> {
        self.table_number
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn set_table(&mut self, table_number: u32) {
        self.service = ServiceType::DineIn;
        self.table_number = Some(table_number);
    }

    pub fn set_note(&mut self, note: Option<String>) {
        self.note = note.filter(|n| !n.trim().is_empty());
    }

    pub fn set_customer(&mut self, name: Option<String>, phone: Option<String>) {
        self.customer_name = name;
        self.customer_phone = phone;
    }

    /// Add a product from the catalog, snapshotting its name and price.
    /// Lines for the same product without a note are merged.
    pub fn add_product(
        &mut self,
        product: &Product,
        quantity: u32,
        note: Option<String>,
    ) -> Result<(), AppError> {
        if !product.is_orderable() {
            return Err(AppError::with_message(
                ErrorCode::ProductOutOfStock,
                format!("{} is not available", product.name),
            )
            .with_detail("product_id", product.id.as_str()));
        }
        let note = note.filter(|n| !n.trim().is_empty());
        let mut item = OrderItem::new(&product.id, &product.name, product.price, quantity);
        item.note = note;
        item.category = Some(product.category.clone());
        self.add_item(item)
    }

    /// Add a raw line item
    pub fn add_item(&mut self, item: OrderItem) -> Result<(), AppError> {
        validate_quantity(item.quantity)?;
        validate_price(item.price, "price")?;
        validate_optional_text(&item.note, "note", MAX_NOTE_LEN)?;

        if item.note.is_none()
            && let Some(existing) = self
                .items
                .iter_mut()
                .find(|i| i.product_id == item.product_id && i.note.is_none())
        {
            let merged = existing.quantity + item.quantity;
            validate_quantity(merged)?;
            existing.quantity = merged;
            return Ok(());
        }
        self.items.push(item);
        Ok(())
    }

    /// Set a line's quantity; zero removes it
    pub fn set_quantity(&mut self, index: usize, quantity: u32) -> Result<(), AppError> {
        if index >= self.items.len() {
            return Err(AppError::validation(format!("no line at position {index}")));
        }
        if quantity == 0 {
            self.items.remove(index);
            return Ok(());
        }
        validate_quantity(quantity)?;
        self.items[index].quantity = quantity;
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Option<OrderItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn subtotal(&self) -> f64 {
        items_subtotal(&self.items)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.items.is_empty() {
            return Err(AppError::new(ErrorCode::OrderEmpty));
        }
        if self.service == ServiceType::DineIn && self.table_number.is_none_or(|n| n == 0) {
            return Err(AppError::new(ErrorCode::OrderTableRequired));
        }
        for item in &self.items {
            validate_quantity(item.quantity)?;
            validate_price(item.price, "price")?;
        }
        validate_optional_text(&self.note, "note", MAX_NOTE_LEN)?;
        validate_optional_text(&self.customer_name, "customer_name", MAX_NAME_LEN)?;
        validate_optional_text(&self.customer_phone, "customer_phone", MAX_SHORT_TEXT_LEN)?;
        Ok(())
    }

    /// Produce the create payload. New orders always start `pending`.
    pub fn build(
        self,
        created_by: impl Into<String>,
        created_by_name: Option<String>,
    ) -> Result<OrderCreate, AppError> {
        self.validate()?;
        let subtotal = self.subtotal();
        Ok(OrderCreate {
            table_number: match self.service {
                ServiceType::DineIn => self.table_number,
                ServiceType::Takeout => None,
            },
            items: self.items,
            subtotal,
            note: self.note,
            status: OrderStatus::Pending,
            created_by: created_by.into(),
            created_by_name,
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
        })
    }
}
