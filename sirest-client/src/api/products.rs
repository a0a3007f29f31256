use super::endpoints;
use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::session::Session;
use crate::SirestClient;
use shared::models::{Product, ProductCreate, ProductUpdate, Role};
use shared::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_price, validate_required_text,
};

impl<C: HttpClient> SirestClient<C> {
    /// Catalog. Readable without a session (public menu).
    pub async fn list_products(&self, session: Option<&Session>) -> ClientResult<Vec<Product>> {
        self.fetch_or_default(endpoints::PRODUCTS, "products", session)
            .await
    }

    pub async fn create_product(
        &self,
        session: &Session,
        product: &ProductCreate,
    ) -> ClientResult<Product> {
        session.require_role(&[Role::Admin])?;
        validate_required_text(&product.name, "name", MAX_NAME_LEN)?;
        validate_required_text(&product.category, "category", MAX_NAME_LEN)?;
        validate_price(product.price, "price")?;
        validate_optional_text(&product.description, "description", MAX_NOTE_LEN)?;

        let created: Product = self
            .post_for(endpoints::PRODUCTS, "product", product, Some(session))
            .await?;
        tracing::info!(product_id = %created.id, name = %created.name, "Product created");
        Ok(created)
    }

    pub async fn update_product(
        &self,
        session: &Session,
        product_id: &str,
        update: &ProductUpdate,
    ) -> ClientResult<Product> {
        session.require_role(&[Role::Admin])?;
        if let Some(name) = &update.name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        if let Some(price) = update.price {
            validate_price(price, "price")?;
        }
        let endpoint = endpoints::item(endpoints::PRODUCTS, product_id);
        self.put_for(&endpoint, "product", update, Some(session)).await
    }

    pub async fn delete_product(&self, session: &Session, product_id: &str) -> ClientResult<()> {
        session.require_role(&[Role::Admin])?;
        let endpoint = endpoints::item(endpoints::PRODUCTS, product_id);
        let env: shared::response::Envelope = self.http().delete(&endpoint, Some(session)).await?;
        env.ensure_success()?;
        tracing::info!(product_id, "Product deleted");
        Ok(())
    }
}
