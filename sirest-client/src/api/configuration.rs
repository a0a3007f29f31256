use super::endpoints;
use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::session::Session;
use crate::SirestClient;
use shared::error::AppError;
use shared::models::{RestaurantConfig, Role};
use shared::validation::{MAX_NAME_LEN, validate_required_text};

impl<C: HttpClient> SirestClient<C> {
    /// Restaurant settings; falls back to defaults when the backend has none
    pub async fn get_configuration(&self, session: &Session) -> ClientResult<RestaurantConfig> {
        self.fetch_or_default(endpoints::CONFIGURATION, "configuration", Some(session))
            .await
    }

    pub async fn update_configuration(
        &self,
        session: &Session,
        config: &RestaurantConfig,
    ) -> ClientResult<RestaurantConfig> {
        session.require_role(&[Role::Admin])?;
        validate_required_text(&config.name, "name", MAX_NAME_LEN)?;
        for (field, value) in [
            ("service_charge_percent", config.service_charge_percent),
            ("tax_percent", config.tax_percent),
        ] {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(AppError::validation(format!(
                    "{field} must be between 0 and 100, got {value}"
                ))
                .into());
            }
        }
        let saved: RestaurantConfig = self
            .put_for(endpoints::CONFIGURATION, "configuration", config, Some(session))
            .await?;
        tracing::info!(name = %saved.name, "Configuration updated");
        Ok(saved)
    }
}
