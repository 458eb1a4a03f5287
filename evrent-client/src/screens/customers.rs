use super::{ScreenContext, Submit};
use crate::domain::{Role, User};
use crate::filter::{filter_customers, Choice};
use crate::forms::{check, CustomerUpdateForm};
use crate::messages;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CustomerStats {
    pub total: usize,
    pub verified: usize,
    pub active: usize,
    pub locked: usize,
}

/// Renter accounts as seen by an admin.
pub struct CustomersScreen {
    ctx: ScreenContext,
    pub customers: Vec<User>,
    pub search: String,
    pub verified: Choice<bool>,
    pub status: Choice<bool>,
}

impl CustomersScreen {
    pub fn new(ctx: ScreenContext) -> Self {
        Self {
            ctx,
            customers: Vec::new(),
            search: String::new(),
            verified: Choice::All,
            status: Choice::All,
        }
    }

    pub async fn load(&mut self) {
        let action = self.ctx.api.list_users(Some(Role::Renter));
        if let Some(users) = self.ctx.fetch(action, messages::LOAD_USERS_FAILED).await {
            self.customers = users;
        }
    }

    pub fn visible(&self) -> Vec<&User> {
        filter_customers(&self.customers, &self.search, &self.verified, &self.status)
    }

    pub fn find(&self, id: &str) -> Option<&User> {
        self.customers.iter().find(|x| x.id == id)
    }

    pub fn stats(&self) -> CustomerStats {
        let active = self.customers.iter().filter(|x| x.is_active).count();
        CustomerStats {
            total: self.customers.len(),
            verified: self.customers.iter().filter(|x| x.is_verified()).count(),
            active,
            locked: self.customers.len() - active,
        }
    }

    pub async fn toggle_status(&mut self, id: &str) -> bool {
        let action = self.ctx.api.toggle_user_status(id);
        let done = self
            .ctx
            .perform(action, messages::STATUS_UPDATED, messages::GENERIC_ERROR)
            .await
            .is_some();
        if done {
            self.load().await;
        }
        done
    }

    pub async fn verify(&mut self, id: &str) -> bool {
        let action = self.ctx.api.verify_user(id);
        let done = self
            .ctx
            .perform(action, messages::USER_VERIFIED, messages::GENERIC_ERROR)
            .await
            .is_some();
        if done {
            self.load().await;
        }
        done
    }

    pub async fn update(&mut self, id: &str, form: &CustomerUpdateForm) -> Submit {
        if let Err(errors) = check(form) {
            return Submit::Rejected(errors);
        }

        let action = self.ctx.api.update_user(id, form);
        let saved = self
            .ctx
            .perform(action, messages::USER_UPDATED, messages::GENERIC_ERROR)
            .await;
        if saved.is_none() {
            return Submit::Failed;
        }

        self.load().await;
        Submit::Done
    }

    /// Link to the uploaded identity document, resolved against the asset host.
    pub fn document_url(&self, user: &User) -> Option<String> {
        user.verification
            .document_url
            .as_deref()
            .map(|x| crate::api_client::asset_url(&self.ctx.settings.api_base_url, x))
    }
}
